// src/io/reporting.rs

use crate::errors::SimResult;
use crate::simulation::engine::ConvergenceRecord;
use std::path::Path;
use tracing::info;

/// Writes a run's convergence trace to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The checkpoint records collected by the simulation engine.
pub fn write_convergence_log<P: AsRef<Path>>(
    file_path: P,
    data: &[ConvergenceRecord],
) -> SimResult<()> {
    let path = file_path.as_ref();

    let mut wtr = csv::Writer::from_path(path)?;

    // Serialize and write each record
    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(
        rows = data.len(),
        path = %path.display(),
        "exported convergence trace"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationConfig;
    use crate::simulation::engine::PricingSimulation;

    #[test]
    fn writes_one_row_per_checkpoint_plus_header() {
        let config = SimulationConfig {
            iterations: 2_000,
            seed: Some(6),
            checkpoints: 10,
            ..SimulationConfig::default()
        };
        let mut sim = PricingSimulation::new(config).unwrap();
        sim.run().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        write_convergence_log(&path, &sim.history).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), sim.history.len() + 1);
        assert!(lines[0].contains("checkpoint"));
        assert!(lines[0].contains("std_error"));
    }
}

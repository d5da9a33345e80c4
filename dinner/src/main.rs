// ABOUTME: Runs the reference dinner: five philosophers, five chopsticks, two seats.
// ABOUTME: Progress lines go to stdout; diagnostics go to stderr through tracing.

use anyhow::Result;
use tracing::Level;

use philo::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let coordinator = Coordinator::new(TableConfig::default())?;
    let report = coordinator.run().await?;

    tracing::info!(
        meals = report.meals(),
        peak_admitted = report.monitor.peak_admitted,
        "everyone has eaten"
    );
    Ok(())
}

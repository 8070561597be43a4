use anyhow::Context;
use sort_timings::bench::{parse_cli, run};
use sort_timings::logging::init_logging;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let (config, verbose) = parse_cli();
    init_logging(verbose);
    info!(
        "sort passengers from {} in {} round(s), timings to {}, sorted lists to {}",
        config.passengers.display(),
        config.sizes.len(),
        config.timings.display(),
        config.sorted_dir.display()
    );
    let rows = run(&config)
        .with_context(|| format!("benchmark on {} failed", config.passengers.display()))?;
    info!("wrote {} timing row(s) to {}", rows.len(), config.timings.display());
    Ok(())
}

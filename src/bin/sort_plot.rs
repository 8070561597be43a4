use anyhow::Context;
use sort_timings::logging::init_logging;
use sort_timings::plot::parse_cli;
use sort_timings::plot_timings;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let (csvin, outdir, verbose) = parse_cli();
    init_logging(verbose);
    info!(
        "read timings from {} and plot to {}",
        csvin.display(),
        outdir.display()
    );
    let written = plot_timings(&csvin, &outdir)
        .with_context(|| format!("could not plot the timings of {}", csvin.display()))?;
    for fout in written {
        println!("{}", fout.display());
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use queuesim_core::init_simulation_logging_with_level;
use queuesim_metrics::{export_csv, export_json};
use queuesim_sweep::config::{Mm1Args, PoissonArgs};
use queuesim_sweep::{run_mm1_sweep, run_poisson_sweep, Cli, Command};
use queuesim_sweep::{Mm1SweepConfig, PoissonSweepConfig};
use queuesim_viz::charts::{generate_mm1_charts, generate_poisson_charts};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_simulation_logging_with_level(&cli.log_level);

    match &cli.command {
        Command::Mm1(args) => mm1(args),
        Command::Poisson(args) => poisson(args),
    }
}

fn mm1(args: &Mm1Args) -> Result<()> {
    let config = Mm1SweepConfig::from(args);
    let table = run_mm1_sweep(&config).context("M/M/1 sweep failed")?;
    print!("{}", table.render_text());

    if let Some(path) = &args.csv {
        export_csv(&table, path)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        info!(path = %path.display(), "Wrote CSV");
    }
    if let Some(path) = &args.json {
        export_json(&table, path, true)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        info!(path = %path.display(), "Wrote JSON");
    }
    if let Some(dir) = &args.plot_dir {
        generate_mm1_charts(&table, dir)
            .with_context(|| format!("writing charts to {}", dir.display()))?;
    }
    Ok(())
}

fn poisson(args: &PoissonArgs) -> Result<()> {
    let config = PoissonSweepConfig::from(args);
    let output = run_poisson_sweep(&config).context("Poisson sweep failed")?;

    if args.save_plots {
        generate_poisson_charts(output.all(), &args.output_dir)
            .with_context(|| format!("writing charts to {}", args.output_dir.display()))?;
    } else {
        for result in output.all() {
            println!("{result}");
        }
    }
    Ok(())
}

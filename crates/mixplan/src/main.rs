use clap::Parser;
use mixplan::cli::Args;
use mixplan::{commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_target().as_deref(), &args.log_level)?;

    let report = commands::run(&args.command)?;
    commands::emit(commands::output_path(&args.command), &report)?;

    Ok(())
}

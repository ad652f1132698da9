use std::{error::Error, fs::File, path::Path};

use clap::Parser;
use horizon_twins::{
    cli::Cli,
    ui::{self, RunOutcome},
};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = cli.to_config()?;

    if ui::run(config)? == RunOutcome::StuckAtHorizon {
        println!("You got stuck in the event horizon. Time no longer exists.");
    }
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.try_init()?;
    Ok(())
}

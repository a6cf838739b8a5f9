//! Cronicle CLI - keep rotated time-spaced archives of a file.

use clap::Parser;
use cronicle_cli::{commands, logging, Cli, Config, Formatter};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cronicle_cli::Result<()> {
    // Resolve config location
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    commands::execute_rotate(&cli, &config, &config_path, &formatter)?;

    Ok(())
}

use clap::Parser;

use distship::config::DeployConfig;
use distship::{deploy, interrupt, log_status};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "distship")]
#[command(version = VERSION)]
#[command(about = "Build the frontend, archive dist/, and ship it to the server")]
struct Cli {}

fn main() -> std::process::ExitCode {
    let _cli = Cli::parse();

    interrupt::install();

    match run() {
        Ok(()) => {
            log_status!("deploy", "Done");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("distship: {}", err);
            for hint in &err.hints {
                eprintln!("  hint: {}", hint.message);
            }
            std::process::ExitCode::FAILURE
        }
    }
}

fn run() -> distship::Result<()> {
    let config = DeployConfig::from_env()?;
    log_status!(
        "config",
        "Target {}:{} (port {})",
        config.target(),
        config.remote_path,
        config.port
    );

    deploy::run(&config)
}

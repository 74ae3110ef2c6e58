use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use mapip::cli::Cli;
use mapip::config::AppConfig;
use mapip::errors::MapIpError;
use mapip::{runtime, system};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        return match config.to_json_pretty() {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        };
    }

    // 日志 guard 必须活到 main 结束
    let _guard = match system::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", MapIpError::io(format!("{:#}", e)).format_colored());
            return ExitCode::FAILURE;
        }
    };

    match runtime::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Exiting with {} ({})", e, e.code());
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}

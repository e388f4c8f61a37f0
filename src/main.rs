use clap::Parser;
use crossterm::style::Stylize;
use dotdash::cli::{Args, build_history, run_command};
use dotdash::core::Transcoder;
use dotdash::core::config::{self, ResolvedConfig};
use dotdash::repl;
use log::{error, info};
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fmt::Display;
use std::fs::File;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let cli = args.overrides();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            report(!cli.no_color, format!("{e} (using defaults)"));
            config::DotdashConfig::default()
        }
    };
    let config = config::resolve(&file_config, &cli);

    init_logger(&config);
    info!("dotdash starting up with config: {:?}", config);

    let transcoder = Transcoder::new(build_history(&config));

    let result = match args.command {
        None => repl::run(&transcoder, &config).map_err(|e| {
            error!("Interactive loop failed: {}", e);
            Box::new(e) as Box<dyn Error>
        }),
        Some(command) => run_command(&transcoder, &config, command).map(|out| println!("{out}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(config.color, e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize file logger, writing to the configured log file.
fn init_logger(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

fn report(color: bool, message: impl Display) {
    let text = format!("⚠ Error: {message}");
    if color {
        eprintln!("{}", text.red());
    } else {
        eprintln!("{text}");
    }
}

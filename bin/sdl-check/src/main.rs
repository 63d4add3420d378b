mod cli;
mod commands;
mod logger;

use std::process::ExitCode;

use sdl_check_config::load_config;
use tracing::error;

use crate::{
    cli::{parse_args, Command, USAGE},
    commands::{exit_code, run},
    logger::configure_logging,
};

fn main() -> ExitCode {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    if command == Command::Help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let config_path = std::env::var("SDL_CHECK_CONFIG_FILE_PATH").ok();
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    let _log_guard = configure_logging(&config.log);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run(command, &config, &mut out);

    if let Err(err) = &outcome {
        error!("{}", err);
    }

    ExitCode::from(exit_code(&outcome))
}

//! Logger setup. The transcript owns stdout, so by default log records go to
//! `./docqa.log` only; `log_destination` in the config can add the terminal.

use std::fs::File;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./docqa.log";
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    /// stderr, colored when it is a tty.
    Terminal,
    Both,
}

impl LogDestination {
    fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn writes_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and skipped; the client still runs.
pub fn initialize(destination: LogDestination) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.writes_terminal() {
        loggers.push(TermLogger::new(
            LOG_LEVEL,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.writes_file() {
        match File::create(LOG_FILENAME) {
            Ok(file) => loggers.push(WriteLogger::new(LOG_LEVEL, config, file)),
            Err(err) => eprintln!("docqa: cannot create {LOG_FILENAME}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

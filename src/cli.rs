use clap::Parser;
use std::path::PathBuf;

/// Walk the example feature through the app object model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of times to toggle the example flag
    #[arg(short = 't', long = "toggles", value_name = "N", default_value_t = 2)]
    pub toggles: u32,

    /// Text to write into an example entity (created on demand)
    #[arg(long = "text", value_name = "STR")]
    pub text: Option<String>,

    /// Animate a number from 0 to VALUE with LerpNumber
    #[arg(long = "lerp", value_name = "VALUE")]
    pub lerp_to: Option<f64>,

    /// Settings file (JSON); falls back to APPOBJECTS_CONFIG
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log to file instead of stderr (default: appobjects.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Log file path, if `--log` was given.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_ref()
            .map(|path| path.clone().unwrap_or_else(|| PathBuf::from("appobjects.log")))
    }
}

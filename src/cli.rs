use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use crate::shift::Direction;

#[derive(Debug, Parser)]
#[command(name = "srtshift")]
#[command(about = "Shift SRT subtitle timings forward or backward.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shift one or more SRT files
    Shift(ShiftCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Clone, Parser)]
pub struct ShiftCmd {
    /// Input SRT files, or '-' for stdin
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Shift amount in milliseconds (defaults to shift.offset_ms)
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    pub offset_ms: Option<i64>,

    /// Shift direction (defaults to shift.direction)
    #[arg(short, long, value_enum)]
    pub direction: Option<Direction>,

    /// Prefix for output file names (defaults to output.prefix)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Directory for output files (defaults to each input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write shifted SRT to stdout instead of a file (single input only)
    #[arg(long, conflicts_with = "json")]
    pub stdout: bool,

    /// Allow overwriting output files
    #[arg(long)]
    pub overwrite: bool,

    /// Print a JSON report of the batch to stdout
    #[arg(long)]
    pub json: bool,
}

impl ShiftCmd {
    /// `--stdout` carries exactly one SRT document.
    pub fn validate(&self) -> Result<()> {
        if self.stdout && self.inputs.len() > 1 {
            return Err(anyhow!(
                "--stdout takes a single input, got {}",
                self.inputs.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shift_command() {
        let args = Args::try_parse_from([
            "srtshift", "shift", "a.srt", "b.srt", "-m", "750", "-d", "forward", "--overwrite",
        ])
        .unwrap();

        let Command::Shift(cmd) = args.command else {
            panic!("expected shift command");
        };
        assert_eq!(cmd.inputs, vec!["a.srt", "b.srt"]);
        assert_eq!(cmd.offset_ms, Some(750));
        assert_eq!(cmd.direction, Some(Direction::Forward));
        assert!(cmd.overwrite);
        assert!(!cmd.stdout);
    }

    #[test]
    fn stdout_and_json_conflict() {
        let res = Args::try_parse_from(["srtshift", "shift", "a.srt", "--stdout", "--json"]);
        assert!(res.is_err());
    }

    #[test]
    fn stdout_rejects_several_inputs() {
        let args = Args::try_parse_from(["srtshift", "shift", "a.srt", "b.srt", "--stdout"]).unwrap();
        let Command::Shift(cmd) = args.command else {
            panic!("expected shift command");
        };
        assert!(cmd.validate().is_err());

        let args = Args::try_parse_from(["srtshift", "shift", "a.srt", "--stdout"]).unwrap();
        let Command::Shift(cmd) = args.command else {
            panic!("expected shift command");
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn shift_requires_input() {
        assert!(Args::try_parse_from(["srtshift", "shift"]).is_err());
    }
}

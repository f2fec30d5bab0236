//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// logweave -- check renderer configuration and preview rendered log fragments.
///
/// Use `logweave <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logweave", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logweave.toml configuration file.
    #[arg(short, long, default_value = "logweave.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every configured renderer and report warnings and errors.
    Check,

    /// Render a synthetic error event with the configured renderers.
    Render(RenderArgs),
}

// ---- render ----

/// Render a synthetic log event carrying an attached error.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Fully-qualified type name of the attached error.
    #[arg(long, default_value = "app.SampleError")]
    pub error_type: String,

    /// Error message.
    #[arg(short, long, default_value = "sample failure")]
    pub message: String,

    /// Stack trace text (use `\n` between frames).
    #[arg(long)]
    pub stack_trace: Option<String>,

    /// Originating method descriptor.
    #[arg(long)]
    pub method: Option<String>,

    /// Nested cause as `TYPE=MESSAGE`, outermost first. Repeatable.
    #[arg(long = "cause")]
    pub causes: Vec<String>,

    /// Use an ad-hoc exception renderer with this format instead of the config file.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Separator for the ad-hoc exception renderer.
    #[arg(long, default_value = " ", requires = "format")]
    pub separator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["logweave", "check"]).expect("should parse 'check'");
        assert!(matches!(cli.command, Commands::Check));
        assert_eq!(cli.config, PathBuf::from("logweave.toml"));
    }

    #[test]
    fn test_cli_parse_check_custom_config() {
        let cli = Cli::try_parse_from(["logweave", "-c", "/tmp/lw.toml", "check"])
            .expect("should parse custom config");
        assert_eq!(cli.config, PathBuf::from("/tmp/lw.toml"));
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let cli = Cli::try_parse_from(["logweave", "render"]).expect("should parse 'render'");
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.error_type, "app.SampleError");
                assert_eq!(args.message, "sample failure");
                assert!(args.format.is_none());
                assert!(args.causes.is_empty());
                assert_eq!(args.separator, " ");
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_render_repeated_causes() {
        let cli = Cli::try_parse_from([
            "logweave",
            "render",
            "--format",
            "type,message",
            "--cause",
            "io.Error=disk",
            "--cause",
            "os.Error=eio",
        ])
        .expect("should parse repeated causes");
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.format.as_deref(), Some("type,message"));
                assert_eq!(args.causes, vec!["io.Error=disk", "os.Error=eio"]);
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn test_cli_separator_requires_format() {
        let result = Cli::try_parse_from(["logweave", "render", "--separator", "|"]);
        assert!(result.is_err(), "separator without format should be rejected");
    }

    #[test]
    fn test_cli_parse_json_output() {
        let cli = Cli::try_parse_from(["logweave", "--output", "json", "check"])
            .expect("should parse json output");
        assert!(matches!(cli.output, OutputFormat::Json));
    }
}

//! CLI-specific error types and exit code mapping

use logweave_core::error::{ConfigError, LogweaveError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A renderer could not be built from its configuration.
    #[error("renderer error: {0}")]
    Renderer(#[from] ConfigError),

    /// `check` found renderers that could not be built.
    #[error("renderer error: {failed} of {total} renderers could not be built")]
    RendererCheck { failed: usize, total: usize },

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logweave-core.
    #[error("{0}")]
    Core(#[from] LogweaveError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 3    | Renderer could not be built     |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Core(LogweaveError::Config(_)) => 2,
            Self::Renderer(_) | Self::RendererCheck { .. } => 3,
            Self::Io(_) | Self::Core(LogweaveError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_renderer_check_error() {
        let err = CliError::RendererCheck { failed: 1, total: 2 };
        assert_eq!(err.exit_code(), 3, "failed renderer check should return exit code 3");
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn test_exit_code_core_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::IsADirectory, "is a directory");
        let err: CliError = LogweaveError::Io(io_err).into();
        assert_eq!(err.exit_code(), 10, "core io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let core = LogweaveError::Config(ConfigError::FileNotFound {
            path: "logweave.toml".to_owned(),
        });
        let err: CliError = core.into();
        assert_eq!(err.exit_code(), 2, "core config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_renderer_error() {
        let err: CliError = ConfigError::UnknownRenderer("hostname".to_owned()).into();
        assert_eq!(err.exit_code(), 3, "renderer error should return exit code 3");
        assert!(err.to_string().contains("hostname"));
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("bad cause".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
        assert_eq!(err.to_string(), "bad cause");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1, "json serialize error should return exit code 1");
    }
}

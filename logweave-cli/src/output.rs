//! Output formatting abstraction for text vs JSON reports
//!
//! All subcommand output flows through [`OutputWriter`] which handles format switching.
//! This keeps format-specific logic out of command handlers entirely.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Abstraction for writing CLI output in different formats.
///
/// Subcommand handlers call `writer.write(&payload)` where `payload`
/// implements both `Serialize` (for JSON) and `TextOutput` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a payload to stdout.
    pub fn write<T: TextOutput + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, payload)
    }

    /// Write a payload to an arbitrary writer.
    ///
    /// For `Text` format, delegates to `TextOutput::write_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn write_to<T: TextOutput + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => {
                payload.write_text(w)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text output.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait TextOutput {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

//! `logweave check` command handler

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use logweave_core::config::LogweaveConfig;
use logweave_core::diagnostics::{DiagnosticLevel, MemorySink};
use logweave_renderers::RendererRegistry;

use crate::error::CliError;
use crate::output::{OutputWriter, TextOutput};

/// Execute the `check` command.
///
/// Loads the configuration, builds every renderer with a collecting
/// diagnostics sink and reports per-renderer warnings and errors.
/// Unknown format directives are warnings; they do not make the config invalid.
///
/// # Errors
///
/// - `CliError::Core` if the file cannot be loaded (exit 2, or 10 for IO failures).
/// - `CliError::RendererCheck` if any renderer fails to build (exit 3).
pub async fn execute(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "checking renderer configuration");

    let config = LogweaveConfig::load(config_path).await?;

    let report = check_config(&config, config_path.display().to_string());
    writer.write(&report)?;

    if !report.valid {
        return Err(CliError::RendererCheck {
            failed: report.renderers.iter().filter(|r| !r.ok).count(),
            total: report.renderers.len(),
        });
    }

    Ok(())
}

/// Build every configured renderer and collect the outcome.
pub fn check_config(config: &LogweaveConfig, source: String) -> CheckReport {
    let renderers: Vec<RendererCheck> = config
        .renderers
        .iter()
        .enumerate()
        .map(|(index, renderer_config)| {
            let sink = Arc::new(MemorySink::new());
            let registry = RendererRegistry::with_defaults().with_sink(sink.clone());
            let built = registry.build(renderer_config);

            let warnings = sink
                .entries()
                .into_iter()
                .filter(|(level, _)| *level >= DiagnosticLevel::Warn)
                .map(|(_, message)| message)
                .collect();

            match built {
                Ok(renderer) => RendererCheck {
                    index,
                    kind: renderer_config.kind.clone(),
                    ok: true,
                    precomputable: Some(renderer.is_precomputable()),
                    warnings,
                    error: None,
                },
                Err(e) => RendererCheck {
                    index,
                    kind: renderer_config.kind.clone(),
                    ok: false,
                    precomputable: None,
                    warnings,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    CheckReport {
        source,
        valid: renderers.iter().all(|r| r.ok),
        renderers,
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub source: String,
    pub valid: bool,
    pub renderers: Vec<RendererCheck>,
}

#[derive(Debug, Serialize)]
pub struct RendererCheck {
    pub index: usize,
    pub kind: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precomputable: Option<bool>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TextOutput for CheckReport {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Config: {}", self.source)?;
        if self.renderers.is_empty() {
            writeln!(w, "  (no renderers configured)")?;
        }
        for r in &self.renderers {
            let status = if r.ok { "ok" } else { "error" };
            writeln!(w, "  [{}] {:<12} {}", r.index, r.kind, status)?;
            for warning in &r.warnings {
                writeln!(w, "      warning: {}", warning)?;
            }
            if let Some(error) = &r.error {
                writeln!(w, "      error: {}", error)?;
            }
        }
        writeln!(
            w,
            "Result: {}",
            if self.valid { "valid" } else { "invalid" }
        )?;
        Ok(())
    }
}

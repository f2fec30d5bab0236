//! `logweave render` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use logweave_core::config::LogweaveConfig;
use logweave_core::event::{Level, LogEvent};
use logweave_core::exception::ErrorInfo;
use logweave_core::renderer::{ConfigurableRenderer, Renderer};
use logweave_renderers::{ExceptionRenderer, RendererRegistry};

use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, TextOutput};

/// Execute the `render` command.
///
/// With `--format`, renders through an ad-hoc exception renderer; otherwise
/// every renderer in the configuration file is built and applied in order.
///
/// # Errors
///
/// - `CliError::Command` if a `--cause` value is malformed.
/// - `CliError::Core` if the config file cannot be loaded (exit 2, or 10 for IO failures).
/// - `CliError::Renderer` if a configured renderer cannot be built.
pub async fn execute(
    args: &RenderArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let event = build_event(args)?;

    let renderers: Vec<Box<dyn ConfigurableRenderer>> = match &args.format {
        Some(format) => {
            debug!(format = %format, "using ad-hoc exception renderer");
            let mut renderer = ExceptionRenderer::new();
            renderer.set_format(format.as_str());
            renderer.set_separator(args.separator.as_str());
            vec![Box::new(renderer)]
        }
        None => {
            let config = LogweaveConfig::load(config_path).await?;
            RendererRegistry::with_defaults().build_all(&config)?
        }
    };

    info!(renderers = renderers.len(), "rendering sample event");
    let report = render_event(&renderers, &event);
    writer.write(&report)?;
    Ok(())
}

/// Build the synthetic event described by the command-line arguments.
///
/// `--cause` values are listed outermost first; `\n` in `--stack-trace`
/// becomes a line break.
pub fn build_event(args: &RenderArgs) -> Result<LogEvent, CliError> {
    let mut causes = args
        .causes
        .iter()
        .map(|raw| parse_cause(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut chain: Option<ErrorInfo> = None;
    while let Some(mut cause) = causes.pop() {
        if let Some(inner) = chain.take() {
            cause = cause.with_cause(inner);
        }
        chain = Some(cause);
    }

    let mut error = ErrorInfo::new(args.error_type.as_str(), args.message.as_str());
    if let Some(trace) = &args.stack_trace {
        error = error.with_stack_trace(trace.replace("\\n", "\n"));
    }
    if let Some(method) = &args.method {
        error = error.with_method(method.as_str());
    }
    if let Some(inner) = chain {
        error = error.with_cause(inner);
    }

    Ok(LogEvent::new(Level::Error, "logweave.cli", "sample event").with_error(error))
}

fn parse_cause(raw: &str) -> Result<ErrorInfo, CliError> {
    match raw.split_once('=') {
        Some((type_name, message)) if !type_name.trim().is_empty() => {
            Ok(ErrorInfo::new(type_name.trim(), message))
        }
        _ => Err(CliError::Command(format!(
            "invalid cause '{}': expected TYPE=MESSAGE",
            raw
        ))),
    }
}

/// Apply each renderer to the event.
pub fn render_event(renderers: &[Box<dyn ConfigurableRenderer>], event: &LogEvent) -> RenderReport {
    let fragments = renderers
        .iter()
        .map(|renderer| RenderedFragment {
            kind: renderer.keyword().to_owned(),
            text: renderer.render_to_string(event),
        })
        .collect();
    RenderReport { fragments }
}

#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub fragments: Vec<RenderedFragment>,
}

#[derive(Debug, Serialize)]
pub struct RenderedFragment {
    pub kind: String,
    pub text: String,
}

impl TextOutput for RenderReport {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for fragment in &self.fragments {
            writeln!(w, "[{}] {}", fragment.kind, fragment.text)?;
        }
        Ok(())
    }
}

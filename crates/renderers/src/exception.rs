//! 첨부 에러 렌더러
//!
//! [`ExceptionRenderer`]는 컴파일된 지시자 순서열을 이벤트의 첨부 에러에
//! 차례로 적용하고, 결과 사이에 구분자를 넣어 하나의 텍스트 조각을 만듭니다.
//!
//! # 사용 예시
//! ```
//! use logweave_core::event::{Level, LogEvent};
//! use logweave_core::exception::ErrorInfo;
//! use logweave_core::renderer::Renderer;
//! use logweave_renderers::ExceptionRenderer;
//!
//! let mut renderer = ExceptionRenderer::new();
//! renderer.set_format("type, message");
//!
//! let event = LogEvent::new(Level::Error, "app", "request failed")
//!     .with_error(ErrorInfo::new("X", "boom"));
//! assert_eq!(renderer.render_to_string(&event), "X boom");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use logweave_core::diagnostics::{SharedSink, TracingSink};
use logweave_core::error::{ConfigError, RenderError};
use logweave_core::event::LogEvent;
use logweave_core::exception::AttachedError;
use logweave_core::metrics as m;
use logweave_core::renderer::{ConfigurableRenderer, Renderer, unknown_property};

use crate::directive::{CompiledFormat, Directive};
use crate::registry::RegisteredRenderer;

/// 렌더링 결과 크기 추정값 (대략적인 값, 정확할 필요 없음)
pub const EXCEPTION_SIZE_ESTIMATE: usize = 32;

/// 기본 형식 문자열
pub const DEFAULT_FORMAT: &str = "message";

/// 기본 지시자 구분자
pub const DEFAULT_SEPARATOR: &str = " ";

/// 기본 원인 에러 구분자
pub const DEFAULT_INNER_SEPARATOR: &str = "\n";

/// 첨부 에러 렌더러
///
/// ## 속성
/// - `Format`: 지시자 형식 문자열 (기본값 `"message"`)
/// - `Separator`: 지시자 결과 사이 구분자 (기본값 `" "`)
/// - `InnerFormat`: 원인 에러 형식 문자열 (기본값 `"message"`)
/// - `InnerSeparator`: 원인 에러 앞에 붙는 구분자 (기본값 줄바꿈)
/// - `MaxInnerLevel`: 렌더링할 원인 에러 최대 깊이 (기본값 `0`, 비활성)
///
/// 형식을 바꾸면 즉시 다시 컴파일합니다. 구분자 변경에는 컴파일 비용이 없습니다.
///
/// ## 렌더링 결함
/// 에러 접근자가 패닉하면 해당 지시자의 출력만 비우고 진단 싱크로 보고합니다.
/// 단, 패닉 훅은 `catch_unwind` 이전에 실행되므로 기본 훅은 여전히 stderr에
/// 패닉 메시지를 출력합니다. 진단 싱크만으로 보고하려면 호스트가
/// [`std::panic::set_hook`]으로 자체 훅을 설치해야 합니다.
#[derive(Debug, Clone)]
pub struct ExceptionRenderer {
    format: String,
    compiled: CompiledFormat,
    separator: String,
    inner_format: String,
    inner_compiled: CompiledFormat,
    inner_separator: String,
    max_inner_level: usize,
    sink: SharedSink,
}

impl ExceptionRenderer {
    /// 등록 키워드
    pub const KEYWORD: &'static str = "exception";

    /// 기본 설정과 `tracing` 진단 싱크로 렌더러를 생성합니다.
    pub fn new() -> Self {
        Self::with_sink(TracingSink::shared())
    }

    /// 지정한 진단 싱크로 렌더러를 생성합니다.
    pub fn with_sink(sink: SharedSink) -> Self {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT, sink.as_ref());
        Self {
            format: DEFAULT_FORMAT.to_owned(),
            inner_format: DEFAULT_FORMAT.to_owned(),
            inner_compiled: compiled.clone(),
            compiled,
            separator: DEFAULT_SEPARATOR.to_owned(),
            inner_separator: DEFAULT_INNER_SEPARATOR.to_owned(),
            max_inner_level: 0,
            sink,
        }
    }

    /// 형식 문자열을 바꾸고 즉시 다시 컴파일합니다.
    ///
    /// 이전 컴파일 결과는 완전히 대체됩니다.
    pub fn set_format(&mut self, format: impl Into<String>) -> &CompiledFormat {
        self.format = format.into();
        self.compiled = CompiledFormat::compile(&self.format, self.sink.as_ref());
        &self.compiled
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// 원인 에러 형식 문자열을 바꾸고 즉시 다시 컴파일합니다.
    pub fn set_inner_format(&mut self, format: impl Into<String>) -> &CompiledFormat {
        self.inner_format = format.into();
        self.inner_compiled = CompiledFormat::compile(&self.inner_format, self.sink.as_ref());
        &self.inner_compiled
    }

    pub fn set_inner_separator(&mut self, separator: impl Into<String>) {
        self.inner_separator = separator.into();
    }

    pub fn set_max_inner_level(&mut self, level: usize) {
        self.max_inner_level = level;
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn compiled(&self) -> &CompiledFormat {
        &self.compiled
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn inner_format(&self) -> &str {
        &self.inner_format
    }

    pub fn inner_separator(&self) -> &str {
        &self.inner_separator
    }

    pub fn max_inner_level(&self) -> usize {
        self.max_inner_level
    }

    /// 지시자 순서열을 에러에 적용합니다. 첫 지시자를 제외한 각 지시자 앞에 구분자를 넣습니다.
    fn render_directives(
        &self,
        out: &mut String,
        error: &dyn AttachedError,
        compiled: &CompiledFormat,
    ) {
        for (index, directive) in compiled.iter().enumerate() {
            if index > 0 {
                out.push_str(&self.separator);
            }
            self.extract_guarded(directive, error, out);
        }
    }

    /// 지시자 하나를 실행합니다. 접근자가 패닉하면 이 지시자의 출력만 비웁니다.
    fn extract_guarded(&self, directive: Directive, error: &dyn AttachedError, out: &mut String) {
        let mark = out.len();
        let result = panic::catch_unwind(AssertUnwindSafe(|| directive.extract(error, out)));
        if let Err(payload) = result {
            out.truncate(mark);
            self.report_fault(directive.name(), payload.as_ref());
        }
    }

    fn cause_guarded<'a>(&self, error: &'a dyn AttachedError) -> Option<&'a dyn AttachedError> {
        match panic::catch_unwind(AssertUnwindSafe(|| error.cause())) {
            Ok(cause) => cause,
            Err(payload) => {
                self.report_fault("cause", payload.as_ref());
                None
            }
        }
    }

    fn report_fault(&self, directive: &'static str, payload: &(dyn Any + Send)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic while reading error".to_owned());
        let fault = RenderError::Fault {
            directive: directive.to_owned(),
            reason,
        };

        metrics::counter!(
            m::RENDER_FAULTS_TOTAL,
            m::LABEL_RENDERER => Self::KEYWORD,
            m::LABEL_DIRECTIVE => directive
        )
        .increment(1);
        self.sink.warn(format_args!("exception renderer: {fault}"));
    }
}

impl Default for ExceptionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ExceptionRenderer {
    fn estimate_size(&self, _event: &LogEvent) -> usize {
        EXCEPTION_SIZE_ESTIMATE
    }

    fn render(&self, buf: &mut String, event: &LogEvent) {
        let Some(error) = event.error() else {
            return;
        };

        let mut scratch = String::with_capacity(EXCEPTION_SIZE_ESTIMATE);
        self.render_directives(&mut scratch, error, &self.compiled);

        let mut current = error;
        for _ in 0..self.max_inner_level {
            let Some(inner) = self.cause_guarded(current) else {
                break;
            };
            scratch.push_str(&self.inner_separator);
            self.render_directives(&mut scratch, inner, &self.inner_compiled);
            current = inner;
        }

        buf.push_str(&scratch);
    }

    fn is_volatile(&self) -> bool {
        false
    }
}

impl ConfigurableRenderer for ExceptionRenderer {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn set_property(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match normalize_property(name).as_str() {
            "format" => {
                self.set_format(value);
            }
            "separator" => self.set_separator(value),
            "innerformat" => {
                self.set_inner_format(value);
            }
            "innerseparator" => self.set_inner_separator(value),
            "maxinnerlevel" => {
                let level = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: format!("{}.{}", Self::KEYWORD, name),
                        reason: format!("expected a non-negative integer: {e}"),
                    })?;
                self.set_max_inner_level(level);
            }
            _ => return Err(unknown_property(Self::KEYWORD, name)),
        }
        Ok(())
    }
}

impl RegisteredRenderer for ExceptionRenderer {
    const KEYWORD: &'static str = ExceptionRenderer::KEYWORD;

    fn create(sink: SharedSink) -> Self {
        Self::with_sink(sink)
    }
}

/// 속성 이름 정규화: 소문자로 바꾸고 `_`, `-`를 제거합니다 (`Max_Inner-Level` → `maxinnerlevel`).
fn normalize_property(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use logweave_core::diagnostics::{DiagnosticLevel, MemorySink};
    use logweave_core::event::Level;
    use logweave_core::exception::ErrorInfo;

    fn renderer_with_sink() -> (ExceptionRenderer, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (ExceptionRenderer::with_sink(sink.clone()), sink)
    }

    fn event_with(error: ErrorInfo) -> LogEvent {
        LogEvent::new(Level::Error, "app", "failed").with_error(error)
    }

    /// 접근자가 패닉하는 에러
    #[derive(Debug)]
    struct PanickingError;

    impl AttachedError for PanickingError {
        fn message(&self) -> &str {
            "stable message"
        }

        fn type_name(&self) -> &str {
            panic!("type metadata unavailable")
        }

        fn cause(&self) -> Option<&dyn AttachedError> {
            panic!("cause chain corrupted")
        }
    }

    #[test]
    fn defaults() {
        let renderer = ExceptionRenderer::new();
        assert_eq!(renderer.format(), "message");
        assert_eq!(renderer.separator(), " ");
        assert_eq!(renderer.compiled().directives(), &[Directive::Message]);
        assert_eq!(renderer.max_inner_level(), 0);
        assert!(!renderer.is_volatile());
        assert!(!renderer.is_precomputable());
    }

    #[test]
    fn default_format_renders_message() {
        let renderer = ExceptionRenderer::new();
        let event = event_with(ErrorInfo::new("a.b.X", "boom"));
        assert_eq!(renderer.render_to_string(&event), "boom");
    }

    #[test]
    fn type_and_message_joined_by_separator() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("type,message");
        let event = event_with(ErrorInfo::new("X", "boom"));
        assert_eq!(renderer.render_to_string(&event), "X boom");
    }

    #[test]
    fn short_type_strips_namespace() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("shorttype");
        let event = event_with(ErrorInfo::new("a.b.X", "boom"));
        assert_eq!(renderer.render_to_string(&event), "X");
    }

    #[test]
    fn empty_format_renders_nothing_even_with_error() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("");
        let event = event_with(ErrorInfo::new("X", "boom"));
        let mut buf = String::from("keep");
        renderer.render(&mut buf, &event);
        assert_eq!(buf, "keep");
    }

    #[test]
    fn no_error_renders_nothing() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("type,message,stacktrace");
        renderer.set_separator(" | ");
        let event = LogEvent::new(Level::Info, "app", "fine");
        let mut buf = String::from("line:");
        renderer.render(&mut buf, &event);
        assert_eq!(buf, "line:");
    }

    #[test]
    fn render_appends_without_clearing() {
        let renderer = ExceptionRenderer::new();
        let event = event_with(ErrorInfo::new("X", "boom"));
        let mut buf = String::from("error=");
        renderer.render(&mut buf, &event);
        assert_eq!(buf, "error=boom");
    }

    #[test]
    fn separator_inserted_even_for_empty_directive_output() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("message,stacktrace,type");
        renderer.set_separator("|");
        let event = event_with(ErrorInfo::new("X", "boom"));
        assert_eq!(renderer.render_to_string(&event), "boom||X");
    }

    #[test]
    fn unknown_directive_is_skipped_with_warning() {
        let (mut renderer, sink) = renderer_with_sink();
        let compiled = renderer.set_format("type, mesage, message").clone();
        assert_eq!(compiled.len(), 2);
        assert_eq!(sink.count(DiagnosticLevel::Warn), 1);

        let event = event_with(ErrorInfo::new("X", "boom"));
        assert_eq!(renderer.render_to_string(&event), "X boom");
    }

    #[test]
    fn set_format_replaces_previous_compilation() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("type,message");
        renderer.set_format("stacktrace");
        assert_eq!(renderer.compiled().directives(), &[Directive::StackTrace]);
    }

    #[test]
    fn full_text_and_stack_trace() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("fulltext");
        let error = ErrorInfo::new("app.Outer", "outer")
            .with_cause(ErrorInfo::new("app.Inner", "inner"))
            .with_stack_trace("   at app.Outer.Run()");
        let event = event_with(error);
        assert_eq!(
            renderer.render_to_string(&event),
            "app.Outer: outer ---> app.Inner: inner\n   at app.Outer.Run()"
        );

        renderer.set_format("stacktrace");
        assert_eq!(renderer.render_to_string(&event), "   at app.Outer.Run()");
    }

    #[test]
    fn method_from_stack_trace_fallback() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("method");
        let error = ErrorInfo::new("X", "boom")
            .with_stack_trace("   at App.Worker.Run(Int32 id)\n   at App.Main()");
        assert_eq!(
            renderer.render_to_string(&event_with(error)),
            "App.Worker.Run(Int32 id)"
        );
    }

    #[test]
    fn inner_errors_rendered_up_to_max_level() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_format("shorttype,message");
        renderer.set_inner_format("message");
        renderer.set_inner_separator(" <- ");
        renderer.set_max_inner_level(2);

        let error = ErrorInfo::new("a.Outer", "outer").with_cause(
            ErrorInfo::new("a.Mid", "mid")
                .with_cause(ErrorInfo::new("a.Root", "root").with_cause(ErrorInfo::new("a.Deep", "deep"))),
        );
        assert_eq!(
            renderer.render_to_string(&event_with(error)),
            "Outer outer <- mid <- root"
        );
    }

    #[test]
    fn inner_rendering_stops_at_end_of_chain() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_max_inner_level(5);
        let error = ErrorInfo::new("X", "outer").with_cause(ErrorInfo::new("Y", "inner"));
        assert_eq!(renderer.render_to_string(&event_with(error)), "outer\ninner");
    }

    #[test]
    fn panicking_accessor_is_contained() {
        let (mut renderer, sink) = renderer_with_sink();
        renderer.set_format("message,type,message");
        renderer.set_max_inner_level(1);

        let event = LogEvent::new(Level::Error, "app", "failed").with_error(PanickingError);
        let mut buf = String::from(">");
        renderer.render(&mut buf, &event);

        assert_eq!(buf, ">stable message  stable message");
        let warnings = sink.entries();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].1.contains("type"));
        assert!(warnings[1].1.contains("cause"));
    }

    #[test]
    fn estimate_size_is_constant() {
        let renderer = ExceptionRenderer::new();
        let empty = LogEvent::new(Level::Info, "", "");
        assert_eq!(renderer.estimate_size(&empty), EXCEPTION_SIZE_ESTIMATE);
    }

    #[test]
    fn set_property_is_case_insensitive() {
        let mut renderer = ExceptionRenderer::new();
        renderer.set_property("Format", "type").unwrap();
        renderer.set_property("SEPARATOR", "/").unwrap();
        renderer.set_property("Max_Inner_Level", "3").unwrap();
        renderer.set_property("innerFormat", "shorttype").unwrap();
        renderer.set_property("inner-separator", ";").unwrap();

        assert_eq!(renderer.format(), "type");
        assert_eq!(renderer.separator(), "/");
        assert_eq!(renderer.max_inner_level(), 3);
        assert_eq!(renderer.inner_format(), "shorttype");
        assert_eq!(renderer.inner_separator(), ";");
    }

    #[test]
    fn set_property_rejects_unknown_and_invalid() {
        let mut renderer = ExceptionRenderer::new();
        let err = renderer.set_property("colour", "red").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProperty { .. }));

        let err = renderer.set_property("max_inner_level", "-1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(renderer.max_inner_level(), 0);
    }

    #[test]
    fn keyword_is_exception() {
        assert_eq!(ExceptionRenderer::new().keyword(), "exception");
    }
}

//! 첨부 에러 모델 — 로그 이벤트에 붙는 에러 정보
//!
//! [`AttachedError`]는 렌더러가 읽는 에러 접근자 인터페이스이고,
//! [`ErrorInfo`]는 이를 구현하는 기본 데이터 구조입니다.
//!
//! # 사용 예시
//! ```
//! use logweave_core::exception::{AttachedError, ErrorInfo};
//!
//! let err = ErrorInfo::new("app.db.ConnectionError", "connection refused")
//!     .with_cause(ErrorInfo::new("std::io::Error", "os error 111"));
//! assert_eq!(err.short_type_name(), "ConnectionError");
//! assert!(err.full_text().contains(" ---> std::io::Error: os error 111"));
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

use serde::{Deserialize, Serialize};

/// 로그 이벤트에 첨부된 에러의 읽기 전용 뷰
///
/// 렌더러는 이 trait을 통해서만 에러 내부에 접근합니다.
/// 구현체의 접근자가 패닉하더라도 렌더러 경계에서 격리됩니다.
pub trait AttachedError: fmt::Debug + Send + Sync {
    /// 사람이 읽을 수 있는 에러 메시지
    fn message(&self) -> &str;

    /// 완전한 타입 이름 (예: `app::db::ConnectionError`, `a.b.X`)
    fn type_name(&self) -> &str;

    /// 네임스페이스를 제외한 타입 이름
    fn short_type_name(&self) -> &str {
        short_type_name(self.type_name())
    }

    /// 스택 트레이스 텍스트 (있을 경우)
    fn stack_trace(&self) -> Option<&str> {
        None
    }

    /// 에러가 발생한 메서드 서술자 (있을 경우)
    fn method(&self) -> Option<&str> {
        None
    }

    /// 원인 에러 (있을 경우)
    fn cause(&self) -> Option<&dyn AttachedError> {
        None
    }

    /// 타입, 메시지, 원인 체인, 스택 트레이스를 모두 포함한 전체 텍스트
    ///
    /// 형식: `{type}: {message} ---> {cause full text}` 뒤에 스택 트레이스가
    /// 있으면 줄바꿈 후 덧붙입니다.
    fn full_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.type_name());
        out.push_str(": ");
        out.push_str(self.message());
        if let Some(cause) = self.cause() {
            out.push_str(" ---> ");
            out.push_str(&cause.full_text());
        }
        if let Some(trace) = self.stack_trace().filter(|t| !t.is_empty()) {
            out.push('\n');
            out.push_str(trace);
        }
        out
    }
}

/// 완전한 타입 이름에서 네임스페이스를 제거합니다.
///
/// 제네릭 인자(`<` 이후)는 무시하고, 마지막 `::` 또는 `.` 뒤의 구간을 반환합니다.
pub fn short_type_name(full: &str) -> &str {
    let head = match full.find('<') {
        Some(pos) => &full[..pos],
        None => full,
    };
    let after_path = head.rfind("::").map(|i| i + 2);
    let after_dot = head.rfind('.').map(|i| i + 1);
    let start = after_path.max(after_dot).unwrap_or(0);
    &head[start..]
}

/// 기본 첨부 에러 구현
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// 완전한 타입 이름
    pub type_name: String,
    /// 에러 메시지
    pub message: String,
    /// 스택 트레이스 텍스트
    pub stack_trace: Option<String>,
    /// 발생 메서드 서술자
    pub method: Option<String>,
    /// 원인 에러
    pub cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    /// 타입 이름과 메시지로 새 에러 정보를 생성합니다.
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// `std::error::Error` 값에서 에러 정보를 추출합니다.
    ///
    /// 최상위 타입 이름은 `std::any::type_name`으로 얻습니다.
    /// `source()` 체인은 원인 에러로 변환되며, 이때 타입 이름은
    /// `Debug` 표현의 선두 식별자에서 추정합니다.
    pub fn capture<E>(err: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self {
            type_name: std::any::type_name::<E>().to_owned(),
            message: err.to_string(),
            stack_trace: None,
            method: None,
            cause: err.source().map(|s| Box::new(Self::from_source(s))),
        }
    }

    fn from_source(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            type_name: debug_type_hint(err),
            message: err.to_string(),
            stack_trace: None,
            method: None,
            cause: err.source().map(|s| Box::new(Self::from_source(s))),
        }
    }

    /// 스택 트레이스를 설정합니다.
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }

    /// 캡처된 백트레이스를 스택 트레이스로 설정합니다.
    ///
    /// 백트레이스가 비활성화되어 있으면 (`RUST_BACKTRACE` 미설정 등) 변경하지 않습니다.
    pub fn with_backtrace(mut self, backtrace: &Backtrace) -> Self {
        if backtrace.status() == BacktraceStatus::Captured {
            self.stack_trace = Some(backtrace.to_string());
        }
        self
    }

    /// 발생 메서드 서술자를 설정합니다.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// 원인 에러를 설정합니다.
    pub fn with_cause(mut self, cause: ErrorInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl AttachedError for ErrorInfo {
    fn message(&self) -> &str {
        &self.message
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    fn cause(&self) -> Option<&dyn AttachedError> {
        self.cause.as_deref().map(|c| c as &dyn AttachedError)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

/// `Debug` 출력의 선두 식별자 (예: `Custom { kind: .. }` → `Custom`)
fn debug_type_hint(err: &(dyn std::error::Error + 'static)) -> String {
    let debug = format!("{err:?}");
    let hint: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if hint.is_empty() {
        "error".to_owned()
    } else {
        hint
    }
}

//! 로그 이벤트 — 렌더러 입력의 기본 단위
//!
//! [`LogEvent`]는 렌더링 동안 변경되지 않는 읽기 전용 입력입니다.
//! 렌더러는 `&LogEvent`만 받으므로 렌더링 중 이벤트가 바뀔 수 없습니다.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::exception::AttachedError;

/// 로그 레벨
///
/// `Ord` 구현으로 레벨 비교가 가능합니다 (`Trace < Debug < Info < Warn < Error < Fatal`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Level {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// 문자열에서 레벨을 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" | "information" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "fatal" | "critical" => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "Trace"),
            Self::Debug => write!(f, "Debug"),
            Self::Info => write!(f, "Info"),
            Self::Warn => write!(f, "Warn"),
            Self::Error => write!(f, "Error"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// 로그 이벤트
///
/// 메시지, 타임스탬프, 첨부 에러, 스레드/컨텍스트 정보를 담습니다.
/// 첨부 에러는 `Arc`로 공유되므로 이벤트 복제 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// 이벤트 발생 시각
    pub timestamp: SystemTime,
    /// 로그 레벨
    pub level: Level,
    /// 로거 이름
    pub logger: String,
    /// 로그 메시지
    pub message: String,
    /// 첨부 에러
    pub error: Option<Arc<dyn AttachedError>>,
    /// 스레드 이름 (있을 경우)
    pub thread: Option<String>,
    /// 추가 컨텍스트 필드 (key-value 쌍)
    pub fields: Vec<(String, String)>,
}

impl LogEvent {
    /// 현재 시각으로 새 이벤트를 생성합니다.
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            logger: logger.into(),
            message: message.into(),
            error: None,
            thread: std::thread::current().name().map(str::to_owned),
            fields: Vec::new(),
        }
    }

    /// 에러를 첨부합니다.
    pub fn with_error(mut self, error: impl AttachedError + 'static) -> Self {
        self.error = Some(Arc::new(error));
        self
    }

    /// 컨텍스트 필드를 추가합니다.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// 첨부 에러에 대한 참조
    pub fn error(&self) -> Option<&dyn AttachedError> {
        self.error.as_deref()
    }

    /// 이름으로 컨텍스트 필드를 조회합니다.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.logger, self.message)
    }
}

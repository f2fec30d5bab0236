//! 내부 진단 싱크 — 설정/렌더링 경고 보고 경로
//!
//! 렌더러와 지시자 컴파일러는 로깅 서브시스템에 직접 의존하지 않고
//! 주입된 [`DiagnosticSink`]로 경고를 보냅니다. 기본 구현인 [`TracingSink`]는
//! `tracing`으로 전달하고, [`MemorySink`]는 테스트와 설정 검사에서 메시지를 모읍니다.
//!
//! 진단 기록 실패는 에러가 아닙니다. 싱크 구현은 패닉하지 않아야 합니다.

use std::fmt;
use std::sync::{Arc, Mutex};

/// 진단 메시지 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 진단 메시지를 받는 싱크
pub trait DiagnosticSink: fmt::Debug + Send + Sync {
    /// 진단 메시지를 기록합니다.
    fn log(&self, level: DiagnosticLevel, args: fmt::Arguments<'_>);

    /// 경고 수준 메시지를 기록합니다.
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(DiagnosticLevel::Warn, args);
    }
}

/// 공유 가능한 싱크 핸들
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// `tracing`으로 진단 메시지를 전달하는 기본 싱크
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// 공유 핸들로 감싼 기본 싱크를 반환합니다.
    pub fn shared() -> SharedSink {
        Arc::new(Self)
    }
}

impl DiagnosticSink for TracingSink {
    fn log(&self, level: DiagnosticLevel, args: fmt::Arguments<'_>) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!(target: "logweave::internal", "{}", args),
            DiagnosticLevel::Info => tracing::info!(target: "logweave::internal", "{}", args),
            DiagnosticLevel::Warn => tracing::warn!(target: "logweave::internal", "{}", args),
            DiagnosticLevel::Error => tracing::error!(target: "logweave::internal", "{}", args),
        }
    }
}

/// 진단 메시지를 메모리에 모으는 싱크
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(DiagnosticLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 기록된 메시지의 복사본을 반환합니다.
    pub fn entries(&self) -> Vec<(DiagnosticLevel, String)> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 지정 수준으로 기록된 메시지 수
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries().iter().filter(|(l, _)| *l == level).count()
    }

    /// 기록된 메시지를 모두 꺼내고 비웁니다.
    pub fn drain(&self) -> Vec<(DiagnosticLevel, String)> {
        match self.entries.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&self, level: DiagnosticLevel, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        match self.entries.lock() {
            Ok(mut guard) => guard.push((level, message)),
            Err(poisoned) => poisoned.into_inner().push((level, message)),
        }
    }
}

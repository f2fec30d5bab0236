#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod exception;
pub mod metrics;
pub mod renderer;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LogweaveError, RenderError};

// 설정
pub use config::{GeneralConfig, LogweaveConfig, RendererConfig};

// 이벤트
pub use event::{Level, LogEvent};
pub use exception::{AttachedError, ErrorInfo};

// 진단
pub use diagnostics::{DiagnosticLevel, DiagnosticSink, MemorySink, SharedSink, TracingSink};

// 렌더러 trait
pub use renderer::{ConfigurableRenderer, Renderer};

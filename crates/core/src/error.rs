//! 에러 타입 — 도메인별 에러 정의
//!
//! 렌더링 경로(`Renderer::render`)는 에러를 반환하지 않습니다.
//! 여기 정의된 타입은 설정 로딩, 렌더러 구성, 진단 메시지에서 사용됩니다.

/// logweave 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogweaveError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 렌더링 결함
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 등록되지 않은 렌더러 키워드
    #[error("unknown renderer: '{0}'")]
    UnknownRenderer(String),

    /// 렌더러가 지원하지 않는 속성
    #[error("renderer '{renderer}' has no property '{property}'")]
    UnknownProperty { renderer: String, property: String },
}

/// 렌더링 결함
///
/// 렌더러 경계 안에서 격리되며 호출자에게 전파되지 않습니다.
/// 진단 싱크로 보고할 때 메시지 형식을 통일하기 위해 사용합니다.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// 지시자 추출 중 결함 발생
    #[error("directive '{directive}' failed: {reason}")]
    Fault { directive: String, reason: String },
}

//! 설정 관리 — logweave.toml 파싱 및 런타임 설정
//!
//! [`LogweaveConfig`]는 일반 설정과 렌더러 목록을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`LOGWEAVE_GENERAL_LOG_LEVEL=debug` 형식)
//! 2. 설정 파일 (`logweave.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 설정 예시
//! ```toml
//! [general]
//! log_level = "info"
//! log_format = "pretty"
//!
//! [[renderers]]
//! kind = "exception"
//! format = "type, message, method"
//! separator = " | "
//! max_inner_level = 2
//!
//! [[renderers]]
//! kind = "processid"
//! ```
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logweave_core::error::LogweaveError> {
//! use logweave_core::config::LogweaveConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogweaveConfig::load("logweave.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogweaveConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogweaveError};

/// logweave 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogweaveConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 렌더러 설정 목록 (선언 순서 유지)
    #[serde(default)]
    pub renderers: Vec<RendererConfig>,
}

impl LogweaveConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 검증은 오버라이드 적용 후 한 번만 수행하므로, 파일의 잘못된 값도
    /// 환경변수로 바로잡을 수 있습니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogweaveError> {
        let mut config = Self::read(path.as_ref()).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogweaveError> {
        let config = Self::read(path.as_ref()).await?;
        config.validate()?;
        Ok(config)
    }

    async fn read(path: &Path) -> Result<Self, LogweaveError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogweaveError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogweaveError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogweaveError> {
        toml::from_str(toml_str).map_err(|e| {
            LogweaveError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGWEAVE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "LOGWEAVE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGWEAVE_GENERAL_LOG_FORMAT");
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 렌더러 속성 값은 여기서 검증하지 않습니다. 속성은 렌더러를
    /// 구성할 때 각 렌더러가 직접 해석합니다.
    pub fn validate(&self) -> Result<(), LogweaveError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        for (index, renderer) in self.renderers.iter().enumerate() {
            if renderer.kind.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("renderers[{index}].kind"),
                    reason: "renderer kind must not be empty".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 렌더러 하나의 설정
///
/// `kind` 외의 모든 키는 렌더러 속성으로 취급됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RendererConfig {
    /// 렌더러 키워드 (exception, processid 등)
    pub kind: String,
    /// 이름 있는 속성 (키 순서로 적용)
    #[serde(flatten)]
    pub properties: BTreeMap<String, toml::Value>,
}

impl RendererConfig {
    /// 속성 없는 렌더러 설정을 생성합니다.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: BTreeMap::new(),
        }
    }

    /// 문자열 속성을 추가합니다.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .insert(name.into(), toml::Value::String(value.into()));
        self
    }

    /// 속성 값을 문자열로 변환하여 반환합니다.
    ///
    /// 문자열, 정수, 실수, 불리언만 허용합니다. 배열이나 테이블 값은 에러입니다.
    pub fn string_properties(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.properties
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        return Err(ConfigError::InvalidValue {
                            field: format!("{}.{}", self.kind, name),
                            reason: format!("unsupported value type '{}'", other.type_str()),
                        });
                    }
                };
                Ok((name.clone(), text))
            })
            .collect()
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if val.trim().is_empty() {
            warn!(env_key, "empty value in env var, ignoring");
            return;
        }
        *target = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = LogweaveConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "json");
        assert!(config.renderers.is_empty());
    }

    #[test]
    fn default_config_passes_validation() {
        LogweaveConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = LogweaveConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert!(config.renderers.is_empty());
    }

    #[test]
    fn renderer_properties_are_flattened() {
        let toml = r#"
[[renderers]]
kind = "exception"
format = "type, message"
separator = " | "
max_inner_level = 2

[[renderers]]
kind = "processid"
"#;
        let config = LogweaveConfig::parse(toml).unwrap();
        assert_eq!(config.renderers.len(), 2);

        let exception = &config.renderers[0];
        assert_eq!(exception.kind, "exception");
        let props = exception.string_properties().unwrap();
        assert_eq!(
            props,
            vec![
                ("format".to_owned(), "type, message".to_owned()),
                ("max_inner_level".to_owned(), "2".to_owned()),
                ("separator".to_owned(), " | ".to_owned()),
            ]
        );
        assert!(config.renderers[1].properties.is_empty());
    }

    #[test]
    fn array_property_is_rejected() {
        let toml = r#"
[[renderers]]
kind = "exception"
format = ["type", "message"]
"#;
        let config = LogweaveConfig::parse(toml).unwrap();
        let err = config.renderers[0].string_properties().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("exception.format"));
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = LogweaveConfig::parse("invalid = [[[toml");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            LogweaveError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = LogweaveConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = LogweaveConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_empty_renderer_kind() {
        let mut config = LogweaveConfig::default();
        config.renderers.push(RendererConfig::new("  "));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("renderers[0].kind"));
    }

    #[test]
    #[serial_test::serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_LOGWEAVE_STR", "overridden") };
        override_string(&mut val, "TEST_LOGWEAVE_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_LOGWEAVE_STR") };
    }

    #[test]
    #[serial_test::serial]
    fn env_override_empty_keeps_original() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_LOGWEAVE_EMPTY", "  ") };
        override_string(&mut val, "TEST_LOGWEAVE_EMPTY");
        assert_eq!(val, "original");
        unsafe { std::env::remove_var("TEST_LOGWEAVE_EMPTY") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_LOGWEAVE_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let mut config = LogweaveConfig::default();
        config
            .renderers
            .push(RendererConfig::new("exception").with_property("format", "type"));
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = LogweaveConfig::parse(&toml_str).unwrap();
        assert_eq!(parsed.renderers.len(), 1);
        assert_eq!(
            parsed.renderers[0].properties.get("format"),
            Some(&toml::Value::String("type".to_owned()))
        );
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let result = LogweaveConfig::from_file("/nonexistent/path/logweave.toml").await;
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            LogweaveError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}

//! 렌더러 레지스트리 — 설정 키워드와 렌더러 타입의 연결
//!
//! 외부 설정 파서는 `kind = "exception"` 같은 키워드로 렌더러를 고릅니다.
//! [`RendererRegistry`]는 키워드를 생성자에 연결하고, [`RendererConfig`]의
//! 속성을 이름으로 적용하여 구성된 렌더러를 만듭니다.
//!
//! # 사용 예시
//! ```
//! use logweave_core::config::RendererConfig;
//! use logweave_renderers::RendererRegistry;
//!
//! let registry = RendererRegistry::with_defaults();
//! let config = RendererConfig::new("exception").with_property("Format", "type, message");
//! let renderer = registry.build(&config)?;
//! assert_eq!(renderer.keyword(), "exception");
//! # Ok::<(), logweave_core::error::ConfigError>(())
//! ```

use logweave_core::config::{LogweaveConfig, RendererConfig};
use logweave_core::diagnostics::{SharedSink, TracingSink};
use logweave_core::error::ConfigError;
use logweave_core::renderer::ConfigurableRenderer;
use tracing::debug;

use crate::exception::ExceptionRenderer;
use crate::process_id::ProcessIdRenderer;

/// 등록 키워드를 선언하는 렌더러 타입
///
/// 구현 타입은 문서화된 기본값으로 생성 가능해야 합니다.
pub trait RegisteredRenderer: ConfigurableRenderer + Sized + 'static {
    /// 설정 키워드 (예: `"exception"`)
    const KEYWORD: &'static str;

    /// 기본값으로 렌더러를 생성합니다.
    fn create(sink: SharedSink) -> Self;
}

/// 렌더러 생성 함수
pub type RendererFactory = fn(SharedSink) -> Box<dyn ConfigurableRenderer>;

fn factory<T: RegisteredRenderer>(sink: SharedSink) -> Box<dyn ConfigurableRenderer> {
    Box::new(T::create(sink))
}

/// 키워드 → 렌더러 생성자 레지스트리
///
/// 키워드 조회는 대소문자를 구분하지 않습니다. 생성된 렌더러는 모두
/// 레지스트리의 진단 싱크를 공유합니다.
pub struct RendererRegistry {
    /// 등록된 (키워드, 생성자) 목록 (등록 순서 유지)
    factories: Vec<(&'static str, RendererFactory)>,
    sink: SharedSink,
}

impl RendererRegistry {
    /// `tracing` 진단 싱크를 쓰는 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            sink: TracingSink::shared(),
        }
    }

    /// 기본 렌더러 (`exception`, `processid`)가 등록된 레지스트리를 생성합니다.
    pub fn with_defaults() -> Self {
        Self::new()
            .register_type::<ExceptionRenderer>()
            .register_type::<ProcessIdRenderer>()
    }

    /// 생성되는 렌더러가 사용할 진단 싱크를 설정합니다.
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// 키워드에 생성자를 등록합니다. 같은 키워드가 있으면 대체합니다.
    pub fn register(mut self, keyword: &'static str, factory: RendererFactory) -> Self {
        if let Some(slot) = self
            .factories
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
        {
            debug!(keyword, "replacing registered renderer");
            slot.1 = factory;
        } else {
            self.factories.push((keyword, factory));
        }
        self
    }

    /// 렌더러 타입을 선언된 키워드로 등록합니다.
    pub fn register_type<T: RegisteredRenderer>(self) -> Self {
        self.register(T::KEYWORD, factory::<T>)
    }

    /// 등록된 키워드 목록
    pub fn keywords(&self) -> Vec<&'static str> {
        self.factories.iter().map(|(k, _)| *k).collect()
    }

    /// 키워드로 기본값 렌더러를 생성합니다.
    pub fn create(&self, keyword: &str) -> Result<Box<dyn ConfigurableRenderer>, ConfigError> {
        let keyword = keyword.trim();
        self.factories
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
            .map(|(_, f)| f(self.sink.clone()))
            .ok_or_else(|| ConfigError::UnknownRenderer(keyword.to_owned()))
    }

    /// 설정으로 렌더러를 생성하고 속성을 키 순서대로 적용합니다.
    pub fn build(
        &self,
        config: &RendererConfig,
    ) -> Result<Box<dyn ConfigurableRenderer>, ConfigError> {
        let mut renderer = self.create(&config.kind)?;
        for (name, value) in config.string_properties()? {
            renderer.set_property(&name, &value)?;
        }
        debug!(kind = %config.kind, "renderer configured");
        Ok(renderer)
    }

    /// 설정의 모든 렌더러를 선언 순서대로 생성합니다.
    ///
    /// 하나라도 실패하면 첫 에러를 반환합니다.
    pub fn build_all(
        &self,
        config: &LogweaveConfig,
    ) -> Result<Vec<Box<dyn ConfigurableRenderer>>, ConfigError> {
        config.renderers.iter().map(|r| self.build(r)).collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

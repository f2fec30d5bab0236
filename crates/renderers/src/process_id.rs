//! 프로세스 ID 렌더러
//!
//! 현재 프로세스 ID를 10진수로 렌더링합니다. 값이 프로세스 수명 동안
//! 바뀌지 않으므로 `is_precomputable()`이 `true`입니다. 외부 레이아웃 컴파일러는
//! 한 번 계산한 값을 리터럴로 대체할 수 있습니다.

use logweave_core::diagnostics::SharedSink;
use logweave_core::error::ConfigError;
use logweave_core::event::LogEvent;
use logweave_core::renderer::{ConfigurableRenderer, Renderer, unknown_property};

use crate::registry::RegisteredRenderer;

/// 렌더링 결과 크기 추정값 (10진 프로세스 ID의 최대 길이보다 큼)
pub const PROCESS_ID_SIZE_ESTIMATE: usize = 32;

/// 프로세스 ID 렌더러
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIdRenderer;

impl ProcessIdRenderer {
    /// 등록 키워드
    pub const KEYWORD: &'static str = "processid";

    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ProcessIdRenderer {
    fn estimate_size(&self, _event: &LogEvent) -> usize {
        PROCESS_ID_SIZE_ESTIMATE
    }

    fn render(&self, buf: &mut String, _event: &LogEvent) {
        // u32의 Display는 로케일과 무관한 10진 표기
        buf.push_str(&std::process::id().to_string());
    }

    fn is_volatile(&self) -> bool {
        false
    }

    fn is_precomputable(&self) -> bool {
        true
    }
}

impl ConfigurableRenderer for ProcessIdRenderer {
    fn keyword(&self) -> &'static str {
        Self::KEYWORD
    }

    fn set_property(&mut self, name: &str, _value: &str) -> Result<(), ConfigError> {
        Err(unknown_property(Self::KEYWORD, name))
    }
}

impl RegisteredRenderer for ProcessIdRenderer {
    const KEYWORD: &'static str = ProcessIdRenderer::KEYWORD;

    fn create(_sink: SharedSink) -> Self {
        Self
    }
}

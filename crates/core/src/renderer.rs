//! 렌더러 trait — 로그 이벤트를 텍스트 조각으로 바꾸는 확장 포인트
//!
//! 모든 렌더러는 [`Renderer`]의 네 가지 능력
//! (`estimate_size`, `render`, `is_volatile`, `is_precomputable`)을 제공합니다.
//! 설정 파서가 이름으로 생성/구성하는 렌더러는 [`ConfigurableRenderer`]도 구현합니다.
//!
//! # 구현 예시
//! ```
//! use logweave_core::event::{Level, LogEvent};
//! use logweave_core::renderer::Renderer;
//!
//! struct LevelRenderer;
//!
//! impl Renderer for LevelRenderer {
//!     fn estimate_size(&self, _event: &LogEvent) -> usize { 5 }
//!     fn render(&self, buf: &mut String, event: &LogEvent) {
//!         buf.push_str(&event.level.to_string());
//!     }
//!     fn is_volatile(&self) -> bool { false }
//! }
//!
//! let event = LogEvent::new(Level::Warn, "app", "disk almost full");
//! assert_eq!(LevelRenderer.render_to_string(&event), "Warn");
//! ```

use crate::error::ConfigError;
use crate::event::LogEvent;

/// 로그 이벤트 렌더러
///
/// `render`는 `&self`만 받으므로, 호출마다 별도 버퍼와 이벤트가 주어지면
/// 같은 인스턴스를 여러 스레드에서 동시에 호출할 수 있습니다.
pub trait Renderer: Send + Sync {
    /// 이 이벤트에 대해 생성할 문자 수의 대략적인 상한
    ///
    /// 호출자가 버퍼를 미리 확보하는 데 사용합니다. 값이 작으면
    /// 재할당 비용만 생길 뿐 결과는 달라지지 않습니다.
    fn estimate_size(&self, event: &LogEvent) -> usize;

    /// 렌더링 결과를 `buf` 뒤에 덧붙입니다.
    ///
    /// 기존 내용을 지우거나 바꾸지 않습니다. 에러를 반환하지 않으며,
    /// 내부 결함은 렌더러 안에서 처리됩니다.
    fn render(&self, buf: &mut String, event: &LogEvent);

    /// 같은 설정에서도 이벤트마다 결과가 달라질 수 있으면 `true`
    ///
    /// `false`면 결과가 이벤트 자체만으로 결정되어 호출자가 캐시할 수 있습니다.
    fn is_volatile(&self) -> bool;

    /// 결과가 프로세스 수명 동안 상수여서 한 번 계산한 값을 리터럴로
    /// 재사용해도 되면 `true`
    fn is_precomputable(&self) -> bool {
        false
    }

    /// `estimate_size`로 크기를 잡은 새 버퍼에 렌더링합니다.
    fn render_to_string(&self, event: &LogEvent) -> String {
        let mut buf = String::with_capacity(self.estimate_size(event));
        self.render(&mut buf, event);
        buf
    }
}

/// 설정 키워드와 이름 있는 속성으로 구성되는 렌더러
///
/// 외부 설정 파서는 [`keyword`](Self::keyword)로 렌더러 종류를 식별하고,
/// [`set_property`](Self::set_property)로 `Format`, `Separator` 같은 속성을 적용합니다.
/// 속성 이름은 대소문자를 구분하지 않습니다.
pub trait ConfigurableRenderer: Renderer {
    /// 등록 키워드 (예: `"exception"`, `"processid"`)
    fn keyword(&self) -> &'static str;

    /// 이름 있는 속성을 설정합니다.
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), ConfigError>;
}

/// 렌더러가 지원하지 않는 속성에 대한 에러를 만듭니다.
pub fn unknown_property(renderer: &str, property: &str) -> ConfigError {
    ConfigError::UnknownProperty {
        renderer: renderer.to_owned(),
        property: property.to_owned(),
    }
}

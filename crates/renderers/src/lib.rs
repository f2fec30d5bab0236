#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`directive`]: 형식 문자열 → 지시자 순서열 컴파일러
//! - [`exception`]: 첨부 에러 렌더러
//! - [`process_id`]: 프로세스 ID 렌더러
//! - [`registry`]: 키워드 기반 렌더러 생성 및 속성 적용
//!
//! # 데이터 흐름
//!
//! ```text
//! format 문자열 -> CompiledFormat -> ExceptionRenderer::render(event) -> 텍스트 조각
//!                    |                         |
//!             알 수 없는 지시자 경고      지시자별 결함 격리
//! ```

pub mod directive;
pub mod exception;
pub mod process_id;
pub mod registry;

// --- 주요 타입 re-export ---

pub use directive::{CompiledFormat, Directive};
pub use exception::ExceptionRenderer;
pub use process_id::ProcessIdRenderer;
pub use registry::{RegisteredRenderer, RendererFactory, RendererRegistry};

//! 메트릭 상수
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 렌더러는 이 상수로 `metrics::counter!()` 매크로를 호출합니다.
//! 라이브러리는 익스포터를 설치하지 않으며, 설치되지 않은 경우 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logweave_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logweave_core::metrics::UNKNOWN_DIRECTIVES_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 렌더러 키워드 레이블 키 (exception, processid)
pub const LABEL_RENDERER: &str = "renderer";

/// 지시자 레이블 키 (message, type, method ...)
pub const LABEL_DIRECTIVE: &str = "directive";

// ─── 렌더러 메트릭 ─────────────────────────────────────────────────

/// 형식 문자열 컴파일 중 무시된 알 수 없는 지시자 수 (counter)
pub const UNKNOWN_DIRECTIVES_TOTAL: &str = "logweave_unknown_directives_total";

/// 렌더러 경계에서 격리된 렌더링 결함 수 (counter, label: renderer, directive)
pub const RENDER_FAULTS_TOTAL: &str = "logweave_render_faults_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_prefix() {
        for name in [UNKNOWN_DIRECTIVES_TOTAL, RENDER_FAULTS_TOTAL] {
            assert!(name.starts_with("logweave_"));
            assert!(name.ends_with("_total"));
        }
    }
}

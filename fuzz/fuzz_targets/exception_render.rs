#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logweave_core::event::{Level, LogEvent};
use logweave_core::exception::ErrorInfo;
use logweave_core::renderer::Renderer;
use logweave_renderers::ExceptionRenderer;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    format: String,
    separator: String,
    inner_format: String,
    max_inner_level: u8,
    /// 바깥쪽부터 (타입, 메시지) 목록
    chain: Vec<(String, String)>,
    stack_trace: Option<String>,
}

fuzz_target!(|input: FuzzInput| {
    let mut renderer = ExceptionRenderer::new();
    renderer.set_format(input.format);
    renderer.set_separator(input.separator);
    renderer.set_inner_format(input.inner_format);
    renderer.set_max_inner_level(usize::from(input.max_inner_level % 8));

    let mut error: Option<ErrorInfo> = None;
    for (type_name, message) in input.chain.into_iter().take(8).rev() {
        let mut info = ErrorInfo::new(type_name, message);
        if let Some(inner) = error.take() {
            info = info.with_cause(inner);
        }
        error = Some(info);
    }

    let mut event = LogEvent::new(Level::Error, "fuzz", "m");
    if let Some(mut error) = error {
        if let Some(trace) = input.stack_trace {
            error = error.with_stack_trace(trace);
        }
        event = event.with_error(error);
    }

    let mut buf = String::from("prefix");
    renderer.render(&mut buf, &event);
    assert!(buf.starts_with("prefix"));
});

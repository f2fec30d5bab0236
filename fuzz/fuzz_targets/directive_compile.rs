#![no_main]

use libfuzzer_sys::fuzz_target;
use logweave_core::diagnostics::MemorySink;
use logweave_renderers::CompiledFormat;
use logweave_renderers::directive::method_from_stack_trace;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // 어떤 형식 문자열도 패닉 없이 컴파일되어야 한다
    let sink = MemorySink::new();
    let compiled = CompiledFormat::compile(text, &sink);
    assert!(compiled.len() <= text.split(',').count());

    let method = method_from_stack_trace(text);
    assert!(method.len() <= text.len());
});

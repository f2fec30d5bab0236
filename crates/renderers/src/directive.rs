//! 지시자 컴파일러 — 형식 문자열을 추출 연산 목록으로 변환
//!
//! 형식 문자열(예: `"type, message, stacktrace"`)은 공백을 모두 제거한 뒤
//! `,`로 나누어 [`Directive`] 순서열인 [`CompiledFormat`]으로 컴파일됩니다.
//!
//! # 지시자 어휘
//!
//! | 이름 | 추출 내용 |
//! |------|-----------|
//! | `message` | 에러 메시지 |
//! | `type` | 완전한 타입 이름 |
//! | `shorttype` | 네임스페이스를 제외한 타입 이름 |
//! | `fulltext` (`tostring`) | 타입, 메시지, 원인 체인, 스택 트레이스 전체 |
//! | `method` | 발생 메서드 서술자 |
//! | `stacktrace` | 스택 트레이스 원문 |
//!
//! 이름은 대소문자를 구분하지 않습니다. 알 수 없는 이름은 경고를 남기고
//! 건너뛰며, 나머지 지시자는 그대로 컴파일됩니다.
//!
//! # 사용 예시
//! ```
//! use logweave_core::diagnostics::MemorySink;
//! use logweave_renderers::directive::{CompiledFormat, Directive};
//!
//! let sink = MemorySink::new();
//! let compiled = CompiledFormat::compile("Type, mesage, Message", &sink);
//! assert_eq!(compiled.directives(), &[Directive::Type, Directive::Message]);
//! assert_eq!(sink.entries().len(), 1);
//! ```

use std::fmt;

use logweave_core::diagnostics::DiagnosticSink;
use logweave_core::exception::AttachedError;
use logweave_core::metrics as m;

/// 첨부 에러에 대한 추출 연산 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// 에러 메시지 원문
    Message,
    /// 완전한 타입 이름
    Type,
    /// 네임스페이스를 제외한 타입 이름
    ShortType,
    /// 에러의 전체 텍스트 표현
    FullText,
    /// 발생 메서드 서술자
    Method,
    /// 스택 트레이스 원문
    StackTrace,
}

impl Directive {
    /// 모든 지시자 (어휘 순서)
    pub const ALL: [Directive; 6] = [
        Self::Message,
        Self::Type,
        Self::ShortType,
        Self::FullText,
        Self::Method,
        Self::StackTrace,
    ];

    /// 정규 이름 (소문자)
    pub fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Type => "type",
            Self::ShortType => "shorttype",
            Self::FullText => "fulltext",
            Self::Method => "method",
            Self::StackTrace => "stacktrace",
        }
    }

    /// 이름에서 지시자를 찾습니다.
    ///
    /// 앞뒤 공백을 무시하고 대소문자를 구분하지 않습니다.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "message" => Some(Self::Message),
            "type" => Some(Self::Type),
            "shorttype" => Some(Self::ShortType),
            "fulltext" | "tostring" => Some(Self::FullText),
            "method" => Some(Self::Method),
            "stacktrace" => Some(Self::StackTrace),
            _ => None,
        }
    }

    /// 지시자에 해당하는 값을 `out` 뒤에 씁니다.
    ///
    /// 값이 없으면 (스택 트레이스가 없는 에러의 `stacktrace` 등) 아무것도 쓰지 않습니다.
    pub fn extract(self, error: &dyn AttachedError, out: &mut String) {
        match self {
            Self::Message => out.push_str(error.message()),
            Self::Type => out.push_str(error.type_name()),
            Self::ShortType => out.push_str(error.short_type_name()),
            Self::FullText => out.push_str(&error.full_text()),
            Self::Method => {
                if let Some(method) = error.method() {
                    out.push_str(method);
                } else if let Some(trace) = error.stack_trace() {
                    out.push_str(method_from_stack_trace(trace));
                }
            }
            Self::StackTrace => {
                if let Some(trace) = error.stack_trace() {
                    out.push_str(trace);
                }
            }
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 컴파일된 형식 — 지시자의 불변 순서열
///
/// 빈 순서열도 유효하며, 이 경우 아무것도 렌더링하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFormat {
    directives: Vec<Directive>,
}

impl CompiledFormat {
    /// 형식 문자열을 컴파일합니다.
    ///
    /// 1. 모든 공백을 제거하고 `,`로 나눕니다. 빈 조각은 버립니다.
    /// 2. 알려진 이름은 입력 순서대로 추가합니다 (중복 허용).
    /// 3. 알 수 없는 이름은 `sink`로 경고 하나를 남기고 건너뜁니다.
    pub fn compile(format: &str, sink: &dyn DiagnosticSink) -> Self {
        let stripped: String = format.chars().filter(|c| !c.is_whitespace()).collect();
        let mut directives = Vec::new();

        for part in stripped.split(',').filter(|p| !p.is_empty()) {
            match Directive::from_name(part) {
                Some(directive) => directives.push(directive),
                None => {
                    metrics::counter!(m::UNKNOWN_DIRECTIVES_TOTAL).increment(1);
                    sink.warn(format_args!(
                        "unknown exception format directive '{part}', ignoring"
                    ));
                }
            }
        }

        Self { directives }
    }

    /// 지시자 목록에서 직접 생성합니다.
    pub fn from_directives(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Directive> + '_ {
        self.directives.iter().copied()
    }
}

/// 스택 트레이스 첫 줄에서 메서드 서술자를 추출합니다 (best-effort).
///
/// 첫 번째 비어 있지 않은 줄에서, 첫 `(` 앞의 마지막 공백 다음부터
/// 그 괄호와 짝이 맞는 `)`까지를 반환합니다. 짝이 맞지 않으면 줄 끝까지입니다.
/// 줄에 `(`가 없으면 마지막 공백 구분 토큰을 반환합니다.
///
/// ```
/// use logweave_renderers::directive::method_from_stack_trace;
///
/// let trace = "   at App.Worker.Run(Int32 id, String name)\n   at App.Main()";
/// assert_eq!(method_from_stack_trace(trace), "App.Worker.Run(Int32 id, String name)");
/// ```
pub fn method_from_stack_trace(trace: &str) -> &str {
    let Some(line) = trace.lines().find(|l| !l.trim().is_empty()) else {
        return "";
    };

    let Some(open) = line.find('(') else {
        return line.split_whitespace().last().unwrap_or("");
    };

    let start = line[..open]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());

    let mut depth = 0usize;
    let mut end = line.len();
    for (i, c) in line[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    end = open + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    &line[start..end]
}

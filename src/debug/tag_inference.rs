//! Call-site tag inference from a captured backtrace.
//!
//! Inference assumes the binary keeps symbol names: frames are read from the
//! rendered [`Backtrace`], the capture machinery, the standard library and
//! this crate are skipped, and the first remaining frame is the caller. A
//! stripped binary leaves no such frame and inference fails with
//! [`TagError::ShallowCallStack`].

use std::{backtrace::Backtrace, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Tag length limit of constrained platform outputs.
pub const MAX_TAG_LENGTH: usize = 23;

static FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+:\s+(\S.*)$").unwrap_or_else(|err| unreachable!("frame pattern: {err}"))
});
static HASH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"::h[0-9a-f]{16}$").unwrap_or_else(|err| unreachable!("hash pattern: {err}"))
});
static CLOSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(::\{\{closure\}\})+").unwrap_or_else(|err| unreachable!("closure pattern: {err}"))
});

/// Frames that never count as the caller.
const SKIPPED_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "__rust",
    "rust_begin_unwind",
    "_start",
    "__libc_start",
];

/// How a sink derives a tag when none was set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagInference {
    /// No inference; records without an explicit tag carry none.
    #[default]
    Disabled,
    /// Derive the tag from the calling code's type or module.
    CallStack,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error(
        "synthetic stack trace didn't have enough elements ({frames} resolved frames, no caller outside the logger): are debug symbols stripped?"
    )]
    ShallowCallStack { frames: usize },
}

/// Infers a tag from the current call stack.
pub fn infer_from_call_stack(max_tag_length: Option<usize>) -> Result<String, TagError> {
    let backtrace = Backtrace::force_capture().to_string();
    let own_crate = own_crate_name();

    let mut frames = 0;
    for symbol in backtrace.lines().filter_map(frame_symbol) {
        frames += 1;
        if is_skipped(symbol, own_crate) {
            continue;
        }
        return Ok(create_stack_element_tag(symbol, max_tag_length));
    }
    Err(TagError::ShallowCallStack { frames })
}

/// Derives a short tag from a demangled frame symbol.
///
/// `app::net::Client::connect::{{closure}}::h0123456789abcdef` becomes `Client`;
/// `<app::net::Client as app::Conn>::send` becomes `Client`; a free function
/// `app::net::connect` becomes `net`. The result is capped to `max_tag_length`
/// chars unless it is `None`.
#[must_use]
pub fn create_stack_element_tag(symbol: &str, max_tag_length: Option<usize>) -> String {
    let symbol = HASH_SUFFIX.replace(symbol, "");
    let symbol = CLOSURE.replace_all(&symbol, "");

    let unit = match symbol.strip_prefix('<') {
        // `<Type as Trait>::method` or `<Type>::method`
        Some(qualified) => {
            let inner = qualified.split(">::").next().unwrap_or(qualified);
            let ty = inner.split(" as ").next().unwrap_or(inner);
            strip_generics(ty).to_owned()
        }
        None => {
            let path = strip_generics(&symbol);
            match path.rsplit_once("::") {
                Some((owner, _function)) => owner.to_owned(),
                None => path.to_owned(),
            }
        }
    };

    let tag = unit.rsplit("::").next().unwrap_or(&unit);
    match max_tag_length {
        Some(max) if tag.chars().count() > max => tag.chars().take(max).collect(),
        _ => tag.to_owned(),
    }
}

fn frame_symbol(line: &str) -> Option<&str> {
    let symbol = FRAME.captures(line)?.get(1)?.as_str().trim_end();
    (symbol != "<unknown>").then_some(symbol)
}

fn is_skipped(symbol: &str, own_crate: &str) -> bool {
    let path = symbol.trim_start_matches('<');
    path.strip_prefix(own_crate)
        .is_some_and(|rest| rest.starts_with("::"))
        || SKIPPED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn own_crate_name() -> &'static str {
    module_path!().split("::").next().unwrap_or(module_path!())
}

/// Drops generic parameters, keeping nested `::` paths intact.
fn strip_generics(path: &str) -> &str {
    path.find('<').map_or(path, |start| &path[..start])
}

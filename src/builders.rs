use std::{
    any::Any,
    backtrace::Backtrace,
    borrow::Cow,
    fmt::Display,
    panic::PanicHookInfo,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};

use crate::{
    attr::{Attr, AttrValue, payload_message},
    config::SL_CONFIG,
    keys::Key,
};

/// Attribute with the error's message, keyed `error`.
///
/// ```rust
/// let err = std::io::Error::other("connection refused");
/// let attr = sl::error(&err);
/// assert_eq!(attr.to_string(), "error=connection refused");
/// ```
pub fn error<E: Display + ?Sized>(err: &E) -> Attr {
    Attr::new(Key::Error, err.to_string())
}

/// Like [`error`], but an absent error gives no attribute at all.
///
/// ```rust
/// let ok: Result<(), std::io::Error> = Ok(());
/// assert!(sl::maybe_error(ok.as_ref().err()).is_none());
/// ```
pub fn maybe_error<E: Display + ?Sized>(err: Option<&E>) -> Option<Attr> {
    err.map(error)
}

/// Group keyed `panic` with the recovered payload under `value` and the current stack under `stack`.
///
/// The stack is read when this is called, so after `catch_unwind` it shows the recovering frame,
/// not the panicking one. Use [`crate::install_panic_hook`] to log the stack of the panic site.
pub fn panic(recovered: Box<dyn Any + Send>) -> Attr {
    group(
        Key::Panic,
        [
            Attr::new(Key::Value, recovered),
            Attr::new(Key::Stack, capture_stack()),
        ],
    )
}

/// Group keyed `panic` built from inside a panic hook.
pub fn panic_info(info: &PanicHookInfo<'_>) -> Attr {
    let message = payload_message(info.payload()).unwrap_or("Box<dyn Any>");
    let mut attrs = vec![Attr::new(Key::Value, message.to_string())];
    if let Some(location) = info.location() {
        attrs.push(Attr::new(Key::Location, location.to_string()));
    }
    attrs.push(Attr::new(Key::Stack, capture_stack()));
    group(Key::Panic, attrs)
}

/// Name of the subsystem emitting the record.
///
/// ```rust
/// let attr = sl::component("integrations.grpc.SomeService");
/// assert_eq!(attr.value().as_str(), Some("integrations.grpc.SomeService"));
/// ```
pub fn component(component: impl Into<Cow<'static, str>>) -> Attr {
    Attr::new(Key::Component, component.into())
}

pub fn method(method: impl Into<Cow<'static, str>>) -> Attr {
    Attr::new(Key::Method, method.into())
}

/// `component` and `method` grouped under `source`.
pub fn source(
    component: impl Into<Cow<'static, str>>,
    method: impl Into<Cow<'static, str>>,
) -> Attr {
    group(Key::Source, [self::component(component), self::method(method)])
}

pub fn duration(d: Duration) -> Attr {
    Attr::new(Key::Duration, d)
}

/// Time elapsed since `t0`, keyed `duration`.
///
/// ```rust
/// let start = std::time::Instant::now();
/// // ... work ...
/// let attr = sl::since(start);
/// assert!(attr.value().as_duration().is_some());
/// ```
pub fn since(t0: Instant) -> Attr {
    duration(t0.elapsed())
}

/// Time elapsed since a wall-clock timestamp. A timestamp in the future gives zero.
pub fn since_datetime(t0: DateTime<Utc>) -> Attr {
    duration((Utc::now() - t0).to_std().unwrap_or_default())
}

/// Attribute with an arbitrary key.
pub fn field(key: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Attr {
    Attr::new(key, value)
}

/// Bundles attributes under one key.
pub fn group(key: impl Into<Cow<'static, str>>, attrs: impl IntoIterator<Item = Attr>) -> Attr {
    Attr::new(key, attrs.into_iter().collect::<Vec<_>>())
}

fn capture_stack() -> String {
    let stack = truncate_lines(Backtrace::force_capture().to_string(), SL_CONFIG.STACK_MAX_LINES);
    if stack.trim().is_empty() {
        "<stack unavailable>".into()
    } else {
        stack
    }
}

fn truncate_lines(text: String, max_lines: usize) -> String {
    if max_lines == 0 {
        return text;
    }
    match text.match_indices('\n').nth(max_lines - 1) {
        Some((end, _)) => text[..end].to_string(),
        None => text,
    }
}

use std::{borrow::Cow, cell::Cell, fmt, panic, sync::Once};

use log::{Level, Record, kv::Source};

use crate::{
    attr::Attr,
    builders::panic_info,
    kv::{Attrs, Chain},
};

/// Logger with attributes bound to every record it emits.
///
/// ```rust
/// use sl::{Attrs, Logger};
///
/// let logger = Logger::new("app::grpc").with(sl::component("integrations.grpc.SomeService"));
/// logger.info(Attrs::new().with(sl::method("Call")), format_args!("start request"));
/// ```
#[derive(Debug)]
pub struct Logger {
    target: Cow<'static, str>,
    attrs: Attrs,
}

impl Logger {
    pub fn new(target: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target: target.into(),
            attrs: Attrs::new(),
        }
    }

    /// Binds an attribute. `None` is ignored.
    pub fn with(self, attr: impl Into<Option<Attr>>) -> Self {
        Self {
            attrs: self.attrs.with(attr),
            ..self
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn enabled(&self, level: Level) -> bool {
        enabled(level)
    }

    pub fn log(&self, level: Level, attrs: Attrs, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        emit(level, &self.target, None, &Chain(&self.attrs, &attrs), args);
    }

    pub fn error(&self, attrs: Attrs, args: fmt::Arguments<'_>) {
        self.log(Level::Error, attrs, args)
    }

    pub fn warn(&self, attrs: Attrs, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, attrs, args)
    }

    pub fn info(&self, attrs: Attrs, args: fmt::Arguments<'_>) {
        self.log(Level::Info, attrs, args)
    }

    pub fn debug(&self, attrs: Attrs, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, attrs, args)
    }

    pub fn trace(&self, attrs: Attrs, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, attrs, args)
    }
}

/// Call-site location forwarded by the macros.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct Location {
    pub module_path: &'static str,
    pub file: &'static str,
    pub line: u32,
}

#[doc(hidden)]
pub fn emit(
    level: Level,
    target: &str,
    location: Option<Location>,
    kvs: &dyn Source,
    args: fmt::Arguments<'_>,
) {
    log::logger().log(
        &Record::builder()
            .args(args)
            .level(level)
            .target(target)
            .module_path_static(location.map(|l| l.module_path))
            .file_static(location.map(|l| l.file))
            .line(location.map(|l| l.line))
            .key_values(kvs)
            .build(),
    );
}

fn enabled(level: Level) -> bool {
    level <= log::STATIC_MAX_LEVEL && level <= log::max_level()
}

thread_local! {
    static IN_PANIC_HOOK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as logging a panic. Only one guard per thread exists at a time.
struct HookGuard;

impl HookGuard {
    fn enter() -> Option<Self> {
        IN_PANIC_HOOK.with(|flag| (!flag.replace(true)).then_some(HookGuard))
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        IN_PANIC_HOOK.with(|flag| flag.set(false));
    }
}

/// Logs every panic at error level, target `panic`, before the previously installed hook runs.
///
/// The hook runs on the panicking thread before unwinding, so the `stack` field points at the
/// panic site. Installing more than once has no effect.
///
/// A backend that panics while logging the panic record aborts the process, as any panic inside
/// a panic hook does. The hook does not log again for that nested panic.
pub fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if enabled(Level::Error)
                && let Some(_guard) = HookGuard::enter()
            {
                let attrs = Attrs::new().with(panic_info(info));
                emit(Level::Error, "panic", None, &attrs, format_args!("panic"));
            }
            previous(info);
        }));
    });
}

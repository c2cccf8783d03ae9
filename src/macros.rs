/// Emits a record with attributes attached as key-values.
///
/// Each attribute expression is an `Attr` or an `Option<Attr>`; `None` is left out of the record.
///
/// ```rust
/// let result: Result<(), std::io::Error> = Ok(());
/// sl::log!(
///     sl::Level::Info,
///     [sl::component("db"), sl::maybe_error(result.as_ref().err())],
///     "ping done"
/// );
/// sl::log!(target: "app::db", sl::Level::Warn, [sl::method("ping")], "slow ping: {}ms", 120);
/// ```
#[macro_export]
macro_rules! log {
    (target: $target:expr, $lvl:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {{
        let lvl: $crate::Level = $lvl;
        if lvl <= $crate::__private::STATIC_MAX_LEVEL && lvl <= $crate::__private::max_level() {
            $crate::__private::emit(
                lvl,
                $target,
                ::core::option::Option::Some($crate::__private::Location {
                    module_path: ::core::module_path!(),
                    file: ::core::file!(),
                    line: ::core::line!(),
                }),
                &$crate::Attrs::new()$(.with($attr))*,
                ::core::format_args!($($arg)+),
            );
        }
    }};
    ($lvl:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: ::core::module_path!(), $lvl, [$($attr),*], $($arg)+)
    };
}

/// [`log!`] at error level.
///
/// ```rust
/// let err = std::io::Error::other("connection refused");
/// sl::error!([sl::error(&err), sl::component("db")], "cannot connect");
/// ```
#[macro_export]
macro_rules! error {
    (target: $target:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: $target, $crate::Level::Error, [$($attr),*], $($arg)+)
    };
    ([$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!($crate::Level::Error, [$($attr),*], $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: $target, $crate::Level::Warn, [$($attr),*], $($arg)+)
    };
    ([$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, [$($attr),*], $($arg)+)
    };
}

/// [`log!`] at info level.
///
/// ```rust
/// let start = std::time::Instant::now();
/// sl::info!([sl::source("worker", "run"), sl::since(start)], "done");
/// ```
#[macro_export]
macro_rules! info {
    (target: $target:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: $target, $crate::Level::Info, [$($attr),*], $($arg)+)
    };
    ([$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!($crate::Level::Info, [$($attr),*], $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    (target: $target:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: $target, $crate::Level::Debug, [$($attr),*], $($arg)+)
    };
    ([$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, [$($attr),*], $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    (target: $target:expr, [$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!(target: $target, $crate::Level::Trace, [$($attr),*], $($arg)+)
    };
    ([$($attr:expr),* $(,)?], $($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, [$($attr),*], $($arg)+)
    };
}

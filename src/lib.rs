//! # sl
//! Pre-named structured attributes for the [`log`] crate's key-value API.
//!
//! Every constructor returns an [`Attr`] with a fixed key, so call sites never repeat
//! `"error"`, `"component"` or `"duration"` literals.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! sl = "0.1.0"
//! ```
//!
//! ```rust
//! use std::time::Instant;
//!
//! let start = Instant::now();
//! let result: Result<(), std::io::Error> = Err(std::io::Error::other("connection refused"));
//! sl::error!(
//!     [
//!         sl::source("integrations.grpc", "Call"),
//!         sl::maybe_error(result.as_ref().err()),
//!         sl::since(start),
//!     ],
//!     "request failed"
//! );
//! ```
//!
//! ## Bound attributes
//! ```rust
//! use sl::{Attrs, Logger};
//!
//! let logger = Logger::new("app").with(sl::component("billing"));
//! logger.warn(Attrs::new().with(sl::field("retries", 3u32)), format_args!("retrying"));
//! ```
//!
//! ## Panics
//! ```rust
//! fn parse(input: &str) -> u32 {
//!     input.parse().expect("not a number")
//! }
//!
//! // From here on every panic is also logged with its stack.
//! sl::install_panic_hook();
//!
//! let recovered = std::panic::catch_unwind(|| parse("abc")).unwrap_err();
//! let attr = sl::panic(recovered);
//! assert!(attr.get("value").unwrap().value().to_string().starts_with("not a number"));
//! ```
//!
//! ## Configuration
//! `SL_STACK_MAX_LINES` limits the captured stack text of the panic constructors (0 keeps all).

mod attr;
mod builders;
mod config;
mod keys;
mod kv;
mod logger;
mod macros;

pub use attr::{Attr, AttrValue, Payload};
pub use builders::{
    component, duration, error, field, group, maybe_error, method, panic, panic_info, since,
    since_datetime, source,
};
pub use config::{SL_CONFIG, SlConfig};
pub use keys::Key;
pub use kv::Attrs;
pub use log::Level;
pub use logger::{Logger, install_panic_hook};

#[doc(hidden)]
pub mod __private {
    pub use crate::logger::{Location, emit};
    pub use log::{STATIC_MAX_LEVEL, max_level};
}

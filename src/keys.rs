use std::{borrow::Cow, fmt};

/// Keys used by the predefined constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Error,
    Panic,
    Component,
    Method,
    Source,
    Duration,
    /// Recovered value inside a `panic` group.
    Value,
    /// Captured backtrace inside a `panic` group.
    Stack,
    Location,
}

impl Key {
    pub const fn as_str(self) -> &'static str {
        match self {
            Key::Error => "error",
            Key::Panic => "panic",
            Key::Component => "component",
            Key::Method => "method",
            Key::Source => "source",
            Key::Duration => "duration",
            Key::Value => "value",
            Key::Stack => "stack",
            Key::Location => "location",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Key> for Cow<'static, str> {
    fn from(key: Key) -> Self {
        Cow::Borrowed(key.as_str())
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

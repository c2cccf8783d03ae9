use std::{
    any::Any,
    borrow::Cow,
    fmt,
    sync::{Mutex, PoisonError},
    time::Duration,
};

/// A single structured key/value pair attached to a log record.
///
/// Attributes are built once by the constructors in this crate and only read afterwards.
#[derive(Debug)]
pub struct Attr {
    key: Cow<'static, str>,
    value: AttrValue,
}

/// Value carried by an [`Attr`].
#[derive(Debug)]
pub enum AttrValue {
    Str(Cow<'static, str>),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Duration(Duration),
    /// Payload recovered from a panic, kept as-is.
    Payload(Payload),
    /// Attributes nested under one key.
    Group(Vec<Attr>),
}

impl Attr {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    pub fn is_group(&self) -> bool {
        matches!(self.value, AttrValue::Group(_))
    }

    /// Looks up a direct child of a group. Returns `None` for non-group attributes.
    pub fn get(&self, key: &str) -> Option<&Attr> {
        self.value.as_group()?.iter().find(|attr| attr.key() == key)
    }
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            AttrValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Attr]> {
        match self {
            AttrValue::Group(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Copy of a panic payload of concrete type `T`.
    pub fn downcast_payload<T: Any + Clone>(&self) -> Option<T> {
        match self {
            AttrValue::Payload(payload) => payload.downcast(),
            _ => None,
        }
    }
}

/// Recovered panic payload.
///
/// The payload is only `Send`, so it sits behind a lock to keep attributes shareable between
/// threads. The message is read once at construction.
#[derive(Debug)]
pub struct Payload {
    message: Option<String>,
    value: Mutex<Box<dyn Any + Send>>,
}

impl Payload {
    pub fn new(value: Box<dyn Any + Send>) -> Self {
        Self {
            message: payload_message(value.as_ref()).map(String::from),
            value: Mutex::new(value),
        }
    }

    /// Message for `&str` and `String` payloads.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn with<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let value = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        value.downcast_ref::<T>().map(f)
    }

    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.with(T::clone)
    }

    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.value.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Message of a panic payload, for the `&str` and `String` payloads `panic!` produces.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some(*s)
    } else {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::I64(n) => write!(f, "{n}"),
            AttrValue::U64(n) => write!(f, "{n}"),
            AttrValue::F64(n) => write!(f, "{n}"),
            AttrValue::Duration(d) => write!(f, "{d:?}"),
            AttrValue::Payload(payload) => f.write_str(payload.message().unwrap_or("Box<dyn Any>")),
            AttrValue::Group(attrs) => {
                f.write_str("{")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{attr}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl From<&'static str> for AttrValue {
    fn from(value: &'static str) -> Self {
        AttrValue::Str(Cow::Borrowed(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for AttrValue {
    fn from(value: Cow<'static, str>) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_int!(I64: i8, i16, i32, i64);
impl_from_int!(U64: u8, u16, u32, u64);

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::U64(value as u64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::F64(value)
    }
}

impl From<Duration> for AttrValue {
    fn from(value: Duration) -> Self {
        AttrValue::Duration(value)
    }
}

impl From<Box<dyn Any + Send>> for AttrValue {
    fn from(value: Box<dyn Any + Send>) -> Self {
        AttrValue::Payload(Payload::new(value))
    }
}

impl From<Vec<Attr>> for AttrValue {
    fn from(value: Vec<Attr>) -> Self {
        AttrValue::Group(value)
    }
}

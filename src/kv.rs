//! Bridge to the `log` crate's key-value API.
//!
//! Absent attributes never reach a record: [`Attrs::with`] drops `None`, so a missing error leaves
//! no `error` key behind instead of an empty one.

use log::kv::{self, Source, ToValue, Value, VisitSource};

use crate::attr::{Attr, AttrValue};

impl ToValue for AttrValue {
    fn to_value(&self) -> Value<'_> {
        match self {
            AttrValue::Str(s) => Value::from(&**s),
            AttrValue::Bool(b) => Value::from(*b),
            AttrValue::I64(n) => Value::from(*n),
            AttrValue::U64(n) => Value::from(*n),
            AttrValue::F64(n) => Value::from(*n),
            AttrValue::Duration(d) => Value::from_debug(d),
            AttrValue::Payload(_) | AttrValue::Group(_) => Value::from_display(self),
        }
    }
}

impl Source for Attr {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        visitor.visit_pair(kv::Key::from_str(self.key()), self.value().to_value())
    }

    fn get(&self, key: kv::Key<'_>) -> Option<Value<'_>> {
        (key.as_str() == self.key()).then(|| self.value().to_value())
    }

    fn count(&self) -> usize {
        1
    }
}

/// Ordered attributes attached to one record.
#[derive(Debug, Default)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute. `None` leaves the list unchanged.
    pub fn with(mut self, attr: impl Into<Option<Attr>>) -> Self {
        self.push(attr);
        self
    }

    pub fn push(&mut self, attr: impl Into<Option<Attr>>) {
        if let Some(attr) = attr.into() {
            self.0.push(attr);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Attr> {
        self.0.iter().find(|attr| attr.key() == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Source for Attrs {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for attr in &self.0 {
            attr.visit(visitor)?;
        }
        Ok(())
    }

    fn get(&self, key: kv::Key<'_>) -> Option<Value<'_>> {
        Attrs::get(self, key.as_str()).map(|attr| attr.value().to_value())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Attr> for Attrs {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Option<Attr>> for Attrs {
    fn from_iter<I: IntoIterator<Item = Option<Attr>>>(iter: I) -> Self {
        Self(iter.into_iter().flatten().collect())
    }
}

impl IntoIterator for Attrs {
    type Item = Attr;
    type IntoIter = std::vec::IntoIter<Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Bound attributes followed by per-record ones.
pub(crate) struct Chain<'a>(pub &'a Attrs, pub &'a Attrs);

impl Source for Chain<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        self.0.visit(visitor)?;
        self.1.visit(visitor)
    }

    fn count(&self) -> usize {
        self.0.len() + self.1.len()
    }
}

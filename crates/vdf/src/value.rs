//! [`Value`], one node of a VDF tree.

use std::borrow::Cow;

use serde::ser::{Serialize, Serializer};

use crate::binary::{Color, Pointer, UInt64};
use crate::mapping::{entries_eq, Mapping};

/// A VDF node: a scalar or a nested mapping of type `M`.
///
/// The text format only ever produces [`Value::Str`]. The binary format adds
/// typed scalars; [`Pointer`], [`Color`] and [`UInt64`] keep the wire tag a
/// plain integer would otherwise lose.
#[derive(Debug, Clone)]
pub enum Value<M> {
    Str(String),
    Int32(i32),
    Float32(f32),
    Pointer(Pointer),
    Color(Color),
    UInt64(UInt64),
    Map(M),
}

impl<M> Value<M> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&M> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut M> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<M> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Natural textual form of a scalar; `None` for a nested mapping.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        let text = match self {
            Value::Str(s) => Cow::Borrowed(s.as_str()),
            Value::Int32(n) => Cow::Owned(n.to_string()),
            Value::Float32(n) => Cow::Owned(n.to_string()),
            Value::Pointer(p) => Cow::Owned(p.to_string()),
            Value::Color(c) => Cow::Owned(c.to_string()),
            Value::UInt64(n) => Cow::Owned(n.to_string()),
            Value::Map(_) => return None,
        };
        Some(text)
    }
}

/// Values compare structurally, across mapping types. Nested mappings are
/// equal when their entry sequences are equal, order included.
impl<A: Mapping, B: Mapping> PartialEq<Value<B>> for Value<A> {
    fn eq(&self, other: &Value<B>) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => entries_eq(a, b),
            _ => false,
        }
    }
}

impl<M> From<&str> for Value<M> {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl<M> From<String> for Value<M> {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<M> From<i32> for Value<M> {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl<M> From<f32> for Value<M> {
    fn from(n: f32) -> Self {
        Value::Float32(n)
    }
}

impl<M> From<Pointer> for Value<M> {
    fn from(p: Pointer) -> Self {
        Value::Pointer(p)
    }
}

impl<M> From<Color> for Value<M> {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl<M> From<UInt64> for Value<M> {
    fn from(n: UInt64) -> Self {
        Value::UInt64(n)
    }
}

impl<M: Serialize> Serialize for Value<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int32(n) => serializer.serialize_i32(*n),
            Value::Float32(n) => serializer.serialize_f32(*n),
            Value::Pointer(p) => p.serialize(serializer),
            Value::Color(c) => c.serialize(serializer),
            Value::UInt64(n) => n.serialize(serializer),
            Value::Map(m) => m.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dict, VdfDict};

    #[test]
    fn scalar_text() {
        assert_eq!(Value::<Dict>::from("x").to_text().as_deref(), Some("x"));
        assert_eq!(Value::<Dict>::from(-5).to_text().as_deref(), Some("-5"));
        assert_eq!(
            Value::<Dict>::from(UInt64(1234)).to_text().as_deref(),
            Some("1234")
        );
        assert_eq!(Value::Map(Dict::new()).to_text(), None);
    }

    #[test]
    fn typed_scalars_are_distinct() {
        let plain: Value<Dict> = Value::Int32(1234);
        let pointer: Value<Dict> = Value::Pointer(Pointer(1234));
        assert_ne!(plain, pointer);
        assert_eq!(pointer, Value::<VdfDict>::Pointer(Pointer(1234)));
    }
}

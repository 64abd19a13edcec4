//! Contains the different types of values understood by XML-RPC.

use crate::binary::Binary;
use crate::error::Result;
use crate::ser;

use iso8601::DateTime;

use std::collections::BTreeMap;

/// The possible XML-RPC values.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `<i4>` or `<int>`, 32-bit signed integer.
    Int(i32),
    /// `<boolean>`, 0 == `false`, 1 == `true`.
    Bool(bool),
    /// `<string>`
    String(String),
    /// `<double>`
    ///
    /// Whole numbers in `i32` range are sent as `<int>`, see [`Tag::of`].
    ///
    /// [`Tag::of`]: enum.Tag.html#method.of
    Double(f64),
    /// `<dateTime.iso8601>`, sent as local calendar fields without a timezone.
    DateTime(DateTime),
    /// `<base64>`, base64-encoded binary data.
    Base64(Binary),

    /// `<struct>`, a mapping of named values.
    ///
    /// Members are written in key order, but no order is part of the wire contract.
    Struct(BTreeMap<String, Value>),
    /// `<array>`, a list of arbitrary (heterogeneous) values.
    Array(Vec<Value>),
}

impl Value {
    /// Formats this `Value` as an XML `<value>` element.
    ///
    /// # Errors
    ///
    /// Fails for values without a wire form (non-finite doubles, week or ordinal dates) and for
    /// values nested deeper than [`MAX_VALUE_DEPTH`].
    ///
    /// [`MAX_VALUE_DEPTH`]: constant.MAX_VALUE_DEPTH.html
    pub fn to_xml(&self) -> Result<String> {
        Ok(ser::value_element(&ser::marshal(self)?))
    }

    /// Compares values the way they survive a trip over the wire.
    ///
    /// An `Int` equals a `Double` holding the same number, doubles are compared with a small
    /// relative tolerance, and containers are compared element by element. Everything else must
    /// match exactly.
    pub fn eq_lenient(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.eq_lenient(b))
            }
            (Value::Struct(a), Value::Struct(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, a)| b.get(key).map_or(false, |b| a.eq_lenient(b)))
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b || (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()),
                _ => a == b,
            },
        }
    }

    /// Returns the value of an `Int`.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the value of a `Double` or an `Int`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Double(d) => Some(d),
            Value::Int(i) => Some(f64::from(i)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime> {
        match *self {
            Value::DateTime(date_time) => Some(date_time),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match *self {
            Value::Base64(ref binary) => Some(binary),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match *self {
            Value::Array(ref array) => Some(array),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&BTreeMap<String, Value>> {
        match *self {
            Value::Struct(ref map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a member of a `Struct`.
    ///
    /// Returns `None` if `self` is not a struct or has no such member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_struct().and_then(|map| map.get(key))
    }
}

impl From<i32> for Value {
    fn from(other: i32) -> Self {
        Value::Int(other)
    }
}

impl From<bool> for Value {
    fn from(other: bool) -> Self {
        Value::Bool(other)
    }
}

impl From<String> for Value {
    fn from(other: String) -> Self {
        Value::String(other)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(other: &'a str) -> Self {
        Value::String(other.to_string())
    }
}

impl From<f64> for Value {
    fn from(other: f64) -> Self {
        Value::Double(other)
    }
}

impl From<DateTime> for Value {
    fn from(other: DateTime) -> Self {
        Value::DateTime(other)
    }
}

impl From<Binary> for Value {
    fn from(other: Binary) -> Self {
        Value::Base64(other)
    }
}

impl From<Vec<Value>> for Value {
    fn from(other: Vec<Value>) -> Self {
        Value::Array(other)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(other: BTreeMap<String, Value>) -> Self {
        Value::Struct(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_strings() {
        assert_eq!(
            Value::from("<a>&").to_xml().unwrap(),
            "<value>\n<string>&#60;&#97;&#62;&#38;</string>\n</value>\n"
        );
    }

    #[test]
    fn writes_struct_members() {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), Value::from(true));

        assert_eq!(
            Value::Struct(map).to_xml().unwrap(),
            "<value>\n<struct>\n<member>\n<name>x</name>\n<value>\n<boolean>1</boolean>\n</value>\n</member>\n</struct>\n</value>\n"
        );
    }

    #[test]
    fn lenient_equality() {
        assert!(Value::Int(3).eq_lenient(&Value::Double(3.0)));
        assert!(Value::Double(0.1 + 0.2).eq_lenient(&Value::Double(0.3)));
        assert!(!Value::Int(3).eq_lenient(&Value::Double(3.5)));
        assert!(!Value::Int(1).eq_lenient(&Value::Bool(true)));
        assert!(Value::Array(vec![Value::Double(1.0)]).eq_lenient(&Value::Array(vec![Value::Int(1)])));
        assert!(!Value::Array(vec![Value::Int(1)]).eq_lenient(&Value::Array(vec![])));

        let mut a = BTreeMap::new();
        a.insert("n".to_string(), Value::Double(2.0));
        let mut b = BTreeMap::new();
        b.insert("n".to_string(), Value::Int(2));
        assert!(Value::Struct(a).eq_lenient(&Value::Struct(b)));
    }

    #[test]
    fn accessors() {
        let mut map = BTreeMap::new();
        map.insert("answer".to_string(), Value::Int(42));
        let value = Value::Struct(map);

        assert_eq!(value.get("answer").and_then(Value::as_i32), Some(42));
        assert_eq!(value.get("question"), None);
        assert_eq!(Value::Int(42).get("answer"), None);
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(1.5).as_i32(), None);
    }
}

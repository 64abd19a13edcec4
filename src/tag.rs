//! XML-RPC type tags.

use crate::Value;

use std::fmt::{self, Display, Formatter};

/// The wire type of a value, as named by its XML element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<int>` (also read as `<i4>`).
    Int,
    /// `<double>`
    Double,
    /// `<boolean>`
    Boolean,
    /// `<string>`
    String,
    /// `<base64>`
    Base64,
    /// `<dateTime.iso8601>`
    DateTime,
    /// `<array>`
    Array,
    /// `<struct>`
    Struct,
}

impl Tag {
    /// Returns the tag that represents `value` on the wire.
    ///
    /// Numbers are tagged by what they are, not by how they are stored: a `Value::Double` holding
    /// an integral number that fits an `<int>` (`3.0`, `-0.0`) is tagged `Tag::Int`. Containers
    /// are tagged by kind, so empty arrays and structs keep their tag.
    pub fn of(value: &Value) -> Tag {
        match *value {
            Value::Base64(_) => Tag::Base64,
            Value::Array(_) => Tag::Array,
            Value::DateTime(_) => Tag::DateTime,
            Value::Int(_) => Tag::Int,
            Value::Double(d) => {
                if is_integral(d) {
                    Tag::Int
                } else {
                    Tag::Double
                }
            }
            Value::Bool(_) => Tag::Boolean,
            Value::String(_) => Tag::String,
            Value::Struct(_) => Tag::Struct,
        }
    }

    /// The element name used for this tag.
    pub fn wire_name(self) -> &'static str {
        match self {
            Tag::Int => "int",
            Tag::Double => "double",
            Tag::Boolean => "boolean",
            Tag::String => "string",
            Tag::Base64 => "base64",
            Tag::DateTime => "dateTime.iso8601",
            Tag::Array => "array",
            Tag::Struct => "struct",
        }
    }

    /// Looks up a tag by element name, ignoring ASCII case.
    ///
    /// `i4` is accepted as an alias of `int`.
    pub fn from_wire_name(name: &str) -> Option<Tag> {
        const TAGS: [Tag; 8] = [
            Tag::Int,
            Tag::Double,
            Tag::Boolean,
            Tag::String,
            Tag::Base64,
            Tag::DateTime,
            Tag::Array,
            Tag::Struct,
        ];

        if name.eq_ignore_ascii_case("i4") {
            return Some(Tag::Int);
        }
        TAGS.iter().copied().find(|tag| name.eq_ignore_ascii_case(tag.wire_name()))
    }

    /// Whether this is one of the non-compound tags.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Tag::Array | Tag::Struct)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Whether `d` is a whole number that fits into an `<int>`.
pub(crate) fn is_integral(d: f64) -> bool {
    d.round() == d && d >= f64::from(i32::MIN) && d <= f64::from(i32::MAX)
}

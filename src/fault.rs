use crate::Value;

use thiserror::Error;

use std::collections::BTreeMap;

/// The payload of a `<fault>` response, indicating that a call failed.
///
/// The XML-RPC specification requires that a `<faultCode>` and `<faultString>` is returned in the
/// `<fault>` case, further describing the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{string} ({code})")]
pub struct Fault {
    code: i32,
    string: String,
}

impl Fault {
    /// Creates a new `Fault` from an error code and a message.
    pub fn new(code: i32, string: String) -> Fault {
        Fault { code, string }
    }

    /// Returns the fault code.
    ///
    /// The meaning of this code is not specified by XML-RPC and depends on the service you are
    /// implementing/using.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the error message.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Creates a `Fault` from a `Value`.
    ///
    /// The `Value` must be a `Value::Struct` with an integer `faultCode` and a string
    /// `faultString` field. Additional members are ignored.
    ///
    /// Returns `None` if the value isn't a valid `Fault`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match (value.get("faultCode"), value.get("faultString")) {
            (Some(&Value::Int(code)), Some(&Value::String(ref string))) => {
                Some(Fault::new(code, string.clone()))
            }
            _ => None,
        }
    }

    /// Turns this `Fault` into an equivalent `Value`.
    ///
    /// The returned value can be parsed back into a `Fault` using `Fault::from_value` or returned
    /// as a `<fault>` error response with [`fault_document`].
    ///
    /// [`fault_document`]: fn.fault_document.html
    pub fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert("faultCode".to_string(), Value::from(self.code));
        map.insert("faultString".to_string(), Value::from(self.string.as_str()));

        Value::Struct(map)
    }
}

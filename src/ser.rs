//! Renders values and whole documents as XML-RPC text.
//!
//! Every element is written on its own line, following the layout of the classic JavaScript
//! XML-RPC clients:
//!
//! ```notrust
//! <?xml version="1.0"?>
//! <methodCall>
//! <methodName>examples.getStateName</methodName>
//! <params>
//! <param>
//! <value>
//! <int>41</int>
//! </value>
//! </param>
//! </params>
//! </methodCall>
//! ```

use crate::datetime;
use crate::error::{Error, Result};
use crate::fault::Fault;
use crate::tag::Tag;
use crate::Value;

use xml::common::is_xml10_char;
use xml::escape::escape_str_pcdata;

/// Containers nested deeper than this are rejected by [`marshal`].
pub const MAX_VALUE_DEPTH: usize = 64;

const PROLOG: &str = "<?xml version=\"1.0\"?>\n";

/// Renders a single value (without the surrounding `<value>` element).
///
/// Strings are written entirely as numeric character references (`&#60;` for `<`), so no text
/// ever needs further escaping.
///
/// # Errors
///
/// * `Error::UnsupportedValueShape` for NaN and infinite doubles, for dates without a
///   `YYYYMMDDThh:mm:ss` form, and for strings or member names holding characters XML 1.0 cannot
///   carry (most C0 controls, `U+FFFE`, `U+FFFF`).
/// * `Error::DepthExceeded` when arrays and structs are nested more than [`MAX_VALUE_DEPTH`]
///   levels deep.
///
/// [`MAX_VALUE_DEPTH`]: constant.MAX_VALUE_DEPTH.html
pub fn marshal(value: &Value) -> Result<String> {
    marshal_at(value, 0)
}

fn marshal_at(value: &Value, depth: usize) -> Result<String> {
    let tag = Tag::of(value);

    let xml = match *value {
        Value::Struct(ref map) => {
            if depth >= MAX_VALUE_DEPTH {
                return Err(Error::DepthExceeded { limit: MAX_VALUE_DEPTH });
            }
            let mut members = String::new();
            for (name, member) in map {
                members.push_str("<member>\n");
                members.push_str(&format!("<name>{}</name>\n", escape_text(name, "member name")?));
                members.push_str(&value_element(&marshal_at(member, depth + 1)?));
                members.push_str("</member>\n");
            }
            format!("<struct>\n{}</struct>\n", members)
        }
        Value::Array(ref array) => {
            if depth >= MAX_VALUE_DEPTH {
                return Err(Error::DepthExceeded { limit: MAX_VALUE_DEPTH });
            }
            let mut values = String::new();
            for element in array {
                values.push_str(&value_element(&marshal_at(element, depth + 1)?));
            }
            format!("<array>\n<data>\n{}</data>\n</array>\n", values)
        }
        Value::DateTime(ref date_time) => scalar(tag, &datetime::to_wire(date_time)?),
        Value::Bool(b) => scalar(tag, if b { "1" } else { "0" }),
        Value::Base64(ref binary) => scalar(tag, &binary.encode()),
        Value::String(ref s) => scalar(tag, &char_references(s)?),
        Value::Int(i) => scalar(tag, &i.to_string()),
        Value::Double(d) => {
            if !d.is_finite() {
                return Err(Error::UnsupportedValueShape(format!("non-finite double {}", d)));
            }
            if tag == Tag::Int {
                // whole and in range, so the cast is exact (and turns -0 into 0)
                scalar(tag, &(d as i32).to_string())
            } else {
                scalar(tag, &d.to_string())
            }
        }
    };

    Ok(xml)
}

/// Wraps rendered XML in a `<value>` element.
pub(crate) fn value_element(inner: &str) -> String {
    format!("<value>\n{}</value>\n", inner)
}

fn scalar(tag: Tag, data: &str) -> String {
    format!("<{tag}>{data}</{tag}>\n", tag = tag.wire_name(), data = data)
}

/// Fails on the first character that has no XML 1.0 representation, not even as a reference.
fn check_chars(s: &str, what: &str) -> Result<()> {
    match s.chars().find(|&c| !is_xml10_char(c)) {
        Some(c) => Err(Error::UnsupportedValueShape(format!(
            "{} contains U+{:04X}, which XML 1.0 cannot represent",
            what, c as u32
        ))),
        None => Ok(()),
    }
}

fn escape_text(s: &str, what: &str) -> Result<String> {
    check_chars(s, what)?;
    Ok(escape_str_pcdata(s).into_owned())
}

fn char_references(s: &str) -> Result<String> {
    check_chars(s, "string")?;
    Ok(s.chars().map(|c| format!("&#{};", c as u32)).collect())
}

fn params_element(params: &[Value]) -> Result<String> {
    let mut xml = String::from("<params>\n");
    for param in params {
        xml.push_str("<param>\n");
        xml.push_str(&value_element(&marshal(param)?));
        xml.push_str("</param>\n");
    }
    xml.push_str("</params>\n");
    Ok(xml)
}

/// Renders a complete `<methodCall>` document.
///
/// The method name is XML-escaped and the parameters are marshalled in order.
pub fn request_document(method: &str, params: &[Value]) -> Result<String> {
    Ok(format!(
        "{}<methodCall>\n<methodName>{}</methodName>\n{}</methodCall>",
        PROLOG,
        escape_text(method, "method name")?,
        params_element(params)?
    ))
}

/// Renders a successful `<methodResponse>` carrying `params`.
pub fn response_document(params: &[Value]) -> Result<String> {
    Ok(format!("{}<methodResponse>\n{}</methodResponse>", PROLOG, params_element(params)?))
}

/// Renders a `<methodResponse>` reporting `fault`.
pub fn fault_document(fault: &Fault) -> Result<String> {
    Ok(format!(
        "{}<methodResponse>\n<fault>\n{}</fault>\n</methodResponse>",
        PROLOG,
        value_element(&marshal(&fault.to_value())?)
    ))
}

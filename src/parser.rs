//! XML-RPC response parser.
//!
//! Decoding walks the element tree recursively and threads an *accumulator* through the walk: the
//! container (struct or array) that decoded values get attached to. Wrapper elements such as
//! `<params>`, `<param>`, `<value>`, `<data>` and `<member>` have no meaning of their own; the
//! walk passes straight through them, so the parser accepts any nesting of wrappers as long as
//! each value ends up inside a struct or an array.

use crate::binary::Binary;
use crate::datetime;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::response::Response;
use crate::tag::Tag;
use crate::Value;

use log::debug;

use std::collections::BTreeMap;

/// Elements that only group other elements.
const WRAPPERS: &[&str] = &["methodResponse", "params", "param", "fault", "value", "data", "member"];

/// A container under construction, plus the member name waiting for its value.
struct Accumulator {
    value: Value,
    pending_name: Option<String>,
    attached: usize,
}

impl Accumulator {
    fn new(value: Value) -> Self {
        Accumulator {
            value,
            pending_name: None,
            attached: 0,
        }
    }

    /// Attaches a decoded value.
    ///
    /// Structs take the value under the pending member name, arrays append it, and a scalar
    /// accumulator is replaced by the value outright.
    fn attach(&mut self, value: Value) -> Result<()> {
        match Tag::of(&self.value) {
            Tag::Struct => {
                let name = self
                    .pending_name
                    .take()
                    .ok_or_else(|| Error::unexpected("<name> before <value> in struct member", None))?;
                if let Value::Struct(ref mut map) = self.value {
                    map.insert(name, value);
                }
            }
            Tag::Array => {
                if let Value::Array(ref mut array) = self.value {
                    array.push(value);
                }
            }
            _ => self.value = value,
        }
        self.attached += 1;
        Ok(())
    }
}

/// State of a single response traversal.
#[derive(Default)]
struct Unmarshaller {
    fault: bool,
}

impl Unmarshaller {
    fn unmarshal(&mut self, node: &Node, mut parent: Accumulator) -> Result<Accumulator> {
        if node.is("fault") {
            if !self.fault {
                debug!("response carries a <fault>");
            }
            self.fault = true;
        }

        let tag = Tag::from_wire_name(node.name());

        match tag {
            Some(Tag::Struct) | Some(Tag::Array) => {
                let container = if tag == Some(Tag::Struct) {
                    Value::Struct(BTreeMap::new())
                } else {
                    Value::Array(Vec::new())
                };

                let mut children = Accumulator::new(container);
                for child in node.children() {
                    children = self.unmarshal(child, children)?;
                }
                parent.attach(children.value)?;
            }
            Some(tag) => parent.attach(decode_scalar(tag, node.text())?)?,
            // member names are taken verbatim, even when empty or blank
            None if node.is("name") => parent.pending_name = Some(node.text().to_string()),
            // untyped `<value>` content is a string
            None if node.is("value") && (node.children().is_empty() || has_text(node)) => {
                parent.attach(Value::String(node.text().to_string()))?;
            }
            None if has_text(node) || (node.children().is_empty() && !is_wrapper(node)) => {
                return Err(Error::unexpected(
                    "a known type tag",
                    Some(format!("<{}>", node.name())),
                ));
            }
            None => {
                let attached = parent.attached;
                for child in node.children() {
                    parent = self.unmarshal(child, parent)?;
                }
                if node.is("value") && parent.attached == attached {
                    return Err(Error::unexpected(
                        "a value inside <value>",
                        node.children().first().map(|child| format!("<{}>", child.name())),
                    ));
                }
            }
        }

        Ok(parent)
    }
}

fn has_text(node: &Node) -> bool {
    !node.text().trim().is_empty()
}

fn is_wrapper(node: &Node) -> bool {
    WRAPPERS.iter().any(|name| node.is(name))
}

/// Decodes the text of a scalar element.
///
/// Strings are taken verbatim (the XML parser already resolved entities and character
/// references). Everything else is trimmed first.
fn decode_scalar(tag: Tag, text: &str) -> Result<Value> {
    let trimmed = text.trim();

    let value = match tag {
        Tag::String => Value::String(text.to_string()),
        Tag::Base64 => Value::Base64(Binary::decode(text)?),
        Tag::DateTime => Value::DateTime(datetime::from_wire(text)?),
        Tag::Boolean => match trimmed {
            "1" => Value::Bool(true),
            "0" => Value::Bool(false),
            _ => return Err(Error::invalid_value("boolean", trimmed)),
        },
        Tag::Int => Value::Int(
            trimmed
                .parse()
                .map_err(|_| Error::invalid_value("integer", trimmed))?,
        ),
        Tag::Double => Value::Double(
            trimmed
                .parse()
                .map_err(|_| Error::invalid_value("double", trimmed))?,
        ),
        Tag::Struct | Tag::Array => {
            return Err(Error::unexpected("a scalar type tag", Some(tag.to_string())))
        }
    };

    Ok(value)
}

/// Decodes a response document that has already been parsed into a tree.
///
/// Every child of the root element is decoded in document order. Each top-level value (normally
/// the content of a `<param>`) becomes one entry of [`Response::params`].
///
/// [`Response::params`]: struct.Response.html#method.params
pub fn unmarshal_response(root: &Node) -> Result<Response> {
    let mut unmarshaller = Unmarshaller::default();
    let mut params = Accumulator::new(Value::Array(Vec::new()));

    for child in root.children() {
        params = unmarshaller.unmarshal(child, params)?;
    }

    let params = match params.value {
        Value::Array(params) => params,
        other => vec![other],
    };

    Ok(Response::new(params, unmarshaller.fault))
}

/// Parses and decodes a response document.
pub fn parse_response(xml: &str) -> Result<Response> {
    unmarshal_response(&Node::parse(xml)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use iso8601::{Date, DateTime, Time};

    fn read_value(xml: &str) -> Result<Value> {
        let response = parse_response(&format!("<params><param>{}</param></params>", xml))?;
        Ok(response.into_value().expect("document had no value"))
    }

    #[test]
    fn parses_scalar_response() {
        let response = parse_response(
            "<methodResponse><params><param><value><int>42</int></value></param></params></methodResponse>",
        )
        .unwrap();

        assert!(!response.is_fault());
        assert_eq!(response.value(), Some(&Value::Int(42)));
    }

    #[test]
    fn parses_indented_response() {
        let response = parse_response(r##"<?xml version="1.0"?>
<methodResponse>
    <params>
        <param>
            <value>teststring</value>
        </param>
    </params>
</methodResponse>
"##).unwrap();

        assert_eq!(response.value(), Some(&Value::from("teststring")));
    }

    #[test]
    fn parses_fault() {
        let response = parse_response(r##"<?xml version="1.0"?>
<methodResponse>
   <fault>
      <value>
         <struct>
            <member>
               <name>faultCode</name>
               <value><int>4</int></value>
               </member>
            <member>
               <name>faultString</name>
               <value><string>Too many parameters.</string></value>
               </member>
            </struct>
         </value>
      </fault>
   </methodResponse>"##).unwrap();

        assert!(response.is_fault());
        let value = response.value().unwrap();
        assert_eq!(value.get("faultCode"), Some(&Value::Int(4)));
        assert_eq!(value.get("faultString"), Some(&Value::from("Too many parameters.")));
    }

    #[test]
    fn fault_tag_is_case_insensitive() {
        let response = parse_response("<methodResponse><FAULT><value><int>1</int></value></FAULT></methodResponse>").unwrap();
        assert!(response.is_fault());
    }

    #[test]
    fn pairs_struct_members_in_any_order() {
        let value = read_value(r#"
            <value><struct>
                <member><name>b</name><value><int>2</int></value></member>
                <member><name>a</name><value><string>one</string></value></member>
                <member><name>c</name><value><boolean>1</boolean></value></member>
            </struct></value>"#).unwrap();

        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), Value::from("one"));
        expected.insert("b".to_string(), Value::Int(2));
        expected.insert("c".to_string(), Value::Bool(true));
        assert_eq!(value, Value::Struct(expected));
    }

    #[test]
    fn scopes_member_names_to_their_struct() {
        let value = read_value(r#"
            <value><struct>
                <member><name>outer</name><value><struct>
                    <member><name>inner</name><value><int>1</int></value></member>
                </struct></value></member>
                <member><name>next</name><value><int>2</int></value></member>
            </struct></value>"#).unwrap();

        assert_eq!(value.get("outer").and_then(|v| v.get("inner")), Some(&Value::Int(1)));
        assert_eq!(value.get("next"), Some(&Value::Int(2)));
        assert_eq!(value.as_struct().map(BTreeMap::len), Some(2));
    }

    #[test]
    fn reads_empty_and_blank_member_names() {
        let value = read_value(r#"
            <value><struct>
                <member><name></name><value><int>1</int></value></member>
                <member><name> </name><value><int>2</int></value></member>
                <member><name/><value><int>3</int></value></member>
            </struct></value>"#).unwrap();

        let mut expected = BTreeMap::new();
        expected.insert("".to_string(), Value::Int(3));
        expected.insert(" ".to_string(), Value::Int(2));
        assert_eq!(value, Value::Struct(expected));
    }

    #[test]
    fn rejects_unknown_empty_elements() {
        let in_array = read_value("<value><array><data><value><nil/></value><value><int>2</int></value></data></array></value>");
        let in_struct = read_value(r#"
            <value><struct>
                <member><name>a</name><value><nil/></value></member>
                <member><name>b</name><value><int>2</int></value></member>
            </struct></value>"#);

        for result in [in_array, in_struct] {
            match result {
                Err(Error::UnexpectedXml { found, .. }) => assert_eq!(found.as_deref(), Some("<nil>")),
                other => panic!("expected UnexpectedXml, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_value_without_content() {
        match read_value("<value><array><data><value><data/></value></data></array></value>") {
            Err(Error::UnexpectedXml { found, .. }) => assert_eq!(found.as_deref(), Some("<data>")),
            other => panic!("expected UnexpectedXml, got {:?}", other),
        }
    }

    #[test]
    fn rejects_value_before_name() {
        let result = read_value(r#"
            <value><struct>
                <member><value><int>2</int></value><name>b</name></member>
            </struct></value>"#);

        match result {
            Err(Error::UnexpectedXml { .. }) => {}
            other => panic!("expected UnexpectedXml, got {:?}", other),
        }
    }

    #[test]
    fn parses_array_values() {
        assert_eq!(read_value(r#"
                <value><array><data>
                    <value><i4>5</i4></value>
                    <value><string>a</string></value>
                    <value><array><data></data></array></value>
                </data></array></value>"#).unwrap(),
            Value::Array(vec![Value::Int(5), Value::from("a"), Value::Array(Vec::new())]));
    }

    #[test]
    fn keeps_empty_containers() {
        assert_eq!(read_value("<value><struct></struct></value>").unwrap(), Value::Struct(BTreeMap::new()));
        assert_eq!(read_value("<value><array><data/></array></value>").unwrap(), Value::Array(Vec::new()));
    }

    #[test]
    fn parses_string_value_with_whitespace() {
        assert_eq!(read_value("<value><string>  I'm a string!  </string></value>").unwrap(),
            Value::from("  I'm a string!  "));
    }

    #[test]
    fn parses_raw_value_as_string() {
        assert_eq!(read_value("<value>\t  I'm a string!  </value>").unwrap(),
            Value::from("\t  I'm a string!  "));
    }

    #[test]
    fn parses_empty_string() {
        assert_eq!(read_value("<value><string></string></value>").unwrap(), Value::from(""));
        assert_eq!(read_value("<value><string/></value>").unwrap(), Value::from(""));
        assert_eq!(read_value("<value></value>").unwrap(), Value::from(""));
        assert_eq!(read_value("<value><array><data><value/><value> </value></data></array></value>").unwrap(),
            Value::Array(vec![Value::from(""), Value::from(" ")]));
    }

    #[test]
    fn parses_empty_base64() {
        assert_eq!(read_value("<value><base64></base64></value>").unwrap(), Value::Base64(Binary::default()));
        assert_eq!(read_value("<value><base64/></value>").unwrap(), Value::Base64(Binary::default()));
    }

    #[test]
    fn unescapes_values() {
        assert_eq!(read_value("<value><string>abc&lt;abc&amp;abc&#233;</string></value>").unwrap(),
            Value::from("abc<abc&abcé"));
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(read_value("<value><int>+1234</int></value>").unwrap(), Value::Int(1234));
        assert_eq!(read_value("<value><INT> -5 </INT></value>").unwrap(), Value::Int(-5));
        assert_eq!(read_value("<value><double>3.5</double></value>").unwrap(), Value::Double(3.5));
        assert_eq!(read_value("<value><double>-0.25</double></value>").unwrap(), Value::Double(-0.25));
    }

    #[test]
    fn parses_booleans() {
        assert_eq!(read_value("<value><boolean>1</boolean></value>").unwrap(), Value::Bool(true));
        assert_eq!(read_value("<value><boolean>0</boolean></value>").unwrap(), Value::Bool(false));
        assert!(read_value("<value><boolean>yes</boolean></value>").is_err());
    }

    #[test]
    fn parses_date_values() {
        let expected = DateTime {
            date: Date::YMD { year: 1998, month: 7, day: 17 },
            time: Time {
                hour: 14,
                minute: 8,
                second: 55,
                millisecond: 0,
                tz_offset_hours: 0,
                tz_offset_minutes: 0,
            },
        };

        assert_eq!(read_value("<value><dateTime.iso8601>19980717T14:08:55</dateTime.iso8601></value>").unwrap(),
            Value::DateTime(expected));
        assert_eq!(read_value("<value><datetime.iso8601>19980717T14:08:55</datetime.iso8601></value>").unwrap(),
            Value::DateTime(expected));
        assert!(read_value("<value><dateTime.iso8601></dateTime.iso8601></value>").is_err());
        assert!(read_value("<value><dateTime.iso8601>ILLEGAL VALUE :(</dateTime.iso8601></value>").is_err());
    }

    #[test]
    fn decodes_base64() {
        assert_eq!(read_value("<value><base64>aGk=</base64></value>").unwrap(),
            Value::Base64(Binary::new(&b"hi"[..])));

        match read_value("<value><base64>I'm not base64!</base64></value>") {
            Err(Error::InvalidEncoding(_)) => {}
            other => panic!("expected InvalidEncoding, got {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_scalars() {
        fn errstr(value: &str) -> String {
            read_value(value).unwrap_err().to_string()
        }

        assert_eq!(errstr("<value><int>bla</int></value>"), "invalid value for type 'integer': bla");
        assert_eq!(errstr("<value><int></int></value>"), "invalid value for type 'integer': ");
        assert_eq!(
            errstr("<value><i8>12345</i8></value>"),
            "unexpected XML (expected a known type tag, found <i8>)"
        );
    }

    #[test]
    fn empty_response_has_no_value() {
        let response = parse_response("<methodResponse><params></params></methodResponse>").unwrap();
        assert_eq!(response.value(), None);
        assert!(response.params().is_empty());
    }

    #[test]
    fn collects_every_param() {
        let response = parse_response(
            "<methodResponse><params>\
             <param><value><int>1</int></value></param>\
             <param><value><int>2</int></value></param>\
             </params></methodResponse>",
        )
        .unwrap();

        assert_eq!(response.params(), &[Value::Int(1), Value::Int(2)][..]);
        assert_eq!(response.value(), Some(&Value::Int(1)));
    }

    #[test]
    fn scalar_accumulator_is_replaced() {
        let mut accumulator = Accumulator::new(Value::Int(1));
        accumulator.attach(Value::from("replacement")).unwrap();
        assert_eq!(accumulator.value, Value::from("replacement"));

        let mut accumulator = Accumulator::new(Value::Struct(BTreeMap::new()));
        assert!(accumulator.attach(Value::Int(1)).is_err());
    }
}

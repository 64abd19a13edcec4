//! A small XML-RPC client and codec.
//!
//! The `xmlrpc_lite` crate encodes [`Value`] trees as [XML-RPC][spec] documents, sends them with a
//! pluggable [`Transport`], and decodes the response document back into values.
//!
//! ```no_run
//! use xmlrpc_lite::{Request, Value};
//!
//! let response = Request::new("pow").arg(2).arg(8).call_url("http://127.0.0.1:8000").unwrap();
//! assert!(!response.is_fault());
//! assert_eq!(response.value(), Some(&Value::Int(256)));
//! ```
//!
//! [spec]: http://xmlrpc.scripting.com/spec.html

#![doc(html_root_url = "https://docs.rs/xmlrpc-lite/0.1.0")]

mod binary;
mod datetime;
mod error;
mod fault;
mod node;
mod parser;
mod request;
mod response;
mod ser;
mod tag;
mod transport;
mod value;

pub use binary::Binary;
pub use datetime::{from_wire as datetime_from_wire, to_wire as datetime_to_wire};
pub use error::{BoxError, Error, Result};
pub use fault::Fault;
pub use node::{Node, MAX_ELEMENT_DEPTH};
pub use parser::{parse_response, unmarshal_response};
pub use request::Request;
pub use response::Response;
pub use ser::{fault_document, marshal, request_document, response_document, MAX_VALUE_DEPTH};
pub use tag::Tag;
pub use transport::Transport;
pub use value::Value;

#[cfg(feature = "http")]
pub use transport::http;

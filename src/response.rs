use crate::error::Result;
use crate::fault::Fault;
use crate::parser;
use crate::Value;

/// A decoded `<methodResponse>`.
///
/// A response is either a regular result or a *fault*. Faults are not turned into errors: the
/// payload is decoded like any other value, and [`is_fault`] tells the two cases apart.
///
/// [`is_fault`]: #method.is_fault
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    params: Vec<Value>,
    fault: bool,
}

impl Response {
    pub(crate) fn new(params: Vec<Value>, fault: bool) -> Self {
        Response { params, fault }
    }

    /// Parses and decodes a response document.
    ///
    /// # Errors
    ///
    /// Fails if the text is not well-formed XML, is nested too deeply, or contains values that
    /// cannot be decoded. A `<fault>` response is *not* an error.
    pub fn parse(xml: &str) -> Result<Response> {
        parser::parse_response(xml)
    }

    /// Whether the document contained a `<fault>` element.
    pub fn is_fault(&self) -> bool {
        self.fault
    }

    /// The returned value: the first `<param>`, or the fault payload.
    pub fn value(&self) -> Option<&Value> {
        self.params.first()
    }

    /// All decoded top-level values, in document order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_value(self) -> Option<Value> {
        self.params.into_iter().next()
    }

    /// Converts a fault payload into a `Fault`.
    ///
    /// Returns `None` for regular responses and for faults that lack an integer `faultCode` or a
    /// string `faultString`.
    pub fn fault(&self) -> Option<Fault> {
        if !self.fault {
            return None;
        }
        self.value().and_then(Fault::from_value)
    }
}

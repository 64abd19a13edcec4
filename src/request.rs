use crate::error::{Error, Result};
use crate::parser::parse_response;
use crate::response::Response;
use crate::ser::request_document;
use crate::transport::Transport;
use crate::Value;

use log::{debug, trace};

use std::collections::BTreeMap;
use std::fmt;

const CONTENT_TYPE: &str = "text/xml";

/// A request to call a procedure.
#[derive(Clone)]
pub struct Request<'a> {
    name: &'a str,
    args: Vec<Value>,
    auth: Option<(String, String)>,
}

impl<'a> Request<'a> {
    /// Creates a new request to call a function named `name`.
    ///
    /// By default, no arguments are passed. Use the `arg` method to append arguments.
    pub fn new(name: &'a str) -> Self {
        Request {
            name,
            args: Vec::new(),
            auth: None,
        }
    }

    /// Appends an argument to be passed to the current list of arguments.
    pub fn arg<T: Into<Value>>(mut self, value: T) -> Self {
        self.push_arg(value);
        self
    }

    /// Appends an argument in place.
    pub fn push_arg<T: Into<Value>>(&mut self, value: T) {
        self.args.push(value.into());
    }

    /// Removes all arguments.
    pub fn clear_args(&mut self) {
        self.args.clear();
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Sends HTTP Basic credentials with the request.
    pub fn auth<U: Into<String>, P: Into<String>>(mut self, user: U, password: P) -> Self {
        self.auth = Some((user.into(), password.into()));
        self
    }

    /// Performs the request by POSTing it to `url` using a [`Transport`].
    ///
    /// If you want to send the request using an HTTP POST request, you can also use [`call_url`],
    /// which creates a suitable [`Transport`] internally.
    ///
    /// # Errors
    ///
    /// Any errors that occur while sending the request using the [`Transport`] will be returned to
    /// the caller, as will errors encoding the arguments or decoding the response. A `<fault>`
    /// response is returned as a successful [`Response`]; check [`Response::is_fault`].
    ///
    /// [`call_url`]: #method.call_url
    /// [`Transport`]: trait.Transport.html
    /// [`Response`]: struct.Response.html
    /// [`Response::is_fault`]: struct.Response.html#method.is_fault
    pub fn call<T: Transport + ?Sized>(&self, transport: &T, url: &str) -> Result<Response> {
        let body = self.to_xml()?;

        let mut headers = BTreeMap::new();
        if let Some((ref user, ref password)) = self.auth {
            headers.insert("Authorization".to_string(), basic_auth(user, password));
        }

        debug!("calling {} at {}", self.name, url);
        trace!("request body: {}", body);

        let text = transport
            .transmit(url, CONTENT_TYPE, body, &headers)
            .map_err(Error::Transport)?;

        trace!("response body: {}", text);

        parse_response(&text)
    }

    /// Performs the request on a URL.
    ///
    /// This is a convenience method that will internally create a new blocking
    /// `reqwest::Client` and send an HTTP POST request to the given URL. If you only use this
    /// method to perform requests, you don't need to depend on `reqwest` yourself.
    ///
    /// This method is only available when the `http` feature is enabled (this is the default).
    ///
    /// # Errors
    ///
    /// Since this is just a convenience wrapper around [`Request::call`], the same error conditions
    /// apply.
    ///
    /// [`Request::call`]: #method.call
    #[cfg(feature = "http")]
    pub fn call_url(&self, url: &str) -> Result<Response> {
        self.call(&reqwest::blocking::Client::new(), url)
    }

    /// Formats this `Request` as an XML-RPC `<methodCall>` document.
    pub fn to_xml(&self) -> Result<String> {
        request_document(self.name, &self.args)
    }
}

impl<'a> fmt::Debug for Request<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // keep the password out of logs
        f.debug_struct("Request")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("auth", &self.auth.as_ref().map(|(user, _)| user))
            .finish()
    }
}

/// Builds the value of an HTTP Basic `Authorization` header.
fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", base64::encode(format!("{}:{}", user, password)))
}

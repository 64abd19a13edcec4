use crate::error::BoxError;

use std::collections::BTreeMap;

/// Request and response transport abstraction.
///
/// A `Transport` performs a synchronous POST and hands back the response body. It is passed to
/// [`Request::call`] in order to perform that request.
///
/// The most commonly used transport is simple HTTP: If the `http` feature is enabled (it is by
/// default), reqwest's blocking `Client` implements this trait.
///
/// You can implement this trait for your own types if you want to customize how requests are sent.
/// You can modify HTTP headers or wrap requests in a completely different protocol.
///
/// [`Request::call`]: struct.Request.html#method.call
pub trait Transport {
    /// POSTs `body` to `url` and returns the response text.
    ///
    /// `headers` holds extra request headers, such as `Authorization`, on top of the ones the
    /// transport sets itself. Retrying, redirects and status code policy are up to the transport.
    ///
    /// # Errors
    ///
    /// If a transport error occurs, it should be returned as a boxed error - the library will then
    /// return an `Error::Transport` to the caller.
    fn transmit(
        &self,
        url: &str,
        content_type: &str,
        body: String,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, BoxError>;
}

impl<'a, T: Transport + ?Sized> Transport for &'a T {
    fn transmit(
        &self,
        url: &str,
        content_type: &str,
        body: String,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, BoxError> {
        (**self).transmit(url, content_type, body, headers)
    }
}

/// Provides helpers for implementing custom [`Transport`]s using reqwest.
///
/// This module will be disabled if the `http` feature is not enabled.
///
/// The [`Transport`] implementation for reqwest's blocking `Client` looks roughly like this:
///
/// ```notrust
/// let builder = build_headers(client.post(url), content_type, body.len() as u64);
///
/// // add extra headers, send `body` using `builder` and get response
///
/// check_response(&response)?;
/// ```
///
/// From this, you can build your own custom transports.
///
/// [`Transport`]: ../trait.Transport.html
#[cfg(feature = "http")]
pub mod http {
    use crate::error::BoxError;
    use crate::Transport;

    use mime::Mime;
    use reqwest::blocking::{Client, RequestBuilder, Response};
    use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};

    use std::collections::BTreeMap;

    /// Appends all HTTP headers required by the XML-RPC specification to the `RequestBuilder`.
    ///
    /// More specifically, the following headers are set:
    ///
    /// ```notrust
    /// User-Agent: Rust xmlrpc-lite
    /// Content-Type: $content_type
    /// Content-Length: $body_len
    /// ```
    pub fn build_headers(builder: RequestBuilder, content_type: &str, body_len: u64) -> RequestBuilder {
        // NB: The `Host` header is also required, but reqwest adds it automatically, since
        // HTTP/1.1 requires it.
        builder
            .header(USER_AGENT, "Rust xmlrpc-lite")
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, body_len)
    }

    /// Checks that a reqwest `Response` has a status code indicating success and, if it declares
    /// a `Content-Type`, that it is XML.
    pub fn check_response(response: &Response) -> Result<(), BoxError> {
        // This is essentially an open-coded version of `Response::error_for_status` that does not
        // consume the response.
        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(format!("server response indicates error: {}", response.status()).into());
        }

        // "The Content-Type is text/xml."
        // (we ignore this if the header is missing completely)
        if let Some(content) = response.headers().get(CONTENT_TYPE) {
            let mime: Mime = content.to_str()?.parse()?;
            if mime.subtype() != mime::XML
                || (mime.type_() != mime::TEXT && mime.type_() != mime::APPLICATION)
            {
                return Err(format!("expected Content-Type 'text/xml', got '{}'", mime).into());
            }
        }

        Ok(())
    }

    /// Use a blocking reqwest `Client` as the transport.
    ///
    /// The request will be sent as specified in the XML-RPC specification: A default `User-Agent`
    /// will be set, along with the correct `Content-Type` and `Content-Length`.
    impl Transport for Client {
        fn transmit(
            &self,
            url: &str,
            content_type: &str,
            body: String,
            headers: &BTreeMap<String, String>,
        ) -> Result<String, BoxError> {
            let mut builder = build_headers(Client::post(self, url), content_type, body.len() as u64);
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.body(body).send()?;
            check_response(&response)?;

            Ok(response.text()?)
        }
    }
}

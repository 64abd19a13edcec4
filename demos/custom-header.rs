//! This example shows how to transmit a request with a custom HTTP header.

use xmlrpc_lite::http::{build_headers, check_response};
use xmlrpc_lite::{BoxError, Request, Transport};

use reqwest::blocking::Client;
use reqwest::header::COOKIE;

use std::collections::BTreeMap;

/// Custom transport that adds a cookie header.
struct MyTransport(Client);

impl Transport for MyTransport {
    fn transmit(
        &self,
        url: &str,
        content_type: &str,
        body: String,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, BoxError> {
        let mut builder = build_headers(self.0.post(url), content_type, body.len() as u64)
            .header(COOKIE, "SESSION=123abc"); // Our custom header will be a `Cookie` header
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(body).send()?;
        check_response(&response)?;

        Ok(response.text()?)
    }
}

fn main() {
    let request = Request::new("pow").arg(2).arg(8).auth("user", "secret");

    let tp = MyTransport(Client::new());
    let result = request.call(&tp, "http://localhost/target");

    println!("Result: {:?}", result);
}

//! You can use this example by executing `python3 -m xmlrpc.server` and then running
//! `cargo run --example client`.

use xmlrpc_lite::{Request, Value};

use reqwest::blocking::Client;

fn main() {
    let client = Client::new();

    // The Python example server exports Python's `pow` method. Let's call it!
    let pow_request = Request::new("pow").arg(2).arg(8); // Compute 2**8

    let request_result = pow_request.call(&client, "http://127.0.0.1:8000");

    println!("Result: {:?}", request_result);

    // The `.unwrap()` asserts that the request was sent and decoded successfully. The server
    // could still have answered with a fault, which we check separately.
    let response = request_result.unwrap();
    assert!(!response.is_fault(), "server replied with a fault: {:?}", response.fault());
    assert_eq!(response.value(), Some(&Value::Int(2i32.pow(8))));
}

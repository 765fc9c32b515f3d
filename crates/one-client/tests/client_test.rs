// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! End-to-end client tests against a stub transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use one_client::{Client, ClientConfig, Value, image, user};
use one_xmlrpc::{RpcError, Transport};

const ENDPOINT: &str = "http://localhost:2633/RPC2";
const MYPASS_SHA1: &str = "e727d1464ae12436e899a726da5b2f11d8381b26";

#[derive(Clone, Default)]
struct StubTransport {
    inner: Arc<StubState>,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<VecDeque<one_xmlrpc::Result<Vec<Value>>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl StubTransport {
    fn push_success(&self, values: Vec<Value>) {
        self.inner.replies.lock().unwrap().push_back(Ok(values));
    }

    fn push_error(&self, err: RpcError) {
        self.inner.replies.lock().unwrap().push_back(Err(err));
    }

    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    fn execute(&self, method: &str, params: &[Value]) -> one_xmlrpc::Result<Vec<Value>> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.to_vec()));
        self.inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Transport("no stubbed reply".to_string())))
    }
}

fn stub_client(stub: &StubTransport) -> Client {
    let config = ClientConfig::new()
        .with_secret("oneadmin:mypass")
        .with_endpoint(ENDPOINT);
    Client::with_transport(config, Box::new(stub.clone())).unwrap()
}

#[test]
fn test_call_prepends_credential_and_namespaces_action() {
    let stub = StubTransport::default();
    stub.push_success(vec![Value::Bool(true)]);
    let client = stub_client(&stub);

    let response = client.call("image.delete", vec![5.into()]);
    assert!(response.is_success());

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "one.image.delete");
    assert_eq!(
        calls[0].1,
        vec![
            Value::Text(format!("oneadmin:{MYPASS_SHA1}")),
            Value::Int(5),
        ]
    );
}

#[test]
fn test_transport_error_becomes_failed_response() {
    let stub = StubTransport::default();
    stub.push_error(RpcError::Transport("connection refused".to_string()));
    let client = stub_client(&stub);

    let response = client.call("image.info", vec![5.into()]);
    assert!(!response.is_success());
    assert!(response.message().unwrap().contains("connection refused"));
}

#[test]
fn test_fault_becomes_failed_response() {
    let stub = StubTransport::default();
    stub.push_error(RpcError::Fault {
        code: 2,
        message: "not authorized".to_string(),
    });
    let client = stub_client(&stub);

    let response = client.call("image.delete", vec![5.into()]);
    assert!(!response.is_success());
    assert!(response.message().unwrap().contains("not authorized"));
}

#[test]
fn test_image_info_end_to_end() {
    let stub = StubTransport::default();
    stub.push_success(vec![
        Value::Bool(true),
        Value::Text("<IMAGE><ID>5</ID><STATE>1</STATE></IMAGE>".to_string()),
    ]);
    let client = stub_client(&stub);

    let mut img = image::Image::new(&client, 5);
    assert_eq!(img.state(), None);
    assert_eq!(img.xpath("ID"), None);

    let response = img.info();
    assert!(response.is_success());
    assert_eq!(
        response.message(),
        Some("<IMAGE><ID>5</ID><STATE>1</STATE></IMAGE>")
    );

    assert_eq!(img.state(), Some(1));
    assert_eq!(img.xpath("ID"), Some("5"));
    assert_eq!(img.state_name().unwrap(), Some("READY"));
    assert_eq!(img.is_enabled(), Some(true));

    assert_eq!(stub.calls()[0].0, "one.image.info");
}

#[test]
fn test_allocate_returns_assigned_id() {
    let stub = StubTransport::default();
    stub.push_success(vec![Value::Bool(true), Value::Int(12)]);
    let client = stub_client(&stub);

    let response = image::allocate(&client, "NAME = \"base\"");
    assert!(response.is_success());
    assert_eq!(response.message(), Some("12"));
}

#[test]
fn test_failed_info_keeps_handle_unknown() {
    let stub = StubTransport::default();
    stub.push_success(vec![
        Value::Bool(false),
        Value::Text("Error getting image [5].".to_string()),
    ]);
    let client = stub_client(&stub);

    let mut img = image::Image::new(&client, 5);
    let response = img.info();
    assert!(!response.is_success());
    assert_eq!(img.state(), None);
    assert_eq!(img.is_enabled(), None);
}

#[test]
fn test_image_pool_enumeration() {
    let stub = StubTransport::default();
    stub.push_success(vec![
        Value::Bool(true),
        Value::Text(
            "<IMAGE_POOL>\
             <IMAGE><ID>1</ID><STATE>1</STATE><PUBLIC>1</PUBLIC></IMAGE>\
             <IMAGE><ID>3</ID><STATE>3</STATE><PUBLIC>0</PUBLIC></IMAGE>\
             </IMAGE_POOL>"
                .to_string(),
        ),
    ]);
    let client = stub_client(&stub);

    let mut pool = image::ImagePool::new(&client);
    let response = pool.info(one_client::pool::PoolFilter::Mine);
    assert!(response.is_success());

    let calls = stub.calls();
    assert_eq!(calls[0].0, "one.imagepool.info");
    assert_eq!(calls[0].1[1], Value::Int(-3));

    let images = pool.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].id(), 1);
    assert!(images[0].is_public());
    assert_eq!(images[0].is_enabled(), Some(true));
    assert_eq!(images[1].id(), 3);
    assert_eq!(images[1].is_enabled(), Some(false));
    assert_eq!(images[1].short_state().unwrap(), Some("disa"));
}

#[test]
fn test_user_operations_use_fixed_action_names() {
    let stub = StubTransport::default();
    stub.push_success(vec![Value::Bool(true), Value::Int(8)]);
    stub.push_success(vec![Value::Bool(true)]);
    let client = stub_client(&stub);

    let response = user::allocate(&client, "alice", "secret", "");
    assert!(response.is_success());
    assert_eq!(response.message(), Some("8"));

    let alice = user::User::new(&client, 8);
    alice.passwd("newsecret");

    let calls = stub.calls();
    assert_eq!(calls[0].0, "one.user.allocate");
    assert_eq!(
        calls[0].1[1..],
        [
            Value::Text("alice".to_string()),
            Value::Text("secret".to_string()),
            Value::Text("".to_string()),
        ]
    );
    assert_eq!(calls[1].0, "one.user.passwd");
    assert_eq!(calls[1].1[1..], [Value::Int(8), Value::Text("newsecret".to_string())]);
}

#[test]
fn test_bad_credential_fails_client_construction() {
    let config = ClientConfig::new()
        .with_secret("nocolon")
        .with_endpoint(ENDPOINT);
    let result = Client::with_transport(config, Box::new(StubTransport::default()));
    assert!(matches!(result, Err(one_client::ClientError::Config(_))));
}

#[test]
fn test_bad_endpoint_fails_client_construction() {
    let config = ClientConfig::new()
        .with_secret("oneadmin:mypass")
        .with_endpoint("definitely not a url");
    let result = Client::with_transport(config, Box::new(StubTransport::default()));
    assert!(matches!(result, Err(one_client::ClientError::Config(_))));
}

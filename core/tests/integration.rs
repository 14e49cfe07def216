//! End-to-end scenarios against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives the client over real
//! HTTP with the default `UreqTransport`. The `/echo/*` routes reflect the
//! request back, so header and body assertions see what actually crossed
//! the wire rather than what the client meant to send.

use std::net::SocketAddr;

use oneid_core::{Client, ClientConfig, RequestSpec, ResponseOutcome};
use serde_json::{json, Value};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Header values from an echo response, matched case-insensitively.
fn echoed_headers(echo: &Value, name: &str) -> Vec<String> {
    echo["headers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|pair| pair[0].as_str().unwrap().eq_ignore_ascii_case(name))
        .map(|pair| pair[1].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn resident_session_lifecycle() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap();

    // Step 1: wrong password. The 401 comes back as a value, not an error.
    let outcome = client.resident().login("alice", "wrong").unwrap();
    assert_eq!(outcome.status(), Some(401));
    assert_eq!(outcome.json().unwrap()["message"], "Invalid credentials.");

    // Step 2: profile without a token.
    let outcome = client.resident().get_profile().unwrap();
    assert_eq!(outcome.status(), Some(401));

    // Step 3: log in and attach the token.
    let outcome = client.resident().login("alice", "pw").unwrap();
    assert_eq!(outcome.status(), Some(200));
    let token = outcome.json().unwrap()["token"].as_str().unwrap().to_string();
    assert_eq!(token, "token-alice");
    let client = client.token(token);

    // Step 4: authenticated profile.
    let profile = client.resident().get_profile().unwrap();
    assert_eq!(profile.status(), Some(200));
    assert_eq!(profile.json().unwrap()["username"], "alice");

    // Step 5: empty 204 body.
    let outcome = client.resident().update_avatar("https://cdn.test/a.png").unwrap();
    assert_eq!(outcome, ResponseOutcome::EmptyOk { status: 204 });

    // Step 6: plain-text body degrades to a decode failure.
    let outcome = client.resident().hello().unwrap();
    assert_eq!(
        outcome,
        ResponseOutcome::DecodeFailure {
            status: 200,
            text: "hello, resident".to_string()
        }
    );
    assert_eq!(outcome.into_value(), Value::Null);

    // Step 7: register a second resident; duplicate registration is a 422 value.
    let registration = json!({
        "username": "bong",
        "password": "secret",
        "first_name": "Bong",
        "last_name": "Cruz"
    });
    let created = client.resident().register(&registration).unwrap();
    assert_eq!(created.status(), Some(201));
    let duplicate = client.resident().register(&registration).unwrap();
    assert_eq!(duplicate.status(), Some(422));
    assert!(duplicate.json().unwrap()["message"].is_string());
}

#[test]
fn certificate_download_is_byte_for_byte() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap().token("token-alice");

    let outcome = client.resident().download_certificate_application(1).unwrap();
    assert_eq!(outcome.status(), Some(200));
    assert_eq!(outcome.bytes(), Some(mock_server::SAMPLE_PDF));

    // Error statuses are not decoded either.
    let outcome = client.resident().download_certificate_application(2).unwrap();
    assert_eq!(
        outcome,
        ResponseOutcome::RawBytes {
            status: 404,
            body: b"certificate application not found".to_vec()
        }
    );
}

#[test]
fn reference_data() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}/")).unwrap();

    let genders = client.get_genders().unwrap();
    assert_eq!(genders.json().unwrap().as_array().unwrap().len(), 2);

    let bohol = client.get_municipalities(Some(5)).unwrap();
    let names: Vec<&str> = bohol
        .json()
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tagbilaran", "Panglao"]);

    let all = client.get_municipalities(None).unwrap();
    assert_eq!(all.json().unwrap().as_array().unwrap().len(), 3);

    let barangays = client.get_barangays(10).unwrap();
    assert_eq!(barangays.json().unwrap()[0]["name"], "Poblacion");

    let missing = client.get_barangays(999).unwrap();
    assert_eq!(missing.status(), Some(404));
    assert_eq!(missing.json().unwrap()["message"], "Municipality not found.");
}

#[test]
fn app_key_reaches_server_intact() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap();

    let outcome = client.app("a.b c").endpoint("ping").unwrap();
    let body = outcome.json().unwrap();
    assert_eq!(body["app_key"], "a.b c");
    assert_eq!(body["endpoint"], "ping");
    assert_eq!(body["method"], "GET");

    let outcome = client.app("org/app").post_json("rides/new", &json!({})).unwrap();
    let body = outcome.json().unwrap();
    assert_eq!(body["app_key"], "org/app");
    assert_eq!(body["endpoint"], "rides/new");
    assert_eq!(body["method"], "POST");

    // Reserved characters in the endpoint name stay in the path.
    let outcome = client.app("k").endpoint("x?y=1").unwrap();
    assert_eq!(outcome.json().unwrap()["endpoint"], "x?y=1");
    let outcome = client.app("k").endpoint("daily report").unwrap();
    assert_eq!(outcome.json().unwrap()["endpoint"], "daily report");
}

#[test]
fn redirects_come_back_as_the_response() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap().token("tok");

    let outcome = client.get("/redirect/old", &[]).unwrap();
    assert_eq!(outcome.status(), Some(302));
    assert_eq!(outcome.json(), Some(&json!({"moved": true})));

    let outcome = client.post_json("/redirect/old", &json!({"a": 1})).unwrap();
    assert_eq!(outcome.status(), Some(302));
}

#[test]
fn wire_headers_and_bodies() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap().token("tok");

    // JSON POST: one Authorization, exact Content-Length, body intact.
    let payload = json!({"amount": 250, "note": "ñ for niño"});
    let echo = client.post_json("/echo/json", &payload).unwrap().into_value();
    assert_eq!(echo["method"], "POST");
    assert_eq!(echoed_headers(&echo, "authorization"), vec!["Bearer tok"]);
    let sent = echo["body"].as_str().unwrap();
    assert_eq!(serde_json::from_str::<Value>(sent).unwrap(), payload);
    assert_eq!(echoed_headers(&echo, "content-length"), vec![sent.len().to_string()]);
    assert_eq!(echoed_headers(&echo, "content-type"), vec!["application/json"]);

    // GET with a query string.
    let echo = client
        .get("/echo/search", &[("name", "Juan dela Cruz"), ("page", "2")])
        .unwrap()
        .into_value();
    let query: Vec<(String, String)> = serde_urlencoded::from_str(echo["query"].as_str().unwrap()).unwrap();
    assert_eq!(
        query,
        vec![
            ("name".to_string(), "Juan dela Cruz".to_string()),
            ("page".to_string(), "2".to_string()),
        ]
    );
    assert_eq!(echo["body"], "");

    // GET without a query has none at all.
    let echo = client.get("/echo/plain", &[]).unwrap().into_value();
    assert_eq!(echo["query"], Value::Null);

    // Legacy form POST.
    let echo = client
        .post_form("/echo/form", &[("a", "1"), ("b", "x y")])
        .unwrap()
        .into_value();
    assert_eq!(echo["body"], "a=1&b=x+y");
    assert_eq!(
        echoed_headers(&echo, "content-type"),
        vec!["application/x-www-form-urlencoded"]
    );

    // Binary GET asks for PDF.
    let raw = client.get_binary("/echo/doc", &[]).unwrap();
    let echo: Value = serde_json::from_slice(raw.bytes().unwrap()).unwrap();
    assert_eq!(echoed_headers(&echo, "accept"), vec!["application/pdf"]);
}

#[test]
fn basic_auth_without_token() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}")).unwrap();

    let spec = RequestSpec::post_json("/echo/basic", json!({})).basic_auth("Aladdin", "open sesame");
    let echo = client.execute_json(&spec).unwrap().into_value();
    assert_eq!(
        echoed_headers(&echo, "authorization"),
        vec!["Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="]
    );
}

#[test]
fn unreachable_host_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = ClientConfig::new(&format!("http://{addr}")).unwrap().with_token("t");
    let client = Client::from_config(config);

    let outcome = client.get_genders().unwrap();
    assert!(outcome.is_transport_failure(), "{outcome:?}");
    assert_eq!(outcome.status(), None);

    let outcome = client.resident().login("alice", "pw").unwrap();
    assert!(outcome.is_transport_failure());
    assert_eq!(outcome.into_value(), Value::Null);
}

#![allow(clippy::unwrap_used)]
// Integration tests for `SdwanClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netaudit_api::{Error, SdwanClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SdwanClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    // Build through TransportConfig so the client owns a cookie jar,
    // matching production construction.
    let transport = TransportConfig {
        tls: netaudit_api::TlsMode::System,
        ..TransportConfig::default()
    };
    let client = SdwanClient::new(base_url, &transport).unwrap();
    (server, client)
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=admin"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=sess-xyz; Path=/; HttpOnly"),
        )
        .mount(server)
        .await;
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;
    mount_login(&server).await;

    client.login("admin", &secret("pw")).await.unwrap();
}

#[tokio::test]
async fn test_login_200_without_cookie_is_rejected() {
    let (server, client) = setup().await;

    // Wrong credentials: the controller answers 200 with an HTML login
    // page and no session cookie.
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Device listing tests ────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;
    mount_login(&server).await;

    let envelope = json!({
        "data": [
            {
                "host-name": "vedge-01",
                "device-model": "vedge-cloud",
                "version": "19.2.2",
                "uptime-date": 1_590_000_000_000_i64,
                "board-serial": "12345ABC"
            },
            {
                "host-name": "vsmart-01",
                "device-model": "vsmart",
                "version": "19.2.2",
                "uptime-date": null,
                "board-serial": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].host_name, "vedge-01");
    assert_eq!(devices[0].uptime_date, Some(1_590_000_000_000));
    assert_eq!(devices[1].board_serial, None);
}

#[tokio::test]
async fn test_collect_survives_logout_failure() {
    let (server, client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "host-name": "vbond-01",
                "device-model": "vbond",
                "version": "19.2.2",
                "uptime-date": 1_590_000_000_000_i64,
                "board-serial": "99ZZZ"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let devices = client.collect("admin", &secret("pw")).await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].host_name, "vbond-01");
}

#[tokio::test]
async fn test_collect_fails_on_auth_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.collect("admin", &secret("wrong")).await;

    assert!(matches!(result, Err(ref e) if e.is_auth_failure()));
}

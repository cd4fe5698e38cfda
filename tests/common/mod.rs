//! Shared fixtures: a mock SendSafely host, encrypted parts and a
//! config-driven operations context.

#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::ser::Serialize;
use pgp::types::StringToKey;
use pgp::Message;
use safely_config::Config;
use safely_events::{AppEvent, EventReceiver};
use safely_net::{NetClient, NetConfig};
use safely_ops::{OpsContextBuilder, OpsCtx};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

pub const API_KEY: &str = "it-key";
pub const API_SECRET: &str = "it-secret";
pub const SERVER_SECRET: &str = "serverSecretXYZ";
pub const KEY_CODE: &str = "keyCodeABC";
pub const PACKAGE_CODE: &str = "PKGCODE42";
pub const PACKAGE_ID: &str = "PKG-ID-1";

/// Encrypt `plaintext` the way the server stores a part
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let s2k = StringToKey::new_default(&mut rng);
    let password = passphrase.to_string();
    Message::new_literal_bytes("", plaintext)
        .encrypt_with_password(
            &mut rng,
            s2k,
            SymmetricKeyAlgorithm::AES128,
            move || password,
        )
        .expect("encrypt part")
        .to_bytes()
        .expect("serialize part")
}

/// A part encrypted with the package passphrase
pub fn part(plaintext: &[u8]) -> Vec<u8> {
    encrypt(plaintext, &format!("{SERVER_SECRET}{KEY_CODE}"))
}

pub fn share_url(server: &MockServer) -> String {
    format!(
        "{}/receive/?thread=THREAD-1&packageCode={PACKAGE_CODE}#keyCode={KEY_CODE}",
        server.base_url()
    )
}

/// Write a config file pointing at `server` with extra TOML appended
pub fn config_file(server: &MockServer, extra: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    write!(
        file,
        "[api]\nhost = \"{}\"\napi_key = \"{API_KEY}\"\napi_secret = \"{API_SECRET}\"\n\n\
         [network]\ntimeout = 10\nconnect_timeout = 5\n\n{extra}",
        server.base_url()
    )
    .expect("write config");
    file
}

/// Build an operations context the way the CLI does, from a config file
pub async fn context_from(config: &NamedTempFile) -> (OpsCtx, EventReceiver) {
    let config = Config::load_or_default(Some(config.path()))
        .await
        .expect("load config");
    let credentials = config.credentials().expect("credentials");
    let net = NetClient::new(credentials, &NetConfig::from(&config.network)).expect("client");
    let (tx, rx) = safely_events::channel();
    let ctx = OpsContextBuilder::new()
        .with_net(net)
        .with_event_sender(tx)
        .with_config(config)
        .build()
        .expect("ops context");
    (ctx, rx)
}

pub fn mock_package<'a>(server: &'a MockServer, files: Value) -> Mock<'a> {
    let body = json!({
        "packageId": PACKAGE_ID,
        "packageCode": PACKAGE_CODE,
        "serverSecret": SERVER_SECRET,
        "packageSender": "alice@example.com",
        "files": files,
    });
    server.mock(move |when, then| {
        when.method(GET)
            .path(format!("/api/v2.0/package/{PACKAGE_CODE}"))
            .header("ss-api-key", API_KEY)
            .header_exists("ss-request-signature");
        then.status(200).json_body(body);
    })
}

pub fn mock_part<'a>(
    server: &'a MockServer,
    file_id: &str,
    part: u32,
    status: u16,
    body: Vec<u8>,
) -> Mock<'a> {
    let path = format!("/api/v2.0/package/{PACKAGE_ID}/file/{file_id}/download/");
    let checksum = safely_signing::create_checksum(KEY_CODE, PACKAGE_CODE);
    server.mock(move |when, then| {
        when.method(POST)
            .path(path)
            .header("ss-api-key", API_KEY)
            .body_contains(format!("\"checksum\":\"{checksum}\""))
            .body_contains(format!("\"part\":\"{part}\""));
        then.status(status).body(body);
    })
}

pub fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        events.push(message.event);
    }
    events
}

//! Integration tests for ops crate

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use httpmock::Mock;
    use pgp::crypto::sym::SymmetricKeyAlgorithm;
    use pgp::ser::Serialize;
    use pgp::types::StringToKey;
    use pgp::Message;
    use safely_config::Config;
    use safely_errors::{Error, PackageError};
    use safely_events::{AppEvent, DownloadEvent, EventReceiver, GeneralEvent, PackageEvent};
    use safely_net::{NetClient, NetConfig};
    use safely_ops::{
        download_package, package_info, whoami, FileAssembler, FileStatus, OpsContextBuilder, OpsCtx,
        PartProgress,
    };
    use safely_types::{Credentials, ExistingOutput, PackageMetadata};
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const SERVER_SECRET: &str = "srvSecret";
    const KEY_CODE: &str = "kc123";
    const PACKAGE_CODE: &str = "pkgCode9";

    fn share_url(server: &MockServer) -> String {
        format!(
            "{}/receive/?thread=T-1&packageCode={PACKAGE_CODE}#keyCode={KEY_CODE}",
            server.base_url()
        )
    }

    fn encrypt(plaintext: &[u8], passphrase: &str) -> Vec<u8> {
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
            .unwrap()
            .to_bytes()
            .unwrap()
    }

    fn good_part(plaintext: &[u8]) -> Vec<u8> {
        encrypt(plaintext, &format!("{SERVER_SECRET}{KEY_CODE}"))
    }

    fn context(server: &MockServer, existing: ExistingOutput) -> (OpsCtx, EventReceiver) {
        let credentials = Credentials::new(server.base_url(), "key", "secret");
        let net = NetClient::new(credentials, &NetConfig::default()).unwrap();
        let (tx, rx) = safely_events::channel();
        let mut config = Config::default();
        config.download.existing = existing;

        let ctx = OpsContextBuilder::new()
            .with_net(net)
            .with_event_sender(tx)
            .with_config(config)
            .build()
            .unwrap();
        (ctx, rx)
    }

    fn mock_package<'a>(server: &'a MockServer, files: &serde_json::Value) -> Mock<'a> {
        let body = json!({
            "packageId": "PKG-1",
            "packageCode": PACKAGE_CODE,
            "serverSecret": SERVER_SECRET,
            "packageSender": "sender@example.com",
            "files": files,
        });
        server.mock(move |when, then| {
            when.method(GET)
                .path(format!("/api/v2.0/package/{PACKAGE_CODE}"));
            then.status(200).json_body(body);
        })
    }

    fn mock_part<'a>(
        server: &'a MockServer,
        file_id: &str,
        part: u32,
        status: u16,
        body: Vec<u8>,
    ) -> Mock<'a> {
        let path = format!("/api/v2.0/package/PKG-1/file/{file_id}/download/");
        server.mock(move |when, then| {
            when.method(POST)
                .path(path)
                .body_contains(format!("\"part\":\"{part}\""));
            then.status(status).body(body);
        })
    }

    fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(message) = rx.try_recv() {
            events.push(message.event);
        }
        events
    }

    #[tokio::test]
    async fn test_three_part_file_reassembled_in_order() {
        let server = MockServer::start();
        let package = mock_package(
            &server,
            &json!([{"fileId": "F-1", "fileName": "notes.txt", "fileSize": "15", "parts": 3}]),
        );
        let parts = [
            mock_part(&server, "F-1", 1, 200, good_part(b"first|")),
            mock_part(&server, "F-1", 2, 200, good_part(b"second|")),
            mock_part(&server, "F-1", 3, 200, good_part(b"end")),
        ];

        let dir = tempdir().unwrap();
        let (ctx, mut rx) = context(&server, ExistingOutput::Fail);
        let report = download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();

        package.assert();
        for part in &parts {
            part.assert_hits(1);
        }
        assert!(report.is_success());
        assert_eq!(report.package_sender, "sender@example.com");
        assert_eq!(report.bytes_written(), 16);
        assert_eq!(
            std::fs::read(dir.path().join("notes.txt")).unwrap(),
            b"first|second|end"
        );

        let progress: Vec<u64> = drain(&mut rx)
            .into_iter()
            .filter_map(|event| match event {
                AppEvent::Download(DownloadEvent::PartCompleted { bytes_written, .. }) => {
                    Some(bytes_written)
                }
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![6, 13, 16]);
    }

    #[tokio::test]
    async fn test_failing_part_stops_file_and_next_file_proceeds() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([
                {"fileId": "F-1", "fileName": "big.bin", "fileSize": "30", "parts": 3},
                {"fileId": "F-2", "fileName": "small.bin", "fileSize": "5", "parts": 1}
            ]),
        );
        let part1 = mock_part(&server, "F-1", 1, 200, good_part(b"part-one"));
        let part2 = mock_part(&server, "F-1", 2, 500, b"boom".to_vec());
        let part3 = mock_part(&server, "F-1", 3, 200, good_part(b"part-three"));
        let other = mock_part(&server, "F-2", 1, 200, good_part(b"small"));

        let dir = tempdir().unwrap();
        let (ctx, mut rx) = context(&server, ExistingOutput::Fail);
        let report = download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();

        part1.assert_hits(1);
        part2.assert_hits(1);
        part3.assert_hits(0);
        other.assert_hits(1);

        // Bytes from before the failure stay on disk
        assert_eq!(std::fs::read(dir.path().join("big.bin")).unwrap(), b"part-one");
        assert_eq!(std::fs::read(dir.path().join("small.bin")).unwrap(), b"small");

        assert!(!report.is_success());
        match &report.files[0].status {
            FileStatus::Failed(failure) => {
                assert_eq!(failure.code.as_deref(), Some("network.unexpected_status"));
                assert!(failure.message.contains("500"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(matches!(report.files[1].status, FileStatus::Downloaded(_)));

        let failed = drain(&mut rx)
            .into_iter()
            .filter(|event| matches!(event, AppEvent::Download(DownloadEvent::Failed { .. })))
            .count();
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_wrong_passphrase_is_decryption_failure() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([{"fileId": "F-1", "fileName": "x.bin", "fileSize": "3", "parts": 2}]),
        );
        mock_part(&server, "F-1", 1, 200, encrypt(b"abc", "not-the-passphrase"));
        let part2 = mock_part(&server, "F-1", 2, 200, good_part(b"def"));

        let dir = tempdir().unwrap();
        let (ctx, _rx) = context(&server, ExistingOutput::Fail);
        let report = download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();

        part2.assert_hits(0);
        match &report.files[0].status {
            FileStatus::Failed(failure) => {
                assert_eq!(failure.code.as_deref(), Some("crypto.decryption_failed"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(std::fs::read(dir.path().join("x.bin")).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_malformed_link_makes_no_request() {
        let server = MockServer::start();
        let package = mock_package(&server, &json!([]));

        let dir = tempdir().unwrap();
        let (ctx, _rx) = context(&server, ExistingOutput::Fail);
        let url = format!("{}/receive/?thread=T-1&packageCode={PACKAGE_CODE}", server.base_url());
        let result = download_package(&ctx, &url, &[], dir.path()).await;

        assert!(matches!(
            result,
            Err(Error::Package(PackageError::MalformedShareUrl { .. }))
        ));
        package.assert_hits(0);
    }

    #[tokio::test]
    async fn test_selection_out_of_range_downloads_nothing() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([{"fileId": "F-1", "fileName": "a", "fileSize": "1", "parts": 1}]),
        );
        let part = mock_part(&server, "F-1", 1, 200, good_part(b"a"));

        let dir = tempdir().unwrap();
        let (ctx, mut rx) = context(&server, ExistingOutput::Fail);
        let result = download_package(&ctx, &share_url(&server), &[0, 1], dir.path()).await;

        assert!(matches!(
            result,
            Err(Error::Package(PackageError::FileIndexOutOfRange { index: 1, count: 1 }))
        ));
        part.assert_hits(0);

        let events = drain(&mut rx);
        assert!(matches!(
            events.last(),
            Some(AppEvent::General(GeneralEvent::OperationFailed { operation, .. }))
                if operation == "download"
        ));
        assert!(!events.iter().any(|e| matches!(
            e,
            AppEvent::General(GeneralEvent::OperationCompleted { .. })
        )));
    }

    #[tokio::test]
    async fn test_duplicate_selection_warns_once_and_downloads_once() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([{"fileId": "F-1", "fileName": "a.txt", "fileSize": "1", "parts": 1}]),
        );
        let part = mock_part(&server, "F-1", 1, 200, good_part(b"a"));

        let dir = tempdir().unwrap();
        let (ctx, mut rx) = context(&server, ExistingOutput::Fail);
        let report = download_package(&ctx, &share_url(&server), &[0, 0, 0], dir.path())
            .await
            .unwrap();

        part.assert_hits(1);
        assert_eq!(report.files.len(), 1);
        let warnings: Vec<String> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::General(GeneralEvent::Warning { message, .. }) => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(warnings, vec!["2 duplicate file index(es) ignored".to_string()]);
    }

    #[tokio::test]
    async fn test_package_info_lists_files_with_indices() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([
                {"fileId": "F-1", "fileName": "a.txt", "fileSize": "2048",
                 "fileUploadedStr": "Jan 2, 2024", "parts": 1},
                {"fileId": "F-2", "fileName": "b.txt", "fileSize": "7", "parts": 2},
            ]),
        );
        let part = mock_part(&server, "F-1", 1, 200, good_part(b"a"));

        let (ctx, mut rx) = context(&server, ExistingOutput::Fail);
        let summary = package_info(&ctx, &share_url(&server)).await.unwrap();

        part.assert_hits(0);
        assert_eq!(summary.package_sender, "sender@example.com");
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.files[0].size, "2.0 KiB");
        assert_eq!(summary.files[0].uploaded, "Jan 2, 2024");
        assert_eq!(summary.files[1].index, 1);
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            AppEvent::Package(PackageEvent::Resolved { total_parts: 3, .. })
        )));
    }

    #[tokio::test]
    async fn test_existing_output_policies() {
        let server = MockServer::start();
        mock_package(
            &server,
            &json!([{"fileId": "F-1", "fileName": "out.txt", "fileSize": "3", "parts": 1}]),
        );
        let part = mock_part(&server, "F-1", 1, 200, good_part(b"new"));

        let dir = tempdir().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, b"old").unwrap();

        let (ctx, _rx) = context(&server, ExistingOutput::Fail);
        let report = download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();
        assert!(matches!(
            &report.files[0].status,
            FileStatus::Failed(failure) if failure.code.as_deref() == Some("package.output_exists")
        ));
        part.assert_hits(0);
        assert_eq!(std::fs::read(&target).unwrap(), b"old");

        let (ctx, _rx) = context(&server, ExistingOutput::Append);
        download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"oldnew");

        let (ctx, _rx) = context(&server, ExistingOutput::Truncate);
        download_package(&ctx, &share_url(&server), &[], dir.path())
            .await
            .unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_assembler_reports_cumulative_progress() {
        let server = MockServer::start();
        mock_part(&server, "F-1", 1, 200, good_part(b"12345"));
        mock_part(&server, "F-1", 2, 200, good_part(b"678"));

        let (ctx, _rx) = context(&server, ExistingOutput::Fail);
        let metadata = PackageMetadata::new("T-1", PACKAGE_CODE, KEY_CODE);
        let package: safely_types::Package = serde_json::from_value(json!({
            "packageId": "PKG-1",
            "packageCode": PACKAGE_CODE,
            "serverSecret": SERVER_SECRET,
            "files": [{"fileId": "F-1", "fileName": "f", "fileSize": "8", "parts": 2}],
        }))
        .unwrap();

        let dir = tempdir().unwrap();
        let target = dir.path().join("f");
        let seen = Mutex::new(Vec::new());
        let observer: &(dyn Fn(PartProgress) + Send + Sync) =
            &|progress| seen.lock().unwrap().push(progress);

        let done = FileAssembler::new(&ctx.net)
            .download_file(&metadata, &package, &package.files[0], &target, Some(observer))
            .await
            .unwrap();

        assert_eq!(done.bytes_written, 8);
        assert_eq!(done.parts, 2);
        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen.iter().map(|p| (p.part, p.bytes_written)).collect::<Vec<_>>(),
            vec![(1, 5), (2, 8)]
        );
    }

    #[tokio::test]
    async fn test_whoami() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v2.0/user/");
            then.status(200)
                .json_body(json!({"email": "me@example.com", "firstName": "Me"}));
        });

        let (ctx, _rx) = context(&server, ExistingOutput::Fail);
        let user = whoami(&ctx).await.unwrap();
        assert_eq!(user.email, "me@example.com");
        assert_eq!(user.display_name(), "Me");
    }
}

//! Integration tests for error types

#[cfg(test)]
mod tests {
    use safely_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::UnexpectedStatus { status: 404 };
        let err: Error = net_err.into();
        assert!(matches!(
            err,
            Error::Network(NetworkError::UnexpectedStatus { status: 404 })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = NetworkError::UnexpectedStatus { status: 403 };
        assert_eq!(err.to_string(), "unexpected HTTP status 403");

        let err = CryptoError::decryption_failed("passphrase rejected");
        assert_eq!(err.to_string(), "decryption failed: passphrase rejected");
    }

    #[test]
    fn test_transport_error_is_retryable() {
        let err: Error = NetworkError::Transport("connection refused".into()).into();
        assert!(err.is_retryable());
        assert_eq!(err.user_code(), Some("network.transport"));
    }

    #[test]
    fn test_user_facing_hints() {
        let err: Error = NetworkError::UnexpectedStatus { status: 401 }.into();
        assert!(err.user_hint().is_some());
        assert_eq!(err.user_code(), Some("network.unexpected_status"));
        assert!(!err.is_retryable());

        let err: Error = NetworkError::UnexpectedStatus { status: 503 }.into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_json_error_maps_to_malformed_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(
            err,
            Error::Network(NetworkError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_io_error_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        let err = Error::io_with_path(&io, "/tmp/out.bin");
        assert!(err.user_message().contains("/tmp/out.bin"));
    }
}

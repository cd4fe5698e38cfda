//! Signed HTTP client

use reqwest::{header::CONTENT_TYPE, Client, Method, Response, StatusCode};
use safely_config::NetworkConfig;
use safely_errors::{Error, NetworkError};
use safely_signing::RequestSigner;
use safely_types::{Credentials, API_PREFIX};
use std::time::Duration;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300), // 5 minutes for large parts
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("safely/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&NetworkConfig> for NetConfig {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
            ..Self::default()
        }
    }
}

/// HTTP client that signs every request with the account's API key pair
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    credentials: Credentials,
    signer: RequestSigner,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(credentials: Credentials, config: &NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        let signer = RequestSigner::from_credentials(&credentials);
        Ok(Self {
            client,
            credentials,
            signer,
        })
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send a signed request and return the response if the status is 200.
    ///
    /// `path` is relative to the API prefix (`/user/`, `/package/{code}`).
    /// The signed path and the request URL both carry the prefix, and the
    /// signed body is exactly the body sent.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Transport` when no response arrives and
    /// `NetworkError::UnexpectedStatus` for any status other than 200.
    pub async fn signed_request(
        &self,
        method: Method,
        path: &str,
        body: Vec<u8>,
    ) -> Result<Response, Error> {
        let signed_path = format!("{API_PREFIX}{path}");
        let url = format!("{}{signed_path}", self.credentials.host());
        let headers = self.signer.sign(&signed_path, &body);

        debug!(method = %method, path = %signed_path, "Sending signed request");

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in headers.pairs() {
            request = request.header(name, value);
        }

        let response = request.body(body).send().await.map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), path = %signed_path, "Request rejected");
            return Err(NetworkError::UnexpectedStatus {
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response)
    }
}

impl std::fmt::Debug for NetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

pub(crate) fn transport_error(error: reqwest::Error) -> Error {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    };
    NetworkError::Transport(message).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_config_from_file_config() {
        let file_config = NetworkConfig {
            timeout: 12,
            connect_timeout: 3,
        };
        let config = NetConfig::from(&file_config);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(config.user_agent.starts_with("safely/"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = NetClient::new(
            Credentials::new("https://files.example.com", "key", "hunter2"),
            &NetConfig::default(),
        )
        .unwrap();
        assert!(!format!("{client:?}").contains("hunter2"));
    }
}

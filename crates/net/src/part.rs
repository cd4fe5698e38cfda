//! Encrypted part retrieval

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::{Method, Response};
use safely_errors::Error;
use safely_types::DOWNLOAD_API;
use serde::Serialize;

use crate::client::{transport_error, NetClient};

/// Body of a part download request.
///
/// Field order is the wire order: `api`, `checksum`, `part`.
#[derive(Debug, Clone, Serialize)]
pub struct PartRequest<'a> {
    pub api: &'static str,
    pub checksum: &'a str,
    pub part: String,
}

impl<'a> PartRequest<'a> {
    #[must_use]
    pub fn new(checksum: &'a str, part: u32) -> Self {
        Self {
            api: DOWNLOAD_API,
            checksum,
            part: part.to_string(),
        }
    }

    /// Serialized request body; these bytes are both signed and sent.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_body(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Undecoded body of one encrypted part
#[derive(Debug)]
pub struct PartBody {
    response: Response,
}

impl PartBody {
    /// Collect the whole ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Transport` if the body cannot be read to the end.
    pub async fn into_bytes(self) -> Result<Bytes, Error> {
        self.response.bytes().await.map_err(transport_error)
    }

    /// Consume the ciphertext chunk by chunk.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Error>> {
        self.response
            .bytes_stream()
            .map(|chunk| chunk.map_err(transport_error))
    }
}

impl NetClient {
    /// `POST /package/{packageId}/file/{fileId}/download/` for one 1-based part.
    ///
    /// The response is handed back unread so the caller decides whether to
    /// stream or collect it.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Transport` if no response arrives and
    /// `NetworkError::UnexpectedStatus` for any status other than 200.
    pub async fn fetch_part(
        &self,
        package_id: &str,
        file_id: &str,
        part: u32,
        checksum: &str,
    ) -> Result<PartBody, Error> {
        let path = format!("/package/{package_id}/file/{file_id}/download/");
        let body = PartRequest::new(checksum, part).to_body()?;

        tracing::debug!(file_id, part, "Fetching part");
        let response = self.signed_request(Method::POST, &path, body).await?;
        Ok(PartBody { response })
    }
}

//! Account and package lookups

use reqwest::{Method, Response};
use safely_errors::{Error, NetworkError};
use safely_types::{Package, UserInformation};
use serde::de::DeserializeOwned;

use crate::client::{transport_error, NetClient};

impl NetClient {
    /// `GET /user/`: the account the API key belongs to
    ///
    /// # Errors
    ///
    /// Returns a network error for transport failures or non-200 statuses,
    /// and `MalformedResponse` if the body is not a user record.
    pub async fn user_information(&self) -> Result<UserInformation, Error> {
        let response = self.signed_request(Method::GET, "/user/", Vec::new()).await?;
        decode_json(response).await
    }

    /// `GET /package/{packageCode}`: the package descriptor, including the
    /// server secret and the file list.
    ///
    /// # Errors
    ///
    /// Returns a network error for transport failures or non-200 statuses,
    /// and `MalformedResponse` if the body is not a package descriptor.
    pub async fn get_package(&self, package_code: &str) -> Result<Package, Error> {
        let path = format!("/package/{package_code}");
        let response = self.signed_request(Method::GET, &path, Vec::new()).await?;
        let package: Package = decode_json(response).await?;
        tracing::debug!(
            package_id = %package.package_id,
            files = package.files.len(),
            "Fetched package"
        );
        Ok(package)
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body)
        .map_err(|e| NetworkError::MalformedResponse(e.to_string()).into())
}

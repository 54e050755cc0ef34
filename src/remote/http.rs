use super::types::{
    ApiEnvelope, FileUpload, FileVersionPage, RemoteFileContent, SourceDescriptor,
};
use super::{RemoteError, RemoteSource};
use crate::config::RemoteConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Timeout for every remote call (generous for slow networks)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed client for the remote version-control service.
///
/// Two bearer tokens are carried: the sync token authenticates read/sync
/// endpoints, the upload token authenticates file uploads.
pub struct HttpRemoteClient {
    base_url: String,
    sync_token: String,
    upload_token: String,
    client: reqwest::Client,
}

impl HttpRemoteClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        if config.base_url.is_empty() {
            return Err(RemoteError::InvalidConfig(
                "remote base URL is empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sync_token: config.sync_token.clone(),
            upload_token: config.upload_token.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Unwrap the `{data: ...}` envelope, mapping 404 to `NotFound` and any
    /// other non-success status to `Upstream` with the body as message.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        let envelope: ApiEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

/// Payload of `POST /file-versions/version`
#[derive(Debug, Deserialize)]
struct SingleContent {
    content: String,
}

#[async_trait]
impl RemoteSource for HttpRemoteClient {
    async fn list_sources(&self) -> Result<Vec<SourceDescriptor>, RemoteError> {
        let response = self
            .client
            .get(self.url("sources"))
            .bearer_auth(&self.sync_token)
            .send()
            .await?;
        Self::decode(response, "sources").await
    }

    async fn list_file_versions(
        &self,
        source_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<FileVersionPage, RemoteError> {
        let response = self
            .client
            .get(self.url("file-versions"))
            .bearer_auth(&self.sync_token)
            .query(&[
                ("sourceId", source_id.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        Self::decode(response, source_id).await
    }

    async fn fetch_contents(
        &self,
        source_id: &str,
        file_paths: &[String],
    ) -> Result<Vec<RemoteFileContent>, RemoteError> {
        let response = self
            .client
            .post(self.url("file-versions/contents"))
            .bearer_auth(&self.sync_token)
            .json(&json!({ "sourceId": source_id, "files": file_paths }))
            .send()
            .await?;
        Self::decode(response, source_id).await
    }

    async fn fetch_single_content(
        &self,
        source_id: &str,
        relative_path: &str,
    ) -> Result<String, RemoteError> {
        let response = self
            .client
            .post(self.url("file-versions/version"))
            .bearer_auth(&self.sync_token)
            .json(&json!({ "sourceId": source_id, "filePath": relative_path }))
            .send()
            .await?;
        let payload: SingleContent = Self::decode(response, relative_path).await?;
        Ok(payload.content)
    }

    async fn push_file(&self, upload: &FileUpload) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url("file-versions"))
            .bearer_auth(&self.upload_token)
            .json(upload)
            .send()
            .await?;
        let _ack: serde_json::Value = Self::decode(response, &upload.file_path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_base_url() {
        let config = RemoteConfig::default();
        assert!(matches!(
            HttpRemoteClient::new(&config),
            Err(RemoteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = RemoteConfig {
            base_url: "https://vc.example.com/api/".to_string(),
            sync_token: "t1".to_string(),
            upload_token: "t2".to_string(),
        };
        let client = HttpRemoteClient::new(&config).expect("Should build");
        assert_eq!(client.url("sources"), "https://vc.example.com/api/sources");
    }
}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::ClientError;
use crate::features::auth::dtos::{AuthStatusDto, LoginRequestDto};
use crate::features::files::dtos::{
    CreateFileDto, FileListQuery, FileListResponse, FileWithRefs, UploadedFile,
};
use crate::features::references::dtos::ReferenceListDto;

/// Metadata plus bytes for one upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub metadata: CreateFileDto,
    pub file: UploadedFile,
}

/// Calls a front end makes against the file repository
#[async_trait]
pub trait FilesApi: Send + Sync {
    async fn list_files(&self, query: &FileListQuery) -> Result<FileListResponse, ClientError>;

    async fn upload_file(&self, request: UploadRequest) -> Result<FileWithRefs, ClientError>;

    async fn delete_file(&self, id: Uuid) -> Result<(), ClientError>;

    async fn list_references(&self) -> Result<ReferenceListDto, ClientError>;

    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthStatusDto, ClientError>;

    async fn logout(&self) -> Result<AuthStatusDto, ClientError>;

    async fn auth_status(&self) -> Result<AuthStatusDto, ClientError>;
}

/// [`FilesApi`] over HTTP; the session cookie lives in the client's cookie store
pub struct HttpFilesApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpFilesApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a success body, or classify the failure
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(|e| ClientError::Server {
            status: status.as_u16(),
            message: format!("Failed to parse response: {}", e),
        });
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Request failed with {}: {}", status, body);
    Err(ClientError::from_response(status.as_u16(), &body))
}

#[async_trait]
impl FilesApi for HttpFilesApi {
    async fn list_files(&self, query: &FileListQuery) -> Result<FileListResponse, ClientError> {
        let response = self
            .http_client
            .get(self.url("/api/files"))
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    async fn upload_file(&self, request: UploadRequest) -> Result<FileWithRefs, ClientError> {
        let UploadRequest { metadata, file } = request;

        let form = Form::new()
            .text("title", metadata.title)
            .text("description", metadata.description)
            .text("subject", metadata.subject)
            .text("grade", metadata.grade)
            .text("semester", metadata.semester)
            .part("file", Part::bytes(file.data).file_name(file.filename));

        let response = self
            .http_client
            .post(self.url("/api/files"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_file(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/files/{}", id)))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_response(status.as_u16(), &body))
    }

    async fn list_references(&self) -> Result<ReferenceListDto, ClientError> {
        let response = self
            .http_client
            .get(self.url("/api/references"))
            .send()
            .await?;
        decode(response).await
    }

    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthStatusDto, ClientError> {
        let response = self
            .http_client
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    async fn logout(&self) -> Result<AuthStatusDto, ClientError> {
        let response = self
            .http_client
            .post(self.url("/api/auth/logout"))
            .send()
            .await?;
        decode(response).await
    }

    async fn auth_status(&self) -> Result<AuthStatusDto, ClientError> {
        let response = self
            .http_client
            .get(self.url("/api/auth/status"))
            .send()
            .await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let api = HttpFilesApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.url("/api/files"), "http://localhost:3000/api/files");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let api = HttpFilesApi::new("http://127.0.0.1:9").unwrap();
        let err = api.list_files(&FileListQuery::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}

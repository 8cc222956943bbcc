//! Google Secret Manager provider
//!
//! Reads the latest version of a secret over the Secret Manager REST API.
//! The access token for that call comes from the GCE metadata server, which
//! is available to every Cloud Run / Cloud Functions instance.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{CredentialError, CredentialProvider};

const SECRET_MANAGER_API: &str = "https://secretmanager.googleapis.com";
const METADATA_SERVER: &str = "http://metadata.google.internal";
const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Provider reading `projects/{project}/secrets/{secret}/versions/latest`
#[derive(Debug, Clone)]
pub struct SecretManagerProvider {
    client: Client,
    project_id: Option<String>,
    secret_name: String,
    api_base: String,
    metadata_base: String,
}

impl SecretManagerProvider {
    /// Creates a provider using the public Secret Manager and metadata endpoints
    ///
    /// A missing project is reported when a token is requested, not here.
    pub fn new(client: Client, project_id: Option<String>, secret_name: impl Into<String>) -> Self {
        Self {
            client,
            project_id,
            secret_name: secret_name.into(),
            api_base: SECRET_MANAGER_API.to_string(),
            metadata_base: METADATA_SERVER.to_string(),
        }
    }

    /// Overrides the Secret Manager and metadata base URLs
    pub fn with_endpoints(
        mut self,
        api_base: impl Into<String>,
        metadata_base: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.metadata_base = metadata_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Full resource name of the latest secret version
    fn version_name(&self, project_id: &str) -> String {
        format!(
            "projects/{}/secrets/{}/versions/latest",
            project_id, self.secret_name
        )
    }

    /// Fetches an OAuth access token for the instance's service account
    async fn access_token(&self) -> Result<String, CredentialError> {
        let url = format!("{}{}", self.metadata_base, METADATA_TOKEN_PATH);

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| CredentialError::Unreachable(format!("metadata server: {}", e)))?;

        if !response.status().is_success() {
            return Err(CredentialError::Unreachable(format!(
                "metadata server returned status {}",
                response.status().as_u16()
            )));
        }

        let token = response
            .json::<MetadataToken>()
            .await
            .map_err(|e| CredentialError::Unreachable(format!("metadata token: {}", e)))?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl CredentialProvider for SecretManagerProvider {
    async fn get_token(&self) -> Result<String, CredentialError> {
        let project_id = self
            .project_id
            .as_deref()
            .ok_or(CredentialError::MissingConfiguration("PROJECT_ID"))?;

        let name = self.version_name(project_id);
        tracing::debug!("Accessing secret {}", name);

        let access_token = self.access_token().await?;

        let url = format!("{}/v1/{}:access", self.api_base, name);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| CredentialError::Unreachable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(CredentialError::NotFound(name)),
            status => {
                return Err(CredentialError::Unreachable(format!(
                    "Secret Manager returned status {} for {}",
                    status.as_u16(),
                    name
                )));
            }
        }

        let version = response
            .json::<AccessSecretVersionResponse>()
            .await
            .map_err(|e| CredentialError::InvalidPayload(e.to_string()))?;

        let bytes = STANDARD
            .decode(version.payload.data.as_bytes())
            .map_err(|e| CredentialError::InvalidPayload(e.to_string()))?;
        let token = String::from_utf8(bytes)
            .map_err(|_| CredentialError::InvalidPayload("payload is not UTF-8".to_string()))?;

        // Secrets created with `echo` carry a trailing newline.
        let token = token.trim_end().to_string();
        if token.is_empty() {
            return Err(CredentialError::InvalidPayload(format!("{} is empty", name)));
        }

        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET_PATH: &str = "/v1/projects/my-project/secrets/github_token/versions/latest:access";

    fn provider_for(server: &MockServer, project: Option<&str>) -> SecretManagerProvider {
        SecretManagerProvider::new(
            Client::new(),
            project.map(str::to_string),
            "github_token",
        )
        .with_endpoints(server.uri(), server.uri())
    }

    async fn mount_metadata(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(METADATA_TOKEN_PATH))
            .and(header("Metadata-Flavor", "Google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.test",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_reads_and_decodes_latest_version() {
        let server = MockServer::start().await;
        mount_metadata(&server).await;
        Mock::given(method("GET"))
            .and(path(SECRET_PATH))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/123/secrets/github_token/versions/4",
                "payload": { "data": STANDARD.encode("ghp_secret\n") }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = provider_for(&server, Some("my-project"))
            .get_token()
            .await
            .unwrap();

        assert_eq!(token, "ghp_secret");
    }

    #[tokio::test]
    async fn test_missing_project_makes_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider_for(&server, None)
            .get_token()
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "PROJECT_ID not set");
    }

    #[tokio::test]
    async fn test_missing_secret_is_not_found() {
        let server = MockServer::start().await;
        mount_metadata(&server).await;
        Mock::given(method("GET"))
            .and(path(SECRET_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("my-project"))
            .get_token()
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_metadata_failure_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(METADATA_TOKEN_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("my-project"))
            .get_token()
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_empty_payload_is_invalid() {
        let server = MockServer::start().await;
        mount_metadata(&server).await;
        Mock::given(method("GET"))
            .and(path(SECRET_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/123/secrets/github_token/versions/1",
                "payload": { "data": "" }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("my-project"))
            .get_token()
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::InvalidPayload(_)));
    }
}

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the CouchDB REST API.
//!
//! [`CouchClient`] owns a pooled `reqwest::Client`, attaches the JSON content
//! type and optional basic auth to every request, and hands back the status
//! together with the decoded body. It never retries.

use echolalia_core::EcholaliaError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::debug;

use crate::settings::Credentials;

/// Status and decoded body of one CouchDB response.
#[derive(Debug, Clone)]
pub struct CouchResponse {
    pub status: StatusCode,
    /// Parsed JSON body. Empty bodies decode to `null`, non-JSON bodies to a string.
    pub body: serde_json::Value,
}

impl CouchResponse {
    /// Return the body if the status matches `expected`, otherwise a `RemoteRequest` error.
    pub fn expect_status(self, expected: StatusCode) -> Result<serde_json::Value, EcholaliaError> {
        if self.status == expected {
            Ok(self.body)
        } else {
            Err(self.into_error())
        }
    }

    /// Convert into a `RemoteRequest` error carrying the server's body.
    pub fn into_error(self) -> EcholaliaError {
        EcholaliaError::RemoteRequest {
            status: self.status.as_u16(),
            body: self.body,
        }
    }
}

/// HTTP client bound to a single CouchDB server.
#[derive(Debug)]
pub struct CouchClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl CouchClient {
    /// Build a client for `base_url`, authenticating with `credentials` when present.
    pub fn new(
        base_url: String,
        credentials: Option<Credentials>,
    ) -> Result<Self, EcholaliaError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| EcholaliaError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `PUT /{path}` without a body.
    pub async fn put(&self, path: &str) -> Result<CouchResponse, EcholaliaError> {
        self.send(self.request(Method::PUT, path)).await
    }

    /// `POST /{path}` with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<CouchResponse, EcholaliaError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// `GET /{path}`.
    pub async fn get(&self, path: &str) -> Result<CouchResponse, EcholaliaError> {
        self.send(self.request(Method::GET, path)).await
    }

    /// `DELETE /{path}`.
    pub async fn delete(&self, path: &str) -> Result<CouchResponse, EcholaliaError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<CouchResponse, EcholaliaError> {
        let response = builder.send().await.map_err(|e| EcholaliaError::Transport {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await.map_err(|e| EcholaliaError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, path = %url, "CouchDB response received");

        Ok(CouchResponse {
            status,
            body: decode_body(&text),
        })
    }
}

fn decode_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CouchSettings;
    use echolalia_config::CouchDbConfig;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, auth: bool) -> CouchClient {
        let mut config = CouchDbConfig {
            host: Some(server.address().ip().to_string()),
            port: Some(server.address().port()),
            ..Default::default()
        };
        if auth {
            config.user = Some("admin".into());
            config.password = Some("secret".into());
        }
        let settings = CouchSettings::from_config(&config).unwrap();
        CouchClient::new(settings.base_url(), settings.credentials).unwrap()
    }

    #[test]
    fn decode_body_variants() {
        assert_eq!(decode_body(""), serde_json::Value::Null);
        assert_eq!(decode_body("{\"ok\":true}"), json!({"ok": true}));
        assert_eq!(decode_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[tokio::test]
    async fn sends_content_type_and_basic_auth() {
        let server = MockServer::start().await;

        // admin:secret
        Mock::given(method("GET"))
            .and(path("/_all_dbs"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a"])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, true);
        let response = client.get("_all_dbs").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!(["a"]));
    }

    #[tokio::test]
    async fn omits_auth_without_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/mydb"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/mydb"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server, false);
        let response = client.put("mydb").await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn expect_status_wraps_body_in_error() {
        let server = MockServer::start().await;
        let body = json!({"error": "file_exists", "reason": "The database could not be created, the file already exists."});

        Mock::given(method("PUT"))
            .and(path("/dup"))
            .respond_with(ResponseTemplate::new(412).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server, false);
        let err = client
            .put("dup")
            .await
            .unwrap()
            .expect_status(StatusCode::CREATED)
            .unwrap_err();
        match err {
            EcholaliaError::RemoteRequest { status, body: got } => {
                assert_eq!(status, 412);
                assert_eq!(got, body);
            }
            other => panic!("expected RemoteRequest, got: {other}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Grab a free port, then release it so nothing is listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = CouchDbConfig {
            host: Some("127.0.0.1".into()),
            port: Some(port),
            ..Default::default()
        };
        let settings = CouchSettings::from_config(&config).unwrap();
        let client = CouchClient::new(settings.base_url(), settings.credentials).unwrap();

        let err = client.get("_all_dbs").await.unwrap_err();
        assert!(matches!(err, EcholaliaError::Transport { .. }), "got: {err}");
    }
}

//! # ToDD Server API Client
//!
//! File: cli/src/common/api.rs
//!
//! ## Overview
//!
//! Fetches records from the ToDD server and decodes them into [`Resource`]s.
//! This is the only module that performs network I/O; the presentation code
//! only ever sees decoded values.
//!
//! ## Endpoints
//!
//! | Call                          | Request                          | Body                       |
//! |-------------------------------|----------------------------------|----------------------------|
//! | [`ApiClient::agents`]         | `GET /v1/agent`                  | array of agent adverts     |
//! | [`ApiClient::agents`] (uuid)  | `GET /v1/agent?uuid=<UUID>`      | array with zero or one     |
//! | [`ApiClient::groups`]         | `GET /v1/groups`                 | object `{uuid: group}`     |
//!
//! A `null` body decodes as "no records"; a `null` element of an agent array
//! becomes [`Resource::Null`].
//!
//! The `decode_*` functions are shared with `--input`, which feeds a saved
//! response body through the same path without touching the network.
//!
use crate::core::config::ServerConfig;
use crate::core::error::{Result, ToddError};
use crate::resource::{AgentAdvert, GroupAssignment, Resource};
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client bound to one ToDD server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Builds a client for `server`.
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: format!("http://{}:{}", server.host, server.port),
            http,
        })
    }

    /// Lists all agents, or looks one up by `uuid`.
    pub async fn agents(&self, uuid: Option<&str>) -> Result<Vec<Resource>> {
        let url = format!("{}/v1/agent", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(uuid) = uuid {
            request = request.query(&[("uuid", uuid)]);
        }
        let body = self.fetch(request, &url).await?;
        decode_agents(&body)
    }

    /// Lists agent group assignments.
    pub async fn groups(&self) -> Result<Vec<Resource>> {
        let url = format!("{}/v1/groups", self.base_url);
        let body = self.fetch(self.http.get(&url), &url).await?;
        decode_groups(&body)
    }

    async fn fetch(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Vec<u8>> {
        info!("Requesting {}", url);
        let response = request.send().await.map_err(|e| {
            anyhow!(ToddError::Api(format!("Failed to connect to {}: {}", url, e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(ToddError::Api(format!(
                "Server returned HTTP status {} for {}",
                status, url
            ))));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| anyhow!(ToddError::Api(format!("Failed to read response body: {}", e))))?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// Decodes a `/v1/agent` response body.
pub fn decode_agents(body: &[u8]) -> Result<Vec<Resource>> {
    let records: Option<Vec<Option<AgentAdvert>>> = serde_json::from_slice(body)
        .map_err(|e| anyhow!(ToddError::Decode(format!("agent list: {}", e))))?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(|record| record.map_or(Resource::Null, Resource::from))
        .collect())
}

/// Decodes a `/v1/groups` response body.
pub fn decode_groups(body: &[u8]) -> Result<Vec<Resource>> {
    let map: Option<BTreeMap<String, String>> = serde_json::from_slice(body)
        .map_err(|e| anyhow!(ToddError::Decode(format!("group map: {}", e))))?;
    Ok(GroupAssignment::from_map(map.unwrap_or_default())
        .into_iter()
        .map(Resource::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    #[test]
    fn test_decode_agents() {
        let body = br#"[{"Uuid": "abc", "Facts": {"os": "linux"}}, null]"#;
        let resources = decode_agents(body).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].identifier(), "abc");
        assert_eq!(resources[1], Resource::Null);
    }

    #[test]
    fn test_decode_null_and_empty_bodies() {
        assert!(decode_agents(b"null").unwrap().is_empty());
        assert!(decode_agents(b"[]").unwrap().is_empty());
        assert!(decode_groups(b"null").unwrap().is_empty());
        assert!(decode_groups(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_groups() {
        let resources = decode_groups(br#"{"bbb": "uraj", "aaa": "datacenter"}"#).unwrap();
        assert_eq!(
            resources,
            vec![
                Resource::Group(GroupAssignment {
                    uuid: "aaa".into(),
                    group: "datacenter".into()
                }),
                Resource::Group(GroupAssignment {
                    uuid: "bbb".into(),
                    group: "uraj".into()
                }),
            ]
        );
    }

    #[test]
    fn test_decode_garbage_is_a_decode_error() {
        let err = decode_agents(b"<html>").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToddError>(),
            Some(ToddError::Decode(_))
        ));
    }

    /// Serves `router` on an ephemeral port and returns a client pointed at it.
    async fn serve(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(&ServerConfig {
            host: "127.0.0.1".into(),
            port,
            timeout_secs: 5,
        })
        .unwrap()
    }

    async fn agent_handler(
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        let all = serde_json::json!([
            {"Uuid": "aaa111", "DefaultAddr": "10.0.0.1", "Expires": "30s"},
            {"Uuid": "bbb222", "DefaultAddr": "10.0.0.2", "Expires": "30s"}
        ]);
        match params.get("uuid") {
            Some(uuid) => {
                let matching: Vec<_> = all
                    .as_array()
                    .unwrap()
                    .iter()
                    .filter(|a| a["Uuid"] == uuid.as_str())
                    .cloned()
                    .collect();
                Json(serde_json::Value::Array(matching))
            }
            None => Json(all),
        }
    }

    #[tokio::test]
    async fn test_agents_list_and_lookup() {
        let client = serve(Router::new().route("/v1/agent", get(agent_handler))).await;

        let all = client.agents(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let one = client.agents(Some("bbb222")).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].identifier(), "bbb222");

        let none = client.agents(Some("zzz")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_groups() {
        let client = serve(Router::new().route(
            "/v1/groups",
            get(|| async { Json(serde_json::json!({"aaa111": "datacenter"})) }),
        ))
        .await;
        let groups = client.groups().await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].identifier(), "aaa111");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let client = serve(Router::new().route(
            "/v1/agent",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let err = client.agents(None).await.unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(matches!(
            err.downcast_ref::<ToddError>(),
            Some(ToddError::Api(_))
        ));
    }
}

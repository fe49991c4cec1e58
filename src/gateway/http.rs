use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use super::traits::QueryGateway;
use crate::app::GatewayConfig;
use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::utils::GatewayError;

/// Query gateway speaking JSON over HTTP
pub struct HttpGateway {
    client: Client,
    base_url: String,
    query_path: String,
    health_path: String,
    documents_path: String,
    graph_path: String,
}

/// Size of the service's knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    /// Node count per `type` attribute
    pub node_types: BTreeMap<String, usize>,
}

impl HttpGateway {
    /// Create a gateway from configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut builder = Client::builder();
        // No timeout unless configured; the transport default applies
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query_path: config.query_path.clone(),
            health_path: config.health_path.clone(),
            documents_path: config.documents_path.clone(),
            graph_path: config.graph_path.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Upload a document for ingestion into the graph. Returns the id the
    /// service assigned to it.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        let url = self.url(&self.documents_path);
        debug!("POST {} ({}, {} bytes)", url, file_name, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self.client.post(&url).multipart(form).send().await?;

        let uploaded: UploadResponse = decode(success_body(response).await?)?;
        Ok(uploaded.document_id)
    }

    /// Fetch the knowledge graph and summarize it
    pub async fn graph(&self) -> Result<GraphSummary, GatewayError> {
        let url = self.url(&self.graph_path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let graph: GraphResponse = decode(success_body(response).await?)?;

        let mut node_types = BTreeMap::new();
        for node in graph.nodes.values() {
            let kind = node
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown");
            *node_types.entry(kind.to_string()).or_insert(0) += 1;
        }

        Ok(GraphSummary {
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
            node_types,
        })
    }
}

/// Body of a 2xx response, or `GatewayError::Status` with whatever the
/// service sent back
async fn success_body(response: Response) -> Result<String, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text().await?)
}

fn decode<T: serde::de::DeserializeOwned>(body: String) -> Result<T, GatewayError> {
    serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait]
impl QueryGateway for HttpGateway {
    async fn query(&self, text: &str) -> Result<String, GatewayError> {
        let url = self.url(&self.query_path);
        debug!("POST {} ({} chars)", url, text.len());

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { query: text })
            .send()
            .await?;

        let decoded: QueryResponse = decode(success_body(response).await?)?;
        debug!("query answered with {} context entries", decoded.context.len());

        Ok(decoded.response)
    }

    async fn health(&self) -> Result<bool, GatewayError> {
        let response = self
            .client
            .get(self.url(&self.health_path))
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let health: HealthResponse = response.json().await?;
        Ok(health.status == "healthy")
    }
}

// Wire format of the query service

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    response: String,
    #[serde(default)]
    context: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    document_id: String,
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    nodes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    edges: Vec<serde_json::Value>,
}

// crates/image-warden-providers/src/trigger.rs
// ============================================================================
// Module: Pipeline Trigger Client
// Description: Remediation dispatch against the CI pipeline API.
// Purpose: Start an upgrade pipeline on a project's remediation branch.
// Dependencies: image-warden-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The trigger client posts a pipeline-create request with the caller's
//! variables. Project paths are path-encoded as a single URL segment. Any
//! status other than 201 is a rejection carrying the status code; transport
//! failures are reported separately so the dispatcher can record the cause.

// ============================================================================
// SECTION: Imports
// ============================================================================

use image_warden_core::PipelineRef;
use image_warden_core::RemediationTrigger;
use image_warden_core::TriggerError;
use image_warden_core::TriggerReceipt;
use image_warden_core::TriggerRequest;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::client::build_client;
use crate::client::join_endpoint;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Header carrying the pipeline API token.
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Configuration for the pipeline trigger client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineTriggerConfig {
    /// Pipeline API endpoint.
    pub endpoint: String,
    /// API token with pipeline-create scope.
    pub token: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Pipeline-create request body.
#[derive(Debug, Serialize)]
struct CreatePipelineBody {
    /// Branch to run the pipeline on.
    #[serde(rename = "ref")]
    branch: String,
    /// Pipeline variables.
    variables: Vec<PipelineVariableBody>,
}

/// One pipeline variable.
#[derive(Debug, Serialize)]
struct PipelineVariableBody {
    /// Variable name.
    key: String,
    /// Variable value.
    value: String,
}

/// Pipeline-create response subset.
#[derive(Debug, Default, Deserialize)]
struct CreatedPipelineBody {
    /// Pipeline web address.
    #[serde(default)]
    web_url: Option<String>,
    /// Pipeline identifier.
    #[serde(default)]
    id: Option<Value>,
}

impl CreatedPipelineBody {
    /// Returns the best available pipeline reference.
    fn pipeline_ref(&self) -> PipelineRef {
        if let Some(url) = &self.web_url {
            return PipelineRef::new(url.clone());
        }
        match &self.id {
            Some(Value::String(text)) => PipelineRef::new(text.clone()),
            Some(other) => PipelineRef::new(other.to_string()),
            None => PipelineRef::new("unidentified"),
        }
    }
}

// ============================================================================
// SECTION: Trigger Client
// ============================================================================

/// Remediation trigger backed by the CI pipeline API.
pub struct PipelineTriggerClient {
    /// Client configuration.
    config: PipelineTriggerConfig,
    /// Blocking HTTP client.
    client: Client,
}

impl PipelineTriggerClient {
    /// Creates a new trigger client.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError`] when the HTTP client cannot be created.
    pub fn new(config: PipelineTriggerConfig) -> Result<Self, TriggerError> {
        let client = build_client(config.timeout_ms).map_err(|detail| TriggerError::Transport {
            detail,
        })?;
        Ok(Self {
            config,
            client,
        })
    }
}

impl RemediationTrigger for PipelineTriggerClient {
    fn trigger(&self, request: &TriggerRequest) -> Result<TriggerReceipt, TriggerError> {
        let encoded_project = request.project_path.replace('/', "%2F");
        let url = join_endpoint(
            &self.config.endpoint,
            &format!("projects/{encoded_project}/pipeline"),
        );
        let body = CreatePipelineBody {
            branch: request.branch.clone(),
            variables: request
                .variables
                .iter()
                .map(|(key, value)| PipelineVariableBody {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .header(TOKEN_HEADER, &self.config.token)
            .json(&body)
            .send()
            .map_err(|err| TriggerError::Transport {
                detail: err.to_string(),
            })?;

        if response.status() != StatusCode::CREATED {
            tracing::warn!(
                status = response.status().as_u16(),
                project = %request.project_path,
                "pipeline trigger rejected"
            );
            return Err(TriggerError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let created: CreatedPipelineBody =
            response.json().map_err(|err| TriggerError::Transport {
                detail: err.to_string(),
            })?;
        let pipeline_ref = created.pipeline_ref();
        tracing::debug!(project = %request.project_path, pipeline = %pipeline_ref, "pipeline triggered");
        Ok(TriggerReceipt {
            pipeline_ref,
        })
    }
}

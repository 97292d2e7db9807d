use std::{fs, path::Path};

use serde::Deserialize;

/// Account scope every request is issued under.
///
/// Loadable from a JSON document so deployments can keep credentials-adjacent
/// settings out of code:
///
/// ```json
/// { "accountNumber": "...", "regionId": "...", "endpoint": "https://..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderContext {
    #[serde(rename = "accountNumber")]
    account_number: String,
    #[serde(rename = "regionId")]
    region_id: String,
    endpoint: String,
}

impl ProviderContext {
    pub fn new(
        account_number: impl Into<String>,
        region_id: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            region_id: region_id.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Load from a JSON file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let data = fs::read_to_string(path).map_err(ContextError::Io)?;
        Self::from_json_str(&data)
    }

    /// Load from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ContextError> {
        serde_json::from_str(json).map_err(ContextError::Json)
    }

    /// Load from an env var containing JSON.
    pub fn from_env(var: &str) -> Result<Self, ContextError> {
        let raw = std::env::var(var).map_err(|_| ContextError::MissingEnv(var.to_string()))?;
        Self::from_json_str(&raw)
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}/{account}` prefix every management URL hangs off.
    pub fn request_prefix(&self) -> String {
        format!("{}/{}", self.endpoint, self.account_number)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContextError {
    #[error("missing env var: {0}")]
    MissingEnv(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

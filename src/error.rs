use thiserror::Error;

/// Rejections from the graph store. Never fatal: callers log and move on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
	#[error("connection references unknown node `{0}`")]
	UnknownNode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid app config: {0}")]
	Json(#[from] serde_json::Error),
}

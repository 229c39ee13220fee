//! Application configuration, read once at startup and provided as context.
//!
//! `index.html` may carry a `<script type="application/json" id="app-config">`
//! block. Any field it leaves out keeps its built-in default.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::components::comments::CustomTheme;
use crate::error::ConfigError;

const CONFIG_ELEMENT_ID: &str = "app-config";
const PLACEHOLDER_CREDENTIAL: &str = "add me";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
	pub id: String,
	pub name: String,
}

/// An identity as written in the config block, where either field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdentityOverride {
	id: Option<String>,
	name: Option<String>,
}

impl IdentityOverride {
	fn or(self, fallback: Identity) -> Identity {
		Identity {
			id: self.id.unwrap_or(fallback.id),
			name: self.name.unwrap_or(fallback.name),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CommentsOverride {
	app_id: Option<String>,
	api_key: Option<String>,
	workspace: IdentityOverride,
	user: IdentityOverride,
}

impl From<CommentsOverride> for CommentsConfig {
	fn from(raw: CommentsOverride) -> Self {
		let defaults = Self::default();
		Self {
			app_id: raw.app_id.unwrap_or(defaults.app_id),
			api_key: raw.api_key.unwrap_or(defaults.api_key),
			workspace: raw.workspace.or(defaults.workspace),
			user: raw.user.or(defaults.user),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommentsOverride", rename_all = "camelCase")]
pub struct CommentsConfig {
	pub app_id: String,
	pub api_key: String,
	pub workspace: Identity,
	pub user: Identity,
}

impl Default for CommentsConfig {
	fn default() -> Self {
		Self {
			app_id: PLACEHOLDER_CREDENTIAL.into(),
			api_key: PLACEHOLDER_CREDENTIAL.into(),
			workspace: Identity {
				id: "demo".into(),
				name: "Workspace".into(),
			},
			user: Identity {
				id: "user-1".into(),
				name: "Anonymous".into(),
			},
		}
	}
}

impl CommentsConfig {
	pub fn has_credentials(&self) -> bool {
		[&self.app_id, &self.api_key]
			.iter()
			.all(|value| !value.is_empty() && value.as_str() != PLACEHOLDER_CREDENTIAL)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowOptions {
	pub snap_to_grid: bool,
	pub snap_grid: [f64; 2],
	pub fit_view_padding: f64,
	pub min_zoom: f64,
	/// `None` leaves zoom-in unbounded.
	pub max_zoom: Option<f64>,
	pub background_gap: f64,
	pub background_color: String,
	pub connection_line_stroke: String,
}

impl Default for FlowOptions {
	fn default() -> Self {
		Self {
			snap_to_grid: true,
			snap_grid: [25.0, 25.0],
			fit_view_padding: 0.2,
			min_zoom: 0.5,
			max_zoom: None,
			background_gap: 25.0,
			background_color: "#aaa".into(),
			connection_line_stroke: "#ddd".into(),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub comments: CommentsConfig,
	pub theme: CustomTheme,
	pub flow: FlowOptions,
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Read the inline config block from the page, falling back to defaults.
	pub fn from_document() -> Self {
		let Some(json) = web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|element| element.text_content())
		else {
			info!("no #{CONFIG_ELEMENT_ID} block, using default config");
			return Self::default();
		};

		match Self::from_json(&json) {
			Ok(config) => config,
			Err(err) => {
				warn!("{err}; using default config");
				Self::default()
			}
		}
	}
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default rendered size of a node without a `width` style override.
pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 40.0;

/// CSS property name to value, rendered in insertion-independent order.
pub type Style = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPosition {
	pub x: f64,
	pub y: f64,
}

impl XYPosition {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Rendering variant of a node. Decides which handles it exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Input,
	Output,
	#[default]
	Default,
}

impl NodeKind {
	/// Outgoing handle at the bottom of the node.
	pub fn has_source_handle(self) -> bool {
		!matches!(self, NodeKind::Output)
	}

	/// Incoming handle at the top of the node.
	pub fn has_target_handle(self) -> bool {
		!matches!(self, NodeKind::Input)
	}

	pub fn class(self) -> &'static str {
		match self {
			NodeKind::Input => "flow-node input",
			NodeKind::Output => "flow-node output",
			NodeKind::Default => "flow-node default",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LabelSpan {
	Text { text: String },
	Strong { text: String },
	Link { text: String, href: String },
}

impl LabelSpan {
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text { text: text.into() }
	}

	pub fn strong(text: impl Into<String>) -> Self {
		Self::Strong { text: text.into() }
	}

	pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
		Self::Link {
			text: text.into(),
			href: href.into(),
		}
	}

	fn as_str(&self) -> &str {
		match self {
			LabelSpan::Text { text } | LabelSpan::Strong { text } | LabelSpan::Link { text, .. } => {
				text
			}
		}
	}
}

/// Display payload of a node: plain text, or rich text with emphasis and links.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeLabel {
	Plain(String),
	Rich(Vec<LabelSpan>),
}

impl NodeLabel {
	pub fn plain_text(&self) -> String {
		match self {
			NodeLabel::Plain(text) => text.clone(),
			NodeLabel::Rich(spans) => spans.iter().map(LabelSpan::as_str).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	pub id: String,
	pub position: XYPosition,
	#[serde(rename = "type", default)]
	pub kind: NodeKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<NodeLabel>,
	#[serde(default, skip_serializing_if = "Style::is_empty")]
	pub style: Style,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deletable: Option<bool>,
	#[serde(default)]
	pub selected: bool,
	#[serde(default)]
	pub dragging: bool,
}

impl Node {
	pub fn new(id: impl Into<String>, position: XYPosition) -> Self {
		Self {
			id: id.into(),
			position,
			kind: NodeKind::Default,
			data: None,
			style: Style::new(),
			deletable: None,
			selected: false,
			dragging: false,
		}
	}

	pub fn with_kind(mut self, kind: NodeKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn with_label(mut self, label: NodeLabel) -> Self {
		self.data = Some(label);
		self
	}

	pub fn with_style(mut self, property: &str, value: &str) -> Self {
		self.style.insert(property.to_owned(), value.to_owned());
		self
	}

	pub fn deletable(mut self, deletable: bool) -> Self {
		self.deletable = Some(deletable);
		self
	}

	pub fn is_deletable(&self) -> bool {
		self.deletable.unwrap_or(true)
	}

	/// Width from a `width: <n>px` style override, else the default node width.
	pub fn width(&self) -> f64 {
		self.style
			.get("width")
			.and_then(|w| w.trim_end_matches("px").trim().parse().ok())
			.unwrap_or(NODE_WIDTH)
	}

	pub fn height(&self) -> f64 {
		NODE_HEIGHT
	}

	/// Anchor point of the outgoing handle, in flow coordinates.
	pub fn source_anchor(&self) -> XYPosition {
		XYPosition::new(
			self.position.x + self.width() / 2.0,
			self.position.y + self.height(),
		)
	}

	/// Anchor point of the incoming handle, in flow coordinates.
	pub fn target_anchor(&self) -> XYPosition {
		XYPosition::new(self.position.x + self.width() / 2.0, self.position.y)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	#[default]
	Default,
	Step,
	SmoothStep,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_handle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_handle: Option<String>,
	#[serde(rename = "type", default)]
	pub kind: EdgeKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Style::is_empty")]
	pub label_style: Style,
	#[serde(default, skip_serializing_if = "Style::is_empty")]
	pub style: Style,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deletable: Option<bool>,
	#[serde(default)]
	pub animated: bool,
	#[serde(default)]
	pub selected: bool,
}

impl Edge {
	pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			source_handle: None,
			target_handle: None,
			kind: EdgeKind::Default,
			label: None,
			label_style: Style::new(),
			style: Style::new(),
			deletable: None,
			animated: false,
			selected: false,
		}
	}

	pub fn with_kind(mut self, kind: EdgeKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_style(mut self, property: &str, value: &str) -> Self {
		self.style.insert(property.to_owned(), value.to_owned());
		self
	}

	pub fn with_label_style(mut self, property: &str, value: &str) -> Self {
		self.label_style.insert(property.to_owned(), value.to_owned());
		self
	}

	pub fn deletable(mut self, deletable: bool) -> Self {
		self.deletable = Some(deletable);
		self
	}

	pub fn animated(mut self, animated: bool) -> Self {
		self.animated = animated;
		self
	}

	pub fn is_deletable(&self) -> bool {
		self.deletable.unwrap_or(true)
	}

	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// A proposed edge, emitted when the user drops a connection line on a handle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub source_handle: Option<String>,
	#[serde(default)]
	pub target_handle: Option<String>,
}

impl Connection {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			source_handle: None,
			target_handle: None,
		}
	}
}

/// Render a style map as an inline CSS declaration list.
pub fn style_to_css(style: &Style) -> String {
	style
		.iter()
		.map(|(property, value)| format!("{property}: {value};"))
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_json_uses_flow_field_names() {
		let node = Node::new("6", XYPosition::new(100.0, 480.0))
			.with_kind(NodeKind::Output)
			.deletable(false);
		let json = serde_json::to_value(&node).expect("serialize");
		assert_eq!(json["type"], "output");
		assert_eq!(json["deletable"], false);
		assert!(json.get("data").is_none());
	}

	#[test]
	fn edge_parses_smoothstep_and_defaults() {
		let edge: Edge = serde_json::from_str(
			r#"{"id":"e5-6","source":"5","target":"6","type":"smoothstep","deletable":false}"#,
		)
		.expect("parse");
		assert_eq!(edge.kind, EdgeKind::SmoothStep);
		assert!(!edge.is_deletable());
		assert!(!edge.animated);
		assert!(edge.label.is_none());
	}

	#[test]
	fn rich_label_flattens_to_plain_text() {
		let label = NodeLabel::Rich(vec![
			LabelSpan::text("You can find the docs on "),
			LabelSpan::link("Github", "https://github.com/wbkd/react-flow"),
		]);
		assert_eq!(label.plain_text(), "You can find the docs on Github");

		let parsed: NodeLabel = serde_json::from_str(r#""Another output node""#).expect("parse");
		assert_eq!(parsed, NodeLabel::Plain("Another output node".into()));
	}

	#[test]
	fn width_reads_style_override() {
		let node = Node::new("3", XYPosition::default()).with_style("width", "180px");
		assert_eq!(node.width(), 180.0);
		assert_eq!(Node::new("2", XYPosition::default()).width(), NODE_WIDTH);
	}

	#[test]
	fn handles_follow_node_kind() {
		assert!(NodeKind::Input.has_source_handle());
		assert!(!NodeKind::Input.has_target_handle());
		assert!(!NodeKind::Output.has_source_handle());
		assert!(NodeKind::Default.has_source_handle() && NodeKind::Default.has_target_handle());
	}

	#[test]
	fn style_renders_as_css() {
		let edge = Edge::new("e", "a", "b")
			.with_label_style("fill", "#f6ab6c")
			.with_label_style("font-weight", "700");
		assert_eq!(style_to_css(&edge.label_style), "fill: #f6ab6c; font-weight: 700;");
	}
}

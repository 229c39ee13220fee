use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeColors {
	pub background: String,
	pub surface: String,
	pub surface_overlay: String,
	pub text_primary: String,
	pub text_secondary: String,
	pub text_disabled: String,
	pub text_link: String,
	pub border: String,
	pub icon: String,
	pub attention: String,
}

impl Default for ThemeColors {
	fn default() -> Self {
		Self {
			background: "hsl(0, 0%, 100%)".into(),
			surface: "rgb(247 247 248)".into(),
			surface_overlay: "rgba(0, 0, 0, 0.08)".into(),
			text_primary: "#071324".into(),
			text_secondary: "#63676D".into(),
			text_disabled: "rgb(99, 103, 109)".into(),
			text_link: "#0180FE".into(),
			border: "rgb(239, 240, 241)".into(),
			icon: "rgb(162, 166, 172)".into(),
			attention: "#0180FE".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxItemTheme {
	pub border_bottom: String,
	pub hover_background: String,
}

impl Default for InboxItemTheme {
	fn default() -> Self {
		Self {
			border_bottom: "1px solid #EFF0F1".into(),
			hover_background: "#F7F7F8".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxTheme {
	pub width: String,
	pub item: InboxItemTheme,
}

impl Default for InboxTheme {
	fn default() -> Self {
		Self {
			width: "320px".into(),
			item: InboxItemTheme::default(),
		}
	}
}

/// Visual tokens for the comments panel. Built once at startup, then only read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomTheme {
	pub color: ThemeColors,
	pub inbox: InboxTheme,
}

impl CustomTheme {
	/// CSS custom properties consumed by `style/main.css`.
	pub fn css_variables(&self) -> String {
		let c = &self.color;
		[
			("--comments-background", &c.background),
			("--comments-surface", &c.surface),
			("--comments-surface-overlay", &c.surface_overlay),
			("--comments-text-primary", &c.text_primary),
			("--comments-text-secondary", &c.text_secondary),
			("--comments-text-disabled", &c.text_disabled),
			("--comments-text-link", &c.text_link),
			("--comments-border", &c.border),
			("--comments-icon", &c.icon),
			("--comments-attention", &c.attention),
			("--comments-inbox-width", &self.inbox.width),
			("--comments-item-border-bottom", &self.inbox.item.border_bottom),
			("--comments-item-hover-background", &self.inbox.item.hover_background),
		]
		.iter()
		.map(|(name, value)| format!("{name}: {value};"))
		.collect::<Vec<_>>()
		.join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_variables_carry_theme_tokens() {
		let css = CustomTheme::default().css_variables();
		assert!(css.starts_with("--comments-background: hsl(0, 0%, 100%);"));
		assert!(css.contains("--comments-inbox-width: 320px;"));
		assert!(css.contains("--comments-item-hover-background: #F7F7F8;"));
	}

	#[test]
	fn partial_theme_keeps_defaults() {
		let theme: CustomTheme =
			serde_json::from_str(r##"{"color":{"attention":"#FF0000"}}"##).expect("parse");
		assert_eq!(theme.color.attention, "#FF0000");
		assert_eq!(theme.color.text_link, "#0180FE");
		assert_eq!(theme.inbox, InboxTheme::default());
	}
}

//! Seed diagram shown on first load: seven nodes, five edges.

use super::types::{Edge, EdgeKind, LabelSpan, Node, NodeKind, NodeLabel, XYPosition};

pub fn initial_nodes() -> Vec<Node> {
	vec![
		Node::new("1", XYPosition::new(250.0, 0.0))
			.with_kind(NodeKind::Input)
			.with_label(NodeLabel::Rich(vec![
				LabelSpan::text("Welcome to "),
				LabelSpan::strong("React Flow!"),
			])),
		Node::new("2", XYPosition::new(100.0, 100.0)).with_label(NodeLabel::Rich(vec![
			LabelSpan::text("This is a "),
			LabelSpan::strong("default node"),
		])),
		Node::new("3", XYPosition::new(400.0, 100.0))
			.with_label(NodeLabel::Rich(vec![
				LabelSpan::text("This one has a "),
				LabelSpan::strong("custom style"),
			]))
			.with_style("background", "#D6D5E6")
			.with_style("color", "#333")
			.with_style("border", "1px solid #222138")
			.with_style("width", "180px"),
		Node::new("4", XYPosition::new(250.0, 200.0)).with_label(NodeLabel::Rich(vec![
			LabelSpan::text("You can find the docs on "),
			LabelSpan::link("Github", "https://github.com/wbkd/react-flow"),
		])),
		Node::new("5", XYPosition::new(250.0, 325.0)).with_label(NodeLabel::Rich(vec![
			LabelSpan::text("Or check out the other "),
			LabelSpan::strong("examples"),
		])),
		Node::new("6", XYPosition::new(100.0, 480.0))
			.with_kind(NodeKind::Output)
			.with_label(NodeLabel::Rich(vec![
				LabelSpan::text("An "),
				LabelSpan::strong("output node (not deletable)"),
			]))
			.deletable(false),
		Node::new("7", XYPosition::new(400.0, 450.0))
			.with_kind(NodeKind::Output)
			.with_label(NodeLabel::Plain("Another output node".into())),
	]
}

pub fn initial_edges() -> Vec<Edge> {
	vec![
		Edge::new("e1-2", "1", "2").with_label("this is an edge label"),
		Edge::new("e1-3", "1", "3"),
		Edge::new("e4-5", "4", "5").with_label("edge with arrow head"),
		Edge::new("e5-6", "5", "6")
			.with_kind(EdgeKind::SmoothStep)
			.deletable(false)
			.with_label("smooth step edge (not deletable)"),
		Edge::new("e5-7", "5", "7")
			.with_kind(EdgeKind::Step)
			.with_style("stroke", "#f6ab6c")
			.with_label("a step edge")
			.animated(true)
			.with_label_style("fill", "#f6ab6c")
			.with_label_style("font-weight", "700"),
	]
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn seed_is_seven_nodes_five_edges() {
		assert_eq!(initial_nodes().len(), 7);
		assert_eq!(initial_edges().len(), 5);
	}

	#[test]
	fn seed_edges_reference_seed_nodes() {
		let nodes = initial_nodes();
		let node_ids: HashSet<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		for edge in initial_edges() {
			assert!(node_ids.contains(edge.source.as_str()), "{}", edge.id);
			assert!(node_ids.contains(edge.target.as_str()), "{}", edge.id);
		}
	}

	#[test]
	fn only_node_six_and_edge_e5_6_are_protected() {
		let protected_nodes: Vec<_> = initial_nodes()
			.into_iter()
			.filter(|n| !n.is_deletable())
			.map(|n| n.id)
			.collect();
		let protected_edges: Vec<_> = initial_edges()
			.into_iter()
			.filter(|e| !e.is_deletable())
			.map(|e| e.id)
			.collect();
		assert_eq!(protected_nodes, ["6"]);
		assert_eq!(protected_edges, ["e5-6"]);
	}
}

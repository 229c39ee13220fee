//! Change-sets for the node and edge snapshots.
//!
//! Both `apply_*` functions are pure: they clone the input snapshot and apply
//! each change in order. An entry that does not fit the snapshot (unknown id,
//! duplicate add, protected removal) is skipped and the rest of the batch
//! still applies.

use log::debug;

use super::types::{Edge, Node, XYPosition};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	Add(Node),
	Remove {
		id: String,
	},
	Position {
		id: String,
		position: Option<XYPosition>,
		dragging: Option<bool>,
	},
	Select {
		id: String,
		selected: bool,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
	Add(Edge),
	Remove { id: String },
	Select { id: String, selected: bool },
}

impl NodeChange {
	pub fn remove(id: impl Into<String>) -> Self {
		Self::Remove { id: id.into() }
	}

	pub fn select(id: impl Into<String>, selected: bool) -> Self {
		Self::Select {
			id: id.into(),
			selected,
		}
	}
}

impl EdgeChange {
	pub fn remove(id: impl Into<String>) -> Self {
		Self::Remove { id: id.into() }
	}

	pub fn select(id: impl Into<String>, selected: bool) -> Self {
		Self::Select {
			id: id.into(),
			selected,
		}
	}
}

/// Shared surface of nodes and edges for the generic change plumbing.
pub(crate) trait FlowElement: Clone {
	const KIND: &'static str;

	fn id(&self) -> &str;
	fn is_deletable(&self) -> bool;
	fn set_selected(&mut self, selected: bool);
}

impl FlowElement for Node {
	const KIND: &'static str = "node";

	fn id(&self) -> &str {
		&self.id
	}

	fn is_deletable(&self) -> bool {
		Node::is_deletable(self)
	}

	fn set_selected(&mut self, selected: bool) {
		self.selected = selected;
	}
}

impl FlowElement for Edge {
	const KIND: &'static str = "edge";

	fn id(&self) -> &str {
		&self.id
	}

	fn is_deletable(&self) -> bool {
		Edge::is_deletable(self)
	}

	fn set_selected(&mut self, selected: bool) {
		self.selected = selected;
	}
}

fn add<T: FlowElement>(items: &mut Vec<T>, item: &T) {
	if items.iter().any(|existing| existing.id() == item.id()) {
		debug!("skipping add of duplicate {} `{}`", T::KIND, item.id());
		return;
	}
	items.push(item.clone());
}

fn remove<T: FlowElement>(items: &mut Vec<T>, id: &str) {
	let Some(idx) = items.iter().position(|item| item.id() == id) else {
		debug!("skipping remove of unknown {} `{id}`", T::KIND);
		return;
	};
	if !items[idx].is_deletable() {
		debug!("{} `{id}` is not deletable", T::KIND);
		return;
	}
	items.remove(idx);
}

fn find_mut<'a, T: FlowElement>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
	let found = items.iter_mut().find(|item| item.id() == id);
	if found.is_none() {
		debug!("skipping change for unknown {} `{id}`", T::KIND);
	}
	found
}

pub fn apply_node_changes(changes: &[NodeChange], nodes: &[Node]) -> Vec<Node> {
	let mut next = nodes.to_vec();
	for change in changes {
		match change {
			NodeChange::Add(node) => add(&mut next, node),
			NodeChange::Remove { id } => remove(&mut next, id),
			NodeChange::Position {
				id,
				position,
				dragging,
			} => {
				if let Some(node) = find_mut(&mut next, id) {
					if let Some(position) = position {
						node.position = *position;
					}
					if let Some(dragging) = dragging {
						node.dragging = *dragging;
					}
				}
			}
			NodeChange::Select { id, selected } => {
				if let Some(node) = find_mut(&mut next, id) {
					node.set_selected(*selected);
				}
			}
		}
	}
	next
}

pub fn apply_edge_changes(changes: &[EdgeChange], edges: &[Edge]) -> Vec<Edge> {
	let mut next = edges.to_vec();
	for change in changes {
		match change {
			EdgeChange::Add(edge) => add(&mut next, edge),
			EdgeChange::Remove { id } => remove(&mut next, id),
			EdgeChange::Select { id, selected } => {
				if let Some(edge) = find_mut(&mut next, id) {
					edge.set_selected(*selected);
				}
			}
		}
	}
	next
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;
	use crate::components::flow::initial::{initial_edges, initial_nodes};

	fn node(id: &str) -> Node {
		Node::new(id, XYPosition::default())
	}

	fn ids(nodes: &[Node]) -> Vec<&str> {
		nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn add_and_remove_keep_ids_unique() {
		let changes = [
			NodeChange::Add(node("a")),
			NodeChange::Add(node("b")),
			NodeChange::Add(node("a")),
			NodeChange::remove("b"),
			NodeChange::Add(node("b")),
			NodeChange::Add(node("b")),
		];
		let nodes = apply_node_changes(&changes, &[]);
		assert_eq!(ids(&nodes), ["a", "b"]);
		let unique: HashSet<_> = nodes.iter().map(|n| &n.id).collect();
		assert_eq!(unique.len(), nodes.len());
	}

	#[test]
	fn non_deletable_node_survives_removal() {
		let seed = initial_nodes();
		let nodes = apply_node_changes(&[NodeChange::remove("6")], &seed);
		assert_eq!(nodes, seed);
	}

	#[test]
	fn unknown_ids_do_not_abort_the_batch() {
		let seed = initial_nodes();
		let changes = [
			NodeChange::remove("missing"),
			NodeChange::select("missing", true),
			NodeChange::Position {
				id: "missing".into(),
				position: Some(XYPosition::new(1.0, 1.0)),
				dragging: None,
			},
			NodeChange::remove("7"),
		];
		let nodes = apply_node_changes(&changes, &seed);
		assert_eq!(nodes.len(), seed.len() - 1);
		assert!(nodes.iter().all(|n| n.id != "7"));
	}

	#[test]
	fn position_change_updates_only_given_fields() {
		let seed = initial_nodes();
		let nodes = apply_node_changes(
			&[NodeChange::Position {
				id: "2".into(),
				position: None,
				dragging: Some(true),
			}],
			&seed,
		);
		let moved = nodes.iter().find(|n| n.id == "2").expect("node 2");
		assert!(moved.dragging);
		assert_eq!(moved.position, XYPosition::new(100.0, 100.0));
	}

	#[test]
	fn apply_is_deterministic_and_leaves_input_untouched() {
		let seed = initial_nodes();
		let changes = [NodeChange::select("1", true), NodeChange::remove("4")];
		let first = apply_node_changes(&changes, &seed);
		let second = apply_node_changes(&changes, &seed);
		assert_eq!(first, second);
		assert_eq!(seed.len(), 7);
		assert!(!seed[0].selected);
	}

	#[rstest]
	#[case("e5-6", 5)]
	#[case("e5-7", 4)]
	#[case("nope", 5)]
	fn edge_removal_respects_deletable(#[case] id: &str, #[case] remaining: usize) {
		let edges = apply_edge_changes(&[EdgeChange::remove(id)], &initial_edges());
		assert_eq!(edges.len(), remaining);
	}

	#[test]
	fn edge_selection_toggles() {
		let edges = apply_edge_changes(
			&[EdgeChange::select("e1-3", true), EdgeChange::select("e1-2", false)],
			&initial_edges(),
		);
		let selected: Vec<_> = edges.iter().filter(|e| e.selected).map(|e| &e.id).collect();
		assert_eq!(selected, ["e1-3"]);
	}

	fn node_change() -> impl Strategy<Value = NodeChange> {
		prop_oneof![
			(0..8u8).prop_map(|id| NodeChange::Add(node(&id.to_string()))),
			(0..8u8).prop_map(|id| NodeChange::remove(id.to_string())),
			((0..8u8), any::<bool>()).prop_map(|(id, selected)| NodeChange::Select {
				id: id.to_string(),
				selected,
			}),
		]
	}

	fn edge_change() -> impl Strategy<Value = EdgeChange> {
		prop_oneof![
			(0..8u8).prop_map(|id| EdgeChange::Add(Edge::new(format!("e{id}"), "1", "2"))),
			(0..8u8).prop_map(|id| EdgeChange::remove(format!("e{id}"))),
		]
	}

	proptest! {
		#[test]
		fn node_ids_stay_unique(batches in prop::collection::vec(prop::collection::vec(node_change(), 0..8), 0..8)) {
			let mut nodes = initial_nodes();
			for batch in &batches {
				nodes = apply_node_changes(batch, &nodes);
				let unique: HashSet<_> = nodes.iter().map(|n| &n.id).collect();
				prop_assert_eq!(unique.len(), nodes.len());
			}
			prop_assert!(nodes.iter().any(|n| n.id == "6"));
		}

		#[test]
		fn edge_ids_stay_unique(batches in prop::collection::vec(prop::collection::vec(edge_change(), 0..8), 0..8)) {
			let mut edges = initial_edges();
			for batch in &batches {
				edges = apply_edge_changes(batch, &edges);
				let unique: HashSet<_> = edges.iter().map(|e| &e.id).collect();
				prop_assert_eq!(unique.len(), edges.len());
			}
			prop_assert!(edges.iter().any(|e| e.id == "e5-6"));
		}
	}
}

//! Turning connection proposals into edges.
//!
//! Proposals are accepted as long as both endpoints exist. Duplicate edges,
//! cycles and self-loops are all allowed: a connection line dropped on a
//! handle always materializes.

use super::types::{Connection, Edge, Node};
use crate::error::FlowError;

/// `e{source}{sourceHandle}-{target}{targetHandle}`, with `-2`, `-3`, ...
/// appended until it no longer clashes with an existing edge id.
pub fn edge_id(connection: &Connection, edges: &[Edge]) -> String {
	let base = format!(
		"e{}{}-{}{}",
		connection.source,
		connection.source_handle.as_deref().unwrap_or_default(),
		connection.target,
		connection.target_handle.as_deref().unwrap_or_default(),
	);
	let taken = |id: &str| edges.iter().any(|edge| edge.id == id);
	if !taken(&base) {
		return base;
	}
	let mut n = 2;
	loop {
		let candidate = format!("{base}-{n}");
		if !taken(&candidate) {
			return candidate;
		}
		n += 1;
	}
}

fn connection_to_edge(connection: &Connection, edges: &[Edge]) -> Edge {
	Edge {
		source_handle: connection.source_handle.clone(),
		target_handle: connection.target_handle.clone(),
		..Edge::new(
			edge_id(connection, edges),
			connection.source.clone(),
			connection.target.clone(),
		)
	}
}

/// Build the edge for `connection`, rejecting proposals with a missing endpoint.
pub fn connect(connection: &Connection, nodes: &[Node], edges: &[Edge]) -> Result<Edge, FlowError> {
	for endpoint in [&connection.source, &connection.target] {
		if !nodes.iter().any(|node| &node.id == endpoint) {
			return Err(FlowError::UnknownNode(endpoint.clone()));
		}
	}
	Ok(connection_to_edge(connection, edges))
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;
	use crate::components::flow::initial::{initial_edges, initial_nodes};
	use crate::components::flow::types::EdgeKind;

	#[test]
	fn id_follows_seed_scheme() {
		assert_eq!(edge_id(&Connection::new("2", "7"), &initial_edges()), "e2-7");
	}

	#[test]
	fn id_includes_handles() {
		let connection = Connection {
			source_handle: Some("a".into()),
			target_handle: Some("b".into()),
			..Connection::new("2", "7")
		};
		assert_eq!(edge_id(&connection, &[]), "e2a-7b");
	}

	#[test]
	fn colliding_id_gets_a_suffix() {
		let mut edges = initial_edges();
		assert_eq!(edge_id(&Connection::new("5", "6"), &edges), "e5-6-2");
		edges.push(Edge::new("e5-6-2", "5", "6"));
		assert_eq!(edge_id(&Connection::new("5", "6"), &edges), "e5-6-3");
	}

	#[rstest]
	#[case("2", "7")]
	#[case("5", "6")]
	#[case("3", "3")]
	fn new_edge_copies_endpoints(#[case] source: &str, #[case] target: &str) {
		let edges = initial_edges();
		let edge = connect(&Connection::new(source, target), &initial_nodes(), &edges)
			.expect("connect");
		assert_eq!(edge.source, source);
		assert_eq!(edge.target, target);
		assert_eq!(edge.kind, EdgeKind::Default);
		assert!(edge.is_deletable());
		assert!(edges.iter().all(|e| e.id != edge.id));
	}

	#[test]
	fn missing_endpoint_is_rejected() {
		let result = connect(&Connection::new("1", "42"), &initial_nodes(), &initial_edges());
		assert_eq!(result, Err(FlowError::UnknownNode("42".into())));
	}

	fn seed_id() -> impl Strategy<Value = String> {
		(1..=7u8).prop_map(|id| id.to_string())
	}

	fn handle() -> impl Strategy<Value = Option<String>> {
		prop::option::of(prop_oneof![Just("a".to_owned()), Just("b".to_owned())])
	}

	proptest! {
		#[test]
		fn connections_copy_endpoints_with_fresh_ids(
			proposals in prop::collection::vec((seed_id(), handle(), seed_id(), handle()), 1..20)
		) {
			let nodes = initial_nodes();
			let mut edges = initial_edges();
			for (source, source_handle, target, target_handle) in proposals {
				let connection = Connection {
					source_handle: source_handle.clone(),
					target_handle: target_handle.clone(),
					..Connection::new(source.clone(), target.clone())
				};
				let edge = connect(&connection, &nodes, &edges).expect("seed endpoints exist");
				prop_assert_eq!(&edge.source, &source);
				prop_assert_eq!(&edge.target, &target);
				prop_assert_eq!(&edge.source_handle, &source_handle);
				prop_assert_eq!(&edge.target_handle, &target_handle);
				edges.push(edge);
				let unique: HashSet<_> = edges.iter().map(|e| &e.id).collect();
				prop_assert_eq!(unique.len(), edges.len());
			}
		}
	}
}

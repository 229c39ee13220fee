use std::collections::HashSet;

use log::{debug, warn};

use super::changes::{EdgeChange, NodeChange, apply_edge_changes, apply_node_changes};
use super::connect::connect;
use super::initial::{initial_edges, initial_nodes};
use super::types::{Connection, Edge, Node, XYPosition};
use super::viewport::{Viewport, fit_view, nodes_bounds, snap_to_grid};
use crate::config::FlowOptions;
use crate::error::FlowError;

/// Zoom factor of one controls button press.
pub const ZOOM_STEP: f64 = 1.2;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	/// Pointer position at drag start, in flow coordinates.
	pub start: XYPosition,
	/// Nodes being dragged with their positions at drag start.
	pub origins: Vec<(String, XYPosition)>,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A connection line being dragged out of a source handle.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectDraft {
	pub source: String,
	pub source_handle: Option<String>,
	pub pointer: XYPosition,
}

/// Ids actually removed by a bulk delete.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deleted {
	pub nodes: Vec<String>,
	pub edges: Vec<String>,
}

impl Deleted {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// Node and edge store of one diagram, plus the pointer state that feeds it.
#[derive(Clone, Debug)]
pub struct FlowState {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	pub viewport: Viewport,
	pub drag: DragState,
	pub pan: PanState,
	pub connecting: Option<ConnectDraft>,
	pub width: f64,
	pub height: f64,
	options: FlowOptions,
}

impl FlowState {
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, options: FlowOptions) -> Self {
		Self {
			nodes,
			edges,
			viewport: Viewport::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connecting: None,
			width: 0.0,
			height: 0.0,
			options,
		}
	}

	pub fn seeded(options: FlowOptions) -> Self {
		Self::new(initial_nodes(), initial_edges(), options)
	}

	pub fn options(&self) -> &FlowOptions {
		&self.options
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Apply node changes. A removal is dropped when the node holds a
	/// non-deletable edge; otherwise the node's edges go with it.
	pub fn on_nodes_change(&mut self, changes: &[NodeChange]) {
		let mut node_changes = Vec::with_capacity(changes.len());
		let mut edge_changes = Vec::new();
		for change in changes {
			if let NodeChange::Remove { id } = change {
				if self.edges.iter().any(|e| e.touches(id) && !e.is_deletable()) {
					debug!("node `{id}` holds a non-deletable edge, keeping it");
					continue;
				}
				if self.node(id).is_some_and(Node::is_deletable) {
					edge_changes.extend(
						self.edges
							.iter()
							.filter(|e| e.touches(id))
							.map(|e| EdgeChange::remove(e.id.clone())),
					);
				}
			}
			node_changes.push(change.clone());
		}
		self.nodes = apply_node_changes(&node_changes, &self.nodes);
		if !edge_changes.is_empty() {
			self.edges = apply_edge_changes(&edge_changes, &self.edges);
		}
	}

	/// Apply edge changes. Additions whose endpoints are not in the diagram
	/// are dropped.
	pub fn on_edges_change(&mut self, changes: &[EdgeChange]) {
		let changes: Vec<EdgeChange> = changes
			.iter()
			.filter(|change| match change {
				EdgeChange::Add(edge) => {
					let known = self.node(&edge.source).is_some() && self.node(&edge.target).is_some();
					if !known {
						debug!(
							"edge `{}` references unknown node (`{}` -> `{}`), skipping",
							edge.id, edge.source, edge.target
						);
					}
					known
				}
				_ => true,
			})
			.cloned()
			.collect();
		self.edges = apply_edge_changes(&changes, &self.edges);
	}

	/// Materialize `connection` as a new edge and return it.
	pub fn connect(&mut self, connection: &Connection) -> Result<Edge, FlowError> {
		match connect(connection, &self.nodes, &self.edges) {
			Ok(edge) => {
				debug!("connected `{}` -> `{}` as `{}`", edge.source, edge.target, edge.id);
				self.on_edges_change(&[EdgeChange::Add(edge.clone())]);
				Ok(edge)
			}
			Err(err) => {
				warn!("rejected connection: {err}");
				Err(err)
			}
		}
	}

	/// Select one node. A non-additive click clears every other selection;
	/// an additive one toggles the node.
	pub fn select_node(&mut self, id: &str, additive: bool) {
		let Some(node) = self.node(id) else {
			return;
		};
		let selected = !additive || !node.selected;
		let (mut node_changes, edge_changes) = if additive {
			(Vec::new(), Vec::new())
		} else {
			self.deselect_changes()
		};
		node_changes.push(NodeChange::select(id, selected));
		self.on_nodes_change(&node_changes);
		self.on_edges_change(&edge_changes);
	}

	pub fn select_edge(&mut self, id: &str, additive: bool) {
		let Some(edge) = self.edges.iter().find(|e| e.id == id) else {
			return;
		};
		let selected = !additive || !edge.selected;
		let (node_changes, mut edge_changes) = if additive {
			(Vec::new(), Vec::new())
		} else {
			self.deselect_changes()
		};
		edge_changes.push(EdgeChange::select(id, selected));
		self.on_nodes_change(&node_changes);
		self.on_edges_change(&edge_changes);
	}

	/// Deselect everything; returns whether anything was selected.
	pub fn clear_selection(&mut self) -> bool {
		let (node_changes, edge_changes) = self.deselect_changes();
		if node_changes.is_empty() && edge_changes.is_empty() {
			return false;
		}
		self.on_nodes_change(&node_changes);
		self.on_edges_change(&edge_changes);
		true
	}

	fn deselect_changes(&self) -> (Vec<NodeChange>, Vec<EdgeChange>) {
		(
			self.nodes
				.iter()
				.filter(|n| n.selected)
				.map(|n| NodeChange::select(n.id.clone(), false))
				.collect(),
			self.edges
				.iter()
				.filter(|e| e.selected)
				.map(|e| EdgeChange::select(e.id.clone(), false))
				.collect(),
		)
	}

	/// Selected node and edge ids.
	pub fn selection(&self) -> (Vec<String>, Vec<String>) {
		(
			self.nodes
				.iter()
				.filter(|n| n.selected)
				.map(|n| n.id.clone())
				.collect(),
			self.edges
				.iter()
				.filter(|e| e.selected)
				.map(|e| e.id.clone())
				.collect(),
		)
	}

	/// Remove every selected node and edge that may be removed.
	pub fn delete_selected(&mut self) -> Deleted {
		let (nodes, edges) = self.selection();
		let node_changes: Vec<_> = nodes.into_iter().map(NodeChange::remove).collect();
		let edge_changes: Vec<_> = edges.into_iter().map(EdgeChange::remove).collect();

		let node_ids: Vec<String> = self.nodes.iter().map(|n| n.id.clone()).collect();
		let edge_ids: Vec<String> = self.edges.iter().map(|e| e.id.clone()).collect();

		self.on_nodes_change(&node_changes);
		self.on_edges_change(&edge_changes);

		let kept_nodes: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
		let kept_edges: HashSet<&str> = self.edges.iter().map(|e| e.id.as_str()).collect();
		Deleted {
			nodes: node_ids
				.into_iter()
				.filter(|id| !kept_nodes.contains(id.as_str()))
				.collect(),
			edges: edge_ids
				.into_iter()
				.filter(|id| !kept_edges.contains(id.as_str()))
				.collect(),
		}
	}

	/// Start dragging `id` from screen point `(sx, sy)`. A selected node
	/// drags the whole selection along.
	pub fn begin_drag(&mut self, id: &str, sx: f64, sy: f64) -> bool {
		let Some(node) = self.node(id) else {
			return false;
		};
		let origins = if node.selected {
			self.nodes
				.iter()
				.filter(|n| n.selected)
				.map(|n| (n.id.clone(), n.position))
				.collect()
		} else {
			vec![(node.id.clone(), node.position)]
		};
		self.drag = DragState {
			active: true,
			moved: false,
			start: self.viewport.screen_to_flow(sx, sy),
			origins,
		};
		true
	}

	/// Move dragged nodes to follow the pointer; returns true on the first move.
	pub fn drag_to(&mut self, sx: f64, sy: f64) -> bool {
		if !self.drag.active {
			return false;
		}
		let pointer = self.viewport.screen_to_flow(sx, sy);
		let (dx, dy) = (pointer.x - self.drag.start.x, pointer.y - self.drag.start.y);
		let changes: Vec<_> = self
			.drag
			.origins
			.iter()
			.map(|(id, origin)| {
				let mut position = XYPosition::new(origin.x + dx, origin.y + dy);
				if self.options.snap_to_grid {
					position = snap_to_grid(position, self.options.snap_grid);
				}
				NodeChange::Position {
					id: id.clone(),
					position: Some(position),
					dragging: Some(true),
				}
			})
			.collect();
		let first = !self.drag.moved;
		self.drag.moved = true;
		self.on_nodes_change(&changes);
		first
	}

	/// Finish a drag, returning the moved node ids (empty for a plain click).
	pub fn end_drag(&mut self) -> Vec<String> {
		if !self.drag.active {
			return Vec::new();
		}
		let drag = std::mem::take(&mut self.drag);
		let changes: Vec<_> = drag
			.origins
			.iter()
			.map(|(id, _)| NodeChange::Position {
				id: id.clone(),
				position: None,
				dragging: Some(false),
			})
			.collect();
		self.on_nodes_change(&changes);
		if drag.moved {
			drag.origins.into_iter().map(|(id, _)| id).collect()
		} else {
			Vec::new()
		}
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.viewport.x,
			transform_start_y: self.viewport.y,
		};
	}

	/// Returns true on the first move of a pan.
	pub fn pan_to(&mut self, sx: f64, sy: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		self.viewport.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.viewport.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		let first = !self.pan.moved;
		self.pan.moved = true;
		first
	}

	/// Returns whether the viewport actually moved.
	pub fn end_pan(&mut self) -> bool {
		std::mem::take(&mut self.pan).moved
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.viewport
			.zoom_at(sx, sy, factor, self.options.min_zoom, self.options.max_zoom);
	}

	pub fn zoom_in(&mut self) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, 1.0 / ZOOM_STEP);
	}

	pub fn fit_view(&mut self) {
		if self.width <= 0.0 || self.height <= 0.0 {
			return;
		}
		if let Some(bounds) = nodes_bounds(&self.nodes) {
			self.viewport = fit_view(
				bounds,
				self.width,
				self.height,
				self.options.fit_view_padding,
				self.options.min_zoom,
				self.options.max_zoom,
			);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn begin_connect(&mut self, source: &str, source_handle: Option<String>, sx: f64, sy: f64) {
		if self.node(source).is_none() {
			return;
		}
		self.connecting = Some(ConnectDraft {
			source: source.to_owned(),
			source_handle,
			pointer: self.viewport.screen_to_flow(sx, sy),
		});
	}

	pub fn connect_to(&mut self, sx: f64, sy: f64) {
		let pointer = self.viewport.screen_to_flow(sx, sy);
		if let Some(draft) = self.connecting.as_mut() {
			draft.pointer = pointer;
		}
	}

	/// Drop the connection line on `target`. `None` when no line was being drawn.
	pub fn finish_connect(
		&mut self,
		target: &str,
		target_handle: Option<String>,
	) -> Option<Result<Edge, FlowError>> {
		let draft = self.connecting.take()?;
		let connection = Connection {
			source_handle: draft.source_handle,
			target_handle,
			..Connection::new(draft.source, target)
		};
		Some(self.connect(&connection))
	}

	pub fn cancel_connect(&mut self) -> bool {
		self.connecting.take().is_some()
	}

	/// Endpoints of the connection line in flow coordinates, while one is drawn.
	pub fn connection_line(&self) -> Option<(XYPosition, XYPosition)> {
		let draft = self.connecting.as_ref()?;
		let source = self.node(&draft.source)?;
		Some((source.source_anchor(), draft.pointer))
	}
}

use std::fmt;

use log::debug;

use super::viewport::Viewport;

/// Interaction notifications raised by the canvas. They only feed the log.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowEvent {
	Init,
	NodeClick(String),
	NodeDoubleClick(String),
	NodeDragStart(Vec<String>),
	NodeDrag(Vec<String>),
	NodeDragStop(Vec<String>),
	SelectionDragStart(Vec<String>),
	SelectionDrag(Vec<String>),
	SelectionDragStop(Vec<String>),
	PaneClick,
	PaneScroll { delta_y: f64 },
	PaneContextMenu,
	SelectionChange { nodes: Vec<String>, edges: Vec<String> },
	NodesDelete(Vec<String>),
	EdgesDelete(Vec<String>),
	EdgeClick(String),
	EdgeDoubleClick(String),
	EdgeMouseEnter(String),
	EdgeMouseMove(String),
	EdgeMouseLeave(String),
	MoveStart(Viewport),
	MoveEnd(Viewport),
	Connect { id: String, source: String, target: String },
}

impl fmt::Display for FlowEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FlowEvent::Init => write!(f, "pane ready"),
			FlowEvent::NodeClick(id) => write!(f, "node click: {id}"),
			FlowEvent::NodeDoubleClick(id) => write!(f, "node double click: {id}"),
			FlowEvent::NodeDragStart(ids) => write!(f, "drag start: {ids:?}"),
			FlowEvent::NodeDrag(ids) => write!(f, "drag: {ids:?}"),
			FlowEvent::NodeDragStop(ids) => write!(f, "drag stop: {ids:?}"),
			FlowEvent::SelectionDragStart(ids) => write!(f, "selection drag start: {ids:?}"),
			FlowEvent::SelectionDrag(ids) => write!(f, "selection drag: {ids:?}"),
			FlowEvent::SelectionDragStop(ids) => write!(f, "selection drag stop: {ids:?}"),
			FlowEvent::PaneClick => write!(f, "pane click"),
			FlowEvent::PaneScroll { delta_y } => write!(f, "pane scroll: {delta_y}"),
			FlowEvent::PaneContextMenu => write!(f, "pane context menu"),
			FlowEvent::SelectionChange { nodes, edges } => {
				write!(f, "selection change: nodes {nodes:?}, edges {edges:?}")
			}
			FlowEvent::NodesDelete(ids) => write!(f, "nodes delete: {ids:?}"),
			FlowEvent::EdgesDelete(ids) => write!(f, "edges delete: {ids:?}"),
			FlowEvent::EdgeClick(id) => write!(f, "edge click: {id}"),
			FlowEvent::EdgeDoubleClick(id) => write!(f, "edge double click: {id}"),
			FlowEvent::EdgeMouseEnter(id) => write!(f, "edge mouse enter: {id}"),
			FlowEvent::EdgeMouseMove(id) => write!(f, "edge mouse move: {id}"),
			FlowEvent::EdgeMouseLeave(id) => write!(f, "edge mouse leave: {id}"),
			FlowEvent::MoveStart(v) => write!(f, "zoom/move start: ({}, {}) x{}", v.x, v.y, v.zoom),
			FlowEvent::MoveEnd(v) => write!(f, "zoom/move end: ({}, {}) x{}", v.x, v.y, v.zoom),
			FlowEvent::Connect { id, source, target } => {
				write!(f, "connect: {source} -> {target} ({id})")
			}
		}
	}
}

pub fn emit(event: FlowEvent) {
	debug!("{event}");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
	Start,
	Move,
	Stop,
}

/// Events for one step of a node drag. Moving more than one node is also a
/// selection drag.
pub fn drag_events(phase: DragPhase, ids: Vec<String>) -> Vec<FlowEvent> {
	let group = (ids.len() > 1).then(|| match phase {
		DragPhase::Start => FlowEvent::SelectionDragStart(ids.clone()),
		DragPhase::Move => FlowEvent::SelectionDrag(ids.clone()),
		DragPhase::Stop => FlowEvent::SelectionDragStop(ids.clone()),
	});
	let node = match phase {
		DragPhase::Start => FlowEvent::NodeDragStart(ids),
		DragPhase::Move => FlowEvent::NodeDrag(ids),
		DragPhase::Stop => FlowEvent::NodeDragStop(ids),
	};
	std::iter::once(node).chain(group).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn events_read_like_log_lines() {
		assert_eq!(FlowEvent::NodeClick("3".into()).to_string(), "node click: 3");
		assert_eq!(
			FlowEvent::SelectionChange {
				nodes: vec!["1".into()],
				edges: Vec::new()
			}
			.to_string(),
			r#"selection change: nodes ["1"], edges []"#
		);
		assert_eq!(
			FlowEvent::MoveEnd(Viewport::default()).to_string(),
			"zoom/move end: (0, 0) x1"
		);
	}

	#[test]
	fn single_node_drag_is_not_a_selection_drag() {
		assert_eq!(
			drag_events(DragPhase::Move, vec!["2".into()]),
			[FlowEvent::NodeDrag(vec!["2".into()])]
		);
	}

	#[test]
	fn group_drag_is_also_a_selection_drag() {
		let ids: Vec<String> = vec!["2".into(), "3".into()];
		assert_eq!(
			drag_events(DragPhase::Start, ids.clone()),
			[FlowEvent::NodeDragStart(ids.clone()), FlowEvent::SelectionDragStart(ids.clone())]
		);
		assert_eq!(
			drag_events(DragPhase::Stop, ids.clone())[1].to_string(),
			r#"selection drag stop: ["2", "3"]"#
		);
	}
}

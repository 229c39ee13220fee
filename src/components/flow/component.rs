use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::controls::Controls;
use super::events::{DragPhase, FlowEvent, drag_events, emit};
use super::render::{background_pattern, connection_line_path, edge_geometry};
use super::state::{Deleted, FlowState};
use super::types::{Edge, LabelSpan, Node, NodeLabel, style_to_css};

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// The pane element, used to turn client coordinates into pane coordinates.
#[derive(Clone, Copy)]
struct Pane(NodeRef<leptos::html::Div>);

impl Pane {
	fn point(self, ev: &MouseEvent) -> (f64, f64) {
		let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
		match self.0.get_untracked() {
			Some(pane) => {
				let rect = pane.get_bounding_client_rect();
				(cx - rect.left(), cy - rect.top())
			}
			None => (cx, cy),
		}
	}

	fn size(self) -> Option<(f64, f64)> {
		let pane = self.0.get_untracked()?;
		Some((pane.client_width() as f64, pane.client_height() as f64))
	}
}

fn is_additive(ev: &MouseEvent) -> bool {
	ev.shift_key() || ev.meta_key() || ev.ctrl_key()
}

/// Keystrokes aimed at a text field must not delete diagram elements.
fn typing_in_field(ev: &KeyboardEvent) -> bool {
	ev.target()
		.and_then(|target| target.dyn_into::<HtmlElement>().ok())
		.is_some_and(|el| {
			matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") || el.is_content_editable()
		})
}

/// Run `f` against the store and log a selection change if it caused one.
fn change_selection(state: RwSignal<FlowState>, f: impl FnOnce(&mut FlowState)) {
	let before = state.with_untracked(FlowState::selection);
	state.update(f);
	let (nodes, edges) = state.with_untracked(FlowState::selection);
	if (&nodes, &edges) != (&before.0, &before.1) {
		emit(FlowEvent::SelectionChange { nodes, edges });
	}
}

fn finish_connection(state: RwSignal<FlowState>, target: &str) {
	let mut result = None;
	state.update(|s| result = s.finish_connect(target, None));
	if let Some(Ok(edge)) = result {
		emit(FlowEvent::Connect {
			id: edge.id,
			source: edge.source,
			target: edge.target,
		});
	}
}

fn delete_selection(state: RwSignal<FlowState>) {
	let mut deleted = Deleted::default();
	state.update(|s| deleted = s.delete_selected());
	if deleted.is_empty() {
		return;
	}
	if !deleted.nodes.is_empty() {
		emit(FlowEvent::NodesDelete(deleted.nodes));
	}
	if !deleted.edges.is_empty() {
		emit(FlowEvent::EdgesDelete(deleted.edges));
	}
}

/// Interactive node/edge canvas backed by a [`FlowState`] store.
///
/// The canvas only reads snapshots and writes change-sets; all mutation rules
/// live in the store. `children` are overlaid on the pane (menus, panels).
#[component]
pub fn FlowCanvas(state: RwSignal<FlowState>, children: Children) -> impl IntoView {
	let pane_ref = NodeRef::<leptos::html::Div>::new();
	let pane = Pane(pane_ref);
	let (gap, dot_color, line_stroke) = state.with_untracked(|s| {
		let options = s.options();
		(
			options.background_gap,
			options.background_color.clone(),
			options.connection_line_stroke.clone(),
		)
	});

	Effect::new(move |_| {
		if pane_ref.get().is_none() {
			return;
		}
		let Some((w, h)) = pane.size() else {
			return;
		};
		state.update(|s| {
			s.resize(w, h);
			s.fit_view();
		});
		emit(FlowEvent::Init);
	});

	let resize = window_event_listener(ev::resize, move |_| {
		if let Some((w, h)) = pane.size() {
			state.update(|s| s.resize(w, h));
		}
	});
	let keydown = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if typing_in_field(&ev) {
			return;
		}
		match ev.key().as_str() {
			"Delete" | "Backspace" => delete_selection(state),
			"Escape" => {
				if state.with_untracked(|s| s.connecting.is_some()) {
					state.update(|s| {
						s.cancel_connect();
					});
				}
			}
			_ => {}
		}
	});
	on_cleanup(move || {
		resize.remove();
		keydown.remove();
	});

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let (x, y) = pane.point(&ev);
		state.update(|s| s.begin_pan(x, y));
	};

	let on_mousemove = move |ev: MouseEvent| {
		let busy = state.with_untracked(|s| s.connecting.is_some() || s.drag.active || s.pan.active);
		if !busy {
			return;
		}
		let (x, y) = pane.point(&ev);
		let mut events = Vec::new();
		state.update(|s| {
			if s.connecting.is_some() {
				s.connect_to(x, y);
			} else if s.drag.active {
				let phase = if s.drag_to(x, y) {
					DragPhase::Start
				} else {
					DragPhase::Move
				};
				let ids = s.drag.origins.iter().map(|(id, _)| id.clone()).collect();
				events = drag_events(phase, ids);
			} else if s.pan_to(x, y) {
				events.push(FlowEvent::MoveStart(s.viewport));
			}
		});
		events.into_iter().for_each(emit);
	};

	let end_gesture = move || {
		let busy = state.with_untracked(|s| s.connecting.is_some() || s.drag.active || s.pan.active);
		if !busy {
			return;
		}
		let mut events = Vec::new();
		let mut pane_click = false;
		state.update(|s| {
			s.cancel_connect();
			let dragged = s.end_drag();
			if !dragged.is_empty() {
				events.extend(drag_events(DragPhase::Stop, dragged));
			}
			let panning = s.pan.active;
			if s.end_pan() {
				events.push(FlowEvent::MoveEnd(s.viewport));
			} else if panning {
				pane_click = true;
			}
		});
		events.into_iter().for_each(emit);
		if pane_click {
			emit(FlowEvent::PaneClick);
			change_selection(state, |s| {
				s.clear_selection();
			});
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = pane.point(&ev);
		let factor = if ev.delta_y() > 0.0 {
			WHEEL_ZOOM_OUT
		} else {
			WHEEL_ZOOM_IN
		};
		state.update(|s| s.zoom_at(x, y, factor));
		emit(FlowEvent::PaneScroll {
			delta_y: ev.delta_y(),
		});
		emit(FlowEvent::MoveEnd(state.with_untracked(|s| s.viewport)));
	};

	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		emit(FlowEvent::PaneContextMenu);
	};

	view! {
		<div
			node_ref=pane_ref
			class="flow-pane"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=move |_: MouseEvent| end_gesture()
			on:mouseleave=move |_: MouseEvent| end_gesture()
			on:wheel=on_wheel
			on:contextmenu=on_contextmenu
		>
			<svg class="flow-background">
				{move || {
					let (size, ox, oy) = state.with(|s| background_pattern(&s.viewport, gap));
					let color = dot_color.clone();
					view! {
						<pattern
							id="flow-dots"
							x=ox.to_string()
							y=oy.to_string()
							width=size.to_string()
							height=size.to_string()
							patternUnits="userSpaceOnUse"
						>
							<circle
								cx=(size / 2.0).to_string()
								cy=(size / 2.0).to_string()
								r="1"
								fill=color
							/>
						</pattern>
					}
				}}
				<rect width="100%" height="100%" fill="url(#flow-dots)" />
			</svg>

			<div class="flow-viewport" style=move || state.with(|s| s.viewport.css_transform())>
				<svg class="flow-edges">
					<defs>
						<marker
							id="flow-arrow"
							viewBox="0 0 10 10"
							refX="10"
							refY="5"
							markerWidth="10"
							markerHeight="10"
							orient="auto-start-reverse"
						>
							<path d="M0,0 L10,5 L0,10 z" fill="#b1b1b7" />
						</marker>
					</defs>
					{move || {
						state.with(|s| {
							s.edges
								.iter()
								.filter_map(|edge| edge_view(state, s, edge))
								.collect_view()
						})
					}}
					{move || {
						let stroke = line_stroke.clone();
						state.with(|s| s.connection_line()).map(|(from, to)| {
							view! {
								<path
									class="flow-connection-line"
									d=connection_line_path(from, to)
									stroke=stroke
									fill="none"
								/>
							}
						})
					}}
				</svg>
				<For
					each=move || state.with(|s| s.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>())
					key=|id| id.clone()
					children=move |id: String| view! { <FlowNode state=state pane=pane id=id /> }
				/>
			</div>

			<Controls state=state />
			<div class="flow-attribution">"overview-flow"</div>
			{children()}
		</div>
	}
}

fn edge_class(edge: &Edge) -> String {
	let mut class = String::from("flow-edge");
	if edge.animated {
		class.push_str(" animated");
	}
	if edge.selected {
		class.push_str(" selected");
	}
	class
}

fn edge_view(state: RwSignal<FlowState>, flow: &FlowState, edge: &Edge) -> Option<AnyView> {
	let source = flow.node(&edge.source)?;
	let target = flow.node(&edge.target)?;
	let geometry = edge_geometry(edge.kind, source.source_anchor(), target.target_anchor());
	let (click_id, dbl_id) = (edge.id.clone(), edge.id.clone());
	let (enter_id, move_id, leave_id) = (edge.id.clone(), edge.id.clone(), edge.id.clone());
	let label = edge.label.clone().map(|text| {
		view! {
			<text
				class="flow-edge-label"
				x=geometry.label.x.to_string()
				y=geometry.label.y.to_string()
				text-anchor="middle"
				dominant-baseline="central"
				style=style_to_css(&edge.label_style)
			>
				{text}
			</text>
		}
	});

	Some(view! {
		<g
			class=edge_class(edge)
			on:mousedown=|ev: MouseEvent| ev.stop_propagation()
			on:click=move |ev: MouseEvent| {
				let additive = is_additive(&ev);
				change_selection(state, |s| s.select_edge(&click_id, additive));
				emit(FlowEvent::EdgeClick(click_id.clone()));
			}
			on:dblclick=move |_: MouseEvent| emit(FlowEvent::EdgeDoubleClick(dbl_id.clone()))
			on:mouseenter=move |_: MouseEvent| emit(FlowEvent::EdgeMouseEnter(enter_id.clone()))
			on:mousemove=move |_: MouseEvent| emit(FlowEvent::EdgeMouseMove(move_id.clone()))
			on:mouseleave=move |_: MouseEvent| emit(FlowEvent::EdgeMouseLeave(leave_id.clone()))
		>
			<path class="flow-edge-interaction" d=geometry.path.clone() />
			<path
				class="flow-edge-path"
				d=geometry.path
				style=style_to_css(&edge.style)
				marker-end="url(#flow-arrow)"
			/>
			{label}
		</g>
	}
	.into_any())
}

fn label_view(label: NodeLabel) -> AnyView {
	match label {
		NodeLabel::Plain(text) => text.into_any(),
		NodeLabel::Rich(spans) => spans
			.into_iter()
			.map(|span| match span {
				LabelSpan::Text { text } => text.into_any(),
				LabelSpan::Strong { text } => view! { <strong>{text}</strong> }.into_any(),
				LabelSpan::Link { text, href } => view! {
					<a
						href=href
						target="_blank"
						rel="noopener noreferrer"
						on:mousedown=|ev: MouseEvent| ev.stop_propagation()
					>
						{text}
					</a>
				}
				.into_any(),
			})
			.collect_view()
			.into_any(),
	}
}

fn node_class(node: &Node) -> String {
	let mut class = node.kind.class().to_owned();
	if node.selected {
		class.push_str(" selected");
	}
	if node.dragging {
		class.push_str(" dragging");
	}
	class
}

fn node_style(node: &Node) -> String {
	format!(
		"transform: translate({}px, {}px); width: {}px; {}",
		node.position.x,
		node.position.y,
		node.width(),
		style_to_css(&node.style)
	)
}

#[component]
fn FlowNode(state: RwSignal<FlowState>, pane: Pane, id: String) -> impl IntoView {
	let node = Memo::new({
		let id = id.clone();
		move |_| state.with(|s| s.node(&id).cloned())
	});
	let Some(initial) = node.get_untracked() else {
		return ().into_any();
	};

	let target_handle = initial.kind.has_target_handle().then(|| {
		let id = id.clone();
		view! {
			<div
				class="flow-handle target"
				on:mousedown=|ev: MouseEvent| ev.stop_propagation()
				on:mouseup=move |ev: MouseEvent| {
					ev.stop_propagation();
					finish_connection(state, &id);
				}
			/>
		}
	});
	let source_handle = initial.kind.has_source_handle().then(|| {
		let id = id.clone();
		view! {
			<div
				class="flow-handle source"
				on:mousedown=move |ev: MouseEvent| {
					if ev.button() != 0 {
						return;
					}
					ev.stop_propagation();
					let (x, y) = pane.point(&ev);
					state.update(|s| s.begin_connect(&id, None, x, y));
				}
			/>
		}
	});

	let aria_label = initial.data.as_ref().map(NodeLabel::plain_text);
	let (down_id, click_id, dbl_id) = (id.clone(), id.clone(), id);
	view! {
		<div
			aria-label=aria_label
			class=move || node.with(|n| n.as_ref().map(node_class).unwrap_or_default())
			style=move || node.with(|n| n.as_ref().map(node_style).unwrap_or_default())
			on:mousedown=move |ev: MouseEvent| {
				if ev.button() != 0 {
					return;
				}
				ev.stop_propagation();
				let (x, y) = pane.point(&ev);
				let additive = is_additive(&ev);
				change_selection(state, |s| {
					let selected = s.node(&down_id).is_some_and(|n| n.selected);
					if additive || !selected {
						s.select_node(&down_id, additive);
					}
					s.begin_drag(&down_id, x, y);
				});
			}
			on:click=move |_: MouseEvent| emit(FlowEvent::NodeClick(click_id.clone()))
			on:dblclick=move |_: MouseEvent| emit(FlowEvent::NodeDoubleClick(dbl_id.clone()))
		>
			{target_handle}
			<div class="flow-node-label">{initial.data.map(label_view)}</div>
			{source_handle}
		</div>
	}
	.into_any()
}

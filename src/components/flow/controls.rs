use leptos::prelude::*;
use web_sys::MouseEvent;

use super::events::{FlowEvent, emit};
use super::state::FlowState;

fn after_move(state: RwSignal<FlowState>, f: fn(&mut FlowState)) {
	state.update(f);
	emit(FlowEvent::MoveEnd(state.with_untracked(|s| s.viewport)));
}

/// Zoom and fit-view buttons, bottom centre of the pane.
#[component]
pub fn Controls(state: RwSignal<FlowState>) -> impl IntoView {
	view! {
		<div
			class="flow-controls"
			on:mousedown=|ev: MouseEvent| ev.stop_propagation()
		>
			<button
				type="button"
				title="zoom in"
				aria-label="zoom in"
				on:click=move |_| after_move(state, FlowState::zoom_in)
			>
				"+"
			</button>
			<button
				type="button"
				title="zoom out"
				aria-label="zoom out"
				on:click=move |_| after_move(state, FlowState::zoom_out)
			>
				"−"
			</button>
			<button
				type="button"
				title="fit view"
				aria-label="fit view"
				on:click=move |_| after_move(state, FlowState::fit_view)
			>
				"⤢"
			</button>
		</div>
	}
}

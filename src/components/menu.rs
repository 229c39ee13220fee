use leptos::prelude::*;
use web_sys::MouseEvent;

use super::comments::CommentsPopover;
use super::icons::{ClockIcon, EllipsisIcon};

/// Button strip in the top-right corner of the diagram.
#[component]
pub fn Menu() -> impl IntoView {
	view! {
		<div class="flow-menu" on:mousedown=|ev: MouseEvent| ev.stop_propagation()>
			<CommentsPopover />
			<button disabled type="button" class="menu-button middle" aria-label="History">
				<ClockIcon />
			</button>
			<button disabled type="button" class="menu-button last" aria-label="More">
				<EllipsisIcon />
			</button>
		</div>
	}
}

use leptos::prelude::*;

use crate::components::comments::provide_inbox;
use crate::components::flow::{FlowCanvas, FlowState};
use crate::components::menu::Menu;
use crate::config::AppConfig;

/// Default Home Page: the seeded diagram with the comments menu on top.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let state = RwSignal::new(FlowState::seeded(config.flow));
	provide_inbox();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-flow">
				<FlowCanvas state=state>
					<Menu />
				</FlowCanvas>
			</div>
		</ErrorBoundary>
	}
}

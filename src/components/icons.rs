//! Inline SVG icons for the diagram menu.

use leptos::prelude::*;

/// Speech bubble with a dot in the top-right corner when something is unread.
#[component]
pub fn MessageIcon(#[prop(into)] has_unread: Signal<bool>) -> impl IntoView {
	view! {
		<svg width="16" height="16" viewBox="0 0 16 16" fill="none" aria-hidden="true">
			<path
				d="M2.5 3.5C2.5 2.95 2.95 2.5 3.5 2.5H12.5C13.05 2.5 13.5 2.95 13.5 3.5V10.5C13.5 11.05 13.05 11.5 12.5 11.5H6L3.5 13.5V11.5H3.5C2.95 11.5 2.5 11.05 2.5 10.5V3.5Z"
				stroke="currentColor"
				stroke-linejoin="round"
			/>
			<Show when=move || has_unread.get()>
				<circle cx="13" cy="3" r="2.5" fill="#0180FE" stroke="white" />
			</Show>
		</svg>
	}
}

#[component]
pub fn ClockIcon() -> impl IntoView {
	view! {
		<svg width="16" height="16" viewBox="0 0 16 16" fill="none" aria-hidden="true">
			<circle cx="8" cy="8" r="5.5" stroke="currentColor" />
			<path d="M8 5V8L10 9.5" stroke="currentColor" stroke-linecap="round" />
		</svg>
	}
}

#[component]
pub fn EllipsisIcon() -> impl IntoView {
	view! {
		<svg width="16" height="16" viewBox="0 0 16 16" fill="currentColor" aria-hidden="true">
			<circle cx="4" cy="8" r="1.25" />
			<circle cx="8" cy="8" r="1.25" />
			<circle cx="12" cy="8" r="1.25" />
		</svg>
	}
}

#[component]
pub fn CloseIcon() -> impl IntoView {
	view! {
		<svg width="12" height="12" viewBox="0 0 12 12" fill="none" aria-hidden="true">
			<path d="M2 2L10 10M10 2L2 10" stroke="currentColor" stroke-linecap="round" />
		</svg>
	}
}

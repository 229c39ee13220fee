use leptos::ev;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{KeyboardEvent, MouseEvent};

use super::inbox::{Inbox, Thread};
use super::use_unread_threads_count;
use crate::components::icons::{CloseIcon, MessageIcon};
use crate::config::AppConfig;

fn format_time(created_at: f64) -> String {
	js_sys::Date::new(&JsValue::from_f64(created_at))
		.to_locale_time_string("en-US")
		.into()
}

fn thread_view(inbox: RwSignal<Inbox>, thread: Thread) -> impl IntoView {
	let id = thread.id.clone();
	view! {
		<li
			class="comments-thread"
			class:unread=thread.unread
			on:click=move |_: MouseEvent| {
				inbox.update(|inbox| {
					if inbox.mark_read(&id) {
						debug!("thread `{id}` read");
					}
				});
			}
		>
			<div class="comments-thread-meta">
				<span class="comments-thread-author">{thread.author}</span>
				<time>{format_time(thread.created_at)}</time>
			</div>
			<p class="comments-thread-body">{thread.body}</p>
		</li>
	}
}

/// Message button that toggles the comments inbox.
#[component]
pub fn CommentsPopover() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let inbox = use_context::<RwSignal<Inbox>>().unwrap_or_else(|| RwSignal::new(Inbox::default()));
	let unread = use_unread_threads_count();
	let (open, set_open) = signal(false);

	let keydown = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if ev.key() == "Escape" {
			set_open.set(false);
		}
	});
	on_cleanup(move || keydown.remove());

	let theme_vars = config.theme.css_variables();
	let workspace = config.comments.workspace.name;
	let author = config.comments.user.name;
	let add_comment = move |_: MouseEvent| {
		inbox.update(|inbox| {
			let thread = inbox.add_thread(&author, "New comment", js_sys::Date::now());
			debug!("added {} in {workspace}", thread.id);
		});
	};

	view! {
		<div class="comments-popover">
			<button
				type="button"
				class="menu-button first"
				aria-label="Open comments"
				aria-expanded=move || open.get().to_string()
				on:click=move |_| set_open.update(|open| *open = !*open)
			>
				<MessageIcon has_unread=Signal::derive(move || unread.get() > 0) />
			</button>
			<Show when=move || open.get()>
				<div class="comments-panel" role="dialog" style=theme_vars.clone()>
					<div class="comments-header">
						<div class="comments-title">"Comments"</div>
						<button
							type="button"
							class="comments-close"
							aria-label="Close"
							on:click=move |_| set_open.set(false)
						>
							<CloseIcon />
						</button>
					</div>
					<ul class="comments-inbox">
						{move || {
							let threads = inbox.with(|inbox| inbox.threads().to_vec());
							if threads.is_empty() {
								view! { <li class="comments-empty">"No comments yet"</li> }.into_any()
							} else {
								threads
									.into_iter()
									.rev()
									.map(|thread| thread_view(inbox, thread))
									.collect_view()
									.into_any()
							}
						}}
					</ul>
					<button type="button" class="comments-add" on:click=add_comment.clone()>
						"Add comment"
					</button>
					<svg
						class="comments-arrow"
						width="28"
						height="11.928888"
						viewBox="0 0 28 11.928888"
						fill="none"
					>
						<path
							d="m 10.4645,10.46443 c 1.9526,1.952613 5.1185,1.952611 7.0711,-10e-6 L 28,0 H 0 Z"
							fill="#ffffff"
						/>
					</svg>
				</div>
			</Show>
		</div>
	}
}

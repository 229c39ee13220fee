//! Comments panel: an in-memory inbox behind a popover in the diagram menu.

use leptos::prelude::*;

mod inbox;
mod popover;
mod theme;

pub use inbox::Inbox;
pub use popover::CommentsPopover;
pub use theme::CustomTheme;

/// Create the page-wide inbox and expose it to descendants.
pub fn provide_inbox() -> RwSignal<Inbox> {
	let inbox = RwSignal::new(Inbox::default());
	provide_context(inbox);
	inbox
}

/// Reactive count of unread threads; 0 outside an inbox context.
pub fn use_unread_threads_count() -> Signal<usize> {
	let inbox = use_context::<RwSignal<Inbox>>();
	Signal::derive(move || inbox.map(|inbox| inbox.with(Inbox::unread_count)).unwrap_or(0))
}

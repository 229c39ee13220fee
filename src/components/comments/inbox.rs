/// One comment thread as listed in the inbox.
#[derive(Clone, Debug, PartialEq)]
pub struct Thread {
	pub id: String,
	pub author: String,
	pub body: String,
	/// Milliseconds since the Unix epoch.
	pub created_at: f64,
	pub unread: bool,
}

/// In-memory thread list. Lives as long as the page; nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct Inbox {
	threads: Vec<Thread>,
	next_id: u64,
}

impl Inbox {
	pub fn threads(&self) -> &[Thread] {
		&self.threads
	}

	pub fn unread_count(&self) -> usize {
		self.threads.iter().filter(|thread| thread.unread).count()
	}

	/// Start a thread; it counts as unread until opened.
	pub fn add_thread(&mut self, author: &str, body: &str, created_at: f64) -> &Thread {
		self.next_id += 1;
		self.threads.push(Thread {
			id: format!("thread-{}", self.next_id),
			author: author.to_owned(),
			body: body.to_owned(),
			created_at,
			unread: true,
		});
		&self.threads[self.threads.len() - 1]
	}

	/// Returns false for an unknown or already-read thread.
	pub fn mark_read(&mut self, id: &str) -> bool {
		match self.threads.iter_mut().find(|thread| thread.id == id) {
			Some(thread) if thread.unread => {
				thread.unread = false;
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_inbox_has_no_unread() {
		assert_eq!(Inbox::default().unread_count(), 0);
	}

	#[test]
	fn new_thread_is_unread_until_marked() {
		let mut inbox = Inbox::default();
		let id = inbox.add_thread("Anonymous", "Looks good", 1.0).id.clone();
		inbox.add_thread("Anonymous", "Second", 2.0);
		assert_eq!(inbox.unread_count(), 2);

		assert!(inbox.mark_read(&id));
		assert!(!inbox.mark_read(&id));
		assert!(!inbox.mark_read("thread-99"));
		assert_eq!(inbox.unread_count(), 1);
		assert_eq!(inbox.threads().len(), 2);
	}

	#[test]
	fn thread_ids_are_unique() {
		let mut inbox = Inbox::default();
		let a = inbox.add_thread("a", "x", 0.0).id.clone();
		let b = inbox.add_thread("a", "x", 0.0).id.clone();
		assert_ne!(a, b);
	}
}

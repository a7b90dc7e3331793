/* src/notifier/subscriber.rs */

use crate::flag::FlagValue;

/// Receives value changes of the flags it was registered for.
///
/// Handlers run synchronously on the updating thread, with the subscription
/// lock held, and should be quick. They must not panic. Calling
/// [`Notifier::subscribe`](super::Notifier::subscribe) or
/// [`Notifier::subscriber_count`](super::Notifier::subscriber_count) from a
/// handler deadlocks; reading flags and formatting with `{:?}` are fine.
pub trait Subscriber: Send + Sync {
	fn changed(&self, name: &str, old: FlagValue, new: FlagValue);
}

impl<F> Subscriber for F
where
	F: Fn(&str, FlagValue, FlagValue) + Send + Sync,
{
	fn changed(&self, name: &str, old: FlagValue, new: FlagValue) {
		self(name, old, new)
	}
}

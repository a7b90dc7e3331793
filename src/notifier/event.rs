/* src/notifier/event.rs */

use crate::flag::FlagValue;

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Events broadcast by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagEvent {
	/// A flag changed its value across a replacement.
	Changed {
		name: String,
		old: FlagValue,
		new: FlagValue,
	},
}

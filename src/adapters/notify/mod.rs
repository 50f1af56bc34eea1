//! Notification adapters.

mod recording;

pub use recording::{NotifierCall, RecordingNotifier};

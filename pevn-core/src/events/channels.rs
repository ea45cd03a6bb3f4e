//! Event channel factories and handles.

use pevn_sdk::objects::RawEvent;
use tokio::sync::mpsc;

/// Default buffer size for event channels.
///
/// This provides enough buffer to handle bursts while keeping memory bounded.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for incoming raw events.
pub type RawEventSender = mpsc::Sender<RawEvent>;
/// Receiver handle for incoming raw events.
pub type RawEventReceiver = mpsc::Receiver<RawEvent>;

/// Create a new raw event channel.
///
/// Returns a (sender, receiver) pair. Multiple senders can be cloned from
/// the returned sender; a single `EventDispatcher` owns the receiver.
pub fn raw_event_channel() -> (RawEventSender, RawEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

use parking_lot::Mutex;

/// Emitted when a package's derived lock value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChanged {
    pub package_name: String,
    pub lock_version: Option<i64>,
}

/// Fan-out of preference changes. Subscribers see only events published
/// after they subscribed; nothing is replayed.
#[derive(Debug, Default)]
pub struct PreferenceChangeBus {
    subscribers: Mutex<Vec<flume::Sender<PreferenceChanged>>>,
}

impl PreferenceChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> flume::Receiver<PreferenceChanged> {
        let (sender, receiver) = flume::unbounded();
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Returns how many subscribers received the event. Subscribers whose
    /// receiver was dropped are pruned.
    pub fn publish(&self, event: PreferenceChanged) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Disconnects every subscriber once its queued events are consumed.
    pub fn close(&self) {
        self.subscribers.lock().clear();
    }
}

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::{Event, Level, Subscriber, subscriber::DefaultGuard};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

/// Counts the error events logged on the current thread.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    /// Start counting error events until the returned guard is dropped.
    ///
    /// The subscriber is thread local, so use it with the single-threaded
    /// runtime of `#[tokio::test]`.
    pub(crate) fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(registry().with(self.clone()))
    }

    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

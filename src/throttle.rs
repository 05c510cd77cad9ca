use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Pacing strategy applied before each catalog detail request.
///
/// The catalog API tolerates a modest request rate; the default strategy
/// sleeps a fixed interval. Implementations must be cheap to call even
/// when they end up not waiting at all.
pub trait Throttle: Send + Sync {
    fn wait(&self) -> impl Future<Output = ()> + Send;
}

/// Fixed-interval throttle. Not adaptive: it sleeps the same duration
/// regardless of how the upstream responds.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Throttle for FixedDelay {
    fn wait(&self) -> impl Future<Output = ()> + Send {
        sleep(self.delay)
    }
}

/// No-op strategy for tests.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn wait(&self) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

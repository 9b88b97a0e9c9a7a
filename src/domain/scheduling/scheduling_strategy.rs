use std::fmt::{self, Debug};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::elevator::elevator::Elevator;
use crate::domain::elevator::floor::Floor;

/// Decides which pending stop an elevator visits next.
///
/// Implementations read the elevator's queue and may change its direction, but never remove
/// or reorder requests. Served requests are purged by the caller once the elevator arrives.
pub trait SchedulingStrategy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the next floor to travel to, or the current floor when there is nothing to do.
    fn get_next_stop(&self, elevator: &mut Elevator) -> Floor;
}

/// Shared handle to the active strategy. Every clone sees a replacement immediately.
#[derive(Clone)]
pub struct StrategySlot {
    inner: Arc<RwLock<Arc<dyn SchedulingStrategy>>>,
}

impl StrategySlot {
    pub fn new(strategy: Arc<dyn SchedulingStrategy>) -> Self {
        StrategySlot { inner: Arc::new(RwLock::new(strategy)) }
    }

    /// Snapshot of the strategy, valid for a single scheduling decision.
    pub fn current(&self) -> Arc<dyn SchedulingStrategy> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Installs `strategy` and hands back the one it replaced.
    pub fn replace(&self, strategy: Arc<dyn SchedulingStrategy>) -> Arc<dyn SchedulingStrategy> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, strategy)
    }

    pub fn name(&self) -> &'static str {
        self.current().name()
    }
}

impl Debug for StrategySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StrategySlot").field(&self.current()).finish()
    }
}

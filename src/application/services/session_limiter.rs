use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps the number of streaming sessions open at the same time.
#[derive(Debug, Clone)]
pub struct SessionLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// Held for the lifetime of one streaming connection.
#[derive(Debug)]
pub struct SessionPermit {
    _permit: OwnedSemaphorePermit,
}

impl SessionLimiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn try_acquire(&self) -> Option<SessionPermit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| SessionPermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active(&self) -> usize {
        self.capacity
            .saturating_sub(self.semaphore.available_permits())
    }
}

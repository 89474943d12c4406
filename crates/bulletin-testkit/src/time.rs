//! Controllable time source for deterministic testing

use async_trait::async_trait;
use bulletin_core::effects::{PhysicalTimeEffects, TimeError};
use bulletin_core::PhysicalTime;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// A clock that tests move by hand.
///
/// `physical_time` reports the controlled timestamp. `sleep_ms` advances the
/// timestamp (unless frozen) and waits on tokio's timer, so tests running on
/// a paused runtime observe the delay without real waiting.
#[derive(Clone)]
pub struct ControllableTimeSource {
    current_ms: Arc<Mutex<u64>>,
    frozen: Arc<Mutex<bool>>,
    failing: Arc<Mutex<bool>>,
}

impl ControllableTimeSource {
    /// Create a time source starting at `initial_ms` since the epoch.
    pub fn new(initial_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(initial_ms)),
            frozen: Arc::new(Mutex::new(false)),
            failing: Arc::new(Mutex::new(false)),
        }
    }

    /// Advance the clock.
    pub fn advance_ms(&self, ms: u64) {
        let mut current = self.current_ms.lock();
        *current = current.saturating_add(ms);
    }

    /// Set the clock.
    pub fn set_ms(&self, ms: u64) {
        *self.current_ms.lock() = ms;
    }

    /// Current controlled timestamp.
    pub fn current_ms(&self) -> u64 {
        *self.current_ms.lock()
    }

    /// Stop `sleep_ms` from advancing the clock.
    pub fn freeze(&self) {
        *self.frozen.lock() = true;
    }

    /// Make every call fail with [`TimeError::ServiceUnavailable`].
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    fn check(&self) -> Result<(), TimeError> {
        if *self.failing.lock() {
            Err(TimeError::ServiceUnavailable)
        } else {
            Ok(())
        }
    }
}

impl Default for ControllableTimeSource {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl PhysicalTimeEffects for ControllableTimeSource {
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError> {
        self.check()?;
        Ok(PhysicalTime::from_millis(self.current_ms()))
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        self.check()?;
        tokio::time::sleep(Duration::from_millis(ms)).await;
        if !*self.frozen.lock() {
            self.advance_ms(ms);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_clock() {
        let time = ControllableTimeSource::new(1_000);
        time.sleep_ms(250).await.unwrap();
        assert_eq!(time.physical_time().await.unwrap().ts_ms, 1_250);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frozen_clock_does_not_move() {
        let time = ControllableTimeSource::new(10);
        time.freeze();
        time.sleep_ms(500).await.unwrap();
        assert_eq!(time.current_ms(), 10);
    }

    #[tokio::test]
    async fn test_failing_clock() {
        let time = ControllableTimeSource::default();
        time.set_failing(true);
        assert!(time.sleep_ms(1).await.is_err());
        assert!(time.physical_time().await.is_err());
    }
}

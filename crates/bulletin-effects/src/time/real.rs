//! Real time effect handler for production use

use async_trait::async_trait;
use bulletin_core::effects::{PhysicalTimeEffects, TimeError};
use bulletin_core::PhysicalTime;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time;

/// Real time handler: system clock for reads, tokio timers for delays.
///
/// Delays go through `tokio::time::sleep`, so a paused test runtime
/// (`start_paused = true`) drives them deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    async fn physical_time(&self) -> Result<PhysicalTime, TimeError> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TimeError::ClockUnavailable {
                reason: e.to_string(),
            })?;
        let ts_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Ok(PhysicalTime::from_millis(ts_ms))
    }

    async fn sleep_ms(&self, ms: u64) -> Result<(), TimeError> {
        time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}

use crate::api::location::error::LocationError;
use crate::devices::positioning::{PositionFix, PositionRequest, PositionSource};
use crate::utils::Clock;
use app_state::LocationSettings;
use common_types::LocationSample;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// Single-shot location resolution with timeout, staleness and retry
/// semantics.
///
/// Each call takes a generation number; only the newest generation may
/// publish its sample, so a slow request superseded by a retry reports
/// [`LocationError::Superseded`] instead of clobbering a fresher result.
pub struct LocationProvider {
    source: Arc<dyn PositionSource>,
    settings: LocationSettings,
    generation: AtomicU64,
    last_known: Mutex<Option<LocationSample>>,
    clock: Clock,
}

impl LocationProvider {
    #[must_use]
    pub fn new(source: Arc<dyn PositionSource>, settings: LocationSettings, clock: Clock) -> Self {
        Self {
            source,
            settings,
            generation: AtomicU64::new(0),
            last_known: Mutex::new(None),
            clock,
        }
    }

    /// Resolve the current position once.
    ///
    /// Failures never clear a previously resolved sample; it stays
    /// available through [`LocationProvider::last_known`].
    pub async fn current(&self) -> Result<LocationSample, LocationError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = PositionRequest::from_settings(&self.settings);
        debug!("Resolving position (generation {generation})");

        let fix = self.fresh_fix(&request, generation).await?;

        let sample = LocationSample {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy,
            timestamp: fix.timestamp,
        };

        // A retry that started after us may already have published; our
        // result is stale the moment a newer generation exists.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding superseded location result (generation {generation})");
            return Err(LocationError::Superseded);
        }

        info!(
            "Location obtained: {:.6}, {:.6} (accuracy {:?})",
            sample.latitude, sample.longitude, sample.accuracy
        );
        *self.last_known.lock().expect("lock poisoned") = Some(sample.clone());
        Ok(sample)
    }

    /// The externally exposed recovery path; identical to `current` and
    /// supersedes any in-flight resolution.
    pub async fn retry(&self) -> Result<LocationSample, LocationError> {
        self.current().await
    }

    /// Last successfully resolved sample, surviving later failures.
    #[must_use]
    pub fn last_known(&self) -> Option<LocationSample> {
        self.last_known.lock().expect("lock poisoned").clone()
    }

    /// Asks the source for a fix, enforcing the timeout and the
    /// maximum-age bound. Under `force_fresh` one immediate re-request is
    /// made when the service answered from a too-old cache; both attempts
    /// share a single deadline, so the whole resolution is bounded by
    /// `timeout_ms`.
    async fn fresh_fix(
        &self,
        request: &PositionRequest,
        generation: u64,
    ) -> Result<PositionFix, LocationError> {
        let max_age_ms = self.settings.maximum_age_ms as i64;
        let mut attempts_left = if self.settings.force_fresh { 2 } else { 1 };
        let deadline = Instant::now() + request.timeout;

        loop {
            attempts_left -= 1;
            let fix = match timeout_at(deadline, self.source.current_position(request)).await {
                Err(_) => return Err(LocationError::Timeout),
                Ok(result) => result?,
            };
            if self.generation.load(Ordering::SeqCst) != generation {
                return Err(LocationError::Superseded);
            }

            let age_ms = (self.clock)() - fix.timestamp;
            if age_ms <= max_age_ms {
                return Ok(fix);
            }
            warn!("Position fix is {age_ms} ms old (max {max_age_ms} ms)");
            if attempts_left == 0 {
                return Err(LocationError::StaleFix { age_ms });
            }
        }
    }
}

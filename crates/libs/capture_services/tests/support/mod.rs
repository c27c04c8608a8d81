//! Scripted device fakes shared by the service tests.
#![allow(dead_code)]

use app_state::LocationSettings;
use async_trait::async_trait;
use capture_services::devices::camera::{Camera, CameraOutcome, CameraRequest, MediaType};
use capture_services::devices::permissions::{PermissionGateway, PermissionRationale};
use capture_services::devices::positioning::{
    PositionError, PositionFix, PositionRequest, PositionSource,
};
use capture_services::utils::Clock;
use common_types::{CameraFacing, Capability, PermissionStatus};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn location_settings(timeout_ms: u64) -> LocationSettings {
    LocationSettings {
        high_accuracy: true,
        timeout_ms,
        maximum_age_ms: 10_000,
        force_fresh: true,
    }
}

pub fn camera_request() -> CameraRequest {
    CameraRequest {
        media_type: MediaType::Photo,
        save_to_photos: true,
        facing: CameraFacing::Back,
    }
}

pub fn fix_at(latitude: f64, longitude: f64, timestamp: i64) -> PositionFix {
    PositionFix {
        latitude,
        longitude,
        accuracy: Some(5.0),
        timestamp,
    }
}

/// Clock that starts at `start_ms` and can be advanced by tests.
pub fn ticking_clock(start_ms: i64) -> (Clock, Arc<AtomicI64>) {
    let now = Arc::new(AtomicI64::new(start_ms));
    let handle = now.clone();
    let clock: Clock = Arc::new(move || now.load(Ordering::SeqCst));
    (clock, handle)
}

/// Position source that plays back a script of delayed answers and counts
/// how often it was invoked.
#[derive(Default)]
pub struct ScriptedPositionSource {
    script: Mutex<VecDeque<(Duration, Result<PositionFix, PositionError>)>>,
    pub calls: AtomicUsize,
}

impl ScriptedPositionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, delay: Duration, answer: Result<PositionFix, PositionError>) {
        self.script
            .lock()
            .expect("lock poisoned")
            .push_back((delay, answer));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionSource for ScriptedPositionSource {
    async fn current_position(
        &self,
        _request: &PositionRequest,
    ) -> Result<PositionFix, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("lock poisoned").pop_front();
        let Some((delay, answer)) = next else {
            return Err(PositionError::Unavailable("script exhausted".into()));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer
    }
}

/// Camera that plays back scripted outcomes.
#[derive(Default)]
pub struct ScriptedCamera {
    script: Mutex<VecDeque<CameraOutcome>>,
}

impl ScriptedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: CameraOutcome) {
        self.script.lock().expect("lock poisoned").push_back(outcome);
    }
}

#[async_trait]
impl Camera for ScriptedCamera {
    async fn launch(&self, _request: &CameraRequest) -> CameraOutcome {
        self.script
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or(CameraOutcome::Cancelled)
    }
}

/// Permission gateway with scripted check/request answers.
#[derive(Default)]
pub struct ScriptedGateway {
    check_answers: Mutex<HashMap<Capability, Option<PermissionStatus>>>,
    request_answers: Mutex<HashMap<Capability, PermissionStatus>>,
    pub requests: AtomicUsize,
    pub settings_opened: AtomicBool,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_check(&self, capability: Capability, status: Option<PermissionStatus>) {
        self.check_answers
            .lock()
            .expect("lock poisoned")
            .insert(capability, status);
    }

    pub fn on_request(&self, capability: Capability, status: PermissionStatus) {
        self.request_answers
            .lock()
            .expect("lock poisoned")
            .insert(capability, status);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionGateway for ScriptedGateway {
    async fn check(&self, capability: Capability) -> Option<PermissionStatus> {
        self.check_answers
            .lock()
            .expect("lock poisoned")
            .get(&capability)
            .copied()
            .flatten()
    }

    async fn request(
        &self,
        capability: Capability,
        _rationale: &PermissionRationale,
    ) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.request_answers
            .lock()
            .expect("lock poisoned")
            .get(&capability)
            .copied()
            .unwrap_or(PermissionStatus::Denied)
    }

    async fn open_settings(&self) {
        self.settings_opened.store(true, Ordering::SeqCst);
    }
}

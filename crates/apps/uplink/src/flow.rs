use crate::devices::{FileCamera, ProvisionedGateway, StaticPositionSource};
use app_state::AppSettings;
use capture_services::api::capture::service::CaptureController;
use capture_services::api::location::service::LocationProvider;
use capture_services::api::permissions::service::PermissionCoordinator;
use capture_services::api::photos::service::PhotoRepository;
use capture_services::api::upload::service::UploadPipeline;
use capture_services::devices::camera::CameraRequest;
use capture_services::storage::{ObjectStore, PhotoStore, ProgressObserver};
use capture_services::utils::system_clock;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_types::{CaptureSession, Capability, PermissionStatus, UploadProgress};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct CaptureArgs {
    pub photo: PathBuf,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

/// One capture session end to end: permissions, location, capture, upload.
pub async fn run_capture(
    settings: &AppSettings,
    objects: Arc<dyn ObjectStore>,
    photos: Arc<dyn PhotoStore>,
    args: CaptureArgs,
) -> Result<()> {
    let clock = system_clock();
    let mut session = CaptureSession::new();

    let coordinator = PermissionCoordinator::new(Arc::new(ProvisionedGateway));
    let snapshot = coordinator.resolve_all().await;
    session.permissions_resolved(snapshot);

    // Blocked means settings deep-link only; nothing downstream may start.
    ensure_granted(&coordinator, snapshot.location, Capability::PreciseLocation).await?;
    ensure_granted(&coordinator, snapshot.camera, Capability::Camera).await?;

    let provider = LocationProvider::new(
        Arc::new(StaticPositionSource {
            latitude: args.latitude,
            longitude: args.longitude,
            accuracy: args.accuracy,
            clock: clock.clone(),
        }),
        settings.location.clone(),
        clock.clone(),
    );
    let sample = match provider.current().await {
        Ok(sample) => sample,
        Err(err) => {
            warn!("Location error: {err}; retrying once");
            provider.retry().await?
        }
    };
    session.location_resolved(sample);

    let controller = CaptureController::new(
        Arc::new(FileCamera::new(args.photo)),
        CameraRequest::from_settings(&settings.camera),
    );
    match controller.capture().await? {
        Some(asset) => session.asset_captured(asset),
        None => {
            info!("Capture cancelled; nothing to upload");
            return Ok(());
        }
    }

    let pipeline = UploadPipeline::new(objects, photos, settings.storage.prefix.clone(), clock);
    let observer: ProgressObserver = Arc::new(|progress: UploadProgress| {
        info!("Upload progress: {:.1}%", progress.percent());
    });

    session.upload_started();
    let result = pipeline
        .upload(
            session.asset.as_ref(),
            session.location.as_ref(),
            Some(observer),
        )
        .await;

    match result {
        Ok(outcome) => {
            controller.take_asset();
            session.upload_succeeded(outcome.record_id.clone());
            info!(
                "Image and location saved: record {} at {}",
                outcome.record_id, outcome.image_url
            );
            Ok(())
        }
        Err(err) => {
            // The controller still holds the asset; a retry re-invokes the
            // pipeline with it, no re-capture needed.
            session.upload_failed(err.to_string());
            error!("Upload failed: {err}");
            Err(eyre!("upload failed: {err}"))
        }
    }
}

/// Gate a capability; any non-granted status surfaces the settings
/// deep-link before failing the flow.
async fn ensure_granted(
    coordinator: &PermissionCoordinator,
    status: PermissionStatus,
    capability: Capability,
) -> Result<()> {
    if let Err(err) = PermissionCoordinator::require_granted(status, capability) {
        coordinator.open_settings().await;
        return Err(eyre!(err));
    }
    Ok(())
}

/// Print the shared feed, newest first, one JSON document per line.
pub async fn run_feed(photos: Arc<dyn PhotoStore>) -> Result<()> {
    let repository = PhotoRepository::new(photos);
    let records = repository.list_photos().await?;
    info!("Fetched {} photos", records.len());
    for record in records {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

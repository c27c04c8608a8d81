mod support;

use capture_services::api::photos::service::PhotoRepository;
use capture_services::api::upload::error::UploadError;
use capture_services::api::upload::service::UploadPipeline;
use capture_services::storage::{MemoryObjectStore, MemoryPhotoStore, ProgressObserver};
use capture_services::utils::fixed_clock;
use common_types::{CaptureSession, CapturedAsset, LocationSample, UploadProgress};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::ticking_clock;
use tempfile::TempDir;

const NOW_MS: i64 = 1_700_000_000_000;
const CONTENT: &[u8] = b"not actually a jpeg";

fn photo_file(dir: &TempDir, name: &str) -> CapturedAsset {
    let path = dir.path().join(name);
    std::fs::write(&path, CONTENT).expect("write test photo");
    CapturedAsset::new(path.display().to_string())
}

fn sample() -> LocationSample {
    LocationSample {
        latitude: 37.78825,
        longitude: -122.4324,
        accuracy: Some(5.0),
        timestamp: NOW_MS,
    }
}

#[tokio::test]
async fn upload_publishes_blob_then_exactly_one_record() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let events: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let observer: ProgressObserver = {
        let events = events.clone();
        Arc::new(move |progress| events.lock().expect("lock").push(progress))
    };

    let outcome = pipeline
        .upload(Some(&asset), Some(&sample()), Some(observer))
        .await
        .expect("upload succeeds");

    assert_eq!(outcome.file_name, "photo_1700000000000_snap.jpg");
    assert_eq!(
        objects.bytes("images/photo_1700000000000_snap.jpg"),
        Some(CONTENT.to_vec())
    );

    // The record is durably visible to the read projection.
    let repository = PhotoRepository::new(photos);
    let records = repository.list_photos().await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, outcome.record_id);
    assert_eq!(records[0].location, sample());
    assert_eq!(records[0].file_name, "photo_1700000000000_snap.jpg");

    // The stored URL dereferences the blob that was written.
    assert_eq!(
        objects.blob_for_url(&outcome.image_url),
        Some(CONTENT.to_vec())
    );
    assert_eq!(records[0].image_url, outcome.image_url.to_string());

    // Progress ran from zero to completion without going backwards.
    let events = events.lock().expect("lock");
    assert!(events.len() >= 2);
    assert_eq!(events[0].bytes_transferred, 0);
    assert!(events.last().expect("at least one event").is_complete());
    assert!(
        events
            .windows(2)
            .all(|w| w[0].bytes_transferred <= w[1].bytes_transferred)
    );
}

#[tokio::test]
async fn missing_location_fails_before_any_io() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let err = pipeline
        .upload(Some(&asset), None, None)
        .await
        .expect_err("no location");
    assert!(matches!(err, UploadError::MissingLocation));
    assert_eq!(objects.object_count(), 0);
    assert_eq!(photos.row_count(), 0);
}

#[tokio::test]
async fn missing_asset_fails_before_any_io() {
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let err = pipeline
        .upload(None, Some(&sample()), None)
        .await
        .expect_err("no asset");
    assert!(matches!(err, UploadError::MissingAsset));
    assert_eq!(objects.object_count(), 0);
    assert_eq!(photos.row_count(), 0);
}

#[tokio::test]
async fn transfer_failure_writes_no_metadata() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    objects.fail_puts(true);
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let err = pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect_err("transfer fails");
    assert!(matches!(err, UploadError::Transfer(_)));
    assert_eq!(photos.row_count(), 0);
}

#[tokio::test]
async fn metadata_failure_leaves_an_orphaned_blob() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    photos.fail_appends(true);
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let err = pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect_err("metadata fails");
    assert!(matches!(err, UploadError::Metadata(_)));

    // The blob stays; nothing references it and nothing cleans it up.
    assert_eq!(objects.object_count(), 1);
    let repository = PhotoRepository::new(photos);
    assert!(repository.list_photos().await.expect("list").is_empty());
}

#[tokio::test]
async fn upload_is_restartable_from_scratch_after_failure() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    let (clock, now) = ticking_clock(NOW_MS);
    let pipeline = UploadPipeline::new(objects.clone(), photos.clone(), "images", clock);

    photos.fail_appends(true);
    pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect_err("first attempt fails at metadata");

    photos.fail_appends(false);
    now.fetch_add(1_000, Ordering::SeqCst);
    let outcome = pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect("second attempt succeeds");

    assert_eq!(outcome.file_name, "photo_1700000001000_snap.jpg");
    assert_eq!(photos.row_count(), 1);
    // Orphan from the first attempt plus the published blob.
    assert_eq!(objects.object_count(), 2);
}

#[tokio::test]
async fn concurrent_second_upload_is_rejected_not_queued() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    objects.set_put_delay(Duration::from_millis(100));
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = Arc::new(UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    ));

    let first = {
        let pipeline = pipeline.clone();
        let asset = asset.clone();
        tokio::spawn(async move { pipeline.upload(Some(&asset), Some(&sample()), None).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = pipeline.upload(Some(&asset), Some(&sample()), None).await;

    assert!(matches!(second, Err(UploadError::AlreadyInFlight)));
    first
        .await
        .expect("task completes")
        .expect("first upload succeeds");
    assert_eq!(photos.row_count(), 1);
}

#[tokio::test]
async fn distinct_capture_instants_give_distinct_keys() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    let photos = Arc::new(MemoryPhotoStore::new());
    let (clock, now) = ticking_clock(NOW_MS);
    let pipeline = UploadPipeline::new(objects.clone(), photos.clone(), "images", clock);

    let first = pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect("first upload");
    now.fetch_add(1, Ordering::SeqCst);
    let second = pipeline
        .upload(Some(&asset), Some(&sample()), None)
        .await
        .expect("second upload");

    // Same source basename, different capture instants, different keys.
    assert_ne!(first.file_name, second.file_name);
    assert_eq!(objects.object_count(), 2);
    assert_eq!(photos.row_count(), 2);
}

#[tokio::test]
async fn failed_upload_keeps_the_asset_for_retry() {
    let dir = TempDir::new().expect("tempdir");
    let asset = photo_file(&dir, "snap.jpg");
    let objects = Arc::new(MemoryObjectStore::new());
    objects.fail_puts(true);
    let photos = Arc::new(MemoryPhotoStore::new());
    let pipeline = UploadPipeline::new(
        objects.clone(),
        photos.clone(),
        "images",
        fixed_clock(NOW_MS),
    );

    let mut session = CaptureSession::new();
    session.location_resolved(sample());
    session.asset_captured(asset);

    session.upload_started();
    let err = pipeline
        .upload(session.asset.as_ref(), session.location.as_ref(), None)
        .await
        .expect_err("transfer fails");
    session.upload_failed(err.to_string());

    // The in-memory asset and sample survive; the retry is the same
    // publish again, not a re-capture.
    assert!(session.asset.is_some());
    assert!(session.location.is_some());
    assert!(session.can_upload());

    objects.fail_puts(false);
    session.upload_started();
    let outcome = pipeline
        .upload(session.asset.as_ref(), session.location.as_ref(), None)
        .await
        .expect("retry succeeds");
    session.upload_succeeded(outcome.record_id);

    assert!(session.asset.is_none());
    assert_eq!(photos.row_count(), 1);
}

use crate::storage::{ObjectStore, PhotoStore, ProgressObserver, StoreError, StoredPhoto};
use crate::utils::nice_id;
use async_trait::async_trait;
use chrono::Utc;
use common_types::{NewPhotoRecord, UploadProgress};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use url::Url;

const PROGRESS_CHUNK: usize = 64 * 1024;

/// In-memory object store. Objects resolve to `memory://<key>` URLs.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    /// Artificial latency per put, to widen concurrency windows in tests.
    put_delay: Mutex<Duration>,
    fail_puts: AtomicBool,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_put_delay(&self, delay: Duration) {
        *self.put_delay.lock().expect("lock poisoned") = delay;
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("lock poisoned").len()
    }

    #[must_use]
    pub fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().expect("lock poisoned").get(key).cloned()
    }

    /// Dereference a `memory://` URL back to the stored blob.
    #[must_use]
    pub fn blob_for_url(&self, url: &Url) -> Option<Vec<u8>> {
        let key = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
        self.bytes(&key)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        source: &Path,
        observer: Option<ProgressObserver>,
    ) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        let delay = *self.put_delay.lock().expect("lock poisoned");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let bytes = tokio::fs::read(source).await?;
        let total_bytes = bytes.len() as u64;
        if let Some(cb) = &observer {
            cb(UploadProgress {
                bytes_transferred: 0,
                total_bytes,
            });
            let mut sent = 0usize;
            while sent < bytes.len() {
                sent = (sent + PROGRESS_CHUNK).min(bytes.len());
                cb(UploadProgress {
                    bytes_transferred: sent as u64,
                    total_bytes,
                });
            }
        }

        self.objects
            .lock()
            .expect("lock poisoned")
            .insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<Url, StoreError> {
        if !self.objects.lock().expect("lock poisoned").contains_key(key) {
            return Err(StoreError::NotFound(key.to_owned()));
        }
        Ok(Url::parse(&format!("memory://{key}"))?)
    }
}

/// In-memory photo collection.
///
/// `seed` admits raw documents (including partial ones) so ordering and
/// filtering behavior can be exercised without a database.
#[derive(Default)]
pub struct MemoryPhotoStore {
    rows: Mutex<Vec<StoredPhoto>>,
    fail_appends: AtomicBool,
    fail_lists: AtomicBool,
}

impl MemoryPhotoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn seed(&self, row: StoredPhoto) {
        self.rows.lock().expect("lock poisoned").push(row);
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn append(&self, record: NewPhotoRecord) -> Result<String, StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        let id = nice_id(20);
        self.rows.lock().expect("lock poisoned").push(StoredPhoto {
            id: id.clone(),
            image_url: Some(record.image_url),
            location: Some(record.location),
            uploaded_at: Utc::now(),
            file_name: Some(record.file_name),
        });
        Ok(id)
    }

    async fn list_by_uploaded_desc(&self) -> Result<Vec<StoredPhoto>, StoreError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        let mut rows = self.rows.lock().expect("lock poisoned").clone();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }
}

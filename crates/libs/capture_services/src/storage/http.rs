use crate::storage::{ObjectStore, ProgressObserver, StoreError};
use async_trait::async_trait;
use common_types::UploadProgress;
use futures_util::TryStreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::codec::{BytesCodec, FramedRead};
use tracing::debug;
use url::Url;

/// Object store speaking plain HTTP: `PUT <base>/<key>` for writes, the
/// same URL serves reads.
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: Url,
}

impl HttpObjectStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(&base)?,
        })
    }

    fn object_url(&self, key: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(key)?)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        key: &str,
        source: &Path,
        observer: Option<ProgressObserver>,
    ) -> Result<(), StoreError> {
        let total_bytes = tokio::fs::metadata(source).await?.len();
        let file = tokio::fs::File::open(source).await?;

        if let Some(cb) = &observer {
            cb(UploadProgress {
                bytes_transferred: 0,
                total_bytes,
            });
        }

        let transferred = Arc::new(AtomicU64::new(0));
        let stream = FramedRead::new(file, BytesCodec::new()).inspect_ok(move |chunk| {
            let so_far =
                transferred.fetch_add(chunk.len() as u64, Ordering::SeqCst) + chunk.len() as u64;
            if let Some(cb) = &observer {
                cb(UploadProgress {
                    bytes_transferred: so_far,
                    total_bytes,
                });
            }
        });

        let url = self.object_url(key)?;
        let mime = mime_guess::from_path(source).first_or_octet_stream();
        debug!("PUT {} ({} bytes, {})", url, total_bytes, mime);

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, mime.as_ref())
            .header(CONTENT_LENGTH, total_bytes)
            .body(Body::wrap_stream(stream))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote { status, body });
        }

        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<Url, StoreError> {
        self.object_url(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_key_onto_base() {
        let store = HttpObjectStore::new("http://localhost:9000/snapmap").unwrap();
        let url = store.object_url("images/photo_1_a.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/snapmap/images/photo_1_a.jpg"
        );
    }
}

//! In-memory collaborator fakes.
//!
//! The blob store and the tag recommender are external systems; these fakes
//! record every call so tests can assert on call counts and ordering, and
//! can be flipped into failure mode to exercise the partial-failure paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use post_service::error::{AppError, Result};
use post_service::models::ImageUpload;
use post_service::services::{BlobStore, TagRecommender};

/// Blob store fake returning deterministic URLs and recording every
/// upload/delete.
#[derive(Default)]
pub struct RecordingBlobStore {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl RecordingBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn upload(&self, image: &ImageUpload, dir: &str) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::UploadFailure("simulated upload failure".into()));
        }

        let mut uploads = self.uploads.lock().unwrap();
        let url = format!(
            "https://blobs.test/{}/{}_{}",
            dir,
            uploads.len(),
            image.file_name
        );
        uploads.push(url.clone());

        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        if url.is_empty() {
            return Ok(());
        }

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::DeleteFailure("simulated delete failure".into()));
        }

        self.deletes.lock().unwrap().push(url.to_string());

        Ok(())
    }
}

/// Recommender fake returning a preset tag list and recording the texts it
/// was asked about.
#[derive(Default)]
pub struct ScriptedRecommender {
    tags: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl ScriptedRecommender {
    pub fn new(tags: Vec<&str>) -> Self {
        Self {
            tags: Mutex::new(tags.into_iter().map(String::from).collect()),
            calls: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_tags(&self, tags: Vec<&str>) {
        *self.tags.lock().unwrap() = tags.into_iter().map(String::from).collect();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TagRecommender for ScriptedRecommender {
    async fn recommend(&self, text: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(text.to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::RecommendationFailure(
                "simulated recommender outage".into(),
            ));
        }

        Ok(self.tags.lock().unwrap().clone())
    }
}

/// Build a test image upload
pub fn test_image(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

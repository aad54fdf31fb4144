use crate::models::errors::AppError;
use crate::models::gallery_item::{seed_gallery, Category, CategoryFilter, GalleryItem, NewGalleryItem};
use crate::services::key_value::KeyValueStore;
use crate::services::pagination::{clamp_page, paginate, total_pages, Page};
use crate::utils::security::{
    is_valid_file_size, is_valid_image_type, sanitize_filename, sanitize_text, UploadedFile,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Storage key the gallery has always lived under
pub const DEFAULT_GALLERY_KEY: &str = "mockGallery";

/// Outcome of a delete; deleting an unknown ID is not an error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RemoveOutcome {
    pub removed: bool,
}

/// The gallery collection, newest first, persisted as one JSON array.
///
/// Every operation reads and rewrites the whole array under one lock, so
/// writers in this process never interleave. Another process writing the same
/// key still wins or loses wholesale.
pub struct GalleryStore {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    write_lock: Mutex<()>,
}

impl GalleryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_GALLERY_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns every item, most recently added first. The first call against
    /// an empty backend stores and returns the seed collection.
    pub async fn list(&self) -> Result<Vec<GalleryItem>, AppError> {
        let _guard = self.write_lock.lock().await;
        self.load().await
    }

    /// Validates and publishes a new item at the front of the gallery
    pub async fn add(&self, input: NewGalleryItem) -> Result<GalleryItem, AppError> {
        let title = sanitize_text(input.title.as_str()).trim().to_string();
        let description = sanitize_text(input.description.as_str()).trim().to_string();

        if title.is_empty() {
            return Err(AppError::validation_failed("Title cannot be empty"));
        }
        if description.is_empty() {
            return Err(AppError::validation_failed("Description cannot be empty"));
        }
        let category: Category = input.category.parse()?;
        if input.image_data.trim().is_empty() {
            return Err(AppError::validation_failed("Please upload an image"));
        }

        let item = GalleryItem::new(title, description, category, input.image_data);

        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        items.insert(0, item.clone());
        self.save(&items).await?;

        tracing::info!("Added gallery item {} ({})", item.id, item.category);
        Ok(item)
    }

    /// Checks the originating file before publishing the item
    pub async fn add_upload(
        &self,
        input: NewGalleryItem,
        file: &UploadedFile,
        max_upload_mb: u64,
    ) -> Result<GalleryItem, AppError> {
        if !is_valid_image_type(file) {
            tracing::warn!(
                "Rejected upload {} with type {:?}",
                sanitize_filename(file.name.as_str()),
                file.media_type
            );
            return Err(AppError::validation_failed(
                "Only JPEG, PNG, WebP and GIF images are supported",
            ));
        }

        if !is_valid_file_size(file, max_upload_mb) {
            tracing::warn!(
                "Rejected upload {} of {} bytes",
                sanitize_filename(file.name.as_str()),
                file.size
            );
            return Err(AppError::validation_failed(format!(
                "Image must be at most {} MB",
                max_upload_mb
            )));
        }

        self.add(input).await
    }

    /// Removes the item with `id`. The collection is rewritten either way.
    pub async fn remove(&self, id: &str) -> Result<RemoveOutcome, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() != before;

        self.save(&items).await?;

        if removed {
            tracing::info!("Removed gallery item {}", id);
        } else {
            tracing::debug!("Gallery item {} was already absent", id);
        }

        Ok(RemoveOutcome { removed })
    }

    /// Filters by category, clamps `page`, and returns that page
    pub async fn browse(
        &self,
        filter: CategoryFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<GalleryItem>, AppError> {
        let items = filter_by_category(&self.list().await?, filter);
        let page = clamp_page(page, total_pages(items.len(), page_size));
        Ok(paginate(&items, page, page_size))
    }

    async fn load(&self) -> Result<Vec<GalleryItem>, AppError> {
        match self.store.get(&self.storage_key).await? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                tracing::warn!("Stored gallery under {} is corrupt: {}", self.storage_key, e);
                AppError::storage_failed(format!("Stored gallery is not valid JSON: {}", e))
            }),
            None => {
                let seed = seed_gallery();
                self.save(&seed).await?;
                tracing::debug!("Seeded gallery with {} items", seed.len());
                Ok(seed)
            }
        }
    }

    async fn save(&self, items: &[GalleryItem]) -> Result<(), AppError> {
        let json = serde_json::to_string(items)
            .map_err(|e| AppError::storage_failed(format!("Failed to encode gallery: {}", e)))?;
        self.store.set(&self.storage_key, json).await
    }
}

/// Items matching the gallery filter, order preserved
pub fn filter_by_category(items: &[GalleryItem], filter: CategoryFilter) -> Vec<GalleryItem> {
    items.iter().filter(|item| filter.matches(item)).cloned().collect()
}

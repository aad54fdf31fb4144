#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;

use serde_json::{Map, Value};
use tailor_gallery::{
    models::gallery_item::NewGalleryItem,
    services::key_value::MemoryStore,
    utils::{config::SiteConfig, security::UploadedFile},
    SiteState,
};

pub const TEST_ORIGIN: &str = "https://sandhoratailor.test";

/// Test configuration pointing at a fake origin
pub fn test_config() -> SiteConfig {
    SiteConfig {
        site_origin: TEST_ORIGIN.to_string(),
        ..SiteConfig::default()
    }
}

/// Site wired to an in-memory backend; the backend handle is returned too
pub fn setup_memory_site() -> (SiteState, MemoryStore) {
    let backend = MemoryStore::new();
    let site = SiteState::with_store(test_config(), Arc::new(backend.clone()));
    (site, backend)
}

/// Site wired to a file store in a fresh temporary directory.
/// Keep the `TempDir` alive for as long as the site is used.
pub fn setup_file_site() -> (SiteState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let site = setup_file_site_in(&temp_dir);
    (site, temp_dir)
}

pub fn setup_file_site_in(temp_dir: &TempDir) -> SiteState {
    let config = SiteConfig {
        data_dir: Some(temp_dir.path().to_path_buf()),
        ..test_config()
    };
    SiteState::new(config).expect("Failed to create file-backed site")
}

pub fn new_item(title: &str, category: &str) -> NewGalleryItem {
    NewGalleryItem::new(
        title,
        format!("{} made to measure", title),
        category,
        "data:image/png;base64,iVBORw0KGgo=",
    )
}

pub fn png_upload(size: u64) -> UploadedFile {
    UploadedFile::new("fitting photo.png", "image/png", size)
}

pub fn form(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("form must be a JSON object")
}

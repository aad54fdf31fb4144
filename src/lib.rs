// Library exports for the site's gallery, contact form and admin services

pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use models::contact::ContactInfo;
use models::errors::AppError;
use services::admin_auth::AdminAuth;
use services::contact::ContactService;
use services::csrf::CsrfGuard;
use services::file_storage::FileStore;
use services::gallery_store::GalleryStore;
use services::key_value::{KeyValueStore, MemoryStore};
use services::rate_limiter::RateLimiter;
use utils::config::SiteConfig;

/// Every service the UI layer calls, wired to one storage backend
#[derive(Clone)]
pub struct SiteState {
    pub config: Arc<SiteConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub gallery: Arc<GalleryStore>,
    pub contact: Arc<ContactService>,
    pub admin: Arc<AdminAuth>,
    pub csrf: Arc<CsrfGuard>,
    pub contact_info: Arc<ContactInfo>,
}

impl SiteState {
    /// Uses a [`FileStore`] when `data_dir` is configured, memory otherwise
    pub fn new(config: SiteConfig) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                tracing::info!("Using file storage at {}", dir.display());
                Arc::new(FileStore::new(dir)?)
            }
            None => {
                tracing::info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: SiteConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let gallery = GalleryStore::with_key(store.clone(), config.gallery_key.clone());
        let contact = ContactService::new(RateLimiter::with_config(config.contact_rate_limit()));
        let admin = AdminAuth::new(
            store.clone(),
            RateLimiter::with_config(config.login_rate_limit()),
            config.site_origin.clone(),
        )
        .with_session_key(config.session_key.clone());
        let csrf = CsrfGuard::with_key(store.clone(), config.csrf_key.clone());

        Self {
            config: Arc::new(config),
            store,
            gallery: Arc::new(gallery),
            contact: Arc::new(contact),
            admin: Arc::new(admin),
            csrf: Arc::new(csrf),
            contact_info: Arc::new(ContactInfo::default()),
        }
    }
}

// Business logic services module
// Storage backends, rate limiting and the gallery/contact/admin services

pub mod admin_auth;
pub mod contact;
pub mod csrf;
pub mod file_storage;
pub mod gallery_store;
pub mod key_value;
pub mod pagination;
pub mod rate_limiter;

// Configuration, logging setup and input sanitization helpers

pub mod config;
pub mod logging;
pub mod security;

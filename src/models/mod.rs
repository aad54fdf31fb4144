// Data models shared by the services

pub mod admin;
pub mod contact;
pub mod errors;
pub mod gallery_item;

// API request/response models
pub mod common;
pub mod location;
pub mod role;
pub mod session;
pub mod user;

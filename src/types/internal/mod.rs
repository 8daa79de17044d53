pub mod auth;
pub mod authorization;
pub mod context;
pub mod location;
pub mod principal;
pub mod session;

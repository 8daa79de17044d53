// Database entities - SeaORM models
pub mod location;
pub mod role;
pub mod session;
pub mod user;
pub mod user_role;

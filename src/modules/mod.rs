pub mod auth;
pub mod blog;
pub mod email;
pub mod profile;

pub mod auth;

pub mod gce;

// Re-export common auth
pub use auth::get_access_token;

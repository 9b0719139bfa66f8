//! # Default GCE Settings
//!
//! Centralizes the project, zone, and credentials-file defaults used by the
//! command binaries. Each can be overridden with an environment variable so
//! the same binaries work against other projects without rebuilding.

use std::env;
use std::path::PathBuf;

/// Project used when neither `--project` nor `GCE_PROJECT` is given.
pub const DEFAULT_PROJECT: &str = "invoice-processing-ocr";

/// Zone used when neither `--zone` nor `GCE_ZONE` is given.
pub const DEFAULT_ZONE: &str = "us-west2-a";

/// Service-account key file used when `GCE_CREDENTIALS` is not set.
pub const DEFAULT_CREDENTIALS_FILE: &str = "gcloud_errbot.json";

pub fn default_project() -> String {
    env::var("GCE_PROJECT").unwrap_or_else(|_| DEFAULT_PROJECT.to_string())
}

pub fn default_zone() -> String {
    env::var("GCE_ZONE").unwrap_or_else(|_| DEFAULT_ZONE.to_string())
}

/// Path of the service-account key file.
pub fn credentials_path() -> PathBuf {
    env::var("GCE_CREDENTIALS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
}

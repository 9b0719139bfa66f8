//! # GCP Authentication
//!
//! Handles authentication with Google Cloud Platform using the OAuth 2.0
//! server-to-server flow for service accounts: a short-lived JWT-bearer
//! assertion is signed with the service account's private key and exchanged
//! for an access token at the account's token endpoint.
//!
//! The service-account key file is read from the path returned by
//! [`crate::gcp::gce::defaults::credentials_path`].

use anyhow::{Context, Result};
use cached::proc_macro::once;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::client::BLOCKING_CLIENT;
use crate::gcp::gce::defaults;

/// Scope requested for the access token. Compute-only would also work, but
/// cloud-platform matches what the key is provisioned with.
const SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// The fields of a service-account key file that the token exchange uses.
/// Real key files carry more (client_id, cert URLs, ...); those are ignored.
#[derive(Debug, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Claims of the JWT-bearer assertion sent to the token endpoint.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    exp: u64,
    iat: u64,
}

/// Reads and parses the service-account key file.
pub fn load_service_account() -> Result<ServiceAccount> {
    let path = defaults::credentials_path();
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid service-account key file {}", path.display()))
}

/// Fetches a GCP access token for the configured service account.
///
/// 1. Reads the service-account key file.
/// 2. Signs an RS256 JWT asserting the account's identity and the requested
///    scope, with the key file's `token_uri` as the audience.
/// 3. Exchanges the JWT for an access token at that endpoint.
///
/// The token is fetched once per process; the cached value is reused by every
/// subsequent call.
#[once(result = true)]
pub fn get_access_token() -> Result<String> {
    let service_account = load_service_account()?;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();

    let claims = Claims {
        iss: service_account.client_email.clone(),
        scope: SCOPE.to_string(),
        aud: service_account.token_uri.clone(),
        exp: now + 3600, // Token is valid for 1 hour.
        iat: now,
    };

    let header = Header::new(Algorithm::RS256);
    let encoding_key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())?;
    let jwt = encode(&header, &claims, &encoding_key)?;

    let params = [
        ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
        ("assertion", jwt.as_str()),
    ];

    let response = BLOCKING_CLIENT
        .post(&service_account.token_uri)
        .form(&params)
        .send()
        .context("Failed to reach token endpoint")?;

    if !response.status().is_success() {
        let error_text = response.text().unwrap_or_default();
        return Err(anyhow::anyhow!(
            "Failed to get access token: {}",
            error_text
        ));
    }

    let token_response: TokenResponse = response
        .json()
        .context("Failed to parse token endpoint response")?;
    Ok(token_response.access_token)
}

//! # Google Compute Engine (GCE) Data Types
//!
//! Rust structs modeling the JSON objects returned by the GCE API for
//! instance lookup, start/stop operations, and instance listing.
//!
//! Instance status strings (`RUNNING`, `STOPPING`, `TERMINATED`, ...) are the
//! provider's own lifecycle values and are deliberately kept as opaque
//! strings rather than a closed enum, so future values pass through
//! untouched. Fields this crate does not model are preserved in a flattened
//! map on each struct, which lets `--raw` output reproduce the full response.
//!
//! For detailed information on each field, refer to the official GCE API
//! documentation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A snapshot of a VM instance as returned by `instances.get` / list items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// The instance name.
    pub name: String,
    /// Current lifecycle status (opaque provider string).
    pub status: String,
    /// Full machine-type URL (e.g. ".../machineTypes/e2-medium").
    #[serde(rename = "machineType", skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    /// Full zone URL of the instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Network interfaces; empty for instances without networking configured.
    #[serde(rename = "networkInterfaces", default, skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<NetworkInterface>,
    /// Every other field of the response, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Instance {
    /// External (NAT) IP of the first access config of the first interface,
    /// the address the provider reports for a running instance.
    pub fn external_ip(&self) -> Option<&str> {
        self.network_interfaces
            .first()?
            .access_configs
            .first()?
            .nat_ip
            .as_deref()
    }
}

/// A network interface attached to an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "accessConfigs", default, skip_serializing_if = "Vec::is_empty")]
    pub access_configs: Vec<AccessConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// External-access configuration of a network interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// External NAT IP; absent while the instance is stopped.
    #[serde(rename = "natIP", default, skip_serializing_if = "Option::is_none")]
    pub nat_ip: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An asynchronous operation handle returned by `instances.start` / `stop`.
///
/// This is the provider's in-progress state-change record, not the final
/// instance state; `status` here is the operation's status (`PENDING`,
/// `RUNNING`, `DONE`), not the instance's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Completion percentage as reported by the provider.
    pub progress: Progress,
    /// Operation status (opaque provider string).
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `progress` field of an operation. The API documents it as an integer
/// but it is treated as number-or-string so a provider-side change cannot
/// break deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Progress {
    Number(u64),
    Text(String),
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Number(n) => write!(f, "{}", n),
            Progress::Text(s) => f.write_str(s),
        }
    }
}

/// One page of an `instances.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceList {
    #[serde(default)]
    pub items: Vec<Instance>,
    /// Cursor for the next page; absent on the last page.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// The JSON body the API returns on failure: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

#[derive(Debug, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! # One-Line Summary Formatters
//!
//! Pure functions turning API responses into the single-line replies the
//! command handlers print. No lifecycle logic lives here: status strings are
//! rendered as the provider reports them.

use crate::gcp::gce::error::GceError;
use crate::gcp::gce::types::{Instance, Operation};

/// Renders an instance snapshot as `"(<name>) <status>"`, or
/// `"(<name>) RUNNING <ip>"` when the instance is running.
///
/// A RUNNING instance is expected to carry a NAT IP on its first access
/// config; when it does not (for example, an instance deliberately configured
/// without external access), this fails loudly with a malformed-response
/// error instead of printing a partial line, since the caller would otherwise
/// mistake a misconfiguration for a healthy instance.
pub fn format_status(instance: &Instance) -> Result<String, GceError> {
    if instance.status == "RUNNING" {
        let ip = instance.external_ip().ok_or_else(|| {
            GceError::MalformedResponse(format!(
                "instance {} is RUNNING but reports no external NAT IP",
                instance.name
            ))
        })?;
        Ok(format!("({}) RUNNING {}", instance.name, ip))
    } else {
        Ok(format!("({}) {}", instance.name, instance.status))
    }
}

/// Renders a start/stop operation handle, e.g.
/// `"(vm-2) START (progress: 50) (instance status: PENDING)"`.
///
/// `name` is the instance name from the command, not the operation's own name
/// (which is the provider's operation id).
pub fn format_operation(name: &str, verb: &str, operation: &Operation) -> String {
    format!(
        "({}) {} (progress: {}) (instance status: {})",
        name, verb, operation.progress, operation.status
    )
}

use serde::{Deserialize, Serialize};

/// Acknowledgement for a committed mutation. Rejections are JSON-RPC
/// errors whose code is the registry's stable wire code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResult {
    /// Always true; a failed call never reaches this type.
    pub ok: bool,
}

/// Result of a successful creator verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Always true; verification failure is reported as error code 104.
    pub verified: bool,
}

/// Current owner of a content id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInfo {
    /// The content identifier.
    pub content_id: String,
    /// The owning principal.
    pub owner: String,
}

/// Current admin of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    /// The admin principal.
    pub admin: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInfo {
    /// Always "ok" when the node can answer at all.
    pub status: String,
    /// Number of registered content ids.
    pub entries: u64,
    /// Seconds since the node started.
    pub uptime_secs: u64,
}

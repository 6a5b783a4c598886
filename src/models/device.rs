use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Room assigned to a device the first time it reports.
pub const DEFAULT_ROOM: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub fill_level: i32,
    pub battery_level: i32,
    pub room: String,
    pub assigned_agent: Option<i64>,
    pub last_update: DateTime<Utc>,
}

/// A device as listed to clients, with the assigned agent's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub device: Device,
    pub agent_name: Option<String>,
}

/// One telemetry message from a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryReport {
    pub device_id: String,
    pub fill_level: i32,
    pub battery_level: i32,
}

/// Result of an upsert: the stored record and which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub device: Device,
    pub created: bool,
}

/// Insert-if-absent description of a device, used when seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProvision {
    pub device_id: String,
    pub room: String,
    pub fill_level: i32,
    pub battery_level: i32,
    pub assigned_agent: Option<i64>,
}

use serde::{Deserialize, Serialize};

/// Telemetry body posted by a device. The aliases are the field names used
/// by the first firmware revision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(alias = "id_esp")]
    pub device_id: Option<String>,
    #[serde(alias = "niv_gel")]
    pub fill_level: Option<i32>,
    #[serde(alias = "niv_batt")]
    pub battery_level: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_camel_case() {
        let request: UpdateRequest =
            serde_json::from_str(r#"{"deviceId":"ESP32_02","fillLevel":8,"batteryLevel":45}"#)
                .unwrap();
        assert_eq!(request.device_id.as_deref(), Some("ESP32_02"));
        assert_eq!(request.fill_level, Some(8));
        assert_eq!(request.battery_level, Some(45));
    }

    #[test]
    fn test_update_request_firmware_aliases() {
        let request: UpdateRequest =
            serde_json::from_str(r#"{"id_esp":"ESP32_01","niv_gel":85,"niv_batt":95}"#).unwrap();
        assert_eq!(request.device_id.as_deref(), Some("ESP32_01"));
        assert_eq!(request.fill_level, Some(85));
        assert_eq!(request.battery_level, Some(95));
    }

    #[test]
    fn test_update_request_rejects_non_integer_levels() {
        assert!(serde_json::from_str::<UpdateRequest>(r#"{"deviceId":"x","fillLevel":"8"}"#).is_err());
        assert!(serde_json::from_str::<UpdateRequest>(r#"{"deviceId":"x","fillLevel":8.5}"#).is_err());
    }
}

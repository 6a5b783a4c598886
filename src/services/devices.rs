use std::sync::Arc;

use crate::config::AlertConfig;
use crate::error::{AppError, Result};
use crate::models::{DeviceView, TelemetryReport, Upserted};
use crate::repositories::DeviceStore;

#[derive(Clone)]
pub struct DeviceRegistry {
    store: Arc<dyn DeviceStore>,
    alerts: AlertConfig,
}

impl DeviceRegistry {
    pub fn new(store: Arc<dyn DeviceStore>, alerts: AlertConfig) -> Self {
        Self { store, alerts }
    }

    pub async fn list_all(&self) -> Result<Vec<DeviceView>> {
        self.store.list_all().await
    }

    /// Record a telemetry report. Levels are stored as sent, without range checks.
    pub async fn upsert(&self, report: TelemetryReport) -> Result<Upserted> {
        if report.device_id.trim().is_empty() {
            return Err(AppError::Validation("deviceId is required".into()));
        }

        let upserted = self.store.upsert(&report).await?;

        tracing::info!(
            device_id = %report.device_id,
            fill_level = report.fill_level,
            battery_level = report.battery_level,
            created = upserted.created,
            "telemetry stored"
        );
        if report.fill_level < self.alerts.fill_threshold {
            tracing::warn!(
                device_id = %report.device_id,
                room = %upserted.device.room,
                fill_level = report.fill_level,
                threshold = self.alerts.fill_threshold,
                "fill level below alert threshold"
            );
        }

        Ok(upserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_ROOM;
    use crate::repositories::InMemoryStore;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn registry() -> DeviceRegistry {
        DeviceRegistry::new(Arc::new(InMemoryStore::new()), AlertConfig::default())
    }

    fn report(device_id: &str, fill_level: i32, battery_level: i32) -> TelemetryReport {
        TelemetryReport {
            device_id: device_id.into(),
            fill_level,
            battery_level,
        }
    }

    #[tokio::test]
    async fn test_empty_device_id_is_rejected() {
        let err = registry().upsert(report("  ", 10, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_levels_are_accepted() {
        let registry = registry();
        let upserted = registry.upsert(report("ESP32_05", -3, 250)).await.unwrap();
        assert_eq!(upserted.device.fill_level, -3);
        assert_eq!(upserted.device.battery_level, 250);
    }

    #[tokio::test]
    async fn test_list_reflects_latest_values_for_each_device() {
        let registry = registry();
        for (id, fill, battery) in [
            ("ESP32_01", 85, 95),
            ("ESP32_02", 30, 50),
            ("ESP32_03", 70, 20),
            ("ESP32_02", 8, 45),
            ("ESP32_01", 80, 94),
        ] {
            registry.upsert(report(id, fill, battery)).await.unwrap();
        }

        let listed: HashMap<String, (i32, i32, String)> = registry
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| {
                (
                    v.device.device_id,
                    (v.device.fill_level, v.device.battery_level, v.device.room),
                )
            })
            .collect();

        assert_eq!(listed.len(), 3);
        assert_eq!(listed["ESP32_01"], (80, 94, DEFAULT_ROOM.to_string()));
        assert_eq!(listed["ESP32_02"], (8, 45, DEFAULT_ROOM.to_string()));
        assert_eq!(listed["ESP32_03"], (70, 20, DEFAULT_ROOM.to_string()));
    }
}

use async_trait::async_trait;
use sqlx::FromRow;

use super::DeviceStore;
use crate::db::DbPool;
use crate::error::Result;
use crate::models::{Device, DeviceProvision, DeviceView, TelemetryReport, Upserted, DEFAULT_ROOM};

#[derive(Debug, FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    device: Device,
    inserted: bool,
}

#[derive(Clone)]
pub struct PgDeviceRepository {
    pool: DbPool,
}

impl PgDeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for PgDeviceRepository {
    async fn list_all(&self) -> Result<Vec<DeviceView>> {
        let devices = sqlx::query_as::<_, DeviceView>(
            r#"
            SELECT d.device_id, d.fill_level, d.battery_level, d.room,
                   d.assigned_agent, d.last_update, u.display_name AS agent_name
            FROM devices d
            LEFT JOIN users u ON u.id = d.assigned_agent
            ORDER BY d.device_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(devices)
    }

    async fn upsert(&self, report: &TelemetryReport) -> Result<Upserted> {
        // xmax is 0 only for a row version created by this INSERT.
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO devices (device_id, fill_level, battery_level, room, last_update)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (device_id) DO UPDATE SET
                fill_level = EXCLUDED.fill_level,
                battery_level = EXCLUDED.battery_level,
                last_update = NOW()
            RETURNING device_id, fill_level, battery_level, room, assigned_agent,
                      last_update, (xmax = 0) AS inserted
            "#,
        )
        .bind(&report.device_id)
        .bind(report.fill_level)
        .bind(report.battery_level)
        .bind(DEFAULT_ROOM)
        .fetch_one(&self.pool)
        .await?;

        Ok(Upserted {
            device: row.device,
            created: row.inserted,
        })
    }

    async fn provision(&self, device: &DeviceProvision) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO devices (device_id, fill_level, battery_level, room, assigned_agent, last_update)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (device_id) DO NOTHING
            "#,
        )
        .bind(&device.device_id)
        .bind(device.fill_level)
        .bind(device.battery_level)
        .bind(&device.room)
        .bind(device.assigned_agent)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

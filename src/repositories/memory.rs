use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{AccountStore, DeviceStore};
use crate::error::{AppError, Result};
use crate::models::{
    Device, DeviceProvision, DeviceView, NewUser, TelemetryReport, Upserted, User, DEFAULT_ROOM,
};

#[derive(Default)]
struct Accounts {
    by_login: IndexMap<String, User>,
    next_id: i64,
}

/// Process-local store backing both traits. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<Accounts>,
    devices: RwLock<IndexMap<String, Device>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<i64> {
        let mut accounts = self.accounts.write().await;
        if accounts.by_login.contains_key(&user.login) {
            return Err(AppError::Conflict(format!(
                "login {} already exists",
                user.login
            )));
        }

        accounts.next_id += 1;
        let id = accounts.next_id;
        accounts.by_login.insert(
            user.login.clone(),
            User {
                id,
                login: user.login,
                secret: user.secret,
                display_name: user.display_name,
                role: user.role,
            },
        );
        Ok(id)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        Ok(self.accounts.read().await.by_login.get(login).cloned())
    }
}

#[async_trait]
impl DeviceStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<DeviceView>> {
        // Lock order: accounts, then devices.
        let accounts = self.accounts.read().await;
        let devices = self.devices.read().await;

        Ok(devices
            .values()
            .map(|device| {
                let agent_name = device.assigned_agent.and_then(|agent_id| {
                    accounts
                        .by_login
                        .values()
                        .find(|u| u.id == agent_id)
                        .map(|u| u.display_name.clone())
                });
                DeviceView {
                    device: device.clone(),
                    agent_name,
                }
            })
            .collect())
    }

    async fn upsert(&self, report: &TelemetryReport) -> Result<Upserted> {
        let now = Utc::now();
        let mut devices = self.devices.write().await;

        match devices.get_mut(&report.device_id) {
            Some(existing) => {
                existing.fill_level = report.fill_level;
                existing.battery_level = report.battery_level;
                existing.last_update = now;
                Ok(Upserted {
                    device: existing.clone(),
                    created: false,
                })
            }
            None => {
                let device = Device {
                    device_id: report.device_id.clone(),
                    fill_level: report.fill_level,
                    battery_level: report.battery_level,
                    room: DEFAULT_ROOM.to_string(),
                    assigned_agent: None,
                    last_update: now,
                };
                devices.insert(device.device_id.clone(), device.clone());
                Ok(Upserted {
                    device,
                    created: true,
                })
            }
        }
    }

    async fn provision(&self, device: &DeviceProvision) -> Result<bool> {
        let mut devices = self.devices.write().await;
        if devices.contains_key(&device.device_id) {
            return Ok(false);
        }

        devices.insert(
            device.device_id.clone(),
            Device {
                device_id: device.device_id.clone(),
                fill_level: device.fill_level,
                battery_level: device.battery_level,
                room: device.room.clone(),
                assigned_agent: device.assigned_agent,
                last_update: Utc::now(),
            },
        );
        Ok(true)
    }
}

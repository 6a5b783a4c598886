use crate::config::SeedConfig;
use crate::error::{AppError, Result};
use crate::models::DeviceProvision;
use crate::repositories::{AccountStore, DeviceStore};
use crate::services::AccountService;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub devices_created: usize,
}

/// Load the configured users and devices. Records that already exist are
/// left as they are, so this can run on every start.
pub async fn apply(
    seed: &SeedConfig,
    accounts: &AccountService,
    account_store: &dyn AccountStore,
    device_store: &dyn DeviceStore,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for user in &seed.users {
        match accounts
            .register(&user.login, &user.secret, &user.display_name, user.role)
            .await
        {
            Ok(_) => report.users_created += 1,
            Err(AppError::Conflict(_)) => {
                tracing::debug!(login = %user.login, "seed user already present");
            }
            Err(e) => return Err(e),
        }
    }

    for device in &seed.devices {
        let assigned_agent = match &device.assigned_agent {
            Some(login) => match account_store.find_by_login(login).await? {
                Some(agent) => Some(agent.id),
                None => {
                    tracing::warn!(
                        device_id = %device.device_id,
                        login = %login,
                        "seed device references an unknown agent; leaving it unassigned"
                    );
                    None
                }
            },
            None => None,
        };

        let created = device_store
            .provision(&DeviceProvision {
                device_id: device.device_id.clone(),
                room: device.room.clone(),
                fill_level: device.fill_level,
                battery_level: device.battery_level,
                assigned_agent,
            })
            .await?;
        if created {
            report.devices_created += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SecretScheme;
    use crate::config::{SeedDevice, SeedUser};
    use crate::models::Role;
    use crate::repositories::InMemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn seed() -> SeedConfig {
        SeedConfig {
            users: vec![
                SeedUser {
                    login: "admin".into(),
                    secret: "123".into(),
                    display_name: "Technical lead".into(),
                    role: Role::Rt,
                },
                SeedUser {
                    login: "agent01".into(),
                    secret: "789".into(),
                    display_name: "Jean Dupont".into(),
                    role: Role::Agent,
                },
            ],
            devices: vec![
                SeedDevice {
                    device_id: "ESP32_01".into(),
                    room: "Main entrance".into(),
                    fill_level: 85,
                    battery_level: 95,
                    assigned_agent: Some("agent01".into()),
                },
                SeedDevice {
                    device_id: "ESP32_02".into(),
                    room: "Cafeteria".into(),
                    fill_level: 8,
                    battery_level: 45,
                    assigned_agent: Some("ghost".into()),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_apply_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let accounts = AccountService::new(store.clone(), SecretScheme::Plain);

        let first = apply(&seed(), &accounts, &*store, &*store)
            .await
            .unwrap();
        assert_eq!(
            first,
            SeedReport {
                users_created: 2,
                devices_created: 2,
            }
        );

        let second = apply(&seed(), &accounts, &*store, &*store)
            .await
            .unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_apply_resolves_agents_by_login() {
        let store = Arc::new(InMemoryStore::new());
        let accounts = AccountService::new(store.clone(), SecretScheme::Plain);
        apply(&seed(), &accounts, &*store, &*store)
            .await
            .unwrap();

        let listed = store.list_all().await.unwrap();
        let entrance = listed
            .iter()
            .find(|v| v.device.device_id == "ESP32_01")
            .unwrap();
        assert_eq!(entrance.device.room, "Main entrance");
        assert_eq!(entrance.agent_name.as_deref(), Some("Jean Dupont"));

        let cafeteria = listed
            .iter()
            .find(|v| v.device.device_id == "ESP32_02")
            .unwrap();
        assert_eq!(cafeteria.device.assigned_agent, None);
    }
}

//! Storage seams for accounts and devices.
//!
//! Handlers never see a concrete store: `main` picks the in-memory or the
//! PostgreSQL implementation from configuration and hands trait objects to
//! the services.

pub mod devices;
pub mod memory;
pub mod users;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeviceProvision, DeviceView, NewUser, TelemetryReport, Upserted, User};

pub use devices::PgDeviceRepository;
pub use memory::InMemoryStore;
pub use users::PgUserRepository;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account. Fails with `AppError::Conflict` if the login is taken.
    async fn insert_user(&self, user: NewUser) -> Result<i64>;

    async fn find_by_login(&self, login: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<DeviceView>>;

    /// Overwrite the levels of an existing device, or create it in the default room.
    async fn upsert(&self, report: &TelemetryReport) -> Result<Upserted>;

    /// Create the device if absent; never touches an existing record.
    async fn provision(&self, device: &DeviceProvision) -> Result<bool>;
}

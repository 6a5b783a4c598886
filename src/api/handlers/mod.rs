pub mod auth;
pub mod devices;
pub mod health;

use crate::services::{AccountService, DeviceRegistry};

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub devices: DeviceRegistry,
}

pub mod accounts;
pub mod devices;

pub use accounts::AccountService;
pub use devices::DeviceRegistry;

pub mod device;
pub mod user;

pub use device::{Device, DeviceProvision, DeviceView, TelemetryReport, Upserted, DEFAULT_ROOM};
pub use user::{AuthenticatedUser, NewUser, Role, User};

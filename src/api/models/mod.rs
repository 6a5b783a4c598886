pub mod auth;
pub mod devices;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use devices::{UpdateRequest, UpdateResponse};

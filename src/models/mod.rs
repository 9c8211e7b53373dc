pub mod user;
pub mod auth;
pub mod service;

pub use user::{SessionUser, UserType};
pub use auth::{AuthResponse, CustomerProfile, CustomerRecord, LoginInput, RegistrationInput, RegistrationPayload};
pub use service::{fields_of_work, Service, ServiceDraft, ALL_IN_ONE, SERVICE_FIELDS};

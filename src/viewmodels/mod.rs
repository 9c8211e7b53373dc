pub mod auth_viewmodel;

pub use auth_viewmodel::AuthViewModel;

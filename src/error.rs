// ============================================================================
// ERRORES - Taxonomía de errores del cliente
// ============================================================================
// Validación (local) / red y autenticación (remoto) / almacenamiento
// ============================================================================

use thiserror::Error;

use crate::validation::ValidationError;

/// Error de comunicación con el backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// `true` si el backend respondió 401/403 (credencial rechazada)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,

    #[error("Error escribiendo en localStorage: {0}")]
    Write(String),
}

/// Error de un formulario; `Display` es el mensaje que ve el usuario
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Please choose whether you register as a customer or a company")]
    RoleNotChosen,

    #[error("User is not logged in.")]
    NotLoggedIn,

    #[error("Only company accounts can create services")]
    NotACompany,

    #[error("Login failed.")]
    LoginFailed(#[source] ApiError),

    #[error("Registration failed")]
    RegistrationFailed(#[source] ApiError),

    #[error("Error creating a service")]
    ServiceCreationFailed(#[source] ApiError),

    #[error("Something went wrong")]
    Storage(#[from] StorageError),
}

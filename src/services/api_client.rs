// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP al backend Django
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CustomerProfile, CustomerRecord, LoginInput, RegistrationPayload, Service, SessionUser, UserType,
};

/// Endpoints del backend que consume el cliente
#[allow(async_fn_in_trait)]
pub trait MarketplaceApi {
    /// `POST /authentication/login/`
    async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ApiError>;

    /// `POST /authentication/logout/`
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    /// `GET /authentication/authenticate/`
    async fn authenticate(&self, token: &str) -> Result<SessionUser, ApiError>;

    /// `POST /authentication/register_{role}/`
    async fn register(&self, role: UserType, payload: &RegistrationPayload) -> Result<AuthResponse, ApiError>;

    /// `POST /customers/register/`
    async fn register_customer(&self, record: &CustomerRecord) -> Result<CustomerProfile, ApiError>;

    /// `POST /services/create/`
    async fn create_service(&self, token: &str, service: &Service) -> Result<(), ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn register_path(role: UserType) -> String {
        format!("authentication/register_{}/", role.as_str())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn token_header(token: &str) -> String {
    format!("Token {}", token)
}

fn with_token(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &token_header(token))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

async fn http_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    ApiError::Http { status, body }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    response.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

async fn expect_ok(response: Response) -> Result<(), ApiError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    Ok(())
}

impl MarketplaceApi for ApiClient {
    async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ApiError> {
        log::info!("🔐 Login para: {}", input.email);
        let request = Request::post(&self.url("authentication/login/"))
            .json(input)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        read_json(send(request).await?).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let request = with_token(Request::post(&self.url("authentication/logout/")), token)
            .header("Content-Type", "application/json")
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        expect_ok(send(request).await?).await
    }

    async fn authenticate(&self, token: &str) -> Result<SessionUser, ApiError> {
        let request = with_token(Request::get(&self.url("authentication/authenticate/")), token)
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        read_json(send(request).await?).await
    }

    async fn register(&self, role: UserType, payload: &RegistrationPayload) -> Result<AuthResponse, ApiError> {
        log::info!("📝 Registro de {}: {}", role, payload.username);
        let request = Request::post(&self.url(&Self::register_path(role)))
            .json(payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        read_json(send(request).await?).await
    }

    async fn register_customer(&self, record: &CustomerRecord) -> Result<CustomerProfile, ApiError> {
        log::info!("📝 Registro de cliente (customers): {}", record.username);
        let request = Request::post(&self.url("customers/register/"))
            .json(record)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        read_json(send(request).await?).await
    }

    async fn create_service(&self, token: &str, service: &Service) -> Result<(), ApiError> {
        log::info!("🛠️ Creando servicio: {} ({})", service.name, service.field);
        let request = with_token(Request::post(&self.url("services/create/")), token)
            .json(service)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        expect_ok(send(request).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_with_single_slash() {
        let client = ApiClient::with_base_url("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            client.url("/authentication/login/"),
            "http://127.0.0.1:8000/authentication/login/"
        );
    }

    #[test]
    fn register_path_depends_on_role() {
        assert_eq!(ApiClient::register_path(UserType::Customer), "authentication/register_customer/");
        assert_eq!(ApiClient::register_path(UserType::Company), "authentication/register_company/");
    }

    #[test]
    fn token_header_uses_drf_scheme() {
        assert_eq!(token_header("abc123"), "Token abc123");
    }
}

// ============================================================================
// AUTH VIEWMODEL - LÓGICA DE FORMULARIOS
// ============================================================================
// Validar → llamar al backend → actualizar el SessionStore.
// Devuelve valores; los componentes solo muestran el mensaje.
// ============================================================================

use chrono::{Local, NaiveDate};

use crate::error::FormError;
use crate::models::{
    CustomerProfile, CustomerRecord, LoginInput, RegistrationInput, RegistrationPayload, Service, ServiceDraft,
    SessionUser, UserType, ALL_IN_ONE,
};
use crate::services::MarketplaceApi;
use crate::state::SessionStore;
use crate::utils::storage::CredentialStorage;
use crate::validation::{self, normalize_birth_date, ValidationError};

/// ViewModel de autenticación - SOLO lógica de negocio
pub struct AuthViewModel<A, S> {
    store: SessionStore<A, S>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<A, S> AuthViewModel<A, S>
where
    A: MarketplaceApi,
    S: CredentialStorage,
{
    pub fn new(store: SessionStore<A, S>) -> Self {
        Self {
            store,
            today: local_today,
        }
    }

    /// Fija el reloj usado por la regla de edad
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &SessionStore<A, S> {
        &self.store
    }

    pub async fn submit_login(&self, input: &LoginInput) -> Result<SessionUser, FormError> {
        validation::validate_login(input)?;

        let input = LoginInput {
            email: input.email.trim().to_string(),
            password: input.password.clone(),
        };
        let response = self.store.api().login(&input).await.map_err(|e| {
            log::error!("❌ Login fallido: {}", e);
            FormError::LoginFailed(e)
        })?;

        let user = self.store.complete_login(response)?;
        log::info!("✅ Login exitoso: {}", user.username);
        Ok(user)
    }

    /// Registro unificado; el rol sale del `SessionStore`
    pub async fn submit_registration(&self, input: &RegistrationInput) -> Result<SessionUser, FormError> {
        let role = self.store.chosen_role().ok_or(FormError::RoleNotChosen)?;
        validation::validate_on(input, role, (self.today)())?;

        let date_of_birth = match role {
            UserType::Customer => Some(
                input
                    .date_of_birth
                    .as_deref()
                    .and_then(normalize_birth_date)
                    .ok_or(ValidationError::InvalidBirthDate)?,
            ),
            UserType::Company => None,
        };
        let payload = RegistrationPayload::new(input, role, date_of_birth);

        let response = self.store.api().register(role, &payload).await.map_err(|e| {
            log::error!("❌ Error en registro de {}: {}", role, e);
            FormError::RegistrationFailed(e)
        })?;

        let user = self.store.complete_login(response)?;
        log::info!("✅ Registro exitoso: {} ({})", user.username, user.user_type);
        Ok(user)
    }

    /// Formulario antiguo de la app `customers`
    pub async fn submit_customer_record(&self, record: &CustomerRecord) -> Result<CustomerProfile, FormError> {
        validation::validate_on(&RegistrationInput::from(record), UserType::Customer, (self.today)())?;

        let birth_date = normalize_birth_date(&record.birth_date).ok_or(ValidationError::InvalidBirthDate)?;
        let record = CustomerRecord {
            email: record.email.trim().to_string(),
            username: record.username.trim().to_string(),
            password: record.password.clone(),
            birth_date,
        };

        let profile = self.store.api().register_customer(&record).await.map_err(|e| {
            log::error!("❌ Error en registro de cliente: {}", e);
            FormError::RegistrationFailed(e)
        })?;

        if let Some(token) = profile.token.as_deref() {
            self.store.save_credential(token)?;
        }
        log::info!("✅ Cliente registrado: {}", profile.username);
        Ok(profile)
    }

    /// Crea un servicio para la empresa conectada
    pub async fn submit_service(&self, draft: &ServiceDraft) -> Result<Service, FormError> {
        let user = self.store.current_user().ok_or(FormError::NotLoggedIn)?;
        if !user.is_company() {
            return Err(FormError::NotACompany);
        }
        let token = self.store.credential().ok_or(FormError::NotLoggedIn)?;

        let mut draft = draft.clone();
        if let Some(field) = user.field_of_work.as_deref().filter(|f| *f != ALL_IN_ONE) {
            // Empresas especializadas: el campo es siempre el suyo
            draft.field = field.to_string();
        }
        let price_per_hour = validation::validate_service(&draft)?;

        let service = Service {
            id: None,
            company: Some(user.id),
            created_at: None,
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            price_per_hour,
            field: draft.field.trim().to_string(),
        };

        self.store.api().create_service(&token, &service).await.map_err(|e| {
            log::error!("❌ Error creando servicio: {}", e);
            FormError::ServiceCreationFailed(e)
        })?;

        log::info!("✅ Servicio creado: {}", service.name);
        Ok(service)
    }

    pub async fn logout(&self) {
        self.store.logout().await;
    }
}

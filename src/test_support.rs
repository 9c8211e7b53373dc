// Dobles de prueba para el API y el almacenamiento de credenciales

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::error::{ApiError, StorageError};
use crate::models::{
    AuthResponse, CustomerProfile, CustomerRecord, LoginInput, RegistrationPayload, Service, SessionUser, UserType,
};
use crate::services::MarketplaceApi;
use crate::utils::storage::CredentialStorage;

type Reply<T> = Result<T, ApiError>;

enum Pending<T> {
    Ready(Reply<T>),
    Waiting(oneshot::Receiver<Reply<T>>),
}

fn rejected<T>() -> Reply<T> {
    Err(ApiError::Http { status: 400, body: "{\"detail\":\"rejected\"}".to_string() })
}

/// API en memoria: respuestas encoladas + registro de llamadas
#[derive(Default)]
pub struct FakeApi {
    authenticate_replies: RefCell<VecDeque<Pending<SessionUser>>>,
    authenticate_tokens: RefCell<Vec<String>>,
    logout_replies: RefCell<VecDeque<Reply<()>>>,
    logout_tokens: RefCell<Vec<String>>,
    login_replies: RefCell<VecDeque<Reply<AuthResponse>>>,
    login_inputs: RefCell<Vec<LoginInput>>,
    register_replies: RefCell<VecDeque<Reply<AuthResponse>>>,
    registrations: RefCell<Vec<(UserType, RegistrationPayload)>>,
    customer_replies: RefCell<VecDeque<Reply<CustomerProfile>>>,
    customer_records: RefCell<Vec<CustomerRecord>>,
    service_replies: RefCell<VecDeque<Reply<()>>>,
    services: RefCell<Vec<(String, Service)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_authenticate(&self, reply: Reply<SessionUser>) {
        self.authenticate_replies.borrow_mut().push_back(Pending::Ready(reply));
    }

    pub fn push_pending_authenticate(&self, receiver: oneshot::Receiver<Reply<SessionUser>>) {
        self.authenticate_replies.borrow_mut().push_back(Pending::Waiting(receiver));
    }

    pub fn push_logout(&self, reply: Reply<()>) {
        self.logout_replies.borrow_mut().push_back(reply);
    }

    pub fn push_login(&self, reply: Reply<AuthResponse>) {
        self.login_replies.borrow_mut().push_back(reply);
    }

    pub fn push_register(&self, reply: Reply<AuthResponse>) {
        self.register_replies.borrow_mut().push_back(reply);
    }

    pub fn push_customer(&self, reply: Reply<CustomerProfile>) {
        self.customer_replies.borrow_mut().push_back(reply);
    }

    pub fn push_service(&self, reply: Reply<()>) {
        self.service_replies.borrow_mut().push_back(reply);
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_tokens.borrow().len()
    }

    pub fn authenticate_tokens(&self) -> Vec<String> {
        self.authenticate_tokens.borrow().clone()
    }

    pub fn logout_tokens(&self) -> Vec<String> {
        self.logout_tokens.borrow().clone()
    }

    pub fn login_inputs(&self) -> Vec<LoginInput> {
        self.login_inputs.borrow().clone()
    }

    pub fn registrations(&self) -> Vec<(UserType, RegistrationPayload)> {
        self.registrations.borrow().clone()
    }

    pub fn customer_records(&self) -> Vec<CustomerRecord> {
        self.customer_records.borrow().clone()
    }

    pub fn services(&self) -> Vec<(String, Service)> {
        self.services.borrow().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.authenticate_calls()
            + self.logout_tokens.borrow().len()
            + self.login_inputs.borrow().len()
            + self.registrations.borrow().len()
            + self.customer_records.borrow().len()
            + self.services.borrow().len()
    }
}

impl MarketplaceApi for FakeApi {
    async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ApiError> {
        self.login_inputs.borrow_mut().push(input.clone());
        self.login_replies.borrow_mut().pop_front().unwrap_or_else(rejected)
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.logout_tokens.borrow_mut().push(token.to_string());
        self.logout_replies.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    async fn authenticate(&self, token: &str) -> Result<SessionUser, ApiError> {
        self.authenticate_tokens.borrow_mut().push(token.to_string());
        let next = self.authenticate_replies.borrow_mut().pop_front();
        match next {
            Some(Pending::Ready(reply)) => reply,
            Some(Pending::Waiting(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("request dropped".to_string()))),
            None => Err(ApiError::Http { status: 401, body: "Invalid token.".to_string() }),
        }
    }

    async fn register(&self, role: UserType, payload: &RegistrationPayload) -> Result<AuthResponse, ApiError> {
        self.registrations.borrow_mut().push((role, payload.clone()));
        self.register_replies.borrow_mut().pop_front().unwrap_or_else(rejected)
    }

    async fn register_customer(&self, record: &CustomerRecord) -> Result<CustomerProfile, ApiError> {
        self.customer_records.borrow_mut().push(record.clone());
        self.customer_replies.borrow_mut().pop_front().unwrap_or_else(rejected)
    }

    async fn create_service(&self, token: &str, service: &Service) -> Result<(), ApiError> {
        self.services.borrow_mut().push((token.to_string(), service.clone()));
        self.service_replies.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

/// Credencial en memoria; los clones comparten el mismo valor
#[derive(Clone, Default)]
pub struct MemoryCredentials {
    token: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryCredentials {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let credentials = Self::default();
        *credentials.token.borrow_mut() = Some(token.to_string());
        credentials
    }

    pub fn failing() -> Self {
        let credentials = Self::default();
        credentials.fail_writes.set(true);
        credentials
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl CredentialStorage for MemoryCredentials {
    fn load(&self) -> Option<String> {
        self.token()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable);
        }
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

pub fn customer_user() -> SessionUser {
    SessionUser {
        id: 3,
        email: "test3@example.com".to_string(),
        username: "tester3".to_string(),
        user_type: UserType::Customer,
        date_of_birth: Some("1995-05-20".to_string()),
        field_of_work: None,
        date_joined: None,
    }
}

pub fn company_user() -> SessionUser {
    company_user_in("Plumbing")
}

pub fn company_user_in(field_of_work: &str) -> SessionUser {
    SessionUser {
        id: 7,
        email: "company@example.com".to_string(),
        username: "mycompany".to_string(),
        user_type: UserType::Company,
        date_of_birth: None,
        field_of_work: Some(field_of_work.to_string()),
        date_joined: None,
    }
}

// ============================================================================
// SESSION STORE - Contexto de login compartido por todas las páginas
// ============================================================================
// Usuario actual + rol elegido para el registro. Se inyecta (no es global).
// Cada `authenticate` lleva un ticket; respuestas con ticket viejo se descartan.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::StorageError;
use crate::models::{AuthResponse, SessionUser, UserType};
use crate::services::MarketplaceApi;
use crate::state::reactivity::{SubscriptionId, Subscribers};
use crate::utils::storage::{mask_token, CredentialStorage};

pub struct SessionStore<A, S> {
    api: Rc<A>,
    credentials: Rc<S>,
    current_user: Rc<RefCell<Option<SessionUser>>>,
    chosen_role: Rc<RefCell<Option<UserType>>>,
    latest_ticket: Rc<Cell<u64>>,
    subscribers: Subscribers,
}

// Manual: los clones comparten estado aunque A/S no sean Clone
impl<A, S> Clone for SessionStore<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            credentials: self.credentials.clone(),
            current_user: self.current_user.clone(),
            chosen_role: self.chosen_role.clone(),
            latest_ticket: self.latest_ticket.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<A, S> SessionStore<A, S>
where
    A: MarketplaceApi,
    S: CredentialStorage,
{
    pub fn new(api: A, credentials: S) -> Self {
        Self {
            api: Rc::new(api),
            credentials: Rc::new(credentials),
            current_user: Rc::new(RefCell::new(None)),
            chosen_role: Rc::new(RefCell::new(None)),
            latest_ticket: Rc::new(Cell::new(0)),
            subscribers: Subscribers::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.current_user.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.borrow().is_some()
    }

    pub fn chosen_role(&self) -> Option<UserType> {
        *self.chosen_role.borrow()
    }

    pub fn credential(&self) -> Option<String> {
        self.credentials.load()
    }

    /// Comprueba la credencial guardada contra el backend.
    ///
    /// Sin credencial no hay llamada de red. Cualquier fallo (401, red, parseo)
    /// se trata como "sin sesión": devuelve `None` y no toca el estado.
    pub async fn authenticate(&self) -> Option<SessionUser> {
        let Some(token) = self.credentials.load() else {
            log::info!("ℹ️ Sin credencial guardada, usuario anónimo");
            return None;
        };

        let ticket = self.issue_ticket();
        log::info!("🔍 Verificando sesión ({})", mask_token(&token));

        let result = self.api.authenticate(&token).await;

        if ticket != self.latest_ticket.get() {
            log::warn!("⚠️ Respuesta de authenticate obsoleta (ticket {}), descartada", ticket);
            return None;
        }

        match result {
            Ok(user) => {
                log::info!("✅ Sesión válida: {} ({})", user.username, user.user_type);
                self.set_user(Some(user.clone()));
                Some(user)
            }
            Err(e) if e.is_unauthorized() => {
                log::warn!("⚠️ Credencial rechazada por el servidor: {}", e);
                None
            }
            Err(e) => {
                log::error!("❌ Error verificando sesión: {}", e);
                None
            }
        }
    }

    /// Fija el usuario actual (login/registro ya confirmados por el backend)
    pub fn login(&self, user: SessionUser) {
        self.issue_ticket();
        log::info!("👤 Usuario conectado: {}", user.username);
        self.set_user(Some(user));
    }

    /// Guarda el token devuelto por login/registro y fija el usuario
    pub fn complete_login(&self, response: AuthResponse) -> Result<SessionUser, StorageError> {
        self.credentials.save(&response.token)?;
        self.login(response.user.clone());
        Ok(response.user)
    }

    /// Guarda una credencial sin usuario asociado (registro antiguo de clientes).
    /// El usuario se conocerá en el próximo `authenticate`.
    pub fn save_credential(&self, token: &str) -> Result<(), StorageError> {
        self.credentials.save(token)
    }

    /// Cierra la sesión remota (best-effort) y limpia SIEMPRE el estado local
    pub async fn logout(&self) {
        self.issue_ticket();

        match self.credentials.load() {
            Some(token) => {
                if let Err(e) = self.api.logout(&token).await {
                    log::error!("❌ Logout remoto falló, se limpia el estado local igualmente: {}", e);
                }
            }
            None => log::warn!("⚠️ Logout sin credencial guardada"),
        }

        self.credentials.clear();
        self.set_user(None);
        log::info!("👋 Logout");
    }

    pub fn choose_role(&self, role: UserType) {
        *self.chosen_role.borrow_mut() = Some(role);
        self.subscribers.notify();
    }

    pub fn clear_role(&self) {
        *self.chosen_role.borrow_mut() = None;
        self.subscribers.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        ticket
    }

    fn set_user(&self, user: Option<SessionUser>) {
        *self.current_user.borrow_mut() = user;
        self.subscribers.notify();
    }
}

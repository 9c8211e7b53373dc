// ============================================================================
// AUTH CONTEXT - Compartir el SessionStore entre componentes
// ============================================================================
// Usa Context API de Yew; el store vive lo que vive la raíz de la app
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::services::ApiClient;
use crate::state::SessionStore;
use crate::utils::storage::LocalStorageCredentials;
use crate::viewmodels::AuthViewModel;

/// Store del navegador: backend real + localStorage
pub type BrowserSessionStore = SessionStore<ApiClient, LocalStorageCredentials>;

/// Valor del contexto. `revision` cambia con cada notificación del store
/// para que los consumidores se re-rendericen.
#[derive(Clone)]
pub struct AuthContext {
    pub store: BrowserSessionStore,
    revision: u64,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        self.revision == other.revision
    }
}

impl AuthContext {
    pub fn view_model(&self) -> AuthViewModel<ApiClient, LocalStorageCredentials> {
        AuthViewModel::new(self.store.clone())
    }
}

#[derive(Default, PartialEq)]
struct Revision(u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(Revision(self.0 + 1))
    }
}

/// Marca si ya hay un re-render programado
#[derive(Clone, Default)]
struct RenderBatch {
    pending: Rc<Cell<bool>>,
}

impl RenderBatch {
    /// `true` si hay que programar el re-render; `false` si ya hay uno en cola
    fn begin(&self) -> bool {
        !self.pending.replace(true)
    }

    fn finish(&self) {
        self.pending.set(false);
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthContextProviderProps {
    pub children: Children,
}

/// Provider component que envuelve la app y proporciona el SessionStore
#[function_component(AuthContextProvider)]
pub fn auth_context_provider(props: &AuthContextProviderProps) -> Html {
    // Se crea una sola vez por montaje del provider
    let store = use_memo((), |_| {
        BrowserSessionStore::new(ApiClient::new(), LocalStorageCredentials::default())
    });
    let revision = use_reducer(Revision::default);

    {
        let store = store.clone();
        let dispatcher = revision.dispatcher();
        use_effect_with((), move |_| {
            // Varias notificaciones seguidas → un solo re-render
            let batch = RenderBatch::default();
            let id = store.subscribe(move || {
                if !batch.begin() {
                    return;
                }
                let batch = batch.clone();
                let dispatcher = dispatcher.clone();
                Timeout::new(0, move || {
                    batch.finish();
                    dispatcher.dispatch(());
                })
                .forget();
            });
            move || store.unsubscribe(id)
        });
    }

    let context = AuthContext {
        store: (*store).clone(),
        revision: revision.0,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Acceso al store desde cualquier componente bajo `AuthContextProvider`.
/// Fuera del provider es un error de cableado: panic.
#[hook]
pub fn use_auth_context() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth_context must be used within AuthContextProvider")
}

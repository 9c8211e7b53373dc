// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_store;

pub use reactivity::{SubscriptionId, Subscribers};
pub use session_store::SessionStore;

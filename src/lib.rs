// ============================================================================
// MARKETPLACE PWA - CLIENTE (RUST PURO + YEW)
// ============================================================================
// - Models: Estructuras compartidas con backend
// - Services: SOLO comunicación API
// - State: SessionStore con Rc<RefCell> + notificaciones
// - ViewModels: Validación + flujo de formularios
// - Hooks: Contexto Yew que comparte el SessionStore
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook primero para ver errores en consola
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Marketplace PWA ({}) → {}", CONFIG.environment, CONFIG.backend_url());

    yew::Renderer::<App>::new().render();
    Ok(())
}

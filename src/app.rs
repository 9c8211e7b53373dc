// ============================================================================
// APP - Raíz de la aplicación
// ============================================================================

use yew::prelude::*;

use crate::hooks::{use_auth_context, AuthContextProvider};
use crate::models::UserType;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <AuthContextProvider>
            <SessionHeader />
        </AuthContextProvider>
    }
}

/// Comprueba la sesión al montar y muestra el saludo según el tipo de usuario
#[function_component(SessionHeader)]
fn session_header() -> Html {
    let auth = use_auth_context();
    let checking = use_state(|| true);

    {
        let store = auth.store.clone();
        let checking = checking.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(user) = store.authenticate().await {
                    log::info!("✅ [APP] Usuario autenticado: {}", user.username);
                }
                checking.set(false);
            });
            || ()
        });
    }

    let on_logout = {
        let store = auth.store.clone();
        Callback::from(move |_: MouseEvent| {
            let store = store.clone();
            wasm_bindgen_futures::spawn_local(async move {
                store.logout().await;
            });
        })
    };

    if *checking {
        return html! { <p>{ "Loading..." }</p> };
    }

    match auth.store.current_user() {
        Some(user) => {
            let greeting = match user.user_type {
                UserType::Customer => "Welcome Customer!",
                UserType::Company => "Welcome Company!",
            };
            html! {
                <header>
                    <h1>{ greeting }</h1>
                    <button onclick={on_logout}>{ "Logout" }</button>
                </header>
            }
        }
        None => html! { <header><h1>{ "Please log in" }</h1></header> },
    }
}

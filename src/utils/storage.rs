use web_sys::{window, Storage};

use crate::error::StorageError;

/// Clave fija de la credencial en localStorage
pub const CREDENTIAL_STORAGE_KEY: &str = "authToken";

/// Dónde vive la credencial entre recargas de página
pub trait CredentialStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self);
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Lee el valor guardado bajo la clave. El formato normal es el token en crudo
/// (igual que la app web); un valor entre comillas JSON se acepta como legado.
pub fn decode_stored_token(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let token = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        serde_json::from_str::<String>(raw).ok()?
    } else {
        raw.to_string()
    };
    Some(token).filter(|t| !t.trim().is_empty())
}

/// Credencial en `localStorage` del navegador, como string sin codificar
#[derive(Clone, Debug, PartialEq)]
pub struct LocalStorageCredentials {
    key: String,
}

impl LocalStorageCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageCredentials {
    fn default() -> Self {
        Self::new(CREDENTIAL_STORAGE_KEY)
    }
}

impl CredentialStorage for LocalStorageCredentials {
    fn load(&self) -> Option<String> {
        let storage = get_local_storage()?;
        match storage.get_item(&self.key) {
            Ok(value) => value.as_deref().and_then(decode_stored_token),
            Err(_) => {
                log::error!("❌ Error leyendo credencial de localStorage");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(&self.key, token)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))?;
        log::info!("💾 Credencial guardada ({})", mask_token(token));
        Ok(())
    }

    fn clear(&self) {
        let Some(storage) = get_local_storage() else {
            return;
        };
        if storage.remove_item(&self.key).is_err() {
            log::warn!("⚠️ No se pudo eliminar la credencial");
            return;
        }
        log::info!("🗑️ Credencial eliminada");
    }
}

/// Versión segura para logs: solo los primeros caracteres del token
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}…", prefix)
}

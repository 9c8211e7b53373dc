// Utils compartidos

pub mod storage;

pub use storage::{decode_stored_token, mask_token, CredentialStorage, LocalStorageCredentials, CREDENTIAL_STORAGE_KEY};

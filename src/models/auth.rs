use serde::{Deserialize, Serialize};

use super::user::{SessionUser, UserType};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Respuesta de login y de registro: token + usuario serializado
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
    #[serde(default)]
    pub message: Option<String>,
}

/// Campos del formulario de registro unificado (cliente o empresa)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    /// Solo clientes
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Solo empresas
    #[serde(default)]
    pub field_of_work: Option<String>,
}

/// Cuerpo enviado a `register_{role}`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrationPayload {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_work: Option<String>,
}

impl RegistrationPayload {
    /// Construye el payload para `role`. `date_of_birth` ya debe venir normalizada
    /// (`YYYY-MM-DD`) y los campos del otro rol se descartan.
    pub fn new(input: &RegistrationInput, role: UserType, date_of_birth: Option<String>) -> Self {
        let (date_of_birth, field_of_work) = match role {
            UserType::Customer => (date_of_birth, None),
            UserType::Company => (None, input.field_of_work.as_deref().map(|f| f.trim().to_string())),
        };
        Self {
            email: input.email.trim().to_string(),
            username: input.username.trim().to_string(),
            password: input.password.clone(),
            password_confirm: input.password_confirm.clone(),
            user_type: role,
            date_of_birth,
            field_of_work,
        }
    }
}

/// Registro de la app `customers` (formulario antiguo)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub email: String,
    pub username: String,
    pub password: String,
    pub birth_date: String,
}

impl From<&CustomerRecord> for RegistrationInput {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            email: record.email.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
            password_confirm: String::new(),
            date_of_birth: Some(record.birth_date.clone()),
            field_of_work: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub id: Option<u64>,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_payload_drops_customer_fields() {
        let input = RegistrationInput {
            email: " company@example.com ".to_string(),
            username: "mycompany".to_string(),
            password: "Secur3$$".to_string(),
            password_confirm: "Secur3$$".to_string(),
            date_of_birth: Some("1990-01-01".to_string()),
            field_of_work: Some("Plumbing".to_string()),
        };
        let payload = RegistrationPayload::new(&input, UserType::Company, None);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["email"], "company@example.com");
        assert_eq!(json["user_type"], "company");
        assert_eq!(json["field_of_work"], "Plumbing");
        assert!(json.get("date_of_birth").is_none());
    }

    #[test]
    fn auth_response_tolerates_missing_message() {
        let json = r#"{"token": "abc123", "user": {"id": 1, "user_type": "customer"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.token, "abc123");
        assert_eq!(response.message, None);
    }
}

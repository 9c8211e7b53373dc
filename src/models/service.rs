use serde::{Deserialize, Serialize};

/// Empresas que cubren todos los campos
pub const ALL_IN_ONE: &str = "All in One";

/// Campos de trabajo concretos (los que puede llevar un servicio)
pub const SERVICE_FIELDS: &[&str] = &[
    "Air Conditioner",
    "Carpentry",
    "Electricity",
    "Gardening",
    "Home Machines",
    "Housekeeping",
    "Interior Design",
    "Locks",
    "Painting",
    "Plumbing",
    "Water Heaters",
];

/// Opciones del selector de registro de empresa: los campos concretos + "All in One"
pub fn fields_of_work() -> Vec<&'static str> {
    let mut fields = Vec::with_capacity(SERVICE_FIELDS.len() + 1);
    fields.push(ALL_IN_ONE);
    fields.extend_from_slice(SERVICE_FIELDS);
    fields.sort_unstable();
    fields
}

/// Servicio publicado por una empresa
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    // Campos que rellena el servidor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub company: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    pub name: String,
    pub description: String,
    pub price_per_hour: f64,
    pub field: String,
}

/// Valores tal cual salen del formulario de creación de servicio
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub price_per_hour: String,
    pub field: String,
}

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header, StatusCode},
    response::Response,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use medstock_inventory::{MedicineForm, MedicineRecord};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Add-medicine body as an untyped field map.
///
/// Accepts `application/json`, `multipart/form-data` and (by default)
/// `application/x-www-form-urlencoded`. Unreadable bodies are rejected with
/// `400 {"error": ...}`.
#[derive(Debug)]
pub struct MedicineFields(pub MedicineForm);

#[async_trait]
impl<S> FromRequest<S> for MedicineFields
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| bad_body(e.body_text()))?;
            return form_from_json(value).map(MedicineFields);
        }

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| bad_body(e.body_text()))?;

            let mut form = MedicineForm::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| bad_body(e.body_text()))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = field.text().await.map_err(|e| bad_body(e.body_text()))?;
                form.set(name, value);
            }
            return Ok(MedicineFields(form));
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| bad_body(e.body_text()))?;
        Ok(MedicineFields(pairs.into_iter().collect()))
    }
}

fn bad_body(detail: String) -> Response {
    errors::json_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {detail}"))
}

/// JSON object -> field map. `null` fields are treated as absent; numbers and
/// booleans keep their JSON text.
pub fn form_from_json(value: Value) -> Result<MedicineForm, Response> {
    let Value::Object(fields) = value else {
        return Err(bad_body("expected a JSON object".to_string()));
    };

    let mut form = MedicineForm::new();
    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::String(s) => form.set(key, s),
            Value::Number(n) => form.set(key, n.to_string()),
            Value::Bool(b) => form.set(key, b.to_string()),
            Value::Array(_) | Value::Object(_) => form.set(key, value.to_string()),
        }
    }
    Ok(form)
}

// -------------------------
// Response DTOs
// -------------------------

pub const MEDICINE_ADDED: &str = "Medicine added successfully";

#[derive(Debug, Serialize)]
pub struct AddMedicineResponse {
    pub message: &'static str,
    pub medicine: MedicineRecord,
}

//! Form controller: a draft record, field-level errors, submit.
//!
//! The draft is a JSON object edited field by field. Submitting runs the
//! declared required-field checks locally, then creates or updates through
//! the resource client; a 422 maps its field errors back onto the form and
//! leaves the draft untouched, so the user never loses their input.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, FieldErrorMap};
use crate::resource::ResourceClient;

/// Editing an existing record starts from a fetch; the form refuses input
/// until that fetch resolves.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("the form is still loading its record")]
pub struct FormNotReady;

pub struct FormController {
    client: ResourceClient,
    draft: Map<String, Value>,
    field_errors: FieldErrorMap,
    /// Fields that must be present and non-empty before submit (the
    /// required selects of the form).
    required: Vec<&'static str>,
    editing_id: Option<String>,
    ready: bool,
    submitting: bool,
}

impl FormController {
    /// A create form, interactable immediately.
    pub fn create(client: ResourceClient, required: Vec<&'static str>) -> Self {
        Self {
            client,
            draft: Map::new(),
            field_errors: FieldErrorMap::new(),
            required,
            editing_id: None,
            ready: true,
            submitting: false,
        }
    }

    /// An edit form for `id`. Not interactable until
    /// [`load_record`](Self::load_record) resolves.
    pub fn edit(client: ResourceClient, id: impl Into<String>, required: Vec<&'static str>) -> Self {
        Self {
            client,
            draft: Map::new(),
            field_errors: FieldErrorMap::new(),
            required,
            editing_id: Some(id.into()),
            ready: false,
            submitting: false,
        }
    }

    /// Populate the draft from the existing record.
    pub async fn load_record(&mut self) -> Result<(), ClientError> {
        let Some(id) = self.editing_id.clone() else {
            return Ok(());
        };
        let record: Value = self.client.get(&id).await?;
        if let Value::Object(map) = record {
            self.draft = map;
        }
        self.ready = true;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.draft.get(name)
    }

    pub fn draft(&self) -> &Map<String, Value> {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrorMap {
        &self.field_errors
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Shallow-merge one field into the draft.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), FormNotReady> {
        if !self.ready {
            return Err(FormNotReady);
        }
        self.draft.insert(name.into(), value.into());
        Ok(())
    }

    fn missing(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// The local presence checks run before any request is made.
    fn check_required(&self) -> FieldErrorMap {
        let mut errors = FieldErrorMap::new();
        for field in &self.required {
            if Self::missing(self.draft.get(*field)) {
                errors.insert(field.to_string(), vec![format!("{field} is required")]);
            }
        }
        errors
    }

    /// Create or update, depending on how the form was opened.
    ///
    /// On a validation failure the error map is kept on the form and the
    /// draft is returned unchanged to the caller's next render.
    pub async fn submit<T: DeserializeOwned>(&mut self) -> Result<T, ClientError> {
        let required_errors = self.check_required();
        if !required_errors.is_empty() {
            self.field_errors = required_errors.clone();
            return Err(ClientError::Validation {
                errors: required_errors,
            });
        }

        self.submitting = true;
        let body = Value::Object(self.draft.clone());
        let result = match &self.editing_id {
            Some(id) => self.client.update::<T>(id, body).await,
            None => self.client.create::<T>(body).await,
        };
        self.submitting = false;

        match result {
            Ok(record) => {
                self.field_errors.clear();
                Ok(record)
            }
            Err(err) => {
                if let Some(errors) = err.field_errors() {
                    self.field_errors = errors.clone();
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn client(transport: ScriptedTransport) -> ResourceClient {
        ResourceClient::new(Arc::new(transport), "/grupos")
    }

    #[tokio::test]
    async fn test_422_maps_exactly_the_response_fields() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            422,
            json!({"errors": {"nombre": ["nombre is already in use"], "cupo_maximo": ["too small"]}}),
        );
        let mut form = FormController::create(client(transport), vec![]);
        form.set_field("nombre", "10A").unwrap();
        form.set_field("cupo_maximo", 0).unwrap();

        let err = form.submit::<Value>().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));

        let fields: Vec<_> = form.field_errors().keys().cloned().collect();
        assert_eq!(fields, vec!["cupo_maximo".to_string(), "nombre".to_string()]);
        // The draft survives the failure
        assert_eq!(form.field("nombre"), Some(&json!("10A")));
        assert_eq!(form.field("cupo_maximo"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn test_required_selects_block_submit_locally() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ResourceClient::new(transport.clone(), "/grupos");
        let mut form =
            FormController::create(client, vec!["sede_id", "grado_id", "anio_id"]);
        form.set_field("nombre", "10A").unwrap();
        form.set_field("sede_id", "some-uuid").unwrap();

        let err = form.submit::<Value>().await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains_key("grado_id"));
        assert!(errors.contains_key("anio_id"));
        assert!(!errors.contains_key("sede_id"));
        // Nothing went over the wire
        assert!(transport.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_clears_errors() {
        let transport = ScriptedTransport::new();
        transport.push_json(422, json!({"errors": {"nombre": ["bad"]}}));
        transport.push_json(201, json!({"id": "g1", "nombre": "10A"}));
        let mut form = FormController::create(client(transport), vec![]);
        form.set_field("nombre", "10A").unwrap();

        assert!(form.submit::<Value>().await.is_err());
        assert!(!form.field_errors().is_empty());

        let record = form.submit::<Value>().await.unwrap();
        assert_eq!(record["id"], "g1");
        assert!(form.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_edit_form_not_interactable_until_loaded() {
        let transport = ScriptedTransport::new();
        transport.route_json(
            "GET",
            "/grupos/g1",
            200,
            json!({"id": "g1", "nombre": "10A", "cupo_maximo": 40}),
        );
        let mut form = FormController::edit(client(transport), "g1", vec![]);

        assert_eq!(form.set_field("nombre", "10B"), Err(FormNotReady));

        form.load_record().await.unwrap();
        assert!(form.is_ready());
        assert_eq!(form.field("nombre"), Some(&json!("10A")));
        form.set_field("nombre", "10B").unwrap();
        assert_eq!(form.field("nombre"), Some(&json!("10B")));
    }

    #[tokio::test]
    async fn test_edit_submit_puts_to_record_path() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.route_json(
            "GET",
            "/grupos/g1",
            200,
            json!({"id": "g1", "nombre": "10A"}),
        );
        transport.route_json(
            "PUT",
            "/grupos/g1",
            200,
            json!({"id": "g1", "nombre": "10B"}),
        );
        let client = ResourceClient::new(transport.clone(), "/grupos");
        let mut form = FormController::edit(client, "g1", vec![]);
        form.load_record().await.unwrap();
        form.set_field("nombre", "10B").unwrap();

        let record = form.submit::<Value>().await.unwrap();
        assert_eq!(record["nombre"], "10B");
        let last = transport.last_request().unwrap();
        assert_eq!(last.method, "PUT");
        assert_eq!(last.path, "/grupos/g1");
    }

    #[tokio::test]
    async fn test_non_validation_failure_is_a_single_message() {
        let transport = ScriptedTransport::new();
        transport.push_json(500, json!({"message": "database unavailable"}));
        let mut form = FormController::create(client(transport), vec![]);
        form.set_field("nombre", "10A").unwrap();

        let err = form.submit::<Value>().await.unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 500, .. }));
        assert_eq!(err.to_string(), "database unavailable");
        assert!(form.field_errors().is_empty());
    }
}

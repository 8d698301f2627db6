//! Contact form relay.
//!
//! Submissions are formatted into a readable message in the visitor's
//! language and posted as JSON to a Formcarry-compatible endpoint. The
//! endpoint answers with a `code` field: `200` is success, `422` is a field
//! validation failure, anything else is a generic error. Nothing is retried;
//! the visitor resubmits.

use crate::i18n::Catalog;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

/// How long the success message stays up before the form is cleared.
pub const SUCCESS_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

/// Fields of the contact form as the visitor entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub group_type: String,
    pub participants: String,
    pub date: String,
    pub message: String,
}

/// Kind of group asking for an experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    Corporate,
    Educational,
    Family,
    Association,
    Other,
}

impl GroupType {
    pub const ALL: [GroupType; 5] = [
        GroupType::Corporate,
        GroupType::Educational,
        GroupType::Family,
        GroupType::Association,
        GroupType::Other,
    ];

    /// Parse the form value (e.g., "corporate").
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.value() == value)
    }

    /// Value submitted by the form.
    pub fn value(&self) -> &'static str {
        match self {
            GroupType::Corporate => "corporate",
            GroupType::Educational => "educational",
            GroupType::Family => "family",
            GroupType::Association => "association",
            GroupType::Other => "other",
        }
    }

    /// Catalog key of the option label.
    pub fn label_key(&self) -> String {
        format!("contact.form.groupTypes.{}", self.value())
    }
}

/// A form field that failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl ContactForm {
    /// Check required fields. Name and email must be filled in and the email
    /// must at least contain an `@`.
    pub fn validate(&self, catalog: &Catalog) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: catalog.text("contact.validation.nameRequired"),
            });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: "email",
                message: catalog.text("contact.validation.emailRequired"),
            });
        } else if !email.contains('@') {
            errors.push(FieldError {
                field: "email",
                message: catalog.text("contact.validation.emailInvalid"),
            });
        }

        errors
    }

    /// Build the message body sent to the form endpoint.
    pub fn formatted_message(&self, catalog: &Catalog) -> String {
        let or_else = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                catalog.text(fallback)
            } else {
                value.to_string()
            }
        };

        let group_type = match GroupType::from_value(&self.group_type) {
            Some(group) => catalog.text(&group.label_key()),
            None => or_else(&self.group_type, "contact.email.notSpecified"),
        };

        let lines = [
            catalog.text("contact.email.subject"),
            String::new(),
            catalog.text("contact.email.contactData"),
            format!("• {} {}", catalog.text("contact.email.name"), self.name),
            format!("• {} {}", catalog.text("contact.email.email"), self.email),
            format!(
                "• {} {}",
                catalog.text("contact.email.phone"),
                or_else(&self.phone, "contact.email.notProvided")
            ),
            String::new(),
            catalog.text("contact.email.groupInfo"),
            format!("• {} {}", catalog.text("contact.email.groupType"), group_type),
            format!(
                "• {} {}",
                catalog.text("contact.email.participants"),
                or_else(&self.participants, "contact.email.notSpecified")
            ),
            format!(
                "• {} {}",
                catalog.text("contact.email.date"),
                or_else(&self.date, "contact.email.notSpecified")
            ),
            String::new(),
            catalog.text("contact.email.additionalMessage"),
            or_else(&self.message, "contact.email.noAdditionalMessage"),
        ];

        lines.join("\n").trim().to_string()
    }
}

/// Result of a submission, as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// The endpoint rejected one or more fields (`422`)
    ValidationFailed(String),
    /// Any other failure, including network errors
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to reach contact endpoint: {0}")]
    Transport(#[source] reqwest::Error),
}

/// JSON document posted to the endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Submission<'a> {
    name: &'a str,
    email: &'a str,
    message: String,
    phone: &'a str,
    group_type: &'a str,
    participants: &'a str,
    date: &'a str,
}

/// Endpoint reply. Formcarry reports the outcome in `code`.
#[derive(Debug, Deserialize)]
struct EndpointResponse {
    code: Option<u16>,
    message: Option<String>,
}

/// Client for the third-party form endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ContactError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ContactError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a form and interpret the endpoint's answer.
    pub async fn submit(&self, form: &ContactForm, catalog: &Catalog) -> SubmissionOutcome {
        let submission = Submission {
            name: &form.name,
            email: &form.email,
            message: form.formatted_message(catalog),
            phone: &form.phone,
            group_type: &form.group_type,
            participants: &form.participants,
            date: &form.date,
        };

        let (status, body) = match self.post(&submission).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error sending contact form: {}", e);
                return SubmissionOutcome::Failed(catalog.text("contact.email.errorSending"));
            }
        };

        // A reply that is not JSON (captcha or thank-you pages) is not a
        // confirmation, whatever the status says.
        let Some(body) = body else {
            warn!("Contact endpoint answered {} without a JSON body", status);
            return SubmissionOutcome::Failed(catalog.text("contact.email.errorSending"));
        };

        let code = body.code.unwrap_or(status);
        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| catalog.text("contact.email.errorSending"));

        match code {
            200 => {
                info!("✓ Contact form relayed ({})", catalog.locale());
                SubmissionOutcome::Success
            }
            422 => {
                warn!("Contact endpoint rejected fields: {}", message);
                SubmissionOutcome::ValidationFailed(message)
            }
            other => {
                warn!("Contact endpoint error ({}): {}", other, message);
                SubmissionOutcome::Failed(message)
            }
        }
    }

    async fn post(
        &self,
        submission: &Submission<'_>,
    ) -> Result<(u16, Option<EndpointResponse>), ContactError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(submission)
            .send()
            .await
            .map_err(ContactError::Transport)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(ContactError::Transport)?;
        let body = serde_json::from_str(&text).ok();

        Ok((status, body))
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting input; `error` is the inline message from the last attempt
    Editing { error: Option<String> },
    Submitting,
    /// Success message showing since `at`
    Submitted { at: Instant },
}

/// Client-visible state of the contact form.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    pub fields: ContactForm,
    status: FormStatus,
    display_window: Duration,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new(SUCCESS_DISPLAY_WINDOW)
    }
}

impl ContactFormState {
    pub fn new(display_window: Duration) -> Self {
        Self {
            fields: ContactForm::default(),
            status: FormStatus::Editing { error: None },
            display_window,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Inline error currently shown, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Start a submission. Returns `false` (and leaves the state alone) if a
    /// submission is already running or the success message is up.
    pub fn begin_submit(&mut self) -> bool {
        match self.status {
            FormStatus::Editing { .. } => {
                self.status = FormStatus::Submitting;
                true
            }
            _ => false,
        }
    }

    /// Apply the outcome of the running submission.
    pub fn finish(&mut self, outcome: SubmissionOutcome, now: Instant) {
        self.status = match outcome {
            SubmissionOutcome::Success => FormStatus::Submitted { at: now },
            SubmissionOutcome::ValidationFailed(message) | SubmissionOutcome::Failed(message) => {
                FormStatus::Editing {
                    error: Some(message),
                }
            }
        };
    }

    /// Clear the form once the success message has been up for the display
    /// window.
    pub fn tick(&mut self, now: Instant) {
        if let FormStatus::Submitted { at } = self.status {
            if now.saturating_duration_since(at) >= self.display_window {
                self.fields = ContactForm::default();
                self.status = FormStatus::Editing { error: None };
            }
        }
    }

    /// Run a full submission against `client`.
    pub async fn submit(&mut self, client: &ContactClient, catalog: &Catalog) {
        if !self.begin_submit() {
            return;
        }
        let outcome = client.submit(&self.fields, catalog).await;
        self.finish(outcome, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleRegistry;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn catalog() -> Catalog {
        let locale = LocaleRegistry::colmena().default_locale();
        let document = json!({
            "contact": {
                "email": {
                    "subject": "Nova sol·licitud",
                    "contactData": "Dades de contacte:",
                    "name": "Nom:",
                    "email": "Email:",
                    "phone": "Telèfon:",
                    "notProvided": "No proporcionat",
                    "groupInfo": "Informació del grup:",
                    "groupType": "Tipus de grup:",
                    "participants": "Participants:",
                    "date": "Data:",
                    "notSpecified": "No especificat",
                    "additionalMessage": "Missatge addicional:",
                    "noAdditionalMessage": "Cap missatge addicional",
                    "errorSending": "Error en enviar el formulari"
                },
                "form": { "groupTypes": { "corporate": "Empresa" } },
                "validation": {
                    "nameRequired": "El nom és obligatori",
                    "emailRequired": "L'email és obligatori",
                    "emailInvalid": "L'email no és vàlid"
                }
            }
        });
        Catalog::from_json(locale, &document.to_string()).unwrap()
    }

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: String::new(),
            group_type: "corporate".to_string(),
            participants: "25".to_string(),
            date: String::new(),
            message: "Hola!".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> ContactClient {
        ContactClient::new(format!("{}/s/test-form", server.uri()), Duration::from_secs(5)).unwrap()
    }

    // ==================== Form Tests ====================

    #[test]
    fn test_form_deserializes_camel_case() {
        let form: ContactForm = serde_json::from_value(json!({
            "name": "Anna",
            "email": "anna@example.com",
            "groupType": "family"
        }))
        .unwrap();
        assert_eq!(form.group_type, "family");
        assert!(form.phone.is_empty());
    }

    #[test]
    fn test_validate_complete_form() {
        assert!(filled_form().validate(&catalog()).is_empty());
    }

    #[test]
    fn test_validate_missing_required_fields() {
        let errors = ContactForm::default().validate(&catalog());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email"]);
        assert_eq!(errors[0].message, "El nom és obligatori");
    }

    #[test]
    fn test_validate_malformed_email() {
        let form = ContactForm {
            email: "anna.example.com".to_string(),
            ..filled_form()
        };
        let errors = form.validate(&catalog());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "L'email no és vàlid");
    }

    #[test]
    fn test_formatted_message_uses_fallbacks() {
        let message = filled_form().formatted_message(&catalog());

        assert!(message.starts_with("Nova sol·licitud"));
        assert!(message.contains("• Nom: Anna"));
        assert!(message.contains("• Telèfon: No proporcionat"));
        assert!(message.contains("• Tipus de grup: Empresa"));
        assert!(message.contains("• Participants: 25"));
        assert!(message.contains("• Data: No especificat"));
        assert!(message.ends_with("Missatge addicional:\nHola!"));
    }

    #[test]
    fn test_formatted_message_without_message() {
        let form = ContactForm {
            message: "   ".to_string(),
            ..filled_form()
        };
        assert!(form
            .formatted_message(&catalog())
            .ends_with("Cap missatge addicional"));
    }

    #[test]
    fn test_group_type_round_trip_values() {
        for group in GroupType::ALL {
            assert_eq!(GroupType::from_value(group.value()), Some(group));
        }
        assert_eq!(GroupType::from_value("unknown"), None);
    }

    // ==================== Submission Tests ====================

    #[tokio::test]
    async fn test_submit_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/s/test-form"))
            .and(header("Accept", "application/json"))
            .and(body_partial_json(json!({
                "name": "Anna",
                "email": "anna@example.com",
                "groupType": "corporate",
                "participants": "25"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "success"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(outcome, SubmissionOutcome::Success);
    }

    #[tokio::test]
    async fn test_submit_validation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": 422,
                "message": "Email is not valid"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::ValidationFailed("Email is not valid".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_code_in_body_wins_over_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 429,
                "message": "Too many submissions"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed("Too many submissions".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_non_json_error_uses_catalog_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed("Error en enviar el formulari".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_html_reply_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Are you human?</body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed("Error en enviar el formulari".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_status_used_when_body_has_no_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).await.submit(&filled_form(), &catalog()).await;
        assert_eq!(outcome, SubmissionOutcome::Success);
    }

    #[tokio::test]
    async fn test_submit_unreachable_endpoint() {
        let client = ContactClient::new("http://127.0.0.1:1/s/form", Duration::from_secs(2)).unwrap();
        let outcome = client.submit(&filled_form(), &catalog()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed("Error en enviar el formulari".to_string())
        );
    }

    // ==================== Form State Tests ====================

    #[test]
    fn test_state_success_then_cleared_after_window() {
        let mut state = ContactFormState::default();
        state.fields = filled_form();
        let start = Instant::now();

        assert!(state.begin_submit());
        assert_eq!(state.status(), &FormStatus::Submitting);
        state.finish(SubmissionOutcome::Success, start);
        assert!(matches!(state.status(), FormStatus::Submitted { .. }));

        state.tick(start + Duration::from_secs(4));
        assert_eq!(state.fields, filled_form());

        state.tick(start + SUCCESS_DISPLAY_WINDOW);
        assert_eq!(state.fields, ContactForm::default());
        assert_eq!(state.status(), &FormStatus::Editing { error: None });
    }

    #[test]
    fn test_state_validation_failure_keeps_fields() {
        let mut state = ContactFormState::default();
        state.fields = filled_form();

        assert!(state.begin_submit());
        state.finish(
            SubmissionOutcome::ValidationFailed("Email is not valid".to_string()),
            Instant::now(),
        );

        assert_eq!(state.error(), Some("Email is not valid"));
        assert_eq!(state.fields, filled_form());
        state.tick(Instant::now() + Duration::from_secs(60));
        assert_eq!(state.fields, filled_form());
    }

    #[test]
    fn test_state_rejects_double_submit() {
        let mut state = ContactFormState::default();
        assert!(state.begin_submit());
        assert!(!state.begin_submit());
    }

    #[test]
    fn test_state_resubmit_clears_error() {
        let mut state = ContactFormState::default();
        state.begin_submit();
        state.finish(SubmissionOutcome::Failed("boom".to_string()), Instant::now());
        assert_eq!(state.error(), Some("boom"));

        assert!(state.begin_submit());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_state_submit_against_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
            .mount(&server)
            .await;

        let mut state = ContactFormState::default();
        state.fields = filled_form();
        state.submit(&client_for(&server).await, &catalog()).await;

        assert!(matches!(state.status(), FormStatus::Submitted { .. }));
    }
}

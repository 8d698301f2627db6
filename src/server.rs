//! HTTP adapter: the axum router, the locale middleware and the handlers.
//!
//! The middleware is a thin wrapper around `LocaleResolver`: it turns
//! `Redirect` into a `307`, `NotFound` into a localized 404 page, and stores
//! the accepted locale in the request extensions for the page handler.

use crate::contact::{ContactClient, ContactForm, ContactFormState, FieldError, SubmissionOutcome};
use crate::i18n::{Catalog, CatalogLoader, Locale, LocaleRegistry, MetricsReport};
use crate::render::{
    is_page_remainder, render_home, render_home_with_form, render_not_found, PageContext,
};
use crate::routing::{LocaleResolver, Outcome, RouteMatcherConfig};
use axum::{
    extract::{FromRequest, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

/// Shared, read-only application state.
#[derive(Debug)]
pub struct AppState {
    pub registry: Arc<LocaleRegistry>,
    pub resolver: LocaleResolver,
    pub catalogs: CatalogLoader,
    pub contact: ContactClient,
    pub routes: RouteMatcherConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(registry: Arc<LocaleRegistry>, catalogs: CatalogLoader, contact: ContactClient) -> Self {
        Self {
            resolver: LocaleResolver::new(Arc::clone(&registry)),
            registry,
            catalogs,
            contact,
            routes: RouteMatcherConfig::default(),
        }
    }
}

/// Locale accepted by the middleware for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub locale: Locale,
    pub remainder: String,
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/health", get(health))
        .route("/:locale", get(page))
        .route("/:locale/*rest", get(page))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            locale_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn locale_middleware(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !state.routes.intercepts(&path) {
        return next.run(request).await;
    }

    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match state.resolver.resolve_request(&path, accept_language.as_deref()) {
        Outcome::Accept { locale, remainder } => {
            request
                .extensions_mut()
                .insert(ResolvedLocale { locale, remainder });
            next.run(request).await
        }
        Outcome::Redirect { target } => {
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            debug!("Redirecting {} -> {}", path, target);
            Redirect::temporary(&target).into_response()
        }
        Outcome::NotFound => {
            debug!("No locale for {}", path);
            not_found_page(&state, state.registry.default_locale(), "/").await
        }
    }
}

async fn page(
    State(state): State<SharedState>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Response {
    match resolved {
        Some(Extension(resolved)) => render_page(&state, &resolved).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Paths the router has no route for. `/ca/` lands here as well as
/// unknown pages.
async fn fallback(
    State(state): State<SharedState>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Response {
    page(State(state), resolved).await
}

async fn render_page(state: &AppState, resolved: &ResolvedLocale) -> Response {
    if !is_page_remainder(&resolved.remainder) {
        return not_found_page(state, resolved.locale, &resolved.remainder).await;
    }

    match state.catalogs.load(resolved.locale).await {
        Ok(catalog) => Html(render_home(&PageContext {
            registry: &state.registry,
            catalog: &catalog,
            remainder: &resolved.remainder,
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn not_found_page(state: &AppState, locale: Locale, remainder: &str) -> Response {
    match state.catalogs.load(locale).await {
        Ok(catalog) => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&PageContext {
                registry: &state.registry,
                catalog: &catalog,
                remainder,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContactQuery {
    locale: Option<String>,
}

/// Reply of the contact endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactReply {
    /// "success", "validation_failed" or "error"
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ContactFieldError>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for ContactFieldError {
    fn from(e: FieldError) -> Self {
        Self {
            field: e.field.to_string(),
            message: e.message,
        }
    }
}

/// Accepts JSON (from scripts) or urlencoded bodies (plain form posts).
/// Scripts get a `ContactReply`; plain form posts get the landing page back
/// with the outcome shown in the contact section.
async fn submit_contact(
    State(state): State<SharedState>,
    Query(query): Query<ContactQuery>,
    request: Request,
) -> Response {
    let locale = query
        .locale
        .as_deref()
        .and_then(|code| state.registry.locale(code))
        .unwrap_or_else(|| state.registry.default_locale());

    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let form = if is_form {
        Form::<ContactForm>::from_request(request, &state)
            .await
            .map(|Form(form)| form)
            .map_err(IntoResponse::into_response)
    } else {
        Json::<ContactForm>::from_request(request, &state)
            .await
            .map(|Json(form)| form)
            .map_err(IntoResponse::into_response)
    };
    let form = match form {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };

    let catalog = match state.catalogs.load(locale).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let field_errors = form.validate(&catalog);
    let outcome = if field_errors.is_empty() {
        state.contact.submit(&form, &catalog).await
    } else {
        warn!("Contact form rejected locally ({} field errors)", field_errors.len());
        SubmissionOutcome::ValidationFailed(catalog.text("contact.validation.summary"))
    };

    let status = match &outcome {
        SubmissionOutcome::Success => StatusCode::OK,
        SubmissionOutcome::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    };

    if is_form {
        let outcome = match outcome {
            SubmissionOutcome::ValidationFailed(summary) if !field_errors.is_empty() => {
                let details: Vec<&str> = field_errors.iter().map(|e| e.message.as_str()).collect();
                SubmissionOutcome::ValidationFailed(format!("{} {}", summary, details.join(" ")))
            }
            other => other,
        };
        return (status, contact_page(&state, &catalog, form, outcome)).into_response();
    }

    let (kind, message) = match outcome {
        SubmissionOutcome::Success => ("success", catalog.text("contact.form.successMessage")),
        SubmissionOutcome::ValidationFailed(message) => ("validation_failed", message),
        SubmissionOutcome::Failed(message) => ("error", message),
    };
    let reply = ContactReply {
        status: kind.to_string(),
        message,
        errors: field_errors.into_iter().map(ContactFieldError::from).collect(),
    };

    (status, Json(reply)).into_response()
}

/// Landing page after a plain form post, with the form state the outcome
/// leaves behind.
fn contact_page(
    state: &AppState,
    catalog: &Catalog,
    form: ContactForm,
    outcome: SubmissionOutcome,
) -> Html<String> {
    let mut form_state = ContactFormState::default();
    form_state.fields = form;
    form_state.begin_submit();
    form_state.finish(outcome, Instant::now());

    Html(render_home_with_form(
        &PageContext {
            registry: &state.registry,
            catalog,
            remainder: "/contact",
        },
        &form_state,
    ))
}

/// Health report.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub default_locale: String,
    pub locales: Vec<String>,
    pub catalogs: MetricsReport,
}

async fn health(State(state): State<SharedState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".to_string(),
        default_locale: state.registry.default_locale().to_string(),
        locales: state
            .registry
            .list_locales()
            .iter()
            .map(ToString::to_string)
            .collect(),
        catalogs: state.catalogs.metrics(),
    })
}

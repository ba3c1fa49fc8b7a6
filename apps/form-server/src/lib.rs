//! form-server: HTTP front end for the Secure Form flow.
//!
//! Serves the home page with the message form, validates submissions against
//! the injection blocklist, and either redirects to the result page or
//! re-renders the form with the rejection reason.
//!
//! Routes:
//! - `GET /`, `GET /index.html`: home page
//! - `POST /submit`: form submission (`message` field)
//! - `GET /result.html?message=...`: result page
//! - `POST /api/validate`: JSON validation endpoint
//!
//! Configuration: See `config.rs` for all environment variables.

pub mod config;
pub mod pages;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use domain::navigator::{Navigator, Page, Transition};
use domain::validate::Validator;
use domain::{CoreError, InputMessage, RejectReason, Rejection};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Name of the form field and result-page query parameter carrying the text.
pub const MESSAGE_FIELD: &str = "message";

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'none'; \
     style-src 'self' 'unsafe-inline'; frame-ancestors 'none'; form-action 'self'; base-uri 'none'";

#[derive(Clone)]
pub struct AppState {
    navigator: Arc<Navigator>,
}

impl AppState {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self::with_navigator(Navigator::new(Validator::new()?)))
    }

    pub fn with_navigator(navigator: Navigator) -> Self {
        Self {
            navigator: Arc::new(navigator),
        }
    }
}

/// Routes only, without middleware.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route(Page::Home.path(), get(home))
        .route("/submit", post(submit))
        .route(Page::Result.path(), get(result))
        .route("/api/validate", post(validate_api))
        .fallback(not_found)
        .with_state(state)
}

/// Full application: routes plus tracing, request ids, CORS and security headers.
pub fn app(state: AppState, cfg: &config::Config) -> Router {
    // Request ID header name
    let x_request_id = HeaderName::from_static("x-request-id");

    let cors = if cfg.cors_is_permissive() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([cfg.cors_allow_origin.clone()]))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    routes(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri().path(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(cors)
}

/// Location of the result page carrying `message`.
pub fn result_location(message: &InputMessage) -> String {
    http_common::url_with_query(Page::Result.path(), MESSAGE_FIELD, message.as_str())
}

fn log_rejection(rejection: &Rejection) {
    match &rejection.reason {
        RejectReason::Blocked { category, rule } => {
            warn!(category = category.as_str(), rule = *rule, "submission blocked")
        }
        RejectReason::TooLong { max, actual } => {
            warn!(max = *max, actual = *actual, "submission too long")
        }
        RejectReason::Empty => info!("empty submission"),
    }
}

async fn home() -> Html<String> {
    Html(pages::render_home(None))
}

#[derive(Deserialize)]
struct SubmitForm {
    #[serde(default)]
    message: String,
}

async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Response {
    match state.navigator.submit(&form.message) {
        Transition::ShowResult(msg) => {
            info!(len = msg.as_str().chars().count(), "submission accepted");
            Redirect::to(&result_location(&msg)).into_response()
        }
        Transition::StayWithError(rejection) => {
            log_rejection(&rejection);
            (
                StatusCode::BAD_REQUEST,
                Html(pages::render_home(Some(&rejection.message()))),
            )
                .into_response()
        }
        Transition::ReturnHome => Redirect::to(Page::Home.path()).into_response(),
    }
}

async fn result(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let carried = http_common::parse_query_param(query.as_deref(), MESSAGE_FIELD);
    match state.navigator.arrive_at_result(carried.as_deref()) {
        Transition::ShowResult(msg) => Html(pages::render_result(&msg)).into_response(),
        Transition::StayWithError(_) | Transition::ReturnHome => {
            warn!(has_message = carried.is_some(), "result page without an acceptable message");
            Redirect::to(Page::Home.path()).into_response()
        }
    }
}

#[derive(Deserialize)]
struct ValidateReq {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ValidateOut {
    accepted: bool,
    message: String,
    redirect_to: String,
}

async fn validate_api(State(state): State<AppState>, Json(body): Json<ValidateReq>) -> Response {
    match state.navigator.validator().check(&body.message) {
        Ok(msg) => {
            info!(len = msg.as_str().chars().count(), "api validation accepted");
            let out = ValidateOut {
                accepted: true,
                redirect_to: result_location(&msg),
                message: msg.into_inner(),
            };
            (StatusCode::OK, Json(out)).into_response()
        }
        Err(CoreError::ValidationRejected(rejection)) => {
            log_rejection(&rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(http_common::json_error_with_message(
                    "validation_rejected",
                    &rejection.message(),
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(err = ?e, "validation error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_err("internal")),
            )
                .into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(http_common::json_err("not_found")))
}

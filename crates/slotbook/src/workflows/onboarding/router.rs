use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ProfessionalId;
use super::repository::{ProfessionalRecord, ProfileRepository, RepositoryError};
use super::service::{OnboardingService, OnboardingServiceError, RegistrationRequest};
use super::validation::{
    AvailabilitySubmission, PaymentSubmission, ServicesSubmission, SubmissionRejection,
};

/// Router builder exposing the onboarding wizard over HTTP.
pub fn onboarding_router<R>(service: Arc<OnboardingService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/professionals", post(register_handler::<R>))
        .route(
            "/api/v1/professionals/:professional_id",
            get(profile_handler::<R>),
        )
        .route(
            "/api/v1/professionals/:professional_id/onboarding/payment",
            post(payment_handler::<R>),
        )
        .route(
            "/api/v1/professionals/:professional_id/onboarding/availability",
            post(availability_handler::<R>),
        )
        .route(
            "/api/v1/professionals/:professional_id/onboarding/services",
            post(services_handler::<R>),
        )
        .route(
            "/api/v1/professionals/:professional_id/vacation",
            put(vacation_handler::<R>),
        )
        .route(
            "/api/v1/professionals/:professional_id/dashboard",
            get(dashboard_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct VacationRequest {
    pub(crate) enabled: bool,
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    axum::Json(request): axum::Json<RegistrationRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.register(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.profile_view())).into_response(),
        Err(OnboardingServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": true,
                "message": "an account with this email already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    match service.profile(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.profile_view())).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn payment_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
    axum::Json(submission): axum::Json<PaymentSubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    match service.submit_payment_preference(&id, submission) {
        Ok(record) => saved_response("payment preference saved", &record),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn availability_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
    axum::Json(submission): axum::Json<AvailabilitySubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    match service.submit_availability(&id, submission) {
        Ok(record) => saved_response("availability saved", &record),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn services_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
    axum::Json(submission): axum::Json<ServicesSubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    match service.submit_services(&id, submission) {
        Ok(record) => saved_response("services saved", &record),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn vacation_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
    axum::Json(request): axum::Json<VacationRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    match service.set_vacation_mode(&id, request.enabled) {
        Ok(record) => saved_response("vacation mode updated", &record),
        Err(error) => failure_response(error),
    }
}

/// Gate for post-onboarding screens: while the counter is short of complete,
/// clients are redirected to the screen that still needs input.
pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<OnboardingService<R>>>,
    Path(professional_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let id = ProfessionalId(professional_id);
    let record = match service.profile(&id) {
        Ok(record) => record,
        Err(error) => return failure_response(error),
    };

    let step = record.profile.step;
    if !step.is_complete() {
        let location = format!(
            "/api/v1/professionals/{}/{}",
            record.profile.id,
            step.route_suffix()
        );
        let payload = json!({
            "error": true,
            "message": "onboarding is not complete",
            "pending_step": step.label(),
        });
        return (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, location)],
            axum::Json(payload),
        )
            .into_response();
    }

    let payload = json!({
        "error": false,
        "message": "dashboard",
        "vacation_mode": record.profile.vacation_mode,
        "services": record.services,
        "availability": record.availability,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn saved_response(message: &str, record: &ProfessionalRecord) -> Response {
    let payload = json!({
        "error": false,
        "message": message,
        "configuration_step": record.profile.step.index(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn failure_response(error: OnboardingServiceError) -> Response {
    match error {
        OnboardingServiceError::Rejected(SubmissionRejection::Invalid(fields)) => {
            let payload = json!({
                "error": true,
                "message": "submission failed validation",
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        OnboardingServiceError::Rejected(rejection @ SubmissionRejection::MalformedWeek { .. }) => {
            let payload = json!({
                "error": true,
                "message": rejection.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        OnboardingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": true,
                "message": "professional not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        OnboardingServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": true,
                "message": "resource already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        OnboardingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            let payload = json!({
                "error": true,
                "message": "something went wrong, please try again later",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

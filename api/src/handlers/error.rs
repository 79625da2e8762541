//! Domain error to HTTP response translation.
//!
//! Every failure leaves the gateway as the uniform envelope
//! `{ success: false, message, code }`. Internal errors are logged in full
//! and masked with a generic message so storage details never reach a
//! client.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use tracing::error;
use validator::ValidationErrors;

use mc_core::errors::DomainError;
use mc_shared::types::response::ServiceResponse;
use mc_shared::utils::validation::ValidationIssues;

/// Render a domain error as its HTTP response
pub fn respond(err: DomainError) -> HttpResponse {
    if err.is_internal() {
        error!(error = %err, code = err.error_code(), "internal error");
        let envelope: ServiceResponse<()> =
            ServiceResponse::error(500, "Internal server error | Error interno del servidor");
        return HttpResponse::InternalServerError().json(envelope);
    }

    let code = err.code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ServiceResponse<()> = ServiceResponse::error(code, err.to_string());
    HttpResponse::build(status).json(envelope)
}

/// Render DTO validation failures as a 400 envelope listing each bad field
/// with its reasons
pub fn respond_validation(errors: ValidationErrors) -> HttpResponse {
    let detail = validation_summary(&errors);
    let envelope: ServiceResponse<()> = ServiceResponse::error(
        400,
        format!("Invalid request fields: {detail} | Campos inválidos: {detail}"),
    );
    HttpResponse::BadRequest().json(envelope)
}

/// Collapse validator output into `field: reason, reason; field: reason`,
/// sorted by field name so the message is stable
fn validation_summary(errors: &ValidationErrors) -> String {
    let mut issues = ValidationIssues::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let reason = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            issues.add(field, reason);
        }
    }

    let mut parts: Vec<String> = issues
        .to_field_errors()
        .into_iter()
        .map(|(field, reasons)| format!("{field}: {}", reasons.join(", ")))
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::errors::{AccountError, AuthError};

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = respond(AccountError::AccountNotFound.into());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_suspended_maps_to_403() {
        let resp = respond(AuthError::AccountSuspended.into());
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_is_masked() {
        let resp = respond(DomainError::Internal {
            message: "select account: connection refused".to_string(),
        });
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_summary_groups_reasons_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", validator::ValidationError::new("email"));
        let mut too_short = validator::ValidationError::new("length");
        too_short.message = Some("too short".into());
        errors.add("username", too_short);
        let mut too_plain = validator::ValidationError::new("length");
        too_plain.message = Some("too plain".into());
        errors.add("username", too_plain);

        let summary = validation_summary(&errors);
        assert_eq!(summary, "email: email; username: too short, too plain");

        let resp = respond_validation(errors);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

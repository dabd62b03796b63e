//! services/api/src/web/auth.rs
//!
//! The login/verification flow: request a code for an email, then trade
//! the code for a session token. Per-email state machine:
//! NoCodeIssued -> CodeIssued -> Verified.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{error, info};

use crate::web::dto::{
    fail, ApiFailure, MessageResponse, SendOtpRequest, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::web::state::AppState;
use productr_core::domain::Account;
use productr_core::ports::StoreError;

/// Request a verification code for an email.
///
/// Always answers success without revealing whether the account exists.
#[utoipa::path(
    post,
    path = "/api/auth/send-otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued", body = MessageResponse),
        (status = 400, description = "Missing email", body = crate::web::dto::ErrorBody)
    ),
    tag = "auth"
)]
pub async fn send_otp_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    let email = match req.email.as_deref() {
        Some(e) if !e.trim().is_empty() => e,
        _ => return Err(fail(StatusCode::BAD_REQUEST, "Email is required")),
    };

    let otp = state.otp.issue(email);
    // Mock delivery: the code is logged instead of mailed.
    info!("OTP for {}: {}", email, otp);

    Ok(Json(MessageResponse::new("OTP sent successfully")))
}

/// Verify a code and log in, creating the account on first sight.
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Login successful", body = VerifyOtpResponse),
        (status = 400, description = "Missing fields or invalid code", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure during login", body = crate::web::dto::ErrorBody)
    ),
    tag = "auth"
)]
pub async fn verify_otp_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiFailure> {
    let (email, otp) = match (req.email.as_deref(), req.otp.as_deref()) {
        (Some(e), Some(o)) if !e.trim().is_empty() && !o.trim().is_empty() => (e, o),
        _ => return Err(fail(StatusCode::BAD_REQUEST, "Email and OTP are required")),
    };

    if !state.otp.verify(email, otp) {
        return Err(fail(StatusCode::BAD_REQUEST, "Invalid OTP"));
    }

    let account = find_or_create_account(&state, email).await.map_err(|e| {
        error!("Login failed for {}: {}", email, e);
        fail(StatusCode::INTERNAL_SERVER_ERROR, "Server Error during login")
    })?;

    info!("Login successful for: {}", email);

    Ok(Json(VerifyOtpResponse {
        message: "Login successful".to_string(),
        token: format!("mock-jwt-token-{}", account.id),
        user: account.into(),
    }))
}

/// Find-or-create for the login flow. A brand-new email gets an account
/// whose display name defaults to the email's local part.
async fn find_or_create_account(state: &AppState, email: &str) -> Result<Account, StoreError> {
    if let Some(account) = state.store.find_account_by_email(email).await? {
        return Ok(account);
    }
    let full_name = email.split('@').next().unwrap_or(email);
    match state.store.create_account(email, full_name).await {
        Ok(account) => {
            info!("New user created: {}", email);
            Ok(account)
        }
        // Lost a create race; the winner's account is the one to use.
        Err(StoreError::EmailTaken(_)) => state
            .store
            .find_account_by_email(email)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Account for {} not found", email))),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::otp::MOCK_OTP;
    use crate::web::state::AppState;

    fn send(email: Option<&str>) -> SendOtpRequest {
        SendOtpRequest {
            email: email.map(String::from),
        }
    }

    fn verify(email: Option<&str>, otp: Option<&str>) -> VerifyOtpRequest {
        VerifyOtpRequest {
            email: email.map(String::from),
            otp: otp.map(String::from),
        }
    }

    #[tokio::test]
    async fn send_otp_requires_email() {
        let state = AppState::for_tests();
        let err = send_otp_handler(State(state), Json(send(None)))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.message, "Email is required");
    }

    #[tokio::test]
    async fn wrong_code_creates_no_account_and_no_token() {
        let state = AppState::for_tests();
        send_otp_handler(State(state.clone()), Json(send(Some("a@example.com"))))
            .await
            .unwrap();

        let err = verify_otp_handler(
            State(state.clone()),
            Json(verify(Some("a@example.com"), Some("000000"))),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.message, "Invalid OTP");

        let account = state
            .store
            .find_account_by_email("a@example.com")
            .await
            .unwrap();
        assert!(account.is_none());
    }

    #[tokio::test]
    async fn correct_code_creates_exactly_one_account() {
        let state = AppState::for_tests();
        let issued = state.otp.issue("casey@example.com");

        let response = verify_otp_handler(
            State(state.clone()),
            Json(verify(Some("casey@example.com"), Some(&issued))),
        )
        .await
        .unwrap();

        assert_eq!(response.0.message, "Login successful");
        assert_eq!(response.0.user.full_name, "casey");
        assert_eq!(
            response.0.token,
            format!("mock-jwt-token-{}", response.0.user.id)
        );

        // A second login finds the same account rather than creating another.
        let again = verify_otp_handler(
            State(state.clone()),
            Json(verify(Some("casey@example.com"), Some(MOCK_OTP))),
        )
        .await
        .unwrap();
        assert_eq!(again.0.user.id, response.0.user.id);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_together() {
        let state = AppState::for_tests();
        let err = verify_otp_handler(State(state), Json(verify(Some("a@example.com"), None)))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.message, "Email and OTP are required");
    }
}

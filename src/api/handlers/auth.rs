// src/api/handlers/auth.rs

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use crate::backend::BackendError;
use crate::core::vault::{Vault, VaultError};
use crate::api::types::{
    SignUpRequest, LoginRequest, TokenResponse, StatusResponse, SuccessResponse,
};
use crate::api::utils::extract_token;
use log::{info, warn, error};

/// Create a new account
///
/// Registers the account with the auth backend. The backend handles any
/// email verification flow itself.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = SuccessResponse),
        (status = 400, description = "Signup rejected", body = SuccessResponse),
        (status = 500, description = "Internal server error", body = SuccessResponse)
    )
)]
pub async fn sign_up(
    vault: web::Data<Arc<Vault>>,
    req: web::Json<SignUpRequest>,
) -> impl Responder {
    info!("Signup requested for {}", req.email);

    match vault.sign_up(&req.email, &req.password).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse {
            success: true,
            message: Some("Account created. Check your email for a verification link.".to_string()),
            error: None,
        }),
        Err(VaultError::BackendError(BackendError::AuthFailed(msg))) => {
            warn!("Signup rejected: {}", msg);
            HttpResponse::BadRequest().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(msg),
            })
        }
        Err(e) => {
            error!("Signup failed: {}", e);
            HttpResponse::InternalServerError().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(format!("Failed to sign up: {}", e)),
            })
        }
    }
}

/// Log in
///
/// Exchanges credentials for an access token via the auth backend.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in successfully", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = TokenResponse),
        (status = 500, description = "Internal server error", body = TokenResponse)
    )
)]
pub async fn login(
    vault: web::Data<Arc<Vault>>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    info!("Login attempt for {}", req.email);

    match vault.login(&req.email, &req.password).await {
        Ok(token) => {
            info!("Login successful for {}", req.email);
            HttpResponse::Ok().json(TokenResponse {
                success: true,
                token: Some(token),
                error: None,
            })
        }
        Err(VaultError::BackendError(BackendError::AuthFailed(msg))) => {
            warn!("Login rejected for {}: {}", req.email, msg);
            HttpResponse::Unauthorized().json(TokenResponse {
                success: false,
                token: None,
                error: Some(msg),
            })
        }
        Err(e) => {
            error!("Login failed: {}", e);
            HttpResponse::InternalServerError().json(TokenResponse {
                success: false,
                token: None,
                error: Some(format!("Failed to log in: {}", e)),
            })
        }
    }
}

/// Handle OPTIONS requests for the login endpoint
pub async fn login_options() -> impl Responder {
    HttpResponse::Ok()
        .append_header(("Access-Control-Allow-Origin", "*"))
        .append_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .append_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .finish()
}

/// Check if the current session is valid
///
/// Returns the authentication status of the presented token.
#[utoipa::path(
    get,
    path = "/auth/status",
    tag = "Authentication",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Authentication status", body = StatusResponse)
    )
)]
pub async fn check_status(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
) -> impl Responder {
    let authenticated = match extract_token(&req) {
        Ok(token) => vault.check_session(&token).is_ok(),
        Err(_) => false,
    };

    HttpResponse::Ok().json(StatusResponse {
        success: true,
        authenticated,
    })
}

/// Log out
///
/// Drops the local session and revokes the token on the auth backend.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Logged out successfully", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = SuccessResponse),
        (status = 500, description = "Internal server error", body = SuccessResponse)
    )
)]
pub async fn logout(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
) -> impl Responder {
    let token = match extract_token(&req) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::Unauthorized().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(format!("Authentication error: {}", e)),
            });
        }
    };

    match vault.logout(&token).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse {
            success: true,
            message: Some("Logged out successfully".to_string()),
            error: None,
        }),
        Err(e) => {
            // The local session is already gone; the backend revocation
            // is best-effort from the caller's point of view.
            error!("Backend logout failed: {}", e);
            HttpResponse::InternalServerError().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(format!("Failed to log out: {}", e)),
            })
        }
    }
}

// src/api/handlers/passwords.rs
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use crate::backend::BackendError;
use crate::core::vault::{Vault, VaultError};
use crate::api::types::{
    PasswordListResponse, SavedPasswordEntry, SavePasswordRequest,
    RevealPasswordResponse, SuccessResponse,
};
use crate::api::utils::extract_token;
use log::{info, error, debug};

pub async fn passwords_options() -> impl Responder {
    HttpResponse::Ok()
        .append_header(("Access-Control-Allow-Origin", "*"))
        .append_header(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .append_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .finish()
}

/// List saved passwords
///
/// Returns the saved entries for the authenticated user, newest first.
/// Secret material is never included; use the reveal endpoint for that.
#[utoipa::path(
    get,
    path = "/passwords",
    tag = "Passwords",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List saved passwords", body = PasswordListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_passwords(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
) -> impl Responder {
    debug!("list_passwords called");

    let token = match extract_token(&req) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::Unauthorized().json(PasswordListResponse {
                success: false,
                passwords: vec![],
                error: Some(format!("Authentication error: {}", e)),
            });
        }
    };

    match vault.list_passwords(&token).await {
        Ok(records) => {
            debug!("Retrieved {} saved passwords", records.len());
            let entries: Vec<SavedPasswordEntry> = records
                .into_iter()
                .map(|r| SavedPasswordEntry {
                    id: r.id.to_string(),
                    title: r.title,
                    created_at: r.created_at.to_rfc3339(),
                })
                .collect();

            HttpResponse::Ok().json(PasswordListResponse {
                success: true,
                passwords: entries,
                error: None,
            })
        }
        Err(VaultError::SessionError(e)) => {
            HttpResponse::Unauthorized().json(PasswordListResponse {
                success: false,
                passwords: vec![],
                error: Some(format!("Session error: {}", e)),
            })
        }
        Err(e) => {
            error!("Failed to list passwords: {}", e);
            HttpResponse::InternalServerError().json(PasswordListResponse {
                success: false,
                passwords: vec![],
                error: Some(format!("Failed to list passwords: {}", e)),
            })
        }
    }
}

/// Save a password
///
/// Encrypts the password under the session's account id and stores it on
/// the backend.
#[utoipa::path(
    post,
    path = "/passwords",
    tag = "Passwords",
    security(
        ("bearer_auth" = [])
    ),
    request_body = SavePasswordRequest,
    responses(
        (status = 201, description = "Password saved successfully", body = SuccessResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_password(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
    save_req: web::Json<SavePasswordRequest>,
) -> impl Responder {
    debug!("save_password called");

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

    // Validate input before touching the backend
    if save_req.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(SuccessResponse {
            success: false,
            message: None,
            error: Some("Title cannot be empty".to_string()),
        });
    }

    if save_req.password.is_empty() {
        return HttpResponse::BadRequest().json(SuccessResponse {
            success: false,
            message: None,
            error: Some("Password cannot be empty".to_string()),
        });
    }

    match vault.save_password(&token, &save_req.title, &save_req.password).await {
        Ok(record) => {
            info!("Password saved with ID: {}", record.id);
            HttpResponse::Created().json(SuccessResponse {
                success: true,
                message: Some(format!("Password saved with ID: {}", record.id)),
                error: None,
            })
        }
        Err(VaultError::SessionError(e)) => {
            HttpResponse::Unauthorized().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(format!("Session error: {}", e)),
            })
        }
        Err(VaultError::InvalidInput(msg)) => {
            HttpResponse::BadRequest().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(msg),
            })
        }
        Err(e) => {
            error!("Failed to save password: {}", e);
            HttpResponse::InternalServerError().json(SuccessResponse {
                success: false,
                message: None,
                error: Some(format!("Failed to save password: {}", e)),
            })
        }
    }
}

/// Reveal a saved password
///
/// Fetches the record and returns the decrypted password. This backs the
/// UI's copy-to-clipboard action.
#[utoipa::path(
    get,
    path = "/passwords/{id}",
    tag = "Passwords",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = String, Path, description = "Password record UUID")
    ),
    responses(
        (status = 200, description = "Decrypted password", body = RevealPasswordResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Password not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn reveal_password(
    vault: web::Data<Arc<Vault>>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    debug!("reveal_password called");

    let token = match extract_token(&req) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::Unauthorized().json(RevealPasswordResponse {
                success: false,
                password: None,
                error: Some(format!("Authentication error: {}", e)),
            });
        }
    };

    // Parse UUID
    let id = match Uuid::parse_str(&path) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(RevealPasswordResponse {
                success: false,
                password: None,
                error: Some("Invalid UUID format".to_string()),
            });
        }
    };

    match vault.reveal_password(&token, id).await {
        Ok(password) => HttpResponse::Ok().json(RevealPasswordResponse {
            success: true,
            password: Some(password),
            error: None,
        }),
        Err(VaultError::SessionError(e)) => {
            HttpResponse::Unauthorized().json(RevealPasswordResponse {
                success: false,
                password: None,
                error: Some(format!("Session error: {}", e)),
            })
        }
        Err(VaultError::BackendError(BackendError::NotFound)) => {
            HttpResponse::NotFound().json(RevealPasswordResponse {
                success: false,
                password: None,
                error: Some(format!("Password with ID {} not found", id)),
            })
        }
        Err(e) => {
            error!("Failed to reveal password: {}", e);
            HttpResponse::InternalServerError().json(RevealPasswordResponse {
                success: false,
                password: None,
                error: Some(format!("Failed to reveal password: {}", e)),
            })
        }
    }
}

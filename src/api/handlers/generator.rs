// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::api::types::{PasswordGenerationRequest, PasswordGenerationResponse};
use log::error;

const MAX_PASSWORD_LENGTH: usize = 128;

/// Generate a random password
///
/// Generates a password from the requested character classes. Unset
/// options fall back to the application defaults.
#[utoipa::path(
    post,
    path = "/generator/password",
    tag = "Generator",
    security(
        ("bearer_auth" = [])
    ),
    request_body = PasswordGenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = PasswordGenerationResponse),
        (status = 400, description = "Invalid generation policy", body = PasswordGenerationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Server error", body = PasswordGenerationResponse)
    )
)]
pub async fn generate_password(
    vault: web::Data<Arc<Vault>>,
    config: web::Data<Config>,
    generation_req: web::Json<PasswordGenerationRequest>,
) -> impl Responder {
    let policy = generation_req
        .into_inner()
        .into_policy(config.default_password_length);

    // Validate options
    if policy.length < 1 {
        return HttpResponse::BadRequest().json(PasswordGenerationResponse {
            success: false,
            password: None,
            error: Some("Password length must be at least 1 character".to_string()),
        });
    }

    if policy.length > MAX_PASSWORD_LENGTH {
        return HttpResponse::BadRequest().json(PasswordGenerationResponse {
            success: false,
            password: None,
            error: Some(format!(
                "Password length must be at most {} characters",
                MAX_PASSWORD_LENGTH
            )),
        });
    }

    if policy.is_empty_alphabet() {
        return HttpResponse::BadRequest().json(PasswordGenerationResponse {
            success: false,
            password: None,
            error: Some("At least one character type must be included".to_string()),
        });
    }

    match vault.generate(&policy) {
        Ok(password) => HttpResponse::Ok().json(PasswordGenerationResponse {
            success: true,
            password: Some(password),
            error: None,
        }),
        Err(e) => {
            error!("Failed to generate password: {}", e);
            HttpResponse::InternalServerError().json(PasswordGenerationResponse {
                success: false,
                password: None,
                error: Some(format!("Failed to generate password: {}", e)),
            })
        }
    }
}

// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::sync::Arc;
use crate::core::config::Config;
use crate::core::vault::Vault;
use utoipa::{OpenApi, Modify};
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

// Registers the bearer security scheme referenced by the handlers
#[derive(Default)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Authentication endpoints
        crate::api::handlers::auth::sign_up,
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::check_status,
        crate::api::handlers::auth::logout,

        // Password storage endpoints
        crate::api::handlers::passwords::list_passwords,
        crate::api::handlers::passwords::save_password,
        crate::api::handlers::passwords::reveal_password,

        // Generator endpoints
        crate::api::handlers::generator::generate_password,
    ),
    components(
        schemas(
            // Request/response schemas
            crate::api::types::SignUpRequest,
            crate::api::types::LoginRequest,
            crate::api::types::TokenResponse,
            crate::api::types::StatusResponse,
            crate::api::types::SuccessResponse,

            // Password storage
            crate::api::types::SavePasswordRequest,
            crate::api::types::SavedPasswordEntry,
            crate::api::types::PasswordListResponse,
            crate::api::types::RevealPasswordResponse,

            // Generator
            crate::api::types::PasswordGenerationRequest,
            crate::api::types::PasswordGenerationResponse,

            // Models
            crate::models::GenerationPolicy,
            crate::models::PasswordRecord,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account and session endpoints"),
        (name = "Passwords", description = "Encrypted password storage endpoints"),
        (name = "Generator", description = "Password generation endpoints")
    ),
    info(
        title = "Passforge API",
        version = "0.1.0",
        description = "Password generator with encrypted remote storage",
        license(name = "MIT")
    )
)]
struct ApiDoc;

pub async fn start_server(vault: Arc<Vault>, config: Config) -> std::io::Result<()> {
    let address = config.web_address.clone();
    let port = config.web_port;
    log::info!("Starting Passforge API server on {}:{}", address, port);

    let vault_data = web::Data::new(vault);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        // Configure CORS for the browser UI
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                "Authorization",
                "Content-Type",
                "Accept",
                "X-Requested-With",
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(vault_data.clone())
            .app_data(config_data.clone())
            // Add Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            // Add Redoc
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            // Configure the regular API routes
            .configure(routes::configure_routes)
    })
    .bind((address, port))?
    .run()
    .await
}

pub mod types;
pub mod routes;
pub mod handlers;
pub mod middleware;
pub mod utils;

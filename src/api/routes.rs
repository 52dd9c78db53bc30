// src/api/routes.rs
use actix_web::guard;
use super::handlers;
use actix_web::web;
use super::middleware::auth::TokenValidator;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Authentication routes
    cfg.service(
        web::scope("/auth")
            // POST: Create account
            .route("/signup", web::post().to(handlers::auth::sign_up))

            // POST: Log in
            .route("/login", web::post().to(handlers::auth::login))
            // OPTIONS: Log in (for CORS preflight)
            .route("/login", web::route()
                .guard(guard::Options())
                .to(handlers::auth::login_options))

            // GET: Check session status
            .route("/status", web::get().to(handlers::auth::check_status))

            // POST: Log out
            .route("/logout", web::post().to(handlers::auth::logout))
    );

    // Password storage routes (protected by token auth)
    cfg.service(
        web::scope("/passwords")
            .wrap(TokenValidator)
            .route("", web::get().to(handlers::passwords::list_passwords))
            .route("", web::post().to(handlers::passwords::save_password))
            .route("", web::route()
                .guard(guard::Options())
                .to(handlers::passwords::passwords_options))
            .route("/{id}", web::get().to(handlers::passwords::reveal_password))
    );

    // Password generator (protected by token auth)
    cfg.service(
        web::scope("/generator")
            .wrap(TokenValidator)
            .route("/password", web::post().to(handlers::generator::generate_password))
    );
}

// src/api/middleware/auth.rs

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;
use crate::core::vault::Vault;
use log::{debug, warn};

// The TokenValidator struct that will be used to transform services
pub struct TokenValidator;

impl<S, B> Transform<S, ServiceRequest> for TokenValidator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenValidatorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenValidatorMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TokenValidatorMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenValidatorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // Handle OPTIONS requests immediately (for CORS preflight)
        if req.method() == actix_web::http::Method::OPTIONS {
            let fut = service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res)
            });
        }

        // Process normal requests
        Box::pin(async move {
            // Extract token from authorization header
            let auth_header = req.headers().get("Authorization");

            let token = match auth_header {
                Some(header) => {
                    match header.to_str() {
                        Ok(header_str) => {
                            if header_str.starts_with("Bearer ") {
                                header_str[7..].to_string()
                            } else {
                                warn!("Invalid authorization header format");
                                return Err(actix_web::error::ErrorUnauthorized("Invalid authorization header format"));
                            }
                        },
                        Err(_) => {
                            warn!("Could not convert authorization header to string");
                            return Err(actix_web::error::ErrorUnauthorized("Invalid authorization header"));
                        }
                    }
                }
                None => {
                    warn!("Missing authorization header");
                    return Err(actix_web::error::ErrorUnauthorized("Missing authorization header"));
                }
            };

            // Resolve the shared vault and check the session
            let vault = match req.app_data::<web::Data<Arc<Vault>>>() {
                Some(vault) => vault.clone(),
                None => {
                    warn!("Vault not available in app data");
                    return Err(actix_web::error::ErrorInternalServerError("Service unavailable"));
                }
            };

            match vault.check_session(&token) {
                Ok(session) => {
                    debug!("Token validated for user {}", session.user_id);

                    // Store the token in request extensions for handlers
                    req.extensions_mut().insert(token);

                    let fut = service.call(req);
                    let res = fut.await?;
                    Ok(res)
                }
                Err(e) => {
                    warn!("Token validation failed: {}", e);
                    Err(actix_web::error::ErrorUnauthorized(format!("Invalid or expired token: {}", e)))
                }
            }
        })
    }
}

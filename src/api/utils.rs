// src/api/utils.rs
use actix_web::HttpRequest;
use actix_web::error::ErrorUnauthorized;
use log::warn;

/// Extract the bearer token from an HTTP request.
///
/// Session validation happens in the vault; this only peels the token
/// out of the Authorization header.
pub fn extract_token(req: &HttpRequest) -> Result<String, actix_web::Error> {
    let auth_header = req.headers().get("Authorization")
        .ok_or_else(|| {
            warn!("Missing authorization header");
            ErrorUnauthorized("Missing authorization header")
        })?;

    let header_str = auth_header.to_str()
        .map_err(|e| {
            warn!("Invalid authorization header: {}", e);
            ErrorUnauthorized("Invalid authorization header")
        })?;

    if !header_str.starts_with("Bearer ") {
        warn!("Invalid authorization header format");
        return Err(ErrorUnauthorized("Invalid authorization header format"));
    }

    Ok(header_str[7..].to_string())
}

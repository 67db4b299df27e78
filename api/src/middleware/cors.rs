//! CORS middleware configuration
//!
//! Environment-aware CORS: permissive in development so the React SPA dev
//! server can hit the API from localhost, restricted to the configured
//! origins in production.
//!
//! # Environment Variables
//! - `ENVIRONMENT`: "production" enables the restricted configuration
//! - `ALLOWED_ORIGINS`: comma-separated origin list (production only)
//! - `CORS_MAX_AGE`: preflight cache in seconds (default 3600)

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Create the CORS middleware for the current environment
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600usize);

    if environment == "production" {
        production_cors(max_age)
    } else {
        development_cors(max_age)
    }
}

fn development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-app-version"),
        ])
        .max_age(max_age)
}

fn production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(max_age);

    for origin in allowed_origins.split(',').filter(|o| !o.trim().is_empty()) {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}

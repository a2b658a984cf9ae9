//! API constants

/// Prefix for the snapshot endpoints.
pub const API_PREFIX: &str = "/api/s4";

/// Path of the served OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

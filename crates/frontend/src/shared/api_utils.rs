//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Backend port used when no `API_URL` was given at build time
pub const BACKEND_PORT: u16 = 8080;

/// Get the base URL for API requests
///
/// Uses the `API_URL` environment variable captured at compile time when set,
/// otherwise constructs it from the current window location with port 8080.
///
/// # Returns
/// - API base URL like "http://localhost:8080" (no trailing slash)
/// - Empty string if window is not available
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/api/employees/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(configured) = option_env!("API_URL") {
        return normalize_base(configured);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Absolute URL for a server-relative path; absolute URLs are returned as is
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode a single path segment (employee ids may contain spaces)
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

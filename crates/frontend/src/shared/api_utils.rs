//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use contracts::domain::common::{AggregateId, AggregateRoot};

/// Get the base URL for API requests
///
/// The backend serves both the page and the API, so requests go to
/// the origin the page was loaded from.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available (relative URLs are used)
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/doctor/1");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL коллекции агрегата, например `/api/doctor`
pub fn collection_url<E: AggregateRoot>() -> String {
    api_url(&format!("/api/{}", E::collection_name()))
}

/// URL одной записи агрегата, например `/api/doctor/1`
pub fn element_url<E: AggregateRoot>(id: &E::Id) -> String {
    format!("{}/{}", collection_url::<E>(), id.as_string())
}

//! Static vendor endpoint table.
//!
//! The reporting pipeline talks to a fixed set of vendor APIs; their
//! base URLs are compile-time constants here and get exported to
//! `app-config.json` for the Python side. Adding a vendor means adding
//! a row.

use std::collections::BTreeMap;

/// Endpoint name → base URL pairs.
pub const API_URLS: &[(&str, &str)] = &[
    ("catapult_base", "https://api.catapultsports.com"),
    ("filmroom_api", "https://api.filmroom.us"),
    ("vald_auth", "https://security.valdperformance.com/connect/token"),
    ("vald_forcedecks", "https://api.valdperformance.com/forcedecks"),
    ("vald_nordbord", "https://api.valdperformance.com/nordbord"),
];

/// Look up a single endpoint URL by name.
pub fn url(name: &str) -> Option<&'static str> {
    API_URLS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, url)| *url)
}

/// The full table as a sorted map, ready for serialization.
pub fn as_map() -> BTreeMap<&'static str, &'static str> {
    API_URLS.iter().copied().collect()
}

//! Shared test fixtures.

use crate::models::profile::ProfileDocument;

const SAMPLE_PROFILE_JSON: &str = include_str!("../../data/profile.json");

/// The bundled sample profile, parsed fresh for each test.
pub fn sample_profile() -> ProfileDocument {
    serde_json::from_str(SAMPLE_PROFILE_JSON).expect("bundled profile.json must parse")
}

//! Documents compiled into the binary by the build script.

use folio_store::Project;

include!(concat!(env!("OUT_DIR"), "/generated_assets.rs"));

pub fn about_markdown() -> &'static str {
    EMBEDDED_ABOUT.content
}

/// Local date the About document was last edited, if the build recorded it.
pub fn about_updated() -> Option<String> {
    chrono::DateTime::parse_from_rfc3339(EMBEDDED_ABOUT.modified_rfc3339)
        .ok()
        .map(|dt| dt.format("%B %-d, %Y").to_string())
}

/// Projects written to a fresh data directory.
pub fn seed_projects() -> Vec<Project> {
    serde_json::from_str(EMBEDDED_PROJECTS_JSON).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "bundled project list is malformed; seeding nothing");
        Vec::new()
    })
}

//! Service implementations for the MultiViz API.
//!
//! Each service maps its methods one-to-one onto a single HTTP request.

mod measurements;
mod sources;

pub use measurements::MeasurementsService;
pub use sources::SourcesService;

/// Path of the sources collection.
pub(crate) const SOURCES_PATH: &str = "/sources/";

pub(crate) fn source_path(source_id: &str) -> String {
    format!("/sources/{}", source_id)
}

pub(crate) fn measurements_path(source_id: &str) -> String {
    format!("/sources/{}/measurements", source_id)
}

pub(crate) fn measurement_path(source_id: &str, timestamp: i64) -> String {
    format!("/sources/{}/measurements/{}", source_id, timestamp)
}

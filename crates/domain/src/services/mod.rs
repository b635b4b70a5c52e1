pub mod enrichment;
pub mod project_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use enrichment::{EnrichmentPolicy, ProjectEnricher};
pub use project_service::ProjectService;

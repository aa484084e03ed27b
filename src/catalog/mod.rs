pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CatalogError, CatalogProvider, SearchRequest};
pub use providers::GoogleBooksProvider;
pub use types::{ImageLinks, Volume, VolumeInfo, VolumesResponse};

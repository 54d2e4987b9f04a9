pub mod catalog;
pub mod charts;
pub mod cleaner;
pub mod collector;
pub mod config;
pub mod error;
pub mod flatten;
pub mod model;
pub mod outputs;
pub mod pipeline;
pub mod visualize;

pub use catalog::{CatalogSource, HttpCatalog};
pub use collector::{collect, CollectRequest, Collection, FetchFailure};
pub use config::CatalogConfig;
pub use error::{PipelineError, RemoteError, Result};
pub use model::{ObjectId, ObjectRecord, Row};
pub use pipeline::{run_pipeline, PipelineOptions, PipelineReport};

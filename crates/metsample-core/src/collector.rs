use futures::stream::{self, StreamExt};
use polars::prelude::{DataFrame, PolarsError};
use tracing::{info, warn};

use crate::catalog::CatalogSource;
use crate::error::{PipelineError, RemoteError};
use crate::flatten::rows_to_dataframe;
use crate::model::{ObjectId, Row};

pub const DEFAULT_SAMPLE_SIZE: usize = 200;
pub const DEFAULT_QUERY: &str = "vase";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    pub query: String,
    pub sample_size: usize,
    pub has_images: bool,
    /// Maximum object fetches in flight. `0` and `1` both mean sequential.
    pub concurrency: usize,
}

impl Default for CollectRequest {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            has_images: true,
            concurrency: 1,
        }
    }
}

impl CollectRequest {
    pub fn new(query: impl Into<String>, sample_size: usize) -> Self {
        Self {
            query: query.into(),
            sample_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub object_id: ObjectId,
    pub error: String,
}

/// Outcome of a collection run: rows and failures, both in lookup order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Number of ids the search returned before truncation.
    pub ids_found: usize,
    pub rows: Vec<Row>,
    pub failures: Vec<FetchFailure>,
}

impl Collection {
    pub fn attempted(&self) -> usize {
        self.rows.len() + self.failures.len()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        rows_to_dataframe(&self.rows)
    }
}

/// Searches once, then fetches up to `sample_size` objects.
///
/// Per-object failures are logged and recorded in [`Collection::failures`]; only a
/// failed search is returned as an error.
pub async fn collect<S>(source: &S, request: &CollectRequest) -> Result<Collection, PipelineError>
where
    S: CatalogSource + ?Sized,
{
    if request.query.trim().is_empty() {
        return Err(PipelineError::Config("search query cannot be empty".into()));
    }

    let ids = source
        .search_ids(&request.query, request.has_images)
        .await?;
    let ids_found = ids.len();
    let selected: Vec<ObjectId> = ids.into_iter().take(request.sample_size).collect();

    info!(
        query = %request.query,
        ids_found,
        selected = selected.len(),
        "catalog search complete"
    );

    let concurrency = request.concurrency.max(1);
    let outcomes: Vec<(ObjectId, Result<Row, RemoteError>)> = stream::iter(selected)
        .map(|id| async move {
            let outcome = source
                .fetch_object(id)
                .await
                .map(|record| Row::from_record(id, record));
            if let Err(err) = &outcome {
                warn!(object_id = %id, error = %err, "skipping object");
            }
            (id, outcome)
        })
        .buffered(concurrency)
        .collect()
        .await;

    let mut collection = Collection {
        ids_found,
        ..Collection::default()
    };

    for (object_id, outcome) in outcomes {
        match outcome {
            Ok(row) => collection.rows.push(row),
            Err(err) => collection.failures.push(FetchFailure {
                object_id,
                error: err.to_string(),
            }),
        }
    }

    info!(
        rows = collection.rows.len(),
        failures = collection.failures.len(),
        "collection complete"
    );

    Ok(collection)
}

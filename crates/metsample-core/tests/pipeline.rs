use std::fs;

use async_trait::async_trait;
use csv::ReaderBuilder;
use metsample_core::{
    model::{ROW_COLUMNS, YEAR_COLUMN},
    run_pipeline, visualize, CatalogSource, CollectRequest, ObjectId, ObjectRecord,
    PipelineOptions, RemoteError,
};

struct StaticCatalog {
    ids: Vec<u64>,
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn search_ids(
        &self,
        _query: &str,
        _has_images: bool,
    ) -> Result<Vec<ObjectId>, RemoteError> {
        Ok(self.ids.iter().copied().map(ObjectId).collect())
    }

    async fn fetch_object(&self, id: ObjectId) -> Result<ObjectRecord, RemoteError> {
        let record = match id.get() {
            1 => ObjectRecord {
                title: Some("Amphora".into()),
                period: Some("  ca. 1850 ".into()),
                medium: Some("Terracotta".into()),
                classification: Some("Vases".into()),
                is_public_domain: Some(true),
                ..ObjectRecord::default()
            },
            2 => {
                return Err(RemoteError::Status {
                    url: "fake://objects/2".into(),
                    status: 500,
                })
            }
            3 => ObjectRecord {
                title: Some("Bowl, with \"lotus\" motif".into()),
                period: None,
                object_date: Some("Tang dynasty (618-907)".into()),
                is_public_domain: Some(false),
                ..ObjectRecord::default()
            },
            _ => ObjectRecord {
                period: Some("Unknown".into()),
                ..ObjectRecord::default()
            },
        };
        Ok(record)
    }
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .expect("open csv");
    let headers = reader
        .headers()
        .expect("csv headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("csv record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn pipeline_writes_clean_csv_and_charts() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        request: CollectRequest::new("vase", 4),
        csv_path: dir.path().join("nested/met_sample.csv"),
        charts_dir: Some(dir.path().join("charts")),
    };

    let catalog = StaticCatalog {
        ids: vec![1, 2, 3, 4, 5],
    };
    let report = run_pipeline(&catalog, &options).await.unwrap();

    assert_eq!(report.ids_found, 5);
    assert_eq!(report.rows(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.rows_with_year(), 2);

    let (headers, rows) = read_csv(&options.csv_path);
    let mut expected_headers: Vec<&str> = ROW_COLUMNS.to_vec();
    expected_headers.extend(["period_clean", YEAR_COLUMN]);
    assert_eq!(headers, expected_headers);
    assert_eq!(rows.len(), 3);

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let (id, title, period, clean, year, public_domain) = (
        column("objectID"),
        column("title"),
        column("period"),
        column("period_clean"),
        column("year"),
        column("isPublicDomain"),
    );

    assert_eq!(rows[0][id], "1");
    assert_eq!(rows[0][period], "  ca. 1850 ");
    assert_eq!(rows[0][clean], "ca. 1850");
    assert_eq!(rows[0][year], "1850");
    assert_eq!(rows[0][public_domain], "true");

    assert_eq!(rows[1][id], "3");
    assert_eq!(rows[1][title], "Bowl, with \"lotus\" motif");
    assert_eq!(rows[1][period], "Tang dynasty (618-907)");
    assert_eq!(rows[1][year], "618");
    assert_eq!(rows[1][public_domain], "false");

    assert_eq!(rows[2][id], "4");
    assert_eq!(rows[2][clean], "Unknown");
    assert_eq!(rows[2][year], "");
    assert_eq!(rows[2][public_domain], "");

    let names: Vec<String> = report
        .charts
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            visualize::TOP_CLASSIFICATIONS_FILE,
            visualize::MEDIUM_LENGTH_FILE,
            visualize::YEARS_FILE,
            visualize::HEATMAP_FILE,
        ]
    );
    for chart in &report.charts {
        let svg = fs::read_to_string(chart).unwrap();
        assert!(svg.contains("<svg"), "{} is not an svg", chart.display());
    }
}

#[tokio::test]
async fn empty_search_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        request: CollectRequest::new("vase", 10),
        csv_path: dir.path().join("empty.csv"),
        charts_dir: Some(dir.path().join("charts")),
    };

    let report = run_pipeline(&StaticCatalog { ids: Vec::new() }, &options)
        .await
        .unwrap();

    assert_eq!(report.rows(), 0);
    let (headers, rows) = read_csv(&options.csv_path);
    assert_eq!(headers.len(), ROW_COLUMNS.len() + 2);
    assert!(rows.is_empty());

    // No years, so no year histogram.
    assert_eq!(report.charts.len(), 3);
    assert!(!dir.path().join("charts").join(visualize::YEARS_FILE).exists());
}

#[tokio::test]
async fn skipped_charts_still_write_csv() {
    let dir = tempfile::tempdir().unwrap();
    let options = PipelineOptions {
        request: CollectRequest::new("vase", 1),
        csv_path: dir.path().join("one.csv"),
        charts_dir: None,
    };

    let report = run_pipeline(&StaticCatalog { ids: vec![1] }, &options)
        .await
        .unwrap();

    assert_eq!(report.rows(), 1);
    assert!(report.charts.is_empty());
    assert!(options.csv_path.exists());
}

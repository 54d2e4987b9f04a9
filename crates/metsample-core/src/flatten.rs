use polars::prelude::{Column, DataFrame, NamedFrom, PolarsError, Series};

use crate::model::{Row, ROW_COLUMNS};

fn text_column(name: &str, rows: &[Row], field: impl Fn(&Row) -> Option<&str>) -> Column {
    let values: Vec<Option<&str>> = rows.iter().map(field).collect();
    Series::new(name.into(), values).into()
}

/// Converts collected rows into the dataset frame, one row per fetched object in
/// collection order. An empty slice still yields every column.
pub fn rows_to_dataframe(rows: &[Row]) -> Result<DataFrame, PolarsError> {
    let object_ids: Vec<u64> = rows.iter().map(|row| row.object_id.get()).collect();
    let public_domain: Vec<Option<bool>> = rows.iter().map(|row| row.is_public_domain).collect();

    let columns: Vec<Column> = vec![
        Series::new(ROW_COLUMNS[0].into(), object_ids).into(),
        text_column(ROW_COLUMNS[1], rows, |row| row.title.as_deref()),
        text_column(ROW_COLUMNS[2], rows, |row| row.artist_display_name.as_deref()),
        text_column(ROW_COLUMNS[3], rows, |row| row.culture.as_deref()),
        text_column(ROW_COLUMNS[4], rows, |row| row.period.as_deref()),
        text_column(ROW_COLUMNS[5], rows, |row| row.medium.as_deref()),
        text_column(ROW_COLUMNS[6], rows, |row| row.dimensions.as_deref()),
        text_column(ROW_COLUMNS[7], rows, |row| row.classification.as_deref()),
        text_column(ROW_COLUMNS[8], rows, |row| row.primary_image.as_deref()),
        Series::new(ROW_COLUMNS[9].into(), public_domain).into(),
        text_column(ROW_COLUMNS[10], rows, |row| row.object_url.as_deref()),
    ];

    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use polars::prelude::DataType;

    use super::*;
    use crate::model::ObjectId;

    fn row(id: u64, title: Option<&str>, public_domain: Option<bool>) -> Row {
        Row {
            object_id: ObjectId(id),
            title: title.map(str::to_string),
            artist_display_name: None,
            culture: Some("Greek".into()),
            period: Some("Classical".into()),
            medium: None,
            dimensions: None,
            classification: Some("Vases".into()),
            primary_image: Some(String::new()),
            is_public_domain: public_domain,
            object_url: None,
        }
    }

    #[test]
    fn builds_fixed_schema_in_row_order() {
        let rows = vec![row(3, Some("Krater"), Some(true)), row(1, None, None)];
        let df = rows_to_dataframe(&rows).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), ROW_COLUMNS);
        assert_eq!(df.column("objectID").unwrap().dtype(), &DataType::UInt64);
        assert_eq!(df.column("isPublicDomain").unwrap().dtype(), &DataType::Boolean);

        let ids = df.column("objectID").unwrap().u64().unwrap();
        assert_eq!(ids.get(0), Some(3));
        assert_eq!(ids.get(1), Some(1));

        let titles = df.column("title").unwrap().str().unwrap();
        assert_eq!(titles.get(0), Some("Krater"));
        assert_eq!(titles.get(1), None);

        let images = df.column("primaryImage").unwrap().str().unwrap();
        assert_eq!(images.get(0), Some(""));

        let flags = df.column("isPublicDomain").unwrap().bool().unwrap();
        assert_eq!(flags.get(0), Some(true));
        assert_eq!(flags.get(1), None);
    }

    #[test]
    fn empty_rows_keep_columns() {
        let df = rows_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.get_column_names(), ROW_COLUMNS);
        assert_eq!(df.column("period").unwrap().dtype(), &DataType::String);
    }
}

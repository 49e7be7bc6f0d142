use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::*;

use crate::client::TimeseriesTable;

/// Converts a timeseries selection into a [`DataFrame`], keeping the
/// service's column order.
pub fn load_from_table(table: &TimeseriesTable) -> anyhow::Result<DataFrame> {
    if table.data.is_empty() {
        // No rows matched the filters. Keep the service's columns so the
        // exported file still carries a header.
        let columns = table
            .columns
            .iter()
            .map(|name| Column::new_empty(name.as_str().into(), &DataType::String))
            .collect::<Vec<_>>();
        return Ok(DataFrame::new(columns)?);
    }

    // Convert to the polars format, an array of objects with each field named per object
    let mut content: Vec<serde_json::Value> = Vec::with_capacity(table.data.len());

    for row in &table.data {
        let mut obj = serde_json::Map::<String, serde_json::Value>::new();
        for (column, value) in table.columns.iter().zip(row.iter()) {
            obj.insert(column.clone(), value.clone());
        }
        content.push(serde_json::Value::Object(obj));
    }

    let mut f = tempfile::tempfile()?;
    f.write_all(serde_json::to_string(&content)?.as_bytes())?;

    // The JSON reader sorts fields during schema inference; restore the
    // column order the service responded with.
    let frame = JsonReader::new(f).finish()?;
    Ok(frame.select(table.columns.iter().map(String::as_str))?)
}

/// Writes the frame to `path` as CSV with a header row, replacing any
/// existing file.
pub fn write_csv(frame: &mut DataFrame, path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(frame)?;
    Ok(())
}

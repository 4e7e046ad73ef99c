use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the raw source from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one record per line (the WHO export)
/// * `.json`    – `[{ "Location": "Japan", "Period": 2015, ... }, ...]`
/// * `.parquet` – one column per source field
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "Read {} raw rows with {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader.  Fields are kept as text; empty ones are null.
pub fn read_csv<R: Read>(source: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut table = RawTable::new(headers);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push_row(record.iter().map(Cell::from_field).collect());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Records-oriented JSON (`df.to_json(orient='records')`).  The column set
/// is the union of keys, in the order records first introduce them.
pub fn parse_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = RawTable::new(columns);
    for rec in records {
        let row = match rec.as_object() {
            Some(obj) => table
                .columns()
                .iter()
                .map(|c| obj.get(c).map(json_to_cell).unwrap_or(Cell::Null))
                .collect(),
            None => Vec::new(),
        };
        table.push_row(row);
    }
    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Every column becomes a raw column; nested types are kept as their debug
/// rendering since the pipeline never reads them.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut table = RawTable::new(columns);
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect();
            table.push_row(cells);
        }
    }
    Ok(table)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map_or(Cell::Null, |s| Cell::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map_or(Cell::Null, |s| Cell::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map_or(Cell::Null, |a| Cell::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map_or(Cell::Null, |a| Cell::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map_or(Cell::Null, |a| Cell::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map_or(Cell::Null, |a| Cell::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map_or(Cell::Null, |a| Cell::Bool(a.value(row))),
        other => Cell::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_keeps_fields_as_text() {
        let data = "\u{feff}Location,Period,Dim1ValueCode,FactValueNumeric,FactComments\n\
                    Japan,2015,SEX_BTSX,45000.4,\n\
                    \"Korea, Republic of\",2016,SEX_MLE,12,note\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns()[0], "Location");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], Cell::String("2015".into()));
        assert_eq!(table.rows()[0][1].as_i64(), Some(2015));
        assert_eq!(table.rows()[0][3].as_f64(), Some(45000.4));
        assert_eq!(table.rows()[0][4], Cell::Null);
        assert_eq!(table.rows()[1][0], Cell::String("Korea, Republic of".into()));
    }

    #[test]
    fn test_read_csv_does_not_reformat_codes() {
        let table = read_csv("code,label\n007,1.50\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0][0].to_text(), "007");
        assert_eq!(table.rows()[0][1].to_text(), "1.50");
    }

    #[test]
    fn test_read_csv_pads_short_rows() {
        let table = read_csv("a,b,c\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(table.rows()[0][2], Cell::Null);
    }

    #[test]
    fn test_parse_json_unions_keys() {
        let text = r#"[
            {"Location": "Japan", "Period": 2015},
            {"Location": "Chad", "FactValueNumeric": 1.5, "Extra": null}
        ]"#;
        let table = parse_json(text).unwrap();
        assert_eq!(
            table.columns(),
            ["Location", "Period", "Extra", "FactValueNumeric"]
        );
        assert_eq!(table.rows()[0][3], Cell::Null);
        assert_eq!(table.rows()[1][3], Cell::Float(1.5));
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_json(r#"{"Location": "Japan"}"#).is_err());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains(".xlsx"));
    }

    #[test]
    fn test_load_parquet_maps_arrow_types() {
        use arrow::array::{
            BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
            StringArray, TimestampSecondArray,
        };
        use arrow::datatypes::{Field, Schema, TimeUnit};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Location", DataType::Utf8, true),
            Field::new("Dim2", DataType::LargeUtf8, false),
            Field::new("Period", DataType::Int32, false),
            Field::new("Count", DataType::Int64, false),
            Field::new("Low", DataType::Float32, false),
            Field::new("FactValueNumeric", DataType::Float64, true),
            Field::new("IsLatestYear", DataType::Boolean, false),
            Field::new(
                "DateModified",
                DataType::Timestamp(TimeUnit::Second, None),
                false,
            ),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Japan"), None])),
                Arc::new(LargeStringArray::from(vec!["Stroke", "ALL CAUSES"])),
                Arc::new(Int32Array::from(vec![2015, 2019])),
                Arc::new(Int64Array::from(vec![7, 8])),
                Arc::new(Float32Array::from(vec![0.5, 1.5])),
                Arc::new(Float64Array::from(vec![Some(45000.4), None])),
                Arc::new(BooleanArray::from(vec![false, true])),
                Arc::new(TimestampSecondArray::from(vec![0, 60])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deaths.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns()[0], "Location");
        assert_eq!(table.columns().len(), 8);
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first[0], Cell::String("Japan".into()));
        assert_eq!(first[1], Cell::String("Stroke".into()));
        assert_eq!(first[2], Cell::Integer(2015));
        assert_eq!(first[3], Cell::Integer(7));
        assert_eq!(first[4], Cell::Float(0.5));
        assert_eq!(first[5], Cell::Float(45000.4));
        assert_eq!(first[6], Cell::Bool(false));
        assert!(matches!(&first[7], Cell::String(s) if s.starts_with("Timestamp")));

        let second = &table.rows()[1];
        assert_eq!(second[0], Cell::Null);
        assert_eq!(second[5], Cell::Null);
        assert_eq!(second[6], Cell::Bool(true));
    }
}

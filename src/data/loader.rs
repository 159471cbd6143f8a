use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// A required column: the export's header name plus a snake_case alias.
struct Column {
    name: &'static str,
    alias: &'static str,
}

const SITE: Column = Column { name: "Launch Site", alias: "site" };
const PAYLOAD: Column = Column { name: "Payload Mass (kg)", alias: "payload_mass_kg" };
const CLASS: Column = Column { name: "class", alias: "outcome" };
const BOOSTER: Column = Column { name: "Booster Version Category", alias: "booster_category" };

impl Column {
    fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        header == self.name || header == self.alias
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Any malformed row fails the whole load; there is no partial dataset.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} contains no launch records", path.display());
    }
    Ok(dataset)
}

fn build_record(site: &str, payload: f64, class: f64, booster: &str) -> Result<LaunchRecord> {
    if class.fract() != 0.0 {
        bail!("'{}' value {class} is not an integer", CLASS.name);
    }
    let outcome = Outcome::from_class(class as i64)?;
    Ok(LaunchRecord::new(site.trim(), payload, outcome, booster.trim())?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; columns other than the four
/// launch fields are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let index_of = |col: &Column| {
        headers
            .iter()
            .position(|h| col.matches(h))
            .with_context(|| format!("CSV missing '{}' column", col.name))
    };
    let site_idx = index_of(&SITE)?;
    let payload_idx = index_of(&PAYLOAD)?;
    let class_idx = index_of(&CLASS)?;
    let booster_idx = index_of(&BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let payload = parse_number(field(payload_idx))
            .with_context(|| format!("CSV row {row_no}: '{}'", PAYLOAD.name))?;
        let class = parse_number(field(class_idx))
            .with_context(|| format!("CSV row {row_no}: '{}'", CLASS.name))?;

        let record = build_record(field(site_idx), payload, class, field(booster_idx))
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    log::debug!("parsed {} CSV rows", records.len());
    Ok(LaunchDataset::from_records(records))
}

fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    s.parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let get = |col: &Column| {
            obj.iter()
                .find(|(key, _)| col.matches(key))
                .map(|(_, v)| v)
                .with_context(|| format!("Row {i}: missing '{}'", col.name))
        };

        let site = json_str(get(&SITE)?, i, SITE.name)?;
        let payload = json_f64(get(&PAYLOAD)?, i, PAYLOAD.name)?;
        let class = json_f64(get(&CLASS)?, i, CLASS.name)?;
        let booster = json_str(get(&BOOSTER)?, i, BOOSTER.name)?;

        let record =
            build_record(site, payload, class, booster).with_context(|| format!("Row {i}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_str<'a>(val: &'a JsonValue, row: usize, col: &str) -> Result<&'a str> {
    val.as_str()
        .with_context(|| format!("Row {row}: '{col}' is not a string"))
}

fn json_f64(val: &JsonValue, row: usize, col: &str) -> Result<f64> {
    match val {
        JsonValue::Number(n) => n
            .as_f64()
            .with_context(|| format!("Row {row}: '{col}' is out of range")),
        JsonValue::String(s) => parse_number(s).with_context(|| format!("Row {row}: '{col}'")),
        _ => bail!("Row {row}: '{col}' is not a number"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch field.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns may be any of
/// Int32/Int64/Float32/Float64.  Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let sites = string_column(&batch, &SITE)?;
        let payloads = f64_column(&batch, &PAYLOAD)?;
        let classes = f64_column(&batch, &CLASS)?;
        let boosters = string_column(&batch, &BOOSTER)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let record = build_record(&sites[row], payloads[row], classes[row], &boosters[row])
                .with_context(|| format!("Parquet row {row_no}"))?;
            records.push(record);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn find_column<'a>(batch: &'a RecordBatch, col: &Column) -> Result<&'a Arc<dyn Array>> {
    let schema = batch.schema();
    let idx = schema
        .fields()
        .iter()
        .position(|f| col.matches(f.name()))
        .with_context(|| format!("Parquet file missing '{}' column", col.name))?;
    Ok(batch.column(idx))
}

/// Read a whole numeric column as `f64`. Nulls are an error.
fn f64_column(batch: &RecordBatch, col: &Column) -> Result<Vec<f64>> {
    let array = find_column(batch, col)?;
    if array.null_count() > 0 {
        bail!("'{}' column contains nulls", col.name);
    }

    let values: Vec<f64> = match array.data_type() {
        DataType::Float64 => downcast::<Float64Array>(array)?.values().to_vec(),
        DataType::Float32 => downcast::<Float32Array>(array)?
            .values()
            .iter()
            .map(|&v| f64::from(v))
            .collect(),
        DataType::Int64 => downcast::<Int64Array>(array)?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int32 => downcast::<Int32Array>(array)?
            .values()
            .iter()
            .map(|&v| f64::from(v))
            .collect(),
        other => bail!("'{}' column has type {other:?}, expected a number", col.name),
    };
    Ok(values)
}

/// Read a whole string column. Nulls become empty strings.
fn string_column(batch: &RecordBatch, col: &Column) -> Result<Vec<String>> {
    let array = find_column(batch, col)?;

    let values = match array.data_type() {
        DataType::Utf8 => downcast::<StringArray>(array)?
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect(),
        other => bail!("'{}' column has type {other:?}, expected a string", col.name),
    };
    Ok(values)
}

fn downcast<T: Array + 'static>(array: &Arc<dyn Array>) -> Result<&T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", array.data_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const CSV_EXPORT: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
4,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
";

    #[test]
    fn loads_csv_export() {
        let file = write_temp(".csv", CSV_EXPORT);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.payload_bounds(), (0.0, 9600.0));
        let first = &ds.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(ds.records()[3].outcome, Outcome::Success);
        assert_eq!(ds.sites().len(), 3);
    }

    #[test]
    fn csv_accepts_snake_case_headers() {
        let file = write_temp(
            ".csv",
            "site,payload_mass_kg,outcome,booster_category\nA,100,1.0,FT\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[0].payload_mass_kg, 100.0);
    }

    #[test]
    fn csv_rejects_bad_rows() {
        let missing = write_temp(".csv", "Launch Site,class,Payload Mass (kg)\nA,1,10\n");
        let err = load_file(missing.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Booster Version Category"));

        let bad_class = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,2,10,FT\n",
        );
        assert!(format!("{:#}", load_file(bad_class.path()).unwrap_err()).contains("not 0 or 1"));

        let negative = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,-5,FT\n",
        );
        assert!(format!("{:#}", load_file(negative.path()).unwrap_err()).contains("negative"));
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let file = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn loads_json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": "500", "class": 0, "Booster Version Category": "v1.1"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass_kg, 500.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_must_be_array_of_objects() {
        let file = write_temp(".json", r#"{"Launch Site": "A"}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("class", DataType::Int64, false),
            Field::new("Booster Version Category", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS SLC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![3600.0, 5300.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["FT", "B5"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].site, "CCAFS SLC-40");
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].booster_category, "B5");
        assert_eq!(ds.payload_bounds(), (3600.0, 5300.0));
    }

    #[test]
    fn unsupported_extension_and_missing_file() {
        let file = write_temp(".xlsx", "");
        assert!(format!("{:#}", load_file(file.path()).unwrap_err()).contains("Unsupported"));
        assert!(load_file(Path::new("/nonexistent/launches.csv")).is_err());
    }
}

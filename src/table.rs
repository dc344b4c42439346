use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::WriteError;

const FILE_SUFFIX: &str = ".tab.json";

/// One day of a country's chart. Unknown counts stay `None` and are written
/// as `null`; on disk a row is the array `[date, deaths, recoveries, cases]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowTuple", into = "RowTuple")]
pub struct DataRow {
    pub date: String,
    pub deaths: Option<i64>,
    pub recoveries: Option<i64>,
    pub cases: Option<i64>,
}

type RowTuple = (String, Option<i64>, Option<i64>, Option<i64>);

impl From<RowTuple> for DataRow {
    fn from((date, deaths, recoveries, cases): RowTuple) -> Self {
        Self {
            date,
            deaths,
            recoveries,
            cases,
        }
    }
}

impl From<DataRow> for RowTuple {
    fn from(row: DataRow) -> Self {
        (row.date, row.deaths, row.recoveries, row.cases)
    }
}

/// A row from the older `{{Medical cases chart/Row|...}}` markup, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRow {
    pub date: String,
    pub deaths: String,
    pub recoveries: String,
    pub cases: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub en: String,
}

impl Schema {
    /// The fixed four-column layout every output table carries.
    pub fn cases_chart() -> Self {
        let field = |name: &str, kind: &str, title: &str| Field {
            name: name.to_string(),
            kind: kind.to_string(),
            title: Title {
                en: title.to_string(),
            },
        };
        Self {
            fields: vec![
                field("date", "string", "Date"),
                field("deaths", "number", "Deaths"),
                field("recoveries", "number", "Recoveries"),
                field("cases", "number", "Active cases"),
            ],
        }
    }
}

/// Schema plus rows; serializes schema first, then data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableArtifact {
    pub schema: Schema,
    pub data: Vec<DataRow>,
}

impl TableArtifact {
    pub fn new(data: Vec<DataRow>) -> Self {
        Self {
            schema: Schema::cases_chart(),
            data,
        }
    }

    /// Pretty JSON (two-space indent) with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Destination for finished tables, keyed by country code.
pub trait TableSink {
    fn write_table(&self, country_code: &str, table: &TableArtifact) -> Result<PathBuf, WriteError>;
}

/// Writes `<out_dir>/<cc>.tab.json`.
pub struct TableWriter {
    out_dir: PathBuf,
}

impl TableWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn path_for(&self, country_code: &str) -> Result<PathBuf, WriteError> {
        if !is_safe_key(country_code) {
            return Err(WriteError::InvalidKey(country_code.to_string()));
        }
        Ok(self.out_dir.join(format!("{}{}", country_code, FILE_SUFFIX)))
    }
}

impl TableSink for TableWriter {
    fn write_table(&self, country_code: &str, table: &TableArtifact) -> Result<PathBuf, WriteError> {
        let path = self.path_for(country_code)?;
        let contents = table.to_json().map_err(|source| WriteError::Serialize {
            country_code: country_code.to_string(),
            source,
        })?;

        ensure_directory(&self.out_dir)?;
        replace_file(&self.out_dir, &path, contents.as_bytes())?;
        debug!(path = %path.display(), rows = table.data.len(), "table written");
        Ok(path)
    }
}

// Write into a temp file next to the target, then rename over it, so a failed
// write never leaves a truncated table in place of the previous one.
fn replace_file(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

fn ensure_directory(dir: &Path) -> Result<(), WriteError> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

// Country codes become file names; keep them to a single path component.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\'])
        && !key.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, deaths: Option<i64>, recoveries: Option<i64>, cases: Option<i64>) -> DataRow {
        DataRow {
            date: date.to_string(),
            deaths,
            recoveries,
            cases,
        }
    }

    fn read_table(path: &Path) -> TableArtifact {
        let contents = fs::read_to_string(path).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[test]
    fn rows_serialize_as_arrays() {
        let json = serde_json::to_string(&row("2020-03-01", Some(5), None, Some(10))).unwrap();
        assert_eq!(json, r#"["2020-03-01",5,null,10]"#);
    }

    #[test]
    fn schema_comes_before_data() {
        let json = TableArtifact::new(vec![]).to_json().unwrap();
        let schema_at = json.find("\"schema\"").unwrap();
        let data_at = json.find("\"data\"").unwrap();
        assert!(schema_at < data_at);
        assert!(json.starts_with("{\n  \"schema\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn schema_fields() {
        let schema = Schema::cases_chart();
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["date", "deaths", "recoveries", "cases"]);
        assert_eq!(schema.fields[0].kind, "string");
        assert!(schema.fields[1..].iter().all(|f| f.kind == "number"));
        assert_eq!(schema.fields[3].title.en, "Active cases");
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TableWriter::new(dir.path());
        let table = TableArtifact::new(vec![
            row("2020-03-01", Some(5), Some(0), Some(10)),
            row("2020-03-02", None, Some(-1), Some(12)),
        ]);

        let path = writer.write_table("IT", &table).unwrap();
        assert_eq!(path, dir.path().join("IT.tab.json"));
        assert_eq!(read_table(&path), table);

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, table.to_json().unwrap());
    }

    #[test]
    fn creates_missing_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("tables");
        let writer = TableWriter::new(&nested);
        let path = writer.write_table("FR", &TableArtifact::new(vec![])).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.is_file());
    }

    #[test]
    fn rejects_path_like_keys() {
        let writer = TableWriter::new("out");
        for key in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(writer.path_for(key), Err(WriteError::InvalidKey(_))), "{key:?}");
        }
    }

    #[test]
    fn overwrite_replaces_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TableWriter::new(dir.path());
        writer
            .write_table("IT", &TableArtifact::new(vec![row("2020-03-01", Some(1), None, None)]))
            .unwrap();
        let newer = TableArtifact::new(vec![
            row("2020-03-01", Some(1), Some(0), Some(2)),
            row("2020-03-02", Some(3), Some(0), Some(4)),
        ]);
        let path = writer.write_table("IT", &newer).unwrap();

        assert_eq!(read_table(&path), newer);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["IT.tab.json"]);
    }

    #[test]
    fn failed_rename_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("IT.tab.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let writer = TableWriter::new(dir.path());

        let err = writer.write_table("IT", &TableArtifact::new(vec![])).unwrap_err();

        assert!(matches!(err, WriteError::Io { .. }));
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let writer = TableWriter::new(&blocker);
        let err = writer.write_table("DE", &TableArtifact::new(vec![])).unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }
}

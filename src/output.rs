use crate::types::ItemRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("unable to write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to serialize prices")]
    Json(#[from] serde_json::Error),
}

/// Compact JSON array, no trailing newline.
pub fn to_json(records: &[ItemRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Overwrites `path` with the records. An empty slice still produces `[]`.
#[instrument(level = "info", name = "Writing prices", skip(records))]
pub fn write_records(path: &Path, records: &[ItemRecord]) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, records)?;
    writer.flush().map_err(io_error)?;

    info!("Wrote {} items to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn empty_set_is_written_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Prices.json");

        write_records(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Prices.json");
        std::fs::write(&path, "stale content that is longer than the new one").unwrap();

        let records = vec![ItemRecord {
            name: String::from("Dominus"),
            kind: String::from("Body"),
            rarity: String::from("Rare"),
            prices: IndexMap::from([(String::from("Red"), String::from("100-200"))]),
        }];
        write_records(&path, &records).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json(&records).unwrap());
        assert!(!written.ends_with('\n'));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("Prices.json");

        assert!(matches!(
            write_records(&path, &[]),
            Err(OutputError::Io { .. })
        ));
    }
}

//! Catalog loading and schema validation.
//!
//! A catalog is a JSON array of copilot records, read either from a file or
//! from stdin. Validation happens entirely up front: a malformed catalog is
//! reported before any interactive session starts, with nothing to degrade
//! to.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PickerError, Result};

use super::record::Copilot;

/// Load and validate a catalog from a file path.
pub fn load_from_path(path: &Path) -> Result<Vec<Copilot>> {
    let file = File::open(path).map_err(|e| PickerError::MalformedInput {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_reader(file, &path.display().to_string())
}

/// Load and validate a catalog from any reader (used for stdin).
pub fn load_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<Copilot>> {
    let catalog: Vec<Copilot> =
        serde_json::from_reader(reader).map_err(|e| PickerError::MalformedInput {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    validate(&catalog, source_name)?;
    Ok(catalog)
}

/// Validate catalog-level invariants: at least one record, non-empty ids,
/// unique ids.
pub fn validate(catalog: &[Copilot], source_name: &str) -> Result<()> {
    let malformed = |message: String| PickerError::MalformedInput {
        source_name: source_name.to_string(),
        message,
    };

    if catalog.is_empty() {
        return Err(malformed("catalog contains no copilots".into()));
    }

    let mut seen = HashSet::new();
    for (index, record) in catalog.iter().enumerate() {
        if record.copilot_id.is_empty() {
            return Err(malformed(format!("record {index} has an empty copilot_id")));
        }
        if !seen.insert(record.copilot_id.as_str()) {
            return Err(malformed(format!(
                "duplicate copilot_id '{}'",
                record.copilot_id
            )));
        }
    }
    Ok(())
}

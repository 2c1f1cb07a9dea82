use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::Path};
use tracing::info;

/// Loads the raw 2-D value table dumped from the observation sheet.
///
/// Cells may arrive as JSON strings or bare numbers (trap numbers often do);
/// both are accepted and stringified.
pub fn load_values(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading observation values {}", path.display()))?;
    let rows: Vec<Vec<Value>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing observation values {}", path.display()))?;

    let values: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect();
    info!(rows = values.len(), "loaded observation values");
    Ok(values)
}

fn cell_to_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn stringifies_mixed_cells() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"[["Date", "Band"], ["05/01/2024", 62], [null]]"#)?;

        let values = load_values(file.path())?;
        assert_eq!(values[0], vec!["Date", "Band"]);
        assert_eq!(values[1], vec!["05/01/2024", "62"]);
        assert_eq!(values[2], vec![""]);
        Ok(())
    }

    #[test]
    fn missing_dump_is_fatal() {
        assert!(load_values("does/not/exist.json").is_err());
    }
}

use crate::api::SchemaMapping;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the `{name}_input.json` / `{name}_output.json` pair in `dir`
#[must_use]
pub fn format_file_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{name}_input.json")),
        dir.join(format!("{name}_output.json")),
    )
}

/// Write both schema mappings as pretty JSON, replacing existing files
pub fn write_format_files(
    dir: &Path,
    name: &str,
    input_format: &SchemaMapping,
    output_format: &SchemaMapping,
) -> Result<(PathBuf, PathBuf)> {
    let (input_path, output_path) = format_file_paths(dir, name);

    fs::write(&input_path, serde_json::to_string_pretty(input_format)?)?;
    fs::write(&output_path, serde_json::to_string_pretty(output_format)?)?;

    tracing::debug!(
        "Wrote schema files {} and {}",
        input_path.display(),
        output_path.display()
    );

    Ok((input_path, output_path))
}

/// Read a schema mapping written by [`write_format_files`]
pub fn read_format_file(path: &Path) -> Result<SchemaMapping> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

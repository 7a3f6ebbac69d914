//! Reads level descriptions from TOML files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use redistrict_core::LevelLayout;

/// Parses a level from TOML source without validating it.
pub(crate) fn parse_level(source: &str) -> Result<LevelLayout> {
    toml::from_str(source).context("failed to parse level toml contents")
}

/// Reads, parses and validates the level stored at `path`.
pub(crate) fn load_level(path: &Path) -> Result<LevelLayout> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    let level = parse_level(&source)
        .with_context(|| format!("level file {} is malformed", path.display()))?;
    level
        .validate()
        .with_context(|| format!("level `{}` is invalid", level.name))?;
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_tiles_are_reported_with_the_level_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        fs::write(
            &path,
            r#"
                name = "Broken"
                columns = 2
                rows = 1

                [[districts]]
                name = "Only"

                [[districts.tiles]]
                x = 0
                y = 0
                party = "life"

                [[districts.tiles]]
                x = 0
                y = 0
                party = "death"
            "#,
        )
        .expect("write level");

        let error = load_level(&path).expect_err("duplicate tile must be rejected");
        let message = format!("{error:#}");
        assert!(message.contains("Broken"), "{message}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = load_level(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(format!("{error:#}").contains("/definitely/not/here.toml"));
    }

    #[test]
    fn syntax_errors_are_not_validation_errors() {
        assert!(parse_level("name = ").is_err());
    }
}

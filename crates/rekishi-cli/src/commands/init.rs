//! The `rekishi init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("rekishi.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data directory")?;
    write_if_missing(Path::new("data/sample.csv"), SAMPLE_DATASET)?;

    println!("\nNext steps:");
    println!("  1. Edit data/sample.csv or point rekishi.toml at your own dataset");
    println!("  2. Run: rekishi validate");
    println!("  3. Run: rekishi play");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# rekishi configuration

# "strict" rejects a dataset with malformed rows, "skip" drops them.
row_policy = "strict"
max_options = 6

# Eras to quiz on; leave empty for all.
eras = []

[source]
type = "file"
path = "data/sample.csv"

# [source]
# type = "http"
# url = "https://example.com/history.csv"
# timeout_secs = 30
"#;

const SAMPLE_DATASET: &str = include_str!("../../assets/sample.csv");

#[cfg(test)]
mod tests {
    use rekishi_core::parser::{parse_dataset, RowPolicy};
    use rekishi_loader::load_config_from;

    use super::*;

    #[test]
    fn starter_dataset_parses() {
        let parsed = parse_dataset(SAMPLE_DATASET, RowPolicy::Strict).unwrap();
        assert_eq!(parsed.dataset.len(), 17);
        assert_eq!(
            parsed.dataset.eras(),
            vec!["Heian", "Kamakura", "Sengoku", "Edo", "Meiji"]
        );
    }

    #[test]
    fn starter_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rekishi.toml");
        std::fs::write(&path, SAMPLE_CONFIG).unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.max_options, 6);
        assert_eq!(config.source.location(), "data/sample.csv");
    }
}

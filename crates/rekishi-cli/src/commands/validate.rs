//! The `rekishi validate` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{load_dataset, resolve_config};

pub async fn execute(
    dataset: Option<String>,
    skip_malformed: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path, dataset, skip_malformed)?;
    let loaded = load_dataset(&config).await?;
    let dataset = &loaded.dataset;

    println!("Dataset: {}", loaded.source);
    println!("  records: {}", dataset.len());
    println!("  columns: {}", dataset.headers().join(", "));
    println!("  eras:    {}", dataset.eras().join(", "));

    for row in &loaded.skipped {
        println!(
            "  WARNING: skipped line {} ({} of {} fields)",
            row.line, row.found, row.expected
        );
    }

    if dataset.is_empty() {
        println!("\nDataset has no records, there is nothing to quiz on.");
    } else if loaded.skipped.is_empty() {
        println!("\nDataset valid.");
    } else {
        println!("\n{} row(s) skipped.", loaded.skipped.len());
    }

    Ok(())
}

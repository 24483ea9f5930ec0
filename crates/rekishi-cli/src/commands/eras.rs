//! The `rekishi eras` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use rekishi_core::filter::{era_counts, EraCount};

use super::{load_dataset, resolve_config};

pub async fn execute(
    dataset: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path, dataset, false)?;
    let loaded = load_dataset(&config).await?;
    let counts = era_counts(&loaded.dataset);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&counts)?),
        "table" => println!("{}", render_table(&counts)),
        other => anyhow::bail!("unknown format '{other}', expected table or json"),
    }

    Ok(())
}

fn render_table(counts: &[EraCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Era", "Records"]);

    for count in counts {
        table.add_row(vec![Cell::new(&count.era), Cell::new(count.records)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_each_era() {
        let counts = vec![
            EraCount {
                era: "Sengoku".into(),
                records: 2,
            },
            EraCount {
                era: "Edo".into(),
                records: 1,
            },
        ];
        let rendered = render_table(&counts).to_string();
        assert!(rendered.contains("Era"));
        assert!(rendered.contains("Sengoku"));
        assert!(rendered.contains("Edo"));
    }
}

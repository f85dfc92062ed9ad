//! Просмотр исходной таблицы: колонки и первые строки

use anyhow::Context;

use car_price::config::{init_tracing, Config};
use car_price::preprocessing::load_table;
use car_price::types::RawCell;

const PREVIEW_ROWS: usize = 3;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let table = load_table(&config.data_path)
        .with_context(|| format!("cannot read {}", config.data_path.display()))?;

    println!("Columns in sheet: {:?}", table.headers);
    for row in table.rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = row
            .iter()
            .map(|c| match c {
                RawCell::Empty => "NaN".to_string(),
                other => other.as_text().unwrap_or_default(),
            })
            .collect();
        println!("{}", cells.join(" | "));
    }

    Ok(())
}

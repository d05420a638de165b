use super::ui;
use crate::core::ProfileResolver;
use crate::core::profile::resolve_names;
use anyhow::Result;
use comfy_table::Cell;

/// One row per symbol, `-` where no name could be found.
pub fn display_names(resolved: &[(String, Option<String>)]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Name")]);

    for (symbol, name) in resolved {
        let name_cell = match name {
            Some(name) => Cell::new(name),
            None => Cell::new("-").fg(comfy_table::Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(symbol.to_uppercase()), name_cell]);
    }

    table.to_string()
}

pub async fn run(symbols: &[String], resolver: &(dyn ProfileResolver + Send + Sync)) -> Result<()> {
    let resolved = resolve_names(resolver, symbols).await;
    println!("{}", display_names(&resolved));
    Ok(())
}

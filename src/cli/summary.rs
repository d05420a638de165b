use super::ui;
use crate::core::{Asset, AssetPortfolio, ProfileResolver, compute_portfolio};
use anyhow::{Context, Result};
use comfy_table::Cell;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl AssetPortfolio {
    /// Renders holdings and totals. `names` maps a symbol to its resolved
    /// display name; symbols without one fall back to the configured name.
    pub fn display_as_table(&self, names: &HashMap<String, String>) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Symbol"),
            ui::header_cell("Name"),
            ui::header_cell("Type"),
            ui::header_cell("Quantity"),
            ui::header_cell("Price"),
            ui::header_cell("Value"),
            ui::header_cell("P/L"),
            ui::header_cell("P/L (%)"),
        ]);

        for holding in &self.assets {
            let asset = &holding.asset;
            let name_display = names
                .get(&asset.symbol)
                .unwrap_or(&asset.name)
                .to_string();

            table.add_row(vec![
                Cell::new(&asset.symbol),
                Cell::new(name_display),
                Cell::new(asset.asset_type.to_string()),
                ui::number_cell(format!("{:.4}", asset.quantity)),
                ui::number_cell(format!("{:.2}", asset.current_value)),
                ui::number_cell(format!("{:.2}", holding.total_value)),
                ui::signed_cell(format!("{:+.2}", holding.profit_loss), holding.profit_loss),
                ui::signed_cell(
                    format!("{:+.2}%", holding.profit_loss_percentage),
                    holding.profit_loss,
                ),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Portfolio", ui::StyleType::Title)
        );

        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Total Value", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.2}", self.total_portfolio_value),
                ui::StyleType::TotalLabel
            )
        ));
        output.push_str(&format!(
            "\n{}: {}",
            ui::style_text("Total Cost", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.2}", self.total_initial_cost()),
                ui::StyleType::Subtle
            )
        ));
        output.push_str(&format!(
            "\n{}: {}",
            ui::style_text("Total P/L", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!(
                    "{:+.2} ({:+.2}%)",
                    self.total_profit_loss, self.total_profit_loss_percentage
                ),
                ui::signed_style(self.total_profit_loss)
            )
        ));

        output
    }
}

/// Looks up a display name for every distinct symbol in `holdings`.
/// Symbols the resolver cannot name are left out of the map.
pub async fn resolve_display_names(
    holdings: &[Asset],
    resolver: &(dyn ProfileResolver + Send + Sync),
) -> HashMap<String, String> {
    let mut seen = HashSet::new();
    let symbols: Vec<&str> = holdings
        .iter()
        .map(|a| a.symbol.as_str())
        .filter(|s| seen.insert(*s))
        .collect();

    let pb = ui::new_progress_bar(symbols.len() as u64, true);
    pb.set_message("Resolving names...");

    let name_futures = symbols.into_iter().map(|symbol| {
        let pb_clone = pb.clone();
        async move {
            let name = resolver.resolve_name(symbol).await;
            pb_clone.inc(1);
            (symbol.to_string(), name)
        }
    });

    let names: HashMap<String, String> = join_all(name_futures)
        .await
        .into_iter()
        .filter_map(|(symbol, name)| name.map(|n| (symbol, n)))
        .collect();
    pb.finish_and_clear();

    debug!(resolved = names.len(), "Resolved display names");
    names
}

/// Produces the summary text: a table, or the portfolio as pretty JSON.
pub async fn render(
    holdings: &[Asset],
    resolver: &(dyn ProfileResolver + Send + Sync),
    json: bool,
) -> Result<String> {
    let portfolio = compute_portfolio(holdings);

    if json {
        return serde_json::to_string_pretty(&portfolio).context("Failed to serialize portfolio");
    }

    let names = resolve_display_names(holdings, resolver).await;
    Ok(portfolio.display_as_table(&names))
}

pub async fn run(
    holdings: &[Asset],
    resolver: &(dyn ProfileResolver + Send + Sync),
    json: bool,
) -> Result<()> {
    let output = render(holdings, resolver, json).await?;
    println!("{output}");
    Ok(())
}

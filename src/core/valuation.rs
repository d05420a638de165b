//! Turns a list of holdings into per-holding and portfolio-level profit/loss.
use crate::core::asset::Asset;
use serde::Serialize;
use tracing::debug;

/// An [`Asset`] together with the figures derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetHolding {
    #[serde(flatten)]
    pub asset: Asset,
    pub total_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
}

impl AssetHolding {
    /// What the held quantity cost at the purchase price.
    pub fn initial_cost(&self) -> f64 {
        self.asset.quantity * self.asset.purchase_price
    }
}

/// All holdings in input order plus aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetPortfolio {
    pub assets: Vec<AssetHolding>,
    pub total_portfolio_value: f64,
    pub total_profit_loss: f64,
    pub total_profit_loss_percentage: f64,
}

impl AssetPortfolio {
    pub fn total_initial_cost(&self) -> f64 {
        self.total_portfolio_value - self.total_profit_loss
    }
}

/// Percentage of `profit_loss` relative to `initial_cost`, or 0 when nothing was paid.
fn percentage_of(profit_loss: f64, initial_cost: f64) -> f64 {
    if initial_cost == 0.0 {
        0.0
    } else {
        (profit_loss / initial_cost) * 100.0
    }
}

/// Values every asset and sums the results.
///
/// Pure and deterministic: no I/O, input is not modified and output order
/// matches input order. Arithmetic is unchecked, so negative quantities or
/// prices flow straight through.
pub fn compute_portfolio(assets: &[Asset]) -> AssetPortfolio {
    let mut holdings = Vec::with_capacity(assets.len());
    let mut total_value = 0.0;
    let mut total_cost = 0.0;

    for asset in assets {
        let initial_cost = asset.quantity * asset.purchase_price;
        let current_total = asset.quantity * asset.current_value;
        let profit_loss = current_total - initial_cost;

        total_value += current_total;
        total_cost += initial_cost;

        holdings.push(AssetHolding {
            asset: asset.clone(),
            total_value: current_total,
            profit_loss,
            profit_loss_percentage: percentage_of(profit_loss, initial_cost),
        });
    }

    let total_profit_loss = total_value - total_cost;
    debug!(
        holdings = holdings.len(),
        total_value, total_profit_loss, "Computed portfolio valuation"
    );

    AssetPortfolio {
        assets: holdings,
        total_portfolio_value: total_value,
        total_profit_loss,
        total_profit_loss_percentage: percentage_of(total_profit_loss, total_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::AssetType;

    fn asset(symbol: &str, quantity: f64, purchase_price: f64, current_value: f64) -> Asset {
        Asset {
            id: symbol.to_lowercase(),
            name: format!("{symbol} name"),
            symbol: symbol.to_string(),
            quantity,
            purchase_price,
            current_value,
            asset_type: AssetType::Stock,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_portfolio() {
        let portfolio = compute_portfolio(&[]);

        assert!(portfolio.assets.is_empty());
        assert_eq!(portfolio.total_portfolio_value, 0.0);
        assert_eq!(portfolio.total_profit_loss, 0.0);
        assert_eq!(portfolio.total_profit_loss_percentage, 0.0);
    }

    #[test]
    fn test_single_stock_gain() {
        let portfolio = compute_portfolio(&[asset("AAPL", 10.0, 150.0, 175.0)]);
        let holding = &portfolio.assets[0];

        assert_close(holding.total_value, 1750.0);
        assert_close(holding.profit_loss, 250.0);
        assert_close(holding.profit_loss_percentage, 100.0 / 6.0);
        assert_close(holding.initial_cost(), 1500.0);
        assert_eq!(holding.asset.symbol, "AAPL");
    }

    #[test]
    fn test_fractional_crypto_holding() {
        let mut btc = asset("BTC", 0.1, 30000.0, 40000.0);
        btc.asset_type = AssetType::Crypto;
        let portfolio = compute_portfolio(&[btc]);
        let holding = &portfolio.assets[0];

        assert_close(holding.total_value, 4000.0);
        assert_close(holding.profit_loss, 1000.0);
        assert!((holding.profit_loss_percentage - 33.33).abs() < 0.01);
        assert_eq!(holding.asset.asset_type, AssetType::Crypto);
    }

    #[test]
    fn test_zero_cost_holding_has_zero_percentage() {
        let portfolio = compute_portfolio(&[
            asset("GIFT", 5.0, 0.0, 20.0),
            asset("NONE", 0.0, 100.0, 80.0),
        ]);

        assert_close(portfolio.assets[0].profit_loss, 100.0);
        assert_eq!(portfolio.assets[0].profit_loss_percentage, 0.0);
        assert_eq!(portfolio.assets[1].profit_loss, 0.0);
        assert_eq!(portfolio.assets[1].profit_loss_percentage, 0.0);
        // Nothing paid across the whole portfolio.
        assert_eq!(portfolio.total_profit_loss_percentage, 0.0);
    }

    #[test]
    fn test_zero_cost_loss_has_zero_percentage() {
        let portfolio = compute_portfolio(&[asset("FREE", 3.0, 0.0, -10.0)]);

        assert_close(portfolio.assets[0].profit_loss, -30.0);
        assert_eq!(portfolio.assets[0].profit_loss_percentage, 0.0);
    }

    #[test]
    fn test_totals_and_order() {
        let input = vec![
            asset("MSFT", 5.0, 300.0, 270.0),
            asset("AAPL", 10.0, 150.0, 175.0),
            asset("VTI", 2.0, 200.0, 220.0),
        ];
        let portfolio = compute_portfolio(&input);

        let symbols: Vec<&str> = portfolio
            .assets
            .iter()
            .map(|h| h.asset.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL", "VTI"]);

        let sum_of_values: f64 = portfolio.assets.iter().map(|h| h.total_value).sum();
        assert_close(portfolio.total_portfolio_value, sum_of_values);
        assert_close(portfolio.total_portfolio_value, 1350.0 + 1750.0 + 440.0);

        // cost 1500 + 1500 + 400 = 3400, P/L = 3540 - 3400 = 140
        assert_close(portfolio.total_profit_loss, 140.0);
        assert_close(portfolio.total_profit_loss_percentage, 140.0 / 3400.0 * 100.0);
        assert_close(portfolio.total_initial_cost(), 3400.0);
        assert_close(portfolio.assets[0].profit_loss_percentage, -10.0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let input = vec![asset("AAPL", 1.0, 100.0, 110.0), asset("AAPL", 1.0, 100.0, 110.0)];
        let portfolio = compute_portfolio(&input);

        assert_eq!(portfolio.assets.len(), 2);
        assert_close(portfolio.total_portfolio_value, 220.0);
    }

    #[test]
    fn test_negative_inputs_are_not_rejected() {
        let portfolio = compute_portfolio(&[asset("SHORT", -10.0, 50.0, 40.0)]);
        let holding = &portfolio.assets[0];

        assert_close(holding.total_value, -400.0);
        assert_close(holding.profit_loss, 100.0);
        assert_close(holding.profit_loss_percentage, -20.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = vec![
            asset("AAPL", 10.0, 150.0, 175.0),
            asset("BTC", 0.1, 30000.0, 40000.0),
        ];
        let first = compute_portfolio(&input);
        let second = compute_portfolio(&input);

        assert_eq!(first, second);
        for (a, b) in first.assets.iter().zip(&second.assets) {
            assert_eq!(a.profit_loss_percentage.to_bits(), b.profit_loss_percentage.to_bits());
        }
        assert_eq!(
            first.total_profit_loss_percentage.to_bits(),
            second.total_profit_loss_percentage.to_bits()
        );
    }

    #[test]
    fn test_json_output_carries_asset_fields() {
        let portfolio = compute_portfolio(&[asset("AAPL", 10.0, 150.0, 175.0)]);
        let json = serde_json::to_value(&portfolio).unwrap();

        let holding = &json["assets"][0];
        assert_eq!(holding["symbol"], "AAPL");
        assert_eq!(holding["type"], "stock");
        assert_eq!(holding["total_value"], 1750.0);
        assert_eq!(json["total_portfolio_value"], 1750.0);
    }
}

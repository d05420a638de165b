use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Fund,
    Crypto,
}

impl Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AssetType::Stock => "stock",
                AssetType::Fund => "fund",
                AssetType::Crypto => "crypto",
            }
        )
    }
}

impl FromStr for AssetType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "fund" => Ok(AssetType::Fund),
            "crypto" => Ok(AssetType::Crypto),
            _ => Err(anyhow::anyhow!("Invalid asset type: {}", s)),
        }
    }
}

/// A single holding as supplied by the dashboard: what is held, how much of it,
/// what it cost per unit and what one unit is worth now.
///
/// Values are taken as given. Negative figures are not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_value: f64,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

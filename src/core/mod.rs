//! Core business logic abstractions

pub mod asset;
pub mod config;
pub mod credential;
pub mod log;
pub mod profile;
pub mod valuation;

// Re-export main types for cleaner imports
pub use asset::{Asset, AssetType};
pub use credential::ApiCredential;
pub use profile::{LookupFailure, ProfileResolver};
pub use valuation::{AssetHolding, AssetPortfolio, compute_portfolio};

//! Terminal presentation of portfolio data

pub mod names;
pub mod setup;
pub mod summary;
pub mod ui;

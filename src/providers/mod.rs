pub mod finnhub;

pub use finnhub::FinnhubProfileResolver;

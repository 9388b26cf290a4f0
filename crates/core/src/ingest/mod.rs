pub mod alpha_vantage;
pub mod error;
pub mod provider;
pub mod types;
pub mod yahoo;

pub use error::{Provider, ProviderError, ProviderErrorKind};
pub use provider::{EarningsProvider, QuoteProvider};

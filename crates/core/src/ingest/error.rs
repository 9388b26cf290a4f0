use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Quote,
    Earnings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    NotFound,
    RateLimited,
    Http,
    Decode,
}

/// Classified upstream failure. Travels inside `anyhow::Error` and is
/// recovered with `downcast_ref` where a status code has to be chosen.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
    pub detail: String,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            detail: detail.into(),
        }
    }

    /// Kind of the first `ProviderError` in the chain, if any.
    pub fn kind_of(err: &anyhow::Error) -> Option<ProviderErrorKind> {
        err.chain()
            .find_map(|e| e.downcast_ref::<ProviderError>())
            .map(|e| e.kind)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "upstream error (provider={:?}, kind={:?}): {}",
            self.provider, self.kind, self.detail
        )
    }
}

impl std::error::Error for ProviderError {}

use thiserror::Error;

pub type SystemResult<T> = core::result::Result<T, SystemError>;

/// Top-level error taxonomy. Nothing in here is fatal to the device; every
/// variant has a defined recovery (advance to the next provider, apply a
/// fallback value, or blink and carry on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Hardware(#[from] HardwareError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    /// A single provider used up all its retry attempts.
    #[error("time provider exhausted its retry budget")]
    ProviderExhausted,
    /// Every provider in the priority chain failed; the caller must apply
    /// its fallback policy.
    #[error("no time provider produced a sample")]
    AllProvidersExhausted,
    /// A positioning sentence that did not parse. Discarded at the parse
    /// site, never propagated past the provider.
    #[error("malformed positioning sentence")]
    MalformedSentence,
    /// A raw source handed back calendar fields that violate the sample
    /// invariants.
    #[error("invalid time tuple from raw source")]
    InvalidTimeTuple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    #[error("peripheral not initialized")]
    NotInitialized,
    #[error("peripheral communication error")]
    CommunicationError,
    #[error("peripheral timed out")]
    Timeout,
    #[error("invalid parameter")]
    InvalidParameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    #[error("no link established")]
    NotConnected,
    #[error("network operation timed out")]
    Timeout,
    #[error("network time sync failed")]
    SyncFailed,
}

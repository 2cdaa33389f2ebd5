/// Default payment amount: 1 XAH expressed in drops.
pub const DEFAULT_PAYMENT_DROPS: u64 = 1_000_000;

/// Default cooldown between payments to the same recipient: 24 hours.
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 86_400;

/// The gate's two scalar settings.
///
/// Lazily materialized: absent stored values fall back to the defaults
/// above. Once loaded at the start of an invocation this copy is the
/// value in effect for the whole invocation; same-invocation overrides
/// mutate the local copy, never trigger a re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Amount emitted per authorized payment, in drops.
    pub payment_amount: u64,
    /// Minimum seconds between payments to the same recipient.
    pub cooldown_seconds: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            payment_amount: DEFAULT_PAYMENT_DROPS,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

impl GateConfig {
    /// Builds a config from optionally-stored values, defaulting each
    /// missing field independently.
    pub fn from_stored(payment_amount: Option<u64>, cooldown_seconds: Option<u64>) -> Self {
        Self {
            payment_amount: payment_amount.unwrap_or(DEFAULT_PAYMENT_DROPS),
            cooldown_seconds: cooldown_seconds.unwrap_or(DEFAULT_COOLDOWN_SECONDS),
        }
    }
}

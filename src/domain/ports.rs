use super::event::AccountId;
use super::payment::{EmitHandle, PaymentInstruction};
use crate::error::Result;
use async_trait::async_trait;

/// Durable key-value state scoped to the hosting account's namespace.
///
/// Three key classes: the two config scalars and one timestamp per
/// distinct recipient. Absence is a valid, handled case everywhere; an
/// `Err` means the persistence layer itself failed and the invocation
/// must abort.
#[async_trait]
pub trait GateStateStore: Send + Sync {
    async fn payment_amount(&self) -> Result<Option<u64>>;
    async fn set_payment_amount(&self, drops: u64) -> Result<()>;

    async fn cooldown_seconds(&self) -> Result<Option<u64>>;
    async fn set_cooldown_seconds(&self, seconds: u64) -> Result<()>;

    async fn last_payment_time(&self, recipient: &AccountId) -> Result<Option<u64>>;
    async fn record_payment_time(&self, recipient: &AccountId, timestamp: u64) -> Result<()>;

    /// All recipients with a recorded payment, for reporting. Not used on
    /// the invocation path.
    async fn recipients(&self) -> Result<Vec<(AccountId, u64)>>;
}

/// The transaction-emission subsystem: at most one outbound payment per
/// invocation.
#[async_trait]
pub trait PaymentEmitter: Send + Sync {
    async fn emit(&self, payment: &PaymentInstruction) -> Result<EmitHandle>;
}

pub type GateStateStoreBox = Box<dyn GateStateStore>;
pub type PaymentEmitterBox = Box<dyn PaymentEmitter>;

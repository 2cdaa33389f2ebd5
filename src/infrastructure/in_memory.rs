use crate::domain::event::AccountId;
use crate::domain::payment::{EmitHandle, PaymentInstruction};
use crate::domain::ports::{GateStateStore, PaymentEmitter};
use crate::error::{GateError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct GateState {
    payment_amount: Option<u64>,
    cooldown_seconds: Option<u64>,
    recipients: HashMap<AccountId, u64>,
}

/// An in-memory gate state store.
///
/// Uses `Arc<RwLock<..>>` so clones share one underlying state, the same
/// way a host-scoped namespace is shared across invocations. Ideal for
/// tests and for replays that do not need persistence.
#[derive(Default, Clone)]
pub struct InMemoryGateStore {
    state: Arc<RwLock<GateState>>,
}

impl InMemoryGateStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GateStateStore for InMemoryGateStore {
    async fn payment_amount(&self) -> Result<Option<u64>> {
        Ok(self.state.read().await.payment_amount)
    }

    async fn set_payment_amount(&self, drops: u64) -> Result<()> {
        self.state.write().await.payment_amount = Some(drops);
        Ok(())
    }

    async fn cooldown_seconds(&self) -> Result<Option<u64>> {
        Ok(self.state.read().await.cooldown_seconds)
    }

    async fn set_cooldown_seconds(&self, seconds: u64) -> Result<()> {
        self.state.write().await.cooldown_seconds = Some(seconds);
        Ok(())
    }

    async fn last_payment_time(&self, recipient: &AccountId) -> Result<Option<u64>> {
        Ok(self.state.read().await.recipients.get(recipient).copied())
    }

    async fn record_payment_time(&self, recipient: &AccountId, timestamp: u64) -> Result<()> {
        self.state.write().await.recipients.insert(*recipient, timestamp);
        Ok(())
    }

    async fn recipients(&self) -> Result<Vec<(AccountId, u64)>> {
        let state = self.state.read().await;
        let mut all: Vec<_> = state.recipients.iter().map(|(k, v)| (*k, *v)).collect();
        all.sort_by_key(|(id, _)| *id);
        Ok(all)
    }
}

/// An emitter that records every submitted instruction.
///
/// Returns synthetic handles derived from a running counter. Can be
/// armed to fail the next emission for rollback-path tests.
#[derive(Default, Clone)]
pub struct RecordingEmitter {
    emitted: Arc<RwLock<Vec<PaymentInstruction>>>,
    fail_next: Arc<std::sync::atomic::AtomicBool>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All instructions emitted so far, in submission order.
    pub async fn emitted(&self) -> Vec<PaymentInstruction> {
        self.emitted.read().await.clone()
    }

    /// Makes the next `emit` call fail.
    pub fn fail_next(&self) {
        self.fail_next
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentEmitter for RecordingEmitter {
    async fn emit(&self, payment: &PaymentInstruction) -> Result<EmitHandle> {
        if self
            .fail_next
            .swap(false, std::sync::atomic::Ordering::SeqCst)
        {
            return Err(GateError::Emit("emission rejected by host".into()));
        }
        let mut emitted = self.emitted.write().await;
        emitted.push(*payment);
        let mut handle = [0u8; 32];
        handle[..8].copy_from_slice(&(emitted.len() as u64).to_be_bytes());
        Ok(EmitHandle(handle))
    }
}

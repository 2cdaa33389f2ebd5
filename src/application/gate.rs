use crate::domain::config::GateConfig;
use crate::domain::decision::{self, Decision};
use crate::domain::event::{AccountId, EventProfile, TriggerEvent, PARAM_AMOUNT, PARAM_COOLDOWN};
use crate::domain::payment::{EmitHandle, PaymentInstruction};
use crate::domain::ports::{GateStateStoreBox, PaymentEmitterBox};
use crate::error::Result;
use tracing::{debug, info};

/// Observable result of one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A payment was emitted and the recipient's timestamp recorded.
    Paid {
        recipient: AccountId,
        amount: u64,
        handle: EmitHandle,
        first_payment: bool,
    },
    /// Cooldown not yet elapsed; nothing was mutated or emitted.
    Declined {
        recipient: AccountId,
        eligible_at: u64,
    },
    /// Not a qualifying payment attempt; no payment-path state changes.
    NoOp,
}

/// The rate-limited payment gate.
///
/// `PaymentGate` executes one triggering event at a time against the
/// injected durable store and emitter. The host guarantees invocations
/// for one account never overlap, so the gate holds no locks of its own;
/// callers must await each `process` to completion before the next.
pub struct PaymentGate {
    hosting_account: AccountId,
    store: GateStateStoreBox,
    emitter: PaymentEmitterBox,
}

impl PaymentGate {
    /// Creates a gate bound to the hosting account's identity.
    ///
    /// # Arguments
    ///
    /// * `hosting_account` - The account whose namespace owns the gate's state.
    /// * `store` - Durable per-account key-value state.
    /// * `emitter` - The outbound transaction-emission subsystem.
    pub fn new(
        hosting_account: AccountId,
        store: GateStateStoreBox,
        emitter: PaymentEmitterBox,
    ) -> Self {
        Self {
            hosting_account,
            store,
            emitter,
        }
    }

    /// Processes one triggering event at the given ledger time.
    ///
    /// Runs the full invocation: classify, load config, apply any
    /// self-authorized overrides, then attempt the payment path. A
    /// returned error means the invocation must be rolled back by the
    /// host; `Ok` outcomes are final.
    pub async fn process(&self, event: &TriggerEvent, ledger_time: u64) -> Result<Outcome> {
        let profile = EventProfile::classify(event, &self.hosting_account);

        let mut config = self.load_config().await?;
        if profile.config_update_eligible() {
            config = self.apply_overrides(event, config).await?;
        }

        let recipient = match profile.target_recipient {
            Some(recipient) if profile.payment_eligible() => recipient,
            _ => {
                debug!(
                    is_invoke = profile.is_invoke,
                    is_self_originated = profile.is_self_originated,
                    "event does not qualify for a payment attempt"
                );
                return Ok(Outcome::NoOp);
            }
        };

        let last_payment_time = self.store.last_payment_time(&recipient).await?;
        match decision::evaluate(last_payment_time, config.cooldown_seconds, ledger_time) {
            Decision::Declined { eligible_at } => {
                info!(%recipient, eligible_at, ledger_time, "payment declined, cooldown not elapsed");
                Ok(Outcome::Declined {
                    recipient,
                    eligible_at,
                })
            }
            Decision::Authorized {
                first_payment: true,
            } => {
                // First payment: the timestamp is recorded before emission
                // is attempted.
                self.store.record_payment_time(&recipient, ledger_time).await?;
                let handle = self.emit(recipient, config.payment_amount).await?;
                info!(%recipient, amount = config.payment_amount, ledger_time, "first payment emitted");
                Ok(Outcome::Paid {
                    recipient,
                    amount: config.payment_amount,
                    handle,
                    first_payment: true,
                })
            }
            Decision::Authorized {
                first_payment: false,
            } => {
                // Repeat payment: emission is attempted before the
                // timestamp is recorded.
                let handle = self.emit(recipient, config.payment_amount).await?;
                self.store.record_payment_time(&recipient, ledger_time).await?;
                info!(%recipient, amount = config.payment_amount, ledger_time, "payment emitted");
                Ok(Outcome::Paid {
                    recipient,
                    amount: config.payment_amount,
                    handle,
                    first_payment: false,
                })
            }
        }
    }

    /// Loads the config in effect for this invocation, defaulting each
    /// absent field.
    async fn load_config(&self) -> Result<GateConfig> {
        let payment_amount = self.store.payment_amount().await?;
        let cooldown_seconds = self.store.cooldown_seconds().await?;
        Ok(GateConfig::from_stored(payment_amount, cooldown_seconds))
    }

    /// Applies `SECONDS` / `XAH` overrides from a self-originated invoke.
    ///
    /// Each present override replaces the in-memory field and is
    /// persisted immediately. Overrides are independent; either, both,
    /// or neither may appear.
    async fn apply_overrides(
        &self,
        event: &TriggerEvent,
        mut config: GateConfig,
    ) -> Result<GateConfig> {
        if let Some(seconds) = event.param_u64(PARAM_COOLDOWN) {
            config.cooldown_seconds = seconds;
            self.store.set_cooldown_seconds(seconds).await?;
            info!(seconds, "cooldown override persisted");
        }
        if let Some(drops) = event.param_u64(PARAM_AMOUNT) {
            config.payment_amount = drops;
            self.store.set_payment_amount(drops).await?;
            info!(drops, "payment amount override persisted");
        }
        Ok(config)
    }

    async fn emit(&self, recipient: AccountId, amount: u64) -> Result<EmitHandle> {
        let payment = PaymentInstruction::native(recipient, amount);
        self.emitter.emit(&payment).await
    }

    /// Consumes the gate and returns its store for final-state reporting.
    pub fn into_store(self) -> GateStateStoreBox {
        self.store
    }
}

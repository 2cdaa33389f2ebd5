use timegate::application::gate::{Outcome, PaymentGate};
use timegate::domain::config::{DEFAULT_COOLDOWN_SECONDS, DEFAULT_PAYMENT_DROPS};
use timegate::domain::event::{
    AccountId, TriggerEvent, ACCOUNT_ID_LEN, EVENT_TYPE_INVOKE, PARAM_ADDRESS, PARAM_COOLDOWN,
};
use timegate::domain::ports::GateStateStore;
use timegate::infrastructure::in_memory::{InMemoryGateStore, RecordingEmitter};

fn account(byte: u8) -> AccountId {
    AccountId::new([byte; ACCOUNT_ID_LEN])
}

fn gate(store: &InMemoryGateStore, emitter: &RecordingEmitter) -> PaymentGate {
    PaymentGate::new(account(1), Box::new(store.clone()), Box::new(emitter.clone()))
}

fn pay_event(recipient: AccountId) -> TriggerEvent {
    TriggerEvent::new(account(1), EVENT_TYPE_INVOKE)
        .with_param(PARAM_ADDRESS, recipient.as_bytes().to_vec())
}

#[tokio::test]
async fn test_default_config_governs_first_payment() {
    let store = InMemoryGateStore::new();
    let emitter = RecordingEmitter::new();
    let gate = gate(&store, &emitter);

    let outcome = gate.process(&pay_event(account(2)), 1_000).await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Paid {
            amount: DEFAULT_PAYMENT_DROPS,
            first_payment: true,
            ..
        }
    ));

    // The default cooldown now applies to the next attempt.
    let outcome = gate
        .process(&pay_event(account(2)), 1_000 + DEFAULT_COOLDOWN_SECONDS - 1)
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Declined { .. }));
}

#[tokio::test]
async fn test_recipients_are_rate_limited_independently() {
    let store = InMemoryGateStore::new();
    let emitter = RecordingEmitter::new();
    let gate = gate(&store, &emitter);

    // Set a short cooldown, then pay the first recipient.
    let configure = pay_event(account(2)).with_param(PARAM_COOLDOWN, 10u64.to_be_bytes().to_vec());
    gate.process(&configure, 100).await.unwrap();

    // A different recipient is on its own first-payment fast path even
    // while the first one is cooling down.
    let outcome = gate.process(&pay_event(account(3)), 101).await.unwrap();
    assert!(matches!(
        outcome,
        Outcome::Paid {
            first_payment: true,
            ..
        }
    ));

    assert_eq!(store.last_payment_time(&account(2)).await.unwrap(), Some(100));
    assert_eq!(store.last_payment_time(&account(3)).await.unwrap(), Some(101));
}

#[tokio::test]
async fn test_overrides_persist_across_gate_instances() {
    let store = InMemoryGateStore::new();
    let emitter = RecordingEmitter::new();

    let configure = TriggerEvent::new(account(1), EVENT_TYPE_INVOKE)
        .with_param(PARAM_COOLDOWN, 5u64.to_be_bytes().to_vec());
    gate(&store, &emitter).process(&configure, 50).await.unwrap();

    // A fresh gate over the same store sees the persisted override.
    let second = gate(&store, &emitter);
    second.process(&pay_event(account(2)), 100).await.unwrap();
    let outcome = second.process(&pay_event(account(2)), 104).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Declined {
            recipient: account(2),
            eligible_at: 105
        }
    );
    let outcome = second.process(&pay_event(account(2)), 105).await.unwrap();
    assert!(matches!(outcome, Outcome::Paid { .. }));
}

#[tokio::test]
async fn test_declines_touch_no_state() {
    let store = InMemoryGateStore::new();
    let emitter = RecordingEmitter::new();
    let gate = gate(&store, &emitter);

    let configure = pay_event(account(2)).with_param(PARAM_COOLDOWN, 100u64.to_be_bytes().to_vec());
    gate.process(&configure, 100).await.unwrap();

    for ledger_time in [101, 150, 199] {
        let outcome = gate.process(&pay_event(account(2)), ledger_time).await.unwrap();
        assert!(matches!(outcome, Outcome::Declined { .. }));
    }

    assert_eq!(store.last_payment_time(&account(2)).await.unwrap(), Some(100));
    assert_eq!(emitter.emitted().await.len(), 1);
}

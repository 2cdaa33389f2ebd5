use crate::error::GateError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Length of a ledger account identifier in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;

/// Event-type code of the "invoke" transaction class.
pub const EVENT_TYPE_INVOKE: u16 = 99;

/// Parameter key carrying the 20-byte payment recipient.
pub const PARAM_ADDRESS: &str = "ADDRESS";
/// Parameter key carrying a payment-amount override, in drops.
pub const PARAM_AMOUNT: &str = "XAH";
/// Parameter key carrying a cooldown override, in seconds.
pub const PARAM_COOLDOWN: &str = "SECONDS";

/// A 20-byte ledger account identifier.
///
/// Rendered as 40 hex characters for display, CSV, and logs; compared
/// byte-for-byte everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    pub fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Parses an identifier from a byte slice of exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; ACCOUNT_ID_LEN] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl FromStr for AccountId {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ACCOUNT_ID_LEN * 2 {
            return Err(GateError::Validation(format!(
                "account id must be {} hex characters, got {}",
                ACCOUNT_ID_LEN * 2,
                s.len()
            )));
        }
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| GateError::Validation("account id is not valid hex".into()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| GateError::Validation("account id is not valid hex".into()))?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountId {
    type Error = GateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

/// A single triggering event as supplied by the hosting engine.
///
/// Immutable for the duration of one invocation; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub origin: AccountId,
    pub event_type: u16,
    params: HashMap<String, Vec<u8>>,
}

impl TriggerEvent {
    pub fn new(origin: AccountId, event_type: u16) -> Self {
        Self {
            origin,
            event_type,
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: Vec<u8>) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    /// Raw bytes of a named parameter, if present.
    pub fn param(&self, key: &str) -> Option<&[u8]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// A parameter decoded as a big-endian u64.
    ///
    /// Values that are not exactly 8 bytes are treated as absent.
    pub fn param_u64(&self, key: &str) -> Option<u64> {
        let bytes: [u8; 8] = self.param(key)?.try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    /// A parameter decoded as a 20-byte account identifier.
    ///
    /// Values of any other length are treated as absent.
    pub fn param_account(&self, key: &str) -> Option<AccountId> {
        AccountId::from_slice(self.param(key)?)
    }
}

/// The Trigger Classifier's view of one event.
///
/// Pure extraction, no side effects. The two eligibility predicates are
/// kept separate so each guard is independently testable even though both
/// derive from the same classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventProfile {
    pub is_invoke: bool,
    pub is_self_originated: bool,
    pub target_recipient: Option<AccountId>,
}

impl EventProfile {
    /// Classifies an event relative to the hosting account's identity.
    pub fn classify(event: &TriggerEvent, hosting_account: &AccountId) -> Self {
        Self {
            is_invoke: event.event_type == EVENT_TYPE_INVOKE,
            is_self_originated: event.origin == *hosting_account,
            target_recipient: event.param_account(PARAM_ADDRESS),
        }
    }

    /// True when the event may update stored configuration.
    pub fn config_update_eligible(&self) -> bool {
        self.is_invoke && self.is_self_originated
    }

    /// True when the event may attempt a payment.
    pub fn payment_eligible(&self) -> bool {
        self.is_invoke && self.is_self_originated && self.target_recipient.is_some()
    }
}

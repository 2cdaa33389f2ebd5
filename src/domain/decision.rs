/// Outcome of the cooldown rule for one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Payment is allowed. `first_payment` marks a recipient with no
    /// prior record, which takes the record-then-emit path.
    Authorized { first_payment: bool },
    /// Cooldown has not elapsed; no state may be mutated.
    Declined { eligible_at: u64 },
}

/// The cooldown rule.
///
/// "Never paid" is an explicit `None`; a stored timestamp of zero is a
/// real timestamp and participates in the comparison like any other.
#[must_use]
pub fn evaluate(last_payment_time: Option<u64>, cooldown_seconds: u64, now: u64) -> Decision {
    let Some(last) = last_payment_time else {
        return Decision::Authorized {
            first_payment: true,
        };
    };
    let eligible_at = last.saturating_add(cooldown_seconds);
    if eligible_at > now {
        Decision::Declined { eligible_at }
    } else {
        Decision::Authorized {
            first_payment: false,
        }
    }
}

use super::event::AccountId;
use std::fmt;

/// A simple native-payment instruction for the emission subsystem.
///
/// Mirrors the host's fixed-shape payment template: destination, amount
/// in drops, and two tag fields the gate never populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentInstruction {
    pub destination: AccountId,
    pub amount: u64,
    pub destination_tag: u32,
    pub source_tag: u32,
}

impl PaymentInstruction {
    pub fn native(destination: AccountId, amount: u64) -> Self {
        Self {
            destination,
            amount,
            destination_tag: 0,
            source_tag: 0,
        }
    }
}

/// Opaque handle returned by the emission subsystem for one submitted
/// transaction. The gate records it but never inspects its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitHandle(pub [u8; 32]);

impl fmt::Display for EmitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::ACCOUNT_ID_LEN;

    #[test]
    fn test_native_payment_leaves_tags_unset() {
        let dest = AccountId::new([7; ACCOUNT_ID_LEN]);
        let payment = PaymentInstruction::native(dest, 500_000);
        assert_eq!(payment.destination, dest);
        assert_eq!(payment.amount, 500_000);
        assert_eq!(payment.destination_tag, 0);
        assert_eq!(payment.source_tag, 0);
    }
}

use crate::domain::config::GateConfig;
use crate::domain::event::AccountId;
use crate::error::Result;
use std::io::Write;

/// Writes the gate's final state as `key,value` CSV.
///
/// The two config scalars come first, followed by one row per recipient
/// (hex identifier, last payment time), mirroring the three key classes
/// of the durable layout.
pub struct StateWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StateWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_state(
        &mut self,
        config: &GateConfig,
        recipients: &[(AccountId, u64)],
    ) -> Result<()> {
        self.writer.write_record(["key", "value"])?;
        self.writer
            .write_record(["payment_amount".to_string(), config.payment_amount.to_string()])?;
        self.writer
            .write_record(["cooldown_seconds".to_string(), config.cooldown_seconds.to_string()])?;
        for (recipient, last_payment_time) in recipients {
            self.writer
                .write_record([recipient.to_string(), last_payment_time.to_string()])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

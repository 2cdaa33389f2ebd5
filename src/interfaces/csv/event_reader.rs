use crate::domain::event::{
    AccountId, TriggerEvent, PARAM_ADDRESS, PARAM_AMOUNT, PARAM_COOLDOWN,
};
use crate::error::{GateError, Result};
use serde::Deserialize;
use std::io::Read;

/// One replay row: a ledger time plus the triggering event observed at it.
///
/// `address` is hex of any length; length validation belongs to the
/// classifier, so malformed recipients flow through as raw parameter
/// bytes rather than failing the row.
#[derive(Debug, Deserialize)]
struct EventRecord {
    time: u64,
    origin: AccountId,
    r#type: u16,
    address: Option<String>,
    xah: Option<u64>,
    seconds: Option<u64>,
}

impl EventRecord {
    fn into_event(self) -> Result<(u64, TriggerEvent)> {
        let mut event = TriggerEvent::new(self.origin, self.r#type);
        if let Some(address) = &self.address {
            event = event.with_param(PARAM_ADDRESS, decode_hex(address)?);
        }
        if let Some(drops) = self.xah {
            event = event.with_param(PARAM_AMOUNT, drops.to_be_bytes().to_vec());
        }
        if let Some(seconds) = self.seconds {
            event = event.with_param(PARAM_COOLDOWN, seconds.to_be_bytes().to_vec());
        }
        Ok((self.time, event))
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(GateError::Validation(format!(
            "hex value has odd length {}",
            s.len()
        )));
    }
    s.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|p| u8::from_str_radix(p, 16).ok())
                .ok_or_else(|| GateError::Validation(format!("invalid hex value: {s}")))
        })
        .collect()
}

/// Reads trigger events from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over
/// `Result<(ledger_time, TriggerEvent)>`, trimming whitespace and
/// tolerating flexible record lengths.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and decodes events, allowing
    /// large replay files to stream without loading them whole.
    pub fn events(self) -> impl Iterator<Item = Result<(u64, TriggerEvent)>> {
        self.reader
            .into_deserialize()
            .map(|result: std::result::Result<EventRecord, csv::Error>| {
                result.map_err(GateError::from)?.into_event()
            })
    }
}

/// 40-hex-character account identifier made of one repeated byte.
pub fn account_hex(byte: u8) -> String {
    format!("{byte:02X}").repeat(20)
}

/// The replay CSV header.
pub const EVENTS_HEADER: &str = "time, origin, type, address, xah, seconds";

/// Renders one invoke-class (type 99) event row.
pub fn invoke_row(
    time: u64,
    origin: &str,
    address: Option<&str>,
    xah: Option<u64>,
    seconds: Option<u64>,
) -> String {
    event_row(time, origin, 99, address, xah, seconds)
}

pub fn event_row(
    time: u64,
    origin: &str,
    event_type: u16,
    address: Option<&str>,
    xah: Option<u64>,
    seconds: Option<u64>,
) -> String {
    format!(
        "{time}, {origin}, {event_type}, {}, {}, {}",
        address.unwrap_or(""),
        xah.map(|v| v.to_string()).unwrap_or_default(),
        seconds.map(|v| v.to_string()).unwrap_or_default(),
    )
}

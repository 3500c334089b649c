use std::io::{self, Write};

/// Render `data` as `<prefix> 0xNN 0xNN ...`. An empty buffer gives just the prefix.
pub fn format_bytes(prefix: &str, data: &[u8]) -> String {
    let bytes: String = data.iter().map(|byte| format!(" 0x{:02x}", byte)).collect();
    format!("{}{}", prefix, bytes)
}

/// Write one formatted line to `out`.
pub fn print_bytes(out: &mut dyn Write, prefix: &str, data: &[u8]) -> io::Result<()> {
    writeln!(out, "{}", format_bytes(prefix, data))
}

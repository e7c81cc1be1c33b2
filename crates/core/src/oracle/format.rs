//! Byte and text decoding for the log oracles.
//!
//! Both log oracles pass strings as one field per character, with the
//! character in the trailing byte of the field.
use crate::field::Fr;

/// Reassembles an unencrypted log from the trailing byte of each field.
pub fn pack_unencrypted_log(fields: &[Fr]) -> Vec<u8> {
    fields.iter().map(Fr::trailing_byte).collect()
}

/// Formats the fields of a `debugLog` call.
///
/// Layout: `[n, chars…, args…]` where `n` counts the trailing arguments.
/// Each `{}` in the message takes the next argument; leftovers are appended.
/// If `n` is larger than what follows, every field after the first is text.
pub fn format_debug_log(fields: &[Fr]) -> String {
    let Some((count, rest)) = fields.split_first() else {
        return String::new();
    };

    let arg_count = count
        .to_u64()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n <= rest.len())
        .unwrap_or(0);
    let (chars, args) = rest.split_at(rest.len() - arg_count);

    let message = String::from_utf8_lossy(&pack_unencrypted_log(chars)).into_owned();
    let mut args = args.iter();
    let mut formatted = String::with_capacity(message.len());
    let mut pieces = message.split("{}").peekable();
    while let Some(piece) = pieces.next() {
        formatted.push_str(piece);
        if pieces.peek().is_some() {
            match args.next() {
                Some(arg) => formatted.push_str(&arg.to_string()),
                None => formatted.push_str("{}"),
            }
        }
    }
    for arg in args {
        formatted.push(' ');
        formatted.push_str(&arg.to_string());
    }
    formatted
}

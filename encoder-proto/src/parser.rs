//! Inbound command parsing for the line-delimited JSON protocol.
//!
//! One JSON object per line. Only three shapes are recognized:
//!
//! ```text
//! {"type":"reset","position":<int>}   position optional, default 0
//! {"type":"ping"}
//! {"type":"led","on":<bool>}          on optional, default false
//! ```
//!
//! Everything else — malformed JSON, a missing or unrecognized `type`, a
//! known field carrying the wrong value type — is an error the caller is
//! expected to discard: the transport may deliver partial or noise lines,
//! and a bad line must never disturb the poll loop or produce a reply.

use crate::types::Command;

/// Maximum accepted line length, matching the transport receive buffer cap.
pub const MAX_LINE_LENGTH: usize = 256;

/// Error type for command parsing.
///
/// All variants are handled identically by production callers (the line is
/// dropped); they are distinguished so tests can tell outcomes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Nothing left after trimming whitespace.
    Empty,
    /// Not a well-formed flat JSON object.
    Malformed,
    /// Well-formed object, but `type` is missing or names no known command.
    UnknownType,
}

/// Parse one line into a [`Command`].
///
/// Leading and trailing ASCII whitespace (including any line terminator the
/// transport left attached) is stripped before parsing. Unknown fields are
/// tolerated and skipped; unknown `type` values are rejected with
/// [`ParseError::UnknownType`] so senders of future message kinds get
/// silence rather than a crash.
///
/// # Example
///
/// ```
/// use encoder_proto::{parse_command, Command};
///
/// let cmd = parse_command(b"{\"type\":\"reset\",\"position\":5}\n").unwrap();
/// assert_eq!(cmd, Command::Reset { position: 5 });
/// ```
pub fn parse_command(line: &[u8]) -> Result<Command, ParseError> {
    let line = trim_ascii(line);
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut kind: Option<&[u8]> = None;
    let mut position: Option<i64> = None;
    let mut on: Option<bool> = None;

    let mut s = Scanner::new(line);
    s.expect(b'{')?;
    s.skip_whitespace();
    if !s.consume(b'}') {
        loop {
            s.skip_whitespace();
            let key = s.string()?;
            s.skip_whitespace();
            s.expect(b':')?;
            s.skip_whitespace();
            let value = s.value()?;
            match key {
                b"type" => match value {
                    Value::Str(v) => kind = Some(v),
                    _ => return Err(ParseError::Malformed),
                },
                b"position" => match value {
                    Value::Int(v) => position = Some(v),
                    _ => return Err(ParseError::Malformed),
                },
                b"on" => match value {
                    Value::Bool(v) => on = Some(v),
                    _ => return Err(ParseError::Malformed),
                },
                // Unknown field: the value has already been consumed.
                _ => {}
            }
            s.skip_whitespace();
            match s.next() {
                Some(b',') => continue,
                Some(b'}') => break,
                _ => return Err(ParseError::Malformed),
            }
        }
    }
    s.skip_whitespace();
    if !s.at_end() {
        return Err(ParseError::Malformed);
    }

    match kind {
        Some(b"reset") => {
            let position = match position {
                Some(v) => i32::try_from(v).map_err(|_| ParseError::Malformed)?,
                None => 0,
            };
            Ok(Command::Reset { position })
        }
        Some(b"ping") => Ok(Command::Ping),
        Some(b"led") => Ok(Command::SetLed {
            on: on.unwrap_or(false),
        }),
        _ => Err(ParseError::UnknownType),
    }
}

/// A JSON scalar. Objects and arrays never occur in this protocol.
enum Value<'a> {
    Str(&'a [u8]),
    Int(i64),
    Bool(bool),
    Null,
}

/// Byte cursor over a single line.
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.next() == Some(byte) {
            Ok(())
        } else {
            Err(ParseError::Malformed)
        }
    }

    fn consume(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Quoted string; returns the raw bytes between the quotes.
    ///
    /// Escape sequences are skipped over, not decoded — no recognized key or
    /// command name contains one, and undecoded strings simply fail to match.
    fn string(&mut self) -> Result<&'a [u8], ParseError> {
        self.expect(b'"')?;
        let start = self.pos;
        loop {
            match self.next() {
                Some(b'"') => return Ok(&self.input[start..self.pos - 1]),
                Some(b'\\') => {
                    self.next().ok_or(ParseError::Malformed)?;
                }
                Some(_) => {}
                None => return Err(ParseError::Malformed),
            }
        }
    }

    fn value(&mut self) -> Result<Value<'a>, ParseError> {
        match self.peek().ok_or(ParseError::Malformed)? {
            b'"' => self.string().map(Value::Str),
            b'-' | b'0'..=b'9' => self.integer().map(Value::Int),
            b't' => self.literal(b"true").map(|()| Value::Bool(true)),
            b'f' => self.literal(b"false").map(|()| Value::Bool(false)),
            b'n' => self.literal(b"null").map(|()| Value::Null),
            _ => Err(ParseError::Malformed),
        }
    }

    /// Signed integer. Fractions and exponents are rejected: the digits stop
    /// at the `.` or `e`, which then fails as an unexpected separator.
    fn integer(&mut self) -> Result<i64, ParseError> {
        let negative = self.consume(b'-');
        let mut value: i64 = 0;
        let mut digits = 0usize;
        while let Some(byte @ b'0'..=b'9') = self.peek() {
            self.pos += 1;
            digits += 1;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(byte - b'0')))
                .ok_or(ParseError::Malformed)?;
        }
        if digits == 0 {
            return Err(ParseError::Malformed);
        }
        Ok(if negative { -value } else { value })
    }

    fn literal(&mut self, expected: &[u8]) -> Result<(), ParseError> {
        for &byte in expected {
            self.expect(byte)?;
        }
        Ok(())
    }
}

/// Trim leading and trailing ASCII whitespace.
fn trim_ascii(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reset_with_position() {
        let cmd = parse_command(b"{\"type\":\"reset\",\"position\":5}").unwrap();
        assert_eq!(cmd, Command::Reset { position: 5 });
    }

    #[test]
    fn test_parse_reset_default_position() {
        let cmd = parse_command(b"{\"type\":\"reset\"}").unwrap();
        assert_eq!(cmd, Command::Reset { position: 0 });
    }

    #[test]
    fn test_parse_reset_negative_position() {
        let cmd = parse_command(b"{\"type\":\"reset\",\"position\":-250}").unwrap();
        assert_eq!(cmd, Command::Reset { position: -250 });
    }

    #[test]
    fn test_parse_ping() {
        assert_eq!(parse_command(b"{\"type\":\"ping\"}"), Ok(Command::Ping));
    }

    #[test]
    fn test_parse_led_on() {
        let cmd = parse_command(b"{\"type\":\"led\",\"on\":true}").unwrap();
        assert_eq!(cmd, Command::SetLed { on: true });
    }

    #[test]
    fn test_parse_led_off() {
        let cmd = parse_command(b"{\"type\":\"led\",\"on\":false}").unwrap();
        assert_eq!(cmd, Command::SetLed { on: false });
    }

    #[test]
    fn test_parse_led_default_off() {
        let cmd = parse_command(b"{\"type\":\"led\"}").unwrap();
        assert_eq!(cmd, Command::SetLed { on: false });
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_command(b"garbage"), Err(ParseError::Malformed));
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(
            parse_command(b"{\"type\":\"unknown\"}"),
            Err(ParseError::UnknownType)
        );
    }

    #[test]
    fn test_parse_missing_type() {
        assert_eq!(
            parse_command(b"{\"position\":3}"),
            Err(ParseError::UnknownType)
        );
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_command(b""), Err(ParseError::Empty));
        assert_eq!(parse_command(b"  \r\n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_strips_line_terminator() {
        let cmd = parse_command(b"{\"type\":\"ping\"}\r\n").unwrap();
        assert_eq!(cmd, Command::Ping);
    }

    #[test]
    fn test_parse_interior_whitespace() {
        let cmd = parse_command(b"{ \"type\" : \"reset\" , \"position\" : 42 }").unwrap();
        assert_eq!(cmd, Command::Reset { position: 42 });
    }

    #[test]
    fn test_parse_field_order_irrelevant() {
        let cmd = parse_command(b"{\"position\":7,\"type\":\"reset\"}").unwrap();
        assert_eq!(cmd, Command::Reset { position: 7 });
    }

    #[test]
    fn test_parse_unknown_fields_skipped() {
        let cmd = parse_command(b"{\"type\":\"ping\",\"seq\":12,\"tag\":null,\"dbg\":\"x\"}").unwrap();
        assert_eq!(cmd, Command::Ping);
    }

    #[test]
    fn test_parse_wrong_typed_position() {
        assert_eq!(
            parse_command(b"{\"type\":\"reset\",\"position\":\"5\"}"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_wrong_typed_on() {
        assert_eq!(
            parse_command(b"{\"type\":\"led\",\"on\":1}"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_position_out_of_range() {
        assert_eq!(
            parse_command(b"{\"type\":\"reset\",\"position\":4294967296}"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_fractional_position_rejected() {
        assert_eq!(
            parse_command(b"{\"type\":\"reset\",\"position\":1.5}"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_truncated_object() {
        assert_eq!(
            parse_command(b"{\"type\":\"ping\""),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_trailing_garbage() {
        assert_eq!(
            parse_command(b"{\"type\":\"ping\"} extra"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_nested_value_rejected() {
        // The protocol is flat; a nested object is treated as noise.
        assert_eq!(
            parse_command(b"{\"type\":\"ping\",\"meta\":{\"a\":1}}"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(parse_command(b"{}"), Err(ParseError::UnknownType));
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let cmd = parse_command(b"{\"type\":\"reset\",\"position\":1,\"position\":9}").unwrap();
        assert_eq!(cmd, Command::Reset { position: 9 });
    }
}

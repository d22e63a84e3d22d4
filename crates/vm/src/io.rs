//! Standard stream collaborators.
//!
//! The VM talks to the outside world through a borrowed `BufRead` and a
//! borrowed `Write`, so tests can wire in in-memory buffers and the CLI can
//! wire in locked stdin/stdout. End of input is never an error: the helpers
//! return `None` (or an empty string) and the commands turn that into their
//! in-band sentinel.

use std::io::{self, BufRead, Read, Write};

/// Read one raw byte.
pub fn read_byte<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    let byte = match input.fill_buf()?.first() {
        Some(&byte) => byte,
        None => return Ok(None),
    };
    input.consume(1);
    Ok(Some(byte))
}

/// Peek at the next byte without consuming it.
fn peek_byte<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    Ok(input.fill_buf()?.first().copied())
}

/// Read one UTF-8 encoded character.
///
/// Malformed sequences decode to U+FFFD, consuming the lead byte and any
/// continuation bytes that follow it.
pub fn read_char<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<char>> {
    let Some(lead) = read_byte(input)? else {
        return Ok(None);
    };

    let len = match lead {
        0x00..=0x7F => return Ok(Some(lead as char)),
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
    };

    let mut bytes = vec![lead];
    while bytes.len() < len {
        match peek_byte(input)? {
            Some(byte @ 0x80..=0xBF) => {
                input.consume(1);
                bytes.push(byte);
            }
            _ => break,
        }
    }

    Ok(Some(
        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    ))
}

/// Read one line without its terminator (`\n` or `\r\n`).
pub fn read_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Read everything that is left.
pub fn read_all<R: BufRead + ?Sized>(input: &mut R) -> io::Result<String> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write one Unicode scalar as UTF-8.
pub fn write_char<W: Write + ?Sized>(output: &mut W, c: char) -> io::Result<()> {
    let mut buf = [0u8; 4];
    output.write_all(c.encode_utf8(&mut buf).as_bytes())
}

/// Write one raw byte.
pub fn write_byte<W: Write + ?Sized>(output: &mut W, byte: u8) -> io::Result<()> {
    output.write_all(&[byte])
}

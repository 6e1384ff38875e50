// SPDX-License-Identifier: MIT
//
// Terminal input decoder.
//
// Turns raw stdin bytes into the editor's [`Key`]s. The editor only knows
// four kinds of key (printable characters, Escape, Enter, Backspace), so
// everything else the terminal might send is consumed and dropped:
//
// - CSI sequences (`ESC [` params final), e.g. arrow and function keys
// - SS3 sequences (`ESC O` final), the alternate F1-F4 / arrow encoding
// - C0 control bytes other than CR, LF, BS, DEL and ESC
// - Invalid UTF-8
//
// CR is Enter, and so is LF on its own. An LF right after a CR is the
// second half of a CRLF line ending (pasted text) and is dropped, even when
// the two bytes land in different reads.
//
// # Design
//
// The decoder keeps a small byte buffer because a multi-byte character or
// an escape sequence can straddle two `read()` calls. Feed bytes with
// [`Decoder::advance`] and take the returned keys.
//
// The loop is synchronous, with no read timeout, so a lone ESC at the end
// of a chunk is resolved as the Escape key right away. Terminals write
// a whole escape sequence in one go, so `ESC [` arriving split across
// reads is rare; when it does happen the partial sequence is held.

use mite_editor::Key;

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Byte-to-[`Key`] decoder with carry-over for partial input.
#[derive(Debug)]
pub struct Decoder {
    /// Raw bytes not yet turned into keys.
    buf: Vec<u8>,

    /// The last byte consumed was a CR.
    after_cr: bool,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
            after_cr: false,
        }
    }

    /// Feed raw bytes and return every key that can be decoded.
    ///
    /// Incomplete UTF-8 and incomplete escape sequences stay buffered for
    /// the next call. A lone trailing ESC does not: it is the Escape key.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Key> {
        self.buf.extend_from_slice(data);
        let mut keys = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            let byte = self.buf[pos];
            if byte == b'\n' && self.after_cr {
                self.after_cr = false;
                pos += 1;
                continue;
            }
            match decode_one(&self.buf[pos..]) {
                Decoded::Key(key, consumed) => {
                    keys.push(key);
                    pos += consumed;
                }
                Decoded::Skip(n) => pos += n,
                Decoded::Incomplete => break,
            }
            self.after_cr = byte == b'\r';
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        keys
    }

    /// Drop whatever is buffered. Called at end of input, where a partial
    /// sequence can never complete.
    pub fn flush(&mut self) {
        self.after_cr = false;
        if !self.buf.is_empty() {
            log::debug!("dropping {} undecoded input bytes", self.buf.len());
            self.buf.clear();
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Decoding ─────────────────────────────────────────────────────

/// Result of decoding from the front of the buffer.
#[derive(Debug, PartialEq, Eq)]
enum Decoded {
    /// A key, consuming `usize` bytes.
    Key(Key, usize),
    /// Bytes that produce no key.
    Skip(usize),
    /// Need more bytes.
    Incomplete,
}

fn decode_one(buf: &[u8]) -> Decoded {
    match buf[0] {
        0x1B => decode_escape(buf),
        b @ 0x00..=0x7F => {
            Key::from_char(char::from(b)).map_or(Decoded::Skip(1), |key| Decoded::Key(key, 1))
        }
        _ => decode_utf8(buf),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn decode_escape(buf: &[u8]) -> Decoded {
    debug_assert_eq!(buf[0], 0x1B);

    match buf.get(1) {
        None => Decoded::Key(Key::Escape, 1),
        Some(b'[') => skip_csi(buf),
        Some(b'O') => match buf.get(2) {
            None => Decoded::Incomplete,
            Some(_) => Decoded::Skip(3),
        },
        // Anything else was typed after Escape; decode it on its own.
        Some(_) => Decoded::Key(Key::Escape, 1),
    }
}

/// Consume `ESC [` parameter bytes, intermediate bytes and one final byte.
fn skip_csi(buf: &[u8]) -> Decoded {
    for (i, &b) in buf.iter().enumerate().skip(2) {
        match b {
            // Parameters and intermediates.
            0x20..=0x3F => {}
            // Final byte.
            0x40..=0x7E => return Decoded::Skip(i + 1),
            // Malformed: drop the introducer and resync on this byte.
            _ => return Decoded::Skip(i),
        }
    }
    Decoded::Incomplete
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn decode_utf8(buf: &[u8]) -> Decoded {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Decoded::Skip(1);
    }

    let available = buf.len().min(expected);
    if buf[1..available].iter().any(|&b| b & 0xC0 != 0x80) {
        return Decoded::Skip(1);
    }
    if buf.len() < expected {
        return Decoded::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .and_then(Key::from_char)
        .map_or(Decoded::Skip(expected), |key| Decoded::Key(key, expected))
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for continuation bytes and invalid leads.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

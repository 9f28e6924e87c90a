//! Scancode decoding.
//!
//! Converts raw set-1 scancodes to characters, tracking the shift modifier
//! across make/break events. Decoding is a pure function of the scancode and
//! the modifier bit; only the shift make/break cases mutate anything.

/// Left shift make code.
const LEFT_SHIFT_MAKE: u8 = 0x2A;
/// Right shift make code.
const RIGHT_SHIFT_MAKE: u8 = 0x36;
/// Left shift break code.
const LEFT_SHIFT_BREAK: u8 = 0xAA;
/// Right shift break code.
const RIGHT_SHIFT_BREAK: u8 = 0xB6;
/// Backspace make code.
const BACKSPACE_MAKE: u8 = 0x0E;
/// Break codes carry the high bit.
const BREAK_BIT: u8 = 0x80;

/// The character backspace decodes to.
pub const BACKSPACE_CHAR: u8 = 0x08;

/// Characters for unshifted keys, indexed by scancode. Zero entries are keys
/// this console does not react to.
#[rustfmt::skip]
pub static UNSHIFTED: [u8; 59] = [
    0, 0, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0, 0,
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n', 0,
    b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, b'\\',
    b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, 0, 0, b' ', 0,
];

/// Characters for shifted keys, indexed by scancode.
#[rustfmt::skip]
pub static SHIFTED: [u8; 59] = [
    0, 0, b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*', b'(', b')', b'_', b'+', 0, 0,
    b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', b'O', b'P', b'{', b'}', b'\n', 0,
    b'A', b'S', b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':', b'"', b'~', 0, b'|',
    b'Z', b'X', b'C', b'V', b'B', b'N', b'M', b'<', b'>', b'?', 0, 0, 0, b' ', 0,
];

/// Scancode-to-character decoder.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    shift: bool,
}

impl KeyDecoder {
    /// Creates a decoder with the shift modifier released.
    pub const fn new() -> Self {
        KeyDecoder { shift: false }
    }

    /// Whether the shift modifier is currently held.
    pub fn shift_active(&self) -> bool {
        self.shift
    }

    /// Decodes one scancode into a character, if it produces one.
    ///
    /// Shift make/break events update the modifier and yield nothing. Break
    /// events for ordinary keys are ignored; this console only reacts to
    /// key-down. Backspace decodes regardless of the modifier. Everything
    /// else goes through the table selected by the modifier; out-of-range
    /// codes and zero entries yield nothing.
    pub fn decode(&mut self, scancode: u8) -> Option<u8> {
        match scancode {
            LEFT_SHIFT_MAKE | RIGHT_SHIFT_MAKE => {
                self.shift = true;
                None
            }
            LEFT_SHIFT_BREAK | RIGHT_SHIFT_BREAK => {
                self.shift = false;
                None
            }
            BACKSPACE_MAKE => Some(BACKSPACE_CHAR),
            sc if sc & BREAK_BIT != 0 => None,
            sc => {
                let table = if self.shift { &SHIFTED } else { &UNSHIFTED };
                match table.get(sc as usize) {
                    Some(&ch) if ch != 0 => Some(ch),
                    _ => None,
                }
            }
        }
    }
}

//! Line-buffered shell.
//!
//! Collects decoded characters into a bounded line buffer, echoes them, and
//! dispatches completed lines to the command layer.

use super::commands::Command;
use super::keyboard::{KeyDecoder, BACKSPACE_CHAR};
use crate::probe::Machine;
use core::fmt::Write as _;
use ferrox_common::ClockTime;
use ferrox_hal::{Console, CpuLeaves, MemoryCells, PortIo};

/// Line buffer capacity in bytes. One slot stays in reserve, so at most 79
/// characters are ever stored.
pub const LINE_CAPACITY: usize = 80;

/// Bounded command line buffer with checked append.
///
/// Characters past the capacity are silently discarded; the buffer can never
/// overflow.
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        LineBuffer {
            bytes: [0; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Appends one character. Returns false, dropping it, when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len < LINE_CAPACITY - 1 {
            self.bytes[self.len] = byte;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Removes the last character. Returns false when already empty.
    pub fn pop(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Number of characters collected so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards the collected characters.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The collected line as text.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One interactive session.
///
/// Owns the line buffer, the keyboard modifier state, and the boot time
/// snapshot; the polling loop passes the console and machine in by
/// reference on every event.
pub struct Shell {
    line: LineBuffer,
    keys: KeyDecoder,
    boot_time: ClockTime,
}

impl Shell {
    /// Creates a session with the given boot time snapshot.
    pub fn new(boot_time: ClockTime) -> Self {
        Shell {
            line: LineBuffer::new(),
            keys: KeyDecoder::new(),
            boot_time,
        }
    }

    /// Displays the prompt.
    pub fn prompt(&self, con: &mut impl Console) {
        let _ = con.write_str("> ");
    }

    /// Feeds one raw scancode through decoding and line handling.
    pub fn handle_scancode<W, P, C, M>(
        &mut self,
        scancode: u8,
        con: &mut W,
        machine: &mut Machine<P, C, M>,
    ) where
        W: Console,
        P: PortIo,
        C: CpuLeaves,
        M: MemoryCells,
    {
        if let Some(ch) = self.keys.decode(scancode) {
            self.handle_char(ch, con, machine);
        }
    }

    /// Applies one decoded character to the line buffer.
    ///
    /// Newline dispatches the collected line and resets the buffer; the
    /// session is immediately ready to collect the next one.
    pub fn handle_char<W, P, C, M>(&mut self, ch: u8, con: &mut W, machine: &mut Machine<P, C, M>)
    where
        W: Console,
        P: PortIo,
        C: CpuLeaves,
        M: MemoryCells,
    {
        match ch {
            b'\n' => {
                let _ = con.write_str("\n");
                if let Some(command) = Command::parse(self.line.as_str()) {
                    command.execute(con, machine, self.boot_time);
                }
                self.line.clear();
                self.prompt(con);
            }
            BACKSPACE_CHAR => {
                if self.line.pop() {
                    con.backspace();
                }
            }
            ch => {
                if self.line.push(ch) {
                    let _ = write!(con, "{}", ch as char);
                }
            }
        }
    }

    /// The line collected so far, for inspection.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }
}

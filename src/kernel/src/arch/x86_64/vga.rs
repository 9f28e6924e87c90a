//! VGA text mode driver for x86_64.
//!
//! Provides colored text output to the VGA text buffer at 0xB8000. The writer
//! tracks a single linear cursor over the whole 80x25 grid and scrolls one
//! row when the cursor runs off the end.

use core::fmt;
use core::ptr;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// Total number of character cells in the grid.
const BUFFER_CELLS: usize = BUFFER_WIDTH * BUFFER_HEIGHT;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
struct ColorCode(u8);

impl ColorCode {
    /// Creates a new color code from foreground and background colors.
    const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

/// A single character cell in the VGA buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// VGA text mode writer.
///
/// Owns the cursor position and color state. The kernel main loop holds the
/// one live instance and passes it by reference into the shell; nothing else
/// writes to the buffer while the session runs.
pub struct Writer {
    /// Linear cursor in cell units, always in [0, BUFFER_CELLS].
    cursor: usize,
    /// Current color code for new characters.
    color_code: ColorCode,
    /// Pointer to the VGA buffer.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    buffer: *mut Buffer,
}

// SAFETY: Writer only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
unsafe impl Send for Writer {}

impl Writer {
    /// Creates a new VGA writer with the cursor at the top-left cell.
    ///
    /// The panic path may construct a second instance over the same buffer;
    /// that is the only moment two writers can alias, and the session one is
    /// dead by then.
    pub fn new() -> Self {
        Writer {
            cursor: 0,
            color_code: ColorCode::new(Color::White, Color::Black),
            // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text buffer
            // address on x86 systems. This memory is always present and mapped
            // when running on x86 hardware or in QEMU.
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
        }
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// Writes a single byte at the cursor.
    ///
    /// A newline moves the cursor to the start of the next row; anything else
    /// is stored with the current attribute and advances the cursor one cell.
    /// Running off the last cell scrolls the grid one row.
    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.cursor = (self.cursor / BUFFER_WIDTH + 1) * BUFFER_WIDTH;
            }
            byte => {
                self.put_char(self.cursor, byte);
                self.cursor += 1;
            }
        }
        if self.cursor >= BUFFER_CELLS {
            self.scroll_up();
        }
    }

    /// Erases the cell before the cursor; no-op at the top-left corner.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.put_char(self.cursor, b' ');
        }
    }

    /// Stores one character cell at a linear cell index.
    fn put_char(&mut self, cell: usize, byte: u8) {
        debug_assert!(cell < BUFFER_CELLS, "cell index out of bounds");

        let row = cell / BUFFER_WIDTH;
        let col = cell % BUFFER_WIDTH;
        // SAFETY: cell < BUFFER_CELLS, so row < BUFFER_HEIGHT and
        // col < BUFFER_WIDTH. The buffer pointer was validated at construction
        // time. Using volatile write because the VGA buffer is memory-mapped
        // I/O that may be read by hardware at any time.
        unsafe {
            ptr::write_volatile(
                &mut (*self.buffer).chars[row][col],
                ScreenChar {
                    ascii_character: byte,
                    color_code: self.color_code,
                },
            );
        }
    }

    /// Scrolls the grid up by one row and parks the cursor on the blank row.
    fn scroll_up(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                // SAFETY: row is in range [1, BUFFER_HEIGHT), col is in range
                // [0, BUFFER_WIDTH). row-1 is in range [0, BUFFER_HEIGHT-1).
                // Using volatile operations because the VGA buffer is
                // memory-mapped I/O.
                unsafe {
                    let character = ptr::read_volatile(&(*self.buffer).chars[row][col]);
                    ptr::write_volatile(&mut (*self.buffer).chars[row - 1][col], character);
                }
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
        self.cursor = (BUFFER_HEIGHT - 1) * BUFFER_WIDTH;
    }

    /// Clears a single row by filling it with spaces.
    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");

        for col in 0..BUFFER_WIDTH {
            // SAFETY: row is asserted to be < BUFFER_HEIGHT, col is in
            // [0, BUFFER_WIDTH). Using volatile write because the VGA buffer
            // is memory-mapped I/O.
            unsafe {
                ptr::write_volatile(
                    &mut (*self.buffer).chars[row][col],
                    ScreenChar {
                        ascii_character: b' ',
                        color_code: self.color_code,
                    },
                );
            }
        }
    }

    /// Clears the entire screen and resets the cursor.
    pub fn clear_screen(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.cursor = 0;
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => self.write_byte(byte),
                // Non-printable: show placeholder
                _ => self.write_byte(0xfe),
            }
        }
        Ok(())
    }
}

impl ferrox_hal::Console for Writer {
    fn clear(&mut self) {
        self.clear_screen();
    }

    fn backspace(&mut self) {
        Writer::backspace(self);
    }
}

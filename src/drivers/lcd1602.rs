// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 16x2 character LCD behind a PCF8574 I2C backpack (address 0x27).
//!
//! [`StatusDisplay`] renders each telemetry snapshot as two lines:
//!
//! ```text
//! Cruise S:40
//! R:15 P:102 D:33
//! ```
//!
//! Rate and distance are shown as whole numbers (truncated). Lines longer than the panel are cut
//! at 16 columns.
//!
//! Wiring:
//! - VCC: 5 V
//! - SDA / SCL: I2C1 (open drain, pull-ups on the backpack)
//! - GND

use core::fmt::Write;

use heapless::String;
use lcd1602_driver::command::State;
use lcd1602_driver::lcd::{Basic, Ext};

use crate::control::{Telemetry, TelemetrySink};

/// 7-bit I2C address of the backpack.
pub const LCD_ADDRESS: u8 = 0x27;

/// Visible columns per line.
pub const LCD_COLUMNS: usize = 16;

/// One rendered display line.
pub type Line = String<LCD_COLUMNS>;

/// Minimal line-oriented view of a character display.
pub trait TwoLineDisplay {
    fn clear(&mut self);

    /// Write `text` starting at column 0 of `row` (0 or 1).
    fn write_line(&mut self, row: u8, text: &str);
}

/// Adapter from an `lcd1602_driver` LCD to [`TwoLineDisplay`].
pub struct Lcd1602Panel<L> {
    lcd: L,
}

impl<L: Basic + Ext> Lcd1602Panel<L> {
    pub fn new(mut lcd: L) -> Self {
        lcd.set_cursor_blink_state(State::Off);
        lcd.clean_display();
        Self { lcd }
    }

    pub fn free(self) -> L {
        self.lcd
    }
}

impl<L: Basic + Ext> TwoLineDisplay for Lcd1602Panel<L> {
    fn clear(&mut self) {
        self.lcd.clean_display();
    }

    fn write_line(&mut self, row: u8, text: &str) {
        self.lcd.set_cursor_pos((0, row));
        self.lcd.write_str_to_cur(text);
    }
}

/// Render `args` into one panel line, cutting at [`LCD_COLUMNS`].
fn render(args: core::fmt::Arguments<'_>) -> Line {
    let mut wide: String<{ LCD_COLUMNS * 2 }> = String::new();
    let _ = wide.write_fmt(args);
    wide.truncate(LCD_COLUMNS);

    let mut line = Line::new();
    let _ = line.push_str(&wide);
    line
}

/// The two status lines for `t`.
pub fn status_lines(t: &Telemetry) -> (Line, Line) {
    let top = render(format_args!("{:<7}S:{}", t.mode, t.commanded_speed));
    let bottom = render(format_args!(
        "R:{} P:{} D:{}",
        t.rate_rpm as i32, t.drive_intensity, t.distance_cm as i32
    ));
    (top, bottom)
}

/// Telemetry sink that refreshes a two-line display.
pub struct StatusDisplay<D> {
    display: D,
}

impl<D: TwoLineDisplay> StatusDisplay<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    /// Clear the panel and show `text` on the top line.
    pub fn banner(&mut self, text: &str) {
        self.display.clear();
        self.display.write_line(0, text);
    }

    pub fn panel(&self) -> &D {
        &self.display
    }

    pub fn free(self) -> D {
        self.display
    }
}

impl<D: TwoLineDisplay> TelemetrySink for StatusDisplay<D> {
    fn publish(&mut self, telemetry: &Telemetry) {
        let (top, bottom) = status_lines(telemetry);
        self.display.clear();
        self.display.write_line(0, &top);
        self.display.write_line(1, &bottom);
    }
}

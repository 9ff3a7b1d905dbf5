//! SSD1306 status display driver (128x64, I2C).
//!
//! Renders one [`DisplayFrame`] per cycle: a status header (with link
//! state on networked nodes), the OPTIMAL/DANGER banner, and the detail
//! lines. Text is drawn with a minimal built-in 5x7 glyph subset —
//! enough for the fixed banners plus numeric readouts.
//!
//! Init failure is not fatal: the driver marks itself not-ready, render
//! calls become no-ops, and the monitor loop keeps running with a blank
//! panel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: streams command/data transactions through the hw_init
//! I2C helpers. On host/test: tracks the last frame in-memory only.

use core::fmt::Write as _;

use log::warn;

use crate::actuators::{Banner, DisplayFrame};
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins::DISPLAY_I2C_ADDR;

#[cfg(target_os = "espidf")]
const INIT_SEQUENCE: &[u8] = &[
    0x00, // control: command stream
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex = 64
    0xD3, 0x00, // display offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan direction
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // precharge
    0xDB, 0x40, // VCOM detect
    0xA4, // resume from RAM
    0xA6, // normal (non-inverted)
    0xAF, // display on
];

pub struct StatusDisplay {
    addr: u8,
    ready: bool,
    last_frame: Option<DisplayFrame>,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self {
            addr: DISPLAY_I2C_ADDR,
            ready: false,
            last_frame: None,
        }
    }

    /// Send the panel init sequence. Logged-and-tolerated on failure:
    /// the monitor runs headless rather than aborting.
    pub fn init(&mut self) -> Result<(), ActuatorError> {
        if self.send_init() {
            self.ready = true;
            self.clear();
            Ok(())
        } else {
            warn!("display init failed; continuing without panel");
            Err(ActuatorError::DisplayWriteFailed)
        }
    }

    /// Render one frame. No-op (beyond caching) when the panel never
    /// initialised.
    pub fn render(&mut self, frame: &DisplayFrame) {
        self.last_frame = Some(*frame);
        if !self.ready {
            return;
        }

        self.clear();
        self.draw_header(frame);
        match frame.banner {
            Banner::Optimal => {
                self.draw_text(3, 0, "OPTIMAL");
                let mut line: heapless::String<24> = heapless::String::new();
                if let Some(t) = frame.temperature_c {
                    let _ = write!(line, "TEMP: {t:.1}C");
                    self.draw_text(5, 0, &line);
                }
                if let Some(h) = frame.humidity_pct {
                    line.clear();
                    let _ = write!(line, "HUM: {h:.1}%");
                    self.draw_text(6, 0, &line);
                }
            }
            Banner::Danger => {
                self.draw_text(3, 0, "!DANGER!");
                self.draw_text(5, 0, crate::actuators::DANGER_TAG);
            }
        }
    }

    /// Last frame handed to `render` (host-side inspection).
    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last_frame.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn draw_header(&mut self, frame: &DisplayFrame) {
        let mut line: heapless::String<24> = heapless::String::new();
        let _ = write!(line, "STATUS:");
        if let Some(up) = frame.link_up {
            let _ = write!(line, " {}", if up { "WIFI OK" } else { "NO LINK" });
        }
        self.draw_text(0, 0, &line);
    }

    // ── Panel I/O ─────────────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn send_init(&self) -> bool {
        hw_init::i2c_write(self.addr, INIT_SEQUENCE)
    }

    #[cfg(not(target_os = "espidf"))]
    fn send_init(&self) -> bool {
        let _ = self.addr;
        true
    }

    #[cfg(target_os = "espidf")]
    fn clear(&mut self) {
        for page in 0..8u8 {
            self.set_cursor(page, 0);
            let mut buf = [0u8; 129];
            buf[0] = 0x40; // control: data stream
            if !hw_init::i2c_write(self.addr, &buf) {
                self.ready = false;
                return;
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn clear(&mut self) {}

    #[cfg(target_os = "espidf")]
    fn set_cursor(&self, page: u8, col: u8) {
        let cmds = [
            0x00,
            0xB0 | (page & 0x07),
            col & 0x0F,
            0x10 | (col >> 4),
        ];
        let _ = hw_init::i2c_write(self.addr, &cmds);
    }

    #[cfg(target_os = "espidf")]
    fn draw_text(&mut self, page: u8, col: u8, text: &str) {
        self.set_cursor(page, col);
        // 5 glyph columns + 1 spacing column per character; data stream
        // is capped to one panel row.
        let mut buf: heapless::Vec<u8, 129> = heapless::Vec::new();
        let _ = buf.push(0x40);
        for c in text.bytes() {
            for column in glyph(c) {
                if buf.push(column).is_err() {
                    break;
                }
            }
            let _ = buf.push(0x00);
        }
        if !hw_init::i2c_write(self.addr, &buf) {
            self.ready = false;
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn draw_text(&mut self, _page: u8, _col: u8, _text: &str) {}
}


/// 5x7 column patterns (LSB = top row) for the glyph subset the status
/// frames actually use. Unknown characters render blank.
#[cfg(target_os = "espidf")]
fn glyph(c: u8) -> [u8; 5] {
    match c {
        b'!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        b'%' => [0x23, 0x13, 0x08, 0x64, 0x62],
        b'.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        b'/' => [0x20, 0x10, 0x08, 0x04, 0x02],
        b'0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        b'1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        b'2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        b'3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        b'4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        b'5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        b'6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        b'7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        b'8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        b'9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        b':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        b'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        b'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        b'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        b'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        b'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        b'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        b'H' => [0x7F, 0x08, 0x08, 0x08, 0x7F],
        b'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        b'K' => [0x7F, 0x08, 0x14, 0x22, 0x41],
        b'L' => [0x7F, 0x40, 0x40, 0x40, 0x40],
        b'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        b'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        b'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        b'P' => [0x7F, 0x09, 0x09, 0x09, 0x06],
        b'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        b'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        b'T' => [0x01, 0x01, 0x7F, 0x01, 0x01],
        b'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        b'W' => [0x3F, 0x40, 0x38, 0x40, 0x3F],
        _ => [0x00; 5],
    }
}

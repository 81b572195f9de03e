use std::convert::Infallible;
use std::fmt::Write as _;
use std::io::{self, Write};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use racer_lib::{
    common::{Rect, Screen, TextStyle},
    graphics::GraphicsScreen,
};
use smart_leds::RGB8;

/// The LCD in memory.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb888>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb888 {
        self.pixels[y * self.width + x]
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
                self.pixels[y as usize * self.width + x as usize] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

const HELP: &str = "stick: arrows/WASD  tilt: IJKL  S1: z  S2: x/space  quit: q";

/// Presents the framebuffer with one `▀` per two pixel rows, foreground
/// the upper pixel and background the lower. Only cells that changed since
/// the last frame are rewritten.
pub struct TerminalScreen {
    screen: GraphicsScreen<Framebuffer>,
    shown: Vec<Option<(Rgb888, Rgb888)>>,
}

impl TerminalScreen {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height.div_ceil(2);
        Self {
            screen: GraphicsScreen::new(Framebuffer::new(width, height)),
            shown: vec![None; cells],
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let fb = self.screen.target();
        let rows = fb.height.div_ceil(2);
        let mut out = String::new();

        for row in 0..rows {
            for col in 0..fb.width {
                let top = fb.get(col, row * 2);
                let bottom = if row * 2 + 1 < fb.height {
                    fb.get(col, row * 2 + 1)
                } else {
                    Rgb888::BLACK
                };
                let cell = &mut self.shown[row * fb.width + col];
                if *cell == Some((top, bottom)) {
                    continue;
                }
                *cell = Some((top, bottom));
                let _ = write!(
                    out,
                    "\x1b[{};{}H\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    row + 1,
                    col + 1,
                    top.r(),
                    top.g(),
                    top.b(),
                    bottom.r(),
                    bottom.g(),
                    bottom.b()
                );
            }
        }
        let _ = write!(out, "\x1b[0m\x1b[{};1H{}", rows + 1, HELP);

        let mut stdout = io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.flush()
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self, color: RGB8) {
        self.screen.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: RGB8) {
        self.screen.fill_rect(rect, color);
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, style: TextStyle) {
        self.screen.draw_text(x, y, text, style);
    }

    fn flush(&mut self) {
        if let Err(e) = self.present() {
            log::error!("terminal write failed: {}", e);
        }
    }
}

//! [`Screen`] on top of any `embedded-graphics` draw target.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use smart_leds::RGB8;

use crate::{
    common::{Rect, Screen, TextStyle},
    log::error,
};

pub struct GraphicsScreen<D> {
    target: D,
}

impl<D> GraphicsScreen<D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    fn color(c: RGB8) -> D::Color {
        Rgb888::new(c.r, c.g, c.b).into()
    }

    fn text_style(style: &TextStyle) -> MonoTextStyle<'static, D::Color> {
        let builder = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(Self::color(style.fg));
        match style.bg {
            Some(bg) => builder.background_color(Self::color(bg)).build(),
            None => builder.build(),
        }
    }
}

impl<D> Screen for GraphicsScreen<D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    fn clear(&mut self, color: RGB8) {
        if self.target.clear(Self::color(color)).is_err() {
            error!("screen clear failed");
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: RGB8) {
        if rect.is_empty() {
            return;
        }
        let area = Rectangle::new(
            Point::new(rect.x as i32, rect.y as i32),
            Size::new(rect.width as u32, rect.height as u32),
        );
        if self.target.fill_solid(&area, Self::color(color)).is_err() {
            error!("fill_rect failed");
        }
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, style: TextStyle) {
        let mono = Self::text_style(&style);
        let result = if style.scale <= 1 {
            Text::with_baseline(text, Point::new(x as i32, y as i32), mono, Baseline::Top)
                .draw(&mut self.target)
                .map(|_| ())
        } else {
            let mut scaled = Scaled {
                target: &mut self.target,
                origin: Point::new(x as i32, y as i32),
                scale: style.scale as u32,
            };
            Text::with_baseline(text, Point::zero(), mono, Baseline::Top)
                .draw(&mut scaled)
                .map(|_| ())
        };
        if result.is_err() {
            error!("draw_text failed");
        }
    }
}

/// Draws every pixel as a `scale × scale` block, offset by `origin`.
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let side = self.scale as i32;
        for Pixel(p, color) in pixels {
            let at = self.origin + Point::new(p.x * side, p.y * side);
            self.target
                .fill_solid(&Rectangle::new(at, Size::new_equal(self.scale)), color)?;
        }
        Ok(())
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        Rectangle::new(Point::zero(), outer.size / self.scale.max(1))
    }
}

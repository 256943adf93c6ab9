use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{Rgb888, RgbColor},
    prelude::*,
    primitives::Rectangle,
};

use crate::types::BarData;

pub trait Renderer {
    fn draw<D: DrawTarget<Color = Rgb888>>(
        &self,
        target: &mut D,
        frame: &[BarData],
    ) -> Result<(), D::Error>;
}

/// Draws bars, then peak markers on top, onto any RGB888 target.
///
/// Targets have no alpha channel, so translucent colors are composited over
/// `background` before drawing. Everything is clipped to the target bounds.
pub struct BarGraphRenderer {
    background: Rgb888,
    clear_background: bool,
}

impl Default for BarGraphRenderer {
    fn default() -> Self {
        Self::new(Rgb888::BLACK, true)
    }
}

impl BarGraphRenderer {
    pub fn new(background: Rgb888, clear_background: bool) -> Self {
        Self {
            background,
            clear_background,
        }
    }

    fn fill_clipped<D>(target: &mut D, area: &Rectangle, color: Rgb888) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let visible = area.intersection(&target.bounding_box());
        if visible.size.width == 0 || visible.size.height == 0 {
            return Ok(());
        }
        target.fill_solid(&visible, color)
    }
}

impl Renderer for BarGraphRenderer {
    fn draw<D>(&self, target: &mut D, frame: &[BarData]) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        if self.clear_background {
            target.clear(self.background)?;
        }

        for bar in frame {
            let color = bar.color.blend_over(self.background);
            Self::fill_clipped(target, &bar.bar, color)?;
        }

        for bar in frame {
            let color = bar.peak_color.blend_over(self.background);
            Self::fill_clipped(target, &bar.peak_marker, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_strategy::BarColor;
    use embedded_graphics::{geometry::Point, mock_display::MockDisplay};

    fn bar(index: usize, x: i32, top: i32, height: u32, marker_top: i32) -> BarData {
        let mut data = BarData::empty(index);
        data.color = BarColor::new(Rgb888::new(255, 0, 100), 180);
        data.peak_color = BarColor::opaque(Rgb888::WHITE);
        data.bar = Rectangle::new(Point::new(x, top), Size::new(2, height));
        data.peak_marker = Rectangle::new(Point::new(x, marker_top), Size::new(2, 1));
        data
    }

    #[test]
    fn test_draws_bars_and_markers() {
        let mut display: MockDisplay<Rgb888> = MockDisplay::new();
        display.set_allow_overdraw(true);

        let frame = [bar(0, 0, 60, 4, 58), bar(1, 3, 50, 14, 50)];
        BarGraphRenderer::default().draw(&mut display, &frame).unwrap();

        let blended = Rgb888::new(180, 0, 70);
        assert_eq!(display.get_pixel(Point::new(0, 63)), Some(blended));
        assert_eq!(display.get_pixel(Point::new(1, 60)), Some(blended));
        assert_eq!(display.get_pixel(Point::new(0, 59)), Some(Rgb888::BLACK));
        assert_eq!(display.get_pixel(Point::new(0, 58)), Some(Rgb888::WHITE));
        // marker is drawn after, on top of the bar
        assert_eq!(display.get_pixel(Point::new(4, 50)), Some(Rgb888::WHITE));
        assert_eq!(display.get_pixel(Point::new(4, 51)), Some(blended));
        assert_eq!(display.get_pixel(Point::new(2, 63)), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_clips_bars_taller_than_the_target() {
        let mut display: MockDisplay<Rgb888> = MockDisplay::new();
        display.set_allow_overdraw(true);

        let frame = [bar(0, 62, -40, 104, -45)];
        BarGraphRenderer::default().draw(&mut display, &frame).unwrap();

        assert_eq!(display.get_pixel(Point::new(63, 0)), Some(Rgb888::new(180, 0, 70)));
    }
}

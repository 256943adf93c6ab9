use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// How the viewport width is shared between bars and the space between them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum LayoutPolicy {
    /// Bars keep their width; the leftover width is spread evenly into
    /// `B + 1` gaps, including one before the first and after the last bar.
    FixedBarWidth { bar_width: f32 },
    /// Gaps keep their width; bars stretch to fill the rest, flush left.
    FixedSpacing { spacing: f32 },
}

/// Horizontal placement of the bars for one viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub bar_width: f32,
    pub gap: f32,
    pub offset: f32,
}

impl LayoutPolicy {
    pub fn layout(&self, viewport_width: u32, num_bars: usize) -> BarLayout {
        let width = viewport_width as f32;
        let bars = num_bars.max(1) as f32;
        match *self {
            LayoutPolicy::FixedBarWidth { bar_width } => {
                let gap = ((width - bars * bar_width) / (bars + 1.0)).max(0.0);
                BarLayout {
                    bar_width,
                    gap,
                    offset: gap,
                }
            }
            LayoutPolicy::FixedSpacing { spacing } => {
                let bar_width = ((width - (bars - 1.0) * spacing) / bars).max(0.0);
                BarLayout {
                    bar_width,
                    gap: spacing,
                    offset: 0.0,
                }
            }
        }
    }

    /// The configured width or spacing, for validation.
    pub fn parameter(&self) -> f32 {
        match *self {
            LayoutPolicy::FixedBarWidth { bar_width } => bar_width,
            LayoutPolicy::FixedSpacing { spacing } => spacing,
        }
    }
}

impl BarLayout {
    /// Left edge of bar `index`.
    pub fn x(&self, index: usize) -> f32 {
        self.offset + index as f32 * (self.bar_width + self.gap)
    }

    /// Bar rising from the bottom of the viewport to `height`.
    pub fn bar_rect(&self, index: usize, height: f32, viewport_height: u32) -> Rectangle {
        let top = viewport_height as f32 - height;
        Rectangle::new(
            Point::new(self.x(index) as i32, top as i32),
            Size::new(self.bar_width as u32, height.max(0.0) as u32),
        )
    }

    /// Marker of `marker_height` pixels whose top edge sits at `level`.
    pub fn marker_rect(
        &self,
        index: usize,
        level: f32,
        marker_height: u32,
        viewport_height: u32,
    ) -> Rectangle {
        let top = viewport_height as f32 - level;
        Rectangle::new(
            Point::new(self.x(index) as i32, top as i32),
            Size::new(self.bar_width as u32, marker_height),
        )
    }
}

/// Cumulative distribution chart for the Histogram screen
///
/// Each RGB channel is drawn as its cumulative distribution curve against
/// a faint diagonal. After equalization the curves hug the diagonal, which
/// is what "approximately uniform" looks like.
use iced::widget::canvas::{self, path, Stroke};
use iced::{Color, Point, Rectangle};
use image::DynamicImage;

use crate::Message;

/// Per-channel value counts of an image
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: [[u32; 256]; 3],
    total: u64,
}

impl Histogram {
    /// Count every RGB value of `image` (alpha is ignored)
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let mut counts = [[0u32; 256]; 3];
        for pixel in rgb.pixels() {
            for (channel, &value) in pixel.0.iter().enumerate() {
                counts[channel][value as usize] += 1;
            }
        }

        Histogram {
            counts,
            total: rgb.width() as u64 * rgb.height() as u64,
        }
    }

    /// Fraction of pixels at or below each value, in `0.0..=1.0`.
    /// All zeros for an empty image.
    pub fn cumulative(&self, channel: usize) -> [f32; 256] {
        let mut curve = [0.0f32; 256];
        if self.total == 0 {
            return curve;
        }

        let mut running = 0u64;
        for (point, &count) in curve.iter_mut().zip(self.counts[channel].iter()) {
            running += count as u64;
            *point = (running as f64 / self.total as f64) as f32;
        }
        curve
    }
}

impl canvas::Program<Message> for Histogram {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (width, height) = (bounds.width, bounds.height);

        let to_point = |value: usize, fraction: f32| {
            Point::new(value as f32 / 255.0 * width, (1.0 - fraction) * height)
        };

        // Uniform reference
        frame.stroke(
            &canvas::Path::line(to_point(0, 0.0), to_point(255, 1.0)),
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.35))
                .with_width(1.0),
        );

        if self.total == 0 {
            return vec![frame.into_geometry()];
        }

        let colors = [
            Color::from_rgb(0.9, 0.25, 0.25),
            Color::from_rgb(0.25, 0.8, 0.3),
            Color::from_rgb(0.3, 0.45, 0.95),
        ];

        for (channel, color) in colors.into_iter().enumerate() {
            let curve = self.cumulative(channel);

            let mut builder = path::Builder::new();
            builder.move_to(to_point(0, curve[0]));
            for (value, &fraction) in curve.iter().enumerate().skip(1) {
                builder.line_to(to_point(value, fraction));
            }

            frame.stroke(
                &builder.build(),
                Stroke::default().with_color(color).with_width(1.5),
            );
        }

        vec![frame.into_geometry()]
    }
}

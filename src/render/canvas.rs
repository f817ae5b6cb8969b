//! Raster drawing primitives shared by the chart renderers.

use font8x8::legacy::BASIC_LEGACY;
use image::{Rgb, RgbImage};

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const TEXT: Rgb<u8> = Rgb([34, 34, 34]);
    pub const AXIS: Rgb<u8> = Rgb([51, 51, 51]);
    pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);
    pub const LEGEND_BORDER: Rgb<u8> = Rgb([204, 204, 204]);
}

/// Colors cycled through for successive series.
pub const PALETTE: [Rgb<u8>; 6] = [
    Rgb([247, 113, 137]),
    Rgb([151, 164, 49]),
    Rgb([54, 173, 164]),
    Rgb([164, 140, 244]),
    Rgb([220, 137, 50]),
    Rgb([59, 163, 236]),
];

pub fn series_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Side of one font glyph in pixels at scale 1.
pub const GLYPH: u32 = 8;

/// Upper bound on the number of axis ticks.
const MAX_TICKS: usize = 50;

/// Horizontal alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Pixel width of `text` at the given glyph scale.
pub fn text_width(text: &str, scale: u32) -> f64 {
    (text.chars().count() as u32 * GLYPH * scale) as f64
}

/// Pixel layout of a chart: the canvas and the plot area inside its margins.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 90.0,
            right: 30.0,
            top: 50.0,
            bottom: 60.0,
        }
    }

    pub fn plot_left(&self) -> f64 {
        self.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.right
    }

    pub fn plot_top(&self) -> f64 {
        self.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.bottom
    }

    /// Horizontal pixel for a fraction of the plot width.
    pub fn x(&self, frac: f64) -> f64 {
        self.plot_left() + frac * (self.plot_right() - self.plot_left())
    }

    /// Vertical pixel for a fraction of the plot height, 0 at the bottom.
    pub fn y(&self, frac: f64) -> f64 {
        self.plot_bottom() - frac * (self.plot_bottom() - self.plot_top())
    }
}

/// A linear value range mapped onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    /// Range covering all finite values, padded by `margin` of its span.
    ///
    /// Ranges too narrow to resolve in `f64` are widened as if flat.
    /// Returns `None` when there is no finite value.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>, margin: f64) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if v.is_finite() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let magnitude = min.abs().max(max.abs());
        if max - min <= magnitude * 1e-9 {
            let mid = min + (max - min) / 2.0;
            let adjust = if magnitude == 0.0 { 1.0 } else { magnitude * 0.1 };
            return Some(Self {
                min: mid - adjust,
                max: mid + adjust,
            });
        }
        let pad = (max - min) * margin;
        Some(Self {
            min: min - pad,
            max: max + pad,
        })
    }

    pub fn frac(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Evenly spaced "nice" tick values (1, 2 or 5 times a power of ten) inside the range.
    ///
    /// At most `MAX_TICKS` values are returned.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let span = self.max - self.min;
        if !(span > 0.0) || !span.is_finite() || target == 0 {
            return Vec::new();
        }
        let raw = span / target as f64;
        let magnitude = 10f64.powf(raw.log10().floor());
        let step = [1.0, 2.0, 5.0, 10.0]
            .iter()
            .map(|m| m * magnitude)
            .find(|s| *s >= raw)
            .unwrap_or(10.0 * magnitude);

        let first = (self.min / step).ceil();
        let last = (self.max / step + 1e-9).floor();
        if !(step > 0.0) || !first.is_finite() || !last.is_finite() || last < first {
            return Vec::new();
        }
        let count = ((last - first) as usize + 1).min(MAX_TICKS);
        let mut ticks: Vec<f64> = (0..count)
            .map(|i| {
                let tick = (first + i as f64) * step;
                // snap -0.0
                if tick == 0.0 {
                    0.0
                } else {
                    tick
                }
            })
            .collect();
        ticks.dedup();
        ticks
    }
}

/// Decimal places needed to label ticks spaced `step` apart, at most 8.
pub fn tick_precision(ticks: &[f64]) -> usize {
    if ticks.len() < 2 {
        return 2;
    }
    let step = (ticks[1] - ticks[0]).abs();
    if !(step > 0.0) || !step.is_finite() {
        2
    } else if step >= 1.0 {
        0
    } else {
        ((-step.log10()).ceil().max(0.0) as usize).min(8)
    }
}

/// A chart image under construction.
pub struct Canvas {
    frame: Frame,
    image: RgbImage,
}

impl Canvas {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            image: RgbImage::from_pixel(frame.width as u32, frame.height as u32, colors::WHITE),
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Pixel coordinate clamped well outside the image so line walks stay short.
    fn pixel(v: f64) -> i64 {
        if v.is_finite() {
            v.round().clamp(-10_000.0, 10_000.0) as i64
        } else {
            -10_000
        }
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
        let (x0, x1) = (Self::pixel(x0.min(x1)), Self::pixel(x0.max(x1)));
        let (y0, y1) = (Self::pixel(y0.min(y1)), Self::pixel(y0.max(y1)));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
        self.line((x0, y0), (x1, y0), color, 1);
        self.line((x1, y0), (x1, y1), color, 1);
        self.line((x1, y1), (x0, y1), color, 1);
        self.line((x0, y1), (x0, y0), color, 1);
    }

    /// Straight segment drawn with a square pen `width` pixels wide.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, width: u32) {
        let (mut x, mut y) = (Self::pixel(from.0), Self::pixel(from.1));
        let (x2, y2) = (Self::pixel(to.0), Self::pixel(to.1));
        let dx = (x2 - x).abs();
        let dy = (y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let lo = -((width as i64 - 1) / 2);
        let hi = width as i64 / 2;

        loop {
            for oy in lo..=hi {
                for ox in lo..=hi {
                    self.put(x + ox, y + oy, color);
                }
            }
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connected line through pixel coordinates. Nothing is drawn for fewer than two points.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgb<u8>, width: u32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, width);
        }
    }

    /// Filled disc with a one-pixel darker outline.
    pub fn marker(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
        let outline = Rgb([color.0[0] / 2, color.0[1] / 2, color.0[2] / 2]);
        let r = radius.ceil() as i64 + 1;
        let (px, py) = (Self::pixel(cx), Self::pixel(cy));
        for dy in -r..=r {
            for dx in -r..=r {
                let d = ((dx * dx + dy * dy) as f64).sqrt();
                if d <= radius - 1.0 {
                    self.put(px + dx, py + dy, color);
                } else if d <= radius {
                    self.put(px + dx, py + dy, outline);
                }
            }
        }
    }

    /// Text with its top edge at `y`, aligned horizontally on `x`.
    pub fn text(&mut self, x: f64, y: f64, text: &str, scale: u32, anchor: Anchor) {
        let width = text_width(text, scale);
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        let (left, top) = (Self::pixel(left), Self::pixel(y));
        let step = (GLYPH * scale) as i64;
        for (i, c) in text.chars().enumerate() {
            let origin = left + i as i64 * step;
            self.glyph(c, scale, |row, col| (origin + col, top + row));
        }
    }

    /// Text reading bottom to top, centred on (`cx`, `cy`).
    pub fn text_vertical(&mut self, cx: f64, cy: f64, text: &str, scale: u32) {
        let length = text_width(text, scale);
        let bottom = Self::pixel(cy + length / 2.0);
        let left = Self::pixel(cx - (GLYPH * scale) as f64 / 2.0);
        let step = (GLYPH * scale) as i64;
        for (i, c) in text.chars().enumerate() {
            let origin = bottom - i as i64 * step;
            // glyph rows run left to right, glyph columns run upwards
            self.glyph(c, scale, |row, col| (left + row, origin - col));
        }
    }

    /// Plot one 8x8 glyph through `place`, which maps (row, col) in scaled
    /// glyph pixels to canvas pixels.
    fn glyph(&mut self, c: char, scale: u32, place: impl Fn(i64, i64) -> (i64, i64)) {
        let code = if (c as u32) < 128 { c as usize } else { '?' as usize };
        let bitmap = BASIC_LEGACY[code];
        let scale = scale as i64;
        for (row, bits) in bitmap.iter().enumerate() {
            for col in 0..8i64 {
                if (*bits >> col) & 1 == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (x, y) = place(row as i64 * scale + sy, col * scale + sx);
                        self.put(x, y, colors::TEXT);
                    }
                }
            }
        }
    }

    pub fn title(&mut self, title: &str) {
        let f = self.frame;
        self.text(f.width / 2.0, f.top / 2.0 - 8.0, title, 2, Anchor::Middle);
    }

    /// Axis titles below the x axis and rotated beside the y axis.
    pub fn axis_labels(&mut self, x_label: &str, y_label: &str) {
        let f = self.frame;
        self.text(
            (f.plot_left() + f.plot_right()) / 2.0,
            f.height - 22.0,
            x_label,
            1,
            Anchor::Middle,
        );
        self.text_vertical(16.0, (f.plot_top() + f.plot_bottom()) / 2.0, y_label, 1);
    }

    /// Plot-area border.
    pub fn plot_border(&mut self) {
        let f = self.frame;
        self.stroke_rect(
            f.plot_left(),
            f.plot_top(),
            f.plot_right(),
            f.plot_bottom(),
            colors::AXIS,
        );
    }

    /// Horizontal grid line and left-hand label at each y tick.
    pub fn y_ticks(&mut self, scale: &Scale, ticks: &[f64]) {
        let f = self.frame;
        let precision = tick_precision(ticks);
        for tick in ticks {
            let y = f.y(scale.frac(*tick));
            self.line((f.plot_left(), y), (f.plot_right(), y), colors::GRID, 1);
            let label = format!("{:.*}", precision, tick);
            self.text(f.plot_left() - 6.0, y - 4.0, &label, 1, Anchor::End);
        }
    }

    /// Vertical grid line and bottom label at each (fraction, label) pair.
    pub fn x_ticks(&mut self, ticks: &[(f64, String)]) {
        let f = self.frame;
        for (frac, label) in ticks {
            let x = f.x(*frac);
            self.line((x, f.plot_top()), (x, f.plot_bottom()), colors::GRID, 1);
            self.text(x, f.plot_bottom() + 8.0, label, 1, Anchor::Middle);
        }
    }

    /// Legend box in the upper-left corner of the plot area.
    pub fn legend(&mut self, entries: &[(String, Rgb<u8>)]) {
        if entries.is_empty() {
            return;
        }
        let f = self.frame;
        let x = f.plot_left() + 12.0;
        let top = f.plot_top() + 10.0;
        let longest = entries
            .iter()
            .map(|(label, _)| text_width(label, 1))
            .fold(0.0, f64::max);
        let box_width = 48.0 + longest;
        let box_height = 8.0 + entries.len() as f64 * 18.0;
        self.fill_rect(x, top, x + box_width, top + box_height, colors::WHITE);
        self.stroke_rect(x, top, x + box_width, top + box_height, colors::LEGEND_BORDER);

        let mut y = top + 13.0;
        for (label, color) in entries {
            self.line((x + 8.0, y), (x + 30.0, y), *color, 3);
            self.text(x + 38.0, y - 4.0, label, 1, Anchor::Start);
            y += 18.0;
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

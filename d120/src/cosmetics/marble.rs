//! Procedural marble skin for the die.
//!
//! The texture is decoration only; nothing about a roll depends on it.

use crate::{rules::color::Color, statistics::roller::Roller};

const GRADIENT: [(f32, Color); 5] = [
    (0.0, Color::from_hex(0x0d3d30)),
    (0.3, Color::from_hex(0x1a5c4a)),
    (0.6, Color::from_hex(0x2d7a65)),
    (0.8, Color::from_hex(0x1a4a5c)),
    (1.0, Color::from_hex(0x0a2030)),
];

struct VeinSet {
    color: Color,
    count: usize,
    alpha: (f32, f32),
    width: (f32, f32),
}

const VEINS: [VeinSet; 4] = [
    // light teal
    VeinSet {
        color: Color::rgb(100, 200, 170),
        count: 12,
        alpha: (0.35, 0.6),
        width: (1.0, 4.0),
    },
    // deep blue-teal
    VeinSet {
        color: Color::rgb(60, 130, 160),
        count: 8,
        alpha: (0.3, 0.5),
        width: (1.0, 3.0),
    },
    // shadow
    VeinSet {
        color: Color::rgb(10, 40, 30),
        count: 6,
        alpha: (0.5, 0.5),
        width: (2.0, 6.0),
    },
    // highlight wisps
    VeinSet {
        color: Color::rgb(180, 240, 210),
        count: 5,
        alpha: (0.15, 0.3),
        width: (0.5, 2.0),
    },
];

/// Opacity along a vein: fades in, peaks at 30%, eases to 70% strength, fades out.
const VEIN_RAMP: [(f32, f32); 4] = [(0.0, 0.0), (0.3, 1.0), (0.7, 0.7), (1.0, 0.0)];

const CONTROL_JITTER: f32 = 80.0;
const NOISE_SPREAD: f32 = 18.0;
const LABEL_MARGIN: f32 = 20.0;

pub const LABEL_COLOR: Color = Color::from_hex(0xc9a84c);
pub const LABELS: [u32; 24] = [
    1, 7, 12, 18, 23, 29, 34, 38, 44, 50, 55, 61, 67, 72, 76, 81, 88, 92, 97, 103, 108, 114, 119,
    120,
];

/// A number painted onto the marble, in texture pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLabel {
    pub value: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarbleTexture {
    pub size: usize,
    /// Row-major, fully opaque RGBA.
    pub pixels: Vec<[u8; 4]>,
    pub labels: Vec<NumberLabel>,
}

impl MarbleTexture {
    pub fn generate(roller: &mut Roller, size: usize) -> Self {
        let mut canvas = Canvas::new(size);
        canvas.fill_gradient();
        for set in &VEINS {
            for _ in 0..set.count {
                canvas.vein(roller, set);
            }
        }

        let span = (size as f32 - 2.0 * LABEL_MARGIN).max(0.0);
        let labels = LABELS
            .iter()
            .map(|&value| NumberLabel {
                value,
                x: LABEL_MARGIN + roller.unit() * span,
                y: LABEL_MARGIN + roller.unit() * span,
            })
            .collect();

        let pixels = canvas
            .pixels
            .iter()
            .map(|&[r, g, b]| {
                let noise = (roller.unit() - 0.5) * NOISE_SPREAD;
                let channel = |v: f32| (v + noise).round().clamp(0.0, 255.0) as u8;
                [channel(r), channel(g), channel(b), 255]
            })
            .collect();

        Self {
            size,
            pixels,
            labels,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(y * self.size + x).copied()
    }

    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

/// Color of the base gradient at `t` along the top-left to bottom-right diagonal.
pub fn gradient_at(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    for pair in GRADIENT.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            return c0.lerp(c1, (t - t0) / (t1 - t0));
        }
    }
    GRADIENT[GRADIENT.len() - 1].1
}

fn ramp(t: f32) -> f32 {
    for pair in VEIN_RAMP.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            return a0 + (a1 - a0) * (t - t0) / (t1 - t0);
        }
    }
    0.0
}

fn bezier(p: [(f32, f32); 4], t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    let w = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
    (
        p.iter().zip(w).map(|(p, w)| p.0 * w).sum::<f32>(),
        p.iter().zip(w).map(|(p, w)| p.1 * w).sum::<f32>(),
    )
}

struct Canvas {
    size: usize,
    pixels: Vec<[f32; 3]>,
    // strongest coverage of the vein being drawn, so overlapping stamps don't stack
    coverage: Vec<f32>,
    touched: Vec<usize>,
}

impl Canvas {
    fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![[0.0; 3]; size * size],
            coverage: vec![0.0; size * size],
            touched: Vec::new(),
        }
    }

    fn fill_gradient(&mut self) {
        let extent = (2 * self.size.saturating_sub(1)).max(1) as f32;
        for y in 0..self.size {
            for x in 0..self.size {
                let c = gradient_at((x + y) as f32 / extent);
                self.pixels[y * self.size + x] = [c.r as f32, c.g as f32, c.b as f32];
            }
        }
    }

    fn vein(&mut self, roller: &mut Roller, set: &VeinSet) {
        let size = self.size as f32;
        let (x0, y0) = (roller.unit() * size, roller.unit() * size);
        let (x1, y1) = (roller.unit() * size, roller.unit() * size);
        let alpha = roller.between(set.alpha.0, set.alpha.1);
        let width = roller.between(set.width.0, set.width.1);
        let mut jitter = || (roller.unit() - 0.5) * CONTROL_JITTER;
        let points = [
            (x0, y0),
            (x0 + (x1 - x0) * 0.3 + jitter(), y0 + (y1 - y0) * 0.2 + jitter()),
            (x0 + (x1 - x0) * 0.7 + jitter(), y0 + (y1 - y0) * 0.8 + jitter()),
            (x1, y1),
        ];

        let chord = (x1 - x0).hypot(y1 - y0);
        let steps = ((chord * 2.0) as usize).max(16);
        let radius = (width / 2.0).max(0.5);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let (cx, cy) = bezier(points, t);
            self.stamp(cx, cy, radius, alpha * ramp(t));
        }

        for &i in &self.touched {
            let a = self.coverage[i];
            let px = &mut self.pixels[i];
            px[0] += (set.color.r as f32 - px[0]) * a;
            px[1] += (set.color.g as f32 - px[1]) * a;
            px[2] += (set.color.b as f32 - px[2]) * a;
            self.coverage[i] = 0.0;
        }
        self.touched.clear();
    }

    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let reach = radius + 1.0;
        let x_lo = (cx - reach).floor().max(0.0) as usize;
        let y_lo = (cy - reach).floor().max(0.0) as usize;
        let x_hi = ((cx + reach).ceil().max(0.0) as usize).min(self.size);
        let y_hi = ((cy + reach).ceil().max(0.0) as usize).min(self.size);
        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                let d = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
                // one-pixel antialiased edge
                let edge = (radius + 0.5 - d).clamp(0.0, 1.0);
                let a = alpha * edge;
                let i = y * self.size + x;
                if a > self.coverage[i] {
                    if self.coverage[i] == 0.0 {
                        self.touched.push(i);
                    }
                    self.coverage[i] = a;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stops() {
        assert_eq!(gradient_at(0.0), Color::from_hex(0x0d3d30));
        assert_eq!(gradient_at(0.6), Color::from_hex(0x2d7a65));
        assert_eq!(gradient_at(1.0), Color::from_hex(0x0a2030));
        assert_eq!(gradient_at(-3.0), gradient_at(0.0));
    }

    #[test]
    fn test_ramp() {
        assert_eq!(ramp(0.0), 0.0);
        assert!((ramp(0.3) - 1.0).abs() < 1e-6);
        assert!((ramp(0.7) - 0.7).abs() < 1e-6);
        assert!(ramp(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_generate() {
        let texture = MarbleTexture::generate(&mut Roller::test_rng(), 64);
        assert_eq!(texture.pixels.len(), 64 * 64);
        assert!(texture.pixels.iter().all(|p| p[3] == 255));
        assert_eq!(texture.to_rgba_bytes().len(), 64 * 64 * 4);
        assert_eq!(texture.labels.len(), LABELS.len());
        for label in &texture.labels {
            assert!((LABEL_MARGIN..=64.0 - LABEL_MARGIN).contains(&label.x));
            assert!((LABEL_MARGIN..=64.0 - LABEL_MARGIN).contains(&label.y));
        }
        assert!(texture.pixel(64, 0).is_none());
    }

    #[test]
    fn test_same_seed_same_texture() {
        let a = MarbleTexture::generate(&mut Roller::from_seed(9), 32);
        let b = MarbleTexture::generate(&mut Roller::from_seed(9), 32);
        assert_eq!(a, b);
    }

    #[test]
    fn test_veins_change_the_base() {
        let texture = MarbleTexture::generate(&mut Roller::test_rng(), 128);
        let extent = (2 * 127) as f32;
        let far_from_base = texture.pixels.iter().enumerate().filter(|(i, p)| {
            let base = gradient_at(((i % 128) + (i / 128)) as f32 / extent);
            (p[0] as i32 - base.r as i32).abs() > 20
                || (p[1] as i32 - base.g as i32).abs() > 20
                || (p[2] as i32 - base.b as i32).abs() > 20
        });
        assert!(far_from_base.count() > 0);
    }
}

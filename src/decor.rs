//! Continuous decorative motion: pure functions of elapsed time or progress.

use crate::easing::Ease;
use crate::error::ConfigError;
use crate::tween::{interpolate, VisualState};

/// Endless back-and-forth between two states (`repeat: -1, yoyo: true`).
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub from: VisualState,
    pub to: VisualState,
    /// Seconds for one leg, from → to.
    pub leg: f64,
    pub ease: Ease,
    /// Seconds before this oscillator starts moving.
    pub delay: f64,
}

impl Oscillator {
    pub fn new(from: VisualState, to: VisualState, leg: f64, ease: Ease) -> Self {
        Self { from, to, leg, ease, delay: 0.0 }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn sample(&self, elapsed: f64) -> VisualState {
        let t = elapsed - self.delay;
        if t <= 0.0 || self.leg <= 0.0 {
            return self.from;
        }
        let legs = t / self.leg;
        let mut fraction = legs.fract();
        if legs as u64 % 2 == 1 {
            fraction = 1.0 - fraction;
        }
        interpolate(fraction, &self.from, &self.to, self.ease)
    }
}

/// Constant-speed full turns (`rotation: 360, repeat: -1, ease: none`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    /// Seconds per revolution.
    pub period: f64,
    pub delay: f64,
}

impl Spinner {
    pub fn new(period: f64) -> Self {
        Self { period, delay: 0.0 }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Rotation in degrees, `0..360`.
    pub fn angle(&self, elapsed: f64) -> f64 {
        let t = elapsed - self.delay;
        if t <= 0.0 || self.period <= 0.0 {
            return 0.0;
        }
        (t / self.period).fract() * 360.0
    }

    pub fn sample(&self, elapsed: f64) -> VisualState {
        VisualState::REST.with_rotation(self.angle(elapsed))
    }
}

/// SVG path data split into command text and numbers so two paths with the
/// same commands can be blended.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    /// Text between numbers; always one longer than `numbers`.
    glue: Vec<String>,
    numbers: Vec<f64>,
}

impl PathShape {
    pub fn parse(d: &str) -> Self {
        let mut glue = vec![String::new()];
        let mut numbers = Vec::new();
        let mut chars = d.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let starts_number = c.is_ascii_digit()
                || c == '.'
                || (c == '-' && chars.peek().is_some_and(|(_, n)| n.is_ascii_digit() || *n == '.'));
            if !starts_number {
                if let Some(last) = glue.last_mut() {
                    last.push(c);
                }
                continue;
            }
            let mut end = i + c.len_utf8();
            while let Some(&(j, n)) = chars.peek() {
                if n.is_ascii_digit() || n == '.' {
                    end = j + n.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            // Digits and dots only, so this parses unless it is a lone sign.
            numbers.push(d[i..end].parse::<f64>().unwrap_or(0.0));
            glue.push(String::new());
        }
        Self { glue, numbers }
    }

    pub fn numbers(&self) -> &[f64] {
        &self.numbers
    }

    fn compatible(&self, other: &PathShape) -> bool {
        self.glue == other.glue
    }

    pub fn blend(&self, other: &PathShape, amount: f64) -> PathShape {
        let numbers = self
            .numbers
            .iter()
            .zip(&other.numbers)
            .map(|(a, b)| a + (b - a) * amount)
            .collect();
        PathShape { glue: self.glue.clone(), numbers }
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for (i, glue) in self.glue.iter().enumerate() {
            out.push_str(glue);
            if let Some(n) = self.numbers.get(i) {
                let rounded = (n * 1000.0).round() / 1000.0;
                out.push_str(&format!("{rounded}"));
            }
        }
        out
    }
}

/// Keyframed path morph with opacity, sampled by overall progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMorph {
    keyframes: Vec<(PathShape, f64)>,
    ease: Ease,
}

impl PathMorph {
    /// Each keyframe is `(path data, opacity)`. Segments between keyframes
    /// get an equal share of progress.
    pub fn new(keyframes: &[(&str, f64)], ease: Ease) -> Result<Self, ConfigError> {
        let parsed: Vec<(PathShape, f64)> =
            keyframes.iter().map(|(d, o)| (PathShape::parse(d), *o)).collect();
        if let Some((first, _)) = parsed.first() {
            for ((shape, _), (d, _)) in parsed.iter().zip(keyframes).skip(1) {
                if !first.compatible(shape) {
                    return Err(ConfigError::PathMismatch(d.to_string()));
                }
            }
        }
        Ok(Self { keyframes: parsed, ease })
    }

    /// Path data and opacity at `progress` in `0..=1`.
    pub fn sample(&self, progress: f64) -> Option<(String, f64)> {
        let (first, first_opacity) = self.keyframes.first()?;
        let segments = self.keyframes.len() - 1;
        if segments == 0 {
            return Some((first.to_svg(), *first_opacity));
        }
        let scaled = progress.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = self.ease.apply(scaled - index as f64);
        let (a, oa) = &self.keyframes[index];
        let (b, ob) = &self.keyframes[index + 1];
        Some((a.blend(b, local).to_svg(), oa + (ob - oa) * local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillator_yoyos() {
        let osc = Oscillator::new(VisualState::REST, VisualState::REST.with_scale(1.2), 2.0, Ease::Linear);
        assert_eq!(osc.sample(0.0).scale, 1.0);
        assert!((osc.sample(1.0).scale - 1.1).abs() < 1e-12);
        assert!((osc.sample(2.0).scale - 1.0).abs() < 1e-12 || (osc.sample(2.0).scale - 1.2).abs() < 1e-12);
        assert!((osc.sample(3.0).scale - 1.1).abs() < 1e-12);
        assert!((osc.sample(4.5).scale - 1.05).abs() < 1e-12);
    }

    #[test]
    fn spinner_wraps() {
        let spin = Spinner::new(20.0).delayed(1.0);
        assert_eq!(spin.angle(0.5), 0.0);
        assert!((spin.angle(11.0) - 180.0).abs() < 1e-9);
        assert!(spin.angle(41.5) < 10.0);
    }

    #[test]
    fn path_round_trips_through_numbers() {
        let d = "M50,100 Q100,50 150,100 T250,100";
        let shape = PathShape::parse(d);
        assert_eq!(shape.numbers(), &[50.0, 100.0, 100.0, 50.0, 150.0, 100.0, 250.0, 100.0]);
        assert_eq!(shape.to_svg(), d);
        let neg = PathShape::parse("M45.3,-59.4C57.7,-50.3Z");
        assert_eq!(neg.numbers(), &[45.3, -59.4, 57.7, -50.3]);
    }

    #[test]
    fn morph_blends_segments() {
        let morph = PathMorph::new(&[("M0,0 L10,0", 0.0), ("M0,10 L10,10", 0.3), ("M0,20 L10,20", 0.4)], Ease::Linear).unwrap();
        let (d, opacity) = morph.sample(0.25).unwrap();
        assert_eq!(d, "M0,5 L10,5");
        assert!((opacity - 0.15).abs() < 1e-12);
        let (d, opacity) = morph.sample(1.0).unwrap();
        assert_eq!(d, "M0,20 L10,20");
        assert!((opacity - 0.4).abs() < 1e-12);
    }

    #[test]
    fn morph_rejects_mismatched_commands() {
        assert!(PathMorph::new(&[("M0,0 L1,1", 0.0), ("M0,0 Q1,1 2,2", 1.0)], Ease::Linear).is_err());
    }
}

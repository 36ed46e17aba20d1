//! Easing curves, named the way GSAP names them (`power3.out`, `back.out(1.4)`).

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    /// `none` / `linear`.
    Linear,
    /// `power1.out`, GSAP's default ease.
    #[default]
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
    SineInOut,
    /// `back.out(overshoot)`.
    BackOut(f64),
    /// `elastic.out(amplitude, period)`.
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    /// Map normalized time to progress. Input is clamped to `[0, 1]` and the
    /// endpoints are exact for every curve.
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(s) => {
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let shift = period / TAU * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
        }
    }
}

impl FromStr for Ease {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.find('(') {
            Some(open) if s.ends_with(')') => (&s[..open], Some(&s[open + 1..s.len() - 1])),
            Some(_) => return Err(ConfigError::UnknownEase(s.to_string())),
            None => (s, None),
        };
        let args: Vec<f64> = match args {
            Some(list) => list
                .split(',')
                .map(|a| a.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|_| ConfigError::UnknownEase(s.to_string()))?,
            None => Vec::new(),
        };
        let ease = match (name, args.as_slice()) {
            ("none" | "linear", []) => Ease::Linear,
            ("power1.out", []) => Ease::Power1Out,
            ("power2.out", []) => Ease::Power2Out,
            ("power3.out", []) => Ease::Power3Out,
            ("power4.out", []) => Ease::Power4Out,
            ("sine.inOut", []) => Ease::SineInOut,
            ("back.out", []) => Ease::BackOut(1.70158),
            ("back.out", [s]) => Ease::BackOut(*s),
            ("elastic.out", []) => Ease::ElasticOut { amplitude: 1.0, period: 0.3 },
            ("elastic.out", [a]) => Ease::ElasticOut { amplitude: *a, period: 0.3 },
            ("elastic.out", [a, p]) => Ease::ElasticOut { amplitude: *a, period: *p },
            _ => return Err(ConfigError::UnknownEase(s.to_string())),
        };
        Ok(ease)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::Power1Out => write!(f, "power1.out"),
            Ease::Power2Out => write!(f, "power2.out"),
            Ease::Power3Out => write!(f, "power3.out"),
            Ease::Power4Out => write!(f, "power4.out"),
            Ease::SineInOut => write!(f, "sine.inOut"),
            Ease::BackOut(s) => write!(f, "back.out({s})"),
            Ease::ElasticOut { amplitude, period } => write!(f, "elastic.out({amplitude}, {period})"),
        }
    }
}

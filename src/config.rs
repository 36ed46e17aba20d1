//! Startup configuration: the motion table and the email relay identifiers.
//!
//! Both are plain values built once in the entry point and handed to whoever
//! needs them.

use std::fmt;
use std::str::FromStr;

use crate::easing::Ease;
use crate::error::ConfigError;
use crate::tween::VisualState;

/// Entrance presets for scroll-bound elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    FadeIn,
    FadeInLeft,
    FadeInRight,
    FadeInScale,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::FadeIn, Preset::FadeInLeft, Preset::FadeInRight, Preset::FadeInScale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::FadeIn => "fade-in",
            Preset::FadeInLeft => "fade-in-left",
            Preset::FadeInRight => "fade-in-right",
            Preset::FadeInScale => "fade-in-scale",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fade-in" | "fadeIn" => Ok(Preset::FadeIn),
            "fade-in-left" | "fadeInLeft" => Ok(Preset::FadeInLeft),
            "fade-in-right" | "fadeInRight" => Ok(Preset::FadeInRight),
            "fade-in-scale" | "fadeInScale" => Ok(Preset::FadeInScale),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durations, eases and preset start states shared by every section.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Seconds.
    pub duration: f64,
    pub ease: Ease,
    pub fade_in: VisualState,
    pub fade_in_left: VisualState,
    pub fade_in_right: VisualState,
    pub fade_in_scale: VisualState,
}

impl Default for MotionConfig {
    fn default() -> Self {
        let hidden = VisualState::REST.with_opacity(0.0);
        Self {
            duration: 1.2,
            ease: Ease::Power3Out,
            fade_in: hidden.with_y(60.0),
            fade_in_left: hidden.with_x(-60.0),
            fade_in_right: hidden.with_x(60.0),
            fade_in_scale: hidden.with_scale(0.8),
        }
    }
}

impl MotionConfig {
    /// Initial visual state of a preset; transitions end at [`VisualState::REST`].
    pub fn initial_state(&self, preset: Preset) -> VisualState {
        match preset {
            Preset::FadeIn => self.fade_in,
            Preset::FadeInLeft => self.fade_in_left,
            Preset::FadeInRight => self.fade_in_right,
            Preset::FadeInScale => self.fade_in_scale,
        }
    }

    /// Requested duration if it is a usable positive number, else the default.
    pub fn duration_or_default(&self, requested: Option<f64>) -> f64 {
        match requested {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                log::debug!("rejecting duration {d}, using {}", self.duration);
                self.duration
            }
            None => self.duration,
        }
    }
}

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Identifiers for the EmailJS relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailConfig {
    /// Read `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID` and `EMAILJS_PUBLIC_KEY`
    /// from the build environment, with placeholders when unset.
    pub fn from_build_env() -> Self {
        Self {
            endpoint: EMAILJS_ENDPOINT.to_string(),
            service_id: option_env!("EMAILJS_SERVICE_ID").unwrap_or("YOUR_SERVICE_ID").to_string(),
            template_id: option_env!("EMAILJS_TEMPLATE_ID").unwrap_or("YOUR_TEMPLATE_ID").to_string(),
            public_key: option_env!("EMAILJS_PUBLIC_KEY").unwrap_or("YOUR_PUBLIC_KEY").to_string(),
        }
    }

    /// Still carrying a placeholder identifier.
    pub fn is_placeholder(&self) -> bool {
        self.service_id.starts_with("YOUR_")
            || self.template_id.starts_with("YOUR_")
            || self.public_key.starts_with("YOUR_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let cfg = MotionConfig::default();
        assert_eq!(cfg.duration, 1.2);
        assert_eq!(cfg.ease, Ease::Power3Out);
        assert_eq!(cfg.initial_state(Preset::FadeIn).y, 60.0);
        assert_eq!(cfg.initial_state(Preset::FadeInLeft).x, -60.0);
        assert_eq!(cfg.initial_state(Preset::FadeInRight).x, 60.0);
        assert_eq!(cfg.initial_state(Preset::FadeInScale).scale, 0.8);
        for preset in Preset::ALL {
            assert_eq!(cfg.initial_state(preset).opacity, 0.0);
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn bad_durations_fall_back() {
        let cfg = MotionConfig::default();
        assert_eq!(cfg.duration_or_default(Some(0.0)), 1.2);
        assert_eq!(cfg.duration_or_default(Some(-1.0)), 1.2);
        assert_eq!(cfg.duration_or_default(Some(f64::NAN)), 1.2);
        assert_eq!(cfg.duration_or_default(Some(0.6)), 0.6);
        assert_eq!(cfg.duration_or_default(None), 1.2);
    }
}

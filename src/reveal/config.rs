use crate::{
    animation::ease::Ease,
    foundation::error::{RevealError, RevealResult},
    trigger::{TriggerPoint, check_order},
};

/// Interpolation bounds and trigger window for one reveal.
///
/// Captured at mount; a changed config means a new binding.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub blur_start: f64, // px
    pub blur_end: f64,
    pub opacity_start: f64,
    pub opacity_end: f64,
    pub brightness_start: f64, // 1.0 = neutral
    pub brightness_end: f64,
    pub trigger_start: TriggerPoint,
    pub trigger_end: TriggerPoint,
    pub scrubbed: bool,
    /// Length of a one-shot reveal in seconds. Ignored when scrubbed.
    pub duration: f64,
    /// Easing of a one-shot reveal. Ignored when scrubbed.
    pub ease: Ease,
    /// Sampled from the host once at mount.
    #[serde(skip)]
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            blur_start: 15.0,
            blur_end: 0.0,
            opacity_start: 0.6,
            opacity_end: 1.0,
            brightness_start: 0.7,
            brightness_end: 1.0,
            trigger_start: TriggerPoint::top_at(85),
            trigger_end: TriggerPoint::top_at(30),
            scrubbed: true,
            duration: 1.0,
            ease: Ease::Linear,
            reduced_motion: false,
        }
    }
}

impl RevealConfig {
    /// Section-level fog: heavier blur and darkening over a wider window.
    pub fn section() -> Self {
        Self {
            blur_start: 20.0,
            opacity_start: 0.5,
            brightness_start: 0.6,
            trigger_start: TriggerPoint::top_at(90),
            trigger_end: TriggerPoint::top_at(40),
            ..Self::default()
        }
    }

    /// Inner content blocks: lighter blur, no darkening.
    pub fn content() -> Self {
        Self {
            blur_start: 10.0,
            opacity_start: 0.3,
            brightness_start: 1.0,
            trigger_start: TriggerPoint::top_at(85),
            trigger_end: TriggerPoint::top_at(45),
            ..Self::default()
        }
    }

    pub fn image() -> Self {
        Self {
            blur_start: 12.0,
            opacity_start: 0.8,
            brightness_start: 1.0,
            trigger_start: TriggerPoint::top_at(95),
            trigger_end: TriggerPoint::top_at(35),
            ..Self::default()
        }
    }

    /// Text units carry their own blur; the container only fades.
    pub fn text() -> Self {
        Self {
            blur_start: 0.0,
            opacity_start: 1.0,
            brightness_start: 1.0,
            trigger_start: TriggerPoint::top_at(85),
            trigger_end: TriggerPoint::top_at(50),
            ..Self::default()
        }
    }

    pub fn with_blur(mut self, start: f64, end: f64) -> Self {
        self.blur_start = start;
        self.blur_end = end;
        self
    }

    pub fn with_opacity(mut self, start: f64, end: f64) -> Self {
        self.opacity_start = start;
        self.opacity_end = end;
        self
    }

    pub fn with_brightness(mut self, start: f64, end: f64) -> Self {
        self.brightness_start = start;
        self.brightness_end = end;
        self
    }

    pub fn with_trigger(mut self, start: &str, end: &str) -> RevealResult<Self> {
        self.trigger_start = TriggerPoint::parse(start)?;
        self.trigger_end = TriggerPoint::parse(end)?;
        Ok(self)
    }

    pub fn one_shot(mut self, duration: f64, ease: Ease) -> Self {
        self.scrubbed = false;
        self.duration = duration;
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> RevealResult<()> {
        let all = [
            self.blur_start,
            self.blur_end,
            self.opacity_start,
            self.opacity_end,
            self.brightness_start,
            self.brightness_end,
            self.duration,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(RevealError::configuration(
                "reveal bounds must be finite numbers",
            ));
        }
        if self.blur_end < 0.0 {
            return Err(RevealError::configuration("blur_end must be >= 0"));
        }
        if self.blur_start < self.blur_end {
            return Err(RevealError::configuration(
                "blur_start must be >= blur_end",
            ));
        }
        for (name, v) in [
            ("opacity_start", self.opacity_start),
            ("opacity_end", self.opacity_end),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(RevealError::configuration(format!(
                    "{name} must be within [0, 1]"
                )));
            }
        }
        if self.brightness_start <= 0.0 || self.brightness_end <= 0.0 {
            return Err(RevealError::configuration("brightness must be > 0"));
        }
        if !self.scrubbed && self.duration <= 0.0 {
            return Err(RevealError::configuration(
                "one-shot duration must be > 0 seconds",
            ));
        }
        check_order(&self.trigger_start, &self.trigger_end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/config.rs"]
mod tests;

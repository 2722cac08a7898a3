use crate::{
    animation::lerp::Lerp,
    foundation::core::{Progress, css_number},
};

/// Visual state of one node at one instant.
///
/// Unset channels are never written, so a snapshot only touches the
/// properties its track animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct StyleSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y_px: Option<f64>,
}

impl StyleSnapshot {
    pub fn at(from: &Self, to: &Self, progress: Progress) -> Self {
        Self::lerp(from, to, progress.get())
    }

    /// CSS declarations for the set channels, in a stable order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(3);

        let mut filter = Vec::new();
        if let Some(b) = self.blur_px {
            filter.push(format!("blur({}px)", css_number(b.max(0.0))));
        }
        if let Some(b) = self.brightness {
            filter.push(format!("brightness({})", css_number(b)));
        }
        if !filter.is_empty() {
            out.push(("filter", filter.join(" ")));
        }

        if let Some(o) = self.opacity {
            out.push(("opacity", css_number(o.clamp(0.0, 1.0))));
        }

        let mut transform = Vec::new();
        if let Some(y) = self.translate_y_px {
            transform.push(format!("translateY({}px)", css_number(y)));
        }
        if let Some(s) = self.scale {
            transform.push(format!("scale({})", css_number(s)));
        }
        if !transform.is_empty() {
            out.push(("transform", transform.join(" ")));
        }

        out
    }
}

impl Lerp for StyleSnapshot {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            blur_px: Lerp::lerp(&a.blur_px, &b.blur_px, t),
            brightness: Lerp::lerp(&a.brightness, &b.brightness, t),
            opacity: Lerp::lerp(&a.opacity, &b.opacity, t),
            scale: Lerp::lerp(&a.scale, &b.scale, t),
            translate_y_px: Lerp::lerp(&a.translate_y_px, &b.translate_y_px, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/snapshot.rs"]
mod tests;

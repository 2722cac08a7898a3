//! Trigger points and scroll-progress geometry.
//!
//! A trigger point is written `"<element anchor> <viewport anchor>"`, e.g.
//! `"top 85%"`: the reveal starts when the element's top edge reaches 85% of the
//! way down the viewport. Anchors accept `top`, `center`, `bottom`, a
//! percentage, a pixel length (`120px` or a bare number) and an optional
//! `+=`/`-=` offset (`top+=40`, `bottom-=10%`).

use std::fmt;

use crate::foundation::{
    core::{Progress, Rect},
    error::{RevealError, RevealResult},
};

/// A position along one axis: `fraction * extent + offset_px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub fraction: f64,
    pub offset_px: f64,
}

impl Anchor {
    pub const fn fraction(fraction: f64) -> Self {
        Self {
            fraction,
            offset_px: 0.0,
        }
    }

    pub fn resolve(self, extent: f64) -> f64 {
        self.fraction * extent + self.offset_px
    }

    fn is_pure_fraction(self) -> bool {
        self.offset_px == 0.0
    }

    fn parse(token: &str) -> RevealResult<Self> {
        let token = token.trim().to_ascii_lowercase();
        if token.is_empty() {
            return Err(RevealError::configuration("trigger anchor must be non-empty"));
        }

        let (base, offset) = match token.find("+=").or_else(|| token.find("-=")) {
            Some(idx) => {
                let sign = if token[idx..].starts_with('-') {
                    -1.0
                } else {
                    1.0
                };
                (&token[..idx], Some((sign, &token[idx + 2..])))
            }
            None => (token.as_str(), None),
        };

        let mut anchor = match base {
            "top" => Anchor::fraction(0.0),
            "center" => Anchor::fraction(0.5),
            "bottom" => Anchor::fraction(1.0),
            other => parse_length(other)?,
        };

        if let Some((sign, rel)) = offset {
            let rel = parse_length(rel)?;
            anchor.fraction += sign * rel.fraction;
            anchor.offset_px += sign * rel.offset_px;
        }

        Ok(anchor)
    }
}

fn parse_length(s: &str) -> RevealResult<Anchor> {
    let bad = || RevealError::configuration(format!("invalid trigger length '{s}'"));
    let (num, is_percent) = if let Some(n) = s.strip_suffix('%') {
        (n, true)
    } else if let Some(n) = s.strip_suffix("px") {
        (n, false)
    } else {
        (s, false)
    };
    let v: f64 = num.trim().parse().map_err(|_| bad())?;
    if !v.is_finite() {
        return Err(bad());
    }
    Ok(if is_percent {
        Anchor::fraction(v / 100.0)
    } else {
        Anchor {
            fraction: 0.0,
            offset_px: v,
        }
    })
}

/// One edge of a trigger window: which point of the element meets which point
/// of the viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPoint {
    text: String,
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPoint {
    pub fn parse(text: &str) -> RevealResult<Self> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let [element, viewport] = parts.as_slice() else {
            return Err(RevealError::configuration(format!(
                "trigger point '{text}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            text: parts.join(" "),
            element: Anchor::parse(element)?,
            viewport: Anchor::parse(viewport)?,
        })
    }

    /// `"top <percent>%"`.
    pub fn top_at(percent: u32) -> Self {
        Self {
            text: format!("top {percent}%"),
            element: Anchor::fraction(0.0),
            viewport: Anchor::fraction(f64::from(percent) / 100.0),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Document scroll offset at which this point is reached for an element
    /// laid out at `bounds`.
    pub fn scroll_offset(&self, bounds: Rect, viewport_height: f64) -> f64 {
        bounds.y0 + self.element.resolve(bounds.height()) - self.viewport.resolve(viewport_height)
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for TriggerPoint {
    type Error = RevealError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TriggerPoint> for String {
    fn from(value: TriggerPoint) -> Self {
        value.text
    }
}

/// Geometry-independent ordering check for a start/end pair.
///
/// Only catches windows whose order does not depend on element height or
/// viewport height; [`ScrollSpan::resolve`] checks the rest at attach.
pub fn check_order(start: &TriggerPoint, end: &TriggerPoint) -> RevealResult<()> {
    let unreachable = || {
        RevealError::configuration(format!(
            "trigger end '{end}' is not after trigger start '{start}' in scroll order"
        ))
    };
    if start.element == end.element
        && start.viewport.is_pure_fraction()
        && end.viewport.is_pure_fraction()
        && end.viewport.fraction >= start.viewport.fraction
    {
        return Err(unreachable());
    }
    if start.viewport == end.viewport
        && start.element.is_pure_fraction()
        && end.element.is_pure_fraction()
        && end.element.fraction <= start.element.fraction
    {
        return Err(unreachable());
    }
    Ok(())
}

/// A trigger window resolved to document scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpan {
    pub start: f64,
    pub end: f64,
}

impl ScrollSpan {
    pub fn resolve(
        start: &TriggerPoint,
        end: &TriggerPoint,
        bounds: Rect,
        viewport_height: f64,
    ) -> RevealResult<Self> {
        let s = start.scroll_offset(bounds, viewport_height);
        let e = end.scroll_offset(bounds, viewport_height);
        if !s.is_finite() || !e.is_finite() || e <= s {
            return Err(RevealError::configuration(format!(
                "trigger end '{end}' resolves to scroll {e} which is not after start '{start}' at {s}"
            )));
        }
        Ok(Self { start: s, end: e })
    }

    pub fn progress(self, scroll_y: f64) -> Progress {
        Progress::new((scroll_y - self.start) / (self.end - self.start))
    }

    /// Whether the start threshold has been crossed.
    pub fn entered(self, scroll_y: f64) -> bool {
        scroll_y >= self.start
    }
}

#[cfg(test)]
#[path = "../tests/unit/trigger.rs"]
mod tests;

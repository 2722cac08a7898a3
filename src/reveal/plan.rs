use crate::{
    animation::{ease::Ease, lerp::Lerp},
    foundation::core::{NodeId, Progress},
    reveal::snapshot::StyleSnapshot,
};

/// Shortest timeline. The container pass stretches to the full timeline when
/// staggered children end later. Offsets are in the same units, which are
/// seconds for a one-shot reveal of `duration = 1.0`.
pub const CONTAINER_SPAN: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackRole {
    Target,
    Overlay,
    Image,
    Vignette,
    Child(usize),
    Unit(usize),
}

impl TrackRole {
    /// Container-level tracks follow scroll progress linearly across the
    /// whole timeline; only children and units are offset on it.
    pub fn spans_timeline(self) -> bool {
        matches!(
            self,
            Self::Target | Self::Overlay | Self::Image | Self::Vignette
        )
    }
}

/// One node's tween on the shared reveal timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub node: NodeId,
    pub role: TrackRole,
    pub at: f64,
    pub duration: f64,
    pub from: StyleSnapshot,
    pub to: StyleSnapshot,
    pub ease: Ease,
}

impl Track {
    pub fn end_time(&self) -> f64 {
        self.at + self.duration
    }

    pub fn sample(&self, t: f64) -> StyleSnapshot {
        let local = if self.duration <= 0.0 {
            if t >= self.at { 1.0 } else { 0.0 }
        } else {
            (t - self.at) / self.duration
        };
        StyleSnapshot::lerp(&self.from, &self.to, self.ease.apply(local))
    }
}

/// Every tween a binding drives, compiled from its presentation policy.
///
/// Style output is a pure function of the plan and a progress value; nothing is
/// accumulated between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPlan {
    pub tracks: Vec<Track>,
    pub total: f64,
}

impl RevealPlan {
    pub fn new(mut tracks: Vec<Track>) -> Self {
        let total = tracks
            .iter()
            .filter(|t| !t.role.spans_timeline())
            .map(Track::end_time)
            .fold(CONTAINER_SPAN, f64::max);
        for t in tracks.iter_mut().filter(|t| t.role.spans_timeline()) {
            t.at = 0.0;
            t.duration = total;
        }
        Self { tracks, total }
    }

    pub fn track(&self, role: TrackRole) -> Option<&Track> {
        self.tracks.iter().find(|t| t.role == role)
    }

    /// Samples the timeline at `progress * total`.
    pub fn sample(&self, progress: Progress) -> Vec<(NodeId, StyleSnapshot)> {
        self.sample_time(progress.get() * self.total)
    }

    pub fn sample_time(&self, t: f64) -> Vec<(NodeId, StyleSnapshot)> {
        if t >= self.total {
            return self.end_state();
        }
        if t <= 0.0 {
            return self.start_state();
        }
        self.tracks.iter().map(|tr| (tr.node, tr.sample(t))).collect()
    }

    pub fn start_state(&self) -> Vec<(NodeId, StyleSnapshot)> {
        self.tracks.iter().map(|tr| (tr.node, tr.from)).collect()
    }

    pub fn end_state(&self) -> Vec<(NodeId, StyleSnapshot)> {
        self.tracks.iter().map(|tr| (tr.node, tr.to)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/plan.rs"]
mod tests;

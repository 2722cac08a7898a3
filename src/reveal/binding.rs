use crate::{
    foundation::{
        core::{BindingId, FrameHandle, NodeId, ObserverId, Progress},
        error::{RevealError, RevealResult},
    },
    host::RevealHost,
    reveal::{
        config::RevealConfig,
        plan::RevealPlan,
        presentation::{Mounted, Presentation},
        snapshot::StyleSnapshot,
    },
    trigger::ScrollSpan,
};

/// Why a binding stopped listening to scroll while still attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleReason {
    ReducedMotion,
    EnvironmentUnavailable,
    /// A one-shot reveal finished playing.
    Completed,
}

/// Observable lifecycle: `Unattached -> Observing | Settled -> Detached`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unattached,
    Observing,
    Settled(SettleReason),
    Detached,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingStats {
    pub scroll_events: u64,
    pub frames_applied: u64,
    pub stale_frames: u64,
    pub detached_callbacks: u64,
    pub style_writes: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum OneShot {
    Waiting,
    Playing { started_at: f64 },
}

#[derive(Debug)]
struct Observing {
    observer: ObserverId,
    span: ScrollSpan,
    pending: Option<FrameHandle>,
    one_shot: OneShot,
    last_progress: Option<f64>,
}

#[derive(Debug)]
enum State {
    Unattached,
    Observing(Observing),
    Settled(SettleReason),
    Detached,
}

/// Live association between one target node and one reveal config.
///
/// Owned by whoever mounted it. All host callbacks are delivered through
/// [`on_scroll`](Self::on_scroll) and [`on_frame`](Self::on_frame); both are
/// no-ops unless the binding is observing.
#[derive(Debug)]
pub struct RevealBinding {
    id: BindingId,
    target: NodeId,
    config: RevealConfig,
    presentation: Presentation,
    mounted: Mounted,
    plan: RevealPlan,
    state: State,
    stats: BindingStats,
}

impl RevealBinding {
    pub fn new(
        id: BindingId,
        target: NodeId,
        config: RevealConfig,
        presentation: Presentation,
    ) -> Self {
        Self {
            id,
            target,
            config,
            presentation,
            mounted: Mounted::default(),
            plan: RevealPlan::new(Vec::new()),
            state: State::Unattached,
            stats: BindingStats::default(),
        }
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    pub fn plan(&self) -> &RevealPlan {
        &self.plan
    }

    pub fn stats(&self) -> BindingStats {
        self.stats
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match &self.state {
            State::Unattached => Lifecycle::Unattached,
            State::Observing(_) => Lifecycle::Observing,
            State::Settled(r) => Lifecycle::Settled(*r),
            State::Detached => Lifecycle::Detached,
        }
    }

    pub fn is_observing(&self) -> bool {
        matches!(self.state, State::Observing(_))
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.state {
            State::Observing(o) => o.pending,
            _ => None,
        }
    }

    /// Mounts the presentation, writes the start state and starts observing.
    ///
    /// Only configuration errors are returned. A host without scroll
    /// observation, or a reduced-motion preference, leaves the content in its
    /// end state with no observer.
    #[tracing::instrument(skip(self, host), fields(binding = self.id.0, kind = self.presentation.name()))]
    pub fn attach(&mut self, host: &mut dyn RevealHost) -> RevealResult<()> {
        if !matches!(self.state, State::Unattached) {
            return Err(RevealError::configuration(
                "binding can only be attached once",
            ));
        }
        self.config.validate()?;
        self.presentation.validate()?;
        if !host.is_connected(self.target) {
            return Err(RevealError::configuration(
                "target node must be attached to the document before it is revealed",
            ));
        }

        let span = if self.config.reduced_motion {
            None
        } else {
            match host.bounds(self.target) {
                Some(bounds) => Some(ScrollSpan::resolve(
                    &self.config.trigger_start,
                    &self.config.trigger_end,
                    bounds,
                    host.viewport().height,
                )?),
                None => None,
            }
        };

        self.mounted = self.presentation.mount(host, self.target)?;
        self.plan = self
            .presentation
            .compile(self.target, &self.config, &self.mounted);

        if self.config.reduced_motion {
            tracing::debug!("reduced motion preferred, revealing immediately");
            self.settle(host, SettleReason::ReducedMotion);
            return Ok(());
        }

        let Some(span) = span else {
            self.fall_back(host, "target bounds are unavailable");
            return Ok(());
        };

        let observer = match host.observe_scroll(self.id) {
            Ok(observer) => observer,
            Err(err) => {
                self.fall_back(host, &err.to_string());
                return Ok(());
            }
        };

        let snapshot = self.plan.start_state();
        self.write(host, &snapshot);

        let pending = Some(host.request_frame(self.id));
        self.state = State::Observing(Observing {
            observer,
            span,
            pending,
            one_shot: OneShot::Waiting,
            last_progress: None,
        });
        tracing::debug!(start = span.start, end = span.end, "observing scroll");
        Ok(())
    }

    /// Scroll or resize notification. Coalesces into at most one pending frame.
    pub fn on_scroll(&mut self, host: &mut dyn RevealHost) {
        let State::Observing(obs) = &mut self.state else {
            return;
        };
        self.stats.scroll_events += 1;
        if obs.pending.is_none() {
            obs.pending = Some(host.request_frame(self.id));
        }
    }

    /// Animation-frame callback. `now` is the frame timestamp in seconds.
    pub fn on_frame(&mut self, host: &mut dyn RevealHost, handle: FrameHandle, now: f64) {
        let State::Observing(obs) = &mut self.state else {
            self.stats.stale_frames += 1;
            return;
        };
        if obs.pending != Some(handle) {
            self.stats.stale_frames += 1;
            tracing::trace!(handle = handle.0, "discarding stale frame");
            return;
        }
        obs.pending = None;

        let bounds = host
            .bounds(self.target)
            .filter(|_| host.is_connected(self.target));
        let Some(bounds) = bounds else {
            self.stats.detached_callbacks += 1;
            if cfg!(debug_assertions) {
                let warning = RevealError::detached_target(format!(
                    "frame for binding {} after target left the document",
                    self.id.0
                ));
                tracing::warn!("{warning}");
            }
            return;
        };

        let viewport = host.viewport();
        if let Ok(span) = ScrollSpan::resolve(
            &self.config.trigger_start,
            &self.config.trigger_end,
            bounds,
            viewport.height,
        ) {
            obs.span = span;
        }
        let span = obs.span;

        if self.config.scrubbed {
            let progress = span.progress(viewport.scroll_y);
            if obs.last_progress == Some(progress.get()) {
                return;
            }
            obs.last_progress = Some(progress.get());
            tracing::trace!(progress = progress.get(), "scrub");
            let snapshot = self.plan.sample(progress);
            self.write(host, &snapshot);
            self.stats.frames_applied += 1;
            return;
        }

        let started_at = match obs.one_shot {
            OneShot::Waiting if span.entered(viewport.scroll_y) => {
                tracing::debug!("entered trigger window, playing one-shot reveal");
                obs.one_shot = OneShot::Playing { started_at: now };
                now
            }
            OneShot::Waiting => return,
            OneShot::Playing { started_at } => started_at,
        };

        let t = (now - started_at).max(0.0) / self.config.duration;
        let done = t >= self.plan.total;
        let snapshot = self.plan.sample_time(t);
        self.write(host, &snapshot);
        self.stats.frames_applied += 1;

        if done {
            self.finish_observing(host);
            self.state = State::Settled(SettleReason::Completed);
            tracing::debug!("one-shot reveal completed");
        } else if let State::Observing(obs) = &mut self.state {
            obs.pending = Some(host.request_frame(self.id));
        }
    }

    /// Stops observing and releases owned nodes. Safe to call repeatedly.
    pub fn detach(&mut self, host: &mut dyn RevealHost) {
        match self.state {
            State::Detached => return,
            State::Unattached => {}
            State::Observing(_) => {
                self.finish_observing(host);
                self.remove_created(host);
            }
            State::Settled(_) => self.remove_created(host),
        }
        self.state = State::Detached;
        tracing::debug!(binding = self.id.0, "detached");
    }

    /// Current progress through the trigger window, for diagnostics.
    pub fn progress(&self, host: &dyn RevealHost) -> Option<Progress> {
        let State::Observing(obs) = &self.state else {
            return None;
        };
        Some(obs.span.progress(host.viewport().scroll_y))
    }

    fn finish_observing(&mut self, host: &mut dyn RevealHost) {
        if let State::Observing(obs) = &mut self.state {
            if let Some(handle) = obs.pending.take() {
                host.cancel_frame(handle);
            }
            host.unobserve(obs.observer);
        }
    }

    fn remove_created(&mut self, host: &mut dyn RevealHost) {
        for node in self.mounted.created.drain(..) {
            host.remove_node(node);
        }
    }

    fn settle(&mut self, host: &mut dyn RevealHost, reason: SettleReason) {
        let snapshot = self.plan.end_state();
        self.write(host, &snapshot);
        self.state = State::Settled(reason);
    }

    fn fall_back(&mut self, host: &mut dyn RevealHost, why: &str) {
        if cfg!(debug_assertions) {
            tracing::warn!(binding = self.id.0, "{why}; revealing without animation");
        }
        self.settle(host, SettleReason::EnvironmentUnavailable);
    }

    fn write(&mut self, host: &mut dyn RevealHost, snapshot: &[(NodeId, StyleSnapshot)]) {
        for (node, style) in snapshot {
            for (property, value) in style.declarations() {
                host.set_style(*node, property, &value);
                self.stats.style_writes += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/binding.rs"]
mod tests;

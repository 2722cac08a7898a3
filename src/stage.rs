use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{BindingId, FrameHandle, NodeId},
        error::{RevealError, RevealResult},
    },
    host::RevealHost,
    reveal::{binding::RevealBinding, config::RevealConfig, presentation::Presentation},
    trigger::ScrollSpan,
};

/// Owns the bindings of one page and routes host events to them.
///
/// Bindings never see each other; the stage only forwards scroll
/// notifications to observing bindings and frames to their owner.
#[derive(Debug, Default)]
pub struct Stage {
    next_id: u64,
    bindings: BTreeMap<BindingId, RevealBinding>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a reveal on `target`. The host's reduced-motion preference is
    /// sampled here, once.
    pub fn mount(
        &mut self,
        host: &mut dyn RevealHost,
        target: NodeId,
        mut config: RevealConfig,
        presentation: Presentation,
    ) -> RevealResult<BindingId> {
        config.reduced_motion |= host.prefers_reduced_motion();

        let id = BindingId(self.next_id);
        self.next_id += 1;

        let mut binding = RevealBinding::new(id, target, config, presentation);
        binding.attach(host)?;
        self.bindings.insert(id, binding);
        Ok(id)
    }

    /// Detaches and drops a binding. Returns `false` for unknown ids.
    pub fn unmount(&mut self, host: &mut dyn RevealHost, id: BindingId) -> bool {
        match self.bindings.remove(&id) {
            Some(mut binding) => {
                binding.detach(host);
                true
            }
            None => false,
        }
    }

    /// Replaces a binding's config: the old binding is torn down and a new
    /// one attached to the same target under the same id.
    ///
    /// The new config is checked before anything is torn down. If attaching
    /// still fails, the previous config is reattached so the target keeps
    /// revealing.
    pub fn reconfigure(
        &mut self,
        host: &mut dyn RevealHost,
        id: BindingId,
        mut config: RevealConfig,
    ) -> RevealResult<()> {
        let Some(old) = self.bindings.get(&id) else {
            return Err(RevealError::configuration(format!(
                "no binding with id {}",
                id.0
            )));
        };
        let target = old.target();
        let presentation = old.presentation().clone();
        let previous = old.config().clone();

        config.reduced_motion |= host.prefers_reduced_motion();
        config.validate()?;
        match host.bounds(target) {
            Some(bounds) if !config.reduced_motion => {
                ScrollSpan::resolve(
                    &config.trigger_start,
                    &config.trigger_end,
                    bounds,
                    host.viewport().height,
                )?;
            }
            _ => {}
        }

        if let Some(mut old) = self.bindings.remove(&id) {
            old.detach(host);
        }

        let mut binding = RevealBinding::new(id, target, config, presentation.clone());
        match binding.attach(host) {
            Ok(()) => {
                self.bindings.insert(id, binding);
                Ok(())
            }
            Err(err) => {
                let mut restored = RevealBinding::new(id, target, previous, presentation);
                match restored.attach(host) {
                    Ok(()) => {
                        self.bindings.insert(id, restored);
                    }
                    Err(again) => {
                        tracing::debug!(binding = id.0, error = %again, "could not restore binding");
                    }
                }
                Err(err)
            }
        }
    }

    /// Forwards a scroll or resize event to every observing binding.
    pub fn scroll(&mut self, host: &mut dyn RevealHost) {
        for binding in self.bindings.values_mut() {
            if binding.is_observing() {
                binding.on_scroll(host);
            }
        }
    }

    /// Delivers an animation frame to the binding that requested it.
    pub fn frame(
        &mut self,
        host: &mut dyn RevealHost,
        owner: BindingId,
        handle: FrameHandle,
        now: f64,
    ) {
        match self.bindings.get_mut(&owner) {
            Some(binding) => binding.on_frame(host, handle, now),
            None => tracing::trace!(owner = owner.0, "frame for unmounted binding"),
        }
    }

    pub fn unmount_all(&mut self, host: &mut dyn RevealHost) {
        for (_, mut binding) in std::mem::take(&mut self.bindings) {
            binding.detach(host);
        }
    }

    pub fn binding(&self, id: BindingId) -> Option<&RevealBinding> {
        self.bindings.get(&id)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RevealBinding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//! The seam between the reveal engine and a document.
//!
//! A browser adapter implements [`RevealHost`] over real DOM nodes,
//! `requestAnimationFrame` and a scroll/resize listener; the bundled
//! [`HeadlessDocument`](crate::HeadlessDocument) implements it in memory.
//! Event delivery runs the other way: the platform calls
//! [`Stage::scroll`](crate::Stage::scroll) and
//! [`Stage::frame`](crate::Stage::frame) from its callbacks.

use crate::foundation::{
    core::{BindingId, FrameHandle, NodeId, ObserverId, Rect, Viewport},
    error::RevealResult,
};

/// Nodes the engine creates inside a wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Full-size fog layer, inserted as the first child. Decorative: hosts
    /// hide it from assistive technology.
    Overlay,
    /// Image vignette layer, appended after the image. Also decorative.
    Vignette,
    /// One split text unit, appended in order.
    Unit { text: String },
}

impl NodeKind {
    pub fn is_prepended(&self) -> bool {
        matches!(self, Self::Overlay)
    }

    pub fn is_decorative(&self) -> bool {
        matches!(self, Self::Overlay | Self::Vignette)
    }
}

pub trait RevealHost {
    /// Whether `node` is still attached to the document tree.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Layout box in document coordinates, `None` when it cannot be measured.
    fn bounds(&self, node: NodeId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn has_marker(&self, node: NodeId, marker: &str) -> bool;

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> RevealResult<NodeId>;

    fn remove_node(&mut self, node: NodeId);

    /// Subscribes `owner` to scroll/resize notifications.
    ///
    /// Hosts without a scroll primitive return
    /// [`RevealError::EnvironmentUnavailable`](crate::RevealError::EnvironmentUnavailable).
    fn observe_scroll(&mut self, owner: BindingId) -> RevealResult<ObserverId>;

    fn unobserve(&mut self, observer: ObserverId);

    /// Schedules one animation-frame callback for `owner`.
    fn request_frame(&mut self, owner: BindingId) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    fn prefers_reduced_motion(&self) -> bool;
}

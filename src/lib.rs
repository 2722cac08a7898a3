//! Scroll-driven "fog reveal" engine.
//!
//! Content starts blurred, darkened and faded, and sharpens as the viewport
//! scrolls through a trigger window. One interpolation engine drives every
//! variant:
//!
//! 1. **Configure**: a [`RevealConfig`] (bounds + trigger window) and a
//!    [`Presentation`] policy (section fog, staggered content, image zoom
//!    settle, split text).
//! 2. **Attach**: [`Stage::mount`] builds a [`RevealBinding`], compiles a
//!    [`RevealPlan`] and writes the start state before any scroll event.
//! 3. **Drive**: the host forwards scroll events to [`Stage::scroll`] and
//!    animation frames to [`Stage::frame`]; each binding coalesces scroll
//!    events into one frame and writes `filter`, `opacity` and `transform`.
//! 4. **Detach**: [`Stage::unmount`] cancels the pending frame and the
//!    observer before returning.
//!
//! The document is reached only through [`RevealHost`]. [`HeadlessDocument`]
//! is an in-memory host for tests and the `scrollfog` CLI.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod headless;
mod host;
mod page;
mod reveal;
mod stage;
mod trigger;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use foundation::core::{
    BindingId, FrameHandle, NodeId, ObserverId, Progress, Rect, Rgba, Viewport, css_number,
};
pub use foundation::error::{RevealError, RevealResult};
pub use headless::{HeadlessDocument, StyleWrite};
pub use host::{NodeKind, RevealHost};
pub use page::{ChildSpec, MountedPage, PageSpec, RevealSpec};
pub use reveal::binding::{BindingStats, Lifecycle, RevealBinding, SettleReason};
pub use reveal::config::RevealConfig;
pub use reveal::plan::{CONTAINER_SPAN, RevealPlan, Track, TrackRole};
pub use reveal::presentation::{
    ContentOptions, GradientDirection, ImageOptions, Mounted, OverlayFill, Presentation,
    REVEAL_CHILD_MARKER, SectionOptions, TextOptions,
};
pub use reveal::snapshot::StyleSnapshot;
pub use reveal::text::{RevealUnit, SPACE_MARKER, SplitMode, join_rendered, split_units};
pub use stage::Stage;
pub use trigger::{Anchor, ScrollSpan, TriggerPoint};

//! In-memory document implementing [`RevealHost`].
//!
//! Records every style write, observer and frame request so tests and the CLI
//! can drive a page without a browser.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::{
        core::{BindingId, FrameHandle, NodeId, ObserverId, Rect, Viewport},
        error::{RevealError, RevealResult},
    },
    host::{NodeKind, RevealHost},
    stage::Stage,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleWrite {
    pub node: NodeId,
    pub property: String,
    pub value: String,
}

#[derive(Clone, Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Option<Rect>,
    connected: bool,
    markers: BTreeSet<String>,
    text: Option<String>,
    decorative: bool,
    styles: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct HeadlessDocument {
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    viewport: Viewport,
    reduced_motion: bool,
    scroll_observation: bool,
    observers: BTreeMap<ObserverId, BindingId>,
    frames: BTreeMap<FrameHandle, BindingId>,
    next_node: u64,
    next_observer: u64,
    next_frame: u64,
    writes: Vec<StyleWrite>,
}

impl HeadlessDocument {
    pub fn new(viewport_height: f64) -> RevealResult<Self> {
        let viewport = Viewport::new(0.0, viewport_height)?;
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                connected: true,
                ..Node::default()
            },
        );
        Ok(Self {
            nodes,
            root,
            viewport,
            reduced_motion: false,
            scroll_observation: true,
            observers: BTreeMap::new(),
            frames: BTreeMap::new(),
            next_node: 1,
            next_observer: 0,
            next_frame: 0,
            writes: Vec::new(),
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends an element laid out at `bounds` (document coordinates).
    pub fn add_element(&mut self, parent: NodeId, bounds: Rect) -> NodeId {
        let id = self.insert_node(parent, false);
        if let Some(n) = self.nodes.get_mut(&id) {
            n.bounds = Some(bounds);
        }
        id
    }

    pub fn mark(&mut self, node: NodeId, marker: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.markers.insert(marker.to_string());
        }
    }

    /// Removes `node` and its subtree from the document without telling any
    /// binding, like a framework tearing down markup out of order.
    pub fn disconnect(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.get_mut(&id) {
                n.connected = false;
                stack.extend(n.children.iter().copied());
            }
        }
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    /// Simulates a context without scroll observation.
    pub fn set_scroll_observation(&mut self, available: bool) {
        self.scroll_observation = available;
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn resize(&mut self, viewport_height: f64) -> RevealResult<()> {
        self.viewport = Viewport::new(self.viewport.scroll_y, viewport_height)?;
        Ok(())
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(&node)?
            .styles
            .get(property)
            .map(String::as_str)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node)?.text.as_deref()
    }

    /// Whether `node` was created hidden from assistive technology.
    pub fn is_decorative(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.decorative)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    pub fn take_writes(&mut self) -> Vec<StyleWrite> {
        std::mem::take(&mut self.writes)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn observers_for(&self, owner: BindingId) -> usize {
        self.observers.values().filter(|o| **o == owner).count()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_frames_for(&self, owner: BindingId) -> usize {
        self.frames.values().filter(|o| **o == owner).count()
    }

    /// Removes and returns every scheduled frame, oldest first.
    pub fn take_frames(&mut self) -> Vec<(BindingId, FrameHandle)> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|(handle, owner)| (owner, handle))
            .collect()
    }

    /// Runs one animation frame: every callback scheduled before this call is
    /// delivered to `stage`. Returns the number of callbacks delivered.
    pub fn pump(&mut self, stage: &mut Stage, now: f64) -> usize {
        let frames = self.take_frames();
        let n = frames.len();
        for (owner, handle) in frames {
            stage.frame(self, owner, handle, now);
        }
        n
    }

    /// Scrolls, notifies observers and runs one frame.
    pub fn scroll_and_pump(&mut self, stage: &mut Stage, scroll_y: f64, now: f64) -> usize {
        self.scroll_to(scroll_y);
        stage.scroll(self);
        self.pump(stage, now)
    }

    fn insert_node(&mut self, parent: NodeId, prepend: bool) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        let connected = self.nodes.get(&parent).is_some_and(|p| p.connected);
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                connected,
                ..Node::default()
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            if prepend {
                p.children.insert(0, id);
            } else {
                p.children.push(id);
            }
        }
        id
    }
}

impl RevealHost for HeadlessDocument {
    fn is_connected(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.connected)
    }

    fn bounds(&self, node: NodeId) -> Option<Rect> {
        let mut cur = self.nodes.get(&node)?;
        // Created layers and units have no box of their own; use the nearest
        // measured ancestor.
        loop {
            if let Some(b) = cur.bounds {
                return Some(b);
            }
            cur = self.nodes.get(&cur.parent?)?;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn has_marker(&self, node: NodeId, marker: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.markers.contains(marker))
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.styles.insert(property.to_string(), value.to_string());
        }
        self.writes.push(StyleWrite {
            node,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> RevealResult<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(RevealError::configuration(format!(
                "parent node {} does not exist",
                parent.0
            )));
        }
        let id = self.insert_node(parent, kind.is_prepended());
        if let Some(n) = self.nodes.get_mut(&id) {
            n.decorative = kind.is_decorative();
            if let NodeKind::Unit { text } = kind {
                n.text = Some(text);
            }
        }
        Ok(id)
    }

    fn remove_node(&mut self, node: NodeId) {
        let Some(n) = self.nodes.remove(&node) else {
            return;
        };
        if let Some(parent) = n.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        let mut stack = n.children;
        while let Some(id) = stack.pop() {
            if let Some(child) = self.nodes.remove(&id) {
                stack.extend(child.children);
            }
        }
    }

    fn observe_scroll(&mut self, owner: BindingId) -> RevealResult<ObserverId> {
        if !self.scroll_observation {
            return Err(RevealError::environment_unavailable(
                "no scroll observation in this context",
            ));
        }
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, owner);
        Ok(id)
    }

    fn unobserve(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
    }

    fn request_frame(&mut self, owner: BindingId) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.frames.insert(handle, owner);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

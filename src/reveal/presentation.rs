use crate::{
    animation::ease::Ease,
    foundation::{
        core::{NodeId, Rgba},
        error::{RevealError, RevealResult},
    },
    host::{NodeKind, RevealHost},
    reveal::{
        config::RevealConfig,
        plan::{CONTAINER_SPAN, RevealPlan, Track, TrackRole},
        snapshot::StyleSnapshot,
        text::{RevealUnit, SplitMode, split_units},
    },
};

/// Marker consumers put on direct children that join the staggered pass.
pub const REVEAL_CHILD_MARKER: &str = "reveal-child";

/// What a binding animates besides the target's own fog pass.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// Target only.
    #[default]
    Plain,
    Section(SectionOptions),
    Content(ContentOptions),
    Image(ImageOptions),
    Text(TextOptions),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    #[default]
    ToBottom,
    ToTop,
    ToLeft,
    ToRight,
}

impl GradientDirection {
    fn css(self) -> &'static str {
        match self {
            Self::ToBottom => "to bottom",
            Self::ToTop => "to top",
            Self::ToLeft => "to left",
            Self::ToRight => "to right",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayFill {
    Flat {
        color: Rgba,
    },
    Gradient {
        #[serde(default)]
        direction: GradientDirection,
        from: Rgba,
        to: Rgba,
    },
}

impl OverlayFill {
    pub fn fog_gradient() -> Self {
        Self::Gradient {
            direction: GradientDirection::ToBottom,
            from: Rgba::new(0, 0, 0, 0.9),
            to: Rgba::new(0, 0, 0, 0.35),
        }
    }

    pub fn css(&self) -> String {
        match self {
            Self::Flat { color } => color.to_css(),
            Self::Gradient {
                direction,
                from,
                to,
            } => format!(
                "linear-gradient({}, {}, {})",
                direction.css(),
                from.to_css(),
                to.to_css()
            ),
        }
    }
}

impl Default for OverlayFill {
    fn default() -> Self {
        Self::Flat {
            color: Rgba::new(5, 5, 8, 0.65),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SectionOptions {
    pub overlay_enabled: bool,
    pub fill: OverlayFill,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            overlay_enabled: true,
            fill: OverlayFill::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContentOptions {
    pub child_marker: String,
    /// Per-child delay increment.
    pub stagger: f64,
    /// Delay of the first child after the container reveal starts.
    pub child_offset: f64,
    pub child_duration: f64,
    pub child_translate_y: f64, // px
    pub child_ease: Ease,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            child_marker: REVEAL_CHILD_MARKER.to_string(),
            stagger: 0.1,
            child_offset: 0.2,
            child_duration: 0.8,
            child_translate_y: 30.0,
            child_ease: Ease::OutCubic,
        }
    }
}

impl ContentOptions {
    /// Timeline offset of the `index`-th marked child.
    pub fn child_delay(&self, index: usize) -> f64 {
        self.child_offset + index as f64 * self.stagger
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub scale_start: f64,
    pub scale_end: f64,
    pub vignette: bool,
    pub vignette_color: Rgba,
    pub vignette_start: f64,
    pub vignette_end: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            scale_start: 1.1,
            scale_end: 1.0,
            vignette: true,
            vignette_color: Rgba::new(0, 0, 0, 0.7),
            vignette_start: 1.0,
            vignette_end: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub text: String,
    pub split: SplitMode,
    pub stagger: f64,
    pub unit_duration: f64,
    pub unit_blur: f64,        // px
    pub unit_translate_y: f64, // px
    pub unit_ease: Ease,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            split: SplitMode::Words,
            stagger: 0.03,
            unit_duration: 0.6,
            unit_blur: 8.0,
            unit_translate_y: 20.0,
            unit_ease: Ease::OutQuad,
        }
    }
}

impl TextOptions {
    pub fn new(text: impl Into<String>, split: SplitMode) -> Self {
        Self {
            text: text.into(),
            split,
            ..Self::default()
        }
    }
}

/// Nodes a presentation found or created under its target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mounted {
    pub overlay: Option<NodeId>,
    pub image: Option<NodeId>,
    pub vignette: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub units: Vec<(NodeId, RevealUnit)>,
    /// Nodes owned by the binding; removed on detach.
    pub created: Vec<NodeId>,
}

impl Presentation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Section(_) => "section",
            Self::Content(_) => "content",
            Self::Image(_) => "image",
            Self::Text(_) => "text",
        }
    }

    /// Preset config matching this presentation.
    pub fn default_config(&self) -> RevealConfig {
        match self {
            Self::Plain => RevealConfig::default(),
            Self::Section(_) => RevealConfig::section(),
            Self::Content(_) => RevealConfig::content(),
            Self::Image(_) => RevealConfig::image(),
            Self::Text(_) => RevealConfig::text(),
        }
    }

    pub fn validate(&self) -> RevealResult<()> {
        fn non_negative(name: &str, v: f64) -> RevealResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(RevealError::configuration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }
        fn positive(name: &str, v: f64) -> RevealResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(RevealError::configuration(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        match self {
            Self::Plain | Self::Section(_) => Ok(()),
            Self::Content(o) => {
                if o.child_marker.trim().is_empty() {
                    return Err(RevealError::configuration(
                        "content child_marker must be non-empty",
                    ));
                }
                non_negative("content stagger", o.stagger)?;
                non_negative("content child_offset", o.child_offset)?;
                positive("content child_duration", o.child_duration)?;
                if !o.child_translate_y.is_finite() {
                    return Err(RevealError::configuration(
                        "content child_translate_y must be finite",
                    ));
                }
                Ok(())
            }
            Self::Image(o) => {
                positive("image scale_start", o.scale_start)?;
                positive("image scale_end", o.scale_end)?;
                for (name, v) in [
                    ("image vignette_start", o.vignette_start),
                    ("image vignette_end", o.vignette_end),
                ] {
                    if !(0.0..=1.0).contains(&v) {
                        return Err(RevealError::configuration(format!(
                            "{name} must be within [0, 1]"
                        )));
                    }
                }
                Ok(())
            }
            Self::Text(o) => {
                non_negative("text stagger", o.stagger)?;
                positive("text unit_duration", o.unit_duration)?;
                non_negative("text unit_blur", o.unit_blur)?;
                if !o.unit_translate_y.is_finite() {
                    return Err(RevealError::configuration(
                        "text unit_translate_y must be finite",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Looks up and creates the nodes this presentation animates, and writes
    /// their static styles.
    pub fn mount(&self, host: &mut dyn RevealHost, target: NodeId) -> RevealResult<Mounted> {
        let mut m = Mounted::default();
        let res = self.mount_into(host, target, &mut m);
        if let Err(err) = res {
            for node in m.created.drain(..) {
                host.remove_node(node);
            }
            return Err(err);
        }
        Ok(m)
    }

    fn mount_into(
        &self,
        host: &mut dyn RevealHost,
        target: NodeId,
        m: &mut Mounted,
    ) -> RevealResult<()> {
        match self {
            Self::Plain => {}
            Self::Section(o) => {
                if o.overlay_enabled {
                    // Content is lifted above the fog layer; the section is
                    // the containing block for both.
                    host.set_style(target, "position", "relative");
                    for child in host.children(target) {
                        host.set_style(child, "position", "relative");
                        host.set_style(child, "z-index", "1");
                    }
                    let overlay = host.create_node(target, NodeKind::Overlay)?;
                    m.created.push(overlay);
                    m.overlay = Some(overlay);
                    write_layer_styles(host, overlay);
                    host.set_style(overlay, "z-index", "0");
                    host.set_style(overlay, "background", &o.fill.css());
                }
            }
            Self::Content(o) => {
                m.children = host
                    .children(target)
                    .into_iter()
                    .filter(|c| host.has_marker(*c, &o.child_marker))
                    .collect();
            }
            Self::Image(o) => {
                let children = host.children(target);
                let [image] = children.as_slice() else {
                    return Err(RevealError::configuration(format!(
                        "image reveal must wrap exactly one image, found {} children",
                        children.len()
                    )));
                };
                let image = *image;
                m.image = Some(image);

                host.set_style(target, "overflow", "hidden");
                host.set_style(target, "position", "relative");
                host.set_style(image, "display", "block");
                host.set_style(image, "width", "100%");
                host.set_style(image, "height", "100%");
                host.set_style(image, "object-fit", "cover");
                host.set_style(image, "transform-origin", "center center");

                if o.vignette {
                    let vignette = host.create_node(target, NodeKind::Vignette)?;
                    m.created.push(vignette);
                    m.vignette = Some(vignette);
                    write_layer_styles(host, vignette);
                    host.set_style(
                        vignette,
                        "background",
                        &format!(
                            "radial-gradient(ellipse at center, rgba(0, 0, 0, 0) 55%, {} 100%)",
                            o.vignette_color.to_css()
                        ),
                    );
                }
            }
            Self::Text(o) => {
                for unit in split_units(&o.text, o.split) {
                    let node = host.create_node(
                        target,
                        NodeKind::Unit {
                            text: unit.rendered.clone(),
                        },
                    )?;
                    m.created.push(node);
                    host.set_style(node, "display", "inline-block");
                    if unit.whitespace {
                        host.set_style(node, "white-space", "pre");
                    }
                    m.units.push((node, unit));
                }
            }
        }
        Ok(())
    }

    /// Compiles the tweens for a mounted presentation.
    pub fn compile(&self, target: NodeId, config: &RevealConfig, m: &Mounted) -> RevealPlan {
        let target_ease = if config.scrubbed {
            Ease::Linear
        } else {
            config.ease
        };
        let span = |node: NodeId, role: TrackRole, from: StyleSnapshot, to: StyleSnapshot| Track {
            node,
            role,
            at: 0.0,
            duration: CONTAINER_SPAN,
            from,
            to,
            ease: target_ease,
        };
        let fog = |full: bool| {
            let brightness = |v: f64| full.then_some(v);
            (
                StyleSnapshot {
                    blur_px: Some(config.blur_start),
                    brightness: brightness(config.brightness_start),
                    opacity: Some(config.opacity_start),
                    ..StyleSnapshot::default()
                },
                StyleSnapshot {
                    blur_px: Some(config.blur_end),
                    brightness: brightness(config.brightness_end),
                    opacity: Some(config.opacity_end),
                    ..StyleSnapshot::default()
                },
            )
        };
        let fade = |from: f64, to: f64| {
            (
                StyleSnapshot {
                    opacity: Some(from),
                    ..StyleSnapshot::default()
                },
                StyleSnapshot {
                    opacity: Some(to),
                    ..StyleSnapshot::default()
                },
            )
        };

        let mut tracks = Vec::new();
        match self {
            Self::Plain | Self::Section(_) | Self::Text(_) => {
                let (from, to) = fog(true);
                tracks.push(span(target, TrackRole::Target, from, to));
            }
            Self::Content(_) => {
                let (from, to) = fog(false);
                tracks.push(span(target, TrackRole::Target, from, to));
            }
            Self::Image(_) => {}
        }

        match self {
            Self::Plain => {}
            Self::Section(_) => {
                if let Some(overlay) = m.overlay {
                    let (from, to) = fade(1.0, 0.0);
                    tracks.push(span(overlay, TrackRole::Overlay, from, to));
                }
            }
            Self::Content(o) => {
                for (i, child) in m.children.iter().enumerate() {
                    tracks.push(Track {
                        node: *child,
                        role: TrackRole::Child(i),
                        at: o.child_delay(i),
                        duration: o.child_duration,
                        from: StyleSnapshot {
                            opacity: Some(0.0),
                            translate_y_px: Some(o.child_translate_y),
                            ..StyleSnapshot::default()
                        },
                        to: StyleSnapshot {
                            opacity: Some(1.0),
                            translate_y_px: Some(0.0),
                            ..StyleSnapshot::default()
                        },
                        ease: o.child_ease,
                    });
                }
            }
            Self::Image(o) => {
                if let Some(image) = m.image {
                    let from = StyleSnapshot {
                        blur_px: Some(config.blur_start),
                        opacity: Some(config.opacity_start),
                        scale: Some(o.scale_start),
                        ..StyleSnapshot::default()
                    };
                    let to = StyleSnapshot {
                        blur_px: Some(config.blur_end),
                        opacity: Some(config.opacity_end),
                        scale: Some(o.scale_end),
                        ..StyleSnapshot::default()
                    };
                    tracks.push(span(image, TrackRole::Image, from, to));
                }
                if let Some(vignette) = m.vignette {
                    let (from, to) = fade(o.vignette_start, o.vignette_end);
                    tracks.push(span(vignette, TrackRole::Vignette, from, to));
                }
            }
            Self::Text(o) => {
                let animated = m.units.iter().filter(|(_, u)| !u.whitespace);
                for (k, (node, _)) in animated.enumerate() {
                    tracks.push(Track {
                        node: *node,
                        role: TrackRole::Unit(k),
                        at: k as f64 * o.stagger,
                        duration: o.unit_duration,
                        from: StyleSnapshot {
                            blur_px: Some(o.unit_blur),
                            opacity: Some(0.0),
                            translate_y_px: Some(o.unit_translate_y),
                            ..StyleSnapshot::default()
                        },
                        to: StyleSnapshot {
                            blur_px: Some(0.0),
                            opacity: Some(1.0),
                            translate_y_px: Some(0.0),
                            ..StyleSnapshot::default()
                        },
                        ease: o.unit_ease,
                    });
                }
            }
        }

        RevealPlan::new(tracks)
    }
}

fn write_layer_styles(host: &mut dyn RevealHost, node: NodeId) {
    host.set_style(node, "position", "absolute");
    host.set_style(node, "inset", "0");
    host.set_style(node, "pointer-events", "none");
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/presentation.rs"]
mod tests;

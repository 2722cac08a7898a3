use std::collections::BTreeSet;

use crate::{
    foundation::{
        core::{BindingId, NodeId, Rect},
        error::{RevealError, RevealResult},
    },
    headless::HeadlessDocument,
    reveal::{config::RevealConfig, presentation::Presentation},
    stage::Stage,
};

/// JSON description of a page of reveals, mounted into a [`HeadlessDocument`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    pub viewport_height: f64,
    #[serde(default)]
    pub reduced_motion: bool,
    pub reveals: Vec<RevealSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    pub id: String,
    pub bounds: Rect,
    #[serde(default)]
    pub presentation: Presentation,
    /// Defaults to the preset of the presentation kind.
    #[serde(default)]
    pub config: Option<RevealConfig>,
    /// Direct children of the target, for content reveals.
    #[serde(default)]
    pub children: Vec<ChildSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChildSpec {
    pub bounds: Rect,
    #[serde(default)]
    pub marked: bool,
}

/// A mounted page: the document, its stage and the binding of each reveal id.
#[derive(Debug)]
pub struct MountedPage {
    pub doc: HeadlessDocument,
    pub stage: Stage,
    pub bindings: Vec<(String, BindingId, NodeId)>,
}

impl PageSpec {
    pub fn from_json(s: &str) -> RevealResult<Self> {
        let page: Self = serde_json::from_str(s)?;
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> RevealResult<()> {
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(RevealError::configuration(
                "viewport_height must be finite and > 0",
            ));
        }
        let mut seen = BTreeSet::new();
        for r in &self.reveals {
            if !seen.insert(r.id.as_str()) {
                return Err(RevealError::configuration(format!(
                    "duplicate reveal id '{}'",
                    r.id
                )));
            }
            if r.bounds.height() <= 0.0 || r.bounds.width() < 0.0 {
                return Err(RevealError::configuration(format!(
                    "reveal '{}' must have a positive height",
                    r.id
                )));
            }
            r.effective_config().validate()?;
            r.presentation.validate()?;
        }
        Ok(())
    }

    pub fn mount(&self) -> RevealResult<MountedPage> {
        self.validate()?;
        let mut doc = HeadlessDocument::new(self.viewport_height)?;
        doc.set_reduced_motion(self.reduced_motion);
        let mut stage = Stage::new();
        let mut bindings = Vec::with_capacity(self.reveals.len());

        for r in &self.reveals {
            let root = doc.root();
            let target = doc.add_element(root, r.bounds);
            for child in &r.children {
                let c = doc.add_element(target, child.bounds);
                if child.marked {
                    let marker = match &r.presentation {
                        Presentation::Content(o) => o.child_marker.as_str(),
                        _ => crate::reveal::presentation::REVEAL_CHILD_MARKER,
                    };
                    doc.mark(c, marker);
                }
            }
            if matches!(r.presentation, Presentation::Image(_)) && r.children.is_empty() {
                doc.add_element(target, r.bounds);
            }

            let id = stage
                .mount(&mut doc, target, r.effective_config(), r.presentation.clone())
                .map_err(|err| match err {
                    RevealError::Configuration(msg) => {
                        RevealError::configuration(format!("reveal '{}': {msg}", r.id))
                    }
                    other => other,
                })?;
            bindings.push((r.id.clone(), id, target));
        }

        Ok(MountedPage {
            doc,
            stage,
            bindings,
        })
    }
}

impl RevealSpec {
    pub fn effective_config(&self) -> RevealConfig {
        self.config
            .clone()
            .unwrap_or_else(|| self.presentation.default_config())
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;

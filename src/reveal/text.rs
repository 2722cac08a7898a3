/// Non-breaking space standing in for a literal space inside a whitespace unit,
/// so inline-block units never collapse the gaps between words.
pub const SPACE_MARKER: char = '\u{00A0}';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    Chars,
    #[default]
    Words,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealUnit {
    pub source: String,
    pub rendered: String,
    pub whitespace: bool,
}

impl RevealUnit {
    fn new(source: String, whitespace: bool) -> Self {
        let rendered = if whitespace {
            source.replace(' ', &SPACE_MARKER.to_string())
        } else {
            source.clone()
        };
        Self {
            source,
            rendered,
            whitespace,
        }
    }
}

/// Splits `text` into ordered reveal units.
///
/// Words mode keeps each whitespace run as its own unit; chars mode emits one
/// unit per `char`.
pub fn split_units(text: &str, mode: SplitMode) -> Vec<RevealUnit> {
    match mode {
        SplitMode::Chars => text
            .chars()
            .map(|c| RevealUnit::new(c.to_string(), c.is_whitespace()))
            .collect(),
        SplitMode::Words => {
            let mut out = Vec::new();
            let mut run = String::new();
            let mut run_ws = false;
            for c in text.chars() {
                let ws = c.is_whitespace();
                if !run.is_empty() && ws != run_ws {
                    out.push(RevealUnit::new(std::mem::take(&mut run), run_ws));
                }
                run_ws = ws;
                run.push(c);
            }
            if !run.is_empty() {
                out.push(RevealUnit::new(run, run_ws));
            }
            out
        }
    }
}

/// Concatenates rendered units with the space marker turned back into spaces.
pub fn join_rendered(units: &[RevealUnit]) -> String {
    units
        .iter()
        .map(|u| u.rendered.replace(SPACE_MARKER, " "))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/text.rs"]
mod tests;

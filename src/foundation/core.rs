/// Identifier substring that marks an element as interactive.
pub const INTERACTIVE_MARKER: &str = "_interactive";

/// Identifier substring that marks an element as animated.
pub const ANIMATED_MARKER: &str = "_animated";

/// Encoding of `_` that vector editors emit into exported ids (`door_x5F_1`).
pub const EDITOR_ESCAPE_ARTIFACT: &str = "x5F_";

/// Class added to the mount point once the graphic is mounted.
pub const COMPLETE_CLASS: &str = "complete";

/// Class added to every interactive element.
pub const INTERACTIVE_CLASS: &str = "interactive";

/// Class added to every animated element.
pub const ANIMATED_CLASS: &str = "animated";

/// MIME type the graphic fetch is forced to.
pub const GRAPHIC_MIME: &str = "image/svg+xml";

/// Fixed tick cadence of animated elements.
pub const FRAME_INTERVAL: Millis = Millis(80);

/// Virtual time in milliseconds on the page clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub fn saturating_add(self, other: Millis) -> Millis {
        Millis(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Percent complete for a byte-level progress report, floored.
///
/// Returns `None` when the total is unknown or zero.
pub fn percent_complete(loaded: u64, total: Option<u64>) -> Option<u8> {
    let total = total.filter(|t| *t > 0)?;
    let pct = (loaded.min(total) as u128 * 100) / total as u128;
    Some(pct as u8)
}

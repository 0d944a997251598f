use crate::campaign::Campaign;
use crate::slot::SlotCounting;
use regex::Regex;
use std::sync::LazyLock;

/// Any bracket character or bare slot keyword, in any case.
static LOOSE_LEFTOVERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[|\]|pre|mid|post").expect("valid leftover pattern"));

/// Complete markers only, in any case.
static BRACKETED_LEFTOVERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(?:pre|mid|post)\]").expect("valid marker pattern"));

/// Splice every spot of the placed campaigns into the script, then strip
/// whatever markers are left.
///
/// Each spot consumes the first remaining `[TYPE]` marker of its type. A
/// spot whose marker is no longer present is dropped silently.
pub fn compose(audio: &str, placed: &[&Campaign], counting: SlotCounting) -> String {
    let mut out = audio.to_string();
    for campaign in placed {
        for spot in &campaign.spots {
            out = out.replacen(spot.slot_type.marker(), &spot.audio, 1);
        }
    }
    strip_markers(&out, counting)
}

/// Remove unused markers from a script.
///
/// `Literal` removes every bracket and every `pre`/`mid`/`post` keyword in
/// any case, including inside ordinary words. `Bracketed` removes only whole
/// leftover markers.
pub fn strip_markers(text: &str, counting: SlotCounting) -> String {
    let pattern = match counting {
        SlotCounting::Literal => &LOOSE_LEFTOVERS,
        SlotCounting::Bracketed => &BRACKETED_LEFTOVERS,
    };
    pattern.replace_all(text, "").into_owned()
}

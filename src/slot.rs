use crate::campaign::Campaign;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

// --- Slot Types ---

/// An ad slot position within an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotType {
    /// Pre-roll, before the episode content.
    Pre,
    /// Mid-roll, inside the episode content.
    Mid,
    /// Post-roll, after the episode content.
    Post,
}

impl SlotType {
    /// Every slot type, in marker order.
    pub const ALL: [SlotType; 3] = [SlotType::Pre, SlotType::Mid, SlotType::Post];

    /// Bare token as it appears inside a marker (e.g. `PRE`).
    pub fn token(self) -> &'static str {
        match self {
            SlotType::Pre => "PRE",
            SlotType::Mid => "MID",
            SlotType::Post => "POST",
        }
    }

    /// Full bracketed marker (e.g. `[PRE]`).
    pub fn marker(self) -> &'static str {
        match self {
            SlotType::Pre => "[PRE]",
            SlotType::Mid => "[MID]",
            SlotType::Post => "[POST]",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// --- Counting Mode ---

/// How slot markers are recognised in an episode script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCounting {
    /// Count the bare token anywhere in the text, so a word such as
    /// `PREVIEW` also counts as a PRE slot.
    #[default]
    Literal,
    /// Count only complete bracketed markers such as `[PRE]`.
    Bracketed,
}

impl fmt::Display for SlotCounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotCounting::Literal => write!(f, "literal"),
            SlotCounting::Bracketed => write!(f, "bracketed"),
        }
    }
}

impl SlotCounting {
    /// Parse a counting mode from a string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(SlotCounting::Literal),
            "bracketed" | "strict" => Ok(SlotCounting::Bracketed),
            _ => Err(format!(
                "Unknown slot counting '{}'. Expected: literal, bracketed",
                s
            )),
        }
    }
}

// --- Slot Counts ---

/// Per-type slot counter.
///
/// Used both as an episode's remaining capacity and as a campaign's
/// type profile (how many spots of each type it needs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotCounts {
    #[serde(rename = "PRE")]
    pre: usize,
    #[serde(rename = "MID")]
    mid: usize,
    #[serde(rename = "POST")]
    post: usize,
}

impl SlotCounts {
    /// Build counts from explicit PRE/MID/POST values.
    pub fn new(pre: usize, mid: usize, post: usize) -> Self {
        SlotCounts { pre, mid, post }
    }

    fn slot_mut(&mut self, slot: SlotType) -> &mut usize {
        match slot {
            SlotType::Pre => &mut self.pre,
            SlotType::Mid => &mut self.mid,
            SlotType::Post => &mut self.post,
        }
    }

    /// Add one to the count of `slot`.
    pub fn increment(&mut self, slot: SlotType) {
        *self.slot_mut(slot) += 1;
    }

    /// Total number of slots across all types.
    pub fn total(&self) -> usize {
        self.pre + self.mid + self.post
    }

    /// Whether `profile` fits: for every type, the profile's count does not
    /// exceed this capacity.
    pub fn fits(&self, profile: &SlotCounts) -> bool {
        SlotType::ALL.iter().all(|&t| profile[t] <= self[t])
    }

    /// Consume the slots of `profile`. Returns false and leaves the
    /// capacity untouched when the profile does not fit.
    pub fn commit(&mut self, profile: &SlotCounts) -> bool {
        if !self.fits(profile) {
            return false;
        }
        for t in SlotType::ALL {
            *self.slot_mut(t) -= profile[t];
        }
        true
    }

    /// Format as "PRE=1 MID=0 POST=2".
    pub fn display(&self) -> String {
        SlotType::ALL
            .iter()
            .map(|t| format!("{}={}", t, self[*t]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Index<SlotType> for SlotCounts {
    type Output = usize;

    fn index(&self, slot: SlotType) -> &usize {
        match slot {
            SlotType::Pre => &self.pre,
            SlotType::Mid => &self.mid,
            SlotType::Post => &self.post,
        }
    }
}

// --- Counting ---

/// Count non-overlapping, case-sensitive occurrences of `slot` in `text`.
pub fn count_slot_type(slot: SlotType, text: &str, counting: SlotCounting) -> usize {
    let needle = match counting {
        SlotCounting::Literal => slot.token(),
        SlotCounting::Bracketed => slot.marker(),
    };
    text.matches(needle).count()
}

/// Count every slot type in an episode script.
pub fn count_episode_slots(audio: &str, counting: SlotCounting) -> SlotCounts {
    let mut counts = SlotCounts::default();
    for slot in SlotType::ALL {
        *counts.slot_mut(slot) = count_slot_type(slot, audio, counting);
    }
    counts
}

/// Count how many spots of each type a campaign carries.
pub fn count_campaign_slots(campaign: &Campaign) -> SlotCounts {
    let mut counts = SlotCounts::default();
    for spot in &campaign.spots {
        counts.increment(spot.slot_type);
    }
    counts
}

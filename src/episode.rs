use crate::error::{PlacementError, Result};
use crate::slot::{SlotCounting, SlotCounts, count_episode_slots};
use serde::{Deserialize, Serialize};

/// A podcast episode script with `[PRE]`, `[MID]` and `[POST]` markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub audio: String,
}

impl Episode {
    pub fn new(id: impl Into<String>, audio: impl Into<String>) -> Self {
        Episode {
            id: id.into(),
            audio: audio.into(),
        }
    }

    /// Slots available in this episode's script.
    pub fn slot_counts(&self, counting: SlotCounting) -> SlotCounts {
        count_episode_slots(&self.audio, counting)
    }

    /// An episode needs a non-blank id for targeting to mean anything.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PlacementError::EmptyEpisodeId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_counts_follow_counting_mode() {
        let ep = Episode::new("ep1", "PREAMBLE [PRE] [POST]");
        assert_eq!(ep.slot_counts(SlotCounting::Literal), SlotCounts::new(2, 0, 1));
        assert_eq!(ep.slot_counts(SlotCounting::Bracketed), SlotCounts::new(1, 0, 1));
    }

    #[test]
    fn validate_rejects_blank_id() {
        assert!(Episode::new("  ", "[PRE]").validate().is_err());
        assert!(Episode::new("ep1", "").validate().is_ok());
    }
}

use crate::error::{PlacementError, Result};
use crate::slot::{SlotCounts, SlotType, count_campaign_slots};
use serde::{Deserialize, Serialize};

/// A single ad spot: the audio to splice into one slot of the given type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    /// Text content substituted for the marker.
    pub audio: String,
    /// Revenue earned when this spot runs.
    pub revenue: f64,
}

impl Spot {
    pub fn new(slot_type: SlotType, audio: impl Into<String>, revenue: f64) -> Self {
        Spot {
            slot_type,
            audio: audio.into(),
            revenue,
        }
    }
}

/// A group of spots that is placed together or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Episode ids this campaign may run on.
    pub targets: Vec<String>,
    /// Spots in placement order.
    pub spots: Vec<Spot>,
}

impl Campaign {
    /// Create an unnamed campaign.
    pub fn new(targets: Vec<String>, spots: Vec<Spot>) -> Self {
        Campaign {
            name: None,
            targets,
            spots,
        }
    }

    /// Builder-style name setter.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for display, falling back to the catalog position (1-based).
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", index + 1))
    }

    /// Whether this campaign may run on `episode_id`.
    pub fn targets_episode(&self, episode_id: &str) -> bool {
        self.targets.iter().any(|t| t == episode_id)
    }

    /// How many slots of each type this campaign needs.
    pub fn profile(&self) -> SlotCounts {
        count_campaign_slots(self)
    }

    /// Sum of all spot revenues.
    pub fn revenue(&self) -> f64 {
        self.spots.iter().map(|s| s.revenue).sum()
    }

    /// Reject campaigns that would otherwise degrade silently: no spots,
    /// or a spot revenue that is negative or not a finite number.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.spots.is_empty() {
            return Err(PlacementError::EmptyCampaign { index });
        }
        if let Some(bad) = self
            .spots
            .iter()
            .find(|s| !s.revenue.is_finite() || s.revenue < 0.0)
        {
            return Err(PlacementError::InvalidRevenue {
                campaign: self.label(index),
                revenue: bad.revenue,
            });
        }
        Ok(())
    }
}

/// Keep the campaigns that target `episode_id`, in input order.
pub fn filter_eligible<'a, I>(episode_id: &str, campaigns: I) -> Vec<&'a Campaign>
where
    I: IntoIterator<Item = &'a Campaign>,
{
    campaigns
        .into_iter()
        .filter(|c| c.targets_episode(episode_id))
        .collect()
}

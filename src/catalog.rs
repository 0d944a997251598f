//! JSON loading for episodes and campaign catalogs.
//!
//! A catalog is a JSON array of campaigns. Each campaign is either an object
//! (`{"name": ..., "targets": [...], "spots": [...]}`) or a bare array of
//! spots that each repeat the campaign's `targets`.

use crate::campaign::{Campaign, Spot};
use crate::episode::Episode;
use crate::error::{PlacementError, Result};
use crate::slot::SlotType;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Spot as written in the array form, carrying its own targets.
#[derive(Debug, Deserialize)]
struct TargetedSpot {
    #[serde(rename = "type")]
    slot_type: SlotType,
    audio: String,
    revenue: f64,
    targets: Vec<String>,
}

/// One catalog entry, in either accepted shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CampaignRecord {
    Object {
        #[serde(default)]
        name: Option<String>,
        targets: Vec<String>,
        spots: Vec<Spot>,
    },
    Spots(Vec<TargetedSpot>),
}

impl CampaignRecord {
    fn into_campaign(self, index: usize) -> Result<Campaign> {
        match self {
            CampaignRecord::Object {
                name,
                targets,
                spots,
            } => Ok(Campaign {
                name,
                targets,
                spots,
            }),
            CampaignRecord::Spots(spots) => {
                // The first spot's targets speak for the campaign.
                let targets = spots
                    .first()
                    .map(|s| s.targets.clone())
                    .unwrap_or_default();
                if spots.iter().any(|s| s.targets != targets) {
                    return Err(PlacementError::MismatchedTargets { index });
                }
                let spots = spots
                    .into_iter()
                    .map(|s| Spot::new(s.slot_type, s.audio, s.revenue))
                    .collect();
                Ok(Campaign::new(targets, spots))
            }
        }
    }
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<Campaign>> {
    let records: Vec<CampaignRecord> = serde_json::from_str(json)?;
    let mut campaigns = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let campaign = record.into_campaign(index)?;
        campaign.validate(index)?;
        campaigns.push(campaign);
    }
    Ok(campaigns)
}

/// Parse and validate an episode from JSON text.
pub fn parse_episode(json: &str) -> Result<Episode> {
    let episode: Episode = serde_json::from_str(json)?;
    episode.validate()?;
    Ok(episode)
}

/// Load a campaign catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Campaign>> {
    let campaigns = parse_catalog(&fs::read_to_string(path)?)?;
    debug!("loaded {} campaign(s) from {}", campaigns.len(), path.display());
    Ok(campaigns)
}

/// Load an episode file.
pub fn load_episode(path: &Path) -> Result<Episode> {
    parse_episode(&fs::read_to_string(path)?)
}

use crate::campaign::{Campaign, filter_eligible};
use crate::composer::compose;
use crate::config::PlacerSettings;
use crate::episode::Episode;
use crate::error::Result;
use crate::placement::{Strategy, select};
use crate::slot::SlotCounts;
use serde::Serialize;
use tracing::info;

/// Result of placing campaigns into one episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// Episode the run was for.
    pub episode_id: String,
    /// Strategy used.
    pub strategy: Strategy,
    /// Composed script with spots spliced in and leftovers stripped.
    pub audio: String,
    /// Labels of placed campaigns, in substitution order.
    pub placed: Vec<String>,
    /// How many catalog campaigns targeted the episode.
    pub eligible_count: usize,
    /// Total revenue of placed spots.
    pub revenue: f64,
    /// Slots found in the episode.
    pub slots_available: SlotCounts,
    /// Slots left unfilled.
    pub slots_remaining: SlotCounts,
}

/// Runs selection and composition for single episodes.
///
/// Holds only settings; every call works on fresh capacity.
#[derive(Debug, Clone, Default)]
pub struct CampaignPlacer {
    settings: PlacerSettings,
}

impl CampaignPlacer {
    pub fn new(settings: PlacerSettings) -> Self {
        CampaignPlacer { settings }
    }

    /// Placer using default settings and the given strategy.
    pub fn with_strategy(strategy: Strategy) -> Self {
        CampaignPlacer::new(PlacerSettings {
            strategy,
            ..PlacerSettings::default()
        })
    }

    pub fn settings(&self) -> &PlacerSettings {
        &self.settings
    }

    /// Validate inputs, pick campaigns for `episode` and compose its audio.
    pub fn place(&self, episode: &Episode, campaigns: &[Campaign]) -> Result<PlacementResult> {
        self.settings.validate()?;
        episode.validate()?;
        for (index, campaign) in campaigns.iter().enumerate() {
            campaign.validate(index)?;
        }

        let counting = self.settings.slot_counting;
        let available = episode.slot_counts(counting);
        let eligible = filter_eligible(&episode.id, campaigns);

        let placement = select(
            self.settings.strategy,
            available,
            &eligible,
            self.settings.max_candidates,
        )?;

        let audio = compose(&episode.audio, &placement.campaigns, counting);
        let placed: Vec<String> = placement
            .campaigns
            .iter()
            .map(|c| {
                let index = campaigns
                    .iter()
                    .position(|other| std::ptr::eq(other, *c))
                    .unwrap_or_default();
                c.label(index)
            })
            .collect();

        info!(
            "episode {}: {} placed {}/{} eligible campaign(s), revenue {}",
            episode.id,
            self.settings.strategy,
            placed.len(),
            eligible.len(),
            placement.revenue
        );

        Ok(PlacementResult {
            episode_id: episode.id.clone(),
            strategy: self.settings.strategy,
            audio,
            placed,
            eligible_count: eligible.len(),
            revenue: placement.revenue,
            slots_available: available,
            slots_remaining: placement.remaining,
        })
    }
}

/// Place campaigns into `episode` with `strategy` and default settings,
/// returning only the composed audio.
pub fn place_campaigns(episode: &Episode, campaigns: &[Campaign], strategy: Strategy) -> Result<String> {
    CampaignPlacer::with_strategy(strategy)
        .place(episode, campaigns)
        .map(|result| result.audio)
}

//! spot_placer — ad spot placement for podcast episodes.
//!
//! Counts slot markers in an episode script, picks campaigns that fit
//! (first-fit or max-revenue), splices their spots in and strips leftovers.
//! The `spotplacer` CLI consumes this crate.

pub mod campaign;
pub mod catalog;
pub mod combinations;
pub mod composer;
pub mod config;
pub mod episode;
pub mod error;
pub mod placement;
pub mod placer;
pub mod slot;

pub use placer::{CampaignPlacer, PlacementResult, place_campaigns};

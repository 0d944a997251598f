use crate::campaign::Campaign;
use crate::combinations::all_combinations;
use crate::error::{PlacementError, Result};
use crate::slot::SlotCounts;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// Largest eligible set the max-revenue strategy will enumerate by default.
/// The subset count doubles with every extra campaign.
pub const DEFAULT_MAX_CANDIDATES: usize = 16;

// --- Strategy ---

/// How campaigns are chosen for an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Place campaigns in catalog order while they fit. No backtracking.
    #[default]
    FirstFit,
    /// Try every subset of eligible campaigns and keep the one with the
    /// highest placed revenue.
    MaxRevenue,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FirstFit => write!(f, "first-fit"),
            Strategy::MaxRevenue => write!(f, "max-revenue"),
        }
    }
}

impl Strategy {
    /// Parse a strategy from a string (case-insensitive).
    pub fn from_str_loose(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "first-fit" | "greedy" => Ok(Strategy::FirstFit),
            "max-revenue" | "revenue" => Ok(Strategy::MaxRevenue),
            _ => Err(format!(
                "Unknown strategy '{}'. Expected: first-fit, max-revenue",
                s
            )),
        }
    }
}

// --- Placement ---

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    /// Campaigns to place, in substitution order.
    pub campaigns: Vec<&'a Campaign>,
    /// Total revenue of all placed spots.
    pub revenue: f64,
    /// Slots still free after placement.
    pub remaining: SlotCounts,
}

impl<'a> Placement<'a> {
    /// Nothing placed, full capacity left.
    pub fn empty(capacity: SlotCounts) -> Self {
        Placement {
            campaigns: Vec::new(),
            revenue: 0.0,
            remaining: capacity,
        }
    }
}

/// Walk `campaigns` in order, committing each one that fits.
fn fit_in_order<'a, I>(capacity: SlotCounts, campaigns: I) -> Placement<'a>
where
    I: IntoIterator<Item = &'a Campaign>,
{
    let mut placement = Placement::empty(capacity);
    for campaign in campaigns {
        if placement.remaining.commit(&campaign.profile()) {
            placement.revenue += campaign.revenue();
            placement.campaigns.push(campaign);
        }
    }
    placement
}

/// First-fit: place eligible campaigns in catalog order while they fit.
pub fn place_first_fit<'a>(capacity: SlotCounts, eligible: &[&'a Campaign]) -> Placement<'a> {
    let mut placement = Placement::empty(capacity);
    for (i, campaign) in eligible.iter().enumerate() {
        let profile = campaign.profile();
        if placement.remaining.commit(&profile) {
            debug!(
                "placed {} ({}), remaining {}",
                campaign.label(i),
                profile.display(),
                placement.remaining.display()
            );
            placement.revenue += campaign.revenue();
            placement.campaigns.push(*campaign);
        } else {
            debug!(
                "skipped {}: needs {}, have {}",
                campaign.label(i),
                profile.display(),
                placement.remaining.display()
            );
        }
    }
    placement
}

/// Max-revenue: run first-fit over every non-empty subset of `eligible`
/// against fresh capacity and keep the subset with the highest revenue.
///
/// A subset only replaces the current best once it has been walked
/// completely and its revenue is strictly greater, so ties go to the
/// earlier subset and a placement earning nothing never beats placing
/// nothing.
pub fn place_max_revenue<'a>(
    capacity: SlotCounts,
    eligible: &[&'a Campaign],
    max_candidates: usize,
) -> Result<Placement<'a>> {
    if eligible.len() > max_candidates {
        warn!(
            "refusing to enumerate {} campaigns (limit {})",
            eligible.len(),
            max_candidates
        );
        return Err(PlacementError::TooManyCandidates {
            count: eligible.len(),
            max: max_candidates,
        });
    }

    let mut best = Placement::empty(capacity);
    let mut evaluated = 0usize;
    for subset in all_combinations(eligible) {
        let candidate = fit_in_order(capacity, subset.into_iter().copied());
        evaluated += 1;
        if candidate.revenue > best.revenue {
            trace!(
                "new best: {} campaign(s), revenue {}",
                candidate.campaigns.len(),
                candidate.revenue
            );
            best = candidate;
        }
    }
    debug!(
        "evaluated {} combination(s), best revenue {}",
        evaluated, best.revenue
    );
    Ok(best)
}

/// Dispatch to the selected strategy.
pub fn select<'a>(
    strategy: Strategy,
    capacity: SlotCounts,
    eligible: &[&'a Campaign],
    max_candidates: usize,
) -> Result<Placement<'a>> {
    match strategy {
        Strategy::FirstFit => Ok(place_first_fit(capacity, eligible)),
        Strategy::MaxRevenue => place_max_revenue(capacity, eligible, max_candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::Spot;
    use crate::slot::SlotType;

    fn campaign(name: &str, spots: &[(SlotType, f64)]) -> Campaign {
        Campaign::new(
            vec!["ep1".into()],
            spots
                .iter()
                .map(|(t, r)| Spot::new(*t, format!("{}-{}", name, t), *r))
                .collect(),
        )
        .named(name)
    }

    fn names(placement: &Placement<'_>) -> Vec<String> {
        placement
            .campaigns
            .iter()
            .map(|c| c.name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn first_fit_places_in_order_without_backtracking() {
        let a = campaign("A", &[(SlotType::Pre, 10.0)]);
        let b = campaign("B", &[(SlotType::Pre, 20.0), (SlotType::Pre, 20.0), (SlotType::Mid, 10.0)]);
        let eligible = vec![&a, &b];

        let placement = place_first_fit(SlotCounts::new(2, 1, 0), &eligible);
        assert_eq!(names(&placement), vec!["A"]);
        assert_eq!(placement.revenue, 10.0);
        assert_eq!(placement.remaining, SlotCounts::new(1, 1, 0));
    }

    #[test]
    fn first_fit_skips_and_continues() {
        let a = campaign("A", &[(SlotType::Post, 1.0)]);
        let b = campaign("B", &[(SlotType::Mid, 1.0)]);
        let c = campaign("C", &[(SlotType::Pre, 1.0)]);
        let eligible = vec![&a, &b, &c];

        let placement = place_first_fit(SlotCounts::new(1, 0, 0), &eligible);
        assert_eq!(names(&placement), vec!["C"]);
    }

    #[test]
    fn first_fit_with_no_candidates_places_nothing() {
        let placement = place_first_fit(SlotCounts::new(1, 1, 1), &[]);
        assert!(placement.campaigns.is_empty());
        assert_eq!(placement.revenue, 0.0);
        assert_eq!(placement.remaining, SlotCounts::new(1, 1, 1));
    }

    #[test]
    fn max_revenue_prefers_richer_subset() {
        let a = campaign("A", &[(SlotType::Pre, 10.0)]);
        let b = campaign("B", &[(SlotType::Pre, 20.0), (SlotType::Pre, 20.0), (SlotType::Mid, 10.0)]);
        let eligible = vec![&a, &b];

        let placement = place_max_revenue(SlotCounts::new(2, 1, 0), &eligible, 16).unwrap();
        assert_eq!(names(&placement), vec!["B"]);
        assert_eq!(placement.revenue, 50.0);
        assert_eq!(placement.remaining, SlotCounts::new(0, 0, 0));
    }

    #[test]
    fn max_revenue_combines_when_everything_fits() {
        let a = campaign("A", &[(SlotType::Pre, 1.0)]);
        let b = campaign("B", &[(SlotType::Mid, 2.0)]);
        let c = campaign("C", &[(SlotType::Post, 3.0)]);
        let eligible = vec![&a, &b, &c];

        let placement = place_max_revenue(SlotCounts::new(1, 1, 1), &eligible, 16).unwrap();
        assert_eq!(names(&placement), vec!["A", "B", "C"]);
        assert_eq!(placement.revenue, 6.0);
    }

    #[test]
    fn max_revenue_keeps_earlier_subset_on_tie() {
        let a = campaign("A", &[(SlotType::Mid, 5.0)]);
        let b = campaign("B", &[(SlotType::Mid, 5.0)]);
        let eligible = vec![&a, &b];

        let placement = place_max_revenue(SlotCounts::new(0, 1, 0), &eligible, 16).unwrap();
        assert_eq!(names(&placement), vec!["A"]);
    }

    #[test]
    fn max_revenue_judges_whole_combinations() {
        // Within {A, B, C}, A blocks B but C still lands; the subset is
        // compared only after C is placed.
        let a = campaign("A", &[(SlotType::Pre, 4.0)]);
        let b = campaign("B", &[(SlotType::Pre, 6.0)]);
        let c = campaign("C", &[(SlotType::Post, 3.0)]);
        let eligible = vec![&a, &b, &c];

        let placement = place_max_revenue(SlotCounts::new(1, 0, 1), &eligible, 16).unwrap();
        assert_eq!(names(&placement), vec!["B", "C"]);
        assert_eq!(placement.revenue, 9.0);
    }

    #[test]
    fn max_revenue_ignores_zero_revenue_campaigns() {
        let a = campaign("A", &[(SlotType::Pre, 0.0)]);
        let eligible = vec![&a];

        let placement = place_max_revenue(SlotCounts::new(1, 0, 0), &eligible, 16).unwrap();
        assert!(placement.campaigns.is_empty());
        assert_eq!(placement.remaining, SlotCounts::new(1, 0, 0));
    }

    #[test]
    fn max_revenue_respects_candidate_limit() {
        let a = campaign("A", &[(SlotType::Pre, 1.0)]);
        let eligible = vec![&a, &a, &a];
        let err = place_max_revenue(SlotCounts::new(3, 0, 0), &eligible, 2).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::TooManyCandidates { count: 3, max: 2 }
        ));
    }

    #[test]
    fn oversized_campaign_is_never_placed() {
        let big = campaign("Big", &[(SlotType::Mid, 9.0), (SlotType::Mid, 9.0)]);
        let eligible = vec![&big];
        let capacity = SlotCounts::new(3, 1, 3);

        assert!(place_first_fit(capacity, &eligible).campaigns.is_empty());
        assert!(place_max_revenue(capacity, &eligible, 16).unwrap().campaigns.is_empty());
    }

    #[test]
    fn select_dispatches_by_strategy() {
        let a = campaign("A", &[(SlotType::Pre, 10.0)]);
        let b = campaign("B", &[(SlotType::Pre, 20.0), (SlotType::Pre, 20.0), (SlotType::Mid, 10.0)]);
        let eligible = vec![&a, &b];
        let capacity = SlotCounts::new(2, 1, 0);

        let greedy = select(Strategy::FirstFit, capacity, &eligible, 16).unwrap();
        let best = select(Strategy::MaxRevenue, capacity, &eligible, 16).unwrap();
        assert_eq!(names(&greedy), vec!["A"]);
        assert_eq!(names(&best), vec!["B"]);
    }

    #[test]
    fn strategy_parses_loosely() {
        assert_eq!(Strategy::from_str_loose("First_Fit").unwrap(), Strategy::FirstFit);
        assert_eq!(Strategy::from_str_loose("max-revenue").unwrap(), Strategy::MaxRevenue);
        assert_eq!(Strategy::from_str_loose("greedy").unwrap(), Strategy::FirstFit);
        assert!(Strategy::from_str_loose("auction").is_err());
        assert_eq!(Strategy::MaxRevenue.to_string(), "max-revenue");
    }
}

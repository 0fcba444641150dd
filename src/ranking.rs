use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::filter_state::SortOrder;
use crate::record::ContentRecord;

pub fn sort_records(records: &mut [&ContentRecord], order: SortOrder) {
    // sort_by is stable: equal dates keep their input order
    match order {
        SortOrder::Newest => records.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => records.sort_by(|a, b| a.date.cmp(&b.date)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RankingWeights {
    #[serde(default = "default_views_weight")]
    pub views_weight: f64,
    #[serde(default = "default_shares_weight")]
    pub shares_weight: f64,
}

fn default_views_weight() -> f64 { 0.7 }

fn default_shares_weight() -> f64 { 0.3 }

impl Default for RankingWeights {
    fn default() -> Self {
        RankingWeights {
            views_weight: default_views_weight(),
            shares_weight: default_shares_weight(),
        }
    }
}

impl RankingWeights {
    /// Absent counts score as 0.
    pub fn score(&self, record: &ContentRecord) -> f64 {
        record.view_count() as f64 * self.views_weight + record.share_count() as f64 * self.shares_weight
    }

    /// Highest score first. Equal scores keep their input order.
    pub fn rank<'r, I>(&self, records: I) -> Vec<&'r ContentRecord>
        where
            I: IntoIterator<Item=&'r ContentRecord>,
    {
        let mut scored: Vec<(f64, &ContentRecord)> = records.into_iter()
            .map(|r| (self.score(r), r))
            .collect();
        scored.sort_by(|(sa, _), (sb, _)| sb.total_cmp(sa));
        scored.into_iter().map(|(_, r)| r).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct Highlights<'a> {
    pub featured: Option<&'a ContentRecord>,
    pub trending: Vec<&'a ContentRecord>,
}

/// The best scoring record is the featured pick; the next `trending_count`
/// distinct records by score are trending.
pub fn highlights<'r, I>(records: I, weights: &RankingWeights, trending_count: usize) -> Highlights<'r>
    where
        I: IntoIterator<Item=&'r ContentRecord>,
{
    let ranked = weights.rank(records);
    let mut ranked = ranked.into_iter();
    let featured = ranked.next();

    let mut seen = HashSet::new();
    if let Some(featured) = featured {
        seen.insert(featured.key());
    }

    let trending = ranked
        .filter(|r| seen.insert(r.key()))
        .take(trending_count)
        .collect();

    Highlights {
        featured,
        trending,
    }
}

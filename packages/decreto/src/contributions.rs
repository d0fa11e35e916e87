//! Joining per-contribution detail records onto provision records.
//!
//! The join key is the decree's own `sequence_number`. The inline
//! `contribution_count` is only an aggregate and is used to cross-check
//! the join, never to match on.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::source::read_text_file;
use crate::types::{Contribution, ProvisionRecord};

/// A provision together with the contributions that target it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedProvision {
    #[serde(flatten)]
    pub record: ProvisionRecord,
    pub contributions: Vec<Contribution>,
}

/// A provision whose printed count disagrees with the joined detail records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub sequence_number: u32,
    /// Structural address of the provision, e.g. `Art. 2º, I`.
    pub address: String,
    pub declared: u32,
    pub found: usize,
}

/// Result of [`join_contributions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    /// Every provision record, in document order.
    pub provisions: Vec<JoinedProvision>,

    /// Contributions whose sequence number matches no provision.
    pub orphans: Vec<Contribution>,

    /// Provisions where `contribution_count` differs from the joined count.
    pub mismatches: Vec<CountMismatch>,
}

impl JoinReport {
    /// Number of contributions attached to at least one provision.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        let mut seen = HashSet::new();
        self.provisions
            .iter()
            .filter(|p| seen.insert(p.record.sequence_number))
            .map(|p| p.contributions.len())
            .sum()
    }
}

/// Load contributions from a JSON array file.
pub fn load_contributions(path: &Path) -> Result<Vec<Contribution>> {
    let text = read_text_file(path)?;
    let contributions: Vec<Contribution> = serde_json::from_str(&text)?;
    tracing::debug!(
        count = contributions.len(),
        path = %path.display(),
        "Loaded contributions"
    );
    Ok(contributions)
}

/// Attach contributions to provision records by sequence number.
///
/// Contributions keep their input order within each provision. A sequence
/// number printed on several lines gets the same group on each of them.
#[must_use]
pub fn join_contributions(
    records: &[ProvisionRecord],
    contributions: &[Contribution],
) -> JoinReport {
    let mut groups: BTreeMap<u32, Vec<Contribution>> = BTreeMap::new();
    for contribution in contributions {
        groups
            .entry(contribution.sequence_number)
            .or_default()
            .push(contribution.clone());
    }

    let known: HashSet<u32> = records.iter().map(|r| r.sequence_number).collect();
    let orphans: Vec<Contribution> = contributions
        .iter()
        .filter(|c| !known.contains(&c.sequence_number))
        .cloned()
        .collect();

    let mut mismatches = Vec::new();
    let provisions = records
        .iter()
        .map(|record| {
            let attached = groups
                .get(&record.sequence_number)
                .cloned()
                .unwrap_or_default();

            if usize::try_from(record.contribution_count).ok() != Some(attached.len()) {
                tracing::warn!(
                    sequence_number = record.sequence_number,
                    declared = record.contribution_count,
                    found = attached.len(),
                    "Contribution count mismatch"
                );
                mismatches.push(CountMismatch {
                    sequence_number: record.sequence_number,
                    address: record.address(),
                    declared: record.contribution_count,
                    found: attached.len(),
                });
            }

            JoinedProvision {
                record: record.clone(),
                contributions: attached,
            }
        })
        .collect();

    JoinReport {
        provisions,
        orphans,
        mismatches,
    }
}

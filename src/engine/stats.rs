use std::collections::HashMap;

use crate::catalog::{CaseCatalog, CaseType};
use crate::session::record::PracticeSession;

/// How many history rows the dashboard shows.
pub const RECENT_LIMIT: usize = 10;

/// Case types practiced this many times or fewer count as weak spots.
pub const WEAK_SPOT_THRESHOLD: u32 = 1;

/// Derived view over the practice history. Pure function of the history
/// slice; recomputed after every mutation, never cached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PracticeStats {
    pub total_sessions: usize,
    pub total_duration_secs: u64,
    pub average_duration_secs: u64,
    /// Session count per case-type display name.
    pub counts_by_case: HashMap<String, u32>,
}

pub fn aggregate(sessions: &[PracticeSession]) -> PracticeStats {
    let total_sessions = sessions.len();
    let total_duration_secs: u64 = sessions.iter().map(|s| s.duration).sum();

    let mut counts_by_case: HashMap<String, u32> = HashMap::new();
    for session in sessions {
        *counts_by_case.entry(session.case_type.clone()).or_insert(0) += 1;
    }

    PracticeStats {
        total_sessions,
        total_duration_secs,
        average_duration_secs: round_half_up(total_duration_secs, total_sessions as u64),
        counts_by_case,
    }
}

/// The last `RECENT_LIMIT` sessions, most recent first.
pub fn recent(sessions: &[PracticeSession]) -> Vec<&PracticeSession> {
    sessions.iter().rev().take(RECENT_LIMIT).collect()
}

/// Every catalog case type practiced `WEAK_SPOT_THRESHOLD` times or fewer,
/// in catalog order, with its count. Counts join on display name; a case
/// type absent from the counts map has simply never been practiced.
pub fn weak_spots<'a>(
    catalog: &'a CaseCatalog,
    stats: &PracticeStats,
) -> Vec<(&'a CaseType, u32)> {
    catalog
        .case_types
        .iter()
        .filter_map(|case| {
            let count = stats.counts_by_case.get(&case.name).copied().unwrap_or(0);
            (count <= WEAK_SPOT_THRESHOLD).then_some((case, count))
        })
        .collect()
}

/// Integer division rounding halves away from zero. Zero denominator maps
/// to zero (no sessions yet).
fn round_half_up(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        (total + count / 2) / count
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn session(case_type: &str, duration: u64) -> PracticeSession {
        PracticeSession {
            case_type: case_type.to_string(),
            industry: None,
            duration,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_history_aggregates_to_zeroes() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_duration_secs, 0);
        assert_eq!(stats.average_duration_secs, 0);
        assert!(stats.counts_by_case.is_empty());
    }

    #[test]
    fn totals_match_appended_sessions() {
        let sessions: Vec<PracticeSession> =
            (1..=6).map(|i| session("Market Entry", i * 10)).collect();
        let stats = aggregate(&sessions);
        assert_eq!(stats.total_sessions, 6);
        assert_eq!(stats.total_duration_secs, 210);
        assert_eq!(stats.counts_by_case["Market Entry"], 6);
    }

    #[test]
    fn average_rounds_half_up() {
        let stats = aggregate(&[
            session("A", 60),
            session("A", 90),
            session("B", 90),
        ]);
        assert_eq!(stats.average_duration_secs, 80);

        // 15 / 2 = 7.5 → 8
        let stats = aggregate(&[session("A", 7), session("A", 8)]);
        assert_eq!(stats.average_duration_secs, 8);
    }

    #[test]
    fn recent_returns_last_ten_newest_first() {
        let sessions: Vec<PracticeSession> =
            (0..15).map(|i| session("Pricing Strategy", i)).collect();
        let recent = recent(&sessions);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].duration, 14);
        assert_eq!(recent[9].duration, 5);
    }

    #[test]
    fn recent_with_short_history_returns_all_reversed() {
        let sessions = vec![session("A", 1), session("A", 2), session("A", 3)];
        let recent = recent(&sessions);
        assert_eq!(
            recent.iter().map(|s| s.duration).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn weak_spots_threshold_and_catalog_order() {
        let catalog = CaseCatalog::load().unwrap();
        let profitability = catalog.case_by_id("profitability").unwrap().name.clone();

        // Two completions of one case: it leaves the weak-spot list, all
        // other catalog cases stay, catalog order preserved.
        let sessions = vec![session(&profitability, 60), session(&profitability, 60)];
        let stats = aggregate(&sessions);
        let weak = weak_spots(&catalog, &stats);

        assert_eq!(weak.len(), catalog.case_types.len() - 1);
        assert!(weak.iter().all(|(case, count)| {
            case.name != profitability && *count == 0
        }));
        let weak_ids: Vec<&str> = weak.iter().map(|(c, _)| c.id.as_str()).collect();
        let expected: Vec<&str> = catalog
            .case_types
            .iter()
            .filter(|c| c.id != "profitability")
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(weak_ids, expected);
    }

    #[test]
    fn single_practice_still_counts_as_weak() {
        let catalog = CaseCatalog::load().unwrap();
        let name = catalog.case_by_id("market_entry").unwrap().name.clone();

        let stats = aggregate(&[session(&name, 60)]);
        let weak = weak_spots(&catalog, &stats);
        let entry = weak.iter().find(|(c, _)| c.name == name);
        assert_eq!(entry.map(|(_, count)| *count), Some(1));

        // A second practice removes it.
        let stats = aggregate(&[session(&name, 60), session(&name, 60)]);
        let weak = weak_spots(&catalog, &stats);
        assert!(weak.iter().all(|(c, _)| c.name != name));
    }
}

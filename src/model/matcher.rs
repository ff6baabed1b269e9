// Fuzzy matching of user keywords against schedule entries.
//
// Two measures are used:
//   similarity(a, b)          -> whole-string likeness in [0, 1], 1 is identical
//   approximate_score(q, t)   -> how well `q` fits somewhere inside `t`, in [0, 1],
//                                0 is a perfect substring hit
//
// The approximate score is a semi-global edit distance: the query must be
// consumed completely but may start and end anywhere in the target, so
// "meting" scores 1/6 against "meeting client 09:00".
//
// `relevance_score` breaks ties between equally distant search hits.

use crate::model::item::ScheduleEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static DOTTED_CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})\.(\d{2})\b").expect("valid clock regex"));

/// Classic edit distance over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 - lev(a, b) / max(len(a), len(b))`, case-insensitive.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Smallest edit distance between `query` and any substring of `target`.
pub fn approximate_distance(query: &str, target: &str) -> usize {
    let q: Vec<char> = query.chars().collect();
    let t: Vec<char> = target.chars().collect();
    if q.is_empty() {
        return 0;
    }

    // Row i holds the cost of aligning q[..i] ending at each target position.
    // Row 0 is all zeros so the match may start anywhere.
    let mut prev = vec![0usize; t.len() + 1];
    let mut curr = vec![0usize; t.len() + 1];
    for (i, qc) in q.iter().enumerate() {
        curr[0] = i + 1;
        for (j, tc) in t.iter().enumerate() {
            let cost = if qc == tc { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev.into_iter().min().unwrap_or(q.len())
}

/// Normalized approximate distance: 0 is a perfect hit, 1 shares nothing.
pub fn approximate_score(query: &str, target: &str) -> f64 {
    let query = query.to_lowercase();
    let target = target.to_lowercase();
    let len = query.chars().count();
    if len == 0 {
        return 0.0;
    }
    (approximate_distance(&query, &target) as f64 / len as f64).min(1.0)
}

pub fn relevance_score(query: &str, target: &str) -> f64 {
    let query = query.to_lowercase();
    let target = target.to_lowercase();
    let mut score = 0.0;

    if query == target {
        score += 10.0;
    }
    if let Some(byte_pos) = target.find(&query) {
        score += 5.0;
        let pos = target[..byte_pos].chars().count();
        let target_len = target.chars().count();
        if pos == 0 {
            score += 3.0;
        } else if (pos as f64) < target_len as f64 * 0.3 {
            score += 1.5;
        }
    }

    let sim = similarity(&query, &target);
    if sim > 0.7 {
        score += sim * 2.0;
    }
    score
}

#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub entry: &'a ScheduleEntry,
    pub score: f64,
    pub relevance: f64,
}

impl MatchCandidate<'_> {
    pub fn match_percent(&self) -> u32 {
        ((1.0 - self.score) * 100.0).round().max(0.0) as u32
    }

    fn rank(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.relevance.total_cmp(&self.relevance))
    }
}

/// The text a keyword is compared against when picking an entry to edit or delete.
pub fn entry_key(entry: &ScheduleEntry) -> String {
    format!("{} {}", entry.activity, entry.time)
}

/// Reads "07.00" in a keyword as "07:00" so it lines up with stored times.
pub fn normalize_keyword(keyword: &str) -> String {
    DOTTED_CLOCK_RE
        .replace_all(keyword.trim(), "$1:$2")
        .into_owned()
}

/// Entries whose `key` text is within `threshold` of `query`, best first.
///
/// Ordering is by ascending score, then by descending relevance; equal
/// candidates keep their store order.
pub fn rank_entries<'a, F>(
    query: &str,
    entries: &'a [ScheduleEntry],
    threshold: f64,
    key: F,
) -> Vec<MatchCandidate<'a>>
where
    F: Fn(&ScheduleEntry) -> String,
{
    let mut candidates: Vec<MatchCandidate<'a>> = entries
        .iter()
        .filter_map(|entry| {
            let target = key(entry);
            let score = approximate_score(query, &target);
            (score <= threshold).then(|| MatchCandidate {
                entry,
                score,
                relevance: relevance_score(query, &target),
            })
        })
        .collect();
    candidates.sort_by(|a, b| a.rank(b));
    candidates
}

/// Search over activity names.
pub fn search_entries<'a>(
    query: &str,
    entries: &'a [ScheduleEntry],
    threshold: f64,
) -> Vec<MatchCandidate<'a>> {
    rank_entries(query, entries, threshold, |e| e.activity.clone())
}

/// Candidates for an edit or delete keyword.
///
/// When at least one entry contains the keyword verbatim only those perfect
/// hits are returned, so "makan 08:00" does not also offer "makan 09:00".
pub fn find_targets<'a>(
    keyword: &str,
    entries: &'a [ScheduleEntry],
    threshold: f64,
) -> Vec<MatchCandidate<'a>> {
    let keyword = normalize_keyword(keyword);
    let mut candidates = rank_entries(&keyword, entries, threshold, entry_key);
    if candidates.first().is_some_and(|c| c.score == 0.0) {
        candidates.retain(|c| c.score == 0.0);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, activity: &str, time: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            activity: activity.to_string(),
            date: "19-10-2026".to_string(),
            time: time.to_string(),
            created: String::new(),
        }
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("rapat", "rapat"), 0);
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("Rapat", "rapat"), 1.0);
        let s = similarity("meeting", "meting");
        assert!(s > 0.8 && s < 1.0);
    }

    #[test]
    fn approximate_score_finds_substrings() {
        assert_eq!(approximate_score("rapat", "rapat tim 09:00"), 0.0);
        assert_eq!(approximate_score("TIM", "rapat tim"), 0.0);
        let typo = approximate_score("meting", "meeting client");
        assert!((typo - 1.0 / 6.0).abs() < 1e-9);
        assert_eq!(approximate_score("xyz", "abc"), 1.0);
    }

    #[test]
    fn relevance_rewards_position_and_exactness() {
        let exact = relevance_score("makan", "makan");
        let prefix = relevance_score("makan", "makan siang");
        let inner = relevance_score("makan", "acara makan malam bersama keluarga");
        assert!(exact > prefix);
        assert!(prefix > inner);
        assert!(inner >= 5.0);
    }

    #[test]
    fn exact_query_ranks_at_or_above_a_variant() {
        let entries = vec![entry(1, "rapet", "09:00"), entry(2, "rapat", "10:00")];
        let ranked = search_entries("rapat", &entries, 0.6);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entry.id, 2);
        assert_eq!(ranked[0].match_percent(), 100);
        assert_eq!(ranked[1].match_percent(), 80);
    }

    #[test]
    fn threshold_filters_weak_hits() {
        let entries = vec![entry(1, "makan siang", "12:00"), entry(2, "olahraga", "06:00")];
        let ranked = search_entries("makan", &entries, 0.25);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].entry.id, 1);
    }

    #[test]
    fn targets_include_the_time() {
        let entries = vec![entry(1, "meeting", "07:00"), entry(2, "meeting", "15:00")];
        let both = find_targets("meeting", &entries, 0.25);
        assert_eq!(both.len(), 2);
        let morning = find_targets("meeting 07.00", &entries, 0.25);
        assert_eq!(morning.len(), 1);
        assert_eq!(morning[0].entry.id, 1);
        assert_eq!(morning[0].score, 0.0);
    }

    #[test]
    fn typo_keyword_still_finds_a_single_entry() {
        let entries = vec![entry(1, "olahraga", "06:00"), entry(2, "makan", "12:00")];
        let found = find_targets("olahrga", &entries, 0.25);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].entry.id, 1);
    }

    #[test]
    fn dotted_clock_keywords() {
        assert_eq!(normalize_keyword(" rapat 07.30 "), "rapat 07:30");
        assert_eq!(normalize_keyword("rapat"), "rapat");
    }
}

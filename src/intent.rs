// File: ./src/intent.rs
//! Ordered intent classification.
//!
//! `RULES` is walked top to bottom and the first predicate that accepts the
//! message wins. The order matters: "berapa jadwal" must reach stats before the
//! catch-all "jadwal" rule, and "hapus ..." must never be read as an add.
use once_cell::sync::Lazy;
use regex::Regex;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    Help,
    Stats,
    Export,
    Reminder,
    View,
    Delete,
    Edit,
    Search,
    Add,
    Ambiguous,
    Unknown,
}

/// What an utterance that only mentions "jadwal" most likely asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguousResolution {
    Stats,
    View,
    Clarify,
}

pub struct Rule {
    pub intent: Intent,
    pub matches: fn(&str) -> bool,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid intent regex")
}

static HELP_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:help|bantuan|apa\s+yang\s+bisa|perintah)$"));
static STATS_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:statistik|stats|berapa\s+jadwal)(?:\s+.*)?$"));
static EXPORT_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:export|backup|ekspor)"));
static REMINDER_RE: Lazy<Regex> =
    Lazy::new(|| re(r"^(?:reminder|ingatkan)\s+.*(?:menit|jam|hari)"));
static VIEW_VERB_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:lihat|tampilkan|show)\s+jadwal"));
static VIEW_RANGE_RE: Lazy<Regex> = Lazy::new(|| re(r"^jadwal\s+(?:hari ini|besok|semua)$"));
static DELETE_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:hapus|batalkan|delete)\s+"));
static EDIT_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:ubah|ganti|edit)\s+"));
static FIND_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:cari|find)\s+"));
static KAPAN_RE: Lazy<Regex> = Lazy::new(|| re(r"^kapan\s+(?:ada\s+)?(.*)$"));
static ADD_RE: Lazy<Regex> = Lazy::new(|| re(r"^(?:tambah|buat|jadwalkan|schedule)\s+"));
static JADWAL_WORD_RE: Lazy<Regex> = Lazy::new(|| re(r"\bjadwal\b"));

static QUANTITY_RE: Lazy<Regex> =
    Lazy::new(|| re(r"\b(?:berapa|jumlah)\b|\b(?:hari ini|besok|semua)\b"));
static VIEWING_VERB_RE: Lazy<Regex> =
    Lazy::new(|| re(r"\b(?:lihat|tampilkan|show|kapan|ada|cari|find)\b"));

fn is_view(m: &str) -> bool {
    VIEW_VERB_RE.is_match(m) || VIEW_RANGE_RE.is_match(m) || m == "lihat jadwal" || m == "jadwal"
}

// "kapan jadwal" on its own is a question about the schedule, not a search term.
fn is_search(m: &str) -> bool {
    if FIND_RE.is_match(m) {
        return true;
    }
    KAPAN_RE
        .captures(m)
        .is_some_and(|caps| caps[1].trim() != "jadwal")
}

pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Help,
        matches: |m| HELP_RE.is_match(m),
    },
    Rule {
        intent: Intent::Stats,
        matches: |m| STATS_RE.is_match(m),
    },
    Rule {
        intent: Intent::Export,
        matches: |m| EXPORT_RE.is_match(m),
    },
    Rule {
        intent: Intent::Reminder,
        matches: |m| REMINDER_RE.is_match(m),
    },
    Rule {
        intent: Intent::View,
        matches: is_view,
    },
    Rule {
        intent: Intent::Delete,
        matches: |m| DELETE_RE.is_match(m),
    },
    Rule {
        intent: Intent::Edit,
        matches: |m| EDIT_RE.is_match(m),
    },
    Rule {
        intent: Intent::Search,
        matches: is_search,
    },
    Rule {
        intent: Intent::Add,
        matches: |m| ADD_RE.is_match(m),
    },
    Rule {
        intent: Intent::Ambiguous,
        matches: |m| JADWAL_WORD_RE.is_match(m),
    },
];

/// Classifies a raw utterance. Trimming and lower-casing happen here.
pub fn classify(input: &str) -> Intent {
    let message = input.trim().to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&message))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Unknown)
}

/// Sub-classifies a message that fell through to the "jadwal" catch-all.
pub fn resolve_ambiguous(input: &str) -> AmbiguousResolution {
    let message = input.trim().to_lowercase();
    if QUANTITY_RE.is_match(&message) {
        AmbiguousResolution::Stats
    } else if VIEWING_VERB_RE.is_match(&message) {
        AmbiguousResolution::View
    } else {
        AmbiguousResolution::Clarify
    }
}

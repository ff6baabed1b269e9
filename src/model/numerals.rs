// File: src/model/numerals.rs
//
// Rewrites Indonesian number words into digits so later patterns such as
// `(\d+)\s*(menit|jam|hari)` can read quantities typed out in words.
use once_cell::sync::Lazy;
use regex::Regex;

const UNITS: [(&str, u32); 9] = [
    ("satu", 1),
    ("dua", 2),
    ("tiga", 3),
    ("empat", 4),
    ("lima", 5),
    ("enam", 6),
    ("tujuh", 7),
    ("delapan", 8),
    ("sembilan", 9),
];

const TENS: [(&str, u32); 5] = [
    ("dua puluh", 20),
    ("tiga puluh", 30),
    ("empat puluh", 40),
    ("lima puluh", 50),
    ("enam puluh", 60),
];

/// Every recognized number phrase with its value.
pub fn number_words() -> Vec<(String, u32)> {
    let mut words: Vec<(String, u32)> = UNITS.iter().map(|(w, n)| (w.to_string(), *n)).collect();
    words.push(("sepuluh".to_string(), 10));
    words.push(("sebelas".to_string(), 11));

    // dua belas .. sembilan belas
    for (word, n) in UNITS.iter().skip(1) {
        words.push((format!("{} belas", word), 10 + n));
    }

    for (tens_word, tens) in TENS {
        words.push((tens_word.to_string(), tens));
        for (unit_word, unit) in UNITS {
            words.push((format!("{} {}", tens_word, unit_word), tens + unit));
        }
    }
    words
}

// Longest phrase first, so "dua puluh lima" is consumed before "dua" or "lima".
static NUMBER_PATTERNS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let mut words = number_words();
    words.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    words
        .into_iter()
        .map(|(word, n)| {
            let pattern = format!(r"(?i)\b{}\b", word.replace(' ', r"\s+"));
            (
                Regex::new(&pattern).expect("valid number word regex"),
                n.to_string(),
            )
        })
        .collect()
});

/// Replaces number words with digit strings; everything else passes through.
///
/// `expand_number_words("satu jam dua puluh menit") == "1 jam 20 menit"`
pub fn expand_number_words(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, digits) in NUMBER_PATTERNS.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, digits.as_str()).into_owned();
        }
    }
    result
}

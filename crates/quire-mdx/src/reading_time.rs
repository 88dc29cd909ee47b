//! Reading time estimation.

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

const WORDS_PER_MINUTE: f64 = 200.0;

/// Estimated reading time for a body of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTime {
    /// Display text, e.g. `3 min read`
    pub text: String,
    pub minutes: f64,
    /// Reading time in milliseconds
    pub time: u64,
    pub words: usize,
}

/// Estimate how long `text` takes to read.
///
/// Words follow Unicode word boundaries, so every CJK ideograph counts as a word.
pub fn reading_time(text: &str) -> ReadingTime {
    let words = text.unicode_words().count();
    let minutes = words as f64 / WORDS_PER_MINUTE;
    let time = (minutes * 60_000.0).round() as u64;

    // Round to two decimals first so 3.0000001 minutes still reads as 3
    let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

    ReadingTime {
        text: format!("{} min read", displayed),
        minutes,
        time,
        words,
    }
}

//! Free-text program cell parsing.
//!
//! Cells mix title, season, episode, and subtitle with inconsistent
//! punctuation ("Twist of Fate: New Era\nSeason S10 • Episode EP 36").
//! Parsing is token-anchored: the earliest season/episode token ends the
//! title, and the season/episode patterns are explicit rule lists so the
//! policy stays auditable. No input ever panics.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::ParsedProgram;

/// Season value patterns, tried in order; first capture wins.
static SEASON_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bSeason\s*S?(\d{1,3})\b").unwrap(),
        Regex::new(r"(?i)\bS(?:eason)?\s*(\d{1,3})\b").unwrap(),
    ]
});

/// Episode value patterns, tried in order; first capture wins.
static EPISODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bEpisode\s*(?:E|EP)?\s*(\d{1,4})\b").unwrap(),
        Regex::new(r"(?i)\bEP\s*(\d{1,4})\b").unwrap(),
    ]
});

/// Token patterns whose earliest occurrence marks the end of the title.
static TITLE_BOUNDARY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bSeason\b").unwrap(),
        Regex::new(r"(?i)\bEpisode\b").unwrap(),
        Regex::new(r"(?i)\bS(?:eason)?\s*\d{1,3}\b").unwrap(),
        Regex::new(r"(?i)\bEP\s*\d{1,4}\b").unwrap(),
    ]
});

/// Trailing parenthesized group, extracted as the subtitle.
static TRAILING_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)\s*$").unwrap());

/// Parse a program cell string into structured fields.
///
/// Steps: collapse whitespace; cut the title at the earliest season/episode
/// token; strip trailing separators; extract a subtitle (trailing
/// parenthetical wins over a colon split); normalize season/episode numbers;
/// drop season/episode unless both were found.
///
/// ```
/// use gridcast::schedule::text::parse_program_cell;
///
/// let p = parse_program_cell("Twist of Fate: New Era\nSeason S10 • Episode EP 36");
/// assert_eq!(p.title, "Twist of Fate");
/// assert_eq!(p.subtitle.as_deref(), Some("New Era"));
/// assert_eq!(p.season.as_deref(), Some("10"));
/// assert_eq!(p.episode.as_deref(), Some("36"));
/// ```
pub fn parse_program_cell(raw: &str) -> ParsedProgram {
    let flat = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return ParsedProgram::default();
    }

    // Title = text before the first season/episode token occurrence.
    let boundary = TITLE_BOUNDARY_PATTERNS
        .iter()
        .filter_map(|p| p.find(&flat).map(|m| m.start()))
        .min();
    let mut title = match boundary {
        Some(idx) => flat[..idx].trim_end(),
        None => flat.as_str(),
    }
    .to_string();

    // Drop trailing separators and bullet points left behind by the cut.
    title = title
        .trim_end_matches(['-', '\u{2022}', '\u{00b7}', ':'])
        .trim_end()
        .to_string();

    // Subtitle: a trailing "(...)" group wins; otherwise split on the first
    // colon. The colon still truncates the title either way.
    let mut subtitle: Option<String> = None;
    if let Some(caps) = TRAILING_PAREN.captures(&title) {
        subtitle = Some(caps[1].trim().to_string());
        title = TRAILING_PAREN.replace(&title, "").trim_end().to_string();
    }
    if let Some(idx) = title.find(':') {
        if subtitle.is_none() {
            subtitle = Some(title[idx + 1..].trim().to_string());
        }
        title = title[..idx].trim_end().to_string();
    }
    let subtitle = subtitle.filter(|s| !s.is_empty());

    // Season/episode strictly token-anchored; both-or-neither.
    let season = first_capture(&SEASON_PATTERNS, &flat);
    let episode = first_capture(&EPISODE_PATTERNS, &flat);
    let (season, episode) = match (season, episode) {
        (Some(s), Some(e)) => (Some(s), Some(e)),
        _ => (None, None),
    };

    ParsedProgram {
        title,
        season,
        episode,
        subtitle,
    }
}

/// First numeric capture across a pattern list, normalized through an
/// integer round-trip so leading zeros disappear.
fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|p| {
        p.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .map(|n| n.to_string())
    })
}

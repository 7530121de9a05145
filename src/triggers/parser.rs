//! Tag parser for `<TriggerDistance: ...>` comments
//!
//! The tag body is a whitespace separated list of case-insensitive tokens:
//!
//! ```text
//! r#       radius (Manhattan) around the object
//! x#       horizontal reach
//! y#       vertical reach
//! s#       one-shot switch binding
//! walk | boat | ship | airship    allowed travel modes
//! combo    evaluate under both activation kinds
//! ```
//!
//! Parsing never fails. Unknown tokens are dropped and a missing or negative
//! number leaves that dimension unset.

use super::types::{ModeSet, TravelMode, TriggerRule};

const COMBO_KEYWORD: &str = "combo";

/// Parse a tag body such as `"r2 s12 airship"` into a rule
pub fn parse_rule(text: &str) -> TriggerRule {
    let mut rule = TriggerRule {
        radius: None,
        axis_x: None,
        axis_y: None,
        flag_id: None,
        modes: ModeSet::empty(),
        combo: false,
    };
    let mut saw_shape = false;

    for raw in text.split_whitespace() {
        let token = raw.to_lowercase();

        if let Some(mode) = TravelMode::from_keyword(&token) {
            rule.modes.insert(mode);
            continue;
        }
        if token == COMBO_KEYWORD {
            rule.combo = true;
            continue;
        }

        let mut chars = token.chars();
        let Some(prefix) = chars.next() else {
            continue;
        };
        let magnitude = parse_magnitude(chars.as_str());

        match prefix {
            'r' => {
                rule.radius = magnitude;
                saw_shape = true;
            }
            'x' => {
                rule.axis_x = magnitude;
                saw_shape = true;
            }
            'y' => {
                rule.axis_y = magnitude;
                saw_shape = true;
            }
            's' => {
                rule.flag_id = magnitude.filter(|&id| id > 0);
            }
            _ => {
                log::trace!("Dropping unrecognized trigger token '{}'", raw);
            }
        }
    }

    if !saw_shape {
        rule.radius = Some(0);
    }
    if rule.modes.is_empty() {
        rule.modes = ModeSet::all();
    }

    rule
}

/// Leading integer of a token suffix, `None` when absent or negative.
///
/// Trailing garbage after the digits is ignored (`"3abc"` reads as 3) and
/// oversized values saturate, so `x99999999999` still means "whole map".
fn parse_magnitude(digits: &str) -> Option<u32> {
    let (negative, rest) = match digits.as_bytes().first() {
        Some(b'-') => (true, &digits[1..]),
        Some(b'+') => (false, &digits[1..]),
        _ => (false, digits),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number = &rest[..end];
    if number.is_empty() {
        return None;
    }
    if negative {
        // "-0" is still zero
        return number.bytes().all(|b| b == b'0').then_some(0);
    }

    Some(number.parse::<u32>().unwrap_or(u32::MAX))
}

/// Find the tag body in a page's comment lines
///
/// Looks for `<TagName: body>` (tag name matched case-insensitively) and
/// returns `body` from the first line that has it. A tag with nothing at all
/// after the colon (`<TagName:>`) counts as no tag.
pub fn extract_tag<S: AsRef<str>>(comments: &[S], tag_name: &str) -> Option<String> {
    let opener = format!("<{}:", tag_name.to_ascii_lowercase());

    let body = comments.iter().find_map(|line| {
        let line = line.as_ref();
        let lowered = line.to_ascii_lowercase();
        let start = lowered.find(&opener)? + opener.len();
        let close = start + lowered[start..].rfind('>')?;
        Some(&line[start..close])
    })?;

    (!body.is_empty()).then(|| body.to_string())
}

//! Input validation for bus numbers, stop names, and positions
//!
//! Validation is a pure predicate layer: no query executes before the inputs
//! pass. The label patterns come in two modes because the deployed system
//! evolved both ways: a permissive accept-anything-non-empty mode and a
//! stricter character-class mode. The mode is configuration, not code.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Longest accepted bus number in strict mode; matches the store column width.
const MAX_BUS_NUMBER_CHARS: usize = 30;
/// Longest accepted word of a stop name in strict mode.
const MAX_STOP_NAME_WORD_CHARS: usize = 40;
/// Most words accepted in a stop name in strict mode.
const MAX_STOP_NAME_WORDS: usize = 10;

/// Pattern applied to a free-text label (bus number or stop name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPattern {
    /// Any non-empty single-line string
    #[default]
    Relaxed,
    /// Alphanumerics and dashes only, with length bounds
    Strict,
}

/// Validation configuration for caller-supplied labels
///
/// Defaults to relaxed patterns for both fields.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Pattern applied to bus numbers
    pub bus_number: LabelPattern,
    /// Pattern applied to stop names
    pub stop_name: LabelPattern,
}

impl ValidationPolicy {
    /// Validate a bus number against the configured pattern
    pub fn check_bus_number(&self, bus_number: &str) -> Result<()> {
        match self.bus_number {
            LabelPattern::Relaxed => relaxed("bus_number", bus_number),
            LabelPattern::Strict => strict_bus_number(bus_number),
        }
    }

    /// Validate a stop name against the configured pattern
    pub fn check_stop_name(&self, stop_name: &str) -> Result<()> {
        match self.stop_name {
            LabelPattern::Relaxed => relaxed("stop_name", stop_name),
            LabelPattern::Strict => strict_stop_name(stop_name),
        }
    }
}

/// Reject non-positive ids and positions
pub fn positive(field: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(Error::invalid(field, "must be a positive integer"));
    }
    Ok(())
}

fn relaxed(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    if value.contains('\n') {
        return Err(Error::invalid(field, "must be a single line"));
    }
    Ok(())
}

fn label_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

fn strict_bus_number(bus_number: &str) -> Result<()> {
    let chars = bus_number.chars().count();
    if chars == 0 || chars > MAX_BUS_NUMBER_CHARS {
        return Err(Error::invalid(
            "bus_number",
            format!("must be 1 to {MAX_BUS_NUMBER_CHARS} characters"),
        ));
    }
    if !bus_number.chars().all(label_char) {
        return Err(Error::invalid(
            "bus_number",
            "must contain only alphanumerics and dashes",
        ));
    }
    Ok(())
}

fn strict_stop_name(stop_name: &str) -> Result<()> {
    let words: Vec<&str> = stop_name.split_whitespace().collect();
    if words.is_empty() || words.len() > MAX_STOP_NAME_WORDS {
        return Err(Error::invalid(
            "stop_name",
            format!("must be 1 to {MAX_STOP_NAME_WORDS} words"),
        ));
    }
    for word in words {
        let chars = word.chars().count();
        if chars > MAX_STOP_NAME_WORD_CHARS {
            return Err(Error::invalid(
                "stop_name",
                format!("words must be at most {MAX_STOP_NAME_WORD_CHARS} characters"),
            ));
        }
        if !word.chars().all(|c| label_char(c) || c == '_') {
            return Err(Error::invalid(
                "stop_name",
                "words must contain only alphanumerics, underscores, and dashes",
            ));
        }
    }
    Ok(())
}

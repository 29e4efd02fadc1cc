//! Static screen for adversarial user input.
//!
//! The screen is a flat, ordered union of regex groups with a binary verdict:
//! the first pattern that matches anywhere in the lower-cased text wins. There
//! is no scoring, so false positives are expected (a question that merely
//! mentions "tokens" or "bash" is rejected). Treat it as a coarse gate in front
//! of the model, not a classifier.

pub mod patterns;

use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_FILTER: Lazy<SafetyFilter> = Lazy::new(SafetyFilter::with_default_groups);

/// A named list of patterns checked in order.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    name: String,
    patterns: Vec<Regex>,
}

impl PatternGroup {
    pub fn new(name: &str, patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name: name.to_string(), patterns })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the first pattern matching `lowered`, if any.
    fn find(&self, lowered: &str) -> Option<&Regex> {
        self.patterns.iter().find(|p| p.is_match(lowered))
    }
}

/// Which group and pattern flagged an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub group: String,
    pub pattern: String,
}

#[derive(Debug, Clone)]
pub struct SafetyFilter {
    groups: Vec<PatternGroup>,
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::with_default_groups()
    }
}

impl SafetyFilter {
    pub fn new(groups: Vec<PatternGroup>) -> Self {
        Self { groups }
    }

    pub fn with_default_groups() -> Self {
        Self::new(patterns::default_groups())
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    /// Replaces the group with the same name in place, or appends it.
    pub fn with_group(mut self, group: PatternGroup) -> Self {
        match self.groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => {
                *existing = group;
            }
            None => self.groups.push(group),
        }
        self
    }

    pub fn without_group(mut self, name: &str) -> Self {
        self.groups.retain(|g| g.name != name);
        self
    }

    pub fn first_match(&self, text: &str) -> Option<PatternMatch> {
        if text.is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        self.groups.iter().find_map(|group| {
            group.find(&lowered).map(|pattern| PatternMatch {
                group: group.name.clone(),
                pattern: pattern.as_str().to_string(),
            })
        })
    }

    pub fn is_adversarial(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

/// Screens `text` with the built-in groups.
pub fn is_adversarial(text: &str) -> bool {
    DEFAULT_FILTER.is_adversarial(text)
}

//! Mention classification.

use regex::Regex;
use thiserror::Error;

use crate::user::BotUser;

/// Error building a mention pattern.
#[derive(Debug, Error)]
#[error("invalid mention pattern: {0}")]
pub struct PatternError(#[from] regex::Error);

/// Decides whether a message text mentions the bot.
///
/// The pattern is the bot's username wrapped as a case-insensitive regular
/// expression. Matching is substring-style, not whole-word: a username that
/// is a substring of another word will over-match (`"ada"` matches inside
/// `"adapter"`). This is a known limitation of the matching scheme and is
/// kept as-is rather than silently tightened to word boundaries.
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    pattern: Regex,
}

impl MentionMatcher {
    /// Builds the matcher for a resolved bot identity.
    pub fn for_user(user: &BotUser) -> Result<Self, PatternError> {
        Self::from_pattern(&regex::escape(&user.username))
    }

    /// Builds a matcher from an arbitrary regex fragment.
    ///
    /// The fragment is compiled case-insensitively and tested as a substring
    /// of the message text.
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        let pattern = Regex::new(&format!("(?i){pattern}"))?;
        Ok(Self { pattern })
    }

    /// Returns true when the text matches the mention pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(username: &str) -> MentionMatcher {
        MentionMatcher::for_user(&BotUser::new("U1", username)).unwrap()
    }

    #[test]
    fn matches_case_insensitively() {
        let m = matcher("slackyboy");
        assert!(m.is_match("hey Slackyboy, status?"));
        assert!(m.is_match("SLACKYBOY wake up"));
    }

    #[test]
    fn does_not_match_unrelated_text() {
        let m = matcher("slackyboy");
        assert!(!m.is_match("hey slack, status?"));
        assert!(!m.is_match(""));
    }

    #[test]
    fn substring_usernames_over_match() {
        // Known limitation: no word-boundary anchoring.
        let m = matcher("ada");
        assert!(m.is_match("check the adapter logs"));
    }

    #[test]
    fn regex_metacharacters_in_usernames_are_literal() {
        let m = matcher("c.p.o");
        assert!(m.is_match("paging C.P.O here"));
        assert!(!m.is_match("paging cxpxo here"));
    }
}

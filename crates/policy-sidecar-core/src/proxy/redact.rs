//! Log redaction.
//!
//! Masks credentials and email addresses in text bound for the logs. Rules run
//! in table order; no replacement literal matches any rule, so running the
//! chain twice changes nothing.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// One pattern and the literal that replaces every match.
pub struct RedactionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl RedactionRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        #[allow(clippy::expect_used, reason = "patterns are compile-time constants")]
        let pattern = Regex::new(pattern).expect("redaction pattern is valid");
        Self { name, pattern, replacement }
    }

    fn apply(&self, text: &mut String) {
        if self.pattern.is_match(text) {
            *text = self.pattern.replace_all(text, NoExpand(self.replacement)).into_owned();
        }
    }
}

static RULES: LazyLock<Vec<RedactionRule>> = LazyLock::new(|| {
    vec![
        RedactionRule::new(
            "email",
            r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            "[email redacted]",
        ),
        RedactionRule::new("openai_key", r"sk-[A-Za-z0-9]{16,}", "sk-REDACTED"),
        RedactionRule::new(
            "labelled_key",
            r"(?i)(api[_-]?key|authorization|bearer)\s*[:=]\s*[A-Za-z0-9._-]{10,}",
            "API_KEY=REDACTED",
        ),
        RedactionRule::new("venice_key", r"vvv_[A-Za-z0-9._-]{10,}", "vvv_REDACTED"),
    ]
});

/// The ordered rule table.
pub fn rules() -> &'static [RedactionRule] {
    &RULES
}

/// Apply every rule, in order, to `text`.
pub fn redact(text: &str) -> String {
    let mut text = text.to_string();
    for rule in rules() {
        rule.apply(&mut text);
    }
    text
}

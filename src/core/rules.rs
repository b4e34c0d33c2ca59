//! Fence rules: which chunk openers are dropped and which are rewritten
//!
//! Each learnr convention is one named entry in an ordered table. The first
//! rule whose opener pattern matches a line decides what happens to it, so
//! supporting a new convention means adding a row, not touching the state
//! machine.

use crate::error::Result;
use regex::Regex;
use std::borrow::Cow;

/// What a matching rule does to its fence line
#[derive(Debug, Clone)]
pub enum FenceAction {
    /// Drop the whole region, opener and closing fence included
    Skip,
    /// Keep the region but rewrite the opener, replacing every match of
    /// `pattern` with `replacement`
    Rewrite { pattern: Regex, replacement: String },
}

/// A single named fence convention
#[derive(Debug, Clone)]
pub struct FenceRule {
    name: String,
    opener: Regex,
    action: FenceAction,
}

impl FenceRule {
    /// Create a rule from an opener pattern, matched at the start of a line
    pub fn new(name: impl Into<String>, opener: &str, action: FenceAction) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            opener: Regex::new(opener)?,
            action,
        })
    }

    /// Rule dropping chunks whose label ends in `-<suffix>`
    pub fn skip_suffix(suffix: &str) -> Result<Self> {
        let suffix = suffix.trim_start_matches('-');
        let opener = format!(r"^```\{{.*-{}\}}", regex::escape(suffix));
        Self::new(suffix, &opener, FenceAction::Skip)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &FenceAction {
        &self.action
    }

    /// Whether this rule's opener pattern matches the line
    pub fn matches(&self, line: &str) -> bool {
        self.opener.is_match(line)
    }

    /// Apply a rewrite action to the line. Skip rules leave it untouched.
    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match &self.action {
            FenceAction::Skip => Cow::Borrowed(line),
            FenceAction::Rewrite {
                pattern,
                replacement,
            } => pattern.replace_all(line, replacement.as_str()),
        }
    }
}

/// Ordered table of fence rules
#[derive(Debug, Clone, Default)]
pub struct FenceRules {
    rules: Vec<FenceRule>,
}

impl FenceRules {
    /// Empty table; every line passes through
    pub fn new() -> Self {
        Self::default()
    }

    /// The learnr conventions: `remove_for_md=T`, `-solution` and
    /// `-code-check` chunks are dropped, `exercise=T` flags are stripped.
    pub fn learnr() -> Result<Self> {
        let mut rules = Self::new();
        rules.push(FenceRule::new(
            "remove",
            r"^```\{.*remove_for_md=T.*\}",
            FenceAction::Skip,
        )?);
        rules.push(FenceRule::new(
            "solution",
            r"^```\{.*-solution\}",
            FenceAction::Skip,
        )?);
        rules.push(FenceRule::new(
            "code-check",
            r"^```\{.*-code-check\}",
            FenceAction::Skip,
        )?);
        rules.push(FenceRule::new(
            "exercise",
            r"^```\{.*exercise\s*=\s*T.*\}",
            FenceAction::Rewrite {
                pattern: Regex::new(r",\s*exercise\s*=\s*T(RUE)?")?,
                replacement: String::new(),
            },
        )?);
        Ok(rules)
    }

    /// Append a rule. Rules are tried in insertion order.
    pub fn push(&mut self, rule: FenceRule) {
        self.rules.push(rule);
    }

    /// Insert a skip rule ahead of the rewrite rules so a dropped region is
    /// never merely rewritten
    pub fn push_skip(&mut self, rule: FenceRule) {
        let at = self
            .rules
            .iter()
            .position(|r| !matches!(r.action, FenceAction::Skip))
            .unwrap_or(self.rules.len());
        self.rules.insert(at, rule);
    }

    /// The first rule matching the line, if any
    pub fn classify(&self, line: &str) -> Option<&FenceRule> {
        self.rules.iter().find(|rule| rule.matches(line))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FenceRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_name(rules: &FenceRules, line: &str) -> Option<String> {
        rules.classify(line).map(|r| r.name().to_string())
    }

    #[test]
    fn test_learnr_table_order() {
        let rules = FenceRules::learnr().unwrap();
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["remove", "solution", "code-check", "exercise"]);
    }

    #[test]
    fn test_classify_skip_rules() {
        let rules = FenceRules::learnr().unwrap();
        assert_eq!(
            classify_name(&rules, "```{r remove_for_md=T}\n").as_deref(),
            Some("remove")
        );
        assert_eq!(
            classify_name(&rules, "```{r setup, remove_for_md=TRUE, echo=F}\n").as_deref(),
            Some("remove")
        );
        assert_eq!(
            classify_name(&rules, "```{r ex1-solution}\n").as_deref(),
            Some("solution")
        );
        assert_eq!(
            classify_name(&rules, "```{r ex1-code-check}\n").as_deref(),
            Some("code-check")
        );
    }

    #[test]
    fn test_skip_takes_precedence_over_exercise() {
        let rules = FenceRules::learnr().unwrap();
        let line = "```{r ex1, exercise=T, remove_for_md=T}\n";
        assert_eq!(classify_name(&rules, line).as_deref(), Some("remove"));
    }

    #[test]
    fn test_non_matching_lines() {
        let rules = FenceRules::learnr().unwrap();
        assert!(rules.classify("```{r plain}\n").is_none());
        assert!(rules.classify("```\n").is_none());
        assert!(rules.classify("Some text with -solution} in it\n").is_none());
        // the suffix must close the attribute list
        assert!(rules.classify("```{r ex1-solution-notes}\n").is_none());
        // openers must start at column 0
        assert!(rules.classify("  ```{r ex1-solution}\n").is_none());
    }

    #[test]
    fn test_exercise_rewrite() {
        let rules = FenceRules::learnr().unwrap();

        let line = "```{r ex1, exercise = T}\n";
        let rule = rules.classify(line).unwrap();
        assert_eq!(rule.name(), "exercise");
        assert_eq!(rule.rewrite(line), "```{r ex1}\n");

        let line = "```{r ex2, exercise=TRUE, exercise.lines = 5}\n";
        let rule = rules.classify(line).unwrap();
        assert_eq!(rule.rewrite(line), "```{r ex2, exercise.lines = 5}\n");

        let line = "```{r ex3 ,exercise=T}";
        assert_eq!(rules.classify(line).unwrap().rewrite(line), "```{r ex3 }");
    }

    #[test]
    fn test_skip_rule_does_not_rewrite() {
        let rules = FenceRules::learnr().unwrap();
        let line = "```{r ex1-solution}\n";
        assert_eq!(rules.classify(line).unwrap().rewrite(line), line);
    }

    #[test]
    fn test_skip_suffix_rule() {
        let mut rules = FenceRules::learnr().unwrap();
        rules.push_skip(FenceRule::skip_suffix("hint").unwrap());

        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["remove", "solution", "code-check", "hint", "exercise"]
        );
        assert_eq!(
            classify_name(&rules, "```{r ex1-hint}\n").as_deref(),
            Some("hint")
        );
        // leading dash is accepted and suffixes are matched literally
        let rule = FenceRule::skip_suffix("-hint.1").unwrap();
        assert_eq!(rule.name(), "hint.1");
        assert!(rule.matches("```{r ex1-hint.1}"));
        assert!(!rule.matches("```{r ex1-hintx1}"));
    }

    #[test]
    fn test_invalid_rule_pattern() {
        assert!(FenceRule::new("broken", "```{(", FenceAction::Skip).is_err());
    }
}

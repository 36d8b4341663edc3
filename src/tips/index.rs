//! Immutable pattern → extension id index built from tip data.
use crate::error::MatchError;
use crate::matcher::PathMatcher;

/// One glob pattern and every extension it recommends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRule {
    /// Glob pattern matched against document paths.
    pub pattern: String,
    /// Recommended ids, in the order they were first seen.
    pub extension_ids: Vec<String>,
}

/// An individually notified recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportantTip {
    /// Recommended extension id.
    pub extension_id: String,
    /// Glob pattern that triggers it.
    pub pattern: String,
}

impl ImportantTip {
    /// Convert an ordered `id → pattern` mapping, one tip per id.
    #[must_use]
    pub fn from_map(map: &[(String, String)]) -> Vec<Self> {
        map.iter()
            .map(|(id, pattern)| Self {
                extension_id: id.clone(),
                pattern: pattern.clone(),
            })
            .collect()
    }
}

/// Read-only grouping of tip rules by pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternIndex {
    rules: Vec<TipRule>,
}

impl PatternIndex {
    /// Group an ordered `id → pattern` mapping by pattern.
    ///
    /// Patterns keep first-occurrence order and ids keep input order within
    /// their pattern. Patterns are not validated here.
    #[must_use]
    pub fn build(tip_map: &[(String, String)]) -> Self {
        let mut rules: Vec<TipRule> = Vec::new();
        for (id, pattern) in tip_map {
            match rules.iter_mut().find(|r| &r.pattern == pattern) {
                Some(rule) => {
                    if !rule.extension_ids.contains(id) {
                        rule.extension_ids.push(id.clone());
                    }
                }
                None => rules.push(TipRule {
                    pattern: pattern.clone(),
                    extension_ids: vec![id.clone()],
                }),
            }
        }
        Self { rules }
    }

    /// All rules, in pattern first-occurrence order.
    #[must_use]
    pub fn rules(&self) -> &[TipRule] {
        &self.rules
    }

    /// Ids recommended by exactly `pattern`.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<&[String]> {
        self.rules
            .iter()
            .find(|r| r.pattern == pattern)
            .map(|r| r.extension_ids.as_slice())
    }

    /// Whether the index holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every id whose pattern matches `path`, in rule order.
    ///
    /// # Errors
    ///
    /// Propagates the first matcher fault.
    pub fn matching_ids(
        &self,
        path: &str,
        matcher: &dyn PathMatcher,
    ) -> Result<Vec<String>, MatchError> {
        let mut ids = Vec::new();
        for rule in &self.rules {
            if matcher.is_match(&rule.pattern, path)? {
                ids.extend(rule.extension_ids.iter().cloned());
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::matcher::GlobPathMatcher;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(id, p)| ((*id).to_string(), (*p).to_string()))
            .collect()
    }

    #[test]
    fn groups_ids_sharing_a_pattern_in_input_order() {
        let index = PatternIndex::build(&pairs(&[
            ("b.two", "**/*.md"),
            ("x.rs", "**/*.rs"),
            ("a.one", "**/*.md"),
        ]));
        assert_eq!(index.rules().len(), 2);
        assert_eq!(index.rules()[0].pattern, "**/*.md");
        assert_eq!(index.get("**/*.md").unwrap(), ["b.two", "a.one"]);
        assert_eq!(index.get("**/*.rs").unwrap(), ["x.rs"]);
        assert!(index.get("**/*.py").is_none());
    }

    #[test]
    fn duplicate_id_for_same_pattern_is_kept_once() {
        let index = PatternIndex::build(&pairs(&[("a.b", "**/*.md"), ("a.b", "**/*.md")]));
        assert_eq!(index.get("**/*.md").unwrap(), ["a.b"]);
    }

    #[test]
    fn empty_map_builds_empty_index() {
        assert!(PatternIndex::build(&[]).is_empty());
    }

    #[test]
    fn malformed_patterns_are_kept() {
        let index = PatternIndex::build(&pairs(&[("a.b", "**/[")]));
        assert_eq!(index.get("**/[").unwrap(), ["a.b"]);
    }

    #[test]
    fn matching_ids_collects_every_matching_rule() {
        let index = PatternIndex::build(&pairs(&[
            ("md.one", "**/*.md"),
            ("md.two", "**/*.md"),
            ("readme.only", "**/README.md"),
            ("rust.lang", "**/*.rs"),
        ]));
        let ids = index
            .matching_ids("/p/README.md", &GlobPathMatcher::new())
            .unwrap();
        assert_eq!(ids, ["md.one", "md.two", "readme.only"]);
    }

    #[test]
    fn important_tips_are_not_grouped() {
        let tips = ImportantTip::from_map(&pairs(&[("a.b", "**/*.ts"), ("c.d", "**/*.ts")]));
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[1].extension_id, "c.d");
    }
}

use anyhow::{Context, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Free-text rewriting applied to designated columns before they enter a
/// patch. The trait keeps the implementation swappable; the engine treats
/// the output as an opaque string.
pub trait Rewrite {
    fn rewrite(&self, text: &str) -> String;
}

/// On-disk glossary shape: ordered pattern rules plus a term dictionary.
///
/// ```yaml
/// patterns:
///   - match: "^Verify that (.+)$"
///     replace: "Confirm that $1"
/// terms:
///   screenshot: screen capture
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlossaryFile {
    #[serde(default)]
    pub patterns: Vec<PatternRule>,
    #[serde(default)]
    pub terms: IndexMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternRule {
    #[serde(rename = "match")]
    pub pattern: String,
    pub replace: String,
}

// Leading bullet or numbering marker that must survive rewriting:
// "- ", "* ", "1. ", "1-2. ", "(3) " and the like.
static LINE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*(?:[-*•]\s*|\d+[.\-]\s*|\d+-\d+[.\-]\s*|\(\d+\)\s*)?)(.*)$").expect("regex")
});

/// Rule-based rewriter: per line, the first matching pattern rule applies,
/// then glossary terms substitute case-insensitively.
pub struct GlossaryRewriter {
    patterns: Vec<(Regex, String)>,
    terms: Vec<(Regex, String)>,
}

impl GlossaryRewriter {
    /// A rewriter with no rules; rewriting is the identity.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            terms: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read glossary '{}'", path.display()))?;
        let glossary: GlossaryFile = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse glossary '{}'", path.display()))?;
        Self::from_glossary(glossary)
    }

    pub fn from_glossary(glossary: GlossaryFile) -> Result<Self> {
        let mut patterns = Vec::with_capacity(glossary.patterns.len());
        for rule in glossary.patterns {
            let regex = Regex::new(&rule.pattern)
                .with_context(|| format!("invalid glossary pattern '{}'", rule.pattern))?;
            patterns.push((regex, rule.replace));
        }

        let mut terms = Vec::with_capacity(glossary.terms.len());
        for (term, replacement) in glossary.terms {
            let regex = Regex::new(&format!("(?i){}", regex::escape(&term)))
                .with_context(|| format!("invalid glossary term '{term}'"))?;
            terms.push((regex, replacement));
        }

        Ok(Self { patterns, terms })
    }

    fn rewrite_line(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return line.to_string();
        }

        let Some(captures) = LINE_MARKER.captures(line) else {
            return self.apply_rules(line);
        };
        let prefix = captures.get(1).map_or("", |m| m.as_str());
        let content = captures.get(2).map_or("", |m| m.as_str());
        if content.trim().is_empty() {
            return line.to_string();
        }

        format!("{prefix}{}", self.apply_rules(content))
    }

    fn apply_rules(&self, text: &str) -> String {
        let mut result = text.to_string();

        for (regex, replacement) in &self.patterns {
            let next = regex.replace_all(&result, replacement.as_str());
            if next != result {
                result = next.into_owned();
                break;
            }
        }

        for (regex, replacement) in &self.terms {
            result = regex
                .replace_all(&result, replacement.as_str())
                .into_owned();
        }

        result
    }
}

impl Rewrite for GlossaryRewriter {
    fn rewrite(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        text.split('\n')
            .map(|line| self.rewrite_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

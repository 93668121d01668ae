//! Word-boundary patterns compiled once per request and reused across every
//! candidate product.

use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::types::MatchError;

/// Upper bound on compiled pattern size; model strings are short, anything
/// beyond this is rejected as input rather than compiled.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// The boundary variants of one token: unmodified, spaces removed, spaces as
/// `-`, spaces as `_`. Identical variants collapse into one pattern.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    token: String,
    variants: RegexSet,
}

impl TokenPattern {
    pub fn compile(token: &str) -> Result<Self, MatchError> {
        let forms = [
            token.to_string(),
            token.replace(' ', ""),
            token.replace(' ', "-"),
            token.replace(' ', "_"),
        ];
        // `\b` is Unicode-aware: letters such as `ă`, `ș`, `ț` count as word
        // characters, so a token never matches the ASCII prefix of a word
        // like "Navigație".
        let mut patterns: Vec<String> = Vec::with_capacity(forms.len());
        for form in &forms {
            let pattern = format!(r"\b{}\b", regex::escape(form));
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }

        let variants = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| MatchError::InvalidInput(format!("token '{token}': {e}")))?;

        Ok(Self {
            token: token.to_string(),
            variants,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// True if any variant occurs in `name` as a whole word.
    pub fn is_match(&self, name: &str) -> bool {
        self.variants.is_match(name)
    }
}

/// Compiled form of a tokenized model designation.
#[derive(Debug, Clone)]
pub struct ModelPattern {
    tokens: Vec<TokenPattern>,
    /// Contiguous `\bt1\s+t2…\b` form; only built for two or more tokens.
    sequence: Option<Regex>,
}

impl ModelPattern {
    pub fn compile(tokens: &[String]) -> Result<Self, MatchError> {
        let compiled = tokens
            .iter()
            .map(|token| TokenPattern::compile(token))
            .collect::<Result<Vec<_>, _>>()?;

        let sequence = if tokens.len() >= 2 {
            let body = tokens
                .iter()
                .map(|token| regex::escape(token))
                .collect::<Vec<_>>()
                .join(r"\s+");
            let regex = regex::RegexBuilder::new(&format!(r"\b{body}\b"))
                .case_insensitive(true)
                .size_limit(PATTERN_SIZE_LIMIT)
                .build()
                .map_err(|e| MatchError::InvalidInput(format!("model sequence: {e}")))?;
            Some(regex)
        } else {
            None
        };

        Ok(Self {
            tokens: compiled,
            sequence,
        })
    }

    pub fn tokens(&self) -> &[TokenPattern] {
        &self.tokens
    }

    /// A product name qualifies if every token occurs as a word somewhere in
    /// it, or (for multi-token models) the tokens occur contiguously in order.
    ///
    /// A model with no tokens places no constraint on the name.
    pub fn is_match(&self, name: &str) -> bool {
        if self.tokens.iter().all(|token| token.is_match(name)) {
            return true;
        }
        self.sequence
            .as_ref()
            .is_some_and(|sequence| sequence.is_match(name))
    }
}

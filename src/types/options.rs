use std::fmt;

use super::error::CompileError;

/// The cell expression dialects recognized in input columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatcherKind {
    /// `1..5`, `!a...m`
    Range,
    /// `>= 10`, `!= 0`
    Numeric,
    /// `=~ ^A`, `!~ x$`, `!= text`
    Pattern,
    /// `:= nil`, `= true`, `== 3.5`
    Constant,
    /// `:other_field`, `> :limit`
    Symbol,
    /// `:field.present`, `!:age < 18`
    Guard,
}

impl MatcherKind {
    /// All matchers in the order they are tried.
    pub const DEFAULT: [MatcherKind; 6] = [
        MatcherKind::Range,
        MatcherKind::Numeric,
        MatcherKind::Pattern,
        MatcherKind::Constant,
        MatcherKind::Symbol,
        MatcherKind::Guard,
    ];
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatcherKind::Range => "range",
            MatcherKind::Numeric => "numeric",
            MatcherKind::Pattern => "pattern",
            MatcherKind::Constant => "constant",
            MatcherKind::Symbol => "symbol",
            MatcherKind::Guard => "guard",
        };
        f.write_str(name)
    }
}

/// Table-wide compilation and decision options.
///
/// # Example
///
/// ```
/// use dectable::Options;
///
/// let options = Options::new().accumulate().index(1);
/// assert!(!options.is_first_match());
/// assert_eq!(options.index_columns(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    first_match: bool,
    regexp_implicit: bool,
    text_only: bool,
    matchers: Vec<MatcherKind>,
    index: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            first_match: true,
            regexp_implicit: false,
            text_only: false,
            matchers: MatcherKind::DEFAULT.to_vec(),
            index: None,
        }
    }
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first matching row (`true`, the default) or gather every
    /// matching row (`false`).
    #[must_use]
    pub fn first_match(mut self, first_match: bool) -> Self {
        self.first_match = first_match;
        self
    }

    /// Shorthand for `first_match(false)`.
    #[must_use]
    pub fn accumulate(self) -> Self {
        self.first_match(false)
    }

    /// Treat operator-less cells containing non-word characters as regular
    /// expressions.
    #[must_use]
    pub fn regexp_implicit(mut self, enabled: bool) -> Self {
        self.regexp_implicit = enabled;
        self
    }

    /// Disable every expression matcher table-wide.
    #[must_use]
    pub fn text_only(mut self, enabled: bool) -> Self {
        self.text_only = enabled;
        self
    }

    /// Replace the input matcher list. Matchers are tried in the given
    /// order and repeats are dropped. An empty list disables all.
    #[must_use]
    pub fn matchers(mut self, matchers: impl IntoIterator<Item = MatcherKind>) -> Self {
        self.matchers.clear();
        for matcher in matchers {
            if !self.matchers.contains(&matcher) {
                self.matchers.push(matcher);
            }
        }
        self
    }

    /// Index the table on its first `columns` input columns.
    #[must_use]
    pub fn index(mut self, columns: usize) -> Self {
        self.index = Some(columns);
        self
    }

    #[must_use]
    pub fn is_first_match(&self) -> bool {
        self.first_match
    }

    #[must_use]
    pub fn is_regexp_implicit(&self) -> bool {
        self.regexp_implicit
    }

    #[must_use]
    pub fn is_text_only(&self) -> bool {
        self.text_only
    }

    /// The enabled input matchers in the order they are tried; empty when
    /// `text_only`.
    #[must_use]
    pub fn enabled_matchers(&self) -> &[MatcherKind] {
        if self.text_only {
            return &[];
        }
        &self.matchers
    }

    #[must_use]
    pub fn index_columns(&self) -> Option<usize> {
        self.index
    }

    /// Check option values that the builder methods cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidOption`] for an index of zero columns.
    pub fn validate(&self) -> Result<(), CompileError> {
        if self.index == Some(0) {
            return Err(CompileError::InvalidOption {
                option: "index".into(),
                reason: "must be a positive integer".into(),
            });
        }
        Ok(())
    }
}

//! Filter selection.
//!
//! [`FilterConfig`] is the mutable record a UI or config file builds up. Before
//! a run it is compiled into an immutable [`FilterPlan`], which is the only
//! thing the pipeline looks at. Compilation is where an unparseable digit-sum
//! target is downgraded to "category inactive" and reported as a
//! [`ConfigIssue`] instead of failing the run.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NumsiftError, Result};
use crate::patterns::{self, PatternKind, SpecialKind};

/// Default suffix for [`PatternKind::Ending`].
pub const DEFAULT_ENDING: &str = "0000";

/// Filter categories a user can switch on. A token must pass every active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    Search,
    Pattern,
    Sum,
    Preference,
    Special,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Search,
        FilterCategory::Pattern,
        FilterCategory::Sum,
        FilterCategory::Preference,
        FilterCategory::Special,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FilterCategory::Search => "search",
            FilterCategory::Pattern => "pattern",
            FilterCategory::Sum => "sum",
            FilterCategory::Preference => "preference",
            FilterCategory::Special => "special",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Non-fatal problem found while compiling a [`FilterConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    /// A numeric parameter did not parse; its category was skipped for the run.
    InvalidConfigValue { field: String, value: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::InvalidConfigValue { field, value } => {
                write!(f, "ignoring {} filter: '{}' is not a non-negative integer", field, value)
            }
        }
    }
}

/// Everything a user can set before a filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Active categories, unique, in activation order
    pub active: IndexSet<FilterCategory>,

    /// Substring a token must contain (empty = no constraint)
    pub search: String,

    pub pattern: PatternKind,

    /// Suffix used when `pattern` is `ending`
    pub ending: String,

    /// Digit-sum target exactly as typed (None or blank = no constraint)
    pub target_sum: Option<String>,

    /// Compare the single-digit reduction instead of the plain digit sum
    pub single_digit_sum: bool,

    pub special: SpecialKind,

    /// Digits that must all appear
    pub lucky: IndexSet<char>,

    /// Digits that must all be absent
    pub unlucky: IndexSet<char>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            active: IndexSet::new(),
            search: String::new(),
            pattern: PatternKind::default(),
            ending: DEFAULT_ENDING.to_string(),
            target_sum: None,
            single_digit_sum: false,
            special: SpecialKind::default(),
            lucky: IndexSet::new(),
            unlucky: IndexSet::new(),
        }
    }
}

fn check_digit(digit: char) -> Result<()> {
    if !digit.is_ascii_digit() {
        return Err(NumsiftError::validation(format!(
            "'{}' is not a single digit (expected 0-9)",
            digit
        )));
    }
    Ok(())
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, category: FilterCategory) -> bool {
        self.active.contains(&category)
    }

    pub fn activate(&mut self, category: FilterCategory) {
        self.active.insert(category);
    }

    pub fn deactivate(&mut self, category: FilterCategory) {
        self.active.shift_remove(&category);
    }

    /// Flip a category. Returns whether it is active afterwards.
    pub fn toggle(&mut self, category: FilterCategory) -> bool {
        if self.active.shift_remove(&category) {
            false
        } else {
            self.active.insert(category);
            true
        }
    }

    /// Add a must-have digit. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` if `digit` is not `0`-`9`.
    pub fn add_lucky_digit(&mut self, digit: char) -> Result<bool> {
        check_digit(digit)?;
        Ok(self.lucky.insert(digit))
    }

    pub fn remove_lucky_digit(&mut self, digit: char) -> bool {
        self.lucky.shift_remove(&digit)
    }

    /// Add a must-not-have digit. Returns `false` if it was already present.
    pub fn add_unlucky_digit(&mut self, digit: char) -> Result<bool> {
        check_digit(digit)?;
        Ok(self.unlucky.insert(digit))
    }

    pub fn remove_unlucky_digit(&mut self, digit: char) -> bool {
        self.unlucky.shift_remove(&digit)
    }

    /// Restore every field to its default and deactivate all categories.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set the search substring and activate the search category.
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        self.search = needle.into();
        self.activate(FilterCategory::Search);
        self
    }

    /// Select a pattern and activate the pattern category.
    pub fn with_pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self.activate(FilterCategory::Pattern);
        self
    }

    /// Select [`PatternKind::Ending`] with the given suffix.
    pub fn with_ending(mut self, suffix: impl Into<String>) -> Self {
        self.ending = suffix.into();
        self.with_pattern(PatternKind::Ending)
    }

    /// Set the digit-sum target and activate the sum category.
    pub fn with_target_sum(mut self, target: impl Into<String>, single_digit: bool) -> Self {
        self.target_sum = Some(target.into());
        self.single_digit_sum = single_digit;
        self.activate(FilterCategory::Sum);
        self
    }

    /// Select a special type and activate the special category.
    pub fn with_special(mut self, special: SpecialKind) -> Self {
        self.special = special;
        self.activate(FilterCategory::Special);
        self
    }

    /// Set both digit sets and activate the preference category.
    pub fn with_preferences(
        mut self,
        lucky: impl IntoIterator<Item = char>,
        unlucky: impl IntoIterator<Item = char>,
    ) -> Result<Self> {
        for digit in lucky {
            self.add_lucky_digit(digit)?;
        }
        for digit in unlucky {
            self.add_unlucky_digit(digit)?;
        }
        self.activate(FilterCategory::Preference);
        Ok(self)
    }

    /// Check fields that cannot be downgraded to "inactive".
    ///
    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` if a lucky or unlucky entry is not a digit.
    pub fn validate(&self) -> Result<()> {
        for &digit in self.lucky.iter().chain(self.unlucky.iter()) {
            check_digit(digit)?;
        }
        Ok(())
    }

    /// Freeze this configuration into the snapshot evaluated by a run.
    pub fn compile(&self) -> Result<FilterPlan> {
        self.validate()?;

        let mut issues = Vec::new();

        let search = (self.is_active(FilterCategory::Search) && !self.search.is_empty()).then(|| self.search.clone());

        let pattern = self
            .is_active(FilterCategory::Pattern)
            .then(|| (self.pattern, self.ending.clone()));

        let sum = if self.is_active(FilterCategory::Sum) {
            match self.target_sum.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => match parse_sum_target(raw) {
                    Some(target) => Some(SumTarget {
                        target,
                        single_digit: self.single_digit_sum,
                    }),
                    None => {
                        let issue = ConfigIssue::InvalidConfigValue {
                            field: "target_sum".to_string(),
                            value: raw.to_string(),
                        };
                        tracing::warn!("{}", issue);
                        issues.push(issue);
                        None
                    }
                },
            }
        } else {
            None
        };

        let preference = self.is_active(FilterCategory::Preference).then(|| Preferences {
            lucky: self.lucky.iter().copied().collect(),
            unlucky: self.unlucky.iter().copied().collect(),
        });

        let special = self.is_active(FilterCategory::Special).then_some(self.special);

        Ok(FilterPlan {
            search,
            pattern,
            sum,
            preference,
            special,
            issues,
        })
    }
}

/// Parse a non-negative integer target. Digit strings too large for `u64`
/// saturate to `u64::MAX`, which no digit sum reaches.
fn parse_sum_target(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SumTarget {
    target: u64,
    single_digit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Preferences {
    lucky: Vec<char>,
    unlucky: Vec<char>,
}

/// Immutable snapshot of the categories that constrain a run.
///
/// Inactive categories, an empty search string and an unusable digit-sum
/// target are all compiled away, so [`FilterPlan::matches`] only evaluates
/// what actually constrains the result, each check at most once per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPlan {
    search: Option<String>,
    pattern: Option<(PatternKind, String)>,
    sum: Option<SumTarget>,
    preference: Option<Preferences>,
    special: Option<SpecialKind>,
    issues: Vec<ConfigIssue>,
}

impl FilterPlan {
    /// True when no category constrains the run; every token passes.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none()
            && self.pattern.is_none()
            && self.sum.is_none()
            && self.preference.is_none()
            && self.special.is_none()
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Evaluate every constraining category against `num`.
    pub fn matches(&self, num: &str) -> bool {
        if let Some(needle) = &self.search
            && !num.contains(needle.as_str())
        {
            return false;
        }

        if let Some((kind, ending)) = &self.pattern
            && !kind.matches(num, ending)
        {
            return false;
        }

        if let Some(sum) = self.sum {
            let actual = if sum.single_digit {
                patterns::single_digit_sum(num)
            } else {
                patterns::digit_sum(num)
            };
            if u64::from(actual) != sum.target {
                return false;
            }
        }

        if let Some(prefs) = &self.preference
            && !patterns::matches_digit_preferences(num, &prefs.lucky, &prefs.unlucky)
        {
            return false;
        }

        if let Some(special) = self.special
            && !special.matches(num)
        {
            return false;
        }

        true
    }
}

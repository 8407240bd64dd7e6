//! Data Validation for cells
//!
//! Constrains what users can enter into cells: boolean toggles (checkboxes)
//! and inline dropdown lists.
//!
//! ## Case Sensitivity
//!
//! - **List validation matching**: Case-sensitive. "Yes" != "yes".
//! - **Toggle matching**: Only boolean values pass; `TRUE`/`FALSE` input is
//!   parsed case-insensitively before it gets here.
//!
//! Rules are only consulted for user entry. Programmatic writes go straight
//! to the cell store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::range::CellRange;

// ============================================================================
// Core Types
// ============================================================================

/// A validation rule that constrains cell input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// The type of validation to apply.
    pub rule_type: ValidationType,
    /// If true, empty/blank values are always valid.
    pub ignore_blank: bool,
    /// For List type: show dropdown arrow in cell. Ignored for other types.
    pub show_dropdown: bool,
    /// How a failing value is treated.
    pub error_style: ErrorStyle,
}

impl ValidationRule {
    /// Create a new validation rule with the given type.
    pub fn new(rule_type: ValidationType) -> Self {
        let show_dropdown = matches!(rule_type, ValidationType::List(_));
        Self {
            rule_type,
            ignore_blank: true,
            show_dropdown,
            error_style: ErrorStyle::Stop,
        }
    }

    /// Set ignore_blank option.
    pub fn with_ignore_blank(mut self, ignore: bool) -> Self {
        self.ignore_blank = ignore;
        self
    }

    /// Set the error style.
    pub fn with_error_style(mut self, style: ErrorStyle) -> Self {
        self.error_style = style;
        self
    }

    /// Create a list validation rule from inline values.
    pub fn list_inline(values: Vec<String>) -> Self {
        Self::new(ValidationType::List(ResolvedList::from_items(values)))
    }

    /// Create a boolean toggle (checkbox) rule.
    pub fn checkbox() -> Self {
        Self::new(ValidationType::Checkbox)
    }

    /// True if this rule renders as a checkbox.
    pub fn is_checkbox(&self) -> bool {
        matches!(self.rule_type, ValidationType::Checkbox)
    }

    /// Items offered by a list rule, if this is one.
    pub fn list_items(&self) -> Option<&[String]> {
        match &self.rule_type {
            ValidationType::List(list) => Some(&list.items),
            _ => None,
        }
    }

    /// Check a candidate value against this rule.
    pub fn validate(&self, value: &CellValue) -> ValidationResult {
        if value.is_empty() && self.ignore_blank {
            return ValidationResult::Valid;
        }

        let failure = match &self.rule_type {
            ValidationType::Checkbox => match value {
                CellValue::Boolean(_) => None,
                other => Some(format!("'{}' is not TRUE or FALSE", other)),
            },
            ValidationType::List(list) => {
                if list.items.is_empty() {
                    Some("list has no options".to_string())
                } else if list.contains(&value.raw_display()) {
                    None
                } else {
                    Some(format!("'{}' is not in the list", value))
                }
            }
        };

        match failure {
            None => ValidationResult::Valid,
            Some(reason) => ValidationResult::Invalid {
                rule: self.clone(),
                reason,
            },
        }
    }
}

/// The type of validation to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationType {
    /// Restrict to boolean values, rendered as a checkbox.
    Checkbox,
    /// Restrict to a list of allowed values.
    List(ResolvedList),
}

/// Style of error alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorStyle {
    /// Reject input, user must fix or cancel.
    #[default]
    Stop,
    /// Accept input but flag it.
    Warning,
}

// ============================================================================
// Validation Result
// ============================================================================

/// Result of validating a cell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Input is valid.
    Valid,
    /// Input is invalid.
    Invalid {
        /// The rule that was violated.
        rule: ValidationRule,
        /// Human-readable description of why validation failed.
        reason: String,
    },
}

impl ValidationResult {
    /// Returns true if the result is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns true if the result is invalid.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationResult::Invalid { .. })
    }
}

// ============================================================================
// Resolved List
// ============================================================================

/// The items a dropdown offers, kept exactly as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedList {
    pub items: Vec<String>,
}

impl ResolvedList {
    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }
}

// ============================================================================
// Validation Store (per-sheet storage)
// ============================================================================

/// Storage for validation rules in a sheet.
///
/// Uses a BTreeMap for deterministic ordering. When looking up a validation rule
/// for a cell, we find the first rule whose range contains the cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStore {
    rules: BTreeMap<CellRange, ValidationRule>,
}

impl ValidationStore {
    /// Create a new empty validation store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a validation rule for a range.
    ///
    /// Rules overlapping the range are dropped first, so a cell never carries
    /// two widgets.
    pub fn set(&mut self, range: CellRange, rule: ValidationRule) {
        self.clear_range(&range);
        self.rules.insert(range, rule);
    }

    /// Clear all validation rules that overlap with the given range.
    pub fn clear_range(&mut self, range: &CellRange) {
        self.rules.retain(|r, _| !r.overlaps(range));
    }

    /// Get the validation rule that applies to a cell.
    ///
    /// If multiple rules cover the cell, returns the first one (by range order).
    pub fn get(&self, row: usize, col: usize) -> Option<&ValidationRule> {
        self.rules
            .iter()
            .find(|(range, _)| range.contains(row, col))
            .map(|(_, rule)| rule)
    }

    /// Iterate over all (range, rule) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRange, &ValidationRule)> {
        self.rules.iter()
    }

    /// Number of validation rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no validation rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

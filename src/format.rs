//! Formatting conditions for display
//!
//! [`Formatters`] holds one formatting function for errors and one for
//! warnings, and picks between them with the warning classifier. The writing
//! and logging reporters use it to render each condition.
//!
//! Templates are plain strings in which every `{}` is replaced by the
//! condition's display text. Trailing line terminators are trimmed from a
//! template, since the reporters add their own.
//!
//! # Examples
//!
//! ```
//! use tattle::{Condition, Formatters, Warning};
//!
//! let defaults = Formatters::new();
//! assert_eq!(defaults.format(&Condition::msg("boom")), "ERROR: boom");
//! assert_eq!(
//!     defaults.format(&Condition::new(Warning::new("careful"))),
//!     "WARNING: careful"
//! );
//!
//! let custom = Formatters::new()
//!     .format_error("[E] {}\n")
//!     .format_warning_with(|c| format!("[W] {}", c.to_string().to_uppercase()));
//! assert_eq!(custom.format(&Condition::msg("boom")), "[E] boom");
//! assert_eq!(custom.format(&Condition::new(Warning::new("careful"))), "[W] CAREFUL");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::condition::Condition;

/// A function rendering a condition as text.
pub type FormatFn = Arc<dyn Fn(&Condition) -> String + Send + Sync>;

const DEFAULT_ERROR_TEMPLATE: &str = "ERROR: {}";
const DEFAULT_WARNING_TEMPLATE: &str = "WARNING: {}";

/// Build a [`FormatFn`] from a template.
///
/// Trailing `\n` and `\r` characters are trimmed from `template`, then every
/// `{}` is replaced by the condition's display text.
///
/// ```
/// use tattle::{format_from_template, Condition};
///
/// let format = format_from_template("test: {}\n\n");
/// assert_eq!(format(&Condition::msg("test error")), "test: test error");
/// ```
pub fn format_from_template(template: &str) -> FormatFn {
    let template = template.trim_end_matches(['\n', '\r']).to_owned();
    Arc::new(move |condition| template.replace("{}", &condition.to_string()))
}

/// Formatting functions for errors and warnings.
#[derive(Clone)]
pub struct Formatters {
    errors: FormatFn,
    warnings: FormatFn,
}

impl Formatters {
    /// Formatters producing `ERROR: <text>` and `WARNING: <text>`.
    pub fn new() -> Self {
        Formatters {
            errors: format_from_template(DEFAULT_ERROR_TEMPLATE),
            warnings: format_from_template(DEFAULT_WARNING_TEMPLATE),
        }
    }

    /// Use `template` for errors.
    pub fn format_error(mut self, template: &str) -> Self {
        self.errors = format_from_template(template);
        self
    }

    /// Use `format` for errors.
    pub fn format_error_with<F>(mut self, format: F) -> Self
    where
        F: Fn(&Condition) -> String + Send + Sync + 'static,
    {
        self.errors = Arc::new(format);
        self
    }

    /// Use `template` for warnings.
    pub fn format_warning(mut self, template: &str) -> Self {
        self.warnings = format_from_template(template);
        self
    }

    /// Use `format` for warnings.
    pub fn format_warning_with<F>(mut self, format: F) -> Self
    where
        F: Fn(&Condition) -> String + Send + Sync + 'static,
    {
        self.warnings = Arc::new(format);
        self
    }

    /// Render `condition` with the error or warning formatter, according to
    /// its classification.
    pub fn format(&self, condition: &Condition) -> String {
        if condition.is_warning() {
            (self.warnings)(condition)
        } else {
            (self.errors)(condition)
        }
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters").finish_non_exhaustive()
    }
}

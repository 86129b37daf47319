//! Conditions and the warning classifier
//!
//! A [`Condition`] is what travels through a reporter tree: a cheaply clonable,
//! thread-safe handle to any [`std::error::Error`]. Conditions form cause
//! chains through [`Error::source`](std::error::Error::source), and a condition
//! counts as a *warning* when it, or anything in its cause chain, is a
//! [`Warning`].
//!
//! # Examples
//!
//! ```
//! use tattle::{is_warning, Condition, Warning};
//!
//! let plain = Condition::msg("disk full");
//! assert!(!plain.is_warning());
//!
//! let wrapped = Condition::new(Warning::wrap(plain.clone()));
//! assert!(wrapped.is_warning());
//! assert_eq!(wrapped.to_string(), "disk full");
//!
//! // The original condition is one unwrap away
//! let warning = wrapped.downcast_ref::<Warning>().unwrap();
//! assert_eq!(warning.cause(), Some(&plain));
//!
//! assert!(is_warning(&Warning::new("careful")));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A reported error or warning.
///
/// `Condition` wraps an error value behind an [`Arc`], so forwarding the same
/// condition to many sinks, or retaining it in a capture buffer, never copies
/// the underlying error.
///
/// Equality is identity: two conditions are equal when they share the same
/// underlying error allocation.
#[derive(Clone)]
pub struct Condition {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Condition {
    /// Wrap an error value as a condition.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Condition {
            inner: Arc::new(error),
        }
    }

    /// Create a plain (non-warning) condition carrying only a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use tattle::Condition;
    ///
    /// let condition = Condition::msg("boom");
    /// assert_eq!(condition.to_string(), "boom");
    /// assert!(!condition.is_warning());
    /// ```
    pub fn msg(text: impl Into<String>) -> Self {
        Condition::new(Message(text.into()))
    }

    /// Borrow the underlying error.
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        &*self.inner
    }

    /// The cause of this condition, if it wraps one.
    pub fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }

    /// Returns true if this condition, or anything it wraps, is a [`Warning`].
    pub fn is_warning(&self) -> bool {
        is_warning(self.as_error())
    }

    /// Classify the condition.
    pub fn severity(&self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Attempt to view the underlying error as a concrete type.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        self.as_error().downcast_ref::<T>()
    }

    /// Returns true if both conditions share the same underlying error.
    pub fn ptr_eq(&self, other: &Condition) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Iterate over this condition and every cause beneath it, outermost first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tattle::{Condition, Warning};
    ///
    /// let condition = Condition::new(Warning::wrap(Condition::msg("root cause")));
    /// let messages: Vec<String> = condition.chain().map(|e| e.to_string()).collect();
    /// assert_eq!(messages, vec!["root cause", "root cause"]);
    /// ```
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self.as_error()),
        }
    }
}

impl<E> From<E> for Condition
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Condition::new(error)
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Condition {}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// Iterator over a condition's cause chain.
///
/// Created by [`Condition::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Whether a condition is a hard error or a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A hard error.
    Error,
    /// A warning.
    Warning,
}

impl Severity {
    /// The upper-case label used by the default formatters.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A plain error carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

/// The warning marker.
///
/// Any condition whose cause chain contains a `Warning` is classified as a
/// warning by [`is_warning`]. A `Warning` may wrap another condition, in which
/// case that condition is its [`source`](StdError::source).
///
/// Classification looks for this concrete type only. An error type of your
/// own is not a warning by itself; wrap it with [`Warning::wrap`] (or the
/// [`warning!`] macro with a `cause:`) to report it as one.
///
/// # Examples
///
/// ```
/// use tattle::{warning, Condition, Warning};
///
/// let simple = Warning::new("low disk space");
/// assert!(simple.cause().is_none());
///
/// let cause = Condition::msg("quota exceeded");
/// let formatted = warning!(cause: cause.clone(), "upload skipped: {}", cause);
/// assert_eq!(formatted.to_string(), "upload skipped: quota exceeded");
/// assert_eq!(formatted.cause(), Some(&cause));
/// ```
#[derive(Debug, Clone)]
pub struct Warning {
    message: String,
    cause: Option<Condition>,
}

impl Warning {
    /// Create a new warning with no cause.
    pub fn new(text: impl Into<String>) -> Self {
        Warning {
            message: text.into(),
            cause: None,
        }
    }

    /// Mark an existing condition as a warning.
    ///
    /// The warning carries the same message as `condition`, and `condition`
    /// becomes its cause.
    pub fn wrap(condition: impl Into<Condition>) -> Self {
        let cause = condition.into();
        Warning {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    /// Create a warning from format arguments, optionally wrapping a cause.
    ///
    /// This is what the [`warning!`](crate::warning!) macro expands to.
    pub fn formatted(args: fmt::Arguments<'_>, cause: Option<Condition>) -> Self {
        Warning {
            message: args.to_string(),
            cause,
        }
    }

    /// The warning text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped condition, if any.
    pub fn cause(&self) -> Option<&Condition> {
        self.cause.as_ref()
    }

    /// Consume the warning, returning the wrapped condition.
    pub fn into_cause(self) -> Option<Condition> {
        self.cause
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Warning {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(Condition::as_error)
    }
}

/// Returns true if `error`, or any error in its source chain, is a [`Warning`].
///
/// # Examples
///
/// ```
/// use std::io;
/// use tattle::{is_warning, Warning};
///
/// let plain = io::Error::new(io::ErrorKind::Other, "plain");
/// assert!(!is_warning(&plain));
/// assert!(is_warning(&Warning::wrap(plain)));
/// ```
pub fn is_warning(error: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(error), |&err| err.source()).any(|err| err.is::<Warning>())
}

/// Construct a [`Warning`] from a format string.
///
/// With a leading `cause: expr,` the given condition becomes the warning's
/// cause; otherwise the warning wraps nothing.
///
/// # Examples
///
/// ```
/// use tattle::{warning, Condition};
///
/// let w = warning!("retrying in {}s", 5);
/// assert_eq!(w.to_string(), "retrying in 5s");
/// assert!(w.cause().is_none());
///
/// let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
/// let w = warning!(cause: io, "fetch failed");
/// assert!(w.cause().is_some());
/// ```
#[macro_export]
macro_rules! warning {
    (cause: $cause:expr, $($arg:tt)+) => {
        $crate::Warning::formatted(
            ::std::format_args!($($arg)+),
            ::std::option::Option::Some($crate::Condition::from($cause)),
        )
    };
    ($($arg:tt)+) => {
        $crate::Warning::formatted(::std::format_args!($($arg)+), ::std::option::Option::None)
    };
}

//! Presentation-side state: list views and user notifications.
//!
//! Nothing here renders anything. These types only make the loading, empty
//! and failed states of each list distinguishable, and carry the message a
//! user should see after an action.

use crate::error::{Result, StorefrontError};
use crate::models::{Customer, Order, Product};

// ---------------------------------------------------------------------------
// ListView
// ---------------------------------------------------------------------------

/// The state of one list on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListView<T> {
    /// A fetch is in flight and nothing has arrived yet.
    #[default]
    Loading,
    /// The service answered with no records.
    Empty,
    Loaded(Vec<T>),
    /// The fetch failed; holds the user-facing reason.
    Failed(String),
}

impl<T> ListView<T> {
    pub fn from_result(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => ListView::Loaded(items),
            Err(e) => ListView::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListView::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListView::Failed(_))
    }

    /// Loaded records; empty for every other state.
    pub fn items(&self) -> &[T] {
        match self {
            ListView::Loaded(items) => items,
            _ => &[],
        }
    }

    /// Placeholder text for states that have no records to show.
    ///
    /// `noun` is the plural record name, e.g. `"products"`.
    pub fn placeholder(&self, noun: &str) -> Option<String> {
        match self {
            ListView::Loading => Some(format!("Loading {}\u{2026}", noun)),
            ListView::Empty => Some(format!("No {} yet.", noun)),
            ListView::Loaded(_) => None,
            ListView::Failed(_) => Some(format!("Could not load {}.", noun)),
        }
    }
}

/// One view per service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub customers: ListView<Customer>,
    pub products: ListView<Product>,
    pub orders: ListView<Order>,
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Describe a failed action.
    ///
    /// Local validation failures are warnings carrying just the reason;
    /// everything else is an error phrased as `"Failed to <action>: <reason>"`.
    pub fn from_error(action: &str, err: &StorefrontError) -> Self {
        match err {
            StorefrontError::Validation(v) => Self::warning(v.to_string()),
            other => Self::error(format!("Failed to {}: {}", action, other)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

//! Dashboard tab state.
//!
//! Each tab moves `Loading → Ready` once per mount. The rows of a ready tab
//! come from one of three places, recorded in [`RowSource`] so the view can
//! label demo data and tell an outage apart from an empty store.

pub mod orders;
pub mod products;

use coffee_stand_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use orders::OrdersTab;
pub use products::{Confirmation, Dialog, ProductsTab};

/// Lifecycle of a mounted tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

/// Where a ready tab's rows came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowSource {
    /// Fetched from the backend.
    #[default]
    Live,
    /// Fetch failed; sample rows are shown and labelled as such.
    Demo,
    /// Fetch failed and demo fallback is off; no rows.
    Unavailable,
}

impl RowSource {
    #[must_use]
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::Demo)
    }

    #[must_use]
    pub const fn is_unavailable(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Pick the row source for a failed fetch.
const fn failed_source(fallback: bool) -> RowSource {
    if fallback {
        RowSource::Demo
    } else {
        RowSource::Unavailable
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A non-blocking notification shown once above the tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}

/// Requests that do not fit the current tab state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    /// The product is not among the tab's rows.
    #[error("Product {0} is not in the product list")]
    UnknownProduct(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_source_follows_fallback_flag() {
        assert_eq!(failed_source(true), RowSource::Demo);
        assert_eq!(failed_source(false), RowSource::Unavailable);
        assert!(RowSource::Demo.is_demo());
        assert!(!RowSource::Live.is_unavailable());
    }

    #[test]
    fn test_notice_constructors() {
        let notice = Notice::error("Failed to add product. Please try again.");
        assert!(notice.is_error());
        assert_eq!(notice.title, "Error");
        assert!(!Notice::success("Product added", "x").is_error());
    }
}

//! Tab groups.
//!
//! Each group has exactly one active tab at all times; only the active tab's
//! panel is visible.

use serde::Serialize;
use thiserror::Error;

use crate::types::{TabGroupId, TabId};

/// Errors building a tab group.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    #[error("tab group {0} has no tabs")]
    Empty(TabGroupId),
    #[error("tab group {group} repeats tab {tab}")]
    DuplicateTab { group: TabGroupId, tab: TabId },
}

/// Result of selecting a tab.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The tab is now the active one.
    Activated,
    /// No such group or tab; nothing changed.
    Unknown,
}

/// A tab and the content of its panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: TabId,
    pub label: String,
    pub panel: String,
}

impl Tab {
    pub fn new(id: &str, label: impl Into<String>, panel: impl Into<String>) -> Self {
        Self {
            id: TabId::new(id),
            label: label.into(),
            panel: panel.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    id: TabGroupId,
    tabs: Vec<Tab>,
    active: usize,
}

impl TabGroup {
    /// Create a group with its first tab active.
    ///
    /// # Errors
    ///
    /// Returns an error if `tabs` is empty or repeats an identifier.
    pub fn new(id: &str, tabs: Vec<Tab>) -> Result<Self, TabError> {
        let id = TabGroupId::new(id);
        if tabs.is_empty() {
            return Err(TabError::Empty(id));
        }
        for (i, tab) in tabs.iter().enumerate() {
            if tabs.iter().skip(i + 1).any(|other| other.id == tab.id) {
                return Err(TabError::DuplicateTab {
                    group: id,
                    tab: tab.id.clone(),
                });
            }
        }
        Ok(Self {
            id,
            tabs,
            active: 0,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &TabGroupId {
        &self.id
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// The currently active tab.
    #[must_use]
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    /// Make `tab_id` the only active tab in this group.
    pub fn select(&mut self, tab_id: &str) -> Selection {
        match self.tabs.iter().position(|tab| tab.id.as_str() == tab_id) {
            Some(index) => {
                self.active = index;
                Selection::Activated
            }
            None => Selection::Unknown,
        }
    }

    #[must_use]
    pub fn is_active(&self, tab_id: &str) -> bool {
        self.active().is_some_and(|tab| tab.id.as_str() == tab_id)
    }
}

/// All tab groups on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSet {
    groups: Vec<TabGroup>,
}

impl TabSet {
    #[must_use]
    pub const fn new(groups: Vec<TabGroup>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, group_id: &str) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.id.as_str() == group_id)
    }

    /// Activate `tab_id` in `group_id`. Other groups are untouched.
    pub fn select(&mut self, group_id: &str, tab_id: &str) -> Selection {
        self.groups
            .iter_mut()
            .find(|g| g.id.as_str() == group_id)
            .map_or(Selection::Unknown, |group| group.select(tab_id))
    }
}

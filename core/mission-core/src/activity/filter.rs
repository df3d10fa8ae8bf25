//! Post-filters applied to an aggregated feed.

use super::types::{ActivityItem, ActivityKind};

/// Narrows a feed by kind and session, then caps its length.
///
/// A kind name that isn't a known [`ActivityKind`] matches nothing.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub kind: Option<String>,
    pub session: Option<String>,
    pub limit: Option<usize>,
}

impl ActivityFilter {
    pub fn matches(&self, item: &ActivityItem) -> bool {
        if let Some(kind) = self.kind.as_deref() {
            if ActivityKind::from_name(kind) != Some(item.kind) {
                return false;
            }
        }
        match self.session.as_deref() {
            Some(session) => item.session_id == session,
            None => true,
        }
    }

    /// Keeps feed order; `limit` applies after filtering.
    pub fn apply(&self, mut items: Vec<ActivityItem>) -> Vec<ActivityItem> {
        items.retain(|item| self.matches(item));
        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        items
    }
}

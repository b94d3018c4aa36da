use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::datatypes::ContactMessage;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Read,
    Unread,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Name,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Read => write!(f, "read"),
            StatusFilter::Unread => write!(f, "unread"),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Date => write!(f, "date"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// User-chosen criteria narrowing the displayed message list.
///
/// All criteria are conjunctive. `service: None` means "all services";
/// `Some(s)` matches messages whose service equals `s` exactly, which
/// excludes messages with no service at all.
#[derive(Clone, Debug, Default)]
pub struct FilterSpec {
    pub search: String,
    pub status: StatusFilter,
    pub service: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Filters and sorts `messages` according to `spec`.
///
/// Pure: the input is never mutated, and the same list and spec always
/// produce the same membership and order. The sort is stable, so messages
/// with equal keys keep their relative input order in both directions.
pub fn apply(messages: &[ContactMessage], spec: &FilterSpec) -> Vec<ContactMessage> {
    let mut result: Vec<ContactMessage> = messages
        .iter()
        .filter(|m| matches(m, spec))
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ordering = match spec.sort_by {
            SortKey::Date => a.created_at.cmp(&b.created_at),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        directed(ordering, spec.sort_order)
    });

    result
}

fn directed(ordering: Ordering, direction: SortOrder) -> Ordering {
    match direction {
        SortOrder::Ascending => ordering,
        // Equal keys stay Equal under reverse, so stability is preserved.
        SortOrder::Descending => ordering.reverse(),
    }
}

fn matches(message: &ContactMessage, spec: &FilterSpec) -> bool {
    // Search is matched literally, whitespace included; only the empty
    // string disables it.
    if !spec.search.is_empty() {
        let query = spec.search.to_lowercase();
        let service = message.service.as_deref().unwrap_or("").to_lowercase();
        let hit = message.name.to_lowercase().contains(&query)
            || message.email.to_lowercase().contains(&query)
            || message.message.to_lowercase().contains(&query)
            || service.contains(&query);
        if !hit {
            return false;
        }
    }

    match spec.status {
        StatusFilter::All => {}
        StatusFilter::Read => {
            if !message.is_read {
                return false;
            }
        }
        StatusFilter::Unread => {
            if message.is_read {
                return false;
            }
        }
    }

    if let Some(wanted) = &spec.service {
        if message.service.as_deref() != Some(wanted.as_str()) {
            return false;
        }
    }

    true
}

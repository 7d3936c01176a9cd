//! View state - what the posts listing currently shows

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::content::Post;

/// Name of the single group used when grouping is off
pub const ALL_POSTS: &str = "All Posts";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} mode \"{value}\" (expected one of: {expected})")]
pub struct ParseModeError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Newest first; undated posts last
    #[default]
    Date,
    /// Alphabetical by Unicode collation; accents and case are secondary
    Title,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "title" => Ok(Self::Title),
            _ => Err(ParseModeError {
                kind: "sort",
                value: s.to_string(),
                expected: "date, title",
            }),
        }
    }
}

/// How the listing is partitioned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GroupMode {
    #[default]
    None,
    /// One group per tag; a post appears under each of its tags
    Tags,
    Month,
    Year,
}

impl GroupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tags => "tags",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "tags" => Ok(Self::Tags),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(ParseModeError {
                kind: "group",
                value: s.to_string(),
                expected: "none, tags, month, year",
            }),
        }
    }
}

/// Current page, sort mode and group mode.
///
/// New states come from [`PostStore`](super::PostStore), which keeps `page`
/// within the current page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewState {
    page: usize,
    sort: SortMode,
    group: GroupMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortMode::Date,
            group: GroupMode::None,
        }
    }
}

impl ViewState {
    pub(crate) fn new(page: usize, sort: SortMode, group: GroupMode) -> Self {
        Self { page, sort, group }
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn group(&self) -> GroupMode {
        self.group
    }
}

/// One page of the listing, grouped
#[derive(Debug)]
pub struct PageView<'a> {
    /// Non-empty groups in display order
    pub groups: IndexMap<String, Vec<&'a Post>>,
    /// Page this view was derived for
    pub page: usize,
    /// Pages available for the current post set
    pub total_pages: usize,
    /// Posts in the collection, before any tag fan-out
    pub total_posts: usize,
}

impl PageView<'_> {
    /// Distinct posts on this page, in first-appearance order
    pub fn posts(&self) -> Vec<&Post> {
        let mut seen: Vec<&Post> = Vec::new();
        for post in self.groups.values().flatten() {
            if !seen.iter().any(|p| p.filename == post.filename) {
                seen.push(*post);
            }
        }
        seen
    }

    /// Entries across all groups, counting tag fan-out
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.page(), 1);
        assert_eq!(view.sort(), SortMode::Date);
        assert_eq!(view.group(), GroupMode::None);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("Title".parse::<SortMode>(), Ok(SortMode::Title));
        assert_eq!("month".parse::<GroupMode>(), Ok(GroupMode::Month));
        let err = "weekly".parse::<GroupMode>().unwrap_err();
        assert!(err.to_string().contains("none, tags, month, year"));
        assert!("size".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trip() {
        for mode in [GroupMode::None, GroupMode::Tags, GroupMode::Month, GroupMode::Year] {
            assert_eq!(mode.to_string().parse::<GroupMode>(), Ok(mode));
        }
    }
}

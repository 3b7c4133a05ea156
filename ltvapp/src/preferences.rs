//! Viewing preferences applied when a fetch cycle finalizes

/// User preferences consumed by the coordinator.
///
/// Sorting is opt-in; by default the catalog keeps the order the sources
/// delivered. `play_last_watched` is carried for the presentation layer,
/// which resumes the bookmarked channel once the catalog is ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub sort_category: bool,
    pub sort_channel: bool,
    pub sort_favorite: bool,
    pub play_last_watched: bool,
}

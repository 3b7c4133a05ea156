//! M3U/EXTINF playlist parser

use super::PlaylistParser;
use ltvcatalog::{Category, Channel, Playlist};

/// Category assigned to entries without a `group-title` attribute.
const UNGROUPED_CATEGORY: &str = "Uncategorized";

/// Parses extended M3U payloads.
///
/// Each `#EXTINF` line carries the display name after the last comma and
/// optional `tvg-logo="..."` / `group-title="..."` attributes; the next
/// non-comment line is the stream URL. Entries are grouped into
/// categories by `group-title` in first-seen order.
pub struct M3uParser;

impl PlaylistParser for M3uParser {
    fn parse(&self, text: &str) -> Option<Playlist> {
        if !text.trim_start().starts_with("#EXTM3U") {
            return None;
        }

        let mut categories: Vec<Category> = Vec::new();
        let mut pending: Option<Channel> = None;

        for line in text.lines() {
            let line = line.trim();

            if let Some(info) = line.strip_prefix("#EXTINF:") {
                let name = info
                    .rfind(',')
                    .map(|pos| info[pos + 1..].trim().to_string())
                    .unwrap_or_default();
                pending = Some(Channel {
                    name,
                    logo: extract_attr(info, "tvg-logo"),
                    stream_url: None,
                    group: extract_attr(info, "group-title"),
                    can_favorite: true,
                });
            } else if !line.is_empty() && !line.starts_with('#') {
                // URL line closes the pending entry
                if let Some(mut channel) = pending.take() {
                    channel.stream_url = Some(line.to_string());
                    push_grouped(&mut categories, channel);
                }
            }
        }

        Some(Playlist::new(categories))
    }
}

fn push_grouped(categories: &mut Vec<Category>, channel: Channel) {
    let group = channel
        .group
        .clone()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| UNGROUPED_CATEGORY.to_string());

    match categories.iter_mut().find(|c| c.name == group) {
        Some(category) => category.channels.push(channel),
        None => categories.push(Category::with_channels(group, vec![channel])),
    }
}

/// Extracts a quoted `name="value"` attribute from an EXTINF line.
fn extract_attr(info: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let start = info.find(&needle)? + needle.len();
    let rest = &info[start..];
    let end = rest.find('"')?;
    let value = rest[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "#EXTM3U\n",
        "#EXTINF:-1 tvg-logo=\"http://example.org/a.png\" group-title=\"News\",Channel A\n",
        "http://example.org/a.m3u8\n",
        "#EXTINF:-1 group-title=\"News\",Channel B\n",
        "http://example.org/b.m3u8\n",
        "#EXTINF:-1,Loose Channel\n",
        "http://example.org/c.m3u8\n",
    );

    #[test]
    fn test_parses_groups_in_first_seen_order() {
        let playlist = M3uParser.parse(SAMPLE).unwrap();
        assert_eq!(playlist.categories.len(), 2);

        let news = &playlist.categories[0];
        assert_eq!(news.name, "News");
        assert_eq!(news.channels.len(), 2);
        assert_eq!(news.channels[0].name, "Channel A");
        assert_eq!(
            news.channels[0].logo.as_deref(),
            Some("http://example.org/a.png")
        );
        assert_eq!(
            news.channels[0].stream_url.as_deref(),
            Some("http://example.org/a.m3u8")
        );

        assert_eq!(playlist.categories[1].name, UNGROUPED_CATEGORY);
        assert_eq!(playlist.categories[1].channels[0].name, "Loose Channel");
    }

    #[test]
    fn test_rejects_payload_without_header() {
        assert!(M3uParser.parse("just some text\n").is_none());
        assert!(M3uParser
            .parse("#EXTINF:-1,Channel A\nhttp://example.org/a\n")
            .is_none());
    }

    #[test]
    fn test_header_only_yields_empty_playlist() {
        let playlist = M3uParser.parse("#EXTM3U\n").unwrap();
        assert!(playlist.is_categories_empty());
    }

    #[test]
    fn test_extinf_without_url_is_dropped() {
        let payload = "#EXTM3U\n#EXTINF:-1,Orphan\n#EXTINF:-1,Kept\nhttp://example.org/k\n";
        let playlist = M3uParser.parse(payload).unwrap();
        assert_eq!(playlist.categories.len(), 1);
        assert_eq!(playlist.categories[0].channels.len(), 1);
        assert_eq!(playlist.categories[0].channels[0].name, "Kept");
    }

    #[test]
    fn test_blank_group_title_falls_back_to_ungrouped() {
        let payload = "#EXTM3U\n#EXTINF:-1 group-title=\"  \",Channel\nhttp://example.org/x\n";
        let playlist = M3uParser.parse(payload).unwrap();
        assert_eq!(playlist.categories[0].name, UNGROUPED_CATEGORY);
    }
}

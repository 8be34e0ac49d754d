//! Placeholder music catalog backing the search, hot and categories routes.
//!
//! Returns fixed sample data until a real site scraper is wired in.

use crate::api::models::{Category, CategoryList, Song, SongPage};

pub const SEARCH_TOTAL: u32 = 100;
pub const HOT_TOTAL: u32 = 200;

/// Renders a track length as zero-padded `mm:ss`.
pub fn format_duration(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn search(keyword: &str, page: u32, limit: u32) -> SongPage {
    let songs = [(1, 225), (2, 252)]
        .into_iter()
        .map(|(id, secs)| Song {
            id,
            title: format!("{} - 示例歌曲{}", keyword, id),
            artist: format!("示例歌手{}", id),
            album: format!("示例专辑{}", id),
            duration: format_duration(secs),
            url: format!("https://example.com/song{}.mp3", id),
            cover: format!("https://example.com/cover{}.jpg", id),
            play_count: None,
        })
        .collect();

    SongPage {
        total: SEARCH_TOTAL,
        page,
        limit,
        songs,
    }
}

pub fn hot(page: u32, limit: u32) -> SongPage {
    let songs = [(101, 1, 210, 1_000_000), (102, 2, 245, 850_000)]
        .into_iter()
        .map(|(id, n, secs, plays)| Song {
            id,
            title: format!("热门歌曲{}", n),
            artist: format!("热门歌手{}", n),
            album: format!("热门专辑{}", n),
            duration: format_duration(secs),
            url: format!("https://example.com/hot{}.mp3", n),
            cover: format!("https://example.com/hot_cover{}.jpg", n),
            play_count: Some(plays),
        })
        .collect();

    SongPage {
        total: HOT_TOTAL,
        page,
        limit,
        songs,
    }
}

pub fn categories() -> CategoryList {
    let categories = [
        (1, "流行", 5000),
        (2, "摇滚", 3200),
        (3, "电子", 2800),
        (4, "古典", 1500),
        (5, "爵士", 1200),
        (6, "民谣", 2000),
    ]
    .into_iter()
    .map(|(id, name, count)| Category {
        id,
        name: name.to_string(),
        count,
    })
    .collect();

    CategoryList { categories }
}

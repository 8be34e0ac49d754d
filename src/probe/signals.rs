use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

// Static selectors so they are compiled once
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static META_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to parse meta description selector")
});

static META_KEYWORDS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="keywords"]"#).expect("Failed to parse meta keywords selector")
});

static MUSIC_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href*="song"], a[href*="music"]"#).expect("Failed to parse music link selector")
});

static AUDIO_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("audio").expect("Failed to parse audio selector")
});

static MUSIC_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".song, .music, .track").expect("Failed to parse music container selector")
});

/// Structural facts extracted from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: String,
    pub description: String,
    pub keywords: String,
    #[serde(rename = "musicElements")]
    pub music_elements: MusicElements,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicElements {
    pub song_links: usize,
    pub audio_elements: usize,
    pub music_containers: usize,
}

impl PageSignals {
    pub fn music_link_count(&self) -> usize {
        self.music_elements.song_links
    }

    pub fn audio_element_count(&self) -> usize {
        self.music_elements.audio_elements
    }

    pub fn music_container_count(&self) -> usize {
        self.music_elements.music_containers
    }
}

/// Parses `html` and extracts its signals.
///
/// Never fails: html5ever recovers from any markup, so broken input just
/// yields empty strings and zero counts.
pub fn probe_page(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        title: document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default(),
        description: meta_content(&document, &META_DESCRIPTION_SELECTOR),
        keywords: meta_content(&document, &META_KEYWORDS_SELECTOR),
        // A selector list matches each element at most once
        music_elements: MusicElements {
            song_links: document.select(&MUSIC_LINK_SELECTOR).count(),
            audio_elements: document.select(&AUDIO_SELECTOR).count(),
            music_containers: document.select(&MUSIC_CONTAINER_SELECTOR).count(),
        },
    }
}

fn meta_content(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

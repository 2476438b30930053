// SPDX-License-Identifier: MPL-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single mishna
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "טקסט")]
    pub text: String,
    /// 1-based number within the chapter
    #[serde(rename = "מספר_משנה")]
    pub number: u32,
    #[serde(rename = "מספר_מילים")]
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based chapter number
    #[serde(rename = "פרק")]
    pub number: u32,
    /// Keyed `משנה_N`
    #[serde(rename = "משניות", default)]
    pub episodes: BTreeMap<String, Episode>,
    #[serde(rename = "מספר_משניות", default)]
    pub episode_count: u32,
}

impl Chapter {
    /// Episodes in reading order. Map keys sort as strings (`משנה_10` before
    /// `משנה_2`), so order by the episode number instead.
    pub fn episodes(&self) -> Vec<&Episode> {
        let mut episodes: Vec<_> = self.episodes.values().collect();
        episodes.sort_by_key(|e| e.number);
        episodes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    #[serde(rename = "מספר_פרקים")]
    pub chapter_count: u32,
    #[serde(rename = "מספר_משניות_סה_כ")]
    pub episode_count: u32,
    #[serde(rename = "מספר_מילים_סה_כ")]
    pub word_count: u64,
    #[serde(rename = "משניות_לפי_פרק", default)]
    pub episodes_per_chapter: BTreeMap<String, u32>,
}

/// A whole tractate as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookContent {
    #[serde(rename = "מסכת")]
    pub name: String,
    #[serde(rename = "מסכת_אנגלית")]
    pub english_name: String,
    /// The order (סדר) the tractate belongs to
    #[serde(rename = "סדר")]
    pub order: String,
    /// Keyed `פרק_N`
    #[serde(rename = "פרקים", default)]
    pub chapters: BTreeMap<String, Chapter>,
    #[serde(rename = "מטאדטה", default)]
    pub metadata: BookMetadata,
}

impl BookContent {
    /// Chapters in reading order
    pub fn chapters(&self) -> Vec<&Chapter> {
        let mut chapters: Vec<_> = self.chapters.values().collect();
        chapters.sort_by_key(|c| c.number);
        chapters
    }

    /// Look up an episode by the zero-based position stored in the progress table
    pub fn episode(&self, chapter_index: u32, episode_index: u32) -> Option<&Episode> {
        let chapters = self.chapters();
        let chapter = chapters.get(chapter_index as usize)?;
        chapter.episodes().get(episode_index as usize).copied()
    }

    /// Position after the given one, crossing chapter boundaries.
    /// `None` at the end of the tractate.
    pub fn next_position(&self, chapter_index: u32, episode_index: u32) -> Option<(u32, u32)> {
        let chapters = self.chapters();
        let chapter = chapters.get(chapter_index as usize)?;

        if (episode_index as usize + 1) < chapter.episodes.len() {
            return Some((chapter_index, episode_index + 1));
        }

        // Skip chapters the extractor left empty
        chapters
            .iter()
            .enumerate()
            .skip(chapter_index as usize + 1)
            .find(|(_, c)| !c.episodes.is_empty())
            .map(|(i, _)| (i as u32, 0))
    }

    /// Episode and word totals recomputed from the chapters
    pub fn totals(&self) -> (u32, u64) {
        self.chapters
            .values()
            .flat_map(|c| c.episodes.values())
            .fold((0, 0), |(episodes, words), e| {
                (episodes + 1, words + u64::from(e.word_count))
            })
    }
}

/// Word count as the extraction tool computes it: punctuation `, . : ;`
/// separates words, everything else is split on whitespace.
pub fn count_words(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';'))
        .filter(|w| !w.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "מסכת": "ברכות",
        "מסכת_אנגלית": "Berakhot",
        "סדר": "זרעים",
        "פרקים": {
            "פרק_1": {
                "פרק": 1,
                "משניות": {
                    "משנה_1": { "טקסט": "מאימתי קורין את שמע בערבית.", "מספר_משנה": 1, "מספר_מילים": 5 },
                    "משנה_2": { "טקסט": "מאימתי קורין את שמע בשחרית:", "מספר_משנה": 2, "מספר_מילים": 5 }
                },
                "מספר_משניות": 2
            },
            "פרק_2": {
                "פרק": 2,
                "משניות": {
                    "משנה_1": { "טקסט": "היה קורא בתורה", "מספר_משנה": 1, "מספר_מילים": 3 }
                },
                "מספר_משניות": 1
            }
        },
        "מטאדטה": {
            "מספר_פרקים": 2,
            "מספר_משניות_סה_כ": 3,
            "מספר_מילים_סה_כ": 13,
            "משניות_לפי_פרק": { "פרק_1": 2, "פרק_2": 1 }
        }
    }"#;

    fn sample() -> BookContent {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn parses_hebrew_keys() {
        let book = sample();
        assert_eq!(book.name, "ברכות");
        assert_eq!(book.english_name, "Berakhot");
        assert_eq!(book.order, "זרעים");
        assert_eq!(book.metadata.episode_count, 3);
        assert_eq!(book.chapters().len(), 2);
    }

    #[test]
    fn episode_uses_zero_based_positions() {
        let book = sample();
        assert_eq!(book.episode(0, 1).unwrap().text, "מאימתי קורין את שמע בשחרית:");
        assert_eq!(book.episode(1, 0).unwrap().number, 1);
        assert!(book.episode(1, 1).is_none());
        assert!(book.episode(2, 0).is_none());
    }

    #[test]
    fn next_position_crosses_chapters() {
        let book = sample();
        assert_eq!(book.next_position(0, 0), Some((0, 1)));
        assert_eq!(book.next_position(0, 1), Some((1, 0)));
        assert_eq!(book.next_position(1, 0), None);
    }

    #[test]
    fn chapters_sort_numerically() {
        let mut book = sample();
        let mut tenth = book.chapters["פרק_2"].clone();
        tenth.number = 10;
        book.chapters.insert("פרק_10".to_string(), tenth);

        let numbers: Vec<_> = book.chapters().iter().map(|c| c.number).collect();
        assert_eq!(numbers, [1, 2, 10]);
    }

    #[test]
    fn totals_match_metadata() {
        let book = sample();
        assert_eq!(book.totals(), (3, 13));
    }

    #[test]
    fn word_count_splits_on_punctuation() {
        assert_eq!(count_words("מאימתי קורין את שמע בערבית."), 5);
        assert_eq!(count_words("אחד,שנים:שלשה;  ארבעה"), 4);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" . , "), 0);
    }
}

// SPDX-License-Identifier: MPL-2.0

//! The fixed list of Mishna tractates, in canonical order.

/// One tractate of the Mishna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tractate {
    /// Hebrew name, also the JSON file name on disk
    pub name: &'static str,
    pub english_name: &'static str,
    /// The order (סדר) it belongs to
    pub order: &'static str,
    pub chapters: u32,
}

impl Tractate {
    const fn new(
        name: &'static str,
        english_name: &'static str,
        order: &'static str,
        chapters: u32,
    ) -> Self {
        Self {
            name,
            english_name,
            order,
            chapters,
        }
    }

    /// Stable identifier used as the progress `bookId`, e.g. `maaser_sheni`
    pub fn id(&self) -> String {
        self.english_name.to_lowercase().replace(' ', "_")
    }
}

pub static TRACTATES: [Tractate; 63] = [
    Tractate::new("ברכות", "Berakhot", "זרעים", 9),
    Tractate::new("פאה", "Peah", "זרעים", 8),
    Tractate::new("דמאי", "Demai", "זרעים", 7),
    Tractate::new("כלאים", "Kilayim", "זרעים", 9),
    Tractate::new("שביעית", "Sheviit", "זרעים", 10),
    Tractate::new("תרומות", "Terumot", "זרעים", 11),
    Tractate::new("מעשרות", "Maasrot", "זרעים", 5),
    Tractate::new("מעשר שני", "Maaser Sheni", "זרעים", 5),
    Tractate::new("חלה", "Challah", "זרעים", 4),
    Tractate::new("ערלה", "Orlah", "זרעים", 3),
    Tractate::new("בכורים", "Bikkurim", "זרעים", 4),
    Tractate::new("שבת", "Shabbat", "מועד", 24),
    Tractate::new("עירובין", "Eruvin", "מועד", 10),
    Tractate::new("פסחים", "Pesachim", "מועד", 10),
    Tractate::new("שקלים", "Shekalim", "מועד", 8),
    Tractate::new("יומא", "Yoma", "מועד", 8),
    Tractate::new("סוכה", "Sukkah", "מועד", 5),
    Tractate::new("ביצה", "Beitzah", "מועד", 5),
    Tractate::new("ראש השנה", "Rosh Hashanah", "מועד", 4),
    Tractate::new("תענית", "Taanit", "מועד", 4),
    Tractate::new("מגילה", "Megillah", "מועד", 4),
    Tractate::new("מועד קטן", "Moed Katan", "מועד", 3),
    Tractate::new("חגיגה", "Chagigah", "מועד", 3),
    Tractate::new("יבמות", "Yevamot", "נשים", 16),
    Tractate::new("כתובות", "Ketubot", "נשים", 13),
    Tractate::new("נדרים", "Nedarim", "נשים", 11),
    Tractate::new("נזיר", "Nazir", "נשים", 9),
    Tractate::new("סוטה", "Sotah", "נשים", 9),
    Tractate::new("גיטין", "Gittin", "נשים", 9),
    Tractate::new("קידושין", "Kiddushin", "נשים", 4),
    Tractate::new("בבא קמא", "Bava Kamma", "נזיקין", 10),
    Tractate::new("בבא מציעא", "Bava Metzia", "נזיקין", 10),
    Tractate::new("בבא בתרא", "Bava Batra", "נזיקין", 10),
    Tractate::new("סנהדרין", "Sanhedrin", "נזיקין", 11),
    Tractate::new("מכות", "Makkot", "נזיקין", 3),
    Tractate::new("שבועות", "Shevuot", "נזיקין", 8),
    Tractate::new("עדויות", "Eduyot", "נזיקין", 8),
    Tractate::new("עבודה זרה", "Avodah Zarah", "נזיקין", 5),
    Tractate::new("אבות", "Avot", "נזיקין", 6),
    Tractate::new("הוריות", "Horayot", "נזיקין", 3),
    Tractate::new("זבחים", "Zevachim", "קדשים", 14),
    Tractate::new("מנחות", "Menachot", "קדשים", 13),
    Tractate::new("חולין", "Chullin", "קדשים", 12),
    Tractate::new("בכורות", "Bekhorot", "קדשים", 9),
    Tractate::new("ערכין", "Arakhin", "קדשים", 9),
    Tractate::new("תמורה", "Temurah", "קדשים", 7),
    Tractate::new("כריתות", "Keritot", "קדשים", 6),
    Tractate::new("מעילה", "Meilah", "קדשים", 6),
    Tractate::new("תמיד", "Tamid", "קדשים", 7),
    Tractate::new("מדות", "Middot", "קדשים", 5),
    Tractate::new("קינים", "Kinnim", "קדשים", 3),
    Tractate::new("כלים", "Kelim", "טהרות", 30),
    Tractate::new("אהלות", "Oholot", "טהרות", 18),
    Tractate::new("נגעים", "Negaim", "טהרות", 14),
    Tractate::new("פרה", "Parah", "טהרות", 12),
    Tractate::new("טהרות", "Tahorot", "טהרות", 10),
    Tractate::new("מקואות", "Mikvaot", "טהרות", 10),
    Tractate::new("נדה", "Niddah", "טהרות", 10),
    Tractate::new("מכשירין", "Makhshirin", "טהרות", 6),
    Tractate::new("זבים", "Zavim", "טהרות", 5),
    Tractate::new("טבול יום", "Tevul Yom", "טהרות", 4),
    Tractate::new("ידים", "Yadayim", "טהרות", 4),
    Tractate::new("עוקצין", "Oktzin", "טהרות", 3),
];

/// Substring search: Hebrew names as typed, English names case-insensitively.
/// An empty term matches everything.
pub fn search(term: &str) -> Vec<&'static Tractate> {
    let term = term.trim();
    let lowered = term.to_lowercase();

    TRACTATES
        .iter()
        .filter(|t| t.name.contains(term) || t.english_name.to_lowercase().contains(&lowered))
        .collect()
}

/// Look up a tractate by its [`Tractate::id`]
pub fn find(id: &str) -> Option<&'static Tractate> {
    TRACTATES.iter().find(|t| t.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = TRACTATES.iter().map(Tractate::id).collect();
        assert_eq!(ids.len(), TRACTATES.len());
    }

    #[test]
    fn six_orders_in_canonical_order() {
        let mut orders: Vec<&str> = Vec::new();
        for t in &TRACTATES {
            if orders.last() != Some(&t.order) {
                orders.push(t.order);
            }
        }
        assert_eq!(orders, ["זרעים", "מועד", "נשים", "נזיקין", "קדשים", "טהרות"]);
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(search("").len(), 63);
        assert_eq!(search("   ").len(), 63);
    }

    #[test]
    fn hebrew_substring_search() {
        let names: Vec<_> = search("בבא").iter().map(|t| t.name).collect();
        assert_eq!(names, ["בבא קמא", "בבא מציעא", "בבא בתרא"]);
    }

    #[test]
    fn english_search_ignores_case() {
        let found = search("BERAKH");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ברכות");
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("xyz").is_empty());
    }

    #[test]
    fn find_by_id() {
        let t = find("maaser_sheni").unwrap();
        assert_eq!(t.name, "מעשר שני");
        assert_eq!(t.chapters, 5);
        assert_eq!(find("berakhot").unwrap().id(), "berakhot");
        assert!(find("unknown").is_none());
    }
}

//! Duplicate removal across merged sources.
//!
//! Records are clustered on the exact normalized `(Authors, Title, Year)`
//! triple. When a cluster's copies disagree on citation count, the most cited
//! copy is kept. Near-duplicates (punctuation, subtitles) are not merged.

use crate::record::{Column, UnifiedRecord, UnifiedTable};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::info;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Deduplicated table with the counts the report needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduplication {
    pub table: UnifiedTable,
    /// Rows left after deduplication
    pub kept: usize,
    /// Rows in the merged input
    pub input: usize,
}

impl Deduplication {
    pub fn removed(&self) -> usize {
        self.input - self.kept
    }
}

/// Strip accents and compatibility forms: `"é"` becomes `"e"`, the `"ﬁ"`
/// ligature becomes `"fi"`.
pub fn fold_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Higher counts first, unknown counts last
fn by_citations_desc(a: &UnifiedRecord, b: &UnifiedRecord) -> Ordering {
    match (a.citations, b.citations) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collapse every duplicate cluster to its most cited record.
///
/// Output columns start with `Title`; rows are sorted by title.
pub fn deduplicate(table: UnifiedTable) -> Deduplication {
    let input = table.len();
    let UnifiedTable { columns, mut records } = table;

    for record in &mut records {
        record.authors = fold_diacritics(&record.authors);
        record.title = fold_diacritics(&record.title);
    }

    // Stable: equal counts keep merge order
    records.sort_by(by_citations_desc);

    let mut seen: HashSet<(String, String, i32)> = HashSet::with_capacity(records.len());
    records.retain(|r| seen.insert((r.authors.clone(), r.title.clone(), r.year)));

    records.sort_by(|a, b| a.title.cmp(&b.title));

    let mut table = UnifiedTable { columns, records };
    table.move_to_front(Column::Title);

    let kept = table.len();
    info!(input, kept, removed = input - kept, "Removed duplicates");

    Deduplication { table, kept, input }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use std::collections::HashMap;

    fn rec(authors: &str, title: &str, year: i32, db: &str, citations: Option<u64>) -> UnifiedRecord {
        UnifiedRecord {
            authors: authors.to_string(),
            title: title.to_string(),
            year,
            database: db.to_string(),
            citations,
        }
    }

    fn sample() -> UnifiedTable {
        UnifiedTable::new(vec![
            rec("smith", "x", 2020, "A", Some(5)),
            rec("doe", "zeta", 2019, "A", None),
            rec("smith", "x", 2020, "B", Some(10)),
            rec("müller", "résumé", 2018, "B", Some(1)),
            rec("muller", "resume", 2018, "C", Some(3)),
            rec("smith", "x", 2021, "C", Some(2)),
            rec("doe", "zeta", 2019, "C", None),
            rec("lee", "x.", 2020, "C", Some(0)),
        ])
    }

    #[test]
    fn test_three_sources_keep_most_cited() {
        let merged = merge(vec![
            UnifiedTable::new(vec![rec("smith", "x", 2020, "A", Some(5))]),
            UnifiedTable::new(vec![rec("smith", "x", 2020, "B", Some(10))]),
            UnifiedTable::new(vec![rec("smith", "x", 2020, "C", Some(2))]),
        ]);

        let out = deduplicate(merged);
        assert_eq!(out.kept, 1);
        assert_eq!(out.input, 3);
        assert_eq!(out.table.records[0].citations, Some(10));
        assert_eq!(out.table.records[0].database, "B");
    }

    #[test]
    fn test_diacritics_fold_into_one_cluster() {
        assert_eq!(fold_diacritics("résumé"), "resume");
        assert_eq!(fold_diacritics("müller"), "muller");
        assert_eq!(fold_diacritics("日本"), "日本");
        assert_eq!(fold_diacritics("ﬁnance"), "finance");
        assert_eq!(fold_diacritics("ｄｅｅｐ"), "deep");

        let out = deduplicate(sample());
        let resumes: Vec<_> = out
            .table
            .records
            .iter()
            .filter(|r| r.title == "resume")
            .collect();
        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].citations, Some(3));
    }

    #[test]
    fn test_ligature_titles_cluster() {
        let out = deduplicate(UnifiedTable::new(vec![
            rec("lee", "ﬁnance review", 2022, "A", Some(1)),
            rec("lee", "finance review", 2022, "B", Some(6)),
        ]));
        assert_eq!(out.kept, 1);
        assert_eq!(out.table.records[0].title, "finance review");
        assert_eq!(out.table.records[0].citations, Some(6));
    }

    #[test]
    fn test_completeness_and_key_uniqueness() {
        let out = deduplicate(sample());
        assert_eq!(out.kept + out.removed(), out.input);
        assert_eq!(out.kept, out.table.len());

        let keys: HashSet<_> = out.table.records.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), out.kept);
        // Different year and trailing punctuation are not duplicates
        assert_eq!(out.kept, 5);
    }

    #[test]
    fn test_kept_row_has_max_citations() {
        let input = sample();
        let mut best: HashMap<(String, String, i32), Option<u64>> = HashMap::new();
        for r in &input.records {
            let key = (fold_diacritics(&r.authors), fold_diacritics(&r.title), r.year);
            let entry = best.entry(key).or_insert(r.citations);
            if r.citations > *entry {
                *entry = r.citations;
            }
        }

        let out = deduplicate(input);
        for r in &out.table.records {
            let key = (r.authors.clone(), r.title.clone(), r.year);
            assert_eq!(best.get(&key), Some(&r.citations));
        }
    }

    #[test]
    fn test_missing_citations_lose_ties_and_order_is_stable() {
        let out = deduplicate(UnifiedTable::new(vec![
            rec("a", "t", 2020, "A", None),
            rec("a", "t", 2020, "B", Some(0)),
            rec("b", "u", 2020, "A", Some(4)),
            rec("b", "u", 2020, "C", Some(4)),
        ]));

        assert_eq!(out.table.records[0].database, "B");
        assert_eq!(out.table.records[0].citations, Some(0));
        // Tie on citations: first seen wins
        assert_eq!(out.table.records[1].database, "A");
    }

    #[test]
    fn test_title_first_and_sorted() {
        let out = deduplicate(sample());
        assert_eq!(out.table.columns[0], Column::Title);
        assert_eq!(
            out.table.headers(),
            vec!["Title", "Authors", "Year", "Database", "Citations"]
        );
        let titles: Vec<&str> = out.table.records.iter().map(|r| r.title.as_str()).collect();
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
    }

    #[test]
    fn test_idempotent() {
        let once = deduplicate(sample());
        let twice = deduplicate(once.table.clone());
        assert_eq!(twice.removed(), 0);
        assert_eq!(twice.table, once.table);
    }
}

use unicode_normalization::UnicodeNormalization;
use wortschatz_types::WordEntry;

/// Case folding used for matching (NFKC, then lowercase).
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

fn matches(entry: &WordEntry, needle: &str) -> bool {
    fold(&entry.source_term).contains(needle) || fold(&entry.translation).contains(needle)
}

/// Entries whose source term or translation contains `search`, newest first.
///
/// An empty search yields everything. The sort is stable, so entries sharing
/// a timestamp keep their collection order.
pub fn filter_sorted<'a>(entries: &'a [WordEntry], search: &str) -> Vec<&'a WordEntry> {
    let needle = fold(search);

    let mut found: Vec<&WordEntry> = if needle.is_empty() {
        entries.iter().collect()
    } else {
        entries.iter().filter(|e| matches(e, &needle)).collect()
    };

    found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    found
}

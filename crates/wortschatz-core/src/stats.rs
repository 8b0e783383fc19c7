use wortschatz_types::{Stats, WordEntry};

pub fn compute(entries: &[WordEntry]) -> Stats {
    entries.iter().fold(Stats::default(), |mut stats, entry| {
        let level = entry.mastery_level.value();
        stats.total += 1;
        match level {
            0 => stats.fresh += 1,
            1..=3 => stats.learning += 1,
            _ => stats.mastered += 1,
        }
        stats
    })
}

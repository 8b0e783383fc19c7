use wortschatz_types::MasteryLevel;

/// "I know it"
pub const KNOW_IT: i32 = 1;
/// "I forgot"
pub const FORGOT: i32 = -1;

/// Moves `level` by `delta`, clamped to `0..=5`. Total for any delta.
pub fn adjust(level: MasteryLevel, delta: i32) -> MasteryLevel {
    MasteryLevel::clamped(i64::from(level.value()) + i64::from(delta))
}

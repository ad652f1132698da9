use crate::config::{FINAL_JUMP_DAYS, JUMP_TABLE};

/// Days the distant calendar jumps per threshold crossing at `radius` from the horizon.
///
/// Buckets are exclusive on their lower bound (`> 500`, not `>= 500`). Anything at or
/// inside one unit of the horizon falls into the final bucket.
pub fn jump_days(radius: f64) -> u64 {
    JUMP_TABLE
        .iter()
        .find(|(threshold, _)| radius > *threshold)
        .map_or(FINAL_JUMP_DAYS, |(_, days)| *days)
}

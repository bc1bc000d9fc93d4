use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MAX_LEVEL: u8 = 4;

/// How a day's count is bucketed into a shade relative to the series max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelPolicy {
    /// `floor(4 * sqrt(count / max))`; spreads the low end of the range.
    #[default]
    SqrtCompression,
    /// Cutoffs at 25/50/75% of max.
    LinearQuartiles,
}

impl LevelPolicy {
    pub fn level(self, count: u64, max: u64) -> u8 {
        if count == 0 || max == 0 {
            return 0;
        }
        let ratio = count as f64 / max as f64;
        match self {
            LevelPolicy::SqrtCompression => {
                let raw = (f64::from(MAX_LEVEL) * ratio.sqrt()).floor();
                (raw as u8).min(MAX_LEVEL)
            }
            LevelPolicy::LinearQuartiles => {
                if ratio <= 0.25 {
                    1
                } else if ratio <= 0.5 {
                    2
                } else if ratio <= 0.75 {
                    3
                } else {
                    MAX_LEVEL
                }
            }
        }
    }
}

impl FromStr for LevelPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "sqrt" | "sqrt-compression" => Ok(LevelPolicy::SqrtCompression),
            "quartiles" | "linear-quartiles" => Ok(LevelPolicy::LinearQuartiles),
            other => Err(format!("unknown level policy '{other}'")),
        }
    }
}

/// Level under the default square-root policy.
pub fn level(count: u64, max: u64) -> u8 {
    LevelPolicy::SqrtCompression.level(count, max)
}

/// Every level a legend needs a swatch for, lightest first.
pub fn legend_levels() -> impl Iterator<Item = u8> {
    0..=MAX_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICIES: [LevelPolicy; 2] = [LevelPolicy::SqrtCompression, LevelPolicy::LinearQuartiles];

    #[test]
    fn zero_count_or_zero_max_is_level_zero() {
        for policy in POLICIES {
            for max in [0, 1, 7, 1_000] {
                assert_eq!(policy.level(0, max), 0);
            }
            for count in [0, 1, 7, 1_000] {
                assert_eq!(policy.level(count, 0), 0);
            }
        }
    }

    #[test]
    fn levels_stay_in_range() {
        for policy in POLICIES {
            for max in 1..=60u64 {
                for count in 0..=max {
                    assert!(policy.level(count, max) <= MAX_LEVEL);
                }
            }
        }
    }

    #[test]
    fn count_at_max_is_top_level() {
        assert_eq!(level(5, 5), 4);
        assert_eq!(level(0, 5), 0);
        assert_eq!(LevelPolicy::LinearQuartiles.level(9, 9), 4);
    }

    #[test]
    fn sqrt_policy_lifts_small_counts() {
        // 1/16 of max reaches level 1 under sqrt, and 1/4 reaches level 2
        assert_eq!(level(1, 16), 1);
        assert_eq!(level(4, 16), 2);
        assert_eq!(level(9, 16), 3);
        assert_eq!(LevelPolicy::LinearQuartiles.level(4, 16), 1);
    }

    #[test]
    fn quartile_boundaries_are_inclusive() {
        let policy = LevelPolicy::LinearQuartiles;
        assert_eq!(policy.level(1, 4), 1);
        assert_eq!(policy.level(2, 4), 2);
        assert_eq!(policy.level(3, 4), 3);
        assert_eq!(policy.level(4, 4), 4);
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("sqrt".parse::<LevelPolicy>().unwrap(), LevelPolicy::SqrtCompression);
        assert_eq!("quartiles".parse::<LevelPolicy>().unwrap(), LevelPolicy::LinearQuartiles);
        assert!("cubic".parse::<LevelPolicy>().is_err());
    }

    #[test]
    fn legend_has_five_swatches() {
        assert_eq!(legend_levels().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }
}

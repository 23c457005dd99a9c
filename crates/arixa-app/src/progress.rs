//! Progress tracker data: weekly workouts and the macro split.

use serde::Serialize;

/// One labelled value on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataPoint {
    pub label: &'static str,
    pub value: u32,
}

const fn point(label: &'static str, value: u32) -> DataPoint {
    DataPoint { label, value }
}

/// Workouts per day, Monday first.
pub const WEEKLY_WORKOUTS: [DataPoint; 7] = [
    point("M", 2),
    point("T", 3),
    point("W", 5),
    point("T", 4),
    point("F", 7),
    point("S", 6),
    point("S", 4),
];

/// Share of intake by macronutrient.
pub const MACRO_SPLIT: [DataPoint; 3] = [
    point("Protein", 43),
    point("Carbs", 37),
    point("Fat", 20),
];

pub fn weekly_total() -> u32 {
    WEEKLY_WORKOUTS.iter().map(|p| p.value).sum()
}

/// Index of the first day with the most workouts.
pub fn busiest_day() -> Option<usize> {
    WEEKLY_WORKOUTS
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, p)| p.value)
        .map(|(i, _)| i)
}

/// Percentage of the macro total held by `label`, rounded to the nearest whole.
pub fn macro_share(label: &str) -> Option<u32> {
    let total: u32 = MACRO_SPLIT.iter().map(|p| p.value).sum();
    if total == 0 {
        return None;
    }
    MACRO_SPLIT
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label))
        .map(|p| (p.value * 100 + total / 2) / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_summary() {
        assert_eq!(weekly_total(), 31);
        assert_eq!(busiest_day(), Some(4));
        assert_eq!(WEEKLY_WORKOUTS[busiest_day().unwrap()].label, "F");
    }

    #[test]
    fn test_macro_shares() {
        assert_eq!(macro_share("protein"), Some(43));
        assert_eq!(macro_share("Fat"), Some(20));
        assert_eq!(macro_share("Fibre"), None);
    }
}

//! The weekly training schedule.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub reps: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutDay {
    pub day: &'static str,
    pub title: &'static str,
    pub is_rest: bool,
    pub exercises: &'static [Exercise],
}

const fn ex(name: &'static str, reps: &'static str) -> Exercise {
    Exercise { name, reps }
}

const PUSH: &[Exercise] = &[
    ex("Bench Press", "3 sets x 8-12 reps"),
    ex("Overhead Press", "3 sets x 8-12 reps"),
    ex("Incline Dumbbell Press", "3 sets x 10-12 reps"),
    ex("Lateral Raises", "3 sets x 12-15 reps"),
    ex("Tricep Pushdowns", "3 sets x 12-15 reps"),
];

const LEGS: &[Exercise] = &[
    ex("Squats", "3 sets x 8-10 reps"),
    ex("Romanian Deadlifts", "3 sets x 10-12 reps"),
    ex("Leg Press", "3 sets x 10-12 reps"),
    ex("Leg Curls", "3 sets x 12-15 reps"),
    ex("Calf Raises", "4 sets x 15-20 reps"),
];

const PULL: &[Exercise] = &[
    ex("Deadlifts", "3 sets x 5-8 reps"),
    ex("Pull-Ups", "3 sets x 8-10 reps"),
    ex("Barbell Rows", "3 sets x 8-12 reps"),
    ex("Face Pulls", "3 sets x 12-15 reps"),
    ex("Bicep Curls", "3 sets x 10-12 reps"),
];

const PUSH_TITLE: &str = "Chest, Shoulders & Triceps (Push)";
const LEGS_TITLE: &str = "Legs & Glutes";
const PULL_TITLE: &str = "Back & Biceps (Pull)";

const fn day(day: &'static str, title: &'static str, exercises: &'static [Exercise]) -> WorkoutDay {
    WorkoutDay {
        day,
        title,
        is_rest: exercises.is_empty(),
        exercises,
    }
}

/// Push / legs / pull, rest, push / pull / legs.
pub const WEEKLY_SCHEDULE: [WorkoutDay; 7] = [
    day("Day 1", PUSH_TITLE, PUSH),
    day("Day 2", LEGS_TITLE, LEGS),
    day("Day 3", PULL_TITLE, PULL),
    day("Day 4", "Rest Day", &[]),
    day("Day 5", PUSH_TITLE, PUSH),
    day("Day 6", PULL_TITLE, PULL),
    day("Day 7", LEGS_TITLE, LEGS),
];

/// The plan for `date`, counting Monday as day 1.
pub fn plan_for(date: NaiveDate) -> &'static WorkoutDay {
    &WEEKLY_SCHEDULE[date.weekday().num_days_from_monday() as usize]
}

/// Which day of the schedule is expanded. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleState {
    expanded: Option<usize>,
}

impl ScheduleState {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Expand the day at `index`, or collapse it if already expanded.
    ///
    /// Rest days and unknown indexes are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        match WEEKLY_SCHEDULE.get(index) {
            Some(day) if !day.is_rest => {
                self.expanded = if self.expanded == Some(index) {
                    None
                } else {
                    Some(index)
                };
            }
            _ => {}
        }
        self.expanded
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }
}

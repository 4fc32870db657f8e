//! Goal list views: filter tabs, progress-screen ordering and statistics

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;
use crate::types::{Goal, GoalKind};

/// Goal management filter tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalFilter {
    #[default]
    All,
    ShortTerm,
    LongTerm,
    Completed,
}

impl_domain_enum_conversions!(GoalFilter {
    All => "all",
    ShortTerm => "short_term",
    LongTerm => "long_term",
    Completed => "completed",
});

impl GoalFilter {
    /// Whether `goal` belongs under this tab.
    #[must_use]
    pub fn matches(self, goal: &Goal) -> bool {
        match self {
            Self::All => true,
            Self::ShortTerm => goal.kind == GoalKind::ShortTerm,
            Self::LongTerm => goal.kind == GoalKind::LongTerm,
            Self::Completed => goal.completed,
        }
    }
}

/// Goals under `filter`, order kept.
#[must_use]
pub fn filter_goals(goals: &[Goal], filter: GoalFilter) -> Vec<Goal> {
    goals.iter().filter(|goal| filter.matches(goal)).cloned().collect()
}

/// Incomplete goals first, otherwise keeping the input order.
#[must_use]
pub fn incomplete_first(goals: &[Goal]) -> Vec<Goal> {
    let mut ordered = goals.to_vec();
    ordered.sort_by_key(|goal| goal.completed);
    ordered
}

/// Header counters of the goal management screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

/// Totals shown above the goal list.
#[must_use]
pub fn goal_stats(goals: &[Goal]) -> GoalStats {
    let completed = goals.iter().filter(|goal| goal.completed).count();
    GoalStats { total: goals.len(), completed, in_progress: goals.len() - completed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: &str, kind: GoalKind, completed: bool) -> Goal {
        let mut goal = Goal::from_text(&format!("Goal {id}")).expect("valid goal");
        goal.id = id.to_string();
        goal.kind = kind;
        goal.completed = completed;
        goal
    }

    fn sample() -> Vec<Goal> {
        vec![
            goal("a", GoalKind::ShortTerm, true),
            goal("b", GoalKind::LongTerm, false),
            goal("c", GoalKind::ShortTerm, false),
            goal("d", GoalKind::LongTerm, true),
        ]
    }

    fn ids(goals: &[Goal]) -> Vec<&str> {
        goals.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn tabs_filter_by_kind_or_completion() {
        let goals = sample();
        assert_eq!(ids(&filter_goals(&goals, GoalFilter::All)), ["a", "b", "c", "d"]);
        assert_eq!(ids(&filter_goals(&goals, GoalFilter::ShortTerm)), ["a", "c"]);
        assert_eq!(ids(&filter_goals(&goals, GoalFilter::LongTerm)), ["b", "d"]);
        assert_eq!(ids(&filter_goals(&goals, GoalFilter::Completed)), ["a", "d"]);
        assert_eq!("Long-term".parse::<GoalFilter>(), Ok(GoalFilter::LongTerm));
    }

    #[test]
    fn incomplete_goals_come_first_in_stable_order() {
        assert_eq!(ids(&incomplete_first(&sample())), ["b", "c", "a", "d"]);
    }

    #[test]
    fn stats_split_completed_and_in_progress() {
        assert_eq!(goal_stats(&sample()), GoalStats { total: 4, completed: 2, in_progress: 2 });
        assert_eq!(goal_stats(&[]), GoalStats::default());
    }
}

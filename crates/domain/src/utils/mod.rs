//! Pure display helpers: list views, calendar and chart geometry, form rules

pub mod analytics;
pub mod calendar;
pub mod chart;
pub mod goal_view;
pub mod help;
pub mod task_view;
pub mod validation;

//! Goal screens: the quick progress list and full goal management

pub mod management;
pub mod progress;

pub use management::{GoalForm, GoalsController, GoalsState};
pub use progress::{ProgressController, ProgressState};

//! Curator rotation engine
//!
//! Pure decision logic for the weekly playlist curator rotation:
//! - Curation windows derived from the assignment date
//! - Fairness counts over non-skipped assignment history
//! - Eligibility and fair selection of the next curator
//! - Auto-assign planning (date derivation and double-booking guard)
//!
//! Nothing in here touches the database; [`crate::services::CuratorService`]
//! loads the inputs and persists the resulting plan.

pub mod error;
pub mod fairness;
pub mod planner;
pub mod selection;
pub mod window;

pub use error::{RotationError, RotationResult};
pub use fairness::{FairnessCounts, fairness_counts, normalize_name};
pub use planner::{
    AutoAssignPlan, find_overlap, find_overlaps, next_assignment_date, plan_auto_assignment,
};
pub use selection::{TieBreak, eligible_pool, select_next_curator};
pub use window::{CurationWindow, compute_window};

//! Winner selection and the spin presentation state machine.

pub mod animator;
pub mod geometry;
pub mod selector;

pub use animator::{SpinError, SpinPhase, SpinPlan, SpinSettings, WheelState};
pub use geometry::{layout, Segment};
pub use selector::select_winner;

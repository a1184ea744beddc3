//! Spin lifecycle: `Idle -> Spinning -> Settled -> Idle`.
//!
//! The winner is always resolved before a spin begins; the animator only
//! decides where the wheel stops and remembers which option it is converging
//! on. Completion is driven from outside (a timer), never polled.

use super::geometry::{plan_rotation, segment_angle};
use crate::types::WheelOption;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    #[error("the wheel has no options")]
    NoOptions,

    #[error("the wheel is already spinning")]
    AlreadySpinning,

    #[error("winner index {index} is out of range for {count} options")]
    WinnerOutOfRange { index: usize, count: usize },

    #[error("spin {0} is not the active spin")]
    StaleSpin(u64),

    #[error("no spin to settle")]
    NotSpinning,
}

/// Everything a renderer needs to animate one spin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpinPlan {
    pub spin_id: u64,
    pub winner_index: usize,
    pub winner: WheelOption,
    pub option_count: usize,
    pub segment_angle: f64,
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub full_turns: u32,
    pub duration_ms: u64,
}

/// Tuning for a single spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSettings {
    pub min_turns: u32,
    pub max_turns: u32,
    pub duration_ms: u64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            min_turns: 50,
            max_turns: 70,
            duration_ms: 5000,
        }
    }
}

/// Ephemeral wheel presentation state
#[derive(Debug, Clone)]
pub struct WheelState {
    phase: SpinPhase,
    winner_index: Option<usize>,
    rotation: f64,
    spin_id: u64,
    /// Options as they were when the active spin was resolved
    snapshot: Vec<WheelOption>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelState {
    pub fn new() -> Self {
        Self {
            phase: SpinPhase::Idle,
            winner_index: None,
            rotation: 0.0,
            spin_id: 0,
            snapshot: Vec::new(),
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner_index
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Start a spin toward `winner_index` of `options`.
    ///
    /// Allowed from `Idle` and `Settled` (which dismisses the previous result).
    /// The rotation is committed immediately to the target so a renderer that
    /// reconnects mid-spin lands in the right place.
    pub fn begin_spin<R: Rng>(
        &mut self,
        options: Vec<WheelOption>,
        winner_index: usize,
        settings: &SpinSettings,
        rng: &mut R,
    ) -> Result<SpinPlan, SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        if options.is_empty() {
            return Err(SpinError::NoOptions);
        }
        let count = options.len();
        if winner_index >= count {
            return Err(SpinError::WinnerOutOfRange {
                index: winner_index,
                count,
            });
        }

        let start_rotation = self.rotation;
        let target = plan_rotation(
            start_rotation,
            winner_index,
            count,
            settings.min_turns,
            settings.max_turns,
            rng,
        );

        self.spin_id += 1;
        self.phase = SpinPhase::Spinning;
        self.winner_index = Some(winner_index);
        self.rotation = target.target;

        let plan = SpinPlan {
            spin_id: self.spin_id,
            winner_index,
            winner: options[winner_index].clone(),
            option_count: count,
            segment_angle: segment_angle(count),
            start_rotation,
            target_rotation: target.target,
            full_turns: target.full_turns,
            duration_ms: settings.duration_ms,
        };
        self.snapshot = options;

        Ok(plan)
    }

    /// The rotation animation for `spin_id` finished; report the winner
    pub fn complete(&mut self, spin_id: u64) -> Result<(usize, WheelOption), SpinError> {
        if !self.is_spinning() {
            return Err(SpinError::NotSpinning);
        }
        if spin_id != self.spin_id {
            return Err(SpinError::StaleSpin(spin_id));
        }
        let index = self.winner_index.ok_or(SpinError::NotSpinning)?;
        let winner = self
            .snapshot
            .get(index)
            .cloned()
            .ok_or(SpinError::WinnerOutOfRange {
                index,
                count: self.snapshot.len(),
            })?;

        self.phase = SpinPhase::Settled;
        Ok((index, winner))
    }

    /// Close the result display. Returns whether there was a result to close.
    pub fn dismiss(&mut self) -> Result<bool, SpinError> {
        match self.phase {
            SpinPhase::Spinning => Err(SpinError::AlreadySpinning),
            SpinPhase::Idle => Ok(false),
            SpinPhase::Settled => {
                self.phase = SpinPhase::Idle;
                self.winner_index = None;
                self.snapshot.clear();
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::geometry::segment_under_pointer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn options(n: usize) -> Vec<WheelOption> {
        (0..n)
            .map(|i| WheelOption {
                id: format!("opt{}", i),
                label: format!("Option {}", i),
                color: crate::types::COLOR_WHITE.to_string(),
                text_color: crate::types::COLOR_RED.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_full_lifecycle() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wheel = WheelState::new();
        assert_eq!(wheel.phase(), SpinPhase::Idle);

        let plan = wheel
            .begin_spin(options(5), 3, &SpinSettings::default(), &mut rng)
            .unwrap();
        assert_eq!(wheel.phase(), SpinPhase::Spinning);
        assert_eq!(wheel.winner_index(), Some(3));
        assert_eq!(plan.winner.id, "opt3");
        assert_eq!(plan.start_rotation, 0.0);
        assert_eq!(segment_under_pointer(plan.target_rotation, 5), Some(3));

        let (index, winner) = wheel.complete(plan.spin_id).unwrap();
        assert_eq!(index, 3);
        assert_eq!(winner.id, "opt3");
        assert_eq!(wheel.phase(), SpinPhase::Settled);

        assert_eq!(wheel.dismiss(), Ok(true));
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.winner_index(), None);
    }

    #[test]
    fn test_cannot_spin_while_spinning() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut wheel = WheelState::new();
        wheel
            .begin_spin(options(3), 0, &SpinSettings::default(), &mut rng)
            .unwrap();

        let result = wheel.begin_spin(options(3), 1, &SpinSettings::default(), &mut rng);
        assert_eq!(result, Err(SpinError::AlreadySpinning));
        assert_eq!(wheel.dismiss(), Err(SpinError::AlreadySpinning));
    }

    #[test]
    fn test_spin_from_settled_dismisses_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut wheel = WheelState::new();
        let first = wheel
            .begin_spin(options(4), 1, &SpinSettings::default(), &mut rng)
            .unwrap();
        wheel.complete(first.spin_id).unwrap();

        let second = wheel
            .begin_spin(options(4), 2, &SpinSettings::default(), &mut rng)
            .unwrap();
        assert_eq!(second.spin_id, first.spin_id + 1);
        assert_eq!(second.start_rotation, first.target_rotation);
        assert!(second.target_rotation > first.target_rotation);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut wheel = WheelState::new();

        assert_eq!(
            wheel.begin_spin(Vec::new(), 0, &SpinSettings::default(), &mut rng),
            Err(SpinError::NoOptions)
        );
        assert_eq!(
            wheel.begin_spin(options(2), 2, &SpinSettings::default(), &mut rng),
            Err(SpinError::WinnerOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_complete_is_single_shot() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut wheel = WheelState::new();
        assert_eq!(wheel.complete(1), Err(SpinError::NotSpinning));

        let plan = wheel
            .begin_spin(options(2), 1, &SpinSettings::default(), &mut rng)
            .unwrap();
        assert_eq!(
            wheel.complete(plan.spin_id + 1),
            Err(SpinError::StaleSpin(plan.spin_id + 1))
        );
        assert!(wheel.complete(plan.spin_id).is_ok());
        assert_eq!(wheel.complete(plan.spin_id), Err(SpinError::NotSpinning));
    }

    #[test]
    fn test_dismiss_when_idle_is_noop() {
        let mut wheel = WheelState::new();
        assert_eq!(wheel.dismiss(), Ok(false));
        assert_eq!(wheel.phase(), SpinPhase::Idle);
    }
}

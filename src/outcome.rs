//! Terminal outcome of an entry run.
//!
//! A run ends in exactly one of four ways:
//! - Impact: the body reaches the surface
//! - Ablated: the body burns down to a floor before reaching the surface
//! - BrokenUp: the body fragments on atmosphere entry
//! - Exhausted: the step budget runs out with nothing decided

use std::fmt;

use crate::impact::ImpactReport;
use crate::physics::ablation::BreakupAssessment;
use crate::types::BodyState;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Impact,
    Ablated,
    BrokenUp,
    Exhausted,
}

impl Outcome {
    /// Short lowercase label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Impact => "impact",
            Outcome::Ablated => "ablated",
            Outcome::BrokenUp => "broken_up",
            Outcome::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final record of a run. Written once, never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeRecord {
    pub outcome: Outcome,
    /// Simulation time at termination (s); refined to the crossing for impacts
    pub time: f64,
    /// Body state at termination
    pub state: BodyState,
    /// Impact details, present only for [`Outcome::Impact`]
    pub impact: Option<ImpactReport>,
    /// Breakup assessment made at entry, if the body reached the atmosphere
    pub breakup: Option<BreakupAssessment>,
}

impl OutcomeRecord {
    pub fn is_impact(&self) -> bool {
        self.outcome == Outcome::Impact
    }

    pub fn is_ablated(&self) -> bool {
        self.outcome == Outcome::Ablated
    }

    pub fn is_broken_up(&self) -> bool {
        self.outcome == Outcome::BrokenUp
    }

    pub fn is_exhausted(&self) -> bool {
        self.outcome == Outcome::Exhausted
    }

    /// Fraction of the initial mass left at termination.
    pub fn mass_fraction(&self, initial_mass: f64) -> f64 {
        if initial_mass > 0.0 {
            self.state.mass / initial_mass
        } else {
            0.0
        }
    }
}

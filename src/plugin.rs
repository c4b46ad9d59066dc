//! Bevy integration for entry runs.
//!
//! Each run lives on an entity as an [`EntryRun`] component. Every
//! `Update`, [`advance_entry_runs`] steps each unfinished run by up to
//! [`EntryStepBudget::steps_per_update`] ticks and attaches an
//! [`EntryResult`] once it terminates. A [`SimulationConfig`] inserted as
//! a resource is spawned as a run at startup.

use bevy::prelude::*;

use crate::config::{ConfigError, SimulationConfig};
use crate::simulation::{RunSummary, Simulation};

/// Plugin driving entry runs inside an `App`.
pub struct EntryPlugin;

impl Plugin for EntryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EntryStepBudget>()
            .add_systems(Startup, spawn_configured_run)
            .add_systems(Update, advance_entry_runs);
    }
}

/// Ticks each run may take per `Update`.
#[derive(Resource, Clone, Copy, Debug)]
pub struct EntryStepBudget {
    pub steps_per_update: usize,
}

impl Default for EntryStepBudget {
    fn default() -> Self {
        Self {
            steps_per_update: 10_000,
        }
    }
}

/// An entry run in progress.
#[derive(Component, Debug)]
pub struct EntryRun {
    sim: Simulation,
}

impl EntryRun {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            sim: Simulation::new(config)?,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

/// Attached to a run's entity when it terminates.
#[derive(Component, Clone, Debug)]
pub struct EntryResult(pub RunSummary);

/// Spawn the run described by a [`SimulationConfig`] resource, if any.
fn spawn_configured_run(mut commands: Commands, config: Option<Res<SimulationConfig>>) {
    let Some(config) = config else {
        return;
    };
    match EntryRun::new(config.clone()) {
        Ok(run) => {
            commands.spawn(run);
        }
        Err(err) => warn!("Rejected entry configuration: {err}"),
    }
}

/// Step every unfinished run within the per-update budget.
pub fn advance_entry_runs(
    mut commands: Commands,
    budget: Res<EntryStepBudget>,
    mut runs: Query<(Entity, &mut EntryRun), Without<EntryResult>>,
) {
    for (entity, mut run) in &mut runs {
        for _ in 0..budget.steps_per_update {
            if run.sim.step().is_some() {
                break;
            }
        }

        if let Some(summary) = run.sim.summary() {
            info!(
                "Run {entity} finished: {} after {} steps ({:.1}s)",
                summary.outcome.outcome, summary.steps, summary.outcome.time
            );
            commands.entity(entity).insert(EntryResult(summary));
        }
    }
}

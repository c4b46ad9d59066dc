//! Entry run state machine.
//!
//! A [`Simulation`] owns one body's state and advances it one fixed step
//! per [`Simulation::step`]:
//!
//! 1. gravity at the start-of-step position
//! 2. in the atmosphere only: drag against the co-rotating air, then one
//!    ablation step (both from the start-of-step state)
//! 3. semi-implicit Euler update, kinematic drift of the gravitating bodies
//! 4. transitions, in order: atmosphere entry (with the one-off breakup
//!    check), complete ablation, surface impact
//!
//! The run stops mutating once it reaches [`FlightPhase::Terminated`].
//! Hitting the step budget first gives [`Outcome::Exhausted`].

use bevy::log::{debug, info, warn};
use bevy::math::DVec3;

use crate::atmosphere;
use crate::config::{ConfigError, SimulationConfig};
use crate::impact::{ImpactReport, resolve_impact};
use crate::outcome::{Outcome, OutcomeRecord};
use crate::physics::ablation::{
    BreakupAssessment, ablation_rate, ablation_step, angle_of_inclination, assess_breakup,
    critical_radius, is_fully_ablated, surface_stress,
};
use crate::physics::aero::{drag_acceleration, relative_velocity};
use crate::physics::integrator::semi_implicit_euler;
use crate::types::{BodyState, MassiveBody, RAD_TO_DEG, TargetBody};

/// Where the body is in its flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    /// Outside the atmosphere boundary; gravity only
    #[default]
    FreeFlight,
    /// Inside the boundary; drag and ablation active
    InAtmosphere,
    /// Run finished; see the outcome record
    Terminated,
}

/// State captured once, on the step that crosses the atmosphere boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrySnapshot {
    /// Simulation time at entry (s)
    pub time: f64,
    /// Step count at entry
    pub step: usize,
    pub position: DVec3,
    pub velocity: DVec3,
    /// Angle between velocity and local horizontal (rad, negative descending)
    pub angle: f64,
}

impl EntrySnapshot {
    /// Entry angle in degrees
    pub fn angle_deg(&self) -> f64 {
        self.angle * RAD_TO_DEG
    }
}

/// Periodic progress sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusRecord {
    pub step: usize,
    pub time: f64,
    pub phase: FlightPhase,
    /// Height above the target surface (m)
    pub altitude: f64,
    /// Inertial speed (m/s)
    pub speed: f64,
    /// Remaining fraction of the initial mass
    pub mass_fraction: f64,
    pub radius: f64,
    pub ablation_depth: f64,
}

/// Everything a finished run reports.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub outcome: OutcomeRecord,
    pub entry: Option<EntrySnapshot>,
    pub steps: usize,
    pub initial_mass: f64,
}

impl RunSummary {
    /// Time between atmosphere entry and termination (s), zero if never entered.
    pub fn time_in_atmosphere(&self) -> f64 {
        self.entry
            .map_or(0.0, |entry| (self.outcome.time - entry.time).max(0.0))
    }

    /// Fraction of the initial mass left at termination.
    pub fn mass_fraction(&self) -> f64 {
        self.outcome.mass_fraction(self.initial_mass)
    }

    pub fn impact(&self) -> Option<&ImpactReport> {
        self.outcome.impact.as_ref()
    }
}

/// One entry run.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    /// Target body first, then perturbers; drifted every step
    bodies: Vec<MassiveBody>,
    target: TargetBody,
    state: BodyState,
    phase: FlightPhase,
    time: f64,
    steps: usize,
    initial_mass: f64,
    entry: Option<EntrySnapshot>,
    breakup: Option<BreakupAssessment>,
    outcome: Option<OutcomeRecord>,
}

impl Simulation {
    /// Validate `config` and set up a run at t = 0.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.ignores_perturbers() {
            warn!(
                "{} perturber(s) configured with central gravity; they drift but do not pull",
                config.perturbers.len()
            );
        }

        let initial_mass = config.initial_mass();
        let state = BodyState::new(
            config.initial_position,
            config.initial_velocity,
            initial_mass,
            config.initial_radius(),
        );

        Ok(Self {
            bodies: config.gravitating_bodies(),
            target: config.target,
            state,
            phase: FlightPhase::FreeFlight,
            time: 0.0,
            steps: 0,
            initial_mass,
            entry: None,
            breakup: None,
            outcome: None,
            config,
        })
    }

    /// Rewind to t = 0 with the same configuration.
    pub fn reset(&mut self) {
        self.bodies = self.config.gravitating_bodies();
        self.target = self.config.target;
        self.state = BodyState::new(
            self.config.initial_position,
            self.config.initial_velocity,
            self.initial_mass,
            self.config.initial_radius(),
        );
        self.phase = FlightPhase::FreeFlight;
        self.time = 0.0;
        self.steps = 0;
        self.entry = None;
        self.breakup = None;
        self.outcome = None;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn entry(&self) -> Option<&EntrySnapshot> {
        self.entry.as_ref()
    }

    pub fn breakup(&self) -> Option<&BreakupAssessment> {
        self.breakup.as_ref()
    }

    pub fn outcome(&self) -> Option<&OutcomeRecord> {
        self.outcome.as_ref()
    }

    /// Current simulation time (s)
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == FlightPhase::Terminated
    }

    /// Target body as it is now (it may drift).
    pub fn target(&self) -> &TargetBody {
        &self.target
    }

    /// Height above the target surface (m)
    pub fn altitude(&self) -> f64 {
        self.target.altitude(self.state.pos)
    }

    /// Snapshot of the current progress.
    pub fn status(&self) -> StatusRecord {
        StatusRecord {
            step: self.steps,
            time: self.time,
            phase: self.phase,
            altitude: self.altitude(),
            speed: self.state.speed(),
            mass_fraction: self.state.mass / self.initial_mass,
            radius: self.state.radius,
            ablation_depth: self.state.ablation_depth,
        }
    }

    /// Lazily step the run, yielding a status record at the start, every
    /// `status_interval` steps, and on each phase change. Ends after the
    /// record for the terminating step.
    pub fn status_records(&mut self) -> StatusRecords<'_> {
        StatusRecords {
            sim: self,
            started: false,
        }
    }

    /// Advance one step.
    ///
    /// Returns the outcome once the run has terminated (including on every
    /// call after termination, which changes nothing).
    pub fn step(&mut self) -> Option<&OutcomeRecord> {
        if self.phase == FlightPhase::Terminated {
            return self.outcome.as_ref();
        }

        let dt = self.config.time_step;
        let prev_pos = self.state.pos;
        let prev_vel = self.state.vel;
        let prev_time = self.time;

        let mut acc = self
            .config
            .gravity
            .acceleration(self.state.pos, &self.bodies);
        if self.phase == FlightPhase::InAtmosphere {
            acc += self.atmospheric_step(dt);
        }

        (self.state.pos, self.state.vel) =
            semi_implicit_euler(self.state.pos, self.state.vel, acc, dt);

        for body in &mut self.bodies {
            body.drift(dt);
        }
        if let Some(target) = self.bodies.first() {
            self.target.body = *target;
        }
        self.time += dt;
        self.steps += 1;

        let distance = self.target.relative_position(self.state.pos).length();

        if self.phase == FlightPhase::FreeFlight && distance <= self.config.atmosphere_radius() {
            let assessment = self.enter_atmosphere();
            if assessment.breaks_up {
                info!(
                    "Body broke up on entry at t={:.1}s: radius {:.2} m <= critical {:.2} m",
                    self.time, assessment.radius, assessment.critical_radius
                );
                self.terminate(Outcome::BrokenUp, None);
                return self.outcome.as_ref();
            }
        }

        if self.phase == FlightPhase::InAtmosphere
            && is_fully_ablated(self.state.radius, self.state.mass, &self.config.ablation)
        {
            info!(
                "Body fully ablated at t={:.1}s, altitude {:.0} m",
                self.time,
                self.altitude()
            );
            self.terminate(Outcome::Ablated, None);
            return self.outcome.as_ref();
        }

        if distance <= self.target.radius {
            let report = resolve_impact(
                prev_pos,
                prev_vel,
                self.state.pos,
                self.state.vel,
                prev_time,
                dt,
                self.state.mass,
                self.entry.map(|entry| entry.time),
                &self.target,
            );
            self.state.pos = report.position;
            self.state.vel = report.velocity;
            self.time = report.time;
            info!(
                "Impact at t={:.2}s: lat {:.4}°, lon {:.4}° ({:.2} km/s, {:.3e} J = {:.3} Mt)",
                report.time,
                report.location.latitude,
                report.location.longitude,
                report.speed_km_s(),
                report.energy_j,
                report.energy_mt
            );
            self.terminate(Outcome::Impact, Some(report));
            return self.outcome.as_ref();
        }

        if self.steps >= self.config.max_steps {
            warn!(
                "Step budget of {} exhausted at t={:.1}s without a terminal event",
                self.config.max_steps, self.time
            );
            self.terminate(Outcome::Exhausted, None);
            return self.outcome.as_ref();
        }

        let interval = self.config.status_interval;
        if interval > 0 && self.steps % interval == 0 {
            let status = self.status();
            debug!(
                "t={:.1}s alt={:.0} m v={:.0} m/s mass={:.4} r={:.3} m",
                status.time, status.altitude, status.speed, status.mass_fraction, status.radius
            );
        }

        None
    }

    /// Run to termination.
    pub fn run(&mut self) -> RunSummary {
        let outcome = loop {
            if let Some(record) = self.step() {
                break record.clone();
            }
        };
        self.summarize(outcome)
    }

    /// Summary of a finished run; `None` while still in flight.
    pub fn summary(&self) -> Option<RunSummary> {
        self.outcome.clone().map(|outcome| self.summarize(outcome))
    }

    fn summarize(&self, outcome: OutcomeRecord) -> RunSummary {
        RunSummary {
            outcome,
            entry: self.entry,
            steps: self.steps,
            initial_mass: self.initial_mass,
        }
    }

    /// Drag acceleration for this step; ablates the body as a side effect.
    fn atmospheric_step(&mut self, dt: f64) -> DVec3 {
        let altitude = self.altitude();
        let air_density = atmosphere::density(altitude);
        let v_rel = relative_velocity(self.state.pos, self.state.vel, &self.target);

        let drag = drag_acceleration(
            v_rel,
            air_density,
            self.config.material.drag_coefficient,
            self.state.cross_section(),
            self.state.mass,
        );

        if altitude > 0.0 {
            let elapsed = self
                .entry
                .map_or(0.0, |entry| self.time + dt - entry.time);
            let rate = ablation_rate(
                air_density,
                v_rel.length(),
                &self.config.material,
                self.config.ablation.scale,
                elapsed,
            );
            let step = ablation_step(
                &mut self.state.ablation_depth,
                self.state.radius,
                self.state.mass,
                rate,
                dt,
                &self.config.material,
                &self.config.ablation,
            );
            self.state.radius = step.radius;
            self.state.mass = step.mass;
        }

        drag
    }

    /// Capture the entry snapshot and make the breakup call.
    fn enter_atmosphere(&mut self) -> BreakupAssessment {
        let relative_pos = self.target.relative_position(self.state.pos);
        let distance = relative_pos.length();
        let angle = angle_of_inclination(relative_pos, self.state.vel - self.target.body.vel);

        let gravity = self.target.gravity_at(distance);
        let air_density = atmosphere::density(distance - self.target.radius);
        let v_rel = relative_velocity(self.state.pos, self.state.vel, &self.target);
        let stress = surface_stress(
            air_density,
            v_rel.length(),
            self.state.mass,
            self.state.radius,
            gravity,
        );
        let r_crit = critical_radius(
            stress,
            gravity,
            self.config.material.density,
            angle,
            self.config.min_entry_angle,
        );
        let assessment = assess_breakup(
            self.state.radius,
            r_crit,
            stress,
            self.config.breakup_radius_threshold,
        );

        self.entry = Some(EntrySnapshot {
            time: self.time,
            step: self.steps,
            position: self.state.pos,
            velocity: self.state.vel,
            angle,
        });
        self.breakup = Some(assessment);
        self.phase = FlightPhase::InAtmosphere;

        info!(
            "Atmosphere entry at t={:.1}s: {:.0} m/s, angle {:.2}°, stress {:.3e} Pa, critical radius {:.3} m",
            self.time,
            self.state.speed(),
            angle * RAD_TO_DEG,
            stress,
            r_crit
        );

        assessment
    }

    fn terminate(&mut self, outcome: Outcome, impact: Option<ImpactReport>) {
        self.phase = FlightPhase::Terminated;
        self.outcome = Some(OutcomeRecord {
            outcome,
            time: self.time,
            state: self.state.clone(),
            impact,
            breakup: self.breakup,
        });
    }
}

/// Lazy status sequence over one run. See [`Simulation::status_records`].
pub struct StatusRecords<'a> {
    sim: &'a mut Simulation,
    started: bool,
}

impl Iterator for StatusRecords<'_> {
    type Item = StatusRecord;

    fn next(&mut self) -> Option<StatusRecord> {
        if !self.started {
            self.started = true;
            return Some(self.sim.status());
        }

        let interval = self.sim.config.status_interval;
        while !self.sim.is_terminated() {
            let phase = self.sim.phase;
            self.sim.step();

            let periodic = interval > 0 && self.sim.steps % interval == 0;
            if periodic || self.sim.phase != phase {
                return Some(self.sim.status());
            }
        }
        None
    }
}

/// Validate `config` and run it to termination.
pub fn run(config: SimulationConfig) -> Result<RunSummary, ConfigError> {
    Ok(Simulation::new(config)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use crate::types::EARTH_RADIUS;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            time_step: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::InvalidTimeStep(_))
        ));
    }

    #[test]
    fn test_free_flight_step_is_gravity_only() {
        // High above the boundary: no drag, no ablation
        let config = fixtures::vertical_drop(500_000.0, 1_000.0, fixtures::stony(10.0));
        let mut sim = Simulation::new(config.clone()).unwrap();
        assert!(sim.step().is_none());

        assert_eq!(sim.phase(), FlightPhase::FreeFlight);
        assert_eq!(sim.state().mass, config.initial_mass());
        assert_eq!(sim.state().ablation_depth, 0.0);

        let g = config.target.gravity_at(EARTH_RADIUS + 500_000.0);
        assert_relative_eq!(sim.state().vel.x, -1_000.0 - g * 0.1, max_relative = 1e-12);
        assert_relative_eq!(sim.time(), 0.1);
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn test_entry_transition_captures_snapshot_once() {
        let config = fixtures::reference_config();
        let boundary = config.atmosphere_radius();
        let mut sim = Simulation::new(config).unwrap();

        while sim.phase() == FlightPhase::FreeFlight {
            sim.step();
        }
        let entry = *sim.entry().unwrap();
        assert!(entry.position.length() <= boundary);
        // The previous step was still outside: at most one step of travel
        assert!(entry.position.length() > boundary - 5_100.0 * 0.1);
        assert_relative_eq!(entry.angle_deg(), -90.0, epsilon = 1e-9);
        assert!(!sim.breakup().unwrap().breaks_up);

        for _ in 0..10 {
            sim.step();
        }
        assert_eq!(sim.entry(), Some(&entry));
    }

    #[test]
    fn test_ablation_only_in_atmosphere() {
        let config = fixtures::reference_config();
        let mut sim = Simulation::new(config).unwrap();

        while sim.phase() == FlightPhase::FreeFlight {
            assert_eq!(sim.state().ablation_depth, 0.0);
            sim.step();
        }
        for _ in 0..20 {
            sim.step();
        }
        assert!(sim.state().ablation_depth > 0.0);
    }

    #[test]
    fn test_breakup_terminates_on_entry_step() {
        let mut sim = Simulation::new(fixtures::breakup_candidate()).unwrap();
        let summary = sim.run();

        assert!(summary.outcome.is_broken_up());
        assert_eq!(summary.entry.unwrap().step, summary.steps);
        assert_eq!(sim.state().ablation_depth, 0.0);
        assert_eq!(summary.mass_fraction(), 1.0);
    }

    #[test]
    fn test_step_after_termination_changes_nothing() {
        let mut sim = Simulation::new(fixtures::reference_config()).unwrap();
        let summary = sim.run();
        let steps = sim.steps();
        let state = sim.state().clone();

        assert_eq!(sim.step(), Some(&summary.outcome));
        assert_eq!(sim.steps(), steps);
        assert_eq!(sim.state(), &state);
    }

    #[test]
    fn test_reset_reproduces_run() {
        let mut sim = Simulation::new(fixtures::reference_config()).unwrap();
        let first = sim.run();

        sim.reset();
        assert_eq!(sim.phase(), FlightPhase::FreeFlight);
        assert_eq!(sim.time(), 0.0);
        assert!(sim.outcome().is_none());

        let second = sim.run();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exhausted_when_budget_runs_out() {
        let config = SimulationConfig {
            max_steps: 5,
            ..fixtures::reference_config()
        };
        let summary = run(config).unwrap();
        assert!(summary.outcome.is_exhausted());
        assert_eq!(summary.steps, 5);
        assert!(summary.entry.is_none());
    }

    #[test]
    fn test_status_records_cover_run() {
        let config = SimulationConfig {
            status_interval: 50,
            ..fixtures::reference_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        let records: Vec<StatusRecord> = sim.status_records().collect();

        let first = records.first().unwrap();
        assert_eq!(first.step, 0);
        assert_eq!(first.phase, FlightPhase::FreeFlight);
        assert_eq!(first.mass_fraction, 1.0);

        let last = records.last().unwrap();
        assert_eq!(last.phase, FlightPhase::Terminated);
        assert_eq!(last.step, sim.steps());

        // One record for the entry transition
        assert_eq!(
            records
                .windows(2)
                .filter(|w| w[0].phase == FlightPhase::FreeFlight
                    && w[1].phase == FlightPhase::InAtmosphere)
                .count(),
            1
        );
        assert!(records.windows(2).all(|w| w[1].step > w[0].step));

        // Exhausted iterator stays exhausted
        assert_eq!(sim.status_records().nth(1), None);
    }

    #[test]
    fn test_summary_time_in_atmosphere() {
        let summary = run(fixtures::reference_config()).unwrap();
        let entry = summary.entry.unwrap();
        assert_relative_eq!(
            summary.time_in_atmosphere(),
            summary.outcome.time - entry.time
        );
        assert!(summary.time_in_atmosphere() > 0.0);
        assert!(summary.mass_fraction() < 1.0);
    }
}

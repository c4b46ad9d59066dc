//! Meteor Entry - Atmospheric Entry and Ablation Simulator
//!
//! Headless runner: picks a preset by id (first argument, default
//! `stony_50m`), drives it through the entry plugin and logs the result.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use meteor_entry::plugin::{EntryPlugin, EntryResult};
use meteor_entry::scenarios::{SCENARIOS, Scenario};

fn main() {
    let id = std::env::args().nth(1).unwrap_or_else(|| "stony_50m".to_string());

    let mut app = App::new();
    app.add_plugins((LogPlugin::default(), EntryPlugin));

    if id == "--list" {
        for scenario in SCENARIOS {
            info!("{:<18} {} - {}", scenario.id, scenario.name, scenario.description);
        }
        return;
    }

    let Some(scenario) = Scenario::find(&id) else {
        error!("Unknown scenario ID: {id} (try --list)");
        std::process::exit(2);
    };

    let config = scenario.config();
    if let Err(err) = config.validate() {
        error!("Scenario {} is invalid: {err}", scenario.id);
        std::process::exit(1);
    }

    info!("Running scenario: {} ({})", scenario.name, scenario.id);
    info!(
        "Body: {:.1} m, {:.0} kg/m³, mass {:.3e} kg",
        config.material.diameter,
        config.material.density,
        config.initial_mass()
    );
    app.insert_resource(config);

    loop {
        app.update();

        let mut results = app.world_mut().query::<&EntryResult>();
        let Some(EntryResult(summary)) = results.iter(app.world()).next() else {
            continue;
        };

        let record = &summary.outcome;
        info!(
            "Outcome: {} at t={:.2}s, {:.1}% of the mass left",
            record.outcome,
            record.time,
            summary.mass_fraction() * 100.0
        );
        if let Some(entry) = &summary.entry {
            info!(
                "Entry at t={:.1}s, angle {:.2}°, {:.1}s in the atmosphere",
                entry.time,
                entry.angle_deg(),
                summary.time_in_atmosphere()
            );
        }
        if let Some(impact) = summary.impact() {
            info!(
                "Impact: lat {:.4}°, lon {:.4}° (inertial {:.4}°), {:.2} km/s",
                impact.location.latitude,
                impact.location.longitude,
                impact.location.inertial_longitude,
                impact.speed_km_s()
            );
            info!(
                "Energy: {:.3e} J ({:.3} Mt TNT); rotation drift {:.4}° ({:.0} m)",
                impact.energy_j, impact.energy_mt, impact.rotation_drift_deg, impact.rotation_drift_m
            );
        }
        break;
    }
}

//! Entry point for the window shell: stepping, commands and overlay state.

use std::ops::ControlFlow;

use super::event_log::EventLog;
use super::events::SimulationEvent;
use super::params::Params;
use super::population::Population;
use super::track::Track;

/// User commands surfaced by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Discard every learned brain and restart from generation 1.
    ResetPopulation,
    /// End the current generation now.
    EvolveNow,
    /// Show or hide the checkpoint gates.
    ToggleCheckpoints,
    /// Show or hide the sensor rays.
    ToggleSensors,
    /// Leave the simulation.
    Quit,
}

/// Which debug overlays the shell should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlays {
    /// Draw checkpoint and anti-checkpoint gates.
    pub checkpoints: bool,
    /// Draw sensor rays and their hits.
    pub sensors: bool,
}

/// A running simulation together with its presentation state.
#[derive(Debug)]
pub struct Session {
    /// Parameters the session was started with.
    pub params: Params,
    /// Cars and selection state.
    pub population: Population,
    /// Overlay toggles.
    pub overlays: Overlays,
    /// Recent notable events.
    pub event_log: EventLog,
}

impl Session {
    /// Starts generation 1.
    pub fn new(params: Params) -> Self {
        let population = Population::new(&params);
        Self {
            params,
            population,
            overlays: Overlays::default(),
            event_log: EventLog::default(),
        }
    }

    /// Advances the simulation by one tick of `dt` seconds.
    pub fn step(&mut self, track: &impl Track, dt: f32) -> Vec<SimulationEvent> {
        let events = self.population.step(track, &self.params, dt);
        self.record(&events);
        events
    }

    /// Applies a user command.
    ///
    /// Returns `Break` when the shell should exit, otherwise the events the
    /// command produced.
    pub fn handle(&mut self, command: Command) -> ControlFlow<(), Vec<SimulationEvent>> {
        let mut events = Vec::new();
        match command {
            Command::ResetPopulation => {
                self.population.reset(&self.params);
                self.event_log.clear();
            }
            Command::EvolveNow => {
                events = self.population.evolve(&self.params);
                self.record(&events);
            }
            Command::ToggleCheckpoints => self.overlays.checkpoints = !self.overlays.checkpoints,
            Command::ToggleSensors => self.overlays.sensors = !self.overlays.sensors,
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(events)
    }

    fn record(&mut self, events: &[SimulationEvent]) {
        for event in events {
            self.event_log.record(self.population.time, event);
        }
    }
}

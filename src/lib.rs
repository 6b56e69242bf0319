//! # Evo Racer - Neuroevolution of Self-Driving Cars
//!
//! A population of cars learns to drive around a 2D track. Each car is steered
//! by a tiny feed-forward network fed with proximity sensors; at the end of
//! every generation the best car's network is copied and mutated to seed the
//! next one.
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Dense layers, activations and the car controller
//! - [`simulation::car`] - Car pose and kinematics
//! - [`simulation::sensor`] - Probe rays against the track
//! - [`simulation::track`] - Occupancy predicates and track shapes
//! - [`simulation::population`] - Scoring, crashes and generational selection
//! - [`simulation::session`] - Commands and overlays for the window shell

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural network controller for the cars.
    pub mod brain;
    /// Car pose, kinematics and race bookkeeping.
    pub mod car;
    /// Configuration errors.
    pub mod error;
    /// Bounded log of recent events for display.
    pub mod event_log;
    /// Events emitted by the race loop.
    pub mod events;
    /// Geometric utility functions for headings and vectors.
    pub mod geometric_utils;
    /// Simulation parameters.
    pub mod params;
    /// Population manager and the evolution loop.
    pub mod population;
    /// Proximity sensors.
    pub mod sensor;
    /// Shell-facing session: stepping, commands and overlays.
    pub mod session;
    /// Track geometry and occupancy predicates.
    pub mod track;
}

//! Event logging system for displaying recent race events.

use std::collections::VecDeque;

use super::events::{CrashCause, GenerationEnd, SimulationEvent};

/// A logged event for display in the UI.
#[derive(Debug, Clone)]
pub struct LoggedEvent {
    /// Simulation time when the event occurred
    pub time: f32,
    /// Human-readable description of the event
    pub description: String,
    /// Color hint for the event (for UI display)
    pub color: EventColor,
}

/// Color categories for events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColor {
    /// New leader (green)
    Leader,
    /// Crash (red)
    Crash,
    /// Generation rollover (blue)
    Generation,
}

/// Event log that tracks recent race events
#[derive(Debug, Clone)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f32, description: String, color: EventColor) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            color,
        });

        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Logs the events worth showing on screen. Plain checkpoint crossings are skipped.
    pub fn record(&mut self, time: f32, event: &SimulationEvent) {
        match event {
            SimulationEvent::CheckpointScored { .. } => {}
            SimulationEvent::NewLeader { car_id, score } => {
                self.log(
                    time,
                    format!("car {car_id} leads with {score}"),
                    EventColor::Leader,
                );
            }
            SimulationEvent::Crashed { car_id, cause } => {
                let what = match cause {
                    CrashCause::FellBehind => "fell behind",
                    CrashCause::Collision => "hit the wall",
                    CrashCause::WrongWay => "drove the wrong way",
                };
                self.log(time, format!("car {car_id} {what}"), EventColor::Crash);
            }
            SimulationEvent::GenerationEnded {
                generation,
                best_score,
                reason,
            } => {
                let why = match reason {
                    GenerationEnd::AllCrashed => "all crashed",
                    GenerationEnd::Stalled => "stalled",
                    GenerationEnd::Forced => "forced",
                };
                self.log(
                    time,
                    format!("generation {generation} ended ({why}), best {best_score}"),
                    EventColor::Generation,
                );
            }
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Clears all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

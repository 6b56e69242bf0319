//! Events emitted by the race loop.
//!
//! Cars are judged one after another; everything noteworthy that happens
//! during a step is pushed to an [`EventQueue`] and handed to the caller when
//! the step finishes.

/// Why a car left the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Fell too far behind the generation leader.
    FellBehind,
    /// Touched a wall.
    Collision,
    /// Entered a gate the wrong way.
    WrongWay,
}

/// Why a generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationEnd {
    /// Every car crashed.
    AllCrashed,
    /// No checkpoint was scored for longer than the stall timeout.
    Stalled,
    /// Requested by the user.
    Forced,
}

/// Something that happened during a simulation step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A car crossed a checkpoint.
    CheckpointScored {
        /// Car index.
        car_id: usize,
        /// Score after the crossing.
        score: i32,
    },
    /// A car took the lead of its generation.
    NewLeader {
        /// Car index.
        car_id: usize,
        /// Leading score.
        score: i32,
    },
    /// A car crashed.
    Crashed {
        /// Car index.
        car_id: usize,
        /// What ended its run.
        cause: CrashCause,
    },
    /// The population was replaced by a new generation.
    GenerationEnded {
        /// Number of the generation that just ended.
        generation: u32,
        /// Best score reached in it.
        best_score: i32,
        /// What ended it.
        reason: GenerationEnd,
    },
}

/// Queue for collecting simulation events during a step.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Consumes the queue, returning its events in order.
    pub fn into_vec(self) -> Vec<SimulationEvent> {
        self.events
    }
}

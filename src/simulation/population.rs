//! Population manager and the generational evolution loop.
//!
//! Cars race until every one of them has crashed or nobody has reached a
//! checkpoint for `stall_timeout` seconds. The brain of the best car is then
//! used to seed the next generation: one exact copy plus increasingly mutated
//! variants.

use rayon::prelude::*;
use tracing::{debug, info};

use super::brain::Brain;
use super::car::Car;
use super::events::{CrashCause, EventQueue, GenerationEnd, SimulationEvent};
use super::params::Params;
use super::track::Track;

/// Aggregate numbers for on-screen display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Current generation, starting at 1.
    pub generation: u32,
    /// Best score in the current generation.
    pub highest_score: i32,
    /// Best score in any generation since the last reset.
    pub best_ever_score: i32,
    /// Cars out of the race.
    pub crashed: usize,
    /// Cars still racing.
    pub alive: usize,
    /// Seconds since any car last scored.
    pub since_last_score: f32,
}

/// All cars of the running generation plus the selection state.
#[derive(Debug, Clone)]
pub struct Population {
    /// Cars of the current generation, indexed by id.
    pub cars: Vec<Car>,
    /// Current generation, starting at 1.
    pub generation: u32,
    /// Best score reached in the current generation.
    pub best_score: i32,
    /// Snapshot of the leader's brain taken when it last improved the best score.
    pub best_brain: Option<Brain>,
    /// Index of the car holding the best score.
    pub leader: Option<usize>,
    /// Brain the current generation was seeded from.
    pub elite: Option<Brain>,
    /// Best score in any generation since the last reset.
    pub best_ever_score: i32,
    /// Simulation clock in seconds.
    pub time: f32,
    /// Seconds since any car last scored.
    pub since_last_score: f32,
}

impl Population {
    /// Creates generation 1 with random brains.
    pub fn new(params: &Params) -> Self {
        Self {
            cars: seed_generation(None, params),
            generation: 1,
            best_score: 0,
            best_brain: None,
            leader: None,
            elite: None,
            best_ever_score: 0,
            time: 0.0,
            since_last_score: 0.0,
        }
    }

    /// Advances every racing car by one tick, then rolls the generation over if it is finished.
    pub fn step(&mut self, track: &impl Track, params: &Params, dt: f32) -> Vec<SimulationEvent> {
        let mut events = EventQueue::new();

        self.time += dt;
        self.since_last_score += dt;

        for i in 0..self.cars.len() {
            let car = &mut self.cars[i];
            if car.crashed {
                continue;
            }
            let controls = car.think();
            car.drive(controls, params);
            car.sense(track, params);
            self.judge(i, track, params, &mut events);
        }

        if let Some(reason) = self.finished(params) {
            self.end_generation(reason, params, &mut events);
        }

        events.into_vec()
    }

    /// Applies crash rules and checkpoint scoring to car `i` at its current pose.
    ///
    /// Crash checks run in order: fell behind the leader, wall collision,
    /// wrong-way gate. A car may pass an anti-checkpoint only while it is
    /// credited for the checkpoint just before it.
    pub fn judge(&mut self, i: usize, track: &impl Track, params: &Params, events: &mut EventQueue) {
        let best_score = self.best_score;
        let car = &mut self.cars[i];
        if car.crashed {
            return;
        }

        let cause = if best_score - car.score > params.score_slack {
            Some(CrashCause::FellBehind)
        } else if car.collides(track, params) {
            Some(CrashCause::Collision)
        } else if track.is_in_anti_checkpoint(&car.pos) && !car.in_checkpoint {
            Some(CrashCause::WrongWay)
        } else {
            None
        };
        if let Some(cause) = cause {
            car.crash();
            events.push(SimulationEvent::Crashed { car_id: i, cause });
            return;
        }

        let in_checkpoint = track.is_in_checkpoint(&car.pos);
        let in_anti = track.is_in_anti_checkpoint(&car.pos);

        if in_anti {
            car.anti_colliding = true;
        }

        let scored = in_checkpoint && !car.in_checkpoint && !car.anti_colliding;
        if scored {
            car.score += params.checkpoint_score;
            car.in_checkpoint = true;
        }

        if !in_checkpoint && !in_anti {
            car.anti_colliding = false;
            car.in_checkpoint = false;
        }

        if scored {
            let score = car.score;
            events.push(SimulationEvent::CheckpointScored { car_id: i, score });
            self.since_last_score = 0.0;
            if score > self.best_score {
                self.take_lead(i, events);
            }
        }
    }

    fn take_lead(&mut self, i: usize, events: &mut EventQueue) {
        let car = &self.cars[i];
        self.best_score = car.score;
        self.best_ever_score = self.best_ever_score.max(car.score);
        self.best_brain = Some(car.brain.clone());
        if self.leader != Some(i) {
            self.leader = Some(i);
            debug!(car = i, score = car.score, "new leader");
            events.push(SimulationEvent::NewLeader {
                car_id: i,
                score: car.score,
            });
        }
    }

    /// Why the current generation is over, if it is.
    pub fn finished(&self, params: &Params) -> Option<GenerationEnd> {
        if self.cars.iter().all(|car| car.crashed) {
            Some(GenerationEnd::AllCrashed)
        } else if self.since_last_score > params.stall_timeout {
            Some(GenerationEnd::Stalled)
        } else {
            None
        }
    }

    /// Ends the current generation immediately.
    pub fn evolve(&mut self, params: &Params) -> Vec<SimulationEvent> {
        let mut events = EventQueue::new();
        self.end_generation(GenerationEnd::Forced, params, &mut events);
        events.into_vec()
    }

    fn end_generation(&mut self, reason: GenerationEnd, params: &Params, events: &mut EventQueue) {
        info!(
            generation = self.generation,
            best_score = self.best_score,
            ?reason,
            "generation ended"
        );
        events.push(SimulationEvent::GenerationEnded {
            generation: self.generation,
            best_score: self.best_score,
            reason,
        });

        // Nobody scored: keep racing the previous elite.
        if let Some(best) = self.best_brain.take() {
            self.elite = Some(best);
        }
        self.cars = seed_generation(self.elite.as_ref(), params);
        self.generation += 1;
        self.best_score = 0;
        self.leader = None;
        self.since_last_score = 0.0;
    }

    /// Throws away all learned brains and restarts from generation 1.
    pub fn reset(&mut self, params: &Params) {
        debug!(generation = self.generation, "population reset");
        *self = Self {
            time: self.time,
            ..Self::new(params)
        };
    }

    /// Cars that have crashed this generation.
    pub fn crashed_count(&self) -> usize {
        self.cars.iter().filter(|car| car.crashed).count()
    }

    /// Snapshot of the display counters.
    pub fn stats(&self) -> Stats {
        let crashed = self.crashed_count();
        Stats {
            generation: self.generation,
            highest_score: self.best_score,
            best_ever_score: self.best_ever_score,
            crashed,
            alive: self.cars.len() - crashed,
            since_last_score: self.since_last_score,
        }
    }
}

/// Mutation factor of car `index` in a generation of `size`, from 0 up to 1.
pub fn mutation_factor(index: usize, size: usize) -> f32 {
    if size <= 1 {
        0.0
    } else {
        index as f32 / (size - 1) as f32
    }
}

/// Builds a full generation at the spawn pose.
///
/// Without an elite every car gets random parameters. Otherwise car 0 is an
/// exact copy of the elite and car `i` inherits it with mutation scaled by
/// [`mutation_factor`].
pub fn seed_generation(elite: Option<&Brain>, params: &Params) -> Vec<Car> {
    let size = params.population_size;
    (0..size)
        .into_par_iter()
        .map(|i| {
            let mut car = Car::new_random(i, params);
            match elite {
                None => {}
                Some(elite) if i == 0 => car.brain.inherit(elite),
                Some(elite) => {
                    let factor = mutation_factor(i, size);
                    car.brain.inherit_and_evolve(
                        elite,
                        params.weight_mutation_scale * factor,
                        params.bias_mutation_scale * factor,
                    );
                }
            }
            car
        })
        .collect()
}

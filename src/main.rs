use std::ops::ControlFlow;
use std::path::PathBuf;

use clap::Parser;
use evo_racer::simulation::error::ConfigError;
use evo_racer::simulation::params::Params;
use evo_racer::simulation::session::{Command, Session};
use evo_racer::simulation::track::CircuitTrack;
use macroquad::prelude::*;
use tracing::{error, info};

mod graphics;
mod ui;

/// Simulation ticks allowed per rendered frame before the backlog is dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;

#[derive(Parser, Debug)]
#[command(about = "Cars learning to drive through neuroevolution")]
struct Args {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the number of cars per generation
    #[arg(long)]
    population: Option<usize>,
    /// Override the simulation tick rate (Hz)
    #[arg(long)]
    tick_rate: Option<f32>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Evo Racer".to_owned(),
        window_width: 1200,
        window_height: 900,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_params(args: &Args) -> Result<Params, ConfigError> {
    let mut params = match &args.config {
        Some(path) => Params::load(path)?,
        None => Params::default(),
    };
    if let Some(population) = args.population {
        params.population_size = population;
    }
    if let Some(tick_rate) = args.tick_rate {
        params.tick_rate = tick_rate;
    }
    params.validate()?;
    Ok(params)
}

fn read_commands() -> Vec<Command> {
    let bindings = [
        (KeyCode::R, Command::ResetPopulation),
        (KeyCode::E, Command::EvolveNow),
        (KeyCode::C, Command::ToggleCheckpoints),
        (KeyCode::S, Command::ToggleSensors),
        (KeyCode::Escape, Command::Quit),
        (KeyCode::Q, Command::Quit),
    ];
    bindings
        .into_iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, command)| command)
        .collect()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    let args = Args::parse();

    let params = match load_params(&args) {
        Ok(params) => params,
        Err(err) => {
            error!(%err, "could not load parameters");
            std::process::exit(1);
        }
    };

    let track = CircuitTrack::new(&params.track);
    let tick = 1.0 / params.tick_rate;
    info!(
        population = params.population_size,
        tick_rate = params.tick_rate,
        "starting evo racer"
    );

    let mut session = Session::new(params);
    let mut ui_state = ui::UiState::new();
    let mut accumulator = 0.0;

    loop {
        for command in read_commands() {
            if command == Command::ResetPopulation {
                ui_state.clear();
            }
            match session.handle(command) {
                ControlFlow::Break(()) => {
                    info!("quit requested");
                    return;
                }
                ControlFlow::Continue(events) => ui_state.observe(&events),
            }
        }

        accumulator += get_frame_time();
        let mut ticks = 0;
        while accumulator >= tick && ticks < MAX_TICKS_PER_FRAME {
            let events = session.step(&track, tick);
            ui_state.observe(&events);
            accumulator -= tick;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            accumulator = 0.0;
        }

        clear_background(graphics::GRASS);
        graphics::draw_track(&track, session.overlays.checkpoints);
        graphics::draw_cars(&session);
        graphics::draw_stats(&session.population.stats(), session.params.population_size);

        ui::draw_ui(&ui_state, &session);
        ui::process_egui();

        next_frame().await;
    }
}

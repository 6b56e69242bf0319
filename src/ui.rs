use std::collections::VecDeque;

use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use evo_racer::simulation::event_log::EventColor;
use evo_racer::simulation::events::SimulationEvent;
use evo_racer::simulation::session::Session;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UiState {
    /// Best score of every finished generation.
    pub generation_best_history: VecDeque<(f64, f64)>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            generation_best_history: VecDeque::new(),
        }
    }

    pub fn observe(&mut self, events: &[SimulationEvent]) {
        for event in events {
            if let SimulationEvent::GenerationEnded {
                generation,
                best_score,
                ..
            } = event
            {
                self.generation_best_history
                    .push_back((f64::from(*generation), f64::from(*best_score)));
                if self.generation_best_history.len() > MAX_HISTORY_POINTS {
                    self.generation_best_history.pop_front();
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.generation_best_history.clear();
    }
}

pub fn draw_ui(state: &UiState, session: &Session) {
    egui_macroquad::ui(|egui_ctx| {
        egui_ctx.set_visuals(egui::Visuals::dark());

        egui::Window::new("Evolution")
            .default_pos(egui::pos2(900.0, 10.0))
            .default_width(280.0)
            .show(egui_ctx, |ui| {
                let stats = session.population.stats();
                ui.label(format!("Generation: {}", stats.generation));
                ui.label(format!("Alive: {}", stats.alive));
                ui.label(format!("Best ever: {}", stats.best_ever_score));
                ui.separator();

                ui.label("Best score per generation");
                if state.generation_best_history.is_empty() {
                    ui.label("Collecting data...");
                } else {
                    let points: PlotPoints = state
                        .generation_best_history
                        .iter()
                        .map(|&(x, y)| [x, y])
                        .collect();
                    Plot::new("generation_best_plot")
                        .height(150.0)
                        .show_axes([true, true])
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new(points));
                        });
                }
                ui.separator();

                for event in session.event_log.events() {
                    let color = match event.color {
                        EventColor::Leader => egui::Color32::from_rgb(100, 255, 100),
                        EventColor::Crash => egui::Color32::from_rgb(255, 100, 100),
                        EventColor::Generation => egui::Color32::from_rgb(100, 200, 255),
                    };
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("[{:.1}s]", event.time))
                                .color(egui::Color32::from_rgb(180, 180, 200))
                                .size(11.0)
                                .monospace(),
                        );
                        ui.label(egui::RichText::new(&event.description).color(color).size(11.0));
                    });
                }
            });
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}

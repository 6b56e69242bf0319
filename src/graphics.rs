use evo_racer::simulation::car::Car;
use evo_racer::simulation::population::Stats;
use evo_racer::simulation::session::Session;
use evo_racer::simulation::track::CircuitTrack;
use geo::Polygon;
use macroquad::prelude::*;

pub const GRASS: Color = Color::new(0.22, 0.42, 0.2, 1.0);
const ROAD: Color = Color::new(0.35, 0.35, 0.37, 1.0);
const CHECKPOINT: Color = Color::new(0.2, 0.9, 0.3, 0.6);
const ANTI_CHECKPOINT: Color = Color::new(0.95, 0.25, 0.2, 0.6);

fn vertices(ring: &geo::LineString<f32>) -> Vec<Vec2> {
    ring.coords().map(|c| vec2(c.x, c.y)).collect()
}

fn fill_quad(polygon: &Polygon<f32>, color: Color) {
    let v = vertices(polygon.exterior());
    if v.len() >= 4 {
        draw_triangle(v[0], v[1], v[2], color);
        draw_triangle(v[0], v[2], v[3], color);
    }
}

pub fn draw_track(track: &CircuitTrack, show_checkpoints: bool) {
    let outer = vertices(track.road.exterior());
    let Some(inner) = track.road.interiors().first().map(vertices) else {
        return;
    };

    // both rings are sampled at the same angles, so segment i pairs up
    for (o, i) in outer.windows(2).zip(inner.windows(2)) {
        draw_triangle(o[0], o[1], i[1], ROAD);
        draw_triangle(o[0], i[1], i[0], ROAD);
    }

    if show_checkpoints {
        for gate in &track.checkpoints {
            fill_quad(gate, CHECKPOINT);
        }
        for gate in &track.anti_checkpoints {
            fill_quad(gate, ANTI_CHECKPOINT);
        }
    }
}

fn car_color(car: &Car, leader: Option<usize>) -> Color {
    if car.crashed {
        Color::new(0.5, 0.5, 0.5, 0.5)
    } else if leader == Some(car.id) {
        GOLD
    } else {
        SKYBLUE
    }
}

fn draw_rays(car: &Car) {
    for ray in &car.rays {
        let Some(end) = ray.endpoints.last() else {
            continue;
        };
        draw_line(car.pos[0], car.pos[1], end[0], end[1], 1.0, Color::new(1.0, 1.0, 1.0, 0.4));
        if let Some(k) = ray.first_hit() {
            let hit = &ray.endpoints[k];
            draw_circle(hit[0], hit[1], 3.0, RED);
        }
    }
}

pub fn draw_cars(session: &Session) {
    let population = &session.population;
    let params = &session.params;

    // crashed cars first so the racing ones stay on top
    let (crashed, racing): (Vec<&Car>, Vec<&Car>) =
        population.cars.iter().partition(|car| car.crashed);

    for car in crashed.into_iter().chain(racing) {
        if session.overlays.sensors && car.is_alive() {
            draw_rays(car);
        }
        draw_rectangle_ex(
            car.pos[0],
            car.pos[1],
            params.car_length,
            params.car_width,
            DrawRectangleParams {
                offset: vec2(0.5, 0.5),
                rotation: car.heading.to_radians(),
                color: car_color(car, population.leader),
            },
        );
    }
}

pub fn draw_stats(stats: &Stats, population_size: usize) {
    let lines = [
        format!("Generation: {}", stats.generation),
        format!("Highest score: {}", stats.highest_score),
        format!("Best ever: {}", stats.best_ever_score),
        format!("Crashed: {}/{}", stats.crashed, population_size),
        format!("Since last score: {:.1}s", stats.since_last_score),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 24.0 + i as f32 * 22.0, 24.0, WHITE);
    }
}

#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_racer::simulation::brain::Controls;
use evo_racer::simulation::car::Car;
use evo_racer::simulation::geometric_utils::heading_vector;
use evo_racer::simulation::params::Params;
use evo_racer::simulation::track::MaskTrack;

fn create_test_params() -> Params {
    Params {
        population_size: 1,
        spawn_x: 500.0,
        spawn_y: 500.0,
        spawn_heading: 0.0,
        ..Params::default()
    }
}

const ACCELERATE: Controls = Controls {
    accelerate: true,
    brake: false,
    turn: 0,
};

#[test]
fn test_car_spawns_at_spawn_pose() {
    let params = create_test_params();
    let car = Car::new_random(0, &params);

    assert_eq!(car.pos[0], 500.0);
    assert_eq!(car.pos[1], 500.0);
    assert_eq!(car.heading, 0.0);
    assert_eq!(car.speed, 0.0);
    assert!(car.is_alive());
    assert_eq!(car.score, 0);
    assert_eq!(car.rays.len(), params.sensor_angles.len());
    assert_eq!(car.brain_inputs().len(), params.input_size());
}

#[test]
fn test_straight_acceleration_follows_recurrence() {
    let params = create_test_params();
    let track = MaskTrack::open(10_000, 1_000);
    let mut car = Car::new_random(0, &params);

    car.sense(&track, &params);
    for ray in &car.rays {
        assert_eq!(ray.reading, params.max_sensor_range());
    }

    let mut expected_speed = 0.0f32;
    let mut expected_x = params.spawn_x;
    for _ in 0..60 {
        if expected_speed < params.top_speed {
            expected_speed += params.acceleration;
        }
        expected_speed = expected_speed.clamp(0.0, params.top_speed);
        expected_x += expected_speed;

        car.drive(ACCELERATE, &params);
        car.sense(&track, &params);

        assert!((car.speed - expected_speed).abs() < 1e-5);
    }

    assert!((car.pos[0] - expected_x).abs() < 1e-3);
    assert_eq!(car.pos[1], params.spawn_y);
    assert_eq!(car.speed, params.top_speed);
    for ray in &car.rays {
        assert_eq!(ray.reading, params.max_sensor_range());
    }
}

#[test]
fn test_speed_stays_within_bounds() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);

    for tick in 0..2_000u32 {
        let controls = Controls {
            accelerate: tick % 3 != 0,
            brake: tick % 5 == 0,
            turn: [-1, 0, 1][(tick % 7 % 3) as usize],
        };
        car.drive(controls, &params);

        assert!(car.speed >= 0.0);
        assert!(car.speed <= params.top_speed);
    }
}

#[test]
fn test_top_speed_is_not_exceeded_by_uneven_acceleration() {
    let params = Params {
        acceleration: 0.3,
        top_speed: 1.0,
        ..create_test_params()
    };
    let mut car = Car::new_random(0, &params);

    for _ in 0..10 {
        car.drive(ACCELERATE, &params);
    }

    assert_eq!(car.speed, 1.0);
}

#[test]
fn test_braking_and_coasting() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);
    car.speed = 1.0;

    car.drive(
        Controls {
            accelerate: false,
            brake: true,
            turn: 0,
        },
        &params,
    );
    assert!((car.speed - (1.0 - params.braking_force)).abs() < 1e-6);

    car.drive(Controls::IDLE, &params);
    assert!((car.speed - (1.0 - params.braking_force - params.coast_deceleration)).abs() < 1e-6);

    for _ in 0..20 {
        car.drive(Controls::IDLE, &params);
    }
    assert_eq!(car.speed, 0.0);
}

#[test]
fn test_throttle_at_top_speed_holds_speed() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);
    car.speed = params.top_speed;

    // throttle held at top speed: no pedal branch applies, speed holds
    car.drive(ACCELERATE, &params);
    assert_eq!(car.speed, params.top_speed);
}

#[test]
fn test_heading_wraps_and_direction_stays_consistent() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);

    let left = Controls {
        accelerate: false,
        brake: false,
        turn: -1,
    };
    for _ in 0..1_000 {
        car.drive(left, &params);
        assert!(car.heading >= 0.0 && car.heading < 360.0);
        let norm = (car.direction[0].powi(2) + car.direction[1].powi(2)).sqrt();
        assert!((norm - 1.0).abs() < 1e-3);
    }

    let right = Controls {
        accelerate: false,
        brake: false,
        turn: 1,
    };
    for _ in 0..1_000 {
        car.drive(right, &params);
        assert!(car.heading >= 0.0 && car.heading < 360.0);
    }

    let expected = heading_vector(car.heading);
    assert!((car.direction[0] - expected[0]).abs() < 1e-3);
    assert!((car.direction[1] - expected[1]).abs() < 1e-3);
}

#[test]
fn test_crossing_zero_resets_direction_exactly() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);

    // one tick left from heading 0 wraps to 358
    car.drive(
        Controls {
            accelerate: false,
            brake: false,
            turn: -1,
        },
        &params,
    );

    assert_eq!(car.heading, 358.0);
    assert_eq!(car.direction, heading_vector(358.0));
    for (ray, angle) in car.rays.iter().zip(&params.sensor_angles) {
        assert_eq!(ray.direction, heading_vector(358.0 + angle));
    }
}

#[test]
fn test_turning_right_rotates_clockwise_on_screen() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);
    let right = Controls {
        accelerate: false,
        brake: false,
        turn: 1,
    };

    // 45 ticks at 2 degrees per tick
    for _ in 0..45 {
        car.drive(right, &params);
    }

    assert!((car.heading - 90.0).abs() < 1e-3);
    assert!(car.direction[0].abs() < 1e-3);
    assert!((car.direction[1] - 1.0).abs() < 1e-3);
}

#[test]
fn test_crashed_car_is_frozen() {
    let params = create_test_params();
    let mut car = Car::new_random(0, &params);
    car.drive(ACCELERATE, &params);
    car.crash();

    let pos = car.pos.clone();
    let heading = car.heading;
    for _ in 0..10 {
        car.drive(ACCELERATE, &params);
    }

    assert!(car.crashed);
    assert_eq!(car.controls, Controls::IDLE);
    assert_eq!(car.pos, pos);
    assert_eq!(car.heading, heading);
}

#[test]
fn test_hull_corners() {
    let params = create_test_params();
    let car = Car::new_random(0, &params);

    let hull = car.hull(&params);
    let half_length = params.car_length / 2.0;
    let half_width = params.car_width / 2.0;

    for corner in &hull {
        assert!(((corner[0] - 500.0).abs() - half_length).abs() < 1e-4);
        assert!(((corner[1] - 500.0).abs() - half_width).abs() < 1e-4);
    }
}

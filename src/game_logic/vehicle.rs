use crate::game_logic::{
    angle_delta, wrap_angle, SimulationConfig, StartPose, Track, SPEED_DISPLAY_SCALE,
};
use bevy::prelude::*;

/// Normalized control state sampled once per tick. The shell fills this from
/// whatever device it likes; the vehicle never polls input itself.
#[derive(Resource, Clone, Default)]
pub struct DriveInput {
    /// 0..=1
    pub throttle: f32,
    /// 0..=1
    pub brake: f32,
    /// -1..=1, positive steers left (counter-clockwise)
    pub steering: f32,
    pub handbrake: bool,
}

/// The single car. Owns its tuning config; integrated one step per tick
/// against the track it is racing on.
pub struct Vehicle {
    pub config: SimulationConfig,

    pub position: Vec2,
    pub previous_position: Vec2,
    /// Heading in radians, always in `[0, 2π)`.
    pub heading: f32,
    /// Signed speed in world units/s, clamped to
    /// `[max_reverse_speed, max_speed]`.
    pub speed: f32,
    /// Front wheel angle, approaches its target with a first-order lag.
    pub steering_angle: f32,

    pub drifting: bool,
    pub current_grip: f32,

    // Off-track state
    pub off_track: bool,
    /// Fraction of the four corners outside the track, 0..=1.
    pub off_track_severity: f32,
    /// Seconds spent off-track since last on-track tick.
    pub off_track_timer: f32,
    /// Seconds spent off-track while barely moving.
    pub stuck_timer: f32,
    /// Bearing back to the track center while off-track.
    pub target_recovery_angle: Option<f32>,

    // Collision flash for the renderer
    pub colliding: bool,
    collision_cooldown: f32,
}

impl Vehicle {
    pub fn new(config: SimulationConfig, start: StartPose) -> Self {
        debug_assert!(config.max_speed > 0.0, "max speed must be positive");
        Self {
            config,
            position: start.position,
            previous_position: start.position,
            heading: wrap_angle(start.heading),
            speed: 0.0,
            steering_angle: 0.0,
            drifting: false,
            current_grip: 0.0,
            off_track: false,
            off_track_severity: 0.0,
            off_track_timer: 0.0,
            stuck_timer: 0.0,
            target_recovery_angle: None,
            colliding: false,
            collision_cooldown: 0.0,
        }
    }

    /// Advance the car by one tick. Returns the absolute speed in the HUD's
    /// display unit; the physical state lives on `self`.
    pub fn step(&mut self, input: &DriveInput, track: &Track, dt: f32) -> f32 {
        self.previous_position = self.position;

        self.integrate(input, dt);

        self.off_track = !self.all_corners_on_track(track);
        if self.off_track {
            self.off_track_timer += dt;

            // displacement produced by the physics step itself, before any
            // recovery nudge moves the car
            let moved = self.position.distance(self.previous_position);
            if moved < self.config.stuck_move_epsilon
                && self.speed.abs() < self.config.stuck_speed_epsilon
            {
                self.stuck_timer += dt;
            } else {
                self.stuck_timer = (self.stuck_timer - dt * 0.5).max(0.0);
            }

            self.speed *= self.config.off_track_drag;
        } else {
            self.off_track_timer = 0.0;
            self.stuck_timer = 0.0;
        }

        self.resolve_track_excursion(track);

        if self.collision_cooldown > 0.0 {
            self.collision_cooldown -= dt;
        } else {
            self.colliding = false;
        }

        self.speed.abs() * SPEED_DISPLAY_SCALE
    }

    /// Longitudinal dynamics, steering, heading and position for one tick.
    fn integrate(&mut self, input: &DriveInput, dt: f32) {
        let cfg = self.config.clone();

        let acceleration = if input.throttle > 0.0 {
            input.throttle * cfg.accel_rate
        } else if input.brake > 0.0 {
            if self.speed > 0.0 {
                -input.brake * cfg.brake_force
            } else {
                // reversing from a standstill is slower than braking
                -input.brake * cfg.accel_rate * 0.5
            }
        } else if self.speed > 0.0 {
            -cfg.engine_brake_force
        } else if self.speed < 0.0 {
            cfg.engine_brake_force
        } else {
            0.0
        };

        self.speed =
            (self.speed + acceleration * dt).clamp(cfg.max_reverse_speed, cfg.max_speed);

        // full authority below 20% of max speed, tapering to 40% above 80%
        let speed_ratio = self.speed.abs() / cfg.max_speed;
        let steering_factor = if speed_ratio < 0.2 {
            1.0
        } else if speed_ratio > 0.8 {
            0.4
        } else {
            1.0 - (speed_ratio - 0.2) * 0.75
        };

        let direction = if self.speed >= 0.0 { 1.0 } else { -1.0 };

        let target_steering = match self.target_recovery_angle {
            Some(recovery)
                if self.off_track
                    && self.off_track_severity > cfg.assist_severity_threshold =>
            {
                // blend the player's steering with a pull toward the track
                // center, weighted by how badly off and how stuck the car is
                let diff = angle_delta(recovery - self.heading);
                let assist = (diff / (cfg.max_steering_angle * 0.5)).clamp(-1.0, 1.0);
                let influence = (self.off_track_severity * 0.8 + self.stuck_timer * 0.2)
                    .min(cfg.max_assist_influence);
                let blended = input.steering * (1.0 - influence) + assist * influence;
                blended * cfg.max_steering_angle * steering_factor
            }
            _ => input.steering * cfg.max_steering_angle * steering_factor,
        };

        self.steering_angle += (target_steering - self.steering_angle)
            * cfg.steering_response
            * dt;
        self.steering_angle = self
            .steering_angle
            .clamp(-cfg.max_steering_angle, cfg.max_steering_angle);

        if self.speed != 0.0 && self.steering_angle != 0.0 {
            // bicycle-model turn rate with understeer growing with speed
            let understeer = 1.0 - speed_ratio * cfg.understeer;
            let turn_rate = direction * (self.speed / cfg.wheelbase)
                * (self.steering_angle * understeer).tan();
            self.heading = wrap_angle(self.heading + turn_rate * dt);
        }

        self.drifting = input.handbrake && self.speed.abs() > cfg.drift_speed_threshold;
        self.current_grip = if self.drifting {
            cfg.grip * cfg.handbrake_grip_factor
        } else {
            cfg.grip
        };

        // while drifting the car travels offset from where it points
        let move_angle = if self.drifting {
            self.heading + self.steering_angle * direction * cfg.drift_factor
        } else {
            self.heading
        };
        self.position += Vec2::new(move_angle.cos(), move_angle.sin()) * self.speed * dt;
    }

    /// Progressive recovery once any corner has left the track: shed speed,
    /// pull toward the nearest center-line point, rotate back toward it, and
    /// as a last resort snap speed and heading outright.
    fn resolve_track_excursion(&mut self, track: &Track) {
        let off_corners = self
            .corners()
            .iter()
            .filter(|corner| !track.is_on_track(**corner))
            .count();

        if off_corners == 0 {
            self.off_track_severity = 0.0;
            self.target_recovery_angle = None;
            return;
        }

        let cfg = self.config.clone();
        self.off_track_severity = off_corners as f32 / 4.0;

        let stuck_factor = (self.stuck_timer / 2.0).min(1.0);
        let reduction = 0.2 + self.off_track_severity * 0.4 + stuck_factor * 0.3;
        self.speed *= 1.0 - reduction;

        match track.find_nearest_center(self.position) {
            Some(center) => {
                let to_center = center - self.position;
                let distance = to_center.length();
                if distance > 0.0 {
                    let target_angle = to_center.y.atan2(to_center.x);
                    self.target_recovery_angle = Some(target_angle);

                    let corner_factor = self.off_track_severity.powi(2) * 4.0;
                    let time_factor = (self.off_track_timer * 0.5).min(2.0);
                    let stuck_assist = (self.stuck_timer * 2.0).min(4.0);
                    let pull =
                        cfg.recovery_pull_base + corner_factor + time_factor + stuck_assist;
                    self.position += to_center / distance * pull;

                    if off_corners >= 2 || self.stuck_timer > cfg.rotation_assist_stuck_time {
                        let diff = angle_delta(target_angle - self.heading);
                        let strength = 0.1 + (self.stuck_timer * 0.1).min(0.3);
                        self.heading = wrap_angle(self.heading + diff * strength);
                    }

                    if self.stuck_timer > cfg.emergency_stuck_time {
                        // wedged: point straight at the track and push off
                        self.speed = cfg.recovery_speed;
                        self.heading = wrap_angle(target_angle);
                    }
                }
            }
            None => {
                // no center line to aim for; give back most of the movement
                self.position = self.previous_position
                    + (self.previous_position - self.position) * 0.15;
                self.speed *= 0.5;
            }
        }

        self.colliding = true;
        self.collision_cooldown = cfg.collision_cooldown;
    }

    fn all_corners_on_track(&self, track: &Track) -> bool {
        self.corners()
            .iter()
            .all(|corner| track.is_on_track(*corner))
    }

    /// The four vertices of the car's oriented bounding rectangle, used for
    /// track containment.
    pub fn corners(&self) -> [Vec2; 4] {
        let (sin, cos) = self.heading.sin_cos();
        let half_l = self.config.length / 2.0;
        let half_w = self.config.width / 2.0;

        let forward = Vec2::new(cos, sin) * half_l;
        let left = Vec2::new(-sin, cos) * half_w;

        [
            self.position + forward + left,
            self.position + forward - left,
            self.position - forward - left,
            self.position - forward + left,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const DT: f32 = 1.0 / 60.0;

    fn ring_track() -> Track {
        let control: Vec<Vec2> = (0..12)
            .map(|i| {
                let a = i as f32 / 12.0 * TAU;
                Vec2::new(a.cos(), a.sin()) * 250.0
            })
            .collect();
        Track::build(&control, 1.2, 0.6, 8, None)
    }

    fn car_at(position: Vec2, heading: f32) -> Vehicle {
        Vehicle::new(SimulationConfig::default(), StartPose { position, heading })
    }

    fn throttle() -> DriveInput {
        DriveInput {
            throttle: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn speed_and_steering_stay_in_bounds() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        let input = DriveInput {
            throttle: 1.0,
            steering: 1.0,
            handbrake: true,
            ..Default::default()
        };

        for _ in 0..2000 {
            car.step(&input, &track, DT);
            let cfg = &car.config;
            assert!(car.speed <= cfg.max_speed && car.speed >= cfg.max_reverse_speed);
            assert!(car.steering_angle.abs() <= cfg.max_steering_angle + 1e-4);
            assert!((0.0..TAU).contains(&car.heading));
        }
    }

    #[test]
    fn reverse_is_bounded_too() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        let input = DriveInput {
            brake: 1.0,
            ..Default::default()
        };

        for _ in 0..60 {
            car.step(&input, &track, DT);
            assert!(car.speed >= car.config.max_reverse_speed);
        }
        assert!(car.speed < 0.0);

        // even from a corrupted state the integrator clamps back into range
        car.speed = 2.0 * car.config.max_reverse_speed;
        car.step(&input, &track, DT);
        assert_eq!(car.speed, car.config.max_reverse_speed);
    }

    #[test]
    fn engine_braking_decays_speed_toward_zero() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        for _ in 0..30 {
            car.step(&throttle(), &track, DT);
        }
        let launched = car.speed;
        assert!(launched > 0.0);

        let coast = DriveInput::default();
        let mut last = launched;
        for _ in 0..30 {
            car.step(&coast, &track, DT);
            assert!(car.speed <= last);
            last = car.speed;
        }
        assert!(car.speed < launched);
    }

    #[test]
    fn full_throttle_on_track_accelerates_monotonically() {
        let track = ring_track();
        let mut car = Vehicle::new(SimulationConfig::default(), track.start_pose);

        let mut last = 0.0;
        for _ in 0..60 {
            car.step(&throttle(), &track, DT);
            assert!(!car.off_track, "straight-line launch left the track");
            assert!(car.speed >= last);
            last = car.speed;
        }
        assert!(car.speed > 100.0);
    }

    #[test]
    fn display_speed_is_scaled_absolute_speed() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        let shown = car.step(&throttle(), &track, DT);
        assert!((shown - car.speed.abs() * SPEED_DISPLAY_SCALE).abs() < 1e-4);
    }

    #[test]
    fn fully_inside_annulus_reports_on_track() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        car.step(&DriveInput::default(), &track, DT);
        assert!(!car.off_track);
        assert_eq!(car.off_track_severity, 0.0);
        assert!(car.target_recovery_angle.is_none());
    }

    #[test]
    fn fully_outside_reports_off_track_with_max_severity() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(450.0, 0.0), FRAC_PI_2);
        car.step(&DriveInput::default(), &track, DT);
        assert!(car.off_track);
        assert_eq!(car.off_track_severity, 1.0);
        assert!(car.target_recovery_angle.is_some());
        assert!(car.colliding);
    }

    #[test]
    fn recovery_pulls_the_car_back_toward_the_annulus() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(420.0, 0.0), FRAC_PI_2);
        let start_distance = car.position.length();

        for _ in 0..240 {
            car.step(&DriveInput::default(), &track, DT);
            if !car.off_track {
                break;
            }
        }
        assert!(car.position.length() < start_distance);
        assert!(!car.off_track, "assist never recovered the car");
    }

    #[test]
    fn wedged_car_triggers_the_emergency_snap() {
        let track = ring_track();
        let wedged_at = Vec2::new(420.0, 0.0);
        let mut car = car_at(wedged_at, FRAC_PI_2);

        for _ in 0..150 {
            car.step(&DriveInput::default(), &track, DT);
            // hold the car in place, as if wedged against something
            car.position = wedged_at;
            car.speed = car.speed.min(1.0);
            if car.stuck_timer > car.config.emergency_stuck_time {
                break;
            }
        }

        assert!(car.stuck_timer > car.config.emergency_stuck_time);
        // one more tick runs the emergency branch with the timer over the line
        car.step(&DriveInput::default(), &track, DT);
        assert_eq!(car.speed, car.config.recovery_speed);

        let target = car.target_recovery_angle.expect("recovery target set");
        assert!(angle_delta(target - car.heading).abs() < 1e-4);
    }

    #[test]
    fn handbrake_at_speed_drops_grip_and_offsets_travel() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(225.0, 0.0), FRAC_PI_2);
        for _ in 0..60 {
            car.step(&throttle(), &track, DT);
        }
        assert!(car.speed > car.config.drift_speed_threshold);

        let input = DriveInput {
            throttle: 1.0,
            steering: 1.0,
            handbrake: true,
            ..Default::default()
        };
        // let the steering angle build up, then sample a drift tick
        for _ in 0..10 {
            car.step(&input, &track, DT);
        }
        assert!(car.drifting);
        assert!(
            (car.current_grip - car.config.grip * car.config.handbrake_grip_factor).abs()
                < 1e-5
        );

        let before = car.position;
        car.step(&input, &track, DT);
        let travel = (car.position - before).normalize();
        let nose = Vec2::new(car.heading.cos(), car.heading.sin());
        // travel direction lags behind where the nose points
        assert!(travel.dot(nose) < 0.9999);
    }

    #[test]
    fn stuck_timer_resets_once_back_on_track() {
        let track = ring_track();
        let mut car = car_at(Vec2::new(420.0, 0.0), FRAC_PI_2);
        for _ in 0..10 {
            car.step(&DriveInput::default(), &track, DT);
            car.position = Vec2::new(420.0, 0.0);
        }
        assert!(car.stuck_timer > 0.0);

        car.position = Vec2::new(225.0, 0.0);
        car.heading = FRAC_PI_2;
        car.speed = 0.0;
        car.step(&DriveInput::default(), &track, DT);
        assert_eq!(car.stuck_timer, 0.0);
        assert_eq!(car.off_track_timer, 0.0);
    }

    #[test]
    fn corners_span_the_body_rectangle() {
        let car = car_at(Vec2::ZERO, 0.0);
        let corners = car.corners();
        assert!((corners[0] - Vec2::new(20.0, 10.0)).length() < 1e-4);
        assert!((corners[2] - Vec2::new(-20.0, -10.0)).length() < 1e-4);
    }
}

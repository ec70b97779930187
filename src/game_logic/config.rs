/// Every tuned constant of the car model in one value object, passed to the
/// vehicle at construction instead of living as loose module globals.
///
/// The recovery thresholds encode game feel that was tuned by hand; they are
/// fields so a track or mode could override them, but the defaults are the
/// shipped values.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    // Body, world units
    pub length: f32,
    pub width: f32,
    pub wheelbase: f32,

    // Longitudinal dynamics, units/s and units/s^2
    pub max_speed: f32,
    pub max_reverse_speed: f32,
    pub accel_rate: f32,
    pub brake_force: f32,
    pub engine_brake_force: f32,

    // Steering
    pub max_steering_angle: f32,
    pub steering_response: f32,
    /// Turn response lost at max speed (0.2 = 20% understeer).
    pub understeer: f32,

    // Grip and drift
    pub grip: f32,
    pub drift_factor: f32,
    pub handbrake_grip_factor: f32,
    pub drift_speed_threshold: f32,

    // Off-track recovery
    pub off_track_drag: f32,
    pub assist_severity_threshold: f32,
    pub max_assist_influence: f32,
    pub recovery_pull_base: f32,
    pub rotation_assist_stuck_time: f32,
    pub emergency_stuck_time: f32,
    pub recovery_speed: f32,
    pub stuck_move_epsilon: f32,
    pub stuck_speed_epsilon: f32,

    // Collision flash shown by the renderer
    pub collision_cooldown: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            length: 40.0,
            width: 20.0,
            wheelbase: 18.0,

            max_speed: 350.0,
            max_reverse_speed: -100.0,
            accel_rate: 180.0,
            brake_force: 320.0,
            engine_brake_force: 60.0,

            max_steering_angle: 55.0_f32.to_radians(),
            steering_response: 5.5,
            understeer: 0.2,

            grip: 0.93,
            drift_factor: 0.75,
            handbrake_grip_factor: 0.25,
            drift_speed_threshold: 50.0,

            off_track_drag: 0.97,
            assist_severity_threshold: 0.25,
            max_assist_influence: 0.8,
            recovery_pull_base: 2.0,
            rotation_assist_stuck_time: 0.5,
            emergency_stuck_time: 1.5,
            recovery_speed: 30.0,
            stuck_move_epsilon: 1.0,
            stuck_speed_epsilon: 20.0,

            collision_cooldown: 0.2,
        }
    }
}

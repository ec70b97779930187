// Race format
pub const TOTAL_LAPS: u32 = 3;

// A stalled frame (tab in background, long hitch) must never integrate as one
// huge step or the car tunnels through boundaries and checkpoint lines.
pub const MAX_FRAME_DT: f32 = 0.1;

// World units/s to the km/h-style figure shown on the HUD
pub const SPEED_DISPLAY_SCALE: f32 = 3.6;

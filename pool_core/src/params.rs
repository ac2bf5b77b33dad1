/// Tuning parameters for an 8-ball table
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table (playing surface inside the rails)
    pub const TABLE_WIDTH: f32 = 2.16;
    pub const TABLE_LENGTH: f32 = 4.26;
    pub const POCKET_RADIUS: f32 = 0.12;

    // Balls
    pub const BALL_RADIUS: f32 = 0.07;
    pub const BALL_MASS: f32 = 1.0;
    pub const OBJECT_BALLS_PER_SUIT: u8 = 7;

    // Motion
    pub const DAMPING: f32 = 0.995; // Velocity retained per tick
    pub const STOP_SPEED: f32 = 0.01; // Per-axis speed snapped to zero
    pub const PLACEMENT_SPEED: f32 = 2.0;

    // Cue
    pub const MAX_CUE_OFFSET: f32 = 2.0;
    pub const CUE_CHARGE_SPEED: f32 = 2.0;

    // Rack indices
    pub const CUE_BALL_INDEX: u8 = 0;
    pub const EIGHT_BALL_INDEX: u8 = 5;

    // Physics
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent tunnelling after stalls
}

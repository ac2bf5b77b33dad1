use glam::{Vec2, Vec3};

/// Object-ball group; bound to a player by their first legal pot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Red,
    Yellow,
}

impl Suit {
    pub fn opposite(self) -> Self {
        match self {
            Suit::Red => Suit::Yellow,
            Suit::Yellow => Suit::Red,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Suit::Red => Rgb::RED,
            Suit::Yellow => Rgb::YELLOW,
        }
    }
}

/// Gameplay identity of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallKind {
    Cue,
    Eight,
    Object(Suit),
}

impl BallKind {
    /// Default render color for this kind
    pub fn color(self) -> Rgb {
        match self {
            BallKind::Cue => Rgb::CUE,
            BallKind::Eight => Rgb::EIGHT,
            BallKind::Object(suit) => suit.color(),
        }
    }
}

/// Render color; carries no gameplay meaning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const CUE: Rgb = Rgb::new(0.9, 0.9, 0.9);
    pub const EIGHT: Rgb = Rgb::new(0.2, 0.2, 0.2);
    pub const RED: Rgb = Rgb::new(0.86, 0.20, 0.21);
    pub const YELLOW: Rgb = Rgb::new(0.96, 0.76, 0.05);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Debug label, e.g. "cue_ball" or "ball3"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(pub String);

/// Fixed table index; the contact pipeline processes balls in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RackSlot(pub u8);

/// Drop the y component: all table physics happens in the (x, z) plane
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Ball component - kinematic state of one ball
///
/// A potted ball always has zero velocity; `set_potted` and `reset` are
/// the only ways in and out of that state.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    kind: BallKind,
    color: Rgb,
    center: Vec3,
    initial_center: Vec3,
    radius: f32,
    mass: f32,
    movement: Vec3,
    potted: bool,
}

impl Ball {
    pub fn new(kind: BallKind, center: Vec3, radius: f32, mass: f32) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self {
            kind,
            color: kind.color(),
            center,
            initial_center: center,
            radius,
            mass,
            movement: Vec3::ZERO,
            potted: false,
        }
    }

    pub fn kind(&self) -> BallKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn initial_center(&self) -> Vec3 {
        self.initial_center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn movement(&self) -> Vec3 {
        self.movement
    }

    pub fn is_potted(&self) -> bool {
        self.potted
    }

    pub fn is_moving(&self) -> bool {
        self.movement != Vec3::ZERO
    }

    pub fn is_cue(&self) -> bool {
        self.kind == BallKind::Cue
    }

    /// Advance one tick: integrate, damp, then snap slow balls to rest
    pub fn update(&mut self, dt: f32, damping: f32, stop_speed: f32) {
        if self.potted || dt <= 0.0 {
            return;
        }

        self.center += self.movement * dt;
        self.movement *= damping;

        if self.movement.x.abs() < stop_speed && self.movement.z.abs() < stop_speed {
            self.movement = Vec3::ZERO;
        }
    }

    /// Strike the ball; `distance` is signed shot power along `direction`
    pub fn cue_hit(&mut self, direction: Vec3, distance: f32) {
        if self.potted {
            return;
        }
        self.movement = Vec3::new(direction.x, 0.0, direction.z) * distance;
    }

    /// Bounce off a rail parallel to the z axis, backing out `offset` of penetration
    pub fn reflect_x(&mut self, offset: f32) {
        self.movement.x = -self.movement.x;
        self.center.x -= offset;
    }

    /// Bounce off a rail parallel to the x axis, backing out `offset` of penetration
    pub fn reflect_z(&mut self, offset: f32) {
        self.movement.z = -self.movement.z;
        self.center.z -= offset;
    }

    pub(crate) fn set_movement(&mut self, movement: Vec3) {
        if !self.potted {
            self.movement = Vec3::new(movement.x, 0.0, movement.z);
        }
    }

    pub fn set_potted(&mut self) {
        self.potted = true;
        self.movement = Vec3::ZERO;
    }

    /// Return to the initial center at rest (ball in hand)
    pub fn reset(&mut self) {
        self.center = self.initial_center;
        self.movement = Vec3::ZERO;
        self.potted = false;
    }

    // Placement moves: velocity-independent, only valid while placing the cue ball

    pub fn move_up(&mut self, dt: f32, speed: f32) {
        self.center.z -= dt * speed;
    }

    pub fn move_down(&mut self, dt: f32, speed: f32) {
        self.center.z += dt * speed;
    }

    pub fn move_left(&mut self, dt: f32, speed: f32) {
        self.center.x -= dt * speed;
    }

    pub fn move_right(&mut self, dt: f32, speed: f32) {
        self.center.x += dt * speed;
    }

    pub(crate) fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

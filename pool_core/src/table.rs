use glam::Vec3;

use crate::components::{Ball, BallKind, Suit};
use crate::config::Config;
use crate::systems::collision::Circle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketKind {
    Corner,
    Middle,
}

/// A pocket, treated by the collision engine as a static circle
#[derive(Debug, Clone, Copy)]
pub struct Pocket {
    pub label: &'static str,
    pub kind: PocketKind,
    pub center: Vec3,
    pub radius: f32,
}

impl Circle for Pocket {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn velocity(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Result of testing a ball against the four rails
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RailContact {
    /// Penetration past a rail at constant z (the short "top"/"bottom" rails)
    EndRail(f32),
    /// Penetration past a long rail at constant x
    SideRail(f32),
    /// Crossed a long rail inside a middle pocket mouth
    PocketMouth,
}

/// Static table geometry, centered on the origin
///
/// x spans the width, z spans the length. Pockets are symmetric about
/// both axes.
#[derive(Debug, Clone)]
pub struct Table {
    pub half_width: f32,
    pub half_length: f32,
    pub pocket_radius: f32,
    pub pockets: [Pocket; 6],
}

impl Table {
    pub fn new(config: &Config) -> Self {
        let half_width = config.half_width();
        let half_length = config.half_length();
        let r = config.pocket_radius;

        let pocket = |label, kind, x, z| Pocket {
            label,
            kind,
            center: Vec3::new(x, 0.0, z),
            radius: r,
        };

        Self {
            half_width,
            half_length,
            pocket_radius: r,
            pockets: [
                pocket("middle_left_pocket", PocketKind::Middle, -half_width - r, 0.0),
                pocket("lower_left_pocket", PocketKind::Corner, -half_width, half_length),
                pocket("upper_left_pocket", PocketKind::Corner, -half_width, -half_length),
                pocket("middle_right_pocket", PocketKind::Middle, half_width + r, 0.0),
                pocket("lower_right_pocket", PocketKind::Corner, half_width, half_length),
                pocket("upper_right_pocket", PocketKind::Corner, half_width, -half_length),
            ],
        }
    }

    /// Classify a ball against the rails; at most one contact per call
    ///
    /// End rails are checked before side rails. A ball crossing a long rail
    /// while `|z| + radius < pocket_radius` is inside a middle pocket mouth
    /// and falls in instead of bouncing.
    pub fn rail_contact(&self, center: Vec3, radius: f32) -> Option<RailContact> {
        let down = center.z + radius - self.half_length;
        let up = center.z - radius + self.half_length;
        let right = center.x + radius - self.half_width;
        let left = center.x - radius + self.half_width;
        let middle = center.z.abs() + radius < self.pocket_radius;

        if down > 0.0 {
            Some(RailContact::EndRail(down))
        } else if up < 0.0 {
            Some(RailContact::EndRail(up))
        } else if right > 0.0 && !middle {
            Some(RailContact::SideRail(right))
        } else if left < 0.0 && !middle {
            Some(RailContact::SideRail(left))
        } else if right > 0.0 || left < 0.0 {
            Some(RailContact::PocketMouth)
        } else {
            None
        }
    }

    /// Clamp a placement position to lie fully inside the rails
    pub fn clamp_inside(&self, center: Vec3, radius: f32) -> Vec3 {
        Vec3::new(
            center.x.clamp(-self.half_width + radius, self.half_width - radius),
            center.y,
            center.z.clamp(-self.half_length + radius, self.half_length - radius),
        )
    }

    /// z of the head string; the cue ball must stay behind it while breaking
    pub fn head_string(&self) -> f32 {
        self.half_length / 2.0
    }
}

/// One ball of the opening rack
#[derive(Debug, Clone)]
pub struct RackEntry {
    pub label: String,
    pub ball: Ball,
}

/// Opening layout, in table-index order
///
/// Index 0 is the cue ball on the head string, then a five-row triangle
/// with its apex at `-length / 5`. The middle of the third row (index 5)
/// is the eight ball; the rest alternate suits.
pub fn rack(config: &Config) -> Vec<RackEntry> {
    let r = config.ball_radius;
    let mass = config.ball_mass;
    let mut entries = Vec::with_capacity(16);

    entries.push(RackEntry {
        label: "cue_ball".to_string(),
        ball: Ball::new(
            BallKind::Cue,
            Vec3::new(0.0, r, config.table_length / 4.0),
            r,
            mass,
        ),
    });

    let row_offset = ((2.0 * r).powi(2) - r.powi(2)).sqrt();
    let mut row_start = Vec3::new(0.0, r, -config.table_length / 5.0);
    let mut count = 0;

    for row in 0..5 {
        for col in 0..=row {
            let center = row_start + Vec3::new(2.0 * r * col as f32, 0.0, 0.0);
            let (label, kind) = if row == 2 && col == 1 {
                ("black_ball".to_string(), BallKind::Eight)
            } else {
                let suit = if (count + row) % 2 == 0 {
                    Suit::Red
                } else {
                    Suit::Yellow
                };
                let label = format!("ball{count}");
                count += 1;
                (label, BallKind::Object(suit))
            };
            entries.push(RackEntry {
                label,
                ball: Ball::new(kind, center, r, mass),
            });
        }

        row_start.x -= r;
        row_start.z -= row_offset;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    fn table() -> Table {
        Table::new(&Config::new())
    }

    #[test]
    fn test_pockets_are_symmetric() {
        let table = table();
        for pocket in &table.pockets {
            let mirrored_x = Vec3::new(-pocket.center.x, 0.0, pocket.center.z);
            let mirrored_z = Vec3::new(pocket.center.x, 0.0, -pocket.center.z);
            assert!(
                table.pockets.iter().any(|p| p.center == mirrored_x),
                "{} has no mirror across x",
                pocket.label
            );
            assert!(
                table.pockets.iter().any(|p| p.center == mirrored_z),
                "{} has no mirror across z",
                pocket.label
            );
        }
        let middles = table
            .pockets
            .iter()
            .filter(|p| p.kind == PocketKind::Middle)
            .count();
        assert_eq!(middles, 2);
    }

    #[test]
    fn test_rail_contact_none_in_open_table() {
        assert_eq!(table().rail_contact(Vec3::ZERO, Params::BALL_RADIUS), None);
    }

    #[test]
    fn test_rail_contact_end_rails() {
        let table = table();
        let r = Params::BALL_RADIUS;
        let past_bottom = Vec3::new(0.0, r, table.half_length - r + 0.01);
        match table.rail_contact(past_bottom, r) {
            Some(RailContact::EndRail(offset)) => assert!((offset - 0.01).abs() < 1e-5),
            other => panic!("Expected bottom rail, got {:?}", other),
        }

        let past_top = Vec3::new(0.0, r, -table.half_length + r - 0.01);
        match table.rail_contact(past_top, r) {
            Some(RailContact::EndRail(offset)) => assert!((offset + 0.01).abs() < 1e-5),
            other => panic!("Expected top rail, got {:?}", other),
        }
    }

    #[test]
    fn test_rail_contact_side_rail_away_from_pocket() {
        let table = table();
        let r = Params::BALL_RADIUS;
        let center = Vec3::new(table.half_width - r + 0.01, r, 1.0);
        assert!(matches!(
            table.rail_contact(center, r),
            Some(RailContact::SideRail(_))
        ));
    }

    #[test]
    fn test_rail_contact_pocket_mouth_overrides_side_rail() {
        let table = table();
        let r = Params::BALL_RADIUS;
        // |z| + r < pocket radius
        let center = Vec3::new(-table.half_width + r - 0.01, r, 0.02);
        assert_eq!(
            table.rail_contact(center, r),
            Some(RailContact::PocketMouth)
        );
    }

    #[test]
    fn test_clamp_inside() {
        let table = table();
        let r = Params::BALL_RADIUS;
        let clamped = table.clamp_inside(Vec3::new(10.0, r, -10.0), r);
        assert_eq!(clamped.x, table.half_width - r);
        assert_eq!(clamped.z, -table.half_length + r);
    }

    #[test]
    fn test_rack_layout() {
        let rack = rack(&Config::new());
        assert_eq!(rack.len(), 16);
        assert_eq!(rack[Params::CUE_BALL_INDEX as usize].ball.kind(), BallKind::Cue);
        assert_eq!(
            rack[Params::EIGHT_BALL_INDEX as usize].ball.kind(),
            BallKind::Eight
        );
        assert_eq!(rack[5].label, "black_ball");

        let reds = rack
            .iter()
            .filter(|e| e.ball.kind() == BallKind::Object(Suit::Red))
            .count();
        let yellows = rack
            .iter()
            .filter(|e| e.ball.kind() == BallKind::Object(Suit::Yellow))
            .count();
        assert_eq!(reds, 7);
        assert_eq!(yellows, 7);
    }

    #[test]
    fn test_rack_balls_do_not_overlap() {
        let rack = rack(&Config::new());
        for (i, a) in rack.iter().enumerate() {
            for b in rack.iter().skip(i + 1) {
                let gap = a.ball.center().distance(b.ball.center());
                assert!(
                    gap >= 2.0 * Params::BALL_RADIUS - 1e-4,
                    "{} and {} overlap",
                    a.label,
                    b.label
                );
            }
        }
    }
}

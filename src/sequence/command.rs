//! Motion commands.

use serde::Deserialize;

use crate::motion::MotionProfile;

/// A single motion request for one axis.
///
/// Deserializes from externally tagged TOML tables:
/// `{ move_to = { position = 90.0 } }`,
/// `{ move_within = { position = 0.0, seconds = 2.0 } }`,
/// `{ spin = { velocity = -15.0 } }`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Move to a position at full speed.
    MoveTo {
        /// Target position.
        position: f32,
    },
    /// Move to a position, arriving after `seconds` if the limits allow.
    MoveWithin {
        /// Target position.
        position: f32,
        /// Requested move duration.
        seconds: f32,
    },
    /// Hold a constant velocity.
    Spin {
        /// Target velocity in units/sec.
        velocity: f32,
    },
}

impl Command {
    /// Hand this command to `profile`.
    ///
    /// Returns the deadline feasibility for [`Command::MoveWithin`] and
    /// `true` for everything else.
    pub fn apply(&self, profile: &mut MotionProfile) -> bool {
        match *self {
            Command::MoveTo { position } => {
                profile.set_target_position(position);
                true
            }
            Command::MoveWithin { position, seconds } => {
                profile.set_target_position_with_deadline(position, seconds)
            }
            Command::Spin { velocity } => {
                profile.set_target_velocity(velocity);
                true
            }
        }
    }

    /// Check whether `profile` has finished this command.
    ///
    /// Moves finish on arrival, a spin once the commanded velocity is reached.
    pub fn is_done(&self, profile: &MotionProfile) -> bool {
        match self {
            Command::MoveTo { .. } | Command::MoveWithin { .. } => profile.ready(),
            Command::Spin { .. } => profile.velocity() == profile.target().value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileLimits;
    use crate::motion::Target;

    fn profile() -> MotionProfile {
        MotionProfile::new(ProfileLimits::new(50.0, 50.0)).unwrap()
    }

    #[test]
    fn test_apply_sets_target() {
        let mut p = profile();

        assert!(Command::MoveTo { position: 12.0 }.apply(&mut p));
        assert_eq!(p.target(), Target::Position(12.0));

        assert!(Command::Spin { velocity: -80.0 }.apply(&mut p));
        assert_eq!(p.target(), Target::Velocity(-50.0));
    }

    #[test]
    fn test_apply_reports_deadline_feasibility() {
        let mut p = profile();
        assert!(Command::MoveWithin { position: 100.0, seconds: 10.0 }.apply(&mut p));

        p.reset(0.0);
        assert!(!Command::MoveWithin { position: 100.0, seconds: 1.0 }.apply(&mut p));
    }

    #[test]
    fn test_spin_done_at_speed() {
        let mut p = profile();
        let spin = Command::Spin { velocity: 5.0 };
        spin.apply(&mut p);
        assert!(!spin.is_done(&p));

        p.update(1.0);
        assert!(spin.is_done(&p));
        assert!(!p.ready());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_deserialize_tagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            commands: heapless::Vec<Command, 4>,
        }

        let toml_str = r#"
            commands = [
                { move_to = { position = 90.0 } },
                { move_within = { position = -90.0, seconds = 4.0 } },
                { spin = { velocity = 10.0 } },
            ]
        "#;

        let w: Wrapper = toml::from_str(toml_str).unwrap();
        assert_eq!(w.commands[0], Command::MoveTo { position: 90.0 });
        assert_eq!(w.commands[1], Command::MoveWithin { position: -90.0, seconds: 4.0 });
        assert_eq!(w.commands[2], Command::Spin { velocity: 10.0 });
    }
}

// src/resolver/mod.rs
//! Category resolution
//!
//! Maps symbolic continuous-signal tokens such as `"vel"` or `"markers"` to
//! the ordered channel labels the converter uses to label sub-columns.
//! Tokens are matched case-insensitively against a closed set of
//! [`Category`] variants. What happens to an unknown token is decided by the
//! caller's [`UnresolvedPolicy`].

pub mod events;

pub use events::{resolve_events, EventKind, ResolvedEvent};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, JOINT_NAMES, MUSCLE_NAMES};
use crate::config::{constants::fields, UnresolvedPolicy};
use crate::error::{SignalError, SignalResult};

/// Continuous signal categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Hand position (x, y)
    Pos,
    /// Hand velocity
    Vel,
    /// Hand acceleration
    Acc,
    /// Six-axis load cell
    Force,
    /// Motor control commands
    MotorControl,
    /// Motion tracking markers
    Markers,
    /// Arm model joint angles
    JointAng,
    /// Arm model joint velocities
    JointVel,
    /// Arm model muscle lengths
    MuscleLen,
    /// Arm model muscle velocities
    MuscleVel,
    /// Model hand position
    OpensimHandPos,
    /// Model hand velocity
    OpensimHandVel,
    /// Model hand acceleration
    OpensimHandAcc,
    /// Model elbow position
    OpensimElbowPos,
    /// Model elbow velocity
    OpensimElbowVel,
    /// Model elbow acceleration
    OpensimElbowAcc,
}

/// Groups of categories sharing a name table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    /// Position, velocity and acceleration
    Kinematics,
    /// Force and torque
    Kinetics,
    /// Motor control commands
    MotorControl,
    /// Motion tracking markers
    Markers,
    /// Arm model joints
    Joints,
    /// Arm model muscles
    Muscles,
    /// Model derived endpoint kinematics
    OpenSim,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 16] = [
        Category::Pos,
        Category::Vel,
        Category::Acc,
        Category::Force,
        Category::MotorControl,
        Category::Markers,
        Category::JointAng,
        Category::JointVel,
        Category::MuscleLen,
        Category::MuscleVel,
        Category::OpensimHandPos,
        Category::OpensimHandVel,
        Category::OpensimHandAcc,
        Category::OpensimElbowPos,
        Category::OpensimElbowVel,
        Category::OpensimElbowAcc,
    ];

    /// Canonical token
    pub fn name(self) -> &'static str {
        match self {
            Category::Pos => "pos",
            Category::Vel => "vel",
            Category::Acc => "acc",
            Category::Force => "force",
            Category::MotorControl => "motor_control",
            Category::Markers => "markers",
            Category::JointAng => "joint_ang",
            Category::JointVel => "joint_vel",
            Category::MuscleLen => "muscle_len",
            Category::MuscleVel => "muscle_vel",
            Category::OpensimHandPos => "opensim_hand_pos",
            Category::OpensimHandVel => "opensim_hand_vel",
            Category::OpensimHandAcc => "opensim_hand_acc",
            Category::OpensimElbowPos => "opensim_elbow_pos",
            Category::OpensimElbowVel => "opensim_elbow_vel",
            Category::OpensimElbowAcc => "opensim_elbow_acc",
        }
    }

    /// Family whose name table this category draws from
    pub fn family(self) -> CategoryFamily {
        match self {
            Category::Pos | Category::Vel | Category::Acc => CategoryFamily::Kinematics,
            Category::Force => CategoryFamily::Kinetics,
            Category::MotorControl => CategoryFamily::MotorControl,
            Category::Markers => CategoryFamily::Markers,
            Category::JointAng | Category::JointVel => CategoryFamily::Joints,
            Category::MuscleLen | Category::MuscleVel => CategoryFamily::Muscles,
            Category::OpensimHandPos
            | Category::OpensimHandVel
            | Category::OpensimHandAcc
            | Category::OpensimElbowPos
            | Category::OpensimElbowVel
            | Category::OpensimElbowAcc => CategoryFamily::OpenSim,
        }
    }

    /// Ordered channel labels for this category
    pub fn labels(self) -> Vec<String> {
        match self {
            Category::Pos => owned(&["x", "y"]),
            Category::Vel => owned(&["vx", "vy"]),
            Category::Acc => owned(&["ax", "ay"]),
            Category::Force => owned(&["fx", "fy", "fz", "mx", "my", "mz"]),
            Category::MotorControl => catalog::motor_control_names(),
            Category::Markers => catalog::marker_labels(),
            Category::JointAng => catalog::suffixed(&JOINT_NAMES, "_ang"),
            Category::JointVel => catalog::suffixed(&JOINT_NAMES, "_vel"),
            Category::MuscleLen => catalog::suffixed(&MUSCLE_NAMES, "_len"),
            Category::MuscleVel => catalog::suffixed(&MUSCLE_NAMES, "_muscVel"),
            Category::OpensimHandPos => opensim_axes("handPos"),
            Category::OpensimHandVel => opensim_axes("handVel"),
            Category::OpensimHandAcc => opensim_axes("handAcc"),
            Category::OpensimElbowPos => opensim_axes("elbowPos"),
            Category::OpensimElbowVel => opensim_axes("elbowVel"),
            Category::OpensimElbowAcc => opensim_axes("elbowAcc"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token with no matching category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signal category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token.to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name() == normalized)
            .ok_or_else(|| UnknownCategory(token.to_string()))
    }
}

/// A continuous-signal token together with its expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    /// Token as the caller wrote it; used as the output name
    pub token: String,
    /// `None` when the token did not match any category
    pub category: Option<Category>,
    /// Channel labels; empty for unresolved tokens
    pub labels: Vec<String>,
}

impl ResolvedCategory {
    /// Whether the token matched a category
    pub fn is_resolved(&self) -> bool {
        self.category.is_some()
    }
}

/// Labels for a single token; unknown tokens yield an empty sequence
pub fn resolve(token: &str) -> Vec<String> {
    token.parse::<Category>().map(Category::labels).unwrap_or_default()
}

/// Resolve every continuous-signal token in input order
pub fn resolve_categories(
    tokens: &[String],
    policy: UnresolvedPolicy,
) -> SignalResult<Vec<ResolvedCategory>> {
    tokens
        .iter()
        .map(|token| match token.parse::<Category>() {
            Ok(category) => {
                let labels = category.labels();
                tracing::debug!(token = %token, labels = labels.len(), "resolved signal category");
                Ok(ResolvedCategory {
                    token: token.clone(),
                    category: Some(category),
                    labels,
                })
            }
            Err(_) => {
                handle_unresolved(policy, fields::CONTINUOUS_NAMES, token)?;
                Ok(ResolvedCategory {
                    token: token.clone(),
                    category: None,
                    labels: Vec::new(),
                })
            }
        })
        .collect()
}

/// Apply the unresolved-token policy to one token
pub(crate) fn handle_unresolved(policy: UnresolvedPolicy, field: &str, token: &str) -> SignalResult<()> {
    match policy {
        UnresolvedPolicy::Ignore => Ok(()),
        UnresolvedPolicy::Warn => {
            tracing::warn!(field, token, "unresolved token, continuing without labels");
            Ok(())
        }
        UnresolvedPolicy::Error => Err(SignalError::UnresolvedCategory {
            field: field.to_string(),
            token: token.to_string(),
        }),
    }
}

fn opensim_axes(suffix: &str) -> Vec<String> {
    ["X", "Y", "Z"]
        .iter()
        .map(|axis| format!("{}_{}", axis, suffix))
        .collect()
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_kinematic_labels() {
        assert_eq!(resolve("pos"), vec!["x", "y"]);
        assert_eq!(resolve("vel"), vec!["vx", "vy"]);
        assert_eq!(resolve("acc"), vec!["ax", "ay"]);
        assert_eq!(resolve("force"), vec!["fx", "fy", "fz", "mx", "my", "mz"]);
    }

    #[test]
    fn test_case_insensitive_tokens() {
        assert_eq!(resolve("POS"), vec!["x", "y"]);
        assert_eq!("Motor_Control".parse::<Category>(), Ok(Category::MotorControl));
    }

    #[test]
    fn test_markers_expand_to_sorted_labels() {
        let labels = resolve("markers");
        assert_eq!(labels.len(), 30);
        assert!(labels.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_joint_and_muscle_suffixes() {
        let ang = resolve("joint_ang");
        assert_eq!(ang.len(), 7);
        assert_eq!(ang[0], "shoulder_adduction_ang");
        assert!(resolve("joint_vel").iter().all(|l| l.ends_with("_vel")));

        let len = resolve("muscle_len");
        assert_eq!(len.len(), 39);
        assert!(len.iter().all(|l| l.ends_with("_len")));
        assert_eq!(resolve("muscle_vel")[0], "abd_poll_longus_muscVel");
    }

    #[test]
    fn test_opensim_axes() {
        assert_eq!(resolve("opensim_hand_pos"), vec!["X_handPos", "Y_handPos", "Z_handPos"]);
        assert_eq!(resolve("opensim_elbow_acc"), vec!["X_elbowAcc", "Y_elbowAcc", "Z_elbowAcc"]);
    }

    #[test]
    fn test_unknown_token_resolves_empty() {
        assert!(resolve("gripforce").is_empty());
    }

    #[test]
    fn test_every_category_round_trips_name() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
            assert!(!category.labels().is_empty());
        }
    }

    #[test]
    fn test_resolve_categories_preserves_order() {
        let tokens = vec!["vel".to_string(), "pos".to_string()];
        let resolved = resolve_categories(&tokens, UnresolvedPolicy::Error).unwrap();

        assert_eq!(resolved[0].token, "vel");
        assert_eq!(resolved[1].category, Some(Category::Pos));
    }

    #[test]
    fn test_unresolved_policy() {
        let tokens = vec!["pos".to_string(), "gripforce".to_string()];

        let lenient = resolve_categories(&tokens, UnresolvedPolicy::Ignore).unwrap();
        assert!(!lenient[1].is_resolved());
        assert!(lenient[1].labels.is_empty());

        let warned = resolve_categories(&tokens, UnresolvedPolicy::Warn).unwrap();
        assert_eq!(warned, lenient);

        let err = resolve_categories(&tokens, UnresolvedPolicy::Error).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedCategory);
    }
}

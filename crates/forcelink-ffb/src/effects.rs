//! FFB effect types

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SPRING_COEFFICIENT, DEFAULT_SPRING_DEADBAND, DEFAULT_SPRING_OFFSET,
    DEFAULT_SPRING_SATURATION, NOMINAL_MAX,
};

/// Kinds of force feedback effects a session can provision
///
/// # Examples
///
/// ```
/// use forcelink_ffb::EffectKind;
///
/// assert_eq!(EffectKind::ConstantForce.to_string(), "constant force");
/// assert_ne!(EffectKind::ConstantForce, EffectKind::Spring);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EffectKind {
    /// Steady force of a given magnitude and direction.
    ConstantForce,
    /// Position-dependent restoring force.
    Spring,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::ConstantForce => write!(f, "constant force"),
            EffectKind::Spring => write!(f, "spring"),
        }
    }
}

/// Spring condition parameters for one axis, in device-native units
///
/// `Default` is the all-zero record a freshly enumerated axis starts with;
/// [`SpringCondition::provisioning_default`] is what a spring effect is
/// created with.
///
/// # Examples
///
/// ```
/// use forcelink_ffb::SpringCondition;
///
/// let spring = SpringCondition::provisioning_default();
/// assert_eq!(spring.positive_coefficient, 2000);
/// assert_eq!(spring.negative_saturation, 10000);
///
/// let stiff = spring.with_coefficients(8000).with_deadband(250);
/// assert_eq!(stiff.negative_coefficient, 8000);
/// assert_eq!(stiff.deadband, 250);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpringCondition {
    pub deadband: i32,
    pub offset: i32,
    pub negative_coefficient: i32,
    pub positive_coefficient: i32,
    pub negative_saturation: i32,
    pub positive_saturation: i32,
}

impl SpringCondition {
    /// The condition every axis is reset to when a spring is provisioned.
    pub const fn provisioning_default() -> Self {
        Self {
            deadband: DEFAULT_SPRING_DEADBAND,
            offset: DEFAULT_SPRING_OFFSET,
            negative_coefficient: DEFAULT_SPRING_COEFFICIENT,
            positive_coefficient: DEFAULT_SPRING_COEFFICIENT,
            negative_saturation: DEFAULT_SPRING_SATURATION,
            positive_saturation: DEFAULT_SPRING_SATURATION,
        }
    }

    pub fn with_deadband(mut self, deadband: i32) -> Self {
        self.deadband = deadband;
        self
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets both coefficients.
    pub fn with_coefficients(mut self, coefficient: i32) -> Self {
        self.negative_coefficient = coefficient;
        self.positive_coefficient = coefficient;
        self
    }

    /// Sets both saturations.
    pub fn with_saturation(mut self, saturation: i32) -> Self {
        self.negative_saturation = saturation;
        self.positive_saturation = saturation;
        self
    }

    /// Clamps every field into the range the driver accepts: offset and
    /// coefficients to `±NOMINAL_MAX`, deadband and saturations to
    /// `0..=NOMINAL_MAX`.
    #[must_use]
    pub fn clamped(self) -> Self {
        let signed = |v: i32| v.clamp(-NOMINAL_MAX, NOMINAL_MAX);
        let unsigned = |v: i32| v.clamp(0, NOMINAL_MAX);
        Self {
            deadband: unsigned(self.deadband),
            offset: signed(self.offset),
            negative_coefficient: signed(self.negative_coefficient),
            positive_coefficient: signed(self.positive_coefficient),
            negative_saturation: unsigned(self.negative_saturation),
            positive_saturation: unsigned(self.positive_saturation),
        }
    }
}

//! Device-native FFB constants and limits

/// Nominal maximum for effect magnitudes, coefficients and saturations
/// (DirectInput `DI_FFNOMINALMAX`).
pub const NOMINAL_MAX: i32 = 10_000;

/// Scale of one axis direction weight; a weight of `±DIRECTION_SCALE`
/// points fully along the positive/negative axis.
pub const DIRECTION_SCALE: i32 = NOMINAL_MAX;

/// Spring deadband applied when a spring effect is provisioned.
pub const DEFAULT_SPRING_DEADBAND: i32 = 0;

/// Spring center offset applied when a spring effect is provisioned.
pub const DEFAULT_SPRING_OFFSET: i32 = 0;

/// Spring coefficient (both directions) applied at provisioning.
pub const DEFAULT_SPRING_COEFFICIENT: i32 = 2_000;

/// Spring saturation (both directions) applied at provisioning.
pub const DEFAULT_SPRING_SATURATION: i32 = 10_000;

//! Session-level force feedback errors.

use core::fmt;

use forcelink_mapping::MappingError;

use crate::common::ErrorSeverity;
use crate::native::{NativeError, NativeOp, NativeStatus};

/// Lifecycle phase of an effect session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Native subsystem not started.
    #[default]
    Uninitialized,
    /// Subsystem started, no device acquired.
    Started,
    /// A device is acquired and effects may be provisioned.
    DeviceAcquired,
    /// The native library is unavailable; every operation is a no-op.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Uninitialized => write!(f, "uninitialized"),
            Phase::Started => write!(f, "started"),
            Phase::DeviceAcquired => write!(f, "device acquired"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// Errors surfaced by an effect session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FfbError {
    /// Native driver binary missing or unloadable. Latched by the session.
    #[error(
        "force feedback driver unavailable; ensure the DirectX end-user runtime and the \
         Visual C++ redistributable are installed"
    )]
    Unavailable,

    /// A native call returned a non-success status.
    #[error("{op} failed: {status}")]
    Device {
        /// The call that failed
        op: NativeOp,
        /// The native status code
        status: NativeStatus,
    },

    /// Operation attempted in a phase that does not support it.
    #[error("{op} is not valid while {phase}")]
    InvalidState {
        /// The attempted operation
        op: &'static str,
        /// The phase the session was in
        phase: Phase,
    },

    /// Acquisition requested for an id missing from the device catalog.
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    /// Degenerate or non-finite numeric mapping.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] MappingError),
}

impl FfbError {
    /// Builds the session error for a failed native call.
    pub fn native(op: NativeOp, err: NativeError) -> Self {
        match err {
            NativeError::Unavailable => FfbError::Unavailable,
            NativeError::Status(status) => FfbError::Device { op, status },
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(op: &'static str, phase: Phase) -> Self {
        FfbError::InvalidState { op, phase }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FfbError::Unavailable => ErrorSeverity::Critical,
            FfbError::Device {
                op: NativeOp::SetAutoCenter,
                ..
            } => ErrorSeverity::Warning,
            FfbError::Device { .. } => ErrorSeverity::Error,
            FfbError::InvalidState { .. } => ErrorSeverity::Warning,
            FfbError::UnknownDevice(_) => ErrorSeverity::Error,
            FfbError::Arithmetic(_) => ErrorSeverity::Error,
        }
    }

    /// Whether the failure leaves the session in its prior, lesser phase:
    /// subsystem start, core device acquisition, or driver unavailability.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FfbError::Unavailable
                | FfbError::Device {
                    op: NativeOp::StartSubsystem | NativeOp::AcquireDevice,
                    ..
                }
        )
    }

    /// The native status carried by a device error.
    pub fn native_status(&self) -> Option<NativeStatus> {
        match self {
            FfbError::Device { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcelink_ffb::EffectKind;

    #[test]
    fn test_native_conversion() {
        assert_eq!(
            FfbError::native(NativeOp::AcquireDevice, NativeError::Unavailable),
            FfbError::Unavailable
        );
        let err = FfbError::native(NativeOp::AcquireDevice, NativeError::Status(NativeStatus(-1)));
        assert_eq!(err.native_status(), Some(NativeStatus(-1)));
    }

    #[test]
    fn test_severity() {
        assert_eq!(FfbError::Unavailable.severity(), ErrorSeverity::Critical);
        let auto_center = FfbError::Device {
            op: NativeOp::SetAutoCenter,
            status: NativeStatus(-1),
        };
        assert_eq!(auto_center.severity(), ErrorSeverity::Warning);
        let create = FfbError::Device {
            op: NativeOp::CreateEffect(EffectKind::Spring),
            status: NativeStatus(-1),
        };
        assert_eq!(create.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_is_fatal() {
        let acquire = FfbError::Device {
            op: NativeOp::AcquireDevice,
            status: NativeStatus(-1),
        };
        assert!(acquire.is_fatal());
        let update = FfbError::Device {
            op: NativeOp::UpdateConstantForce,
            status: NativeStatus(-1),
        };
        assert!(!update.is_fatal());
        assert!(!FfbError::invalid_state("release", Phase::Failed).is_fatal());
    }

    #[test]
    fn test_phase_default() {
        assert_eq!(Phase::default(), Phase::Uninitialized);
    }
}

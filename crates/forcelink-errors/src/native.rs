//! Native driver status codes and call identifiers.
//!
//! Every call across the driver boundary returns a status. Zero is success;
//! anything else is a driver error code (an HRESULT on DirectInput).

use core::fmt;

use forcelink_ffb::EffectKind;

/// A raw status code returned by the native driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeStatus(pub i32);

impl NativeStatus {
    /// The success sentinel.
    pub const OK: NativeStatus = NativeStatus(0);

    /// `E_FAIL`, the generic failure.
    pub const GENERIC_FAILURE: NativeStatus = NativeStatus(0x8000_4005_u32 as i32);

    /// `DIERR_DEVICENOTREG`
    pub const DEVICE_NOT_REGISTERED: NativeStatus = NativeStatus(0x8004_0154_u32 as i32);

    /// `DIERR_NOTDOWNLOADED`
    pub const NOT_DOWNLOADED: NativeStatus = NativeStatus(0x8004_0203_u32 as i32);

    /// `DIERR_NOTACQUIRED`
    pub const NOT_ACQUIRED: NativeStatus = NativeStatus(0x8007_000C_u32 as i32);

    /// `DIERR_NOTINITIALIZED`
    pub const NOT_INITIALIZED: NativeStatus = NativeStatus(0x8007_0015_u32 as i32);

    /// `DIERR_INVALIDPARAM`
    pub const INVALID_PARAM: NativeStatus = NativeStatus(0x8007_0057_u32 as i32);

    /// The raw code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Whether this is the success sentinel.
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Converts a raw code into a result, for driver shims.
    ///
    /// ```
    /// use forcelink_errors::{NativeError, NativeStatus};
    ///
    /// assert!(NativeStatus::check(0).is_ok());
    /// assert_eq!(
    ///     NativeStatus::check(-5),
    ///     Err(NativeError::Status(NativeStatus(-5)))
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::Status`] for any non-zero code.
    pub fn check(code: i32) -> Result<(), NativeError> {
        if code == 0 {
            Ok(())
        } else {
            Err(NativeError::Status(NativeStatus(code)))
        }
    }

    /// Static description of well-known DirectInput codes.
    pub fn describe(self) -> Option<&'static str> {
        let text = match self.0 as u32 {
            0 => "success",
            0x8000_4001 => "function not supported",
            0x8000_4005 => "unspecified failure",
            0x8004_0154 => "device is not registered",
            0x8004_0201 => "device is full",
            0x8004_0203 => "effect not downloaded",
            0x8004_0204 => "device still has effects",
            0x8004_0205 => "device not exclusively acquired",
            0x8004_0206 => "effect parameters incomplete",
            0x8004_0208 => "effect is playing",
            0x8004_0209 => "device unplugged",
            0x8007_0005 => "another application has priority",
            0x8007_0006 => "invalid handle",
            0x8007_000C => "device not acquired",
            0x8007_000E => "out of memory",
            0x8007_0015 => "object not initialized",
            0x8007_001E => "input lost",
            0x8007_0057 => "invalid parameter",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for NativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)?;
        if let Some(text) = self.describe() {
            write!(f, " ({text})")?;
        }
        Ok(())
    }
}

/// Failure of a single native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    /// The driver library could not be loaded.
    #[error("native force feedback library unavailable")]
    Unavailable,

    /// The driver returned a non-success status.
    #[error("native status {0}")]
    Status(NativeStatus),
}

/// Result of a native driver call.
pub type NativeResult<T = ()> = Result<T, NativeError>;

/// Identifies which native call produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeOp {
    /// Loading and initialising the FFB subsystem.
    StartSubsystem,
    /// Unacquiring the device and shutting the subsystem down.
    StopSubsystem,
    /// Listing attached FFB-capable devices.
    EnumerateDevices,
    /// Acquiring a device for exclusive FFB access.
    AcquireDevice,
    /// Toggling the device's built-in auto-center spring.
    SetAutoCenter,
    /// Listing the acquired device's force axes.
    EnumerateAxes,
    /// Creating an effect of the given kind.
    CreateEffect(EffectKind),
    /// Updating constant-force magnitude and direction.
    UpdateConstantForce,
    /// Updating the per-axis spring conditions.
    UpdateSpringConditions,
    /// Setting the gain of one effect.
    SetEffectGain(EffectKind),
    /// Starting every created effect.
    StartAllEffects,
    /// Stopping every created effect.
    StopAllEffects,
}

impl fmt::Display for NativeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeOp::StartSubsystem => write!(f, "start subsystem"),
            NativeOp::StopSubsystem => write!(f, "stop subsystem"),
            NativeOp::EnumerateDevices => write!(f, "enumerate devices"),
            NativeOp::AcquireDevice => write!(f, "acquire device"),
            NativeOp::SetAutoCenter => write!(f, "set auto-center"),
            NativeOp::EnumerateAxes => write!(f, "enumerate axes"),
            NativeOp::CreateEffect(kind) => write!(f, "create {kind} effect"),
            NativeOp::UpdateConstantForce => write!(f, "update constant force"),
            NativeOp::UpdateSpringConditions => write!(f, "update spring conditions"),
            NativeOp::SetEffectGain(kind) => write!(f, "set {kind} gain"),
            NativeOp::StartAllEffects => write!(f, "start all effects"),
            NativeOp::StopAllEffects => write!(f, "stop all effects"),
        }
    }
}

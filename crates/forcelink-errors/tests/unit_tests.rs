//! Unit tests for error display, classification and conversions.

use forcelink_errors::prelude::*;
use forcelink_ffb::EffectKind;
use forcelink_mapping::MappingError;

mod display_tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        insta::assert_snapshot!(
            FfbError::Unavailable.to_string(),
            @"force feedback driver unavailable; ensure the DirectX end-user runtime and the Visual C++ redistributable are installed"
        );
    }

    #[test]
    fn test_device_error_display() {
        let err = FfbError::Device {
            op: NativeOp::CreateEffect(EffectKind::ConstantForce),
            status: NativeStatus(0x8004_0201_u32 as i32),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"create constant force effect failed: 0x80040201 (device is full)"
        );
    }

    #[test]
    fn test_invalid_state_display() {
        let err = FfbError::invalid_state("discover devices", Phase::Uninitialized);
        insta::assert_snapshot!(err.to_string(), @"discover devices is not valid while uninitialized");
    }

    #[test]
    fn test_arithmetic_from_mapping() {
        let err: FfbError = MappingError::DegenerateRange { value: 1.0 }.into();
        assert!(matches!(err, FfbError::Arithmetic(_)));
        assert!(err.to_string().starts_with("arithmetic error"));
    }

    #[test]
    fn test_std_error_impl() {
        let err = FfbError::UnknownDevice("{guid}".to_string());
        let _: &dyn std::error::Error = &err;
        let native = NativeError::Unavailable;
        let _: &dyn std::error::Error = &native;
    }
}

mod classification_tests {
    use super::*;

    #[test]
    fn test_every_native_op_maps_through() {
        let ops = [
            NativeOp::StartSubsystem,
            NativeOp::StopSubsystem,
            NativeOp::EnumerateDevices,
            NativeOp::AcquireDevice,
            NativeOp::SetAutoCenter,
            NativeOp::EnumerateAxes,
            NativeOp::CreateEffect(EffectKind::Spring),
            NativeOp::UpdateConstantForce,
            NativeOp::UpdateSpringConditions,
            NativeOp::SetEffectGain(EffectKind::ConstantForce),
            NativeOp::StartAllEffects,
            NativeOp::StopAllEffects,
        ];
        for op in ops {
            let err = FfbError::native(op, NativeError::Status(NativeStatus(-7)));
            assert_eq!(err.native_status(), Some(NativeStatus(-7)));
            assert!(!op.to_string().is_empty());
            assert_eq!(FfbError::native(op, NativeError::Unavailable), FfbError::Unavailable);
        }
    }

    #[test]
    fn test_only_core_failures_are_fatal() {
        let fatal = [NativeOp::StartSubsystem, NativeOp::AcquireDevice];
        for op in fatal {
            assert!(FfbError::native(op, NativeError::Status(NativeStatus(-1))).is_fatal());
        }
        let non_fatal = [
            NativeOp::SetAutoCenter,
            NativeOp::EnumerateAxes,
            NativeOp::CreateEffect(EffectKind::ConstantForce),
            NativeOp::UpdateSpringConditions,
        ];
        for op in non_fatal {
            assert!(!FfbError::native(op, NativeError::Status(NativeStatus(-1))).is_fatal());
        }
        assert!(FfbError::Unavailable.is_fatal());
    }

    #[test]
    fn test_check_round_trip_of_codes() {
        assert_eq!(NativeStatus::check(0), Ok(()));
        assert_eq!(
            NativeStatus::check(1),
            Err(NativeError::Status(NativeStatus(1)))
        );
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nonzero_codes_never_check_ok(code in any::<i32>().prop_filter("non-zero", |c| *c != 0)) {
            prop_assert!(NativeStatus::check(code).is_err());
            prop_assert!(!NativeStatus(code).is_ok());
        }

        #[test]
        fn status_display_always_has_hex_prefix(code in any::<i32>()) {
            let text = NativeStatus(code).to_string();
            prop_assert!(text.starts_with("0x"));
            prop_assert!(text.len() >= 10);
        }
    }
}

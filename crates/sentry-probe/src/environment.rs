// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Environment facade.
//!
//! The host-facing entry points: a simulated-environment query and the
//! composite compromise verdict. Simulated/emulated environments are
//! categorically trusted - the jailbreak heuristics are meaningless on
//! development hosts and would actively mislead there.

use crate::backends::{HostProbeConfig, ProbeBackends};
use crate::detector::JailbreakDetector;

/// Emulator marker files (QEMU pipes/sockets, Genymotion baseband).
#[cfg(target_os = "android")]
const EMULATOR_MARKER_FILES: &[&str] = &[
    "/dev/socket/qemud",
    "/dev/qemu_pipe",
    "/sys/qemu_trace",
    "/system/bin/qemu-props",
    "/dev/socket/baseband_genyd",
];

/// Whether the current process runs in a simulated/emulated device
/// environment. Build-time-fixed on iOS (simulator targets carry the `sim`
/// ABI); on Android determined from emulator marker files; desktop targets
/// are development hosts and always count as simulated.
pub fn is_simulated_environment() -> bool {
    #[cfg(all(target_os = "ios", target_abi = "sim"))]
    {
        return true;
    }

    #[cfg(all(target_os = "ios", not(target_abi = "sim")))]
    {
        return false;
    }

    #[cfg(target_os = "android")]
    {
        EMULATOR_MARKER_FILES
            .iter()
            .any(|path| std::path::Path::new(path).exists())
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        true
    }
}

/// Composite verdict over live backends configured by the host. Re-runs
/// every check on each call; `is_simulated_environment()` is consulted
/// fresh.
pub fn is_compromised_with(host: HostProbeConfig) -> bool {
    let detector = JailbreakDetector::new(ProbeBackends::live(host));
    detector.is_jailbroken(is_simulated_environment())
}

/// Composite verdict with no host-supplied capabilities. The single entry
/// point a host calls to decide whether to disable sensitive features.
pub fn is_compromised() -> bool {
    is_compromised_with(HostProbeConfig::default())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Device Sentry - Jailbreak Detection Core
//!
//! Heuristic device-integrity probe for mobile hosts. Estimates whether the
//! underlying OS has been jailbroken so the hosting application can degrade
//! sensitive features. Three independent checks (custom URL-scheme probe,
//! suspicious-file probe, sandbox-escape write test) run behind an injected
//! probe-backend boundary, which keeps the engine fully unit-testable
//! without a physical device.
//!
//! This is a best-effort advisory signal, not a security boundary: it
//! performs no code-integrity verification and will not resist a determined
//! adversary.

mod backends;
mod detector;
mod environment;
mod paths;

pub use backends::{HostProbeConfig, ProbeBackends, SchemeQueryFn};
pub use detector::{
    JailbreakDetectionResult, JailbreakDetector, DEFAULT_URL_SCHEME, DEFAULT_WRITE_TEST_PATH,
};
pub use environment::{is_compromised, is_compromised_with, is_simulated_environment};

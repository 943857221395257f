// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Detection engine.
//!
//! Composes the three jailbreak heuristics over an injected
//! [`ProbeBackends`] bundle. Checks run left-to-right with short-circuit
//! evaluation: URL scheme, suspicious files, sandbox write. Simulated
//! environments are categorically trusted and never probed - the heuristics
//! are meaningless there and would produce false positives on development
//! hosts.

use serde::{Deserialize, Serialize};

use crate::backends::ProbeBackends;
use crate::paths::{decode_path, SUSPICIOUS_PATHS};

/// Probe scheme used when the host configures no override.
pub const DEFAULT_URL_SCHEME: &str = "cydia";

/// Write-test target used when no override path is configured. Outside the
/// app sandbox on the target platforms; a successful write there means the
/// sandbox is not enforced.
pub const DEFAULT_WRITE_TEST_PATH: &str = "/private/monkey_write_test";

const URL_SCHEME_CHECK: &str = "URL_SCHEME_CHECK";
const SUSPICIOUS_FILE_CHECK: &str = "SUSPICIOUS_FILE_CHECK";
const SANDBOX_WRITE_CHECK: &str = "SANDBOX_WRITE_CHECK";

/// Jailbreak detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JailbreakDetectionResult {
    pub is_jailbroken: bool,
    /// Name of the first check that fired, if any. At most one entry with
    /// short-circuit evaluation.
    pub detection_methods: Vec<String>,
}

/// The heuristic engine. Holds the injected backends and the write-test
/// path; no state persists between calls.
pub struct JailbreakDetector {
    backends: ProbeBackends,
    write_test_path: String,
}

impl JailbreakDetector {
    pub fn new(backends: ProbeBackends) -> Self {
        Self::with_write_test_path(backends, DEFAULT_WRITE_TEST_PATH)
    }

    pub fn with_write_test_path(backends: ProbeBackends, write_test_path: impl Into<String>) -> Self {
        JailbreakDetector {
            backends,
            write_test_path: write_test_path.into(),
        }
    }

    /// The URL scheme to probe: the configured override, trimmed of leading
    /// and trailing whitespace (including newlines), or `"cydia"` when the
    /// override is absent or blank.
    pub fn resolved_url_scheme(&self) -> String {
        if let Some(configured) = (self.backends.configured_scheme)() {
            let trimmed = configured.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
        DEFAULT_URL_SCHEME.to_string()
    }

    /// Whether the OS claims a handler for `<scheme>://`. A URI that fails
    /// to parse yields `false` without consulting the backend.
    pub fn has_jailbreak_url_scheme(&self) -> bool {
        let uri = format!("{}://", self.resolved_url_scheme());
        if url::Url::parse(&uri).is_err() {
            return false;
        }
        (self.backends.can_handle_scheme)(&uri)
    }

    /// Probe the suspicious path table in table order, decoding each entry
    /// on demand. Returns on the first hit; on the all-clear path every
    /// entry is queried exactly once.
    pub fn has_suspicious_files(&self) -> bool {
        for entry in SUSPICIOUS_PATHS {
            let decoded = decode_path(entry);
            if (self.backends.path_exists)(&decoded) {
                log::debug!("suspicious file present: {}", decoded);
                return true;
            }
        }
        false
    }

    /// Sandbox-escape write test at the configured path.
    pub fn can_write_outside_sandbox(&self) -> bool {
        (self.backends.write_and_remove)(&self.write_test_path)
    }

    /// Run the checks and report which one fired. Simulated environments
    /// return a clean result without touching any backend.
    pub fn detect(&self, is_simulated: bool) -> JailbreakDetectionResult {
        if is_simulated {
            return JailbreakDetectionResult {
                is_jailbroken: false,
                detection_methods: Vec::new(),
            };
        }

        let mut detection_methods = Vec::new();
        if self.has_jailbreak_url_scheme() {
            detection_methods.push(URL_SCHEME_CHECK.to_string());
        } else if self.has_suspicious_files() {
            detection_methods.push(SUSPICIOUS_FILE_CHECK.to_string());
        } else if self.can_write_outside_sandbox() {
            detection_methods.push(SANDBOX_WRITE_CHECK.to_string());
        }

        if let Some(method) = detection_methods.first() {
            log::debug!("jailbreak indicator: {}", method);
        }

        JailbreakDetectionResult {
            is_jailbroken: !detection_methods.is_empty(),
            detection_methods,
        }
    }

    /// Composite verdict: OR of the three checks, short-circuited.
    pub fn is_jailbroken(&self, is_simulated: bool) -> bool {
        self.detect(is_simulated).is_jailbroken
    }
}

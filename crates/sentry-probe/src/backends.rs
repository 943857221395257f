// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Probe backends.
//!
//! Every environment interaction of the detection engine goes through an
//! injected capability bundle instead of direct platform calls. Production
//! uses [`ProbeBackends::live`]; tests substitute closures freely. A backend
//! never errors: any platform failure is absorbed here and reported as
//! `false` ("no evidence found").

use std::fs;
use std::path::Path;

/// Host callback answering whether the OS can handle a URI
/// (the `canOpenURL` analogue).
pub type SchemeQueryFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Values only the host process can supply to the live backends.
///
/// Capabilities left unset fall back to "no evidence": a missing
/// `scheme_query` makes the URL-scheme check report `false`, it never
/// errors.
#[derive(Default)]
pub struct HostProbeConfig {
    /// Configuration value overriding the default probe URL scheme
    /// (read by the host from its manifest/resources).
    pub url_scheme_override: Option<String>,
    /// Host callback for the URL-scheme probe.
    pub scheme_query: Option<SchemeQueryFn>,
}

/// Capability bundle the detection engine runs against.
///
/// One closure per platform query. All four are always present; construct
/// via the live factory or as a struct literal in tests.
pub struct ProbeBackends {
    /// Read the configured URL-scheme override, if any.
    pub configured_scheme: Box<dyn Fn() -> Option<String> + Send + Sync>,
    /// Whether the OS can handle the given URI.
    pub can_handle_scheme: Box<dyn Fn(&str) -> bool + Send + Sync>,
    /// Whether the given filesystem path exists.
    pub path_exists: Box<dyn Fn(&str) -> bool + Send + Sync>,
    /// Attempt a write+delete at the given path; `true` iff the write
    /// succeeded.
    pub write_and_remove: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl ProbeBackends {
    /// Production backends.
    ///
    /// Filesystem probes run natively; the scheme value and the scheme
    /// query come from the host via `config`.
    pub fn live(config: HostProbeConfig) -> Self {
        let HostProbeConfig {
            url_scheme_override,
            scheme_query,
        } = config;

        ProbeBackends {
            configured_scheme: Box::new(move || url_scheme_override.clone()),
            can_handle_scheme: scheme_query.unwrap_or_else(|| Box::new(|_| false)),
            path_exists: Box::new(|path| Path::new(path).exists()),
            write_and_remove: Box::new(write_probe),
        }
    }
}

/// Sandbox-escape write probe: create a small file at `path`, then
/// best-effort delete it. Success of the initial write alone signals `true`;
/// the delete outcome is ignored and any I/O error maps to `false`.
fn write_probe(path: &str) -> bool {
    match fs::write(path, b".") {
        Ok(()) => {
            let _ = fs::remove_file(path);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_probe_succeeds_in_writable_dir_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe_write_test");
        let path_str = path.to_str().unwrap();

        assert!(write_probe(path_str));
        // The probe file must not be left behind.
        assert!(!path.exists());
    }

    #[test]
    fn write_probe_fails_for_nonexistent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("probe_write_test");

        assert!(!write_probe(path.to_str().unwrap()));
    }

    #[test]
    fn live_backends_without_scheme_query_report_unhandled() {
        let backends = ProbeBackends::live(HostProbeConfig::default());

        assert!(!(backends.can_handle_scheme)("cydia://"));
        assert_eq!((backends.configured_scheme)(), None);
    }

    #[test]
    fn live_backends_plumb_host_values() {
        let backends = ProbeBackends::live(HostProbeConfig {
            url_scheme_override: Some("sileo".to_string()),
            scheme_query: Some(Box::new(|uri| uri == "sileo://")),
        });

        assert_eq!((backends.configured_scheme)(), Some("sileo".to_string()));
        assert!((backends.can_handle_scheme)("sileo://"));
        assert!(!(backends.can_handle_scheme)("cydia://"));
    }

    #[test]
    fn live_path_exists_checks_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        fs::write(&present, b".").unwrap();

        let backends = ProbeBackends::live(HostProbeConfig::default());
        assert!((backends.path_exists)(present.to_str().unwrap()));
        assert!(!(backends.path_exists)(
            dir.path().join("absent").to_str().unwrap()
        ));
    }
}

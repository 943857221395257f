// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Device Sentry - JNI Host Binding
//!
//! Exposes the jailbreak detection engine to the host application. The host
//! supplies what only it can answer: the configured URL-scheme override and
//! the result of its `canOpenURL`-analogue query for the resolved scheme
//! (resolve the scheme via `nativeResolveUrlScheme` first, then pass the
//! query result to `nativeDetectJailbreak`). Results cross the boundary as
//! JSON; every JNI or serialization failure falls back to a safe "not
//! jailbroken" payload, never an exception.

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jstring};
use jni::JNIEnv;

use sentry_probe::{HostProbeConfig, JailbreakDetectionResult, JailbreakDetector, ProbeBackends};

#[cfg(target_os = "android")]
use android_logger::Config;
#[cfg(target_os = "android")]
use log::LevelFilter;

const FALLBACK_JSON: &str = r#"{"is_jailbroken":false,"detection_methods":[]}"#;

/// Run detection with the host-supplied values.
pub fn detect_jailbreak(
    url_scheme_override: Option<String>,
    scheme_handled: bool,
    is_simulator: bool,
) -> JailbreakDetectionResult {
    let host = HostProbeConfig {
        url_scheme_override,
        scheme_query: Some(Box::new(move |_uri| scheme_handled)),
    };
    let detector = JailbreakDetector::new(ProbeBackends::live(host));
    detector.detect(is_simulator)
}

/// The scheme the host should query its URL-handling API for.
pub fn resolve_url_scheme(url_scheme_override: Option<String>) -> String {
    let host = HostProbeConfig {
        url_scheme_override,
        scheme_query: None,
    };
    let detector = JailbreakDetector::new(ProbeBackends::live(host));
    detector.resolved_url_scheme()
}

fn read_optional_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.to_string_lossy().to_string()),
        Err(_) => None,
    }
}

fn to_jstring(env: &JNIEnv, value: &str) -> jstring {
    match env.new_string(value) {
        Ok(jstr) => jstr.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Initialize logging for Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn Java_io_devicesentry_core_security_jailbreak_RustJailbreakDetector_nativeInit(
    _env: JNIEnv,
    _class: JClass,
) {
    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag("RustJailbreakDetector"),
    );
}

#[cfg(not(target_os = "android"))]
#[no_mangle]
pub extern "C" fn Java_io_devicesentry_core_security_jailbreak_RustJailbreakDetector_nativeInit(
    _env: JNIEnv,
    _class: JClass,
) {
    // No-op for non-Android platforms
}

/// Resolve the probe URL scheme - JNI entry point
///
/// Returns the scheme (override or default) the host should pass to its
/// URL-handling query before calling `nativeDetectJailbreak`.
#[no_mangle]
pub extern "C" fn Java_io_devicesentry_core_security_jailbreak_RustJailbreakDetector_nativeResolveUrlScheme(
    mut env: JNIEnv,
    _class: JClass,
    configured_scheme: JString,
) -> jstring {
    let override_value = read_optional_string(&mut env, &configured_scheme);
    let scheme = resolve_url_scheme(override_value);
    to_jstring(&env, &scheme)
}

/// Detect jailbreak - JNI entry point
///
/// Returns JSON string with JailbreakDetectionResult
/// Note: the URL-handling query is done in the host layer; Rust focuses on
/// file system checks.
#[no_mangle]
pub extern "C" fn Java_io_devicesentry_core_security_jailbreak_RustJailbreakDetector_nativeDetectJailbreak(
    mut env: JNIEnv,
    _class: JClass,
    configured_scheme: JString,
    scheme_handled: jboolean,
    is_simulator: jboolean,
) -> jstring {
    let override_value = read_optional_string(&mut env, &configured_scheme);

    let result = detect_jailbreak(override_value, scheme_handled != 0, is_simulator != 0);

    match serde_json::to_string(&result) {
        Ok(json) => to_jstring(&env, &json),
        Err(_) => to_jstring(&env, FALLBACK_JSON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_payload_matches_the_result_shape() {
        let parsed: JailbreakDetectionResult = serde_json::from_str(FALLBACK_JSON).unwrap();
        assert!(!parsed.is_jailbroken);
        assert!(parsed.detection_methods.is_empty());
    }

    #[test]
    fn simulator_flag_short_circuits_detection() {
        let result = detect_jailbreak(None, true, true);
        assert!(!result.is_jailbroken);
    }

    #[test]
    fn host_scheme_query_drives_the_verdict() {
        let result = detect_jailbreak(None, true, false);
        assert!(result.is_jailbroken);
        assert_eq!(result.detection_methods, vec!["URL_SCHEME_CHECK"]);
    }

    #[test]
    fn resolves_override_and_default_schemes() {
        assert_eq!(resolve_url_scheme(Some("  sileo\n".to_string())), "sileo");
        assert_eq!(resolve_url_scheme(None), "cydia");
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Device Sentry

//! Suspicious path table.
//!
//! Files and directories characteristic of a jailbroken OS: package manager
//! apps, substrate libraries, SSH binaries, apt artifacts. The literals are
//! stored character-reversed so a static string scan of the binary does not
//! reveal them; entries are decoded on demand per check, never eagerly at
//! load time. The table is data - updating it must not touch the engine.

/// Obfuscated (character-reversed) path literals, in probe order.
pub(crate) const SUSPICIOUS_PATHS: &[&str] = &[
    "ppa.aidyC/snoitacilppA/",
    "ppa.n1arkcalb/snoitacilppA/",
    "ppa.reirraCekaF/snoitacilppA/",
    "ppa.rev0cnu/snoitacilppA/",
    "bilyd.etartsbuSeliboM/etartsbuSeliboM/yrarbiL/",
    "tsilp.putratS.aidyC.kiruas.moc/snomeaDhcnuaL/yrarbiL/",
    "tpa/bil/rav/etavirp/",
    "hsats/rav/etavirp/",
    "gol.aidyc/pmt/rav/etavirp/",
    "ofni/aidyc/bil/rav/etavirp/",
    "semehT/sgnitteSBS/yrarbiL/elibom/rav/etavirp/",
    "dhss/nibs/rsu/",
    "ngisyek-hss/cexebil/rsu/",
    "hsab/nib/",
    "tpa/cte/",
    "hss/nib/rsu/",
];

/// Decode one table entry. Pure character reversal; idempotent when applied
/// twice.
pub(crate) fn decode_path(obfuscated: &str) -> String {
    obfuscated.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_entries() {
        assert_eq!(decode_path(SUSPICIOUS_PATHS[0]), "/Applications/Cydia.app");
        assert_eq!(decode_path(SUSPICIOUS_PATHS[11]), "/usr/sbin/sshd");
        assert_eq!(decode_path(SUSPICIOUS_PATHS[15]), "/usr/bin/ssh");
    }

    #[test]
    fn double_reversal_restores_the_literal() {
        for entry in SUSPICIOUS_PATHS {
            assert_eq!(decode_path(&decode_path(entry)), *entry);
        }
    }

    #[test]
    fn every_decoded_entry_is_an_absolute_path() {
        for entry in SUSPICIOUS_PATHS {
            assert!(decode_path(entry).starts_with('/'));
        }
    }
}

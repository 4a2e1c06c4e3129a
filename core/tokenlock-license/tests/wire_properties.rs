//! Property-based tests for the license wire format.

use chrono::DateTime;
use proptest::prelude::*;
use tokenlock_license::{Expiry, License, LicenseTerms};

fn ascii_id() -> impl Strategy<Value = String> {
    prop::string::string_regex("[\\x20-\\x7E]{1,40}").unwrap()
}

fn expiry() -> impl Strategy<Value = Expiry> {
    prop_oneof![
        Just(Expiry::Lifelong),
        (0i64..8_000_000_000_000).prop_map(|s| Expiry::at(DateTime::from_timestamp(s, 0).unwrap())),
    ]
}

proptest! {
    #[test]
    fn raw_roundtrip(issuer in ascii_id(), machine in ascii_id(), until in expiry()) {
        let license = License::from(LicenseTerms::new(issuer.clone(), machine.clone(), until));
        let restored = License::from_raw_license(&license.raw_license()).unwrap();
        prop_assert_eq!(restored.issuer_id(), issuer.as_str());
        prop_assert_eq!(restored.machine_id(), machine.as_str());
        prop_assert_eq!(restored.valid_until(), until);
    }

    #[test]
    fn signed_roundtrip(
        issuer in ascii_id(),
        machine in ascii_id(),
        until in expiry(),
        signature in prop::collection::vec(any::<u8>(), 1..80),
    ) {
        let license = License::Signed {
            terms: LicenseTerms::new(issuer, machine, until),
            signature,
        };
        let restored = License::from_signed_license(&license.signed_license().unwrap()).unwrap();
        prop_assert_eq!(restored, license);
    }

    #[test]
    fn raw_form_has_three_lowercase_hex_segments(issuer in ascii_id(), machine in ascii_id(), until in expiry()) {
        let raw = License::from(LicenseTerms::new(issuer, machine, until)).raw_license();
        let parts: Vec<&str> = raw.split('-').collect();
        prop_assert_eq!(parts.len(), 3);
        for part in parts {
            prop_assert!(part.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        }
    }
}

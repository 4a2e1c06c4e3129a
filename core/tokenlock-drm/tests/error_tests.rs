use tokenlock_drm::DrmError;
use tokenlock_license::LicenseError;

#[test]
fn error_display_not_found_names_backends() {
    let err = DrmError::NotFound {
        backends: vec!["env".into(), "file".into()],
    };
    let msg = format!("{err}");
    assert!(msg.contains("env, file"));
}

#[test]
fn error_display_persisting() {
    let err = DrmError::PersistingLicense;
    assert!(format!("{err}").contains("persist"));
}

#[test]
fn error_display_no_license() {
    let err = DrmError::NoLicense;
    assert!(format!("{err}").contains("no license"));
}

#[test]
fn error_display_empty_registry() {
    let err = DrmError::EmptyIssuerRegistry;
    assert!(format!("{err}").contains("empty"));
}

#[test]
fn error_from_license_error_is_transparent() {
    let err: DrmError = LicenseError::MissingPublicKey.into();
    assert_eq!(format!("{err}"), format!("{}", LicenseError::MissingPublicKey));
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SheetError::unsupported_format("x")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(SheetError::decode("x").to_string().contains("decode error:"));
    assert!(SheetError::input("x").to_string().contains("input error:"));
    assert!(
        SheetError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SheetError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn kinds_match_variants() {
    assert_eq!(
        SheetError::unsupported_format("x").kind(),
        ErrorKind::UnsupportedFormat
    );
    assert_eq!(SheetError::decode("x").kind(), ErrorKind::Decode);
    assert_eq!(SheetError::input("x").kind(), ErrorKind::Input);
    assert_eq!(SheetError::validation("x").kind(), ErrorKind::Validation);
}

#[test]
fn kind_serializes_snake_case() {
    let json = serde_json::to_string(&ErrorKind::UnsupportedFormat).unwrap();
    assert_eq!(json, "\"unsupported_format\"");
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CardError::asset("x").to_string().contains("asset error:"));
    assert!(
        CardError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

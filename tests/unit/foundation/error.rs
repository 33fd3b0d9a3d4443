use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(StrokeError::parse("x").to_string().contains("parse error:"));
    assert!(
        StrokeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StrokeError::lookup("x").to_string().contains("lookup error:"));
    assert!(StrokeError::render("x").to_string().contains("render error:"));
    assert!(
        StrokeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StrokeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

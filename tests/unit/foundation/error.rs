use super::*;

#[test]
fn display_messages_are_stable() {
    assert_eq!(
        GarlandError::validation("bad").to_string(),
        "validation error: bad"
    );
    assert_eq!(
        GarlandError::asset("sock1", "missing").to_string(),
        "asset error (sock1): missing"
    );
    assert_eq!(GarlandError::render("x").to_string(), "render error: x");
    assert_eq!(
        GarlandError::serde("eof").to_string(),
        "serialization error: eof"
    );
}

#[test]
fn anyhow_errors_are_transparent() {
    let e: GarlandError = anyhow::anyhow!("boom").into();
    assert!(matches!(e, GarlandError::Other(_)));
    assert_eq!(e.to_string(), "boom");
}

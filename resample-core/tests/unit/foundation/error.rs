use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ResampleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ResampleError::codec("x")
            .to_string()
            .contains("codec error:")
    );
    assert!(
        ResampleError::degenerate_kernel(Axis::Y, 7)
            .to_string()
            .contains("degenerate kernel:")
    );
}

#[test]
fn degenerate_kernel_names_axis_and_coord() {
    let msg = ResampleError::degenerate_kernel(Axis::X, 42).to_string();
    assert!(msg.contains("x axis"));
    assert!(msg.contains("42"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ResampleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

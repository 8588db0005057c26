//! Unit tests for error.rs
//!
//! Tests Error variants, Display output, and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("context lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("context lost"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of GPU memory");
}

#[test]
fn test_shader_compilation_display() {
    let err = Error::ShaderCompilation("scene: 0:12 syntax error".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Shader compilation failed"));
    assert!(display.contains("0:12 syntax error"));
}

#[test]
fn test_physics_display() {
    let err = Error::Physics("convex hull has no points".to_string());
    assert_eq!(format!("{}", err), "Physics error: convex hull has no points");
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("render before update".to_string());
    assert!(format!("{}", err).contains("Invalid state"));
}

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::InvalidResource("x".into())).contains("InvalidResource"));
    assert!(format!("{:?}", Error::InitializationFailed("x".into())).contains("InitializationFailed"));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("stellar3d::Test", "mesh {} has {} vertices", "cube", 0);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "mesh cube has 0 vertices"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("stellar3d::Test", "bailed with {}", 7);
        }
        Ok(1)
    }

    assert_eq!(fails(false).unwrap(), 1);
    let err = fails(true).unwrap_err();
    assert!(format!("{}", err).contains("bailed with 7"));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}

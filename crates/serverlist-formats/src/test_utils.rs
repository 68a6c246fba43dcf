//! Test utilities for format round-trip testing

use crate::NbtFormat;
use std::fmt::Debug;

/// Test round-trip serialization for a format instance
///
/// Verifies that a format can be serialized and deserialized back
/// to an equivalent value.
pub fn test_round_trip<T>(original: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: NbtFormat + PartialEq + Debug,
    T::Error: 'static,
{
    let data = original.build()?;
    let parsed = T::parse(&data)?;

    if original != &parsed {
        return Err(format!(
            "Round-trip verification failed:\nOriginal: {:?}\nParsed: {:?}",
            original, parsed
        )
        .into());
    }

    Ok(())
}

/// Test that parsing invalid data fails
pub fn test_invalid_data_rejected<T>(invalid_data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: NbtFormat,
{
    match T::parse(invalid_data) {
        Ok(_) => Err("Expected parsing to fail for invalid data, but it succeeded".into()),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::nbt::{Compound, NamedNode};

    #[test]
    fn test_round_trip_utility() {
        let mut root = Compound::new();
        root.insert("value", 42i32);
        test_round_trip(&NamedNode::unnamed(root)).expect("Round-trip should succeed");
    }

    #[test]
    fn test_invalid_data_rejected_utility() {
        test_invalid_data_rejected::<NamedNode>(&[0x0A, 0x00])
            .expect("Should reject invalid data");
    }

    #[test]
    fn test_verify_round_trip() {
        let mut root = Compound::new();
        root.insert("value", "x");
        let data = NamedNode::unnamed(root).build().expect("build");
        assert!(NamedNode::verify_round_trip(&data).expect("verify"));
    }
}

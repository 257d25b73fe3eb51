//! Scalar type resolution.
//!
//! Maps a scalar node's declared constraints to the concrete primitive used
//! by generated code. Resolution is pure: the same constraints always yield
//! the same primitive.

use crate::types::{IntegerNode, PrimitiveType, ScalarNode};

/// Resolves the primitive type for a scalar node.
#[must_use]
pub fn resolve_scalar(node: &ScalarNode) -> PrimitiveType {
    match node {
        ScalarNode::Bool(_) => PrimitiveType::Bool,
        ScalarNode::Integer(integer) => resolve_integer(integer),
        ScalarNode::Number(_) => PrimitiveType::Double,
        ScalarNode::String(_) => PrimitiveType::String,
    }
}

/// Resolves the narrowest integer type for the declared bounds.
///
/// The type is unsigned iff a minimum is declared and is non-negative. The
/// width is the smallest standard width holding both bounds, with an absent
/// bound counted as 0; when neither bound constrains the width it is 32.
/// Bounds no 64-bit type can hold saturate to 64 bits.
#[must_use]
pub fn resolve_integer(node: &IntegerNode) -> PrimitiveType {
    let signed = !node.minimum.is_some_and(|minimum| minimum >= 0);
    let minimum = node.minimum.unwrap_or(0);
    let maximum = node.maximum.unwrap_or(0);

    let bits = if minimum == 0 && maximum == 0 {
        32
    } else {
        PrimitiveType::INTEGER_WIDTHS
            .into_iter()
            .find(|&bits| fits(signed, bits, minimum) && fits(signed, bits, maximum))
            .unwrap_or(64)
    };

    match PrimitiveType::integer(signed, bits) {
        Some(primitive) => primitive,
        None if signed => PrimitiveType::Int64,
        None => PrimitiveType::Uint64,
    }
}

/// Returns true if `value` fits an integer of the given signedness and width.
fn fits(signed: bool, bits: u32, value: i128) -> bool {
    PrimitiveType::integer(signed, bits)
        .and_then(|primitive| primitive.integer_range())
        .is_some_and(|(low, high)| (low..=high).contains(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoolNode, NumberNode, StringNode};

    fn integer(minimum: Option<i128>, maximum: Option<i128>) -> PrimitiveType {
        resolve_integer(&IntegerNode {
            minimum,
            maximum,
            default: None,
        })
    }

    #[test]
    fn test_width_sign_table() {
        assert_eq!(integer(Some(0), None), PrimitiveType::Uint32);
        assert_eq!(integer(Some(0), Some(200)), PrimitiveType::Uint8);
        assert_eq!(integer(Some(-129), Some(128)), PrimitiveType::Int16);
        assert_eq!(integer(None, None), PrimitiveType::Int32);
    }

    #[test]
    fn test_signedness() {
        assert_eq!(integer(None, Some(0)), PrimitiveType::Int32);
        assert_eq!(integer(None, Some(100)), PrimitiveType::Int8);
        assert_eq!(integer(Some(-1), None), PrimitiveType::Int8);
        assert_eq!(integer(Some(1), None), PrimitiveType::Uint8);
        assert!(integer(Some(0), Some(5)).is_unsigned());
        assert!(integer(Some(-5), Some(5)).is_signed());
    }

    #[test]
    fn test_width_boundaries() {
        assert_eq!(integer(None, Some(127)), PrimitiveType::Int8);
        assert_eq!(integer(None, Some(128)), PrimitiveType::Int16);
        assert_eq!(integer(Some(-128), None), PrimitiveType::Int8);
        assert_eq!(integer(Some(-129), None), PrimitiveType::Int16);
        assert_eq!(integer(Some(0), Some(255)), PrimitiveType::Uint8);
        assert_eq!(integer(Some(0), Some(256)), PrimitiveType::Uint16);
        assert_eq!(integer(Some(0), Some(65_535)), PrimitiveType::Uint16);
        assert_eq!(integer(Some(0), Some(65_536)), PrimitiveType::Uint32);
        assert_eq!(integer(Some(-40_000), Some(0)), PrimitiveType::Int32);
        assert_eq!(
            integer(Some(0), Some(i128::from(u32::MAX) + 1)),
            PrimitiveType::Uint64
        );
        assert_eq!(
            integer(Some(i128::from(i64::MIN)), Some(i128::from(i64::MAX))),
            PrimitiveType::Int64
        );
        assert_eq!(integer(Some(0), Some(i128::from(u64::MAX))), PrimitiveType::Uint64);
    }

    #[test]
    fn test_saturates_at_64_bits() {
        assert_eq!(integer(Some(-1), Some(i128::from(u64::MAX))), PrimitiveType::Int64);
    }

    #[test]
    fn test_default_does_not_affect_width() {
        let node = IntegerNode::new().with_default(1_000);
        assert_eq!(resolve_integer(&node), PrimitiveType::Int32);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for minimum in [None, Some(-70_000), Some(-129), Some(-1), Some(0), Some(3)] {
            for maximum in [None, Some(0), Some(127), Some(128), Some(70_000)] {
                assert_eq!(integer(minimum, maximum), integer(minimum, maximum));
            }
        }
    }

    #[test]
    fn test_resolve_scalar() {
        assert_eq!(
            resolve_scalar(&ScalarNode::Bool(BoolNode::default())),
            PrimitiveType::Bool
        );
        assert_eq!(
            resolve_scalar(&ScalarNode::Number(NumberNode::default())),
            PrimitiveType::Double
        );
        assert_eq!(
            resolve_scalar(&ScalarNode::String(StringNode::default())),
            PrimitiveType::String
        );
        assert_eq!(
            resolve_scalar(&ScalarNode::Integer(IntegerNode::new().with_minimum(0))),
            PrimitiveType::Uint32
        );
    }
}

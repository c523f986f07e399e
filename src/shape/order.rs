//! Compatibility order between shapes
//!
//! `a <= b` reads "values of shape `a` can be used where shape `b` is
//! expected". Shapes of different kinds are incomparable.

use super::ValueShape;
use std::cmp::Ordering;

impl ValueShape {
    /// `self <= other` under the compatibility order
    pub fn is_compatible_with(&self, other: &ValueShape) -> bool {
        match (self, other) {
            (ValueShape::Scalar(a), ValueShape::Scalar(b)) => a.eltype().is_subtype_of(b.eltype()),
            (ValueShape::Array(a), ValueShape::Array(b)) => {
                a.dims() == b.dims() && a.eltype().is_subtype_of(b.eltype())
            }
            (ValueShape::Const(a), ValueShape::Const(b)) => a.value().same_as(b.value()),
            (ValueShape::NamedTuple(a), ValueShape::NamedTuple(b)) => {
                a.len() == b.len()
                    && a.fields().iter().zip(b.fields()).all(|(fa, fb)| {
                        fa.name() == fb.name() && fa.shape().is_compatible_with(fb.shape())
                    })
            }
            _ => false,
        }
    }
}

impl PartialOrd for ValueShape {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_compatible_with(other), other.is_compatible_with(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::shape::ValueShape;
    use crate::types::ElType;

    fn array(eltype: ElType, dims: &[usize]) -> ValueShape {
        ValueShape::array(eltype, dims.to_vec()).unwrap()
    }

    #[test]
    fn arrays() {
        assert!(array(ElType::F64, &[4, 5]) <= array(ElType::Real, &[4, 5]));
        assert!(!(array(ElType::F64, &[4, 5]) <= array(ElType::Integer, &[4, 5])));
        assert_eq!(array(ElType::F64, &[2, 2]).partial_cmp(&array(ElType::F64, &[3, 3])), None);
    }

    #[test]
    fn scalars() {
        assert!(ValueShape::scalar(ElType::Real) >= ValueShape::scalar(ElType::I64));
        assert!(ValueShape::scalar(ElType::C64) <= ValueShape::scalar(ElType::Complex));
        assert!(!(ValueShape::scalar(ElType::C64) <= ValueShape::scalar(ElType::Real)));
    }

    #[test]
    fn constants_compare_by_value() {
        assert!(ValueShape::constant(1.5) <= ValueShape::constant(1.5));
        assert_eq!(
            ValueShape::constant(1.5).partial_cmp(&ValueShape::constant(2.5)),
            None
        );
        assert_eq!(
            ValueShape::constant(1.5).partial_cmp(&ValueShape::scalar(ElType::Real)),
            None
        );
    }

    #[test]
    fn nan_constants_are_reflexive() {
        let nan = ValueShape::constant(f64::NAN);
        assert!(nan.is_compatible_with(&nan));
        assert!(!nan.is_compatible_with(&ValueShape::constant(1.0)));

        let with_nan = ValueShape::named([
            ("x", ValueShape::scalar(ElType::Real)),
            ("missing", ValueShape::constant(f64::NAN)),
        ])
        .unwrap();
        assert!(with_nan.is_compatible_with(&with_nan.clone()));
    }

    #[test]
    fn kinds_are_incomparable() {
        let scalar = ValueShape::scalar(ElType::Real);
        let arr = array(ElType::Real, &[1]);
        assert!(!(scalar <= arr));
        assert!(!(arr <= scalar));
        assert_eq!(scalar.partial_cmp(&arr), None);
    }

    #[test]
    fn named_tuples_need_same_names_in_order() {
        let specific = ValueShape::named([
            ("a", ValueShape::scalar(ElType::F64)),
            ("b", array(ElType::I32, &[2])),
        ])
        .unwrap();
        let general = ValueShape::named([
            ("a", ValueShape::scalar(ElType::Real)),
            ("b", array(ElType::Integer, &[2])),
        ])
        .unwrap();
        let reordered = ValueShape::named([
            ("b", array(ElType::Integer, &[2])),
            ("a", ValueShape::scalar(ElType::Real)),
        ])
        .unwrap();

        assert!(specific <= general);
        assert!(!(general <= specific));
        assert_eq!(specific.partial_cmp(&reordered), None);
    }

    #[test]
    fn partial_order_laws() {
        let shapes = [
            ValueShape::scalar(ElType::F32),
            ValueShape::scalar(ElType::AbstractFloat),
            ValueShape::scalar(ElType::Real),
            ValueShape::scalar(ElType::Integer),
            array(ElType::F64, &[2]),
            array(ElType::Real, &[2]),
            ValueShape::constant(3i64),
        ];
        for a in &shapes {
            assert!(a <= a, "reflexive for {}", a);
            for b in &shapes {
                if a <= b && b <= a {
                    assert_eq!(a, b);
                }
                for c in &shapes {
                    if a <= b && b <= c {
                        assert!(a <= c, "transitive for {} <= {} <= {}", a, b, c);
                    }
                }
            }
        }
    }
}

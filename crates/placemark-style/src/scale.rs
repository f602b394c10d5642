//! Capacity-based icon scaling.
//!
//! A place's capacity is clamped into [1, 1000] and mapped through
//! (capacity / 20) ^ 0.25, so a 20-person site keeps the category's base
//! scale and larger sites grow sub-linearly.

use placemark_common::place::SIZE_FIELD;
use placemark_common::{parse_number, CanonicalPlace, FieldValue, StyleSpec};

pub const MIN_CAPACITY: f64 = 1.0;
pub const MAX_CAPACITY: f64 = 1000.0;
/// Capacity that yields a multiplier of exactly 1.0.
pub const REFERENCE_CAPACITY: f64 = 20.0;
pub const SCALE_EXPONENT: f64 = 0.25;

/// Clamp a capacity into [MIN_CAPACITY, MAX_CAPACITY].
pub fn clamp_capacity(capacity: f64) -> f64 {
    capacity.clamp(MIN_CAPACITY, MAX_CAPACITY)
}

/// Multiplier applied to both icon and label scale.
pub fn capacity_multiplier(capacity: f64) -> f64 {
    (clamp_capacity(capacity) / REFERENCE_CAPACITY).powf(SCALE_EXPONENT)
}

/// Numeric capacity of a place: the `size` field if it is a number or
/// text that parses as one.
pub fn capacity_of(place: &CanonicalPlace) -> Option<f64> {
    match place.get(SIZE_FIELD)? {
        FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FieldValue::Text(s) => parse_number(s),
    }
}

/// Scale `style` by the place's capacity, if it has one.
/// Returns the multiplier applied.
pub fn apply_capacity(style: &mut StyleSpec, place: &CanonicalPlace) -> Option<f64> {
    let capacity = capacity_of(place)?;
    let m = capacity_multiplier(capacity);
    style.scale *= m;
    style.label_scale *= m;
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_with_size(v: FieldValue) -> CanonicalPlace {
        let mut p = CanonicalPlace::with_fields(["name", "size"]);
        p.set("size", v);
        p
    }

    #[test]
    fn test_reference_capacity_is_identity() {
        assert_eq!(capacity_multiplier(20.0), 1.0);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(capacity_multiplier(2000.0), capacity_multiplier(1000.0));
        assert_eq!(capacity_multiplier(0.0), capacity_multiplier(1.0));
        assert_eq!(capacity_multiplier(-50.0), capacity_multiplier(1.0));
        assert_eq!(clamp_capacity(0.5), 1.0);
    }

    #[test]
    fn test_monotonic() {
        let caps = [-10.0, 0.0, 1.0, 5.0, 20.0, 150.0, 999.0, 1000.0, 5000.0];
        let ms: Vec<f64> = caps.iter().map(|&c| capacity_multiplier(c)).collect();
        assert!(ms.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_capacity_150() {
        let m = capacity_multiplier(150.0);
        assert!((m - 1.6549).abs() < 1e-3, "got {m}");
    }

    #[test]
    fn test_apply_scales_both() {
        let mut style = StyleSpec { scale: 2.0, label_scale: 0.5, ..Default::default() };
        let place = place_with_size(FieldValue::Number(320.0));
        let m = apply_capacity(&mut style, &place).unwrap();
        assert!((m - 2.0).abs() < 1e-12);
        assert!((style.scale - 4.0).abs() < 1e-12);
        assert!((style.label_scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_size_parsed() {
        let place = place_with_size(FieldValue::Text("Two Hundred".into()));
        assert_eq!(capacity_of(&place), Some(200.0));
    }

    #[test]
    fn test_no_capacity_leaves_style() {
        let mut style = StyleSpec::default();
        let place = place_with_size(FieldValue::Text("Unknown".into()));
        assert_eq!(apply_capacity(&mut style, &place), None);
        assert_eq!(style, StyleSpec::default());
    }
}

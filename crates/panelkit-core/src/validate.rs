//! Clamp-and-note parameter validation.
//!
//! Out-of-range numeric input never aborts a generation request. Values are
//! clamped to their documented range and every clamp is recorded as a
//! human-readable note on the result, so the caller can show the correction
//! instead of an error.

use tracing::warn;

/// Clamps a float parameter to `[min, max]`, recording a note when the value
/// had to change. Non-finite input falls back to `min`.
pub fn clamp_param(name: &str, value: f64, min: f64, max: f64, notes: &mut Vec<String>) -> f64 {
    if !value.is_finite() {
        warn!(parameter = name, "non-finite parameter, using minimum");
        notes.push(format!(
            "Parameter '{}' was not a number; using {}",
            name, min
        ));
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(
            parameter = name,
            value, clamped, "parameter out of range, clamped"
        );
        notes.push(format!(
            "Parameter '{}' clamped from {} to {} (valid: {}..{})",
            name, value, clamped, min, max
        ));
    }
    clamped
}

/// Clamps an integer count parameter to `[min, max]` with the same
/// note-recording contract as [`clamp_param`].
pub fn clamp_count(name: &str, value: u32, min: u32, max: u32, notes: &mut Vec<String>) -> u32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(
            parameter = name,
            value, clamped, "count out of range, clamped"
        );
        notes.push(format!(
            "Parameter '{}' clamped from {} to {} (valid: {}..{})",
            name, value, clamped, min, max
        ));
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_records_nothing() {
        let mut notes = Vec::new();
        let v = clamp_param("thickness", 3.0, 1.0, 20.0, &mut notes);
        assert_eq!(v, 3.0);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_clamp_records_original_and_clamped() {
        let mut notes = Vec::new();
        let v = clamp_param("kerf", 5.0, 0.0, 2.0, &mut notes);
        assert_eq!(v, 2.0);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("kerf"));
        assert!(notes[0].contains('5'));
        assert!(notes[0].contains('2'));
    }

    #[test]
    fn test_nan_falls_back_to_minimum() {
        let mut notes = Vec::new();
        let v = clamp_param("width", f64::NAN, 20.0, 200.0, &mut notes);
        assert_eq!(v, 20.0);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_clamp_count() {
        let mut notes = Vec::new();
        let v = clamp_count("rows", 50, 2, 20, &mut notes);
        assert_eq!(v, 20);
        assert_eq!(notes.len(), 1);
    }
}

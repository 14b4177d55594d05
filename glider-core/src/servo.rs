//! Control deltas to bounded servo positions.

#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::axis::TrimmedDeltas;
use crate::config::{ServoCalibration, SurfaceMix};

/// Map a normalized delta to a servo position.
///
/// Scales, offsets, clamps to `[low, high]` and rounds, in that order.
/// A NaN delta maps to the clamped middle position.
#[inline]
#[must_use]
pub fn to_servo(value: f32, cal: &ServoCalibration) -> u16 {
    let raw = cal.middle + value * cal.half_range;
    let raw = if raw.is_nan() { cal.middle } else { raw };
    raw.clamp(cal.low, cal.high).round() as u16
}

/// Positions of the three control surfaces.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfacePositions {
    pub surface_a: u16,
    pub surface_b: u16,
    pub surface_c: u16,
}

impl SurfaceMix {
    /// Mix trimmed pitch/roll into the three surface positions.
    ///
    /// Surface A only gets part of the pitch delta while pitch is negative,
    /// which evens out the unequal throw of the two wing servos.
    #[must_use]
    pub fn positions(&self, deltas: &TrimmedDeltas) -> SurfacePositions {
        let balance_a = if deltas.pitch < 0.0 {
            self.balance_a_negative
        } else {
            self.balance_a_positive
        };
        let roll = self.roll_scale * deltas.roll;

        SurfacePositions {
            surface_a: to_servo(balance_a * deltas.pitch - roll, &self.surface_a),
            surface_b: to_servo(self.balance_b * deltas.pitch + roll, &self.surface_b),
            surface_c: to_servo(-deltas.pitch, &self.surface_c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SURFACES;

    fn deltas(pitch: f32, roll: f32) -> TrimmedDeltas {
        TrimmedDeltas { pitch, roll }
    }

    #[test]
    fn test_to_servo_center() {
        assert_eq!(to_servo(0.0, &DEFAULT_SURFACES.surface_a), 132);
        assert_eq!(to_servo(0.0, &DEFAULT_SURFACES.surface_b), 177);
        assert_eq!(to_servo(0.0, &DEFAULT_SURFACES.surface_c), 190);
    }

    #[test]
    fn test_to_servo_rounds_after_clamp() {
        let cal = ServoCalibration::new(100.0, 0.0, 200.0);
        // 100 + 0.1 * 127 = 112.7
        assert_eq!(to_servo(0.1, &cal), 113);
        // 100 - 0.1 * 127 = 87.3
        assert_eq!(to_servo(-0.1, &cal), 87);
    }

    #[test]
    fn test_to_servo_stays_in_bounds() {
        let cal = DEFAULT_SURFACES.surface_b;
        for value in [
            -1.0e30,
            -10.0,
            -1.0,
            -0.5,
            0.0,
            0.5,
            1.0,
            10.0,
            1.0e30,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MAX,
            f32::MIN,
        ] {
            let out = to_servo(value, &cal);
            assert!((92..=221).contains(&out), "{value} -> {out}");
        }
        assert_eq!(to_servo(f32::INFINITY, &cal), 221);
        assert_eq!(to_servo(f32::NEG_INFINITY, &cal), 92);
    }

    #[test]
    fn test_to_servo_nan_is_middle() {
        assert_eq!(to_servo(f32::NAN, &DEFAULT_SURFACES.surface_c), 190);
    }

    #[test]
    fn test_neutral_positions() {
        let pos = DEFAULT_SURFACES.positions(&deltas(0.0, 0.0));
        assert_eq!(
            pos,
            SurfacePositions {
                surface_a: 132,
                surface_b: 177,
                surface_c: 190,
            }
        );
    }

    #[test]
    fn test_negative_pitch_halves_surface_a() {
        // A: 132 + 0.5 * -0.2 * 127 = 119.3, B: 177 - 0.2 * 127 = 151.6
        let pos = DEFAULT_SURFACES.positions(&deltas(-0.2, 0.0));
        assert_eq!(pos.surface_a, 119);
        assert_eq!(pos.surface_b, 152);
        // C: 190 + 0.2 * 127 = 215.4
        assert_eq!(pos.surface_c, 215);
    }

    #[test]
    fn test_positive_pitch_full_on_surface_a() {
        // A: 132 + 0.2 * 127 = 157.4, B: 177 + 25.4 = 202.4, C: 190 - 25.4 = 164.6
        let pos = DEFAULT_SURFACES.positions(&deltas(0.2, 0.0));
        assert_eq!(pos.surface_a, 157);
        assert_eq!(pos.surface_b, 202);
        assert_eq!(pos.surface_c, 165);
    }

    #[test]
    fn test_roll_moves_wings_in_opposite_directions() {
        // roll term: 0.4 * 0.5 * 127 = 25.4
        let pos = DEFAULT_SURFACES.positions(&deltas(0.0, 0.5));
        assert_eq!(pos.surface_a, 107);
        assert_eq!(pos.surface_b, 202);
        assert_eq!(pos.surface_c, 190);
    }

    #[test]
    fn test_full_deflection_clamps() {
        // A: 5.0 - 0.4 * 5.0 = 3.0, far past the high stop
        let pos = DEFAULT_SURFACES.positions(&deltas(5.0, 5.0));
        assert_eq!(pos.surface_a, 176);
        assert_eq!(pos.surface_b, 221);
        assert_eq!(pos.surface_c, 110);
    }
}

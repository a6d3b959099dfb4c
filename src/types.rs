/// Angles (in degrees) at which range readings are taken by a scan.
///
/// Shared by both ends of the connection: it defines the sensor sweep on the
/// remote side and the shape of the scan reply on the controller side.
pub const SCANNING_ANGLES: [f32; 5] = [0.0, 45.0, 90.0, 135.0, 180.0];

/// Configuration of the remote drive, created by the controller and sent
/// exactly once at connection start.
///
/// Immutable after construction; the dispatcher consumes it once to build
/// the drive capability.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotConfig {
    /// Diameter of the tires in mm.
    pub wheel_diameter: f64,

    /// Distance between the centers of the two tires in mm.
    pub track_width: f64,

    /// If `true`, the platform moves forward when the motors run backward.
    pub reverse: bool,

    /// Rotation speed of the platform in degrees per second.
    pub rotation_speed: f64,

    /// Magnitude in mm of the fixed-distance translate commands.
    pub translation_magnitude: f64,

    /// Magnitude in degrees of the fixed-angle rotate commands.
    pub rotation_magnitude: f64,
}

/// One range reading per scanning angle, index-aligned with
/// [`SCANNING_ANGLES`].
///
/// Produced by the drive capability on each scan; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReadings {
    ranges: [f32; SCANNING_ANGLES.len()],
}

impl RangeReadings {
    /// Wraps a full set of readings, ordered to match [`SCANNING_ANGLES`].
    pub fn new(ranges: [f32; SCANNING_ANGLES.len()]) -> RangeReadings {
        RangeReadings { ranges }
    }

    /// Number of readings in a set.
    #[inline]
    pub fn len(&self) -> usize {
        SCANNING_ANGLES.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The raw readings, in angle order.
    #[inline]
    pub fn ranges(&self) -> &[f32; SCANNING_ANGLES.len()] {
        &self.ranges
    }

    /// The reading taken at `SCANNING_ANGLES[index]`.
    #[inline]
    pub fn range(&self, index: usize) -> f32 {
        self.ranges[index]
    }

    /// Iterates `(angle_degrees, range)` pairs in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        SCANNING_ANGLES.iter().copied().zip(self.ranges.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_align_with_scanning_angles() {
        let readings = RangeReadings::new([10.0, 12.5, 999.0, 8.1, 30.0]);
        assert_eq!(readings.len(), SCANNING_ANGLES.len());
        assert_eq!(readings.range(2), 999.0);

        let pairs: Vec<(f32, f32)> = readings.iter().collect();
        assert_eq!(pairs[0], (0.0, 10.0));
        assert_eq!(pairs[4], (180.0, 30.0));
    }
}

//! Simulated drive capability.
//!
//! Stands in for the hardware-backed drive when no physical platform is
//! attached: motions complete instantly and are recorded, scans return a
//! canned set of readings. Backs the `rover` subcommand and the dispatcher
//! tests.

use crate::drive::Drive;
use crate::error::Result;
use crate::types::{RangeReadings, RobotConfig, SCANNING_ANGLES};
use log::info;

/// One executed motion, with the resolved signed magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Straight-line translation in mm; negative is backward.
    Translate(f64),
    /// Rotation in degrees; negative is to the left.
    Rotate(f64),
}

/// An in-process [`Drive`] with no hardware behind it.
#[derive(Debug)]
pub struct SimDrive {
    config: RobotConfig,
    ranges: [f32; SCANNING_ANGLES.len()],
    motions: Vec<Motion>,
}

impl SimDrive {
    /// Builds a simulated drive from the configuration received in the
    /// handshake.
    pub fn new(config: RobotConfig) -> SimDrive {
        info!(
            "sim drive configured: wheel {} mm, track {} mm, reverse {}, {} deg/s",
            config.wheel_diameter, config.track_width, config.reverse, config.rotation_speed
        );
        SimDrive {
            config,
            ranges: [1000.0; SCANNING_ANGLES.len()],
            motions: Vec::new(),
        }
    }

    /// Sets the readings returned by every subsequent `scan`.
    pub fn set_ranges(&mut self, ranges: [f32; SCANNING_ANGLES.len()]) {
        self.ranges = ranges;
    }

    /// Every motion executed so far, in order.
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }
}

impl Drive for SimDrive {
    fn translate(&mut self, distance: f64) -> Result<()> {
        info!("translate {} mm", distance);
        self.motions.push(Motion::Translate(distance));
        Ok(())
    }

    fn translate_forward(&mut self) -> Result<()> {
        self.translate(self.config.translation_magnitude)
    }

    fn translate_backward(&mut self) -> Result<()> {
        self.translate(-self.config.translation_magnitude)
    }

    fn rotate(&mut self, angle: f64) -> Result<()> {
        info!("rotate {} deg", angle);
        self.motions.push(Motion::Rotate(angle));
        Ok(())
    }

    fn rotate_right(&mut self) -> Result<()> {
        self.rotate(self.config.rotation_magnitude)
    }

    fn rotate_left(&mut self) -> Result<()> {
        self.rotate(-self.config.rotation_magnitude)
    }

    fn scan(&mut self) -> Result<RangeReadings> {
        info!("scan -> {:?}", self.ranges);
        Ok(RangeReadings::new(self.ranges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive() -> SimDrive {
        SimDrive::new(RobotConfig {
            wheel_diameter: 56.0,
            track_width: 110.0,
            reverse: false,
            rotation_speed: 90.0,
            translation_magnitude: 250.0,
            rotation_magnitude: 90.0,
        })
    }

    #[test]
    fn fixed_magnitude_motions_resolve_signed_magnitudes() {
        let mut drive = drive();
        drive.translate_forward().unwrap();
        drive.translate_backward().unwrap();
        drive.rotate_right().unwrap();
        drive.rotate_left().unwrap();

        assert_eq!(
            drive.motions(),
            &[
                Motion::Translate(250.0),
                Motion::Translate(-250.0),
                Motion::Rotate(90.0),
                Motion::Rotate(-90.0),
            ]
        );
    }

    #[test]
    fn scan_returns_configured_ranges() {
        let mut drive = drive();
        drive.set_ranges([10.0, 12.5, 999.0, 8.1, 30.0]);
        let readings = drive.scan().unwrap();
        assert_eq!(readings.ranges(), &[10.0, 12.5, 999.0, 8.1, 30.0]);
    }
}

use crate::error::Result;
use crate::types::RangeReadings;

/// Motion and sensing capability of a maze robot.
///
/// Implemented once per side of the connection: by the hardware-backed (or
/// simulated) drive the dispatcher owns, and by [`RemoteRobot`], the
/// controller-side proxy that forwards each call over the wire.
///
/// Every method blocks until the operation is physically complete; this is
/// what makes every command synchronous in effect even though the wire
/// protocol carries no acknowledgment for motion commands. A drive
/// implementation may instead return as soon as motion has started
/// (immediate-return); that is an alternative configuration of the
/// implementation, not a protocol change, and it weakens the "next command
/// starts after the previous motion finished" property.
///
/// [`RemoteRobot`]: crate::pilot::RemoteRobot
pub trait Drive {
    /// Translates in a straight line by `distance` mm. A positive distance
    /// moves forward, a negative distance backward.
    fn translate(&mut self, distance: f64) -> Result<()>;

    /// Translates forward by the configured translation magnitude.
    fn translate_forward(&mut self) -> Result<()>;

    /// Translates backward by the configured translation magnitude.
    fn translate_backward(&mut self) -> Result<()>;

    /// Rotates through `angle` degrees. Positive rotates right, negative
    /// rotates left.
    fn rotate(&mut self, angle: f64) -> Result<()>;

    /// Rotates right by the configured rotation magnitude.
    fn rotate_right(&mut self) -> Result<()>;

    /// Rotates left by the configured rotation magnitude.
    fn rotate_left(&mut self) -> Result<()>;

    /// Takes one range reading at each angle in
    /// [`SCANNING_ANGLES`](crate::types::SCANNING_ANGLES).
    fn scan(&mut self) -> Result<RangeReadings>;
}

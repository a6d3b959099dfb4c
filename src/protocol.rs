//! Wire codec for the command protocol.
//!
//! Every field is a fixed-width big-endian value; there are no length
//! prefixes, checksums, or sync bytes. A truncated or desynchronized stream
//! is only caught by the underlying stream's own error signaling, so every
//! decode failure here is terminal for the connection.

use crate::cmds::{Command, CommandCode};
use crate::error::{Error, Result};
use crate::types::{RangeReadings, RobotConfig, SCANNING_ANGLES};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::trace;
use std::io::{Read, Write};

/// Version of the command protocol spoken by this build.
///
/// The command ordering in [`CommandCode`] is the real contract between the
/// two independently built binaries; this version is written once at the
/// head of the handshake and verified by the dispatcher so that a command
/// reordering shows up as a clean handshake failure instead of silent
/// misdispatch. Bump it whenever [`CommandCode`] or [`RobotConfig`] changes
/// shape.
pub const PROTOCOL_VERSION: u32 = 1;

/// Default TCP port for the remote dispatcher.
pub const DEFAULT_PORT: u16 = 7171;

/// Writes the handshake version field and flushes it.
pub fn write_hello<W: Write + ?Sized>(w: &mut W) -> Result<()> {
    trace!("writing hello, protocol version {}", PROTOCOL_VERSION);
    w.write_u32::<BigEndian>(PROTOCOL_VERSION)?;
    w.flush()?;
    Ok(())
}

/// Reads the handshake version field and checks it against
/// [`PROTOCOL_VERSION`]. A mismatch is fatal for the connection.
pub fn read_hello<R: Read + ?Sized>(r: &mut R) -> Result<()> {
    let remote = r.read_u32::<BigEndian>()?;
    trace!("read hello, remote protocol version {}", remote);
    if remote != PROTOCOL_VERSION {
        return Err(Error::VersionMismatch {
            local: PROTOCOL_VERSION,
            remote,
        });
    }
    Ok(())
}

/// Writes the six configuration fields in declaration order.
///
/// Each field is flushed individually, so partial configurations are
/// observable on the wire as whole fields; this gives no atomicity if the
/// transport fails mid-sequence.
pub fn write_config<W: Write + ?Sized>(w: &mut W, config: &RobotConfig) -> Result<()> {
    trace!("writing config: {:?}", config);
    w.write_f64::<BigEndian>(config.wheel_diameter)?;
    w.flush()?;
    w.write_f64::<BigEndian>(config.track_width)?;
    w.flush()?;
    w.write_u8(config.reverse as u8)?;
    w.flush()?;
    w.write_f64::<BigEndian>(config.rotation_speed)?;
    w.flush()?;
    w.write_f64::<BigEndian>(config.translation_magnitude)?;
    w.flush()?;
    w.write_f64::<BigEndian>(config.rotation_magnitude)?;
    w.flush()?;
    Ok(())
}

/// Reads the six configuration fields in declaration order.
pub fn read_config<R: Read + ?Sized>(r: &mut R) -> Result<RobotConfig> {
    let config = RobotConfig {
        wheel_diameter: r.read_f64::<BigEndian>()?,
        track_width: r.read_f64::<BigEndian>()?,
        reverse: r.read_u8()? != 0,
        rotation_speed: r.read_f64::<BigEndian>()?,
        translation_magnitude: r.read_f64::<BigEndian>()?,
        rotation_magnitude: r.read_f64::<BigEndian>()?,
    };
    trace!("read config: {:?}", config);
    Ok(config)
}

/// Writes one command: the ordinal, then the `f64` parameter for the two
/// parameterized commands. Ordinal and parameter are each flushed.
pub fn write_command<W: Write + ?Sized>(w: &mut W, command: &Command) -> Result<()> {
    let code = command.code();
    trace!("writing command {:?} (ordinal {})", command, code.ordinal());
    w.write_u32::<BigEndian>(code.ordinal())?;
    w.flush()?;
    match command {
        Command::Translate(distance) => {
            w.write_f64::<BigEndian>(*distance)?;
            w.flush()?;
        }
        Command::Rotate(angle) => {
            w.write_f64::<BigEndian>(*angle)?;
            w.flush()?;
        }
        _ => {}
    }
    Ok(())
}

/// Reads one command, blocking until the ordinal (and parameter, where one
/// is defined) has arrived.
///
/// An out-of-range ordinal yields `Error::ProtocolError`; end of stream or
/// disconnection surfaces as `Error::IoError`.
pub fn read_command<R: Read + ?Sized>(r: &mut R) -> Result<Command> {
    let ordinal = r.read_u32::<BigEndian>()?;
    let code = CommandCode::try_from(ordinal)?;
    let command = match code {
        CommandCode::Translate => Command::Translate(r.read_f64::<BigEndian>()?),
        CommandCode::TranslateForward => Command::TranslateForward,
        CommandCode::TranslateBackward => Command::TranslateBackward,
        CommandCode::Rotate => Command::Rotate(r.read_f64::<BigEndian>()?),
        CommandCode::RotateRight => Command::RotateRight,
        CommandCode::RotateLeft => Command::RotateLeft,
        CommandCode::Scan => Command::Scan,
        CommandCode::End => Command::End,
    };
    trace!("read command {:?}", command);
    Ok(command)
}

/// Writes a scan reply: one `f32` per scanning angle, in sweep order,
/// followed by a single flush.
pub fn write_readings<W: Write + ?Sized>(w: &mut W, readings: &RangeReadings) -> Result<()> {
    trace!("writing {} range readings", readings.len());
    for range in readings.ranges() {
        w.write_f32::<BigEndian>(*range)?;
    }
    w.flush()?;
    Ok(())
}

/// Reads a scan reply, blocking until all `SCANNING_ANGLES.len()` values
/// have arrived.
pub fn read_readings<R: Read + ?Sized>(r: &mut R) -> Result<RangeReadings> {
    let mut ranges = [0f32; SCANNING_ANGLES.len()];
    for range in ranges.iter_mut() {
        *range = r.read_f32::<BigEndian>()?;
    }
    trace!("read {} range readings", ranges.len());
    Ok(RangeReadings::new(ranges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn config_roundtrip_is_bit_identical() {
        let config = RobotConfig {
            wheel_diameter: 56.0,
            track_width: 110.0,
            reverse: false,
            rotation_speed: 90.0,
            translation_magnitude: 250.0,
            rotation_magnitude: 90.0,
        };

        let mut buf = Vec::new();
        write_config(&mut buf, &config).unwrap();
        // 5 x f64 + 1 x bool, no framing overhead
        assert_eq!(buf.len(), 5 * 8 + 1);

        let decoded = read_config(&mut Cursor::new(buf)).unwrap();
        assert_eq!(
            decoded.wheel_diameter.to_bits(),
            config.wheel_diameter.to_bits()
        );
        assert_eq!(decoded.track_width.to_bits(), config.track_width.to_bits());
        assert_eq!(decoded.reverse, config.reverse);
        assert_eq!(
            decoded.rotation_speed.to_bits(),
            config.rotation_speed.to_bits()
        );
        assert_eq!(
            decoded.translation_magnitude.to_bits(),
            config.translation_magnitude.to_bits()
        );
        assert_eq!(
            decoded.rotation_magnitude.to_bits(),
            config.rotation_magnitude.to_bits()
        );
    }

    #[test]
    fn config_roundtrip_preserves_awkward_values() {
        let config = RobotConfig {
            wheel_diameter: f64::MIN_POSITIVE,
            track_width: -0.0,
            reverse: true,
            rotation_speed: 1.0e308,
            translation_magnitude: 0.1 + 0.2,
            rotation_magnitude: -90.000000000001,
        };

        let mut buf = Vec::new();
        write_config(&mut buf, &config).unwrap();
        let decoded = read_config(&mut Cursor::new(buf)).unwrap();
        assert_eq!(decoded.track_width.to_bits(), config.track_width.to_bits());
        assert_eq!(
            decoded.translation_magnitude.to_bits(),
            config.translation_magnitude.to_bits()
        );
        assert!(decoded.reverse);
    }

    #[test]
    fn command_roundtrip_all_variants() {
        let commands = [
            Command::Translate(123.5),
            Command::TranslateForward,
            Command::TranslateBackward,
            Command::Rotate(-45.25),
            Command::RotateRight,
            Command::RotateLeft,
            Command::Scan,
            Command::End,
        ];

        for command in &commands {
            let mut buf = Vec::new();
            write_command(&mut buf, command).unwrap();
            let decoded = read_command(&mut Cursor::new(buf)).unwrap();
            assert_eq!(decoded, *command);
        }
    }

    #[test]
    fn parameterless_command_is_four_bytes() {
        let mut buf = Vec::new();
        write_command(&mut buf, &Command::Scan).unwrap();
        assert_eq!(buf, 6u32.to_be_bytes());
    }

    #[test]
    fn out_of_range_ordinal_is_protocol_error() {
        let buf = 42u32.to_be_bytes();
        match read_command(&mut Cursor::new(buf)) {
            Err(Error::ProtocolError { .. }) => {}
            other => panic!("expected protocol error, got {:?}", other),
        }
    }

    #[test]
    fn truncated_command_is_io_error() {
        // Translate ordinal but no parameter
        let buf = 0u32.to_be_bytes();
        match read_command(&mut Cursor::new(buf)) {
            Err(Error::IoError(_)) => {}
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn readings_roundtrip_in_order() {
        let readings = RangeReadings::new([10.0, 12.5, 999.0, 8.1, 30.0]);
        let mut buf = Vec::new();
        write_readings(&mut buf, &readings).unwrap();
        assert_eq!(buf.len(), SCANNING_ANGLES.len() * 4);

        let decoded = read_readings(&mut Cursor::new(buf)).unwrap();
        assert_eq!(decoded, readings);
    }

    #[test]
    fn hello_rejects_version_mismatch() {
        let buf = (PROTOCOL_VERSION + 1).to_be_bytes();
        match read_hello(&mut Cursor::new(buf)) {
            Err(Error::VersionMismatch { local, remote }) => {
                assert_eq!(local, PROTOCOL_VERSION);
                assert_eq!(remote, PROTOCOL_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn hello_accepts_matching_version() {
        let mut buf = Vec::new();
        write_hello(&mut buf).unwrap();
        read_hello(&mut Cursor::new(buf)).unwrap();
    }
}

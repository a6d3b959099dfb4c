use crate::error::{Error, Result};

/// Wire identifiers for the remote operations.
///
/// The ordinal position of each variant is the value written on the wire,
/// and the ordering is the protocol contract: both ends must be built from
/// an identical definition. Adding, removing, or reordering variants is a
/// breaking wire-format change (guarded at runtime by the version exchanged
/// in the handshake, see `protocol::PROTOCOL_VERSION`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CommandCode {
    /// Translate a caller-supplied distance (one `f64` parameter follows).
    Translate = 0,

    /// Translate forward by the configured translation magnitude.
    TranslateForward = 1,

    /// Translate backward by the configured translation magnitude.
    TranslateBackward = 2,

    /// Rotate through a caller-supplied angle (one `f64` parameter follows).
    Rotate = 3,

    /// Rotate right by the configured rotation magnitude.
    RotateRight = 4,

    /// Rotate left by the configured rotation magnitude.
    RotateLeft = 5,

    /// Take range readings at every scanning angle; the remote replies with
    /// the readings. The only command with a reply.
    Scan = 6,

    /// Terminate the connection. No reply; the dispatch loop stops reading.
    End = 7,
}

impl CommandCode {
    /// All variants in wire order. `ALL[code.ordinal() as usize] == code`
    /// holds for every variant.
    pub const ALL: [CommandCode; 8] = [
        CommandCode::Translate,
        CommandCode::TranslateForward,
        CommandCode::TranslateBackward,
        CommandCode::Rotate,
        CommandCode::RotateRight,
        CommandCode::RotateLeft,
        CommandCode::Scan,
        CommandCode::End,
    ];

    /// The wire value of this command.
    #[inline]
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Looks up a command by its wire value.
    ///
    /// Returns `None` for values outside the defined range; the caller must
    /// treat that as a fatal protocol violation, since with no framing the
    /// stream position can never be resynchronized afterwards.
    pub fn from_ordinal(ordinal: u32) -> Option<CommandCode> {
        Self::ALL.get(ordinal as usize).copied()
    }
}

impl TryFrom<u32> for CommandCode {
    type Error = Error;

    fn try_from(ordinal: u32) -> Result<CommandCode> {
        CommandCode::from_ordinal(ordinal).ok_or(Error::ProtocolError {
            description: format!("unknown command ordinal {}", ordinal),
        })
    }
}

/// A fully decoded command, parameters included.
///
/// `End` is an ordinary variant: the dispatch loop treats it as a terminal
/// value in the read result, never as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Translate the given distance in mm; negative moves backward.
    Translate(f64),
    TranslateForward,
    TranslateBackward,
    /// Rotate through the given angle in degrees; negative rotates left.
    Rotate(f64),
    RotateRight,
    RotateLeft,
    Scan,
    End,
}

impl Command {
    /// The wire identifier of this command.
    pub fn code(&self) -> CommandCode {
        match self {
            Command::Translate(_) => CommandCode::Translate,
            Command::TranslateForward => CommandCode::TranslateForward,
            Command::TranslateBackward => CommandCode::TranslateBackward,
            Command::Rotate(_) => CommandCode::Rotate,
            Command::RotateRight => CommandCode::RotateRight,
            Command::RotateLeft => CommandCode::RotateLeft,
            Command::Scan => CommandCode::Scan,
            Command::End => CommandCode::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_roundtrip_all_variants() {
        for (i, code) in CommandCode::ALL.iter().enumerate() {
            assert_eq!(code.ordinal(), i as u32);
            assert_eq!(CommandCode::from_ordinal(i as u32), Some(*code));
        }
    }

    #[test]
    fn ordinal_out_of_range_rejected() {
        assert_eq!(CommandCode::from_ordinal(8), None);
        assert_eq!(CommandCode::from_ordinal(u32::MAX), None);
        assert!(CommandCode::try_from(8u32).is_err());
    }

    #[test]
    fn command_maps_to_matching_code() {
        assert_eq!(Command::Translate(1.0).code(), CommandCode::Translate);
        assert_eq!(Command::Rotate(-45.0).code(), CommandCode::Rotate);
        assert_eq!(Command::End.code(), CommandCode::End);
    }
}

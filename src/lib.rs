//! # mazebot
//!
//! `mazebot` is a remote control protocol for a small differential-drive
//! exploration robot. A controller process drives the remote platform over a
//! point-to-point byte stream by invoking a fixed set of motion and sensing
//! operations: the controller-side [`RemoteRobot`] stub serializes each call
//! onto the stream, and the remote-side [`Dispatcher`] decodes commands and
//! invokes them on a local [`Drive`] implementation.
//!
//! The wire format is a sequence of fixed-width big-endian fields with no
//! framing; see the [`protocol`] module. Both ends must be built from the
//! same [`CommandCode`] ordering, which the handshake guards with a protocol
//! version check.

extern crate byteorder;
extern crate log;

pub mod cmds;
mod dispatcher;
mod drive;
mod error;
mod pilot;
pub mod protocol;
pub mod sim;
pub mod types;

pub use crate::cmds::{Command, CommandCode};
pub use crate::dispatcher::{Dispatcher, Shutdown};
pub use crate::drive::Drive;
pub use crate::error::{Error, Result};
pub use crate::pilot::{ConnectOptions, RemoteRobot};
pub use crate::types::{RangeReadings, RobotConfig, SCANNING_ANGLES};

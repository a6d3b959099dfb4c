//! Command-line front end: `pilot` runs the controller side with a scripted
//! demo route, `rover` runs the remote dispatcher with a simulated drive.

use std::io::{self, BufRead, Write};
use std::net::{Shutdown as SocketShutdown, TcpListener, TcpStream};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mazebot::sim::SimDrive;
use mazebot::{protocol, ConnectOptions, Dispatcher, Drive, RemoteRobot, RobotConfig};

#[derive(Parser)]
#[command(name = "mazebot")]
#[command(about = "Remote control for a differential-drive exploration robot", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a remote robot through the scripted demo route
    Pilot {
        /// Address of the remote dispatcher (host:port)
        #[arg(short, long)]
        addr: String,

        /// Wheel diameter in mm
        #[arg(long, default_value_t = 56.0)]
        wheel_diameter: f64,

        /// Track width (center of left tire to center of right tire) in mm
        #[arg(long, default_value_t = 110.0)]
        track_width: f64,

        /// The platform moves forward when the motors run backward
        #[arg(long)]
        reverse: bool,

        /// Rotation speed in degrees per second
        #[arg(long, default_value_t = 90.0)]
        rotation_speed: f64,

        /// Magnitude of the fixed-distance translate commands in mm
        #[arg(long, default_value_t = 250.0)]
        translation: f64,

        /// Magnitude of the fixed-angle rotate commands in degrees
        #[arg(long, default_value_t = 90.0)]
        rotation: f64,

        /// Optional per-read socket timeout in milliseconds
        #[arg(long)]
        read_timeout_ms: Option<u64>,
    },

    /// Accept one controller connection and dispatch its commands to a
    /// simulated drive
    Rover {
        /// Address to listen on
        #[arg(short, long, default_value_t = format!("0.0.0.0:{}", protocol::DEFAULT_PORT))]
        bind: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Pilot {
            addr,
            wheel_diameter,
            track_width,
            reverse,
            rotation_speed,
            translation,
            rotation,
            read_timeout_ms,
        } => {
            let config = RobotConfig {
                wheel_diameter,
                track_width,
                reverse,
                rotation_speed,
                translation_magnitude: translation,
                rotation_magnitude: rotation,
            };
            let options = ConnectOptions {
                read_timeout: read_timeout_ms.map(Duration::from_millis),
                write_timeout: None,
            };
            run_pilot(&addr, &config, &options)?;
        }
        Commands::Rover { bind } => {
            run_rover(&bind)?;
        }
    }

    Ok(())
}

/// Connects to the remote dispatcher and executes the demo route.
///
/// The route is a hard-coded command sequence, not a maze-solving
/// algorithm: each fixed-magnitude motion once, then a scan, then end.
fn run_pilot(
    addr: &str,
    config: &RobotConfig,
    options: &ConnectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Connecting to {}...", addr);
    let mut robot = RemoteRobot::connect_with_options(addr, config, options)?;
    println!("Connected");

    robot.translate_forward()?;
    pause("Press enter to continue")?;
    robot.translate_backward()?;
    pause("Press enter to continue")?;
    robot.rotate_right()?;
    pause("Press enter to continue")?;
    robot.rotate_left()?;
    pause("Press enter to continue")?;

    let readings = robot.scan()?;
    for (angle, range) in readings.iter() {
        println!("{:>5.1} deg: {:.1} mm", angle, range);
    }
    pause("Press enter to exit")?;

    robot.end()?;
    robot
        .into_inner()
        .shutdown(SocketShutdown::Both)
        .ok();
    println!("Closing connection");
    Ok(())
}

/// Accepts exactly one connection and serves it until the controller ends
/// the session or the connection drops.
fn run_rover(bind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind)?;
    println!("Waiting for connection on {}...", listener.local_addr()?);

    let (stream, peer) = listener.accept()?;
    println!("Connected: {}", peer);

    let mut dispatcher =
        Dispatcher::handshake(Box::new(stream), |config| Ok(SimDrive::new(config.clone())))?;
    let shutdown = dispatcher.run()?;
    println!("Session over: {:?}", shutdown);

    let stream: Box<TcpStream> = dispatcher.into_inner();
    stream.shutdown(SocketShutdown::Both).ok();

    // Single connection per process lifetime; confirm before exiting.
    pause("Press enter to end program")?;
    Ok(())
}

fn pause(message: &str) -> io::Result<()> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// WF3D Terminal Viewer - Fly a wireframe box
///
/// Moves and spins a box along its own axes.
/// Controls:
///   - Arrow Keys: Move forward, backward, left and right
///   - 1 / 2: Move up / down
///   - Q / W: Pitch, A / S: Roll, Z / X: Yaw
///   - ESC / Ctrl-C: Quit
use clap::Parser;
use nalgebra::Point3;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wf3d_core::{parse_bindings, KeyMap, Projection, RigidBox};
use wf3d_terminal::TerminalApp;

#[derive(Debug, Parser)]
#[command(name = "wf3d-terminal")]
#[command(version)]
#[command(about = "Fly a wireframe box around the terminal.", long_about = None)]
struct Args {
    /// Viewport width in projection units
    #[arg(long, default_value_t = 1000.0)]
    width: f64,
    /// Viewport height in projection units
    #[arg(long, default_value_t = 800.0)]
    height: f64,
    /// Side length of the cube
    #[arg(long, short, default_value_t = 100.0)]
    side: f64,
    /// Distance at which perspective collapses to the center
    #[arg(long, short, default_value_t = wf3d_core::DEFAULT_DEPTH)]
    depth: f64,
    /// Key binding file merged over the default keys
    #[arg(long, short)]
    bindings: Option<PathBuf>,
    /// Where to put the log output
    #[arg(long, short)]
    log: Option<PathBuf>,
}

fn invalid(kind: io::ErrorKind, e: impl std::fmt::Display) -> io::Error {
    io::Error::new(kind, e.to_string())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Log lines would tear the alternate screen, so only a file gets them
    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let mut keymap = KeyMap::default();
    if let Some(path) = &args.bindings {
        let text = fs::read_to_string(path).map_err(|e| {
            invalid(
                io::ErrorKind::NotFound,
                format!("Failed to read bindings {}: {}", path.display(), e),
            )
        })?;
        let overrides = parse_bindings(&text).map_err(|e| {
            invalid(
                io::ErrorKind::InvalidData,
                format!("Failed to parse bindings {}: {}", path.display(), e),
            )
        })?;
        keymap.merge(overrides);
    }

    let center = Point3::new(args.width / 2.0, args.height / 2.0, 0.0);
    let cube =
        RigidBox::cube(center, args.side).map_err(|e| invalid(io::ErrorKind::InvalidInput, e))?;
    let projection = Projection::centered(args.width, args.height, args.depth)
        .map_err(|e| invalid(io::ErrorKind::InvalidInput, e))?;

    debug!("starting wireframe\n{}", cube.wireframe());

    println!("WF3D Terminal Viewer - press ESC to quit");

    let mut app = TerminalApp::new(cube, keymap, projection, (args.width, args.height))?;
    app.run()?;

    Ok(())
}

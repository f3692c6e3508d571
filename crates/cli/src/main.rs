//! hidrelay CLI: drive the RP2040 HID relay from the command line.
//!
//! Every command opens a session, performs its action, and closes the
//! session, which releases anything still held. Ctrl-C cuts holds and
//! `listen` short but still goes through the close.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hidrelay_core::config::SessionConfig;
use hidrelay_core::inject::Usage;
use hidrelay_core::keys::{GamepadAxis, GamepadButton, HatDirection, Key, MouseButton};
use hidrelay_core::report::MouseToGamepadMode;
use hidrelay_core::transport::HidTransport;
use hidrelay_core::HidSession;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "hidrelay", version, about = "Drive an RP2040 composite HID relay")]
struct Cli {
    /// JSON session config. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the relay's USB Vendor ID (hex, e.g. 046d).
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    vid: Option<u16>,

    /// Override the relay's USB Product ID (hex, e.g. c08b).
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    pid: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StickSide {
    Left,
    Right,
    Triggers,
}

#[derive(Subcommand)]
enum Commands {
    /// List relay interfaces matching the configured VID/PID.
    ListDevices,
    /// Print the effective session config as JSON.
    ShowConfig,
    /// Move the mouse by a relative amount.
    #[command(allow_negative_numbers = true)]
    Move { dx: i32, dy: i32 },
    /// Click a mouse button: left, right, middle, back, forward.
    Click {
        #[arg(default_value = "left")]
        button: String,
    },
    /// Scroll the wheel, optionally panning horizontally.
    #[command(allow_negative_numbers = true)]
    Wheel {
        scroll: i32,
        #[arg(long, default_value_t = 0)]
        pan: i32,
    },
    /// Drag with a button held.
    #[command(allow_negative_numbers = true)]
    Drag {
        dx: i32,
        dy: i32,
        #[arg(long, default_value = "left")]
        button: String,
        #[arg(long, default_value_t = 10)]
        steps: u32,
        /// Delay between steps in milliseconds.
        #[arg(long, default_value_t = 10)]
        step_delay_ms: u64,
    },
    /// Tap a key by name (a, enter, f5, lctrl, ...).
    Key { name: String },
    /// Press keys in order and release them in reverse, e.g. `lctrl lalt delete`.
    Hotkey {
        #[arg(required = true)]
        keys: Vec<String>,
        /// Delay after each press and release in milliseconds.
        #[arg(long, default_value_t = 10)]
        delay_ms: u64,
    },
    /// Press and release a gamepad button by name or index.
    GamepadButton {
        button: String,
        #[arg(long, default_value_t = 100)]
        hold_ms: u64,
    },
    /// Deflect a stick (or the triggers) and hold it, then recenter.
    #[command(allow_negative_numbers = true)]
    Stick {
        #[arg(value_enum)]
        side: StickSide,
        x: i32,
        y: i32,
        #[arg(long, default_value_t = 500)]
        hold_ms: u64,
    },
    /// Set one gamepad axis (x, y, z, rz, rx, ry), hold it, then recenter.
    #[command(allow_negative_numbers = true)]
    Axis {
        axis: String,
        value: i32,
        #[arg(long, default_value_t = 500)]
        hold_ms: u64,
    },
    /// Hold the hat in a direction, then recenter.
    Hat {
        direction: String,
        #[arg(long, default_value_t = 100)]
        hold_ms: u64,
    },
    /// Send one inject packet for an arbitrary usage (x, wheel, 0x00010030, ...).
    #[command(allow_negative_numbers = true)]
    Inject { usage: String, value: i32 },
    /// Switch mouse-to-gamepad routing: off, stick, manual.
    Mode { mode: String },
    /// Print mouse reports forwarded by the receiver.
    Listen {
        /// Stop after this many reports.
        #[arg(long)]
        count: Option<usize>,
        /// One JSON object per report.
        #[arg(long)]
        json: bool,
    },
    /// Release every button, key, and axis.
    ReleaseAll,
}

fn parse_hex_u16(text: &str) -> std::result::Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{text}': {e}"))
}

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(vid) = cli.vid {
        config.vendor_id = vid;
    }
    if let Some(pid) = cli.pid {
        config.product_id = pid;
    }
    config.validate()?;
    tracing::debug!(?config, "Effective session config");
    Ok(config)
}

/// Longest single wait before the stop flag is checked again.
const STOP_POLL: Duration = Duration::from_millis(10);

/// Inbound read timeout used by `listen`, so Ctrl-C is noticed promptly.
const LISTEN_READ_TIMEOUT_MS: i32 = 100;

/// Sleep for `duration` in short slices. Returns `false` if `stop` was set
/// before the full duration elapsed.
fn hold(stop: &AtomicBool, duration: Duration) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(STOP_POLL));
    }
}

/// Bound a configured read timeout so the listen loop can poll the stop flag.
/// `-1` (block forever) is bounded too.
fn listen_read_timeout(configured_ms: i32) -> i32 {
    if (0..=LISTEN_READ_TIMEOUT_MS).contains(&configured_ms) {
        configured_ms
    } else {
        LISTEN_READ_TIMEOUT_MS
    }
}

fn install_stop_handler() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .context("failed to install Ctrl-C handler")?;
    Ok(stop)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::ListDevices => {
            let devices = hidrelay_core::device::discover_devices(
                config.vendor_id,
                config.product_id,
                config.usage_page,
            )?;
            if devices.is_empty() {
                println!(
                    "No relay found (VID: 0x{:04X}, PID: 0x{:04X}).",
                    config.vendor_id, config.product_id
                );
                println!("Ensure the receiver is connected and udev rules allow access.");
            } else {
                for dev in &devices {
                    println!(
                        "{} (VID: 0x{:04X}, PID: 0x{:04X}, interface: {}, path: {})",
                        dev.product.as_deref().unwrap_or("unknown"),
                        dev.vid,
                        dev.pid,
                        dev.interface_number,
                        dev.path
                    );
                }
            }
            return Ok(());
        }
        Commands::ShowConfig => {
            println!("{}", config.to_json()?);
            return Ok(());
        }
        Commands::Listen { .. } => {
            config.read_timeout_ms = listen_read_timeout(config.read_timeout_ms);
        }
        _ => {}
    }

    // Ctrl-C sets the flag instead of killing the process, so the session
    // is always closed and held inputs are released.
    let stop = install_stop_handler()?;
    let mut session = HidSession::open(config).context("open relay")?;

    let result = run(&mut session, cli.command, &stop);
    if stop.load(Ordering::Relaxed) {
        eprintln!("Interrupted, releasing all inputs");
    }
    let closed = session.close();
    result?;
    closed?;
    Ok(())
}

fn run<T: HidTransport>(
    session: &mut HidSession<T>,
    command: Commands,
    stop: &AtomicBool,
) -> Result<()> {
    match command {
        Commands::ListDevices | Commands::ShowConfig => {}
        Commands::Move { dx, dy } => {
            session.mouse_move(dx, dy)?;
            println!("Moved ({dx}, {dy})");
        }
        Commands::Click { button } => {
            let button = MouseButton::from_name(&button)?;
            session.mouse_click(button)?;
            println!("Clicked {}", button.label());
        }
        Commands::Wheel { scroll, pan } => {
            session.mouse_wheel(scroll, pan)?;
            println!("Scrolled {scroll} (pan {pan})");
        }
        Commands::Drag {
            dx,
            dy,
            button,
            steps,
            step_delay_ms,
        } => {
            // Runs to completion once started; the button is released inside.
            let button = MouseButton::from_name(&button)?;
            session.mouse_drag(dx, dy, button, steps, Duration::from_millis(step_delay_ms))?;
            println!("Dragged ({dx}, {dy}) with {}", button.label());
        }
        Commands::Key { name } => {
            let key = Key::from_name(&name)?;
            session.key_click(key)?;
            println!("Tapped {key}");
        }
        Commands::Hotkey { keys, delay_ms } => {
            let keys = keys
                .iter()
                .map(|name| Key::from_name(name))
                .collect::<hidrelay_core::Result<Vec<_>>>()?;
            session.key_hotkey(&keys, Duration::from_millis(delay_ms))?;
            let names: Vec<_> = keys.iter().map(|k| k.to_string()).collect();
            println!("Sent {}", names.join("+"));
        }
        Commands::GamepadButton { button, hold_ms } => {
            let button = GamepadButton::from_name(&button)?;
            session.gamepad_press(button)?;
            hold(stop, Duration::from_millis(hold_ms));
            session.gamepad_release(button)?;
            println!("Pressed gamepad button {}", button.index());
        }
        Commands::Stick {
            side,
            x,
            y,
            hold_ms,
        } => {
            match side {
                StickSide::Left => session.gamepad_set_left_stick(x, y)?,
                StickSide::Right => session.gamepad_set_right_stick(x, y)?,
                StickSide::Triggers => session.gamepad_set_triggers(x, y)?,
            }
            let completed = hold(stop, Duration::from_millis(hold_ms));
            session.gamepad_release_all()?;
            if completed {
                println!("Held ({x}, {y}) for {hold_ms} ms");
            }
        }
        Commands::Axis {
            axis,
            value,
            hold_ms,
        } => {
            let axis = GamepadAxis::from_name(&axis)?;
            session.gamepad_set_axis(axis, value)?;
            let completed = hold(stop, Duration::from_millis(hold_ms));
            session.gamepad_set_axis(axis, 0)?;
            if completed {
                println!("Held {axis:?} at {value} for {hold_ms} ms");
            }
        }
        Commands::Hat { direction, hold_ms } => {
            let direction = HatDirection::from_name(&direction)?;
            session.gamepad_set_hat(direction)?;
            hold(stop, Duration::from_millis(hold_ms));
            session.gamepad_set_hat(HatDirection::Centered)?;
            println!("Hat {direction:?} for {hold_ms} ms");
        }
        Commands::Inject { usage, value } => {
            let usage = Usage::parse(&usage)?;
            session.inject(usage, value)?;
            println!("Injected {usage} = {value}");
        }
        Commands::Mode { mode } => {
            let parsed = MouseToGamepadMode::from_name(&mode).ok_or_else(|| {
                anyhow::anyhow!("Unknown mode '{mode}'. Valid modes: off, stick, manual")
            })?;
            session.set_mouse_to_gamepad(parsed)?;
            println!("Mouse-to-gamepad mode set to {parsed:?}");
        }
        Commands::Listen { count, json } => {
            let mut seen = 0usize;
            while !stop.load(Ordering::Relaxed) && count.map_or(true, |limit| seen < limit) {
                let Some(event) = session.read_mouse_event()? else {
                    continue;
                };
                seen += 1;
                if json {
                    println!("{}", serde_json::to_string(&event)?);
                } else {
                    println!(
                        "buttons L:{} R:{} M:{}  x:{:4} y:{:4} wheel:{:3}",
                        u8::from(event.buttons.left),
                        u8::from(event.buttons.right),
                        u8::from(event.buttons.middle),
                        event.x,
                        event.y,
                        event.wheel
                    );
                }
            }
        }
        Commands::ReleaseAll => {
            session.release_all()?;
            println!("Released all inputs");
        }
    }
    Ok(())
}

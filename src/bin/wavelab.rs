use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use wavelab::engines::chain::time_step;
use wavelab::engines::ring::{EXPORT_FPS, period_sequence};
use wavelab::engines::string::STRING_TIME_SCALE;
use wavelab::{
    AnimationClock, BoundaryConvention, ChainEngine, ChainOptions, ChainParams, ControlMode,
    LoopEngine, LoopOptions, LoopParams, PlateEngine, PlateFrame, PlateOptions, PlateParams,
    PlateShape, SettingsStore, SimTime, StringEngine, StringOptions, StringParams, Superposition,
    Sweep, TARGET_FRAME_INTERVAL, WaveEngine,
};

const BACKGROUND_RGBA: [u8; 4] = [18, 20, 28, 255];
const NODAL_LINE_RGBA: [u8; 4] = [0, 255, 255, 255];

#[derive(Parser, Debug)]
#[command(name = "wavelab", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Standing wave on a string fixed at both ends.
    String(StringArgs),
    /// Chladni plate pattern (square or circular).
    Plate(PlateArgs),
    /// Radial standing wave on a circular wire loop.
    Loop(LoopArgs),
    /// Longitudinal standing wave in a particle chain.
    Chain(ChainArgs),
    /// Run a paced animation loop, printing derived quantities as JSON lines.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Simulation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Settings JSON overriding the built-in parameter ranges.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StringArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Tension in newtons.
    #[arg(long)]
    tension: Option<f64>,

    /// Linear density in kg/m.
    #[arg(long)]
    density: Option<f64>,

    /// Length in metres.
    #[arg(long)]
    length: Option<f64>,

    #[arg(long)]
    amplitude: Option<f64>,

    /// Driving frequency in Hz (manual control).
    #[arg(long)]
    frequency: Option<f64>,

    /// Target harmonic (set-harmonic control).
    #[arg(long)]
    harmonic: Option<u32>,

    /// `manual` or `harmonic`.
    #[arg(long, default_value = "manual")]
    control: ControlMode,

    #[arg(long, default_value_t = 500)]
    samples: usize,
}

#[derive(Args, Debug)]
struct PlateArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long)]
    n: Option<u32>,

    #[arg(long)]
    m: Option<u32>,

    /// `square` or `circular`.
    #[arg(long, default_value = "square")]
    shape: PlateShape,

    /// `sum` or `difference` (square plates only).
    #[arg(long, default_value = "difference")]
    superposition: Superposition,

    /// Grid side length.
    #[arg(long, default_value_t = 500)]
    resolution: usize,

    /// Also write an intensity image with nodal lines.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LoopArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Angular wavelengths around the loop.
    #[arg(long)]
    mode: Option<u32>,

    #[arg(long)]
    amplitude: Option<f64>,

    /// Angular speed in rad/s.
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Write one full period as this many frames instead of a single frame.
    #[arg(long)]
    period_frames: Option<u32>,
}

#[derive(Args, Debug)]
struct ChainArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long)]
    particles: Option<u32>,

    #[arg(long)]
    harmonic: Option<u32>,

    /// Fraction of the safe maximum displacement.
    #[arg(long)]
    amplitude: Option<f64>,

    /// `sine` (fixed ends) or `cosine` (free ends).
    #[arg(long, default_value = "sine")]
    boundary: BoundaryConvention,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SimChoice {
    String,
    Plate,
    Loop,
    Chain,
}

#[derive(Args, Debug)]
struct PlayArgs {
    sim: SimChoice,

    /// Number of frames to run.
    #[arg(long, default_value_t = 50)]
    frames: u64,

    #[arg(long)]
    settings: Option<PathBuf>,

    /// Sweep string tension sinusoidally instead of holding it.
    #[arg(long)]
    sweep_tension: bool,

    /// Chain speed factor; scales the fixed clock step.
    #[arg(long)]
    speed: Option<f64>,
}

#[derive(Serialize)]
struct FrameLine<'a, D: Serialize> {
    sim: &'a str,
    frame: u64,
    time: f64,
    derived: D,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::String(args) => cmd_string(args),
        Command::Plate(args) => cmd_plate(args),
        Command::Loop(args) => cmd_loop(args),
        Command::Chain(args) => cmd_chain(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<SettingsStore> {
    match path {
        Some(p) => SettingsStore::from_path(p)
            .with_context(|| format!("load settings '{}'", p.display())),
        None => Ok(SettingsStore::defaults()),
    }
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            ensure_parent(path)?;
            let json = serde_json::to_vec(value).context("serialize frame JSON")?;
            std::fs::write(path, json)
                .with_context(|| format!("write json '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer(&mut lock, value).context("serialize frame JSON")?;
            writeln!(lock).context("write stdout")?;
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn string_params(args: &StringArgs, store: &SettingsStore) -> anyhow::Result<StringParams> {
    Ok(StringParams {
        tension: store.resolve("sw_tension", args.tension)?,
        linear_density: store.resolve("sw_density", args.density)?,
        length: store.resolve("sw_length", args.length)?,
        amplitude: store.resolve("sw_amplitude", args.amplitude)?,
        frequency: store.resolve("sw_frequency", args.frequency)?,
        harmonic: store.resolve_count("sw_harmonic", args.harmonic)?,
    })
}

fn cmd_string(args: StringArgs) -> anyhow::Result<()> {
    let store = load_settings(args.common.settings.as_deref())?;
    let params = string_params(&args, &store)?;
    let opts = StringOptions {
        control: args.control,
        samples: args.samples,
    };
    let frame = StringEngine::compute_frame(&params, SimTime(args.common.time), &opts)?;
    write_json(&frame, args.common.out.as_deref())
}

fn cmd_plate(args: PlateArgs) -> anyhow::Result<()> {
    let store = load_settings(args.common.settings.as_deref())?;
    let params = PlateParams {
        n: store.resolve_count("ch_n", args.n)?,
        m: store.resolve_count("ch_m", args.m)?,
        resolution: args.resolution,
    };
    let opts = PlateOptions {
        shape: args.shape,
        superposition: args.superposition,
    };
    let frame = PlateEngine::compute_frame(&params, SimTime(args.common.time), &opts)?;
    if frame.derived.identically_zero {
        tracing::warn!(n = params.n, m = params.m, "plate field is identically zero");
    }

    if let Some(png) = &args.png {
        write_plate_png(&frame, png)?;
    }
    write_json(&frame, args.common.out.as_deref())
}

fn cmd_loop(args: LoopArgs) -> anyhow::Result<()> {
    let store = load_settings(args.common.settings.as_deref())?;
    let params = LoopParams {
        mode: store.resolve_count("cw_n", args.mode)?,
        amplitude: store.resolve("cw_amp", args.amplitude)?,
        angular_speed: store.resolve("cw_speed", args.speed)?,
        ..LoopParams::default()
    };
    let opts = LoopOptions {
        samples: args.samples,
    };

    match args.period_frames {
        Some(frames) => {
            let seq = period_sequence(&params, &opts, frames)?;
            tracing::info!(frames, fps = EXPORT_FPS, "loop period sequence");
            write_json(&seq, args.common.out.as_deref())
        }
        None => {
            let frame = LoopEngine::compute_frame(&params, SimTime(args.common.time), &opts)?;
            write_json(&frame, args.common.out.as_deref())
        }
    }
}

fn chain_params(
    store: &SettingsStore,
    particles: Option<u32>,
    harmonic: Option<u32>,
    amplitude: Option<f64>,
) -> anyhow::Result<ChainParams> {
    Ok(ChainParams {
        particles: store.resolve_count("lw_particles", particles)?,
        harmonic: store.resolve_count("lw_n", harmonic)?,
        amplitude_factor: store.resolve("lw_amp", amplitude)?,
        ..ChainParams::default()
    })
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let store = load_settings(args.common.settings.as_deref())?;
    let params = chain_params(&store, args.particles, args.harmonic, args.amplitude)?;
    let opts = ChainOptions {
        boundary: args.boundary,
    };
    let frame = ChainEngine::compute_frame(&params, SimTime(args.common.time), &opts)?;
    write_json(&frame, args.common.out.as_deref())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let store = load_settings(args.settings.as_deref())?;
    match args.sim {
        SimChoice::String => {
            let base = StringParams::from_settings(&store)?;
            let sweep = args.sweep_tension.then(Sweep::tension);
            let clock = AnimationClock::real_time(STRING_TIME_SCALE)?;
            run_paced(clock, args.frames, |t, elapsed| {
                let params = StringParams {
                    tension: sweep.as_ref().map_or(base.tension, |s| s.sample(elapsed)),
                    ..base
                };
                let frame = StringEngine::compute_frame(&params, t, &StringOptions::default())?;
                emit(StringEngine::NAME, frame.derived)
            })
        }
        SimChoice::Plate => {
            // Stationary pattern: one evaluation serves every frame.
            let params = PlateParams::from_settings(&store)?;
            let frame =
                PlateEngine::compute_frame(&params, SimTime::ZERO, &PlateOptions::default())?;
            let derived = serde_json::to_value(&frame.derived).context("serialize plate")?;
            let clock = AnimationClock::real_time(1.0)?;
            run_paced(clock, args.frames, |_, _| emit(PlateEngine::NAME, &derived))
        }
        SimChoice::Loop => {
            let params = LoopParams::from_settings(&store)?;
            let clock = AnimationClock::real_time(1.0)?;
            run_paced(clock, args.frames, |t, _| {
                let frame = LoopEngine::compute_frame(&params, t, &LoopOptions::default())?;
                emit(LoopEngine::NAME, frame.derived)
            })
        }
        SimChoice::Chain => {
            let params = ChainParams::from_settings(&store)?;
            let speed = store.resolve("lw_speed", args.speed)?;
            let clock = AnimationClock::fixed(time_step(speed)?)?;
            run_paced(clock, args.frames, |t, _| {
                let frame = ChainEngine::compute_frame(&params, t, &ChainOptions::default())?;
                emit(ChainEngine::NAME, frame.derived)
            })
        }
    }
}

/// Drive `step` once per frame at no more than the target frame rate.
///
/// `step` receives the clock time and the wall-clock seconds since the loop started.
fn run_paced(
    mut clock: AnimationClock,
    frames: u64,
    mut step: impl FnMut(SimTime, f64) -> anyhow::Result<FrameLineOut>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut last = start;
    let stdout = std::io::stdout();
    for _ in 0..frames {
        let now = Instant::now();
        let t = clock.tick(now - last);
        last = now;

        let line = step(t, (now - start).as_secs_f64())?;
        let mut lock = stdout.lock();
        serde_json::to_writer(
            &mut lock,
            &FrameLine {
                sim: line.sim,
                frame: clock.frames(),
                time: t.secs(),
                derived: line.derived,
            },
        )
        .context("serialize frame line")?;
        writeln!(lock).context("write stdout")?;
        drop(lock);

        if let Some(rest) = TARGET_FRAME_INTERVAL.checked_sub(now.elapsed()) {
            std::thread::sleep(rest);
        }
    }
    Ok(())
}

struct FrameLineOut {
    sim: &'static str,
    derived: serde_json::Value,
}

fn emit<D: Serialize>(sim: &'static str, derived: D) -> anyhow::Result<FrameLineOut> {
    Ok(FrameLineOut {
        sim,
        derived: serde_json::to_value(derived).context("serialize derived quantities")?,
    })
}

fn write_plate_png(frame: &PlateFrame, path: &Path) -> anyhow::Result<()> {
    let res = frame.field.grid.resolution;
    let side = u32::try_from(res).context("plate resolution too large for an image")?;
    let max = frame.derived.max_amplitude;
    let mut data = vec![0u8; res * res * 4];

    for row in 0..res {
        // Image rows run top-down; the grid's run along +y.
        let y_px = res - 1 - row;
        for col in 0..res {
            let rgba = match frame.amplitude[frame.field.grid.index(col, row)] {
                Some(a) => intensity_rgba(if max > 0.0 { a / max } else { 0.0 }),
                None => BACKGROUND_RGBA,
            };
            let o = (y_px * res + col) * 4;
            data[o..o + 4].copy_from_slice(&rgba);
        }
    }

    let scale = (res - 1) as f64 / 2.0;
    for seg in &frame.derived.nodal_lines {
        let steps = ((seg.p1 - seg.p0).hypot() * scale).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = seg.p0.lerp(seg.p1, i as f64 / steps as f64);
            let col = ((p.x + 1.0) * scale).round() as usize;
            let y_px = ((1.0 - p.y) * scale).round() as usize;
            if col < res && y_px < res {
                let o = (y_px * res + col) * 4;
                data[o..o + 4].copy_from_slice(&NODAL_LINE_RGBA);
            }
        }
    }

    ensure_parent(path)?;
    image::save_buffer_with_format(
        path,
        &data,
        side,
        side,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

/// Dark-to-warm ramp for normalized amplitude in `[0, 1]`.
fn intensity_rgba(v: f64) -> [u8; 4] {
    let v = v.clamp(0.0, 1.0);
    let channel = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(1.5 * v), channel(v * v), channel(0.4 * (1.0 - v)), 255]
}

mod input;
mod scenes;
mod terminal;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anim_render::{decode, DriverConfig, FrameClock, FrameDriver, Palette, Scene, ThemeCycle};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::input::Action;
use crate::scenes::SceneChoice;
use crate::terminal::Terminal;

#[derive(Parser, Debug)]
#[command(author, version, about = "Depth-composited ANSI animations in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scene interactively in the terminal
    Run(RunArgs),
    /// Render frames headlessly and write them to disk
    Export(ExportArgs),
    /// Replay previously exported frame files
    Play(PlayArgs),
    /// List available scenes and themes
    List,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Scene to play
    #[arg(value_enum, default_value = "cube")]
    scene: SceneChoice,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Scene to render
    #[arg(value_enum)]
    scene: SceneChoice,
    /// Output directory for frame files
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Number of frames to render
    #[arg(long, default_value_t = 100)]
    frames: u64,
    /// Surface width in cells
    #[arg(long, default_value_t = 80)]
    width: u16,
    /// Surface height in cells
    #[arg(long, default_value_t = 24)]
    height: u16,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Directory of exported frame files
    input: PathBuf,
    /// Playback rate
    #[arg(long, default_value_t = 20)]
    fps: u32,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Color theme (see `list`)
    #[arg(long, default_value = "matrix")]
    theme: String,
    /// Target frames per second (10..120)
    #[arg(long, default_value_t = 20)]
    fps: u32,
    /// Animation speed multiplier (0.1..10)
    #[arg(long, default_value_t = 0.5)]
    speed: f32,
    /// Hide the status line
    #[arg(long, default_value_t = false)]
    no_stats: bool,
    /// Pack shader scenes into Braille dots instead of half blocks
    #[arg(long, default_value_t = false)]
    braille: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Export(args) => export(args),
        Commands::Play(args) => play(args),
        Commands::List => {
            list();
            Ok(())
        },
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut theme = args.settings.theme_cycle();
    let mut scene = args.scene.build(args.settings.braille);
    let mut driver = FrameDriver::new(args.settings.to_config());

    let mut terminal = Terminal::new();
    terminal.enter().context("failed to prepare the terminal")?;
    let result = run_loop(&mut terminal, scene.as_mut(), &mut theme, &mut driver);
    terminal.exit().context("failed to restore the terminal")?;
    result
}

fn run_loop(
    terminal: &mut Terminal,
    scene: &mut dyn Scene,
    theme: &mut ThemeCycle,
    driver: &mut FrameDriver,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        for action in pending_actions()? {
            match action {
                Action::Quit => return Ok(()),
                Action::TogglePause => {
                    driver.toggle_pause();
                },
                Action::Faster => info!("speed {:.2}x", driver.clock_mut().increase_speed()),
                Action::Slower => info!("speed {:.2}x", driver.clock_mut().decrease_speed()),
                Action::NextTheme => info!("theme {}", theme.next()),
                Action::PrevTheme => info!("theme {}", theme.prev()),
                Action::ToggleStats => {
                    driver.toggle_stats();
                },
                Action::TogglePackMode => {
                    if let Some(mode) = scene.toggle_pack_mode() {
                        info!("{} now packs as {mode:?}", scene.name());
                    }
                },
                Action::ResetScene => scene.reset(),
            }
        }

        let (width, height) = terminal.viewport();
        match driver.render_frame(scene, &*theme, width, height) {
            Ok(frame) => terminal.present(&frame.text)?,
            Err(err) => {
                warn!("frame {} of {} failed: {err}", driver.frame_count(), scene.name());
                terminal.show_error(&format!("Frame error: {err}\nRetrying..."))?;
                thread::sleep(Duration::from_secs(1));
                continue;
            },
        }

        thread::sleep(driver.clock().remaining(frame_start.elapsed()));
    }
}

/// Drain queued key presses without blocking.
fn pending_actions() -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            actions.extend(input::handle_key_event(key));
        }
    }
    Ok(actions)
}

fn export(args: ExportArgs) -> Result<()> {
    let theme = args.settings.theme_cycle();
    let mut scene = args.scene.build(args.settings.braille);
    let mut driver = FrameDriver::new(args.settings.to_config());
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let progress = ProgressBar::new(args.frames);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames",
        )
        .context("invalid progress template")?
        .progress_chars("=> "),
    );

    let mut written = 0;
    for step in 0..args.frames {
        progress.inc(1);
        let frame = match driver.render_frame(scene.as_mut(), &theme, args.width, args.height) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("skipping step {step}: {err}");
                continue;
            },
        };

        let frame_path = args.out_dir.join(format!("frame_{:04}.txt", frame.index));
        let mut file = File::create(&frame_path)
            .with_context(|| format!("failed to create {:?}", frame_path))?;
        file.write_all(frame.text.as_bytes())
            .with_context(|| format!("failed to write {:?}", frame_path))?;
        written += 1;
    }

    info!("{} of {} frames rendered for {}", written, args.frames, scene.name());
    progress.finish_with_message(format!("Frames written to {:?}", args.out_dir));
    Ok(())
}

fn play(args: PlayArgs) -> Result<()> {
    let frames = load_frames(&args.input)?;
    let mut clock = FrameClock::new(args.fps, 1.0);

    let mut terminal = Terminal::new();
    terminal.enter().context("failed to prepare the terminal")?;
    let result = play_loop(&mut terminal, &frames, &mut clock);
    terminal.exit().context("failed to restore the terminal")?;
    result
}

fn play_loop(terminal: &mut Terminal, frames: &[String], clock: &mut FrameClock) -> Result<()> {
    let mut paused = false;
    let mut index = 0;
    loop {
        let frame_start = Instant::now();

        for action in pending_actions()? {
            match action {
                Action::Quit => return Ok(()),
                Action::TogglePause => paused = !paused,
                Action::Faster => {
                    let fps = clock.fps().saturating_mul(2);
                    clock.set_fps(fps);
                },
                Action::Slower => {
                    let fps = clock.fps() / 2;
                    clock.set_fps(fps);
                },
                _ => {},
            }
        }

        terminal.present(&frames[index])?;
        if !paused {
            index = (index + 1) % frames.len();
        }

        thread::sleep(clock.remaining(frame_start.elapsed()));
    }
}

/// Read every frame file under `path`, sorted by name.
fn load_frames(path: &Path) -> Result<Vec<String>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no frame files found in {:?}", path);
    }

    let mut frames = Vec::with_capacity(entries.len());
    for entry in entries {
        let text =
            fs::read_to_string(&entry).with_context(|| format!("failed to read {:?}", entry))?;
        match decode(&text) {
            Ok(decoded) => {
                debug!("{:?}: {}x{}", entry, decoded.width(), decoded.height());
                frames.push(text);
            },
            Err(err) => warn!("skipping {:?}: {err}", entry),
        }
    }
    if frames.is_empty() {
        anyhow::bail!("no readable frames in {:?}", path);
    }
    Ok(frames)
}

fn list() {
    println!("Scenes:");
    for choice in SceneChoice::value_variants() {
        if let Some(value) = choice.to_possible_value() {
            println!("  {:<10} {}", value.get_name(), choice.description());
        }
    }

    println!("Themes:");
    for key in Palette::keys() {
        println!("  {:<10} {}", key, Palette::by_name(key).description());
    }
}

impl RenderSettings {
    fn to_config(&self) -> DriverConfig {
        DriverConfig { fps: self.fps, speed: self.speed, show_stats: !self.no_stats }
    }

    fn theme_cycle(&self) -> ThemeCycle {
        if !Palette::keys().any(|key| key.eq_ignore_ascii_case(&self.theme)) {
            warn!("unknown theme {:?}, using matrix", self.theme);
        }
        ThemeCycle::new(&self.theme)
    }
}

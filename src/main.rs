use std::io;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use torus_snake::config::{self, Settings, SettingsPatch};
use torus_snake::draw::FrameSketch;
use torus_snake::game::GameState;
use torus_snake::input::{GameInput, InputHandler};
use torus_snake::renderer;
use torus_snake::terminal_runtime::{self, TerminalSession};
use torus_snake::theme;

#[derive(Debug, Parser)]
#[command(name = "torus-snake", about = "Wrap-around terminal snake on a toroidal grid")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Simulation rate in ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Color theme: classic, ocean, or neon.
    #[arg(long)]
    theme: Option<String>,
}

impl Cli {
    fn as_patch(&self) -> SettingsPatch {
        SettingsPatch {
            grid_width: self.width,
            grid_height: self.height,
            ticks_per_second: self.tps,
            theme: self.theme.clone(),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Warn about a broken settings file while stderr is still readable.
    let file_patch = match config::load_settings() {
        Ok(patch) => patch,
        Err(error) => {
            eprintln!("warning: ignoring settings file: {error}");
            SettingsPatch::default()
        }
    };
    let settings = Settings::resolved(&[&file_patch, &cli.as_patch()]);

    terminal_runtime::install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(&mut session, &settings)
}

fn run(session: &mut TerminalSession, settings: &Settings) -> io::Result<()> {
    let theme = theme::theme_by_name(&settings.theme);
    let mut input = InputHandler::new();
    let mut state = GameState::new(settings.bounds);
    let mut sketch = FrameSketch::new();

    let tick_interval = Duration::from_millis(1000 / u64::from(settings.ticks_per_second).max(1));
    let mut last_tick = Instant::now();
    let mut last_report = None;

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, theme, last_report, &mut sketch))?;

        while let Some(game_input) = input.poll()? {
            if matches!(game_input, GameInput::Quit) {
                return Ok(());
            }
            state.apply_input(game_input);
        }

        if last_tick.elapsed() >= tick_interval {
            if let Some(report) = state.tick() {
                last_report = Some(report);
            }
            last_tick = Instant::now();
        }

        thread::sleep(Duration::from_millis(16));
    }
}

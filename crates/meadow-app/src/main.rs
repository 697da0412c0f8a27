use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use meadow_agent::{load_default_sheet, loader, Scene, SceneRng, SpriteSheet};
use meadow_config::MeadowConfig;
use meadow_core::{
    bus::EventBus,
    console::Console,
    event::Event,
    fps::FpsMeter,
    logging::{self, LogBuffer, LogLevel},
    splash::Splash,
    state::AppState,
    timer::IntervalTimer,
};
use meadow_ui::{
    console::render_console,
    hud::{render_hud, render_top_bar, HudView},
    layout::meadow_layout,
    meadow::render_meadow,
    splash::render_splash,
};

type Term = Terminal<CrosstermBackend<Stdout>>;

const HUD_HEIGHT: u16 = 7;
const POLL_TIMEOUT: Duration = Duration::from_millis(16);
const FPS_WINDOW: Duration = Duration::from_secs(1);
const CONSOLE_PAGE: usize = 10;
/// Config, sprite sheet, scene.
const LOADING_STEPS: usize = 3;

struct App {
    state: AppState,
    bus: EventBus,
    log_buffer: LogBuffer,
    console: Console,
    fps: FpsMeter,
    frame_timer: IntervalTimer,
    scene: Scene,
    seed: u64,
}

impl App {
    fn sync_logs(&mut self) {
        self.console.sync_from(&self.log_buffer);
    }

    fn draw(&mut self, terminal: &mut Term, now: Instant) -> Result<()> {
        let status = format!(
            "{} | up {}s",
            self.state.status_line,
            self.state.uptime(now).as_secs()
        );
        let view = HudView {
            status_line: &status,
            fps: self.fps.fps(),
            seed: self.seed,
            next_decision: self.scene.driver().remaining(now),
        };
        terminal.draw(|f| {
            let rects = meadow_layout(f.area(), HUD_HEIGHT);
            render_top_bar(f, rects.top, &view);
            render_meadow(f, rects.scene, &self.scene);
            render_hud(f, &rects, &self.scene, &view);
            if self.console.is_visible() {
                render_console(f, f.area(), &self.console);
            }
        })?;
        self.state.frames_rendered += 1;
        Ok(())
    }

    /// Translate a key press into bus events or console actions.
    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('`') | KeyCode::Char('~') => self.console.toggle(),
            KeyCode::PageUp if self.console.is_visible() => self.console.scroll_up(CONSOLE_PAGE),
            KeyCode::PageDown if self.console.is_visible() => {
                self.console.scroll_down(CONSOLE_PAGE)
            }
            KeyCode::Char('l') if self.console.is_visible() => {
                let level = next_console_level(self.console.min_level());
                self.console.set_min_level(level);
            }
            KeyCode::Char('c') if self.console.is_visible() => self.console.clear(),
            KeyCode::Char('q') | KeyCode::Esc => self.bus.publish(Event::Quit),
            _ => self.bus.publish(Event::Key(key)),
        }
    }

    /// Apply queued events. Returns `true` when the app should exit.
    fn dispatch(&mut self) -> bool {
        let events: Vec<Event> = self.bus.drain().collect();
        for ev in events {
            match ev {
                Event::Frame { now } => {
                    self.scene.frame_tick(now);
                    self.fps.record(now);
                }
                Event::Behavior { now } => {
                    self.scene.poll_behavior(now);
                }
                Event::Resize { cols, rows } => {
                    tracing::debug!(cols, rows, "terminal resized");
                }
                Event::Key(key) => {
                    tracing::trace!(?key, "unbound key");
                }
                Event::Quit => return true,
            }
        }
        false
    }
}

/// Console filter cycle: Trace, Debug, Info, Warn, Error, then Trace again.
fn next_console_level(level: LogLevel) -> LogLevel {
    match level {
        LogLevel::Trace => LogLevel::Debug,
        LogLevel::Debug => LogLevel::Info,
        LogLevel::Info => LogLevel::Warn,
        LogLevel::Warn => LogLevel::Error,
        LogLevel::Error => LogLevel::Trace,
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let log_buffer = logging::init();
    tracing::info!(log_dir = %logging::log_dir().display(), "meadow starting up");

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, log_buffer);
    restore_terminal(terminal)?;
    if let Err(err) = &res {
        tracing::error!("meadow exited with an error: {err:#}");
    }
    res
}

fn show_splash(terminal: &mut Term, splash: &Splash) -> Result<()> {
    terminal.draw(|f| render_splash(f, f.area(), splash))?;
    Ok(())
}

fn load_sheet(config: &MeadowConfig) -> Result<SpriteSheet> {
    match &config.bunnies.sheet {
        Some(paths) => {
            tracing::info!(png = %paths.png.display(), json = %paths.json.display(), "loading sprite sheet");
            loader::load_from_files(&paths.png, &paths.json)
        }
        None => {
            tracing::info!("using the built-in sprite sheet");
            load_default_sheet()
        }
    }
}

/// Loading sequence behind the splash screen.
fn load(terminal: &mut Term, log_buffer: LogBuffer) -> Result<App> {
    let mut splash = Splash::new(LOADING_STEPS);
    show_splash(terminal, &splash)?;

    let (config, path) = MeadowConfig::load()?;
    match &path {
        Some(path) => tracing::info!(path = %path.display(), "config loaded"),
        None => tracing::info!("no config file found, using defaults"),
    }
    splash.advance("sprite sheet");
    show_splash(terminal, &splash)?;

    let sheet = load_sheet(&config)?;
    splash.advance("meadow");
    show_splash(terminal, &splash)?;

    let (mut rng, seed) = SceneRng::from_config(config.behavior.seed);
    tracing::info!(seed, "scene seed");
    let now = Instant::now();
    let scene = Scene::from_config(&config, sheet, &mut rng, now)?;
    tracing::info!(
        bunnies = scene.agents().len(),
        interval_ms = scene.driver().interval().as_millis() as u64,
        "meadow ready"
    );
    splash.advance("");
    show_splash(terminal, &splash)?;

    let frame_period = Duration::from_secs(1) / config.render.fps;
    Ok(App {
        state: AppState::new(now),
        bus: EventBus::new(),
        log_buffer,
        console: Console::default(),
        fps: FpsMeter::new(FPS_WINDOW),
        frame_timer: IntervalTimer::new(frame_period, now),
        scene,
        seed,
    })
}

fn run(terminal: &mut Term, log_buffer: LogBuffer) -> Result<()> {
    let mut app = load(terminal, log_buffer)?;

    loop {
        app.sync_logs();
        app.draw(terminal, Instant::now())?;

        if event::poll(POLL_TIMEOUT)? {
            match event::read()? {
                CEvent::Key(key) => app.on_key(key),
                CEvent::Resize(cols, rows) => app.bus.publish(Event::Resize { cols, rows }),
                _ => {}
            }
        }

        // The two clocks are checked independently; neither assumes the
        // other has run first.
        let now = Instant::now();
        if app.frame_timer.poll(now) {
            app.bus.publish(Event::Frame { now });
        }
        if app.scene.driver().remaining(now) == Some(Duration::ZERO) {
            app.bus.publish(Event::Behavior { now });
        }

        if app.dispatch() {
            break;
        }
    }

    app.scene.teardown();
    tracing::info!(
        frames = app.scene.frames(),
        rendered = app.state.frames_rendered,
        rounds = app.scene.driver().rounds(),
        "meadow shutting down"
    );
    Ok(())
}

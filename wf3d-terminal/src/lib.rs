/// Terminal viewer that flies a wireframe box with the keyboard
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use wf3d_core::{Key, KeyMap, Projection, RigidBox};

pub mod renderer;

pub use renderer::LineRenderer;

/// Translate a terminal key code into a viewer-independent key.
pub fn translate_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    body: RigidBox,
    keymap: KeyMap,
    projection: Projection,
    renderer: LineRenderer,
    status: String,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// `viewport` is the size, in projection units, that the terminal
    /// window shows.
    pub fn new(
        body: RigidBox,
        keymap: KeyMap,
        projection: Projection,
        viewport: (f64, f64),
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            body,
            keymap,
            projection,
            renderer: LineRenderer::new(width as usize, height as usize, viewport.0, viewport.1),
            status: String::from("ready"),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn body(&self) -> &RigidBox {
        &self.body
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Every queued key is applied before the frame is drawn
            while self.running && event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one terminal event to the viewer state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            }) => {}
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => {
                self.running = false;
            }
            Event::Key(KeyEvent { code, .. }) => {
                if let Some(key) = translate_key(code) {
                    self.press(key);
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    /// Dispatch a key. A rejected command leaves the box where it was.
    pub fn press(&mut self, key: Key) {
        match self.keymap.dispatch(key, &mut self.body) {
            Ok(Some(command)) => {
                info!(%command, "applied");
                self.status = command.to_string();
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%err, ?key, "command rejected");
                self.status = format!("rejected: {err}");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let frame = self.projection.frame(self.body.wireframe());
        self.renderer.render_frame(&frame);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | FPS: {:.1} | Arrows=Move 1/2=Up/Down Q/W=Pitch A/S=Roll Z/X=Yaw Esc=Quit | {}",
                self.fps, self.status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use nalgebra::Point3;
    use wf3d_core::DEFAULT_DEPTH;

    fn test_app() -> TerminalApp {
        let body = RigidBox::cube(Point3::new(500.0, 400.0, 0.0), 100.0).unwrap();
        TerminalApp {
            body,
            keymap: KeyMap::default(),
            projection: Projection::centered(1000.0, 800.0, DEFAULT_DEPTH).unwrap(),
            renderer: LineRenderer::new(40, 20, 1000.0, 800.0),
            status: String::new(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_translate_key() {
        assert_eq!(translate_key(KeyCode::Up), Some(Key::Up));
        assert_eq!(translate_key(KeyCode::Char('q')), Some(Key::Char('q')));
        assert_eq!(translate_key(KeyCode::Tab), None);
    }

    #[test]
    fn test_key_press_moves_body() {
        let mut app = test_app();
        app.handle_event(key_event(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Press));

        assert_eq!(
            app.body().wireframe().position(0),
            Some(Point3::new(460.0, 350.0, -50.0))
        );
        assert_eq!(app.status(), "FORWARD 10");
    }

    #[test]
    fn test_release_is_ignored() {
        let mut app = test_app();
        let before = app.body().clone();
        app.handle_event(key_event(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release));
        assert_eq!(app.body(), &before);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_event(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press));
        assert!(!app.is_running());

        let mut app = test_app();
        app.handle_event(key_event(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press));
        assert!(!app.is_running());

        // Plain `q` pitches rather than quitting.
        let mut app = test_app();
        app.handle_event(key_event(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press));
        assert!(app.is_running());
        assert_eq!(app.status(), "PITCH 0.1");
    }

    #[test]
    fn test_shifted_letter_runs_default_command() {
        let mut app = test_app();
        app.handle_event(key_event(KeyCode::Char('Q'), KeyModifiers::SHIFT, KeyEventKind::Press));
        assert_eq!(app.status(), "PITCH 0.1");

        app.handle_event(key_event(KeyCode::Char('X'), KeyModifiers::NONE, KeyEventKind::Press));
        assert_eq!(app.status(), "YAW 0.1");
    }
}

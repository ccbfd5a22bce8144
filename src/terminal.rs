//! Terminal front end: raw mode, key polling, resize handling and frame
//! pacing around a [`Scene`].

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use log::{info, warn};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::scene::Scene;

const TARGET_FPS: f64 = 30.0;
/// Longest step handed to the simulation, so a stall does not blow it up.
const MAX_DT: f32 = 0.05;
const KEY_HINTS: &str = "(R - toggle, Esc - exit)";

struct TerminalApp {
    scene: Scene,
    size: (u16, u16),
    last_frame: Instant,
    quit: bool,
}

impl TerminalApp {
    fn new(config: SceneConfig) -> Result<Self, SceneError> {
        Ok(TerminalApp {
            scene: Scene::new(config)?,
            size: (0, 0),
            last_frame: Instant::now(),
            quit: false,
        })
    }

    fn resize(&mut self, new_size: (u16, u16)) -> Result<(), SceneError> {
        if new_size != self.size {
            self.size = new_size;
            self.scene.configure(new_size.0 as usize, new_size.1 as usize)?;
        }
        Ok(())
    }

    /// Drain pending events without blocking.
    fn input(&mut self) -> Result<(), SceneError> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                    KeyCode::Char('r') | KeyCode::Char('R') => self.scene.toggle_mode(),
                    _ => {}
                },
                Event::Resize(w, h) => self.resize((w, h))?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Sleep toward the frame target and return the clamped step.
    fn pace(&mut self) -> f32 {
        let frame_time = Duration::from_secs_f64(1.0 / TARGET_FPS);
        let elapsed = self.last_frame.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt.min(MAX_DT)
    }

    fn render(&mut self, out: &mut Stdout, dt: f32) -> io::Result<()> {
        let frame = self.scene.step(dt);
        let width = frame.buffer.width();

        for (y, row) in frame.buffer.rows().enumerate() {
            let line: String = row.iter().collect();
            queue!(out, cursor::MoveTo(0, y as u16), Print(line))?;
        }

        let mut status = format!("{}  {}", frame.status, KEY_HINTS);
        status.truncate(width);
        queue!(out, cursor::MoveTo(0, 0), Print(format!("{status:<width$}")))?;
        out.flush()
    }

    fn run(&mut self, out: &mut Stdout) -> Result<(), SceneError> {
        self.resize(terminal::size()?)?;
        while !self.quit {
            self.input()?;
            if self.quit {
                break;
            }
            // Some terminals never report resizes as events.
            self.resize(terminal::size()?)?;
            let dt = self.pace();
            self.render(out, dt)?;
        }
        Ok(())
    }
}

/// Take over the terminal and run until the user quits.
///
/// The terminal is restored even when the loop fails.
pub fn run_terminal(config: SceneConfig) -> Result<(), SceneError> {
    let mut app = TerminalApp::new(config)?;
    let mut out = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;
    info!("Terminal session started");

    let res = app.run(&mut out);

    if let Err(e) = execute!(out, cursor::Show, LeaveAlternateScreen) {
        warn!("Failed to leave the alternate screen: {e}");
    }
    terminal::disable_raw_mode()?;
    info!("Terminal session ended");
    res
}

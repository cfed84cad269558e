//! Application layer: the frame loop, screens, and the hand-off between
//! the simulation and the persistence worker.

pub mod input;
pub mod shutdown;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use vastland_data::{AccountProfile, LeaderboardEntry, ScoreRecord};

use crate::app::input::InputState;
use crate::app::shutdown::ShutdownManager;
use crate::client::{PersistenceManager, PersistenceRequest, PersistenceResult};
use crate::model::config::AppConfig;
use crate::model::world::{GameEvent, World};
use crate::ui::{Camera, Tui, WorldWidget};

const EVENT_LOG_CAPACITY: usize = 5;
const LEADERBOARD_LIMIT: usize = 10;

/// Game-state screens. Menus and login forms stay outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    GameOver,
}

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub screen: Screen,
    pub world: World,
    pub config: AppConfig,
    pub persistence: PersistenceManager,
    pub shutdown: ShutdownManager,
    pub account: Option<AccountProfile>,
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
    event_log: VecDeque<String>,
    score_submitted: bool,
    // FPS & timing
    fps: f64,
    frame_count: u64,
    last_fps_update: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let world = World::new(config.clone())?;
        let persistence = PersistenceManager::new(&config.net);

        // Stored credentials authenticate in the background; gameplay does
        // not wait for the result.
        if let (Some(username), Some(password)) = (&config.net.username, &config.net.password) {
            persistence.submit(PersistenceRequest::Authenticate {
                username: username.clone(),
                password: password.clone(),
            });
        }

        Ok(Self {
            running: true,
            paused: false,
            screen: Screen::Playing,
            world,
            config,
            persistence,
            shutdown: ShutdownManager::new(),
            account: None,
            leaderboard: None,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            score_submitted: false,
            fps: 0.0,
            frame_count: 0,
            last_fps_update: Instant::now(),
        })
    }

    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let tick_rate = Duration::from_millis(16);
        let mut last_tick = Instant::now();
        let mut input = InputState::default();

        while self.running {
            tui.terminal.draw(|f| self.draw(f))?;

            // 1. Input
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                loop {
                    if let Event::Key(key) = event::read()? {
                        input.handle_key(key);
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
            if input.quit {
                self.running = false;
            }
            if input.take_pause() {
                self.paused = !self.paused;
            }
            if input.take_restart() && self.screen == Screen::GameOver {
                self.restart()?;
            }

            // 2. Simulation tick
            if last_tick.elapsed() >= tick_rate {
                let dt = last_tick.elapsed().as_secs_f64().min(0.1);
                last_tick = Instant::now();
                if self.screen == Screen::Playing && !self.paused {
                    let events = self.world.update(dt, &input.take_frame());
                    self.handle_events(events);
                } else {
                    input.take_frame();
                }

                // 3. Fixed point: persistence completions enter the
                //    simulation thread here and nowhere else.
                self.drain_persistence();
                self.update_fps();
            }
        }

        self.shutdown.request_shutdown();
        self.shutdown.cleanup(&mut self.persistence);
        Ok(())
    }

    /// Runs without a terminal for a fixed number of ticks or until the
    /// player dies.
    pub fn run_headless(&mut self, max_ticks: u64, dt: f64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks && self.screen == Screen::Playing {
            let events = self.world.update(dt, &crate::model::world::PlayerInput::default());
            self.handle_events(events);
            self.drain_persistence();
            ticks += 1;
        }
        ticks
    }

    fn handle_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match &event {
                GameEvent::EnemySpawned { kind, .. } => {
                    self.push_log(format!("{kind:?} appeared"));
                }
                GameEvent::EnemySlain { kind } => {
                    self.push_log(format!("{kind:?} slain"));
                }
                GameEvent::PlayerDamaged { health_left, .. } => {
                    if *health_left <= 25.0 {
                        self.push_log("health critical".to_string());
                    }
                }
                GameEvent::PlayerDied {
                    kills,
                    survival_time,
                } => {
                    self.push_log("you died".to_string());
                    self.screen = Screen::GameOver;
                    self.submit_score(*kills, *survival_time);
                }
            }
        }
    }

    fn submit_score(&mut self, kills: u32, survival_time: f64) {
        if self.score_submitted {
            return;
        }
        self.score_submitted = true;

        let player_id = match (&self.account, self.world.player()) {
            (Some(account), _) => account.id,
            (None, Some(player)) => player.id,
            (None, None) => return,
        };
        let name = self
            .account
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| self.config.net.player_name.clone());

        self.persistence
            .submit(PersistenceRequest::SaveScore(ScoreRecord {
                player_id,
                name,
                kills,
                survival_time,
                score: ScoreRecord::compute_score(kills, survival_time),
                submitted_at: Utc::now().to_rfc3339(),
            }));
        self.persistence.submit(PersistenceRequest::TopScores {
            limit: LEADERBOARD_LIMIT,
        });
    }

    fn drain_persistence(&mut self) {
        for result in self.persistence.drain_completed() {
            match result {
                PersistenceResult::Authenticated(Ok(profile)) => {
                    self.push_log(format!("signed in as {}", profile.name));
                    self.account = Some(profile);
                }
                PersistenceResult::Authenticated(Err(e)) => {
                    tracing::warn!("authentication failed: {e}");
                    self.push_log("sign-in failed, playing offline".to_string());
                }
                PersistenceResult::Registered(Ok(())) => {
                    self.push_log("account registered".to_string());
                }
                PersistenceResult::Registered(Err(e)) => {
                    tracing::warn!("registration failed: {e}");
                }
                PersistenceResult::ScoreSaved(Ok(())) => {
                    self.push_log("score submitted".to_string());
                }
                PersistenceResult::ScoreSaved(Err(e)) => {
                    tracing::warn!("score submission failed: {e}");
                    self.push_log("score submission failed".to_string());
                }
                PersistenceResult::TopScores(Ok(entries)) => {
                    self.leaderboard = Some(entries);
                }
                PersistenceResult::TopScores(Err(e)) => {
                    tracing::warn!("leaderboard fetch failed: {e}");
                }
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        self.world = World::new(self.config.clone())?;
        self.screen = Screen::Playing;
        self.score_submitted = false;
        self.leaderboard = None;
        self.event_log.clear();
        self.push_log("new run".to_string());
        Ok(())
    }

    fn push_log(&mut self, line: String) {
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_fps_update.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_fps_update = Instant::now();
        }
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        self.draw_status(f, chunks[0]);

        let camera = match self.world.player() {
            Some(player) => Camera::centered_on(player.x, player.y),
            None => Camera::centered_on(0.0, 0.0),
        };
        f.render_widget(WorldWidget::new(&self.world, camera), chunks[1]);

        self.draw_event_log(f, chunks[2]);

        if self.screen == Screen::GameOver {
            self.draw_game_over(f);
        } else if self.paused {
            let area = centered_rect(f.area(), 20, 3);
            f.render_widget(Clear, area);
            f.render_widget(
                Paragraph::new("PAUSED")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                area,
            );
        }
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let line = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(inner);

        let (health, max_health, kills, survival) = match self.world.player() {
            Some(player) => {
                let state = player.as_player();
                (
                    player.health,
                    player.max_health,
                    state.map(|s| s.kills).unwrap_or(0),
                    state.map(|s| s.survival_time).unwrap_or(0.0),
                )
            }
            None => (0.0, 1.0, 0, 0.0),
        };
        let percent = ((health / max_health) * 100.0).clamp(0.0, 100.0) as u16;
        let health_gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Red))
            .percent(percent)
            .label(format!("HP {health:.0}/{max_health:.0}"));
        f.render_widget(health_gauge, line[0]);

        let online = if self.account.is_some() {
            "online"
        } else {
            "offline"
        };
        f.render_widget(
            Paragraph::new(format!(
                " kills {kills} | {survival:.0}s | chunks {} | {:.0} fps | {online}",
                self.world.chunks().resident_count(),
                self.fps,
            )),
            line[1],
        );
    }

    fn draw_event_log(&self, f: &mut Frame, area: Rect) {
        let text = self.event_log.back().cloned().unwrap_or_default();
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Log")),
            area,
        );
    }

    fn draw_game_over(&self, f: &mut Frame) {
        let area = centered_rect(f.area(), 44, 16);
        f.render_widget(Clear, area);

        let (kills, survival) = self
            .world
            .player()
            .and_then(|p| p.as_player())
            .map(|s| (s.kills, s.survival_time))
            .unwrap_or((0, 0.0));
        let score = ScoreRecord::compute_score(kills, survival);

        let mut lines = vec![
            "GAME OVER".to_string(),
            String::new(),
            format!("kills: {kills}   survived: {survival:.0}s"),
            format!("score: {score}"),
            String::new(),
        ];
        match &self.leaderboard {
            Some(entries) if !entries.is_empty() => {
                lines.push("top scores".to_string());
                for entry in entries.iter().take(5) {
                    lines.push(format!(
                        "{:>2}. {:<12} {:>6}",
                        entry.rank, entry.name, entry.score
                    ));
                }
            }
            Some(_) => lines.push("leaderboard empty".to_string()),
            None => {}
        }
        lines.push(String::new());
        lines.push("[r] restart   [q] quit".to_string());

        f.render_widget(
            Paragraph::new(lines.join("\n"))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> App {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        App::new(config).unwrap()
    }

    #[test]
    fn test_new_app_starts_playing() {
        let app = offline_app();
        assert!(app.running);
        assert_eq!(app.screen, Screen::Playing);
        assert!(app.account.is_none());
    }

    #[test]
    fn test_player_death_transitions_to_game_over() {
        let mut app = offline_app();
        app.handle_events(vec![GameEvent::PlayerDied {
            kills: 3,
            survival_time: 42.0,
        }]);
        assert_eq!(app.screen, Screen::GameOver);
    }

    #[test]
    fn test_restart_resets_the_run() {
        let mut app = offline_app();
        app.handle_events(vec![GameEvent::PlayerDied {
            kills: 3,
            survival_time: 42.0,
        }]);
        app.restart().unwrap();
        assert_eq!(app.screen, Screen::Playing);
        let player = app.world.player().unwrap();
        assert!(player.alive);
        assert_eq!(player.as_player().unwrap().kills, 0);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut app = offline_app();
        for i in 0..20 {
            app.push_log(format!("line {i}"));
        }
        assert_eq!(app.event_log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(app.event_log.back().unwrap(), "line 19");
    }
}

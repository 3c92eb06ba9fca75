//! The shell mode machine: landing, boot, desktop (with overlays), and the
//! terminal session. Pure state + input routing; every side effect (timers,
//! persistence, render/stop requests) goes through [`HostOps`] so tests can
//! drive the machine with a spy host.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use score_store::{ScoreEntry, ScoreGame, StoreError};
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;
use yos_games::{CheckersGame, Direction, Side, SnakeGame, TetrisGame};
use yos_shell::clock::format_clock;
use yos_shell::{Action, Session};
use yos_tui::InputEvent;

use crate::boot::{BOOT_COMPLETE_MS, BOOT_STEPS};
use crate::content::{ContentKind, DESKTOP_ICONS, QUOTES, START_MENU_ITEMS};
use crate::theme::Theme;

pub const SNAKE_TICK_MS: u64 = 150;
pub const TETRIS_TICK_MS: u64 = 700;
pub const CLOCK_TICK_MS: u64 = 60_000;

const SCORES_NOT_SAVED: &str = "(scores not saved)";
const SCORES_UNAVAILABLE: &str = "(scores unavailable)";

/// Mode generation. Timers carry the epoch they were scheduled under; a
/// firing whose epoch no longer matches is stale and ignored.
pub type Epoch = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    BootStep(usize),
    BootComplete,
    SnakeTick(u32),
    TetrisTick(u32),
    ClockTick,
}

/// Side-effect seam between the mode machine and the runtime.
pub trait HostOps {
    fn schedule(&mut self, purpose: TimerPurpose, epoch: Epoch, delay: Duration);
    fn request_render(&mut self);
    fn request_stop(&mut self);
    fn now(&self) -> OffsetDateTime;
    fn load_scores(&mut self, game: ScoreGame) -> Result<Vec<ScoreEntry>, StoreError>;
    fn record_score(
        &mut self,
        game: ScoreGame,
        entry: ScoreEntry,
    ) -> Result<Vec<ScoreEntry>, StoreError>;
    fn delete_score(
        &mut self,
        game: ScoreGame,
        index: usize,
    ) -> Result<Vec<ScoreEntry>, StoreError>;
    fn clear_scores(&mut self, game: ScoreGame) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct BootState {
    pub progress: u8,
    pub messages: Vec<&'static str>,
}

pub struct DesktopState {
    pub selected_icon: usize,
    pub start_menu: Option<usize>,
    pub overlay: Option<Overlay>,
    pub clock: String,
}

pub struct TerminalState {
    pub session: Session,
    pub input: String,
}

pub enum Mode {
    Landing,
    Booting(BootState),
    Desktop(DesktopState),
    Terminal(TerminalState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModeKind {
    Landing,
    Booting,
    Desktop,
    Terminal,
}

pub enum Overlay {
    Content(ContentKind),
    AboutSystem,
    Quote(&'static str),
    Game(GameSession),
    Scores(ScoresPanel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
    Tetris,
    Checkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Name,
    From,
}

pub struct GameSession {
    pub kind: GameKind,
    pub name: String,
    pub from: String,
    /// Bumped on every (re)start so ticks from a previous run are ignored.
    pub run: u32,
    pub phase: GamePhase,
}

pub enum GamePhase {
    EnterIdentity { field: IdentityField },
    Playing(ActiveGame),
    Over(GameOutcome),
}

pub enum ActiveGame {
    Snake(SnakeGame),
    Tetris(TetrisGame),
    Checkers(CheckersBoard),
}

pub struct CheckersBoard {
    pub game: CheckersGame,
    pub cursor: (usize, usize),
    pub selected: Option<(usize, usize)>,
}

impl CheckersBoard {
    fn new() -> Self {
        CheckersBoard {
            game: CheckersGame::new(),
            cursor: (5, 0),
            selected: None,
        }
    }
}

pub struct GameOutcome {
    pub score: Option<u32>,
    pub winner: Option<Side>,
    pub note: Option<String>,
    pub leaderboard: Vec<ScoreEntry>,
}

pub struct ScoresPanel {
    pub game: ScoreGame,
    pub entries: Vec<ScoreEntry>,
    pub selected: usize,
    pub note: Option<String>,
}

pub struct App {
    pub mode: Mode,
    pub theme: Theme,
    pub should_exit: bool,
    pub epoch: Epoch,
    rng: StdRng,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    #[must_use]
    pub fn with_rng(rng: StdRng) -> Self {
        App {
            mode: Mode::Landing,
            theme: Theme::new(),
            should_exit: false,
            epoch: 0,
            rng,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, host: &mut dyn HostOps) {
        match event {
            InputEvent::Key { key_id, .. } => self.handle_key(key_id, host),
            InputEvent::Text { text, .. } => self.handle_text(text, host),
            InputEvent::Paste { text, .. } => self.handle_paste(text),
            InputEvent::Resize { .. } | InputEvent::UnknownRaw { .. } => {}
        }
    }

    /// Applies a fired timer. Stale epochs and purposes that no longer match
    /// the current mode are discarded without effect.
    pub fn on_timer(&mut self, purpose: TimerPurpose, epoch: Epoch, host: &mut dyn HostOps) {
        if epoch != self.epoch {
            return;
        }
        match purpose {
            TimerPurpose::BootStep(index) => {
                if let Mode::Booting(state) = &mut self.mode {
                    if let Some(step) = BOOT_STEPS.get(index) {
                        state.progress = step.progress;
                        if let Some(message) = step.message {
                            state.messages.push(message);
                        }
                    }
                }
            }
            TimerPurpose::BootComplete => {
                if matches!(self.mode, Mode::Booting(_)) {
                    self.enter_desktop(host);
                }
            }
            TimerPurpose::ClockTick => {
                let now = host.now();
                let epoch = self.epoch;
                if let Mode::Desktop(state) = &mut self.mode {
                    state.clock = format_clock(now);
                    host.schedule(
                        TimerPurpose::ClockTick,
                        epoch,
                        Duration::from_millis(CLOCK_TICK_MS),
                    );
                }
            }
            TimerPurpose::SnakeTick(run) => self.on_snake_tick(run, host),
            TimerPurpose::TetrisTick(run) => self.on_tetris_tick(run, host),
        }
    }

    fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Landing => ModeKind::Landing,
            Mode::Booting(_) => ModeKind::Booting,
            Mode::Desktop(_) => ModeKind::Desktop,
            Mode::Terminal(_) => ModeKind::Terminal,
        }
    }

    fn handle_key(&mut self, key: &str, host: &mut dyn HostOps) {
        match self.mode_kind() {
            ModeKind::Landing => {
                if key == "enter" {
                    self.power_on(host);
                }
            }
            ModeKind::Booting => {
                if key == "escape" {
                    self.power_off();
                }
            }
            ModeKind::Desktop => self.desktop_key(key, host),
            ModeKind::Terminal => self.terminal_key(key, host),
        }
    }

    fn handle_text(&mut self, text: &str, host: &mut dyn HostOps) {
        match self.mode_kind() {
            ModeKind::Landing => {
                for ch in text.chars() {
                    match ch {
                        't' => self.theme.toggle_dark(),
                        '+' => self.theme.raise_brightness(),
                        '-' => self.theme.lower_brightness(),
                        'q' => {
                            self.should_exit = true;
                            host.request_stop();
                        }
                        _ => {}
                    }
                }
            }
            ModeKind::Booting => {}
            ModeKind::Desktop => self.desktop_text(text, host),
            ModeKind::Terminal => {
                if let Mode::Terminal(state) = &mut self.mode {
                    push_printable(&mut state.input, text);
                }
            }
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.mode {
            Mode::Terminal(state) => push_printable(&mut state.input, text),
            Mode::Desktop(state) => {
                if let Some(Overlay::Game(session)) = state.overlay.as_mut() {
                    if let GamePhase::EnterIdentity { field } = &session.phase {
                        let field = *field;
                        push_printable(identity_field_mut(session, field), text);
                    }
                }
            }
            _ => {}
        }
    }

    // --- mode transitions ---------------------------------------------------

    fn power_on(&mut self, host: &mut dyn HostOps) {
        self.epoch += 1;
        self.mode = Mode::Booting(BootState::default());
        for (index, step) in BOOT_STEPS.iter().enumerate() {
            host.schedule(
                TimerPurpose::BootStep(index),
                self.epoch,
                Duration::from_millis(step.delay_ms),
            );
        }
        host.schedule(
            TimerPurpose::BootComplete,
            self.epoch,
            Duration::from_millis(BOOT_COMPLETE_MS),
        );
    }

    fn power_off(&mut self) {
        self.epoch += 1;
        self.mode = Mode::Landing;
    }

    fn enter_desktop(&mut self, host: &mut dyn HostOps) {
        self.epoch += 1;
        self.mode = Mode::Desktop(DesktopState {
            selected_icon: 0,
            start_menu: None,
            overlay: None,
            clock: format_clock(host.now()),
        });
        host.schedule(
            TimerPurpose::ClockTick,
            self.epoch,
            Duration::from_millis(CLOCK_TICK_MS),
        );
    }

    fn enter_terminal(&mut self) {
        self.epoch += 1;
        self.mode = Mode::Terminal(TerminalState {
            session: Session::with_system_clock(),
            input: String::new(),
        });
    }

    // --- desktop ------------------------------------------------------------

    fn overlay_open(&self) -> bool {
        matches!(&self.mode, Mode::Desktop(state) if state.overlay.is_some())
    }

    fn desktop_key(&mut self, key: &str, host: &mut dyn HostOps) {
        if self.overlay_open() {
            self.overlay_key(key, host);
            return;
        }
        let mut menu_action: Option<usize> = None;
        if let Mode::Desktop(state) = &mut self.mode {
            if let Some(selected) = state.start_menu.as_mut() {
                match key {
                    "up" => *selected = selected.saturating_sub(1),
                    "down" => *selected = (*selected + 1).min(START_MENU_ITEMS.len() - 1),
                    "escape" => state.start_menu = None,
                    "enter" => {
                        menu_action = Some(*selected);
                        state.start_menu = None;
                    }
                    _ => {}
                }
            } else {
                match key {
                    "up" => state.selected_icon = state.selected_icon.saturating_sub(1),
                    "down" => {
                        state.selected_icon =
                            (state.selected_icon + 1).min(DESKTOP_ICONS.len() - 1);
                    }
                    "enter" => {
                        state.overlay =
                            Some(Overlay::Content(DESKTOP_ICONS[state.selected_icon].kind));
                    }
                    _ => {}
                }
            }
        }
        if let Some(index) = menu_action {
            self.activate_menu_item(index, host);
        }
    }

    fn desktop_text(&mut self, text: &str, host: &mut dyn HostOps) {
        if self.overlay_open() {
            self.overlay_text(text, host);
            return;
        }
        if let Mode::Desktop(state) = &mut self.mode {
            for ch in text.chars() {
                if ch == 's' {
                    state.start_menu = match state.start_menu {
                        Some(_) => None,
                        None => Some(0),
                    };
                }
            }
        }
    }

    fn activate_menu_item(&mut self, index: usize, host: &mut dyn HostOps) {
        match index {
            0 => self.set_overlay(Overlay::AboutSystem),
            1 => self.theme.next_wallpaper(),
            2 => self.open_game(GameKind::Snake),
            3 => self.open_game(GameKind::Tetris),
            4 => self.open_game(GameKind::Checkers),
            5 => self.open_scores(host),
            6 => {
                let quote = QUOTES[self.rng.gen_range(0..QUOTES.len())];
                self.set_overlay(Overlay::Quote(quote));
            }
            7 => self.enter_terminal(),
            8 => self.power_off(),
            _ => {}
        }
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        if let Mode::Desktop(state) = &mut self.mode {
            state.start_menu = None;
            state.overlay = Some(overlay);
        }
    }

    fn open_game(&mut self, kind: GameKind) {
        let phase = match kind {
            // Checkers keeps no leaderboard, so it skips the identity form.
            GameKind::Checkers => GamePhase::Playing(ActiveGame::Checkers(CheckersBoard::new())),
            _ => GamePhase::EnterIdentity {
                field: IdentityField::Name,
            },
        };
        self.set_overlay(Overlay::Game(GameSession {
            kind,
            name: String::new(),
            from: String::new(),
            run: 0,
            phase,
        }));
    }

    fn open_scores(&mut self, host: &mut dyn HostOps) {
        let (entries, note) = match host.load_scores(ScoreGame::Snake) {
            Ok(entries) => (entries, None),
            Err(_) => (Vec::new(), Some(SCORES_UNAVAILABLE.to_string())),
        };
        self.set_overlay(Overlay::Scores(ScoresPanel {
            game: ScoreGame::Snake,
            entries,
            selected: 0,
            note,
        }));
    }

    fn close_overlay(&mut self) {
        if let Mode::Desktop(state) = &mut self.mode {
            state.overlay = None;
        }
    }

    // --- overlays -----------------------------------------------------------

    fn overlay_key(&mut self, key: &str, host: &mut dyn HostOps) {
        if key == "escape" {
            self.close_overlay();
            return;
        }
        let epoch = self.epoch;
        let App { mode, rng, .. } = self;
        let Mode::Desktop(state) = mode else { return };
        let Some(overlay) = state.overlay.as_mut() else {
            return;
        };
        match overlay {
            Overlay::Game(session) => game_key(session, key, rng, epoch, host),
            Overlay::Scores(panel) => scores_key(panel, key, host),
            _ => {}
        }
    }

    fn overlay_text(&mut self, text: &str, host: &mut dyn HostOps) {
        let epoch = self.epoch;
        let App { mode, rng, .. } = self;
        let Mode::Desktop(state) = mode else { return };
        let Some(overlay) = state.overlay.as_mut() else {
            return;
        };
        match overlay {
            Overlay::Game(session) => game_text(session, text, rng, epoch, host),
            Overlay::Scores(panel) => scores_text(panel, text, host),
            _ => {}
        }
    }

    // --- terminal -----------------------------------------------------------

    fn terminal_key(&mut self, key: &str, host: &mut dyn HostOps) {
        let mut leave = false;
        if let Mode::Terminal(state) = &mut self.mode {
            match key {
                "enter" => {
                    let line = std::mem::take(&mut state.input);
                    if matches!(state.session.execute(&line), Action::Exit) {
                        leave = true;
                    }
                }
                "up" => {
                    if let Some(previous) = state.session.recall_previous(&state.input.clone()) {
                        state.input = previous;
                    }
                }
                "down" => {
                    if let Some(next) = state.session.recall_next() {
                        state.input = next;
                    }
                }
                "backspace" => pop_grapheme(&mut state.input),
                "ctrl+u" => state.input.clear(),
                "escape" => leave = true,
                _ => {}
            }
        }
        if leave {
            self.enter_desktop(host);
        }
    }

    // --- game ticks ---------------------------------------------------------

    fn on_snake_tick(&mut self, run: u32, host: &mut dyn HostOps) {
        let epoch = self.epoch;
        let App { mode, rng, .. } = self;
        let Some(session) = game_session_mut(mode) else {
            return;
        };
        if session.run != run {
            return;
        }
        let GamePhase::Playing(ActiveGame::Snake(game)) = &mut session.phase else {
            return;
        };
        game.tick(rng);
        if game.is_game_over() {
            let score = game.score();
            finish_grid_game(session, ScoreGame::Snake, score, host);
        } else {
            host.schedule(
                TimerPurpose::SnakeTick(run),
                epoch,
                Duration::from_millis(SNAKE_TICK_MS),
            );
        }
    }

    fn on_tetris_tick(&mut self, run: u32, host: &mut dyn HostOps) {
        let epoch = self.epoch;
        let App { mode, rng, .. } = self;
        let Some(session) = game_session_mut(mode) else {
            return;
        };
        if session.run != run {
            return;
        }
        let GamePhase::Playing(ActiveGame::Tetris(game)) = &mut session.phase else {
            return;
        };
        game.tick(rng);
        if game.is_game_over() {
            let score = game.score();
            finish_grid_game(session, ScoreGame::Tetris, score, host);
        } else {
            host.schedule(
                TimerPurpose::TetrisTick(run),
                epoch,
                Duration::from_millis(TETRIS_TICK_MS),
            );
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

fn game_session_mut(mode: &mut Mode) -> Option<&mut GameSession> {
    let Mode::Desktop(state) = mode else {
        return None;
    };
    match state.overlay.as_mut() {
        Some(Overlay::Game(session)) => Some(session),
        _ => None,
    }
}

fn identity_field_mut(session: &mut GameSession, field: IdentityField) -> &mut String {
    match field {
        IdentityField::Name => &mut session.name,
        IdentityField::From => &mut session.from,
    }
}

fn push_printable(target: &mut String, text: &str) {
    target.extend(text.chars().filter(|ch| !ch.is_control()));
}

fn pop_grapheme(input: &mut String) {
    if let Some((offset, _)) = input.grapheme_indices(true).last() {
        input.truncate(offset);
    }
}

fn start_play(
    session: &mut GameSession,
    rng: &mut StdRng,
    epoch: Epoch,
    host: &mut dyn HostOps,
) {
    session.run += 1;
    let run = session.run;
    match session.kind {
        GameKind::Snake => {
            session.phase = GamePhase::Playing(ActiveGame::Snake(SnakeGame::new()));
            host.schedule(
                TimerPurpose::SnakeTick(run),
                epoch,
                Duration::from_millis(SNAKE_TICK_MS),
            );
        }
        GameKind::Tetris => {
            session.phase = GamePhase::Playing(ActiveGame::Tetris(TetrisGame::new(rng)));
            host.schedule(
                TimerPurpose::TetrisTick(run),
                epoch,
                Duration::from_millis(TETRIS_TICK_MS),
            );
        }
        GameKind::Checkers => {
            session.phase = GamePhase::Playing(ActiveGame::Checkers(CheckersBoard::new()));
        }
    }
}

fn finish_grid_game(
    session: &mut GameSession,
    game: ScoreGame,
    score: u32,
    host: &mut dyn HostOps,
) {
    let entry = ScoreEntry::new(session.name.clone(), session.from.clone(), score);
    let (leaderboard, note) = match host.record_score(game, entry) {
        Ok(entries) => (entries, None),
        Err(_) => (Vec::new(), Some(SCORES_NOT_SAVED.to_string())),
    };
    session.phase = GamePhase::Over(GameOutcome {
        score: Some(score),
        winner: None,
        note,
        leaderboard,
    });
}

fn game_key(
    session: &mut GameSession,
    key: &str,
    rng: &mut StdRng,
    epoch: Epoch,
    host: &mut dyn HostOps,
) {
    let mut begin_play = false;
    let mut finished: Option<(ScoreGame, u32)> = None;
    let mut winner: Option<Side> = None;

    match &mut session.phase {
        GamePhase::EnterIdentity { field } => match key {
            // The leaderboard needs a name; an empty field refuses to advance.
            "enter" => match field {
                IdentityField::Name => {
                    if !session.name.is_empty() {
                        *field = IdentityField::From;
                    }
                }
                IdentityField::From => {
                    if !session.from.is_empty() {
                        begin_play = true;
                    }
                }
            },
            "backspace" => {
                let field = *field;
                pop_grapheme(identity_field_mut(session, field));
            }
            _ => {}
        },
        GamePhase::Playing(ActiveGame::Snake(game)) => {
            let direction = match key {
                "up" => Some(Direction::Up),
                "down" => Some(Direction::Down),
                "left" => Some(Direction::Left),
                "right" => Some(Direction::Right),
                _ => None,
            };
            if let Some(direction) = direction {
                game.steer(direction);
            }
        }
        GamePhase::Playing(ActiveGame::Tetris(game)) => {
            match key {
                "left" => game.move_left(),
                "right" => game.move_right(),
                "up" => game.rotate(),
                // Soft drop: one tick step, which may lock the piece.
                "down" => {
                    game.tick(rng);
                }
                _ => {}
            }
            if game.is_game_over() {
                finished = Some((ScoreGame::Tetris, game.score()));
            }
        }
        GamePhase::Playing(ActiveGame::Checkers(board)) => {
            checkers_key(board, key, rng);
            winner = board.game.winner();
        }
        GamePhase::Over(_) => {}
    }

    if begin_play {
        start_play(session, rng, epoch, host);
    }
    if let Some((game, score)) = finished {
        finish_grid_game(session, game, score, host);
    }
    if let Some(side) = winner {
        session.phase = GamePhase::Over(GameOutcome {
            score: None,
            winner: Some(side),
            note: None,
            leaderboard: Vec::new(),
        });
    }
}

fn game_text(
    session: &mut GameSession,
    text: &str,
    rng: &mut StdRng,
    epoch: Epoch,
    host: &mut dyn HostOps,
) {
    let mut restart = false;
    let mut finished: Option<(ScoreGame, u32)> = None;

    match &mut session.phase {
        GamePhase::EnterIdentity { field } => {
            let field = *field;
            push_printable(identity_field_mut(session, field), text);
        }
        GamePhase::Playing(ActiveGame::Tetris(game)) => {
            if text == " " {
                game.hard_drop(rng);
                if game.is_game_over() {
                    finished = Some((ScoreGame::Tetris, game.score()));
                }
            }
        }
        GamePhase::Playing(_) => {}
        GamePhase::Over(_) => {
            if text.contains('r') {
                restart = true;
            }
        }
    }

    if restart {
        start_play(session, rng, epoch, host);
    }
    if let Some((game, score)) = finished {
        finish_grid_game(session, game, score, host);
    }
}

fn checkers_key(board: &mut CheckersBoard, key: &str, rng: &mut StdRng) {
    match key {
        "up" => board.cursor.0 = board.cursor.0.saturating_sub(1),
        "down" => board.cursor.0 = (board.cursor.0 + 1).min(7),
        "left" => board.cursor.1 = board.cursor.1.saturating_sub(1),
        "right" => board.cursor.1 = (board.cursor.1 + 1).min(7),
        "enter" => checkers_select(board, rng),
        _ => {}
    }
}

fn checkers_select(board: &mut CheckersBoard, rng: &mut StdRng) {
    let cursor = board.cursor;
    if let Some(from) = board.selected {
        let chosen = board
            .game
            .legal_moves_from(from.0, from.1)
            .into_iter()
            .find(|mv| mv.to == cursor);
        if let Some(mv) = chosen {
            // Legal by construction; an out-of-date move is silently dropped.
            let _ = board.game.apply(mv);
            if let Some(pinned) = board.game.chain_piece() {
                board.selected = Some(pinned);
                board.cursor = pinned;
                return;
            }
            board.selected = None;
            // Black replies, following forced chains to completion.
            while board.game.winner().is_none() && board.game.turn() == Side::Black {
                match board.game.ai_move(rng) {
                    Some(reply) => {
                        let _ = board.game.apply(reply);
                    }
                    None => break,
                }
            }
            return;
        }
    }
    // Select (or reselect) one of the player's own pieces.
    let own = board
        .game
        .piece_at(cursor.0, cursor.1)
        .is_some_and(|piece| piece.side == Side::Red);
    board.selected = if own { Some(cursor) } else { None };
}

fn scores_key(panel: &mut ScoresPanel, key: &str, host: &mut dyn HostOps) {
    match key {
        "up" => panel.selected = panel.selected.saturating_sub(1),
        "down" => {
            panel.selected = (panel.selected + 1).min(panel.entries.len().saturating_sub(1));
        }
        "left" | "right" => {
            panel.game = match panel.game {
                ScoreGame::Snake => ScoreGame::Tetris,
                ScoreGame::Tetris => ScoreGame::Snake,
            };
            reload_scores(panel, host);
        }
        _ => {}
    }
}

fn scores_text(panel: &mut ScoresPanel, text: &str, host: &mut dyn HostOps) {
    for ch in text.chars() {
        match ch {
            'd' => {
                if panel.entries.is_empty() {
                    continue;
                }
                match host.delete_score(panel.game, panel.selected) {
                    Ok(entries) => {
                        panel.entries = entries;
                        panel.selected =
                            panel.selected.min(panel.entries.len().saturating_sub(1));
                        panel.note = None;
                    }
                    Err(_) => panel.note = Some(SCORES_NOT_SAVED.to_string()),
                }
            }
            'c' => match host.clear_scores(panel.game) {
                Ok(()) => {
                    panel.entries.clear();
                    panel.selected = 0;
                    panel.note = None;
                }
                Err(_) => panel.note = Some(SCORES_NOT_SAVED.to_string()),
            },
            _ => {}
        }
    }
}

fn reload_scores(panel: &mut ScoresPanel, host: &mut dyn HostOps) {
    match host.load_scores(panel.game) {
        Ok(entries) => {
            panel.entries = entries;
            panel.selected = 0;
            panel.note = None;
        }
        Err(_) => {
            panel.entries = Vec::new();
            panel.selected = 0;
            panel.note = Some(SCORES_UNAVAILABLE.to_string());
        }
    }
}

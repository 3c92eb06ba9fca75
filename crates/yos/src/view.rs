//! Frame assembly for every mode. Rendering is a pure function of the app
//! state; styling goes through the theme so brightness and wallpaper apply
//! everywhere.

use unicode_width::UnicodeWidthStr;
use yos_games::{snake, tetris, PieceColor, Side};
use yos_tui::clamp_to_width;

use crate::app::{
    ActiveGame, App, BootState, DesktopState, GameKind, GameOutcome, GamePhase, GameSession,
    IdentityField, Mode, Overlay, ScoresPanel, TerminalState,
};
use crate::content::{overlay_lines, ABOUT_SYSTEM, DESKTOP_ICONS, START_MENU_ITEMS};
use crate::theme::{fg, Rgb, Theme, RESET};

const WHITE: Rgb = Rgb(0xE5, 0xE7, 0xEB);
const DIM: Rgb = Rgb(0x6B, 0x72, 0x80);

pub fn render(app: &App, width: usize, height: usize) -> Vec<String> {
    let theme = app.theme;
    match &app.mode {
        Mode::Landing => landing(theme, width, height),
        Mode::Booting(state) => booting(theme, state, width, height),
        Mode::Desktop(state) => desktop(theme, state, width, height),
        Mode::Terminal(state) => terminal(theme, state, width, height),
    }
}

fn paint(theme: Theme, color: Rgb, text: &str) -> String {
    format!("{}{}{}", fg(theme.lit(color)), text, RESET)
}

fn centered(text: &str, styled: &str, width: usize) -> String {
    let visible = text.width();
    if visible >= width {
        return styled.to_string();
    }
    format!("{}{}", " ".repeat((width - visible) / 2), styled)
}

fn center_plain(theme: Theme, color: Rgb, text: &str, width: usize) -> String {
    centered(text, &paint(theme, color, text), width)
}

/// Pads the top so `lines` sit vertically centered in `height` rows.
fn vcenter(lines: Vec<String>, height: usize) -> Vec<String> {
    if lines.len() >= height {
        return lines;
    }
    let pad = (height - lines.len()) / 2;
    let mut frame = vec![String::new(); pad];
    frame.extend(lines);
    frame
}

fn landing(theme: Theme, width: usize, height: usize) -> Vec<String> {
    let accent = theme.accent();
    let mode = if theme.dark { "Dark" } else { "Light" };
    let status = format!(
        "{} · {}% brightness · {} wallpaper",
        mode,
        theme.brightness,
        theme.wallpaper_name()
    );
    let lines = vec![
        center_plain(theme, accent.gradient[0], "██╗   ██╗ ██████╗ ███████╗", width),
        center_plain(theme, accent.gradient[1], "╚██╗ ██╔╝██╔═══██╗██╔════╝", width),
        center_plain(theme, accent.gradient[1], " ╚████╔╝ ██║   ██║███████╗", width),
        center_plain(theme, accent.gradient[2], "  ╚██╔╝  ██║   ██║╚════██║", width),
        center_plain(theme, accent.gradient[2], "   ██║   ╚██████╔╝███████║", width),
        center_plain(theme, accent.gradient[2], "   ╚═╝    ╚═════╝ ╚══════╝", width),
        String::new(),
        center_plain(theme, WHITE, "YohannesOS", width),
        center_plain(theme, DIM, "Yohannes Goitom · Software Engineer", width),
        String::new(),
        center_plain(theme, accent.glow, "[ ⏻  Power On ]", width),
        String::new(),
        center_plain(theme, DIM, &status, width),
        center_plain(
            theme,
            DIM,
            "enter power on · t theme · +/- brightness · q quit",
            width,
        ),
    ];
    vcenter(lines, height)
}

fn booting(theme: Theme, state: &BootState, width: usize, height: usize) -> Vec<String> {
    let accent = theme.accent();
    let bar_width = 40usize;
    let filled = bar_width * usize::from(state.progress) / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(bar_width - filled)
    );
    let mut lines = vec![
        center_plain(theme, accent.primary, "YohannesOS", width),
        String::new(),
        centered(
            &format!("{bar} {:>3}%", state.progress),
            &format!(
                "{}{}{} {:>3}%",
                fg(theme.lit(accent.primary)),
                bar,
                RESET,
                state.progress
            ),
            width,
        ),
        String::new(),
    ];
    for message in &state.messages {
        lines.push(center_plain(theme, DIM, message, width));
    }
    vcenter(lines, height)
}

fn desktop(theme: Theme, state: &DesktopState, width: usize, height: usize) -> Vec<String> {
    let body_height = height.saturating_sub(1);
    let mut lines = match &state.overlay {
        Some(overlay) => overlay_frame(theme, overlay, width, body_height),
        None => desktop_body(theme, state),
    };
    lines.resize(body_height, String::new());
    lines.push(taskbar(theme, state, width));
    lines
}

fn desktop_body(theme: Theme, state: &DesktopState) -> Vec<String> {
    let accent = theme.accent();
    let mut lines = vec![String::new()];
    for (index, icon) in DESKTOP_ICONS.iter().enumerate() {
        let selected = index == state.selected_icon && state.start_menu.is_none();
        let line = if selected {
            format!("  {}", paint(theme, accent.primary, &format!("▸ {}", icon.label)))
        } else {
            format!("    {}", paint(theme, WHITE, icon.label))
        };
        lines.push(line);
    }
    if let Some(selected) = state.start_menu {
        lines.push(String::new());
        lines.extend(start_menu(theme, selected));
    } else {
        lines.push(String::new());
        lines.push(format!(
            "  {}",
            paint(theme, DIM, "↑/↓ select · enter open · s start menu")
        ));
    }
    lines
}

fn start_menu(theme: Theme, selected: usize) -> Vec<String> {
    let accent = theme.accent();
    let mut lines = vec![format!("  {}", paint(theme, accent.secondary, "┌─ Start ─────────────┐"))];
    for (index, item) in START_MENU_ITEMS.iter().enumerate() {
        let row = if index == selected {
            paint(theme, accent.primary, &format!("│ ▸ {item:<17} │"))
        } else {
            paint(theme, WHITE, &format!("│   {item:<17} │"))
        };
        lines.push(format!("  {row}"));
    }
    lines.push(format!(
        "  {}",
        paint(theme, accent.secondary, "└─────────────────────┘")
    ));
    lines
}

fn taskbar(theme: Theme, state: &DesktopState, width: usize) -> String {
    let accent = theme.accent();
    let left = format!(" ⏻ YohannesOS │ s Start │ {}", theme.wallpaper_name());
    let clock = format!("{} ", state.clock);
    let gap = width.saturating_sub(left.width() + clock.width());
    format!(
        "{}{}{}{}{}",
        fg(theme.lit(accent.secondary)),
        left,
        " ".repeat(gap),
        clock,
        RESET
    )
}

fn overlay_frame(theme: Theme, overlay: &Overlay, width: usize, height: usize) -> Vec<String> {
    match overlay {
        Overlay::Content(kind) => {
            static_block(theme, overlay_lines(*kind), width, height)
        }
        Overlay::AboutSystem => static_block(theme, ABOUT_SYSTEM, width, height),
        Overlay::Quote(quote) => {
            let lines = vec![
                center_plain(theme, theme.accent().primary, "Quote of the Day", width),
                String::new(),
                center_plain(theme, WHITE, &format!("“{quote}”"), width),
                String::new(),
                center_plain(theme, DIM, "esc close", width),
            ];
            vcenter(lines, height)
        }
        Overlay::Game(session) => game_frame(theme, session, width, height),
        Overlay::Scores(panel) => scores_frame(theme, panel, width, height),
    }
}

fn static_block(
    theme: Theme,
    block: &[&str],
    width: usize,
    height: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = block
        .iter()
        .map(|line| center_plain(theme, WHITE, line, width))
        .collect();
    lines.push(String::new());
    lines.push(center_plain(theme, DIM, "esc close", width));
    vcenter(lines, height)
}

fn game_frame(theme: Theme, session: &GameSession, width: usize, height: usize) -> Vec<String> {
    match &session.phase {
        GamePhase::EnterIdentity { field } => identity_form(theme, session, *field, width, height),
        GamePhase::Playing(ActiveGame::Snake(game)) => {
            let mut lines = snake_board(theme, game);
            lines.push(String::new());
            lines.push(paint(theme, DIM, "  arrows steer · esc close"));
            vcenter(lines, height)
        }
        GamePhase::Playing(ActiveGame::Tetris(game)) => {
            let mut lines = tetris_board(theme, game);
            lines.push(String::new());
            lines.push(paint(
                theme,
                DIM,
                "  ←/→ move · ↑ rotate · ↓ drop · space slam · esc close",
            ));
            vcenter(lines, height)
        }
        GamePhase::Playing(ActiveGame::Checkers(board)) => {
            let mut lines = checkers_board(theme, board);
            lines.push(String::new());
            lines.push(paint(
                theme,
                DIM,
                "  arrows move cursor · enter select/move · esc close",
            ));
            vcenter(lines, height)
        }
        GamePhase::Over(outcome) => game_over(theme, session.kind, outcome, width, height),
    }
}

fn identity_form(
    theme: Theme,
    session: &GameSession,
    field: IdentityField,
    width: usize,
    height: usize,
) -> Vec<String> {
    let accent = theme.accent();
    let title = match session.kind {
        GameKind::Snake => "Snake",
        GameKind::Tetris => "Tetris",
        GameKind::Checkers => "Checkers",
    };
    let cursor = |active: bool| if active { "█" } else { "" };
    let name_row = format!("Name: {}{}", session.name, cursor(field == IdentityField::Name));
    let from_row = format!("From: {}{}", session.from, cursor(field == IdentityField::From));
    let lines = vec![
        center_plain(theme, accent.primary, title, width),
        String::new(),
        center_plain(theme, DIM, "Sign the leaderboard before you play", width),
        String::new(),
        center_plain(theme, WHITE, &name_row, width),
        center_plain(theme, WHITE, &from_row, width),
        String::new(),
        center_plain(theme, DIM, "type to edit · enter next · esc close", width),
    ];
    vcenter(lines, height)
}

fn snake_board(theme: Theme, game: &yos_games::SnakeGame) -> Vec<String> {
    let accent = theme.accent();
    let size = snake::GRID_SIZE as usize;
    let mut lines = vec![format!(
        "  {}",
        paint(theme, DIM, &format!("┌{}┐", "─".repeat(size * 2)))
    )];
    for row in 0..size {
        let mut cells = String::new();
        for col in 0..size {
            let cell = (row as i32, col as i32);
            if cell == game.head() {
                cells.push_str(&paint(theme, accent.glow, "██"));
            } else if game.body().contains(&cell) {
                cells.push_str(&paint(theme, accent.primary, "██"));
            } else if cell == game.food() {
                cells.push_str(&paint(theme, accent.secondary, "▓▓"));
            } else {
                cells.push_str("  ");
            }
        }
        lines.push(format!(
            "  {}{}{}",
            paint(theme, DIM, "│"),
            cells,
            paint(theme, DIM, "│")
        ));
    }
    lines.push(format!(
        "  {}",
        paint(theme, DIM, &format!("└{}┘", "─".repeat(size * 2)))
    ));
    lines.push(format!(
        "  {}",
        paint(theme, WHITE, &format!("Score: {}", game.score()))
    ));
    lines
}

fn piece_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Cyan => Rgb(0x22, 0xD3, 0xEE),
        PieceColor::Yellow => Rgb(0xFA, 0xCC, 0x15),
        PieceColor::Purple => Rgb(0xA8, 0x55, 0xF7),
        PieceColor::Orange => Rgb(0xFB, 0x92, 0x3C),
        PieceColor::Blue => Rgb(0x3B, 0x82, 0xF6),
        PieceColor::Green => Rgb(0x4A, 0xDE, 0x80),
        PieceColor::Red => Rgb(0xF8, 0x71, 0x71),
    }
}

fn tetris_board(theme: Theme, game: &yos_games::TetrisGame) -> Vec<String> {
    // Project the falling piece onto a copy of the settled board.
    let mut composed: Vec<Vec<Option<PieceColor>>> = game.board().to_vec();
    let (px, py) = game.piece().position();
    for (dy, shape_row) in game.piece().shape().iter().enumerate() {
        for (dx, filled) in shape_row.iter().enumerate() {
            if *filled == 0 {
                continue;
            }
            let x = px + dx as i32;
            let y = py + dy as i32;
            if y >= 0 && (y as usize) < tetris::BOARD_HEIGHT && (x as usize) < tetris::BOARD_WIDTH
            {
                composed[y as usize][x as usize] = Some(game.piece().color());
            }
        }
    }

    let inner = tetris::BOARD_WIDTH * 2;
    let mut lines = vec![format!(
        "  {}",
        paint(theme, DIM, &format!("┌{}┐", "─".repeat(inner)))
    )];
    for row in &composed {
        let mut cells = String::new();
        for cell in row {
            match cell {
                Some(color) => cells.push_str(&paint(theme, piece_rgb(*color), "██")),
                None => cells.push_str("  "),
            }
        }
        lines.push(format!(
            "  {}{}{}",
            paint(theme, DIM, "│"),
            cells,
            paint(theme, DIM, "│")
        ));
    }
    lines.push(format!(
        "  {}",
        paint(theme, DIM, &format!("└{}┘", "─".repeat(inner)))
    ));
    lines.push(format!(
        "  {}",
        paint(
            theme,
            WHITE,
            &format!("Score: {}   Lines: {}", game.score(), game.lines())
        )
    ));

    let next = game.next_piece();
    let mut preview = String::from("  Next: ");
    for shape_row in next.shape() {
        for filled in shape_row {
            preview.push_str(if *filled == 1 { "█" } else { " " });
        }
        preview.push(' ');
    }
    lines.push(paint(theme, piece_rgb(next.color()), preview.trim_end()));
    lines
}

fn checkers_board(theme: Theme, board: &crate::app::CheckersBoard) -> Vec<String> {
    let accent = theme.accent();
    let red = Rgb(0xF8, 0x71, 0x71);
    let black = Rgb(0x9C, 0xA3, 0xAF);
    let game = &board.game;

    let turn_line = match game.turn() {
        Side::Red => paint(theme, red, "  Your move (red)"),
        Side::Black => paint(theme, black, "  Black is thinking..."),
    };

    let mut lines = vec![turn_line, String::new()];
    for row in 0..8usize {
        let mut cells = String::new();
        for col in 0..8usize {
            let dark = (row + col) % 2 == 1;
            let glyph = match game.piece_at(row, col) {
                Some(piece) => {
                    let symbol = if piece.king { "♛" } else { "●" };
                    let color = if piece.side == Side::Red { red } else { black };
                    paint(theme, color, symbol)
                }
                None => {
                    if dark {
                        paint(theme, DIM, "·")
                    } else {
                        " ".to_string()
                    }
                }
            };
            let cell = if board.cursor == (row, col) {
                format!("{}{}{}", paint(theme, accent.glow, "["), glyph, paint(theme, accent.glow, "]"))
            } else if board.selected == Some((row, col)) {
                format!("{}{}{}", paint(theme, accent.primary, "("), glyph, paint(theme, accent.primary, ")"))
            } else {
                format!(" {glyph} ")
            };
            cells.push_str(&cell);
        }
        lines.push(format!("  {cells}"));
    }
    lines
}

fn game_over(
    theme: Theme,
    kind: GameKind,
    outcome: &GameOutcome,
    width: usize,
    height: usize,
) -> Vec<String> {
    let accent = theme.accent();
    let mut lines = vec![center_plain(theme, accent.primary, "Game Over", width), String::new()];

    match outcome.winner {
        Some(Side::Red) => lines.push(center_plain(theme, accent.glow, "You win!", width)),
        Some(Side::Black) => lines.push(center_plain(theme, WHITE, "Black wins.", width)),
        None => {}
    }
    if let Some(score) = outcome.score {
        lines.push(center_plain(theme, WHITE, &format!("Final score: {score}"), width));
    }
    if let Some(note) = &outcome.note {
        lines.push(center_plain(theme, DIM, note, width));
    }

    if !outcome.leaderboard.is_empty() {
        lines.push(String::new());
        let title = match kind {
            GameKind::Snake => "Snake — Top Scores",
            GameKind::Tetris => "Tetris — Top Scores",
            GameKind::Checkers => "Top Scores",
        };
        lines.push(center_plain(theme, accent.secondary, title, width));
        for (rank, entry) in outcome.leaderboard.iter().take(5).enumerate() {
            let row = format!(
                "{:>2}. {:<12} {:<12} {:>6}",
                rank + 1,
                entry.name,
                entry.from,
                entry.score
            );
            lines.push(center_plain(theme, WHITE, &row, width));
        }
    }

    lines.push(String::new());
    lines.push(center_plain(theme, DIM, "r restart · esc close", width));
    vcenter(lines, height)
}

fn scores_frame(theme: Theme, panel: &ScoresPanel, width: usize, height: usize) -> Vec<String> {
    let accent = theme.accent();
    let title = match panel.game {
        score_store::ScoreGame::Snake => "High Scores — Snake",
        score_store::ScoreGame::Tetris => "High Scores — Tetris",
    };
    let mut lines = vec![center_plain(theme, accent.primary, title, width), String::new()];

    if let Some(note) = &panel.note {
        lines.push(center_plain(theme, DIM, note, width));
        lines.push(String::new());
    }

    if panel.entries.is_empty() {
        lines.push(center_plain(theme, DIM, "No scores yet.", width));
    } else {
        let header = format!("    {:<12} {:<12} {:>6}", "Name", "From", "Score");
        lines.push(center_plain(theme, accent.secondary, &header, width));
        for (rank, entry) in panel.entries.iter().enumerate() {
            let marker = if rank == panel.selected { "▸" } else { " " };
            let row = format!(
                "{marker} {:>2}. {:<12} {:<12} {:>6}",
                rank + 1,
                entry.name,
                entry.from,
                entry.score
            );
            let color = if rank == panel.selected { accent.primary } else { WHITE };
            lines.push(center_plain(theme, color, &row, width));
        }
    }

    lines.push(String::new());
    lines.push(center_plain(
        theme,
        DIM,
        "←/→ switch game · ↑/↓ select · d delete · c clear · esc close",
        width,
    ));
    vcenter(lines, height)
}

fn terminal(theme: Theme, state: &TerminalState, width: usize, height: usize) -> Vec<String> {
    let accent = theme.accent();
    let mut lines: Vec<String> = Vec::new();
    // The session seeds the banner as its first transcript entry; entries with
    // no input (the banner, blank submissions) render output only.
    for entry in state.session.transcript() {
        if !entry.input.is_empty() {
            lines.push(format!(
                "{}{}",
                paint(theme, accent.secondary, &state.session.prompt()),
                paint(theme, WHITE, &entry.input)
            ));
        }
        for output_line in &entry.output {
            lines.push(paint(theme, WHITE, output_line));
        }
    }
    lines.push(format!(
        "{}{}{}",
        paint(theme, accent.secondary, &state.session.prompt()),
        paint(theme, WHITE, &state.input),
        paint(theme, accent.glow, "█")
    ));

    // Keep the prompt on screen once the transcript outgrows the terminal.
    if lines.len() > height {
        lines.drain(..lines.len() - height);
    }
    lines
        .iter()
        .map(|line| clamp_to_width(line, width))
        .collect()
}

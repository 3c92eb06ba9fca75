//! End-to-end coverage of the screen, controller, timer service, and the
//! on-disk score store working together.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use score_store::{score_root, ScoreEntry, ScoreGame, ScoreStore};
use yos::app::{App, HostOps, Mode};
use yos::controller::{lock_unpoisoned, Controller};
use yos::screen::YosScreen;
use yos_tui::{InputEvent, Screen, TimerService};

struct Fixture {
    app: Arc<Mutex<App>>,
    host: Arc<Controller>,
    screen: YosScreen,
    // Keeps the worker thread alive for the duration of the test.
    _timers: TimerService,
    dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ScoreStore::new(score_root(dir.path()));
    let timers = TimerService::new();
    let app = Arc::new(Mutex::new(App::new()));
    let host = Controller::new(Arc::clone(&app), timers.handle(), store);
    let screen = YosScreen::new(Arc::clone(&app), Arc::clone(&host));
    Fixture {
        app,
        host,
        screen,
        _timers: timers,
        dir,
    }
}

fn key(id: &str) -> InputEvent {
    InputEvent::Key {
        raw: String::new(),
        key_id: id.to_string(),
    }
}

fn text(value: &str) -> InputEvent {
    InputEvent::Text {
        raw: String::new(),
        text: value.to_string(),
    }
}

fn strip_escapes(line: &str) -> String {
    let mut plain = String::new();
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for escape_ch in chars.by_ref() {
                if escape_ch == 'm' {
                    break;
                }
            }
            continue;
        }
        plain.push(ch);
    }
    plain
}

fn frame_text(screen: &mut YosScreen) -> String {
    screen
        .render(80, 24)
        .iter()
        .map(|line| strip_escapes(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn the_landing_frame_renders_and_q_requests_exit() {
    let mut fixture = fixture();

    let frame = frame_text(&mut fixture.screen);
    assert!(frame.contains("Power On"));

    fixture.screen.handle_event(&text("q"));
    assert!(lock_unpoisoned(&fixture.app).should_exit);
}

#[test]
fn the_controller_persists_scores_to_disk() {
    let fixture = fixture();
    let mut host = Arc::clone(&fixture.host);

    let entries = host
        .record_score(ScoreGame::Snake, ScoreEntry::new("Ada", "London", 120))
        .expect("record");
    assert_eq!(entries.len(), 1);

    // A fresh store over the same directory sees the same rows.
    let reread = ScoreStore::new(score_root(fixture.dir.path()));
    let entries = reread.load(ScoreGame::Snake).expect("load");
    assert_eq!(entries[0].name, "Ada");
    assert_eq!(entries[0].score, 120);

    host.clear_scores(ScoreGame::Snake).expect("clear");
    assert!(reread.load(ScoreGame::Snake).expect("reload").is_empty());
}

#[test]
fn the_boot_sequence_reaches_the_desktop_on_real_timers() {
    let mut fixture = fixture();

    fixture.screen.handle_event(&key("enter"));
    assert!(matches!(lock_unpoisoned(&fixture.app).mode, Mode::Booting(_)));

    // Boot completes at 2.8s; give the worker thread headroom.
    thread::sleep(Duration::from_millis(3400));

    assert!(matches!(lock_unpoisoned(&fixture.app).mode, Mode::Desktop(_)));
    let frame = frame_text(&mut fixture.screen);
    assert!(frame.contains("About Me"));
    assert!(frame.contains("Start"));
}

#[test]
fn a_terminal_session_runs_commands_through_the_screen() {
    let mut fixture = fixture();

    fixture.screen.handle_event(&key("enter"));
    thread::sleep(Duration::from_millis(3400));

    // Start menu, eighth entry: Terminal.
    fixture.screen.handle_event(&text("s"));
    for _ in 0..7 {
        fixture.screen.handle_event(&key("down"));
    }
    fixture.screen.handle_event(&key("enter"));
    assert!(matches!(
        lock_unpoisoned(&fixture.app).mode,
        Mode::Terminal(_)
    ));

    for ch in "pwd".chars() {
        fixture.screen.handle_event(&text(&ch.to_string()));
    }
    fixture.screen.handle_event(&key("enter"));

    let frame = frame_text(&mut fixture.screen);
    assert!(frame.contains("/home/yohannes"));

    for ch in "exit".chars() {
        fixture.screen.handle_event(&text(&ch.to_string()));
    }
    fixture.screen.handle_event(&key("enter"));
    assert!(matches!(
        lock_unpoisoned(&fixture.app).mode,
        Mode::Desktop(_)
    ));
}

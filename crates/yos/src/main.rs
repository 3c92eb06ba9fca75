use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use score_store::{score_root, ScoreStore};
use yos::app::App;
use yos::controller::{lock_unpoisoned, Controller};
use yos::screen::YosScreen;
use yos_tui::{ProcessTerminal, ScreenRc, TimerService, TUI};

fn main() -> io::Result<()> {
    let app = Arc::new(Mutex::new(App::new()));

    let store = ScoreStore::new(score_root(&data_dir()?));
    let timers = TimerService::new();
    let host = Controller::new(Arc::clone(&app), timers.handle(), store);

    let root: ScreenRc = Rc::new(RefCell::new(Box::new(YosScreen::new(
        Arc::clone(&app),
        Arc::clone(&host),
    ))));
    let mut tui = TUI::new(ProcessTerminal::new(), root);
    host.bind_render(tui.render_handle());

    tui.start()?;
    while !lock_unpoisoned(&app).should_exit {
        tui.run_blocking_once();
    }
    tui.stop()
}

/// Scores live under `$YOS_DATA_DIR` when set, otherwise the home directory,
/// falling back to the working directory.
fn data_dir() -> io::Result<PathBuf> {
    for key in ["YOS_DATA_DIR", "HOME"] {
        if let Ok(value) = std::env::var(key) {
            if !value.trim().is_empty() {
                return Ok(PathBuf::from(value));
            }
        }
    }
    std::env::current_dir()
}

//! Root screen: routes runtime input into the mode machine and renders the
//! current frame from a snapshot of the shared state.

use std::sync::{Arc, Mutex};

use yos_tui::{InputEvent, Screen};

use crate::app::App;
use crate::controller::{lock_unpoisoned, Controller};
use crate::view;

pub struct YosScreen {
    app: Arc<Mutex<App>>,
    host: Arc<Controller>,
}

impl YosScreen {
    pub fn new(app: Arc<Mutex<App>>, host: Arc<Controller>) -> Self {
        YosScreen { app, host }
    }
}

impl Screen for YosScreen {
    fn handle_event(&mut self, event: &InputEvent) {
        let mut host = Arc::clone(&self.host);
        lock_unpoisoned(&self.app).handle_event(event, &mut host);
    }

    fn render(&mut self, width: usize, height: usize) -> Vec<String> {
        view::render(&lock_unpoisoned(&self.app), width, height)
    }
}

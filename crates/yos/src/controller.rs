//! Bridges the mode machine to the runtime. Timers, render wakes, and the
//! score store live here so [`App`] itself stays free of side effects.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use score_store::{ScoreEntry, ScoreGame, ScoreStore, StoreError};
use time::OffsetDateTime;
use yos_tui::{RenderHandle, TimerHandle};

use crate::app::{App, Epoch, HostOps, TimerPurpose};

pub struct Controller {
    app: Arc<Mutex<App>>,
    render: OnceLock<RenderHandle>,
    timers: TimerHandle,
    store: ScoreStore,
}

impl Controller {
    pub fn new(app: Arc<Mutex<App>>, timers: TimerHandle, store: ScoreStore) -> Arc<Self> {
        Arc::new(Self {
            app,
            render: OnceLock::new(),
            timers,
            store,
        })
    }

    /// Binds the render handle once the runtime exists. The handle cannot be
    /// obtained before `TuiRuntime::new`, which in turn needs the root screen,
    /// so the controller starts unbound and is wired up in `main`.
    pub fn bind_render(&self, handle: RenderHandle) {
        let _ = self.render.set(handle);
    }

    pub fn app(&self) -> &Arc<Mutex<App>> {
        &self.app
    }

    fn wake_renderer(&self) {
        if let Some(handle) = self.render.get() {
            handle.request_render();
        }
    }
}

impl HostOps for Arc<Controller> {
    fn schedule(&mut self, purpose: TimerPurpose, epoch: Epoch, delay: Duration) {
        let controller = Arc::clone(self);
        self.timers.schedule(delay, move || {
            let mut host = Arc::clone(&controller);
            {
                let mut app = lock_unpoisoned(&controller.app);
                app.on_timer(purpose, epoch, &mut host);
            }
            controller.wake_renderer();
        });
    }

    fn request_render(&mut self) {
        self.wake_renderer();
    }

    fn request_stop(&mut self) {
        // The main loop polls `should_exit`; a render wake gets it there.
        self.wake_renderer();
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    fn load_scores(&mut self, game: ScoreGame) -> Result<Vec<ScoreEntry>, StoreError> {
        self.store.load(game)
    }

    fn record_score(
        &mut self,
        game: ScoreGame,
        entry: ScoreEntry,
    ) -> Result<Vec<ScoreEntry>, StoreError> {
        self.store.record(game, entry)
    }

    fn delete_score(
        &mut self,
        game: ScoreGame,
        index: usize,
    ) -> Result<Vec<ScoreEntry>, StoreError> {
        self.store.delete(game, index)
    }

    fn clear_scores(&mut self, game: ScoreGame) -> Result<(), StoreError> {
        self.store.clear(game)
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

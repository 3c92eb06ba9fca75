//! TUI runtime.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::config::EnvConfig;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::screen::Screen;
use crate::core::terminal::Terminal;
use crate::render::ScreenRenderer;

const STOP_DRAIN_MAX_MS: u64 = 1000;
const STOP_DRAIN_IDLE_MS: u64 = 50;
const COALESCE_MAX_DURATION_MS: u64 = 2;
const COALESCE_MAX_ITERATIONS: usize = 8;

pub type ScreenRc = Rc<RefCell<Box<dyn Screen>>>;

#[derive(Clone, Copy, Debug)]
struct CoalesceBudget {
    max_duration: Duration,
    max_iterations: usize,
}

impl Default for CoalesceBudget {
    fn default() -> Self {
        Self {
            max_duration: Duration::from_millis(COALESCE_MAX_DURATION_MS),
            max_iterations: COALESCE_MAX_ITERATIONS,
        }
    }
}

impl CoalesceBudget {
    fn allows(&self, start: Instant, iterations: usize) -> bool {
        start.elapsed() < self.max_duration && iterations < self.max_iterations
    }
}

#[derive(Debug, Default)]
struct CrashCleanup {
    ran: AtomicBool,
}

impl CrashCleanup {
    fn run<T: Terminal>(&self, terminal: &mut T) {
        if self.ran.swap(true, Ordering::SeqCst) {
            return;
        }

        // Crash/signal cleanup is best-effort: we may not know which protocol
        // toggles actually succeeded before the failure. These sequences are
        // safe and idempotent.
        let mut output = OutputGate::new();
        output.push(TerminalCmd::ShowCursor);
        output.push(TerminalCmd::BracketedPasteDisable);
        output.push(TerminalCmd::LeaveAltScreen);
        output.flush(terminal);
    }

    #[cfg(all(unix, not(test)))]
    fn run_best_effort(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut terminal = crate::platform::process_terminal::HookTerminal::new();
            self.run(&mut terminal);
        }));
    }
}

#[derive(Default)]
struct RuntimeWakeState {
    pending_inputs: Vec<String>,
    pending_resize: bool,
    render_requested: bool,
    stop_requested: bool,
}

#[derive(Default)]
struct RuntimeWake {
    state: Mutex<RuntimeWakeState>,
    cvar: Condvar,
}

impl RuntimeWake {
    fn wait_for_event(&self) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        while !state.stop_requested
            && state.pending_inputs.is_empty()
            && !state.pending_resize
            && !state.render_requested
        {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }

        !state.stop_requested
    }

    fn enqueue_input(&self, data: String) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.pending_inputs.push(data);
        self.cvar.notify_one();
    }

    fn signal_resize(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.pending_resize = true;
        self.cvar.notify_one();
    }

    fn request_render(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.render_requested = true;
        self.cvar.notify_one();
    }

    fn take_pending_resize(&self) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        let pending = state.pending_resize;
        state.pending_resize = false;
        pending
    }

    fn drain_inputs(&self) -> Vec<String> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut state.pending_inputs)
    }

    fn take_render_requested(&self) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        let requested = state.render_requested;
        state.render_requested = false;
        requested
    }

    fn peek_render_requested(&self) -> bool {
        let state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.render_requested
    }

    fn clear_render_requested(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.render_requested = false;
    }

    fn has_pending_non_render(&self) -> bool {
        let state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.pending_resize || !state.pending_inputs.is_empty()
    }

    fn reset_for_start(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.stop_requested = false;
        state.pending_resize = false;
        state.pending_inputs.clear();
        state.render_requested = false;
    }

    fn request_stop(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.stop_requested = true;
        self.cvar.notify_all();
    }
}

/// Thread-safe handle for waking the runtime from timers and workers.
#[derive(Clone)]
pub struct RenderHandle {
    wake: Arc<RuntimeWake>,
}

impl RenderHandle {
    pub fn request_render(&self) {
        self.wake.request_render();
    }
}

pub struct TuiRuntime<T: Terminal> {
    terminal: T,
    output: OutputGate,
    root: ScreenRc,
    renderer: ScreenRenderer,
    clear_on_shrink: bool,
    stopped: bool,
    wake: Arc<RuntimeWake>,
    coalesce_budget: CoalesceBudget,
    #[cfg(all(unix, not(test)))]
    signal_hook_guard: Option<crate::platform::SignalHookGuard>,
    #[cfg(all(unix, not(test)))]
    panic_hook_guard: Option<crate::platform::PanicHookGuard>,
}

impl<T: Terminal> TuiRuntime<T> {
    pub fn new(terminal: T, root: ScreenRc) -> Self {
        let config = EnvConfig::from_env();
        Self {
            terminal,
            output: OutputGate::new(),
            root,
            renderer: ScreenRenderer::new(),
            clear_on_shrink: config.clear_on_shrink,
            stopped: true,
            wake: Arc::new(RuntimeWake::default()),
            coalesce_budget: CoalesceBudget::default(),
            #[cfg(all(unix, not(test)))]
            signal_hook_guard: None,
            #[cfg(all(unix, not(test)))]
            panic_hook_guard: None,
        }
    }

    pub fn render_handle(&self) -> RenderHandle {
        RenderHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    pub fn terminal_rows(&self) -> u16 {
        self.terminal.rows()
    }

    pub fn terminal_columns(&self) -> u16 {
        self.terminal.columns()
    }

    /// Force the next render to repaint the entire screen.
    ///
    /// No-op when stopped to avoid perturbing the renderer's first-render baseline.
    pub fn request_full_redraw(&mut self) {
        if self.stopped {
            return;
        }
        self.renderer.request_full_redraw_next();
        self.request_render();
    }

    /// No-op when stopped to avoid perturbing the renderer's first-render baseline.
    pub fn set_clear_on_shrink(&mut self, enabled: bool) {
        if self.stopped {
            return;
        }
        self.clear_on_shrink = enabled;
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.output.clear();
        self.wake.reset_for_start();

        // Mark running early so Drop can attempt cleanup if `Terminal::start()` panics.
        self.stopped = false;

        #[cfg(all(unix, not(test)))]
        if let Err(err) = self.install_cleanup_hooks() {
            self.stopped = true;
            return Err(err);
        }

        let wake_input = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        if let Err(err) = self.terminal.start(
            Box::new(move |data| {
                wake_input.enqueue_input(data);
            }),
            Box::new(move || {
                wake_resize.signal_resize();
            }),
        ) {
            self.stopped = true;
            #[cfg(all(unix, not(test)))]
            self.uninstall_cleanup_hooks();
            return Err(err);
        }

        self.output.push(TerminalCmd::EnterAltScreen);
        self.output.push(TerminalCmd::BracketedPasteEnable);
        self.output.push(TerminalCmd::HideCursor);
        self.flush_output();
        self.request_render();

        Ok(())
    }

    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.wake.request_stop();
        self.output.push(TerminalCmd::ShowCursor);
        self.output.push(TerminalCmd::BracketedPasteDisable);
        self.output.push(TerminalCmd::LeaveAltScreen);
        self.flush_output();
        self.terminal
            .drain_input(STOP_DRAIN_MAX_MS, STOP_DRAIN_IDLE_MS);
        let result = self.terminal.stop();
        self.stopped = true;
        #[cfg(all(unix, not(test)))]
        self.uninstall_cleanup_hooks();
        result
    }

    #[cfg(all(unix, not(test)))]
    fn install_cleanup_hooks(&mut self) -> io::Result<()> {
        let cleanup = Arc::new(CrashCleanup::default());
        let signal_cleanup = Arc::clone(&cleanup);
        let panic_cleanup = Arc::clone(&cleanup);
        self.signal_hook_guard = Some(crate::platform::install_signal_handlers(move || {
            signal_cleanup.run_best_effort()
        })?);
        self.panic_hook_guard = Some(crate::platform::install_panic_hook(move || {
            panic_cleanup.run_best_effort()
        }));
        Ok(())
    }

    #[cfg(all(unix, not(test)))]
    fn uninstall_cleanup_hooks(&mut self) {
        self.signal_hook_guard = None;
        self.panic_hook_guard = None;
    }

    /// Block until at least one input/resize/render event is available, then
    /// coalesce work and render once (bounded).
    ///
    /// Note: this does **not** run an event loop until stopped; callers
    /// typically call this in a loop.
    pub fn run_blocking_once(&mut self) {
        if self.stopped {
            return;
        }

        if !self.wake.wait_for_event() {
            return;
        }

        self.run_coalesced_once();
    }

    fn run_coalesced_once(&mut self) {
        // Coalescing contract: drain all queued work (plus anything arriving
        // during the non-blocking window). If the budget expires with work
        // still queued, render with what was drained and defer the rest to
        // the next tick.
        let start = Instant::now();
        let mut iterations = 0;
        let mut yielded = false;

        loop {
            let mut did_work = false;

            if self.wake.take_pending_resize() {
                let event = InputEvent::Resize {
                    columns: self.terminal.columns(),
                    rows: self.terminal.rows(),
                };
                self.root.borrow_mut().handle_event(&event);
                self.request_render();
                did_work = true;
            }

            let inputs = self.wake.drain_inputs();
            if !inputs.is_empty() {
                for data in inputs {
                    self.handle_input(&data);
                }
                did_work = true;
            }

            if !did_work {
                if self.wake.peek_render_requested() {
                    self.wake.clear_render_requested();
                    self.do_render();
                }
                break;
            }

            if !self.coalesce_budget.allows(start, iterations) {
                if self.wake.peek_render_requested() {
                    self.wake.clear_render_requested();
                    self.do_render();
                }
                break;
            }

            iterations += 1;

            if !yielded && !self.wake.has_pending_non_render() && self.wake.peek_render_requested()
            {
                std::thread::yield_now();
                yielded = true;
            }
        }

        self.flush_output();
    }

    pub fn run_once(&mut self) {
        if self.stopped {
            return;
        }

        if self.wake.take_pending_resize() {
            let event = InputEvent::Resize {
                columns: self.terminal.columns(),
                rows: self.terminal.rows(),
            };
            self.root.borrow_mut().handle_event(&event);
            self.request_render();
        }

        let inputs = self.wake.drain_inputs();
        for data in inputs {
            self.handle_input(&data);
        }

        self.render_if_needed();
    }

    pub fn handle_input(&mut self, data: &str) {
        let events = parse_input_events(data);
        if events.is_empty() {
            return;
        }

        {
            let mut root = self.root.borrow_mut();
            for event in &events {
                root.handle_event(event);
            }
        }

        self.request_render();
    }

    pub fn request_render(&mut self) {
        self.wake.request_render();
    }

    pub fn render_if_needed(&mut self) {
        if self.wake.take_render_requested() {
            self.do_render();
        }
        self.flush_output();
    }

    pub fn render_now(&mut self) {
        self.wake.clear_render_requested();
        self.do_render();
        self.flush_output();
    }

    fn do_render(&mut self) {
        let width = self.terminal.columns() as usize;
        let height = self.terminal.rows() as usize;
        let lines = self.root.borrow_mut().render(width, height);
        let cmds = self
            .renderer
            .render(lines, width, height, self.clear_on_shrink);
        self.output.extend(cmds);
    }

    fn flush_output(&mut self) {
        self.output.flush(&mut self.terminal);
    }
}

impl<T: Terminal> Drop for TuiRuntime<T> {
    fn drop(&mut self) {
        if !self.stopped {
            let _ = self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeWake, TuiRuntime};
    use crate::core::input_event::InputEvent;
    use crate::core::screen::Screen;
    use crate::core::terminal::Terminal;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct TestTerminal {
        written: Arc<Mutex<String>>,
        columns: u16,
        rows: u16,
    }

    impl TestTerminal {
        fn new(columns: u16, rows: u16) -> Self {
            Self {
                written: Arc::new(Mutex::new(String::new())),
                columns,
                rows,
            }
        }
    }

    impl Terminal for TestTerminal {
        fn start(
            &mut self,
            _on_input: Box<dyn FnMut(String) + Send>,
            _on_resize: Box<dyn FnMut() + Send>,
        ) -> std::io::Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> std::io::Result<()> {
            Ok(())
        }

        fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

        fn write(&mut self, data: &str) {
            self.written
                .lock()
                .expect("written lock poisoned")
                .push_str(data);
        }

        fn columns(&self) -> u16 {
            self.columns
        }

        fn rows(&self) -> u16 {
            self.rows
        }
    }

    #[derive(Default)]
    struct RecordingScreen {
        events: Vec<InputEvent>,
        frame: Vec<String>,
        renders: usize,
    }

    struct SharedScreen(Rc<RefCell<RecordingScreen>>);

    impl Screen for SharedScreen {
        fn handle_event(&mut self, event: &InputEvent) {
            self.0.borrow_mut().events.push(event.clone());
        }

        fn render(&mut self, _width: usize, _height: usize) -> Vec<String> {
            let mut inner = self.0.borrow_mut();
            inner.renders += 1;
            inner.frame.clone()
        }
    }

    fn runtime_with_screen(
        columns: u16,
        rows: u16,
        frame: Vec<String>,
    ) -> (
        TuiRuntime<TestTerminal>,
        Rc<RefCell<RecordingScreen>>,
        Arc<Mutex<String>>,
    ) {
        let terminal = TestTerminal::new(columns, rows);
        let written = Arc::clone(&terminal.written);
        let screen = Rc::new(RefCell::new(RecordingScreen {
            frame,
            ..RecordingScreen::default()
        }));
        let root: Rc<RefCell<Box<dyn Screen>>> = Rc::new(RefCell::new(Box::new(SharedScreen(
            Rc::clone(&screen),
        ))));
        (TuiRuntime::new(terminal, root), screen, written)
    }

    fn written_bytes(written: &Arc<Mutex<String>>) -> String {
        written.lock().expect("written lock poisoned").clone()
    }

    #[test]
    fn start_enables_protocols_and_requests_initial_render() {
        let (mut tui, screen, written) = runtime_with_screen(20, 5, vec!["hello".to_string()]);
        tui.start().expect("start failed");

        let output = written_bytes(&written);
        assert!(output.contains("\x1b[?1049h"), "missing alt screen enable");
        assert!(output.contains("\x1b[?2004h"), "missing paste enable");
        assert!(output.contains("\x1b[?25l"), "missing hide cursor");

        tui.run_once();
        assert_eq!(screen.borrow().renders, 1);
        assert!(written_bytes(&written).contains("hello"));
    }

    #[test]
    fn stop_restores_terminal_protocols() {
        let (mut tui, _screen, written) = runtime_with_screen(20, 5, vec![]);
        tui.start().expect("start failed");
        tui.stop().expect("stop failed");

        let output = written_bytes(&written);
        assert!(output.contains("\x1b[?25h"), "missing show cursor");
        assert!(output.contains("\x1b[?2004l"), "missing paste disable");
        assert!(output.contains("\x1b[?1049l"), "missing alt screen leave");
    }

    #[test]
    fn input_reaches_root_screen_and_triggers_render() {
        let (mut tui, screen, _written) = runtime_with_screen(20, 5, vec![]);
        tui.start().expect("start failed");
        tui.run_once();
        let renders_before = screen.borrow().renders;

        tui.handle_input("\x1b[A");
        tui.run_once();

        let inner = screen.borrow();
        assert!(matches!(
            inner.events.as_slice(),
            [InputEvent::Key { key_id, .. }] if key_id == "up"
        ));
        assert!(inner.renders > renders_before);
    }

    #[test]
    fn resize_delivers_resize_event_with_current_size() {
        let (mut tui, screen, _written) = runtime_with_screen(42, 17, vec![]);
        tui.start().expect("start failed");
        tui.wake.signal_resize();
        tui.run_once();

        let inner = screen.borrow();
        assert!(inner
            .events
            .iter()
            .any(|event| matches!(event, InputEvent::Resize { columns: 42, rows: 17 })));
    }

    #[test]
    fn run_calls_are_noops_when_stopped() {
        let (mut tui, screen, _written) = runtime_with_screen(20, 5, vec![]);
        tui.run_once();
        tui.run_blocking_once();
        assert_eq!(screen.borrow().renders, 0);
    }

    #[test]
    fn render_handle_wakes_blocking_run() {
        let (mut tui, screen, _written) = runtime_with_screen(20, 5, vec![]);
        tui.start().expect("start failed");
        tui.run_once();
        let renders_before = screen.borrow().renders;

        let handle = tui.render_handle();
        handle.request_render();
        tui.run_blocking_once();

        assert!(screen.borrow().renders > renders_before);
    }

    #[test]
    fn stop_request_unblocks_wait_without_work() {
        let wake = RuntimeWake::default();
        wake.request_stop();
        assert!(!wake.wait_for_event());
    }
}

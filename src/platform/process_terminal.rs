//! Unix tty backend.
//!
//! Owns the real terminal for the fullscreen app: raw mode via termios, a
//! reader thread feeding [`StdinBuffer`], and a SIGWINCH listener. The
//! runtime drives it only through the [`Terminal`] trait; the crash-cleanup
//! hooks at the bottom restore the screen on panic or signal.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, Once};
#[cfg(unix)]
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
#[cfg(unix)]
use std::thread::{self, JoinHandle};
#[cfg(unix)]
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::core::terminal::Terminal;
#[cfg(unix)]
use crate::platform::stdin_buffer::{StdinBuffer, StdinEvent};

#[cfg(unix)]
use libc::{self, c_int};
#[cfg(unix)]
use signal_hook::iterator::Signals;

#[cfg(unix)]
const ESCAPE_HOLD_MS: u64 = 10;
#[cfg(unix)]
const POLL_INTERVAL_MS: i32 = 50;

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(unix)]
fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_millis() as u64
}

#[cfg(unix)]
#[derive(Default)]
struct Handlers {
    input: Option<Box<dyn FnMut(String) + Send>>,
    resize: Option<Box<dyn FnMut() + Send>>,
}

#[cfg(unix)]
fn tcgetattr(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn tcsetattr(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result > 0 && (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }
        if result > 0 {
            return Err(io::Error::other(format!(
                "poll(POLLOUT) returned revents=0x{:x}",
                fds.revents
            )));
        }
    }
}

#[cfg(unix)]
fn write_all_fd(fd: c_int, bytes: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < bytes.len() {
        let rest = &bytes[written..];
        let count = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
        if count > 0 {
            written += count as usize;
            continue;
        }
        if count == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
        }
        let err = io::Error::last_os_error();
        match err.kind() {
            io::ErrorKind::Interrupted => continue,
            io::ErrorKind::WouldBlock => wait_writable(fd)?,
            _ => return Err(err),
        }
    }
    Ok(())
}

#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    saved_termios: Option<libc::termios>,
    handlers: Arc<Mutex<Handlers>>,
    reader: Option<JoinHandle<()>>,
    resize_signals: Option<signal_hook::iterator::Handle>,
    resize_thread: Option<JoinHandle<()>>,
    stop_flag: Arc<AtomicBool>,
    draining: Arc<AtomicBool>,
    last_input_ms: Arc<AtomicU64>,
    output_dead: bool,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            saved_termios: None,
            handlers: Arc::new(Mutex::new(Handlers::default())),
            reader: None,
            resize_signals: None,
            resize_thread: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            draining: Arc::new(AtomicBool::new(false)),
            last_input_ms: Arc::new(AtomicU64::new(unix_ms())),
            output_dead: false,
        }
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        let original = match self.saved_termios {
            Some(termios) => termios,
            None => {
                let termios = tcgetattr(self.stdin_fd)?;
                self.saved_termios = Some(termios);
                termios
            }
        };
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        tcsetattr(self.stdin_fd, &raw)
    }

    fn restore_termios(&mut self) -> io::Result<()> {
        match self.saved_termios.as_ref() {
            Some(original) => tcsetattr(self.stdin_fd, original),
            None => Ok(()),
        }
    }

    fn spawn_reader(&mut self) {
        let fd = self.stdin_fd;
        let handlers = Arc::clone(&self.handlers);
        let stop = Arc::clone(&self.stop_flag);
        let draining = Arc::clone(&self.draining);
        let last_input_ms = Arc::clone(&self.last_input_ms);

        self.reader = Some(thread::spawn(move || {
            let mut chunk = [0u8; 4096];
            let mut buffer = StdinBuffer::new(ESCAPE_HOLD_MS);

            while !stop.load(Ordering::SeqCst) {
                let now = Instant::now();
                let timeout_ms = buffer.next_timeout_ms(now, POLL_INTERVAL_MS);
                let events = if poll_readable(fd, timeout_ms) {
                    let count =
                        unsafe { libc::read(fd, chunk.as_mut_ptr().cast(), chunk.len()) };
                    if count == 0 {
                        // Stdin closed; nothing further will arrive.
                        break;
                    }
                    if count < 0 {
                        let err = io::Error::last_os_error();
                        if err.kind() == io::ErrorKind::Interrupted {
                            continue;
                        }
                        break;
                    }
                    last_input_ms.store(unix_ms(), Ordering::SeqCst);
                    buffer.process(&chunk[..count as usize])
                } else {
                    buffer.flush_due(now)
                };

                if events.is_empty() || draining.load(Ordering::SeqCst) {
                    continue;
                }
                let mut handlers = lock_or_recover(&handlers);
                let Some(on_input) = handlers.input.as_mut() else {
                    continue;
                };
                for event in events {
                    match event {
                        StdinEvent::Data(data) => on_input(data),
                        StdinEvent::Paste(content) => {
                            on_input(format!("\x1b[200~{content}\x1b[201~"));
                        }
                    }
                }
            }
        }));
    }

    fn spawn_resize_listener(&mut self) -> io::Result<()> {
        let mut signals = Signals::new([libc::SIGWINCH])?;
        let handle = signals.handle();
        let handlers = Arc::clone(&self.handlers);

        self.resize_thread = Some(thread::spawn(move || {
            for _ in signals.forever() {
                let mut handlers = lock_or_recover(&handlers);
                if let Some(on_resize) = handlers.resize.as_mut() {
                    on_resize();
                }
            }
        }));
        self.resize_signals = Some(handle);
        Ok(())
    }

    fn clear_handlers(&self) {
        *lock_or_recover(&self.handlers) = Handlers::default();
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> io::Result<()> {
        {
            let mut handlers = lock_or_recover(&self.handlers);
            handlers.input = Some(on_input);
            handlers.resize = Some(on_resize);
        }
        self.stop_flag.store(false, Ordering::SeqCst);
        self.draining.store(false, Ordering::SeqCst);
        self.last_input_ms.store(unix_ms(), Ordering::SeqCst);

        if let Err(err) = self.enter_raw_mode() {
            self.clear_handlers();
            return Err(err);
        }
        if let Err(err) = self.spawn_resize_listener() {
            let _ = self.restore_termios();
            self.clear_handlers();
            return Err(err);
        }
        // Deliver the initial dimensions through the same resize path.
        unsafe {
            libc::raise(libc::SIGWINCH);
        }
        self.spawn_reader();
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        if let Some(handle) = self.resize_signals.take() {
            handle.close();
        }
        if let Some(thread) = self.resize_thread.take() {
            let _ = thread.join();
        }
        self.clear_handlers();

        // Discard unread bytes so they do not leak into the parent shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        self.restore_termios()
    }

    fn drain_input(&mut self, max_ms: u64, idle_ms: u64) {
        self.draining.store(true, Ordering::SeqCst);
        self.last_input_ms.store(unix_ms(), Ordering::SeqCst);

        let end = unix_ms().saturating_add(max_ms);
        loop {
            let now = unix_ms();
            if now >= end {
                break;
            }
            let idle = now.saturating_sub(self.last_input_ms.load(Ordering::SeqCst));
            if idle >= idle_ms {
                break;
            }
            let sleep_for = idle_ms.min(end.saturating_sub(now)).max(1);
            thread::sleep(Duration::from_millis(sleep_for));
        }

        self.draining.store(false, Ordering::SeqCst);
    }

    fn write(&mut self, data: &str) {
        if self.output_dead || data.is_empty() {
            return;
        }
        if write_all_fd(self.stdout_fd, data.as_bytes()).is_err() {
            // The tty is gone; stop writing instead of failing every frame.
            self.output_dead = true;
        }
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(cols, _)| cols)
            .unwrap_or(80)
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(_, rows)| rows)
            .unwrap_or(24)
    }
}

/// Write-only handle on the controlling tty for crash cleanup.
///
/// Opened non-blocking so cleanup can never hang; without a controlling tty
/// it writes nothing. Raw mode and termios are left untouched.
#[cfg(unix)]
pub(crate) struct HookTerminal {
    fd: c_int,
}

#[cfg(unix)]
impl HookTerminal {
    pub(crate) fn new() -> Self {
        let flags = libc::O_WRONLY | libc::O_NONBLOCK | libc::O_NOCTTY | libc::O_CLOEXEC;
        let fd = unsafe { libc::open(c"/dev/tty".as_ptr(), flags) };
        Self { fd }
    }
}

#[cfg(unix)]
impl Drop for HookTerminal {
    fn drop(&mut self) {
        if self.fd >= 0 {
            unsafe {
                libc::close(self.fd);
            }
        }
    }
}

#[cfg(unix)]
impl Terminal for HookTerminal {
    fn start(
        &mut self,
        _on_input: Box<dyn FnMut(String) + Send>,
        _on_resize: Box<dyn FnMut() + Send>,
    ) -> io::Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

    fn write(&mut self, data: &str) {
        if self.fd < 0 || data.is_empty() {
            return;
        }
        let bytes = data.as_bytes();
        let mut written = 0;
        while written < bytes.len() {
            let rest = &bytes[written..];
            let count = unsafe { libc::write(self.fd, rest.as_ptr().cast(), rest.len()) };
            if count > 0 {
                written += count as usize;
                continue;
            }
            let interrupted =
                count < 0 && io::Error::last_os_error().kind() == io::ErrorKind::Interrupted;
            if !interrupted {
                // Best-effort only: drop the rest rather than block or spin.
                break;
            }
        }
    }

    fn columns(&self) -> u16 {
        80
    }

    fn rows(&self) -> u16 {
        24
    }
}

type Cleanup = Arc<dyn Fn() + Send + Sync>;

static PANIC_CLEANUP: Mutex<Option<Cleanup>> = Mutex::new(None);

pub struct PanicHookGuard(());

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        *lock_or_recover(&PANIC_CLEANUP) = None;
    }
}

/// Arms `cleanup` to run before the panic report so it lands on a restored
/// screen. The wrapper hook is installed once per process; the guard only
/// arms and disarms the cleanup slot.
pub fn install_panic_hook<F>(cleanup: F) -> PanicHookGuard
where
    F: Fn() + Send + Sync + 'static,
{
    *lock_or_recover(&PANIC_CLEANUP) = Some(Arc::new(cleanup));

    static WRAPPER: Once = Once::new();
    WRAPPER.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let armed = lock_or_recover(&PANIC_CLEANUP).clone();
            if let Some(cleanup) = armed {
                cleanup();
            }
            previous(info);
        }));
    });

    PanicHookGuard(())
}

#[cfg(unix)]
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Runs `cleanup` once on the first SIGINT or SIGTERM.
#[cfg(unix)]
pub fn install_signal_handlers<F>(cleanup: F) -> io::Result<SignalHookGuard>
where
    F: Fn() + Send + Sync + 'static,
{
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    let handle = signals.handle();

    let thread = thread::spawn(move || {
        let mut ran = false;
        for _ in signals.forever() {
            if !ran {
                ran = true;
                cleanup();
            }
        }
    });

    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}

#[cfg(not(unix))]
pub struct ProcessTerminal;

#[cfg(not(unix))]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(unix))]
impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        _on_input: Box<dyn FnMut(String) + Send>,
        _on_resize: Box<dyn FnMut() + Send>,
    ) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "the tty backend requires a unix platform",
        ))
    }

    fn stop(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

    fn write(&mut self, _data: &str) {}

    fn columns(&self) -> u16 {
        80
    }

    fn rows(&self) -> u16 {
        24
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    };
    use std::time::{Duration, Instant};

    use super::{install_panic_hook, poll_readable, ProcessTerminal};
    use crate::core::terminal::Terminal;

    use libc::{self, c_int};

    struct Pty {
        master: c_int,
        slave: c_int,
    }

    impl Drop for Pty {
        fn drop(&mut self) {
            unsafe {
                libc::close(self.master);
                libc::close(self.slave);
            }
        }
    }

    fn open_pty() -> Pty {
        let mut master: c_int = 0;
        let mut slave: c_int = 0;
        let result = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, 0, "openpty failed");
        Pty { master, slave }
    }

    fn pty_terminal(pty: &Pty) -> ProcessTerminal {
        let mut terminal = ProcessTerminal::new();
        terminal.stdin_fd = pty.slave;
        terminal.stdout_fd = pty.slave;
        terminal
    }

    fn read_available(fd: c_int, timeout: Duration) -> Vec<u8> {
        let end = Instant::now() + timeout;
        let mut out = Vec::new();
        while Instant::now() < end {
            let remaining = end.saturating_duration_since(Instant::now());
            let timeout_ms = remaining.as_millis().min(i32::MAX as u128) as i32;
            if timeout_ms == 0 || !poll_readable(fd, timeout_ms) {
                break;
            }
            let mut buf = [0u8; 1024];
            let count = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
            if count <= 0 {
                break;
            }
            out.extend_from_slice(&buf[..count as usize]);
        }
        out
    }

    #[test]
    fn start_and_stop_write_nothing_to_the_terminal() {
        let pty = open_pty();
        let mut terminal = pty_terminal(&pty);

        terminal
            .start(Box::new(|_| {}), Box::new(|| {}))
            .expect("terminal start");
        let output = read_available(pty.master, Duration::from_millis(200));
        assert!(
            output.is_empty(),
            "start() wrote: {:?}",
            String::from_utf8_lossy(&output)
        );

        terminal.stop().expect("terminal stop");
        let output = read_available(pty.master, Duration::from_millis(200));
        assert!(
            output.is_empty(),
            "stop() wrote: {:?}",
            String::from_utf8_lossy(&output)
        );
    }

    #[test]
    fn raw_mode_is_entered_on_start_and_restored_on_stop() {
        let pty = open_pty();
        let mut terminal = pty_terminal(&pty);

        let before = super::tcgetattr(pty.slave).expect("tcgetattr before");
        assert_ne!(before.c_lflag & libc::ICANON, 0, "pty should start cooked");

        terminal
            .start(Box::new(|_| {}), Box::new(|| {}))
            .expect("terminal start");
        let raw = super::tcgetattr(pty.slave).expect("tcgetattr raw");
        assert_eq!(raw.c_lflag & libc::ICANON, 0, "start() must enter raw mode");

        terminal.stop().expect("terminal stop");
        let after = super::tcgetattr(pty.slave).expect("tcgetattr after");
        assert_ne!(
            after.c_lflag & libc::ICANON,
            0,
            "stop() must restore the saved termios"
        );
    }

    #[test]
    fn typed_bytes_and_paste_reach_the_input_handler() {
        let pty = open_pty();
        let mut terminal = pty_terminal(&pty);

        let (tx, rx) = mpsc::channel();
        terminal
            .start(
                Box::new(move |data| {
                    let _ = tx.send(data);
                }),
                Box::new(|| {}),
            )
            .expect("terminal start");

        let payload = b"a\x1b[200~hello\x1b[201~";
        let _ = unsafe { libc::write(pty.master, payload.as_ptr().cast(), payload.len()) };

        let first = rx
            .recv_timeout(Duration::from_millis(500))
            .expect("missing typed byte");
        assert_eq!(first, "a");
        let second = rx
            .recv_timeout(Duration::from_millis(500))
            .expect("missing paste event");
        assert_eq!(second, "\x1b[200~hello\x1b[201~");

        terminal.stop().expect("terminal stop");
    }

    #[test]
    fn start_raises_an_initial_resize() {
        let pty = open_pty();
        let mut terminal = pty_terminal(&pty);

        let (tx, rx) = mpsc::channel();
        terminal
            .start(
                Box::new(|_| {}),
                Box::new(move || {
                    let _ = tx.send(());
                }),
            )
            .expect("terminal start");

        rx.recv_timeout(Duration::from_millis(500))
            .expect("missing initial resize");

        terminal.stop().expect("terminal stop");
    }

    #[test]
    fn drain_input_returns_within_its_window() {
        let pty = open_pty();
        let mut terminal = pty_terminal(&pty);

        terminal
            .start(Box::new(|_| {}), Box::new(|| {}))
            .expect("terminal start");

        let start = Instant::now();
        terminal.drain_input(200, 50);
        let elapsed = start.elapsed();
        assert!(
            elapsed <= Duration::from_millis(300),
            "drain_input exceeded its window: {elapsed:?}"
        );

        terminal.stop().expect("terminal stop");
    }

    #[test]
    fn start_fails_cleanly_on_a_bad_fd() {
        let mut terminal = ProcessTerminal::new();
        terminal.stdin_fd = -1;
        terminal.stdout_fd = -1;

        let err = terminal
            .start(Box::new(|_| {}), Box::new(|| {}))
            .expect_err("expected start to fail");
        assert_eq!(err.raw_os_error(), Some(libc::EBADF), "got: {err:?}");
    }

    #[test]
    fn panic_cleanup_runs_while_armed_and_not_after_disarm() {
        let count = Arc::new(AtomicUsize::new(0));
        let guard = install_panic_hook({
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        let _ = std::panic::catch_unwind(|| panic!("boom"));
        assert_eq!(count.load(Ordering::SeqCst), 1, "armed cleanup must run");

        drop(guard);
        let _ = std::panic::catch_unwind(|| panic!("boom"));
        assert_eq!(
            count.load(Ordering::SeqCst),
            1,
            "disarmed cleanup must not run"
        );
    }
}

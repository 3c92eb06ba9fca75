//! Terminal seam.

/// Everything the runtime needs from a terminal. The real backend lives in
/// `platform::process_terminal`; tests substitute in-memory impls.
pub trait Terminal {
    /// Start the terminal with input and resize handlers.
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()>;

    /// Stop the terminal and restore its previous state.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Swallow stdin briefly before exiting so buffered keys do not leak
    /// into the parent shell over slow connections.
    fn drain_input(&mut self, max_ms: u64, idle_ms: u64);

    /// Write output to the terminal.
    fn write(&mut self, data: &str);

    /// Current dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

//! The boot sequence as data: timed progress steps consumed by one
//! cancelable scheduler instead of a pile of nested timeouts.

pub struct BootStep {
    pub delay_ms: u64,
    pub progress: u8,
    pub message: Option<&'static str>,
}

pub const BOOT_STEPS: [BootStep; 5] = [
    BootStep {
        delay_ms: 300,
        progress: 20,
        message: Some("→ Initializing desktop environment..."),
    },
    BootStep {
        delay_ms: 800,
        progress: 45,
        message: Some("→ Loading user profile..."),
    },
    BootStep {
        delay_ms: 1200,
        progress: 70,
        message: Some("→ Preparing workspace..."),
    },
    BootStep {
        delay_ms: 1800,
        progress: 90,
        message: Some("→ Welcome back."),
    },
    BootStep {
        delay_ms: 2200,
        progress: 100,
        message: None,
    },
];

/// Delay after power-on at which the desktop appears.
pub const BOOT_COMPLETE_MS: u64 = 2800;

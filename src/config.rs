//! Environment configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub clear_on_shrink: bool,
    pub debug_log: Option<String>,
    pub debug_redraw: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            clear_on_shrink: env_flag("YOS_CLEAR_ON_SHRINK"),
            debug_log: env_string_opt("YOS_TUI_DEBUG_LOG"),
            debug_redraw: env_flag("YOS_DEBUG_REDRAW"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_false() {
        let _lock = env_lock();
        let _g1 = set_env_guard("YOS_CLEAR_ON_SHRINK", None);
        let _g2 = set_env_guard("YOS_TUI_DEBUG_LOG", None);
        let _g3 = set_env_guard("YOS_DEBUG_REDRAW", None);

        let config = EnvConfig::from_env();
        assert!(!config.clear_on_shrink);
        assert!(config.debug_log.is_none());
        assert!(!config.debug_redraw);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("YOS_CLEAR_ON_SHRINK", Some("1"));
        let _g2 = set_env_guard("YOS_TUI_DEBUG_LOG", Some("/tmp/yos.log"));
        let _g3 = set_env_guard("YOS_DEBUG_REDRAW", Some("1"));

        let config = EnvConfig::from_env();
        assert!(config.clear_on_shrink);
        assert_eq!(config.debug_log.as_deref(), Some("/tmp/yos.log"));
        assert!(config.debug_redraw);
    }

    #[test]
    fn empty_debug_log_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("YOS_TUI_DEBUG_LOG", Some(""));
        let config = EnvConfig::from_env();
        assert!(config.debug_log.is_none());
    }
}

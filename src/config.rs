use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "SL")]
#[allow(non_snake_case)]
pub struct SlConfig {
    // Lines of captured stack text to keep, 0 keeps all of them.
    #[from_env(default = "0")]
    pub STACK_MAX_LINES: usize,
}

impl Default for SlConfig {
    fn default() -> Self {
        Self { STACK_MAX_LINES: 0 }
    }
}

pub static SL_CONFIG: LazyLock<SlConfig> =
    LazyLock::new(|| SlConfig::from_env().unwrap_or_default());

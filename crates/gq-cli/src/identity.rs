use std::env;

use gq_core::{IdentityProvider, Player};

/// Environment variable consulted when `--player` is not given.
pub const PLAYER_ENV: &str = "GQ_PLAYER";

/// Identity taken from the command line, falling back to the environment.
pub struct CliIdentity {
    id: Option<String>,
}

impl CliIdentity {
    pub fn new(flag: Option<String>) -> Self {
        Self::resolve(flag, env::var(PLAYER_ENV).ok())
    }

    fn resolve(flag: Option<String>, env_value: Option<String>) -> Self {
        let id = flag
            .or(env_value)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self { id }
    }
}

impl IdentityProvider for CliIdentity {
    fn current_player(&self) -> Option<Player> {
        self.id.as_deref().map(Player::new)
    }
}

//! Provider key registry
//!
//! Collects API keys from the environment at startup and hands them out in
//! round-robin order so concurrent workstreams spread across providers and
//! accounts. Indices are assigned at load time and never change afterwards.

use shared::{ProviderId, ProviderKey};
use tracing::{info, warn};

use crate::error::{ExtractorError, ExtractorResult};

/// Immutable pool of provider credentials
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    keys: Vec<ProviderKey>,
}

impl KeyRegistry {
    /// Load keys from environment variables.
    ///
    /// For each provider, reads the base variable (e.g. `OPENROUTER_API_KEY`)
    /// and numbered variants (`OPENROUTER_API_KEY_2`, `_3`, ...) until the
    /// first gap. Empty values are skipped with a warning.
    pub fn from_env() -> ExtractorResult<Self> {
        let mut keys = Vec::new();

        for provider in [ProviderId::OpenRouter, ProviderId::Anthropic, ProviderId::OpenAI] {
            let base = provider.env_var();

            if let Some(secret) = read_env_key(base) {
                keys.push(ProviderKey {
                    index: keys.len(),
                    provider,
                    secret,
                });
            }

            for suffix in 2.. {
                let var = format!("{base}_{suffix}");
                match read_env_key(&var) {
                    Some(secret) => keys.push(ProviderKey {
                        index: keys.len(),
                        provider,
                        secret,
                    }),
                    None => break,
                }
            }
        }

        Self::from_keys(keys)
    }

    /// Build a registry from pre-collected keys, reassigning indices
    pub fn from_keys(mut keys: Vec<ProviderKey>) -> ExtractorResult<Self> {
        if keys.is_empty() {
            return Err(ExtractorError::Config {
                message: "no provider API keys configured; set at least one of \
                          OPENROUTER_API_KEY, ANTHROPIC_API_KEY, OPENAI_API_KEY"
                    .to_string(),
            });
        }

        for (i, key) in keys.iter_mut().enumerate() {
            key.index = i;
        }

        info!(
            key_count = keys.len(),
            providers = ?keys.iter().map(|k| k.provider).collect::<Vec<_>>(),
            "provider key registry loaded"
        );

        Ok(Self { keys })
    }

    /// Key for the given slot, wrapping around the pool
    pub fn slot(&self, index: usize) -> &ProviderKey {
        &self.keys[index % self.keys.len()]
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Distinct providers present in the pool, in first-seen order
    pub fn providers(&self) -> Vec<ProviderId> {
        let mut seen = Vec::new();
        for key in &self.keys {
            if !seen.contains(&key.provider) {
                seen.push(key.provider);
            }
        }
        seen
    }
}

fn read_env_key(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => {
            warn!(var, "ignoring empty API key variable");
            None
        }
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

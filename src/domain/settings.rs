//! Application settings singleton.

use serde::{Deserialize, Serialize};

/// Estimated USD cost per 1000 tokens, used for the usage readout
pub const COST_PER_1K_TOKENS_USD: f64 = 0.00025;

/// User settings: API credential, summary prompt and token budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Credential for the summarization backend
    pub api_key: String,

    /// Prompt template sent along with each summary request
    pub summary_prompt: String,

    /// Monthly token budget
    pub monthly_token_limit: u64,

    /// Tokens consumed so far this period
    pub tokens_used: u64,
}

impl AppSettings {
    /// Merge a partial update into the settings
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(api_key) = update.api_key {
            self.api_key = api_key;
        }
        if let Some(summary_prompt) = update.summary_prompt {
            self.summary_prompt = summary_prompt;
        }
        if let Some(limit) = update.monthly_token_limit {
            self.monthly_token_limit = limit;
        }
        if let Some(tokens_used) = update.tokens_used {
            self.tokens_used = tokens_used;
        }
    }

    /// Share of the monthly budget consumed, in percent (may exceed 100)
    pub fn usage_percent(&self) -> f64 {
        if self.monthly_token_limit == 0 {
            return 0.0;
        }
        self.tokens_used as f64 / self.monthly_token_limit as f64 * 100.0
    }

    pub fn remaining_tokens(&self) -> u64 {
        self.monthly_token_limit.saturating_sub(self.tokens_used)
    }

    pub fn is_over_budget(&self) -> bool {
        self.tokens_used > self.monthly_token_limit
    }

    pub fn estimated_cost_usd(&self) -> f64 {
        self.tokens_used as f64 / 1000.0 * COST_PER_1K_TOKENS_USD
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

/// Partial update for the settings singleton
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub summary_prompt: Option<String>,
    pub monthly_token_limit: Option<u64>,
    pub tokens_used: Option<u64>,
}

impl SettingsUpdate {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn summary_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.summary_prompt = Some(prompt.into());
        self
    }

    pub fn monthly_token_limit(mut self, limit: u64) -> Self {
        self.monthly_token_limit = Some(limit);
        self
    }

    pub fn tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

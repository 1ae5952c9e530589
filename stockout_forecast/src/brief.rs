//! Supply chain briefs from a text generation provider
//!
//! The provider is reached through [`TextGenerator`]; this module builds the
//! prompt from stock ratios, picks a model from the configured priority list
//! and retries rate-limited calls with exponential backoff.

use crate::config::BriefConfig;
use crate::data::InventoryItem;
use crate::error::{ForecastError, Result};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{info, warn};

/// A text generation provider
pub trait TextGenerator {
    /// Names of the models that can generate content
    fn list_models(&self) -> Result<Vec<String>>;

    /// Generate prose for `prompt` with `model`
    fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Waits between retry attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Message returned when no API key is configured
pub const LOCKED_MESSAGE: &str =
    "🔒 **AI Insights Locked**: Please enter your API Key in the sidebar.";

/// Message returned when every attempt was rate limited
pub const QUOTA_EXCEEDED_MESSAGE: &str = "⚠️ **Generation Failed**: Quota exceeded after retries. Please try again later or upgrade your API plan.";

/// Prompt and the figures it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct BriefPrompt {
    pub text: String,
    pub total_inventory_value: f64,
    pub critical_value: f64,
    pub average_stock_ratio: f64,
    /// Names of the items listed in the prompt, lowest stock ratio first
    pub listed_items: Vec<String>,
}

impl BriefPrompt {
    /// Build the prompt from the `top_items` lowest stock-ratio items
    pub fn build(items: &[InventoryItem], top_items: usize) -> Self {
        let mut ranked: Vec<&InventoryItem> = items.iter().collect();
        ranked.sort_by(|a, b| a.stock_ratio().total_cmp(&b.stock_ratio()));
        ranked.truncate(top_items);

        let total_inventory_value: f64 = items.iter().map(|i| i.stock_value()).sum();
        let critical_value: f64 = ranked.iter().map(|i| i.stock_value()).sum();

        // Items without a reorder point have no meaningful ratio
        let ratios: Vec<f64> = items
            .iter()
            .map(|i| i.stock_ratio())
            .filter(|r| r.is_finite())
            .collect();
        let average_stock_ratio = stock_math::mean(&ratios).unwrap_or(0.0);

        let mut summary = String::from("product_name | current_stock | reorder_point | unit_cost\n");
        for item in &ranked {
            let _ = writeln!(
                summary,
                "{} | {} | {} | {:.2}",
                item.product_name, item.current_stock, item.reorder_point, item.unit_cost
            );
        }

        let text = format!(
            "You are a Senior Supply Chain Strategy Advisor with expertise in inventory optimization and procurement planning.

INVENTORY ANALYSIS DATA:
{summary}
CONTEXT METRICS:
- Total Inventory Value: {total}
- Critical Items Value at Risk: {critical}
- Average Stock Health Ratio: {ratio:.2}x

TASK: Provide a comprehensive **Supply Chain Strategy Brief** that includes:

1. **🔴 CRITICAL ALERTS** - List 2-3 products requiring immediate action with specific actions
2. **💰 CAPITAL IMPACT** - Quantify financial risk and procurement investment needed
3. **📊 OPTIMIZATION STRATEGY** - 2-3 specific, actionable recommendations
4. **⏱️ TIMELINE** - Priority sequence for procurement/restocking

FORMATTING REQUIREMENTS:
- Use clear markdown formatting with headers and bullet points
- Be specific with numbers and percentages
- Include timeframe estimates (e.g., \"within 48 hours\", \"next 2 weeks\")
- Keep tone professional but conversational
- Maximum 200 words total
- Focus on value-creation, not just warnings",
            total = format_currency(total_inventory_value),
            critical = format_currency(critical_value),
            ratio = average_stock_ratio,
        );

        Self {
            text,
            total_inventory_value,
            critical_value,
            average_stock_ratio,
            listed_items: ranked.iter().map(|i| i.product_name.clone()).collect(),
        }
    }
}

/// Dollar amount with thousands separators and two decimals
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Pick the first priority entry that some available model name contains
pub fn select_model(available: &[String], priority: &[String]) -> Option<String> {
    priority.iter().find_map(|preferred| {
        available
            .iter()
            .find(|name| name.contains(preferred.as_str()))
            .cloned()
    })
}

/// Generates supply chain briefs with model fallback and retry
#[derive(Debug)]
pub struct BriefClient<G, S = ThreadSleeper> {
    generator: G,
    api_key: Option<String>,
    config: BriefConfig,
    sleeper: S,
}

impl<G: TextGenerator> BriefClient<G> {
    /// Create a client that sleeps on the current thread between retries
    pub fn new(generator: G, api_key: Option<String>, config: BriefConfig) -> Self {
        Self {
            generator,
            api_key,
            config,
            sleeper: ThreadSleeper,
        }
    }
}

impl<G: TextGenerator, S: Sleeper> BriefClient<G, S> {
    /// Replace the sleeper used between retries
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> BriefClient<G, T> {
        BriefClient {
            generator: self.generator,
            api_key: self.api_key,
            config: self.config,
            sleeper,
        }
    }

    /// Backoff before the attempt following attempt number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.config.backoff_base_secs.saturating_pow(attempt))
    }

    /// Model to use: the best priority match among the listed models, or
    /// the top priority model when listing fails or nothing matches
    pub fn choose_model(&self) -> (String, Option<Vec<String>>) {
        let fallback = self
            .config
            .model_priority
            .first()
            .cloned()
            .unwrap_or_else(|| crate::config::DEFAULT_MODEL_PRIORITY[0].to_string());

        match self.generator.list_models() {
            Ok(available) => {
                let chosen = select_model(&available, &self.config.model_priority).unwrap_or(fallback);
                (chosen, Some(available))
            }
            Err(err) => {
                warn!(error = %err, "model discovery failed, using default model");
                (fallback, None)
            }
        }
    }

    /// Produce a brief for the inventory. Failures are reported in the
    /// returned text rather than as errors.
    pub fn brief(&self, items: &[InventoryItem]) -> String {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return LOCKED_MESSAGE.to_string(),
        };

        let prompt = BriefPrompt::build(items, self.config.top_items);
        let (model, available) = self.choose_model();

        let mut attempt = 0;
        while attempt < self.config.max_attempts {
            attempt += 1;
            match self.generator.generate(&model, &prompt.text) {
                Ok(text) => {
                    info!(%model, attempt, "brief generated");
                    return text;
                }
                Err(err) if err.is_rate_limited() && attempt < self.config.max_attempts => {
                    let wait = self.backoff(attempt);
                    warn!(
                        %model,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        wait_secs = wait.as_secs(),
                        "rate limited, retrying"
                    );
                    self.sleeper.sleep(wait);
                }
                Err(err) if err.is_rate_limited() => break,
                Err(err) => return failure_report(api_key, &model, available.as_deref(), &err),
            }
        }

        QUOTA_EXCEEDED_MESSAGE.to_string()
    }
}

fn failure_report(
    api_key: &str,
    model: &str,
    available: Option<&[String]>,
    err: &ForecastError,
) -> String {
    let tail: String = {
        let chars: Vec<char> = api_key.chars().collect();
        chars[chars.len().saturating_sub(4)..].iter().collect()
    };
    let available = match available {
        Some(models) => format!("{:?}", models),
        None => "Could not list".to_string(),
    };

    format!(
        "⚠️ **Generation Failed**: {err} \n\n
        **Debug Diagnostics:**
        - **API Key Status**: Set (Ends with: ...{tail})
        - **Selected Model**: {model}
        - **Available Models**: {available}
        - **Error Detail**: {err}
        "
    )
}

//! Shared test doubles for the enrichment pipeline

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tabulaxy_common::{Category, Difficulty, ModeFlags, WordEntry};
use tabulaxy_wordgen::{OracleError, PipelineSettings, WordOracle};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct Script {
    responses: Mutex<VecDeque<Result<String, OracleError>>>,
    prompts: Mutex<Vec<String>>,
    on_exhausted: Option<CancellationToken>,
}

/// Oracle answering from a fixed script
///
/// Once the script runs out every call fails; if a token was given it is
/// cancelled first, which ends an auto-loop.
#[derive(Clone, Default)]
pub struct ScriptedOracle {
    script: Arc<Script>,
}

impl ScriptedOracle {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())), None)
    }

    pub fn with_results<I>(results: I, on_exhausted: Option<CancellationToken>) -> Self
    where
        I: IntoIterator<Item = Result<String, OracleError>>,
    {
        Self {
            script: Arc::new(Script {
                responses: Mutex::new(results.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
                on_exhausted,
            }),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.script.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WordOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        self.script.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.responses.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => {
                if let Some(token) = &self.script.on_exhausted {
                    token.cancel();
                }
                Err(OracleError::Network("script exhausted".to_string()))
            }
        }
    }
}

/// Oracle whose request never completes
pub struct HangingOracle;

#[async_trait]
impl WordOracle for HangingOracle {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, OracleError> {
        std::future::pending().await
    }
}

pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        batch_size: 20,
        known_sample_size: 50,
        success_pause: Duration::ZERO,
        failure_pause: Duration::ZERO,
    }
}

pub fn entry(target: &str) -> WordEntry {
    WordEntry {
        target: target.to_string(),
        forbidden: vec![
            "Bir".into(),
            "İki".into(),
            "Üç".into(),
            "Dört".into(),
            "Beş".into(),
        ],
        category: Category::DailyLife,
        difficulty: Difficulty::Easy,
        mode_flags: ModeFlags::ALL,
    }
}

/// One card in the short generation-contract form
pub fn card(target: &str) -> String {
    format!(
        r#"{{"t": "{}", "f": ["bir", "iki", "üç", "dört", "beş"], "c": 3, "d": 1}}"#,
        target
    )
}

/// A fenced JSON array of cards, the way the oracle usually answers
pub fn fenced(cards: &[String]) -> String {
    format!("```json\n[\n{}\n]\n```", cards.join(",\n"))
}

//! Interactive operator menu
//!
//! ```text
//! Options:
//! 1. Generate specific batch
//! 2. Auto-generate (Loop through all categories)
//! 3. Exit
//! ```
//!
//! An interrupt at a prompt leaves the menu. An interrupt while a batch or
//! the auto-loop runs cancels that run at its next phase boundary and
//! returns to the menu.

use crate::corpus::Corpus;
use crate::oracle::WordOracle;
use crate::pipeline::{Pipeline, MAX_BATCH_COUNT};
use async_trait::async_trait;
use std::future::Future;
use std::io::Write;
use tabulaxy_common::{Category, Difficulty, Error, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Source of operator interrupts
#[async_trait]
pub trait InterruptSource: Send + Sync {
    /// Completes when the operator asks to stop
    async fn interrupted(&self);
}

/// Ctrl+C on the controlling terminal
pub struct CtrlC;

#[async_trait]
impl InterruptSource for CtrlC {
    async fn interrupted(&self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Line-oriented operator terminal
pub struct Console<W: Write> {
    lines: mpsc::UnboundedReceiver<String>,
    out: W,
}

impl Console<std::io::Stdout> {
    /// Console on stdin/stdout
    ///
    /// Stdin is read on a dedicated thread so a pending read never holds
    /// the runtime open at exit.
    pub fn stdio() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::new(rx, std::io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(lines: mpsc::UnboundedReceiver<String>, out: W) -> Self {
        Self { lines, out }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Show `text` and wait for one line; `None` at end of input
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.show_prompt(text)?;
        Ok(self.lines.recv().await)
    }

    fn show_prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Prompt, giving `None` on end of input or interrupt
    async fn ask(&mut self, interrupts: &dyn InterruptSource, text: &str) -> Result<Option<String>> {
        self.show_prompt(text)?;
        let line = tokio::select! {
            line = self.lines.recv() => line,
            _ = interrupts.interrupted() => None,
        };
        if line.is_none() {
            self.say("")?;
        }
        Ok(line)
    }
}

/// Drive `run` to completion, cancelling `token` on the first interrupt
///
/// `run` keeps going after the cancel so it can stop at its own
/// boundary; it must observe `token`.
async fn until_interrupted<F, T>(interrupts: &dyn InterruptSource, token: &CancellationToken, run: F) -> T
where
    F: Future<Output = T>,
{
    tokio::pin!(run);
    loop {
        tokio::select! {
            result = &mut run => return result,
            _ = interrupts.interrupted(), if !token.is_cancelled() => {
                info!("Interrupt received, stopping after the current phase");
                token.cancel();
            }
        }
    }
}

fn parse_in_range(text: &str, min: i64, max: i64) -> Option<i64> {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}

/// Run the menu until the operator exits
pub async fn run_menu<O, W>(
    pipeline: &Pipeline<O>,
    corpus: &mut Corpus,
    console: &mut Console<W>,
    interrupts: &dyn InterruptSource,
) -> Result<()>
where
    O: WordOracle,
    W: Write,
{
    console.say(&format!("📊 Current dataset size: {} words", corpus.len()))?;

    loop {
        console.say("\nOptions:")?;
        console.say("1. Generate specific batch")?;
        console.say("2. Auto-generate (Loop through all categories)")?;
        console.say("3. Exit")?;

        let Some(choice) = console.ask(interrupts, "Select option (1-3): ").await? else {
            break;
        };

        match choice.trim() {
            "1" => {
                if !single_batch(pipeline, corpus, console, interrupts).await? {
                    break;
                }
            }
            "2" => auto_generate(pipeline, corpus, console, interrupts).await?,
            "3" => break,
            other => console.say(&format!("Unknown option: {}", other))?,
        }
    }

    console.say("👋 Bye!")?;
    Ok(())
}

/// Returns false when the operator left at one of the prompts
async fn single_batch<O, W>(
    pipeline: &Pipeline<O>,
    corpus: &mut Corpus,
    console: &mut Console<W>,
    interrupts: &dyn InterruptSource,
) -> Result<bool>
where
    O: WordOracle,
    W: Write,
{
    let Some(category) = console.ask(interrupts, "Category ID (1-6): ").await? else {
        return Ok(false);
    };
    let Some(difficulty) = console.ask(interrupts, "Difficulty ID (1-4): ").await? else {
        return Ok(false);
    };
    let Some(count) = console
        .ask(interrupts, &format!("Count (max {}): ", MAX_BATCH_COUNT))
        .await?
    else {
        return Ok(false);
    };

    let Some(category) = parse_in_range(&category, 1, 6).and_then(Category::from_id) else {
        console.say("❌ Category ID must be 1-6")?;
        return Ok(true);
    };
    let Some(difficulty) = parse_in_range(&difficulty, 1, 4).and_then(Difficulty::from_id) else {
        console.say("❌ Difficulty ID must be 1-4")?;
        return Ok(true);
    };
    let Some(count) = parse_in_range(&count, 1, MAX_BATCH_COUNT as i64) else {
        console.say(&format!("❌ Count must be 1-{}", MAX_BATCH_COUNT))?;
        return Ok(true);
    };

    console.say("Generating...")?;
    let token = CancellationToken::new();
    let result = until_interrupted(
        interrupts,
        &token,
        pipeline.run_batch(corpus, category, difficulty, count as usize, &token),
    )
    .await;

    match result {
        Ok(outcome) => {
            console.say(&format!(
                "✅ Added {} new words",
                outcome.report.added_count()
            ))?;
            if outcome.report.duplicates + outcome.report.invalid > 0 {
                console.say(&format!(
                    "   Skipped {} known and {} invalid",
                    outcome.report.duplicates, outcome.report.invalid
                ))?;
            }
        }
        Err(Error::InterruptRequested) => console.say("🛑 Batch cancelled")?,
        Err(e) if e.is_recoverable() => console.say(&format!("❌ Error: {}", e))?,
        Err(e) => return Err(e),
    }

    Ok(true)
}

async fn auto_generate<O, W>(
    pipeline: &Pipeline<O>,
    corpus: &mut Corpus,
    console: &mut Console<W>,
    interrupts: &dyn InterruptSource,
) -> Result<()>
where
    O: WordOracle,
    W: Write,
{
    console.say("🔄 Starting auto-generation loop (Ctrl+C to stop)")?;

    let token = CancellationToken::new();
    let summary = until_interrupted(interrupts, &token, pipeline.run_auto_loop(corpus, &token)).await?;

    console.say("\n🛑 Auto-generation stopped.")?;
    console.say(&format!(
        "   {} batches ({} failed), {} words added. Total: {}",
        summary.batches,
        summary.failed_batches,
        summary.added,
        corpus.len()
    ))?;
    Ok(())
}

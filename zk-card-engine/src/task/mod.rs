//! The task loop: fetch one unit of work from the off-chain coordinator,
//! run the cryptography, prove, submit.
//!
//! A player processes at most one task at a time. Proving runs on the
//! blocking pool; dropping the orchestrator future discards the result
//! but does not interrupt the prover, which is not designed for
//! interruption. Pushed and polled delivery both funnel through
//! [`TaskSource`], so the single-flight invariant is enforced in one
//! place, keyed on task identity.

pub mod wire;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ProofError, TaskError};
use crate::keys::KeyPair;
use crate::shuffle::shuffle_and_rerandomize;
use crate::snark::{build_decrypt_input, build_shuffle_input, ProofService, SnarkProver};
use wire::{
    DecryptResultEntry, DecryptTask, ShuffleResultPayload, ShuffleTask, TaskEnvelope, TaskResult,
    TaskStep, WirePoint, WireProof,
};

const LOG_TARGET: &str = "zk_card_engine::task";

/// Orchestrator states. `Proving` is the long one; everything else is
/// bookkeeping around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FetchingTask,
    Shuffling,
    Decrypting,
    Proving,
    Submitting,
}

#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// How many "not your turn" responses to tolerate before timing out.
    pub max_turn_retries: u32,
    /// Fixed delay between turn retries.
    pub retry_delay: Duration,
    /// How many times to reshuffle with fresh randomness when the shuffle
    /// proof fails its sentinel.
    pub max_shuffle_attempts: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_turn_retries: 10,
            retry_delay: Duration::from_secs(2),
            max_shuffle_attempts: 3,
        }
    }
}

/// Fetch failures, split so the orchestrator can tell the retryable
/// timing condition from hard transport errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not this player's turn yet")]
    NotYourTurn,

    #[error("transport failure: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("coordinator rejected the result: {0}")]
    Rejected(String),
}

/// Where tasks come from. HTTP polling and websocket push both implement
/// this; the orchestrator does not care which.
#[async_trait]
pub trait TaskSource: Send {
    async fn next_task(&mut self) -> Result<TaskEnvelope, FetchError>;
}

/// Where results go.
#[async_trait]
pub trait ResultSink: Send {
    async fn submit(&mut self, task_id: &str, result: TaskResult) -> Result<(), SubmitError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed(TaskStep),
    /// The envelope repeated a task already in flight or already
    /// completed; it was dropped without reprocessing.
    Duplicate,
}

pub struct TaskOrchestrator<S, K, P> {
    source: S,
    sink: K,
    keys: KeyPair,
    service: Arc<ProofService<P>>,
    config: OrchestratorConfig,
    phase: Phase,
    in_flight: Option<String>,
    last_completed: Option<String>,
}

impl<S, K, P> TaskOrchestrator<S, K, P>
where
    S: TaskSource,
    K: ResultSink,
    P: SnarkProver + 'static,
{
    pub fn new(
        source: S,
        sink: K,
        keys: KeyPair,
        service: Arc<ProofService<P>>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            source,
            sink,
            keys,
            service,
            config,
            phase: Phase::Idle,
            in_flight: None,
            last_completed: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fetch one task, process it, submit the result. Failures are local
    /// to the task: state is reset and the next call fetches afresh.
    pub async fn run_once(&mut self) -> Result<TaskOutcome, TaskError> {
        let envelope = match self.fetch_with_retries().await {
            Ok(envelope) => envelope,
            Err(err) => {
                self.phase = Phase::Idle;
                return Err(err);
            }
        };

        if self.last_completed.as_deref() == Some(envelope.task_id.as_str())
            || self.in_flight.as_deref() == Some(envelope.task_id.as_str())
        {
            tracing::debug!(target: LOG_TARGET, task_id = %envelope.task_id, "duplicate task dropped");
            self.phase = Phase::Idle;
            return Ok(TaskOutcome::Duplicate);
        }
        self.in_flight = Some(envelope.task_id.clone());

        let result = match self.dispatch(&envelope).await {
            Ok(result) => result,
            Err(err) => {
                self.in_flight = None;
                self.phase = Phase::Idle;
                return Err(err);
            }
        };

        self.phase = Phase::Submitting;
        if let Err(err) = self.sink.submit(&envelope.task_id, result).await {
            self.in_flight = None;
            self.phase = Phase::Idle;
            return Err(TaskError::Submit(err.to_string()));
        }

        tracing::info!(target: LOG_TARGET, task_id = %envelope.task_id, step = ?envelope.step, "task submitted");
        self.last_completed = Some(envelope.task_id);
        self.in_flight = None;
        self.phase = Phase::Idle;
        Ok(TaskOutcome::Completed(envelope.step))
    }

    async fn fetch_with_retries(&mut self) -> Result<TaskEnvelope, TaskError> {
        self.phase = Phase::FetchingTask;
        let mut attempts = 0;
        loop {
            match self.source.next_task().await {
                Ok(envelope) => return Ok(envelope),
                Err(FetchError::NotYourTurn) => {
                    attempts += 1;
                    if attempts >= self.config.max_turn_retries {
                        return Err(TaskError::TurnTimeout(attempts));
                    }
                    tracing::debug!(target: LOG_TARGET, attempts, "not our turn, waiting");
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(FetchError::Transport(message)) => {
                    return Err(TaskError::Source(message));
                }
            }
        }
    }

    async fn dispatch(&mut self, envelope: &TaskEnvelope) -> Result<TaskResult, TaskError> {
        match envelope.step {
            TaskStep::Shuffle => {
                let task = envelope.data.shuffle.as_ref().ok_or(TaskError::EmptyTask)?;
                self.process_shuffle(task).await
            }
            TaskStep::DecryptOtherPlayersCards => {
                let task = envelope
                    .data
                    .decrypt_other_players_cards
                    .as_ref()
                    .ok_or(TaskError::EmptyTask)?;
                self.process_decrypt(task, envelope.step).await
            }
            TaskStep::DecryptMyCards => {
                let task = envelope
                    .data
                    .decrypt_my_cards
                    .as_ref()
                    .ok_or(TaskError::EmptyTask)?;
                self.process_decrypt(task, envelope.step).await
            }
        }
    }

    /// Shuffle, prove, and on a failed sentinel retry with an entirely
    /// fresh permutation and scalars. A failed witness is never reused or
    /// submitted.
    async fn process_shuffle(&mut self, task: &ShuffleTask) -> Result<TaskResult, TaskError> {
        self.phase = Phase::Shuffling;
        let (deck, aggregate_key) = task.decode()?;

        let max_attempts = self.config.max_shuffle_attempts.max(1);
        for attempt in 1..=max_attempts {
            let shuffled = {
                let mut rng = rand::thread_rng();
                shuffle_and_rerandomize(&mut rng, &deck, &aggregate_key)?
            };
            let input = build_shuffle_input(
                &aggregate_key,
                &deck,
                &shuffled.deck,
                &shuffled.witness.scalars,
            );

            self.phase = Phase::Proving;
            let service = Arc::clone(&self.service);
            let outcome = tokio::task::spawn_blocking(move || service.prove_shuffle(&input))
                .await
                .map_err(|err| TaskError::ProverJoin(err.to_string()))?;

            match outcome {
                Ok(bundle) => {
                    return Ok(TaskResult::Shuffle(ShuffleResultPayload::new(
                        &shuffled.deck,
                        &bundle,
                    )));
                }
                Err(ProofError::InvalidProof) if attempt < max_attempts => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        attempt,
                        "shuffle proof rejected, reshuffling with fresh randomness"
                    );
                    self.phase = Phase::Shuffling;
                }
                Err(ProofError::InvalidProof) => {
                    return Err(TaskError::ShuffleAttemptsExhausted(max_attempts));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(TaskError::ShuffleAttemptsExhausted(max_attempts))
    }

    /// Partial decryption is deterministic in its inputs, so a failed
    /// proof is not retried: it indicates a bug or a compromised key and
    /// fails the hand.
    async fn process_decrypt(
        &mut self,
        task: &DecryptTask,
        step: TaskStep,
    ) -> Result<TaskResult, TaskError> {
        self.phase = Phase::Decrypting;
        let mut entries = Vec::with_capacity(task.cards.len());

        for card in &task.cards {
            let c0 = card.c0.decode()?;
            let dec = c0.mul_scalar(self.keys.secret()).neg();
            let input = build_decrypt_input(&c0, self.keys.secret(), &dec);

            self.phase = Phase::Proving;
            let service = Arc::clone(&self.service);
            let bundle = tokio::task::spawn_blocking(move || {
                service.prove_partial_decryption(&input)
            })
            .await
            .map_err(|err| TaskError::ProverJoin(err.to_string()))??;

            entries.push(DecryptResultEntry {
                player_index: card.player_index,
                card_index: card.card_index,
                c0: card.c0.clone(),
                dec: WirePoint::encode(&dec),
                proof: WireProof::encode(&bundle.proof),
                public_signals: wire::signal_strings(&bundle),
            });
            self.phase = Phase::Decrypting;
        }

        Ok(match step {
            TaskStep::DecryptMyCards => TaskResult::DecryptMyCards(entries),
            _ => TaskResult::DecryptOtherPlayersCards(entries),
        })
    }
}

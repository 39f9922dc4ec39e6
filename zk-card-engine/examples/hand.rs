//! A complete hand played locally: three players shuffle in sequence
//! through the task orchestrator, two cards are dealt to the first
//! player, the other two players answer decryption tasks, and the owner
//! opens its hand.
//!
//! Uses the witness-checking mock prover in place of the external
//! Groth16 artifacts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::thread_rng;

use shuffle_essentials::homomorphic_encryption::el_gamal::{encrypt_vector, Parameters, Plaintext};
use zk_card_engine::cards::{all_cards, CardMap, DECK_SIZE};
use zk_card_engine::keys::{aggregate_public_key, KeyManager, DEFAULT_KEY_BITS};
use zk_card_engine::reveal::{compute_reveal_token, open_card, RevealToken};
use zk_card_engine::snark::mock::MockProver;
use zk_card_engine::snark::{encoding, ProofService};
use zk_card_engine::task::wire::{
    DecryptTask, ShuffleTask, TaskData, TaskEnvelope, TaskResult, TaskStep, WireCardRef, WirePoint,
};
use zk_card_engine::task::{
    FetchError, OrchestratorConfig, ResultSink, SubmitError, TaskOrchestrator, TaskSource,
};

struct QueueSource {
    queue: VecDeque<TaskEnvelope>,
}

#[async_trait]
impl TaskSource for QueueSource {
    async fn next_task(&mut self) -> Result<TaskEnvelope, FetchError> {
        self.queue
            .pop_front()
            .ok_or_else(|| FetchError::Transport("no more tasks".into()))
    }
}

#[derive(Clone, Default)]
struct QueueSink {
    results: Arc<Mutex<Vec<TaskResult>>>,
}

#[async_trait]
impl ResultSink for QueueSink {
    async fn submit(&mut self, _task_id: &str, result: TaskResult) -> Result<(), SubmitError> {
        self.results
            .lock()
            .expect("sink lock poisoned")
            .push(result);
        Ok(())
    }
}

async fn run_task<P>(
    player: &KeyManager,
    service: &Arc<ProofService<P>>,
    envelope: TaskEnvelope,
) -> Result<TaskResult>
where
    P: zk_card_engine::snark::SnarkProver + 'static,
{
    let sink = QueueSink::default();
    let results = Arc::clone(&sink.results);
    let mut orchestrator = TaskOrchestrator::new(
        QueueSource {
            queue: VecDeque::from([envelope]),
        },
        sink,
        player.key_pair().clone(),
        Arc::clone(service),
        OrchestratorConfig::default(),
    );
    orchestrator.run_once().await?;

    let mut results = results.lock().expect("sink lock poisoned");
    results.pop().ok_or_else(|| anyhow!("nothing submitted"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut rng = thread_rng();

    // Everyone generates a session key; the contract would aggregate the
    // registered public keys.
    let players: Vec<KeyManager> = (0..3)
        .map(|_| KeyManager::generate(&mut rng, DEFAULT_KEY_BITS))
        .collect();
    let aggregate =
        aggregate_public_key(&players.iter().map(|p| p.public_key()).collect::<Vec<_>>());

    // The coordinator masks the baseline deck under the aggregate key.
    let pp = Parameters::new();
    let card_points: Vec<Plaintext> = all_cards().map(|card| Plaintext(card.point())).collect();
    let (mut deck, _) = encrypt_vector(&pp, &aggregate, &card_points, &mut rng)
        .map_err(|e| anyhow!("{e}"))?;

    let service = Arc::new(ProofService::new(MockProver));

    // Each player receives a shuffle task in turn; the submitted deck
    // becomes the next player's input.
    for (index, player) in players.iter().enumerate() {
        let envelope = TaskEnvelope {
            task_id: format!("shuffle-{index}"),
            step: TaskStep::Shuffle,
            data: TaskData {
                shuffle: Some(ShuffleTask {
                    deck: encoding::deck_to_rows(&deck),
                    agg_key: WirePoint::encode(&aggregate),
                }),
                ..TaskData::default()
            },
        };

        match run_task(player, &service, envelope).await? {
            TaskResult::Shuffle(payload) => {
                deck = encoding::deck_from_rows(&payload.deck, DECK_SIZE)?;
                println!("player {index} shuffled and proved");
            }
            other => return Err(anyhow!("unexpected result: {other:?}")),
        }
    }

    // Slots 0 and 1 go to player 0. The other players each get a
    // decryption task for those ciphertexts.
    let hand = [deck[0], deck[1]];
    let mut tokens: Vec<Vec<RevealToken>> = vec![Vec::new(), Vec::new()];

    for (index, player) in players.iter().enumerate().skip(1) {
        let envelope = TaskEnvelope {
            task_id: format!("decrypt-for-player0-by-{index}"),
            step: TaskStep::DecryptOtherPlayersCards,
            data: TaskData {
                decrypt_other_players_cards: Some(DecryptTask {
                    cards: hand
                        .iter()
                        .enumerate()
                        .map(|(card_index, ciphertext)| WireCardRef {
                            player_index: 0,
                            card_index: card_index as u32,
                            c0: WirePoint::encode(&ciphertext.0),
                        })
                        .collect(),
                }),
                ..TaskData::default()
            },
        };

        match run_task(player, &service, envelope).await? {
            TaskResult::DecryptOtherPlayersCards(entries) => {
                for entry in entries {
                    tokens[entry.card_index as usize].push(RevealToken(entry.dec.decode()?));
                }
                println!("player {index} contributed partial decryptions");
            }
            other => return Err(anyhow!("unexpected result: {other:?}")),
        }
    }

    // The owner adds its own token to each card and resolves.
    let map = CardMap::new().map_err(|e| anyhow!("{e}"))?;
    for (card_index, ciphertext) in hand.iter().enumerate() {
        let (own, _own_proof) =
            compute_reveal_token(&mut thread_rng(), players[0].key_pair(), &ciphertext.0)?;
        tokens[card_index].push(own);

        let card = open_card(&map, ciphertext, &tokens[card_index])?;
        println!("player 0 card {card_index}: {card}");
    }

    Ok(())
}

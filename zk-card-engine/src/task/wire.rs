//! Serde DTOs of the coordinator interface: task intake envelopes and
//! result submission payloads. Everything numeric crosses the wire as
//! decimal field-strings; decoding validates shape and curve membership
//! before any value reaches the engine proper.

use ark_bls12_381::{G1Affine, G2Affine};
use serde::{Deserialize, Serialize};
use shuffle_essentials::curve::ProjectivePoint;
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;

use crate::cards::DECK_SIZE;
use crate::error::DecodeError;
use crate::snark::{encoding, ProofBundle, SnarkProof};

/// Protocol steps as the coordinator spells them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStep {
    #[serde(rename = "SHUFFLE")]
    Shuffle,
    #[serde(rename = "DECRYPT_OTHER_PLAYERS_CARDS")]
    DecryptOtherPlayersCards,
    #[serde(rename = "DECRYPT_MY_CARDS")]
    DecryptMyCards,
}

/// One unit of work pushed or polled from the coordinator. `task_id` is
/// the deduplication key: both delivery paths converge on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEnvelope {
    pub task_id: String,
    pub step: TaskStep,
    pub data: TaskData,
}

/// Task payload keyed by step name, mirroring the coordinator's shape.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskData {
    #[serde(rename = "SHUFFLE", skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<ShuffleTask>,
    #[serde(
        rename = "DECRYPT_OTHER_PLAYERS_CARDS",
        skip_serializing_if = "Option::is_none"
    )]
    pub decrypt_other_players_cards: Option<DecryptTask>,
    #[serde(rename = "DECRYPT_MY_CARDS", skip_serializing_if = "Option::is_none")]
    pub decrypt_my_cards: Option<DecryptTask>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleTask {
    /// Packed `6 x 52` rows of decimal strings.
    pub deck: Vec<Vec<String>>,
    pub agg_key: WirePoint,
}

impl ShuffleTask {
    pub fn decode(&self) -> Result<(Vec<Ciphertext>, ProjectivePoint), DecodeError> {
        let deck = encoding::deck_from_rows(&self.deck, DECK_SIZE)?;
        let aggregate_key = self.agg_key.decode()?;
        Ok((deck, aggregate_key))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptTask {
    pub cards: Vec<WireCardRef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCardRef {
    pub player_index: u32,
    pub card_index: u32,
    pub c0: WirePoint,
}

/// Projective triple in wire form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoint {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
    #[serde(rename = "Z")]
    pub z: String,
}

impl WirePoint {
    pub fn encode(point: &ProjectivePoint) -> Self {
        let [x, y, z] = encoding::point_to_strings(point);
        Self { x, y, z }
    }

    pub fn decode(&self) -> Result<ProjectivePoint, DecodeError> {
        encoding::point_from_strings(&[self.x.clone(), self.y.clone(), self.z.clone()])
    }
}

/// Groth16 proof in coordinator form: affine coordinates as decimal
/// strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireProof {
    pub pi_a: [String; 2],
    pub pi_b: [[String; 2]; 2],
    pub pi_c: [String; 2],
}

impl WireProof {
    pub fn encode(proof: &SnarkProof) -> Self {
        Self {
            pi_a: g1_strings(&proof.pi_a),
            pi_b: g2_strings(&proof.pi_b),
            pi_c: g1_strings(&proof.pi_c),
        }
    }
}

fn g1_strings(point: &G1Affine) -> [String; 2] {
    if point.infinity {
        return ["0".into(), "0".into()];
    }
    [format!("{}", point.x), format!("{}", point.y)]
}

fn g2_strings(point: &G2Affine) -> [[String; 2]; 2] {
    if point.infinity {
        return [["0".into(), "0".into()], ["0".into(), "0".into()]];
    }
    [
        [format!("{}", point.x.c0), format!("{}", point.x.c1)],
        [format!("{}", point.y.c0), format!("{}", point.y.c1)],
    ]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleResultPayload {
    pub deck: Vec<Vec<String>>,
    pub proof: WireProof,
    pub public_signals: Vec<String>,
}

impl ShuffleResultPayload {
    pub fn new(deck: &[Ciphertext], bundle: &ProofBundle) -> Self {
        Self {
            deck: encoding::deck_to_rows(deck),
            proof: WireProof::encode(&bundle.proof),
            public_signals: signal_strings(bundle),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResultEntry {
    pub player_index: u32,
    pub card_index: u32,
    pub c0: WirePoint,
    pub dec: WirePoint,
    pub proof: WireProof,
    pub public_signals: Vec<String>,
}

pub(crate) fn signal_strings(bundle: &ProofBundle) -> Vec<String> {
    bundle
        .public_signals
        .iter()
        .map(encoding::fq_to_decimal)
        .collect()
}

/// Result submission payload, keyed by step name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TaskResult {
    #[serde(rename = "SHUFFLE")]
    Shuffle(ShuffleResultPayload),
    #[serde(rename = "DECRYPT_OTHER_PLAYERS_CARDS")]
    DecryptOtherPlayersCards(Vec<DecryptResultEntry>),
    #[serde(rename = "DECRYPT_MY_CARDS")]
    DecryptMyCards(Vec<DecryptResultEntry>),
}

impl TaskResult {
    pub fn step(&self) -> TaskStep {
        match self {
            TaskResult::Shuffle(_) => TaskStep::Shuffle,
            TaskResult::DecryptOtherPlayersCards(_) => TaskStep::DecryptOtherPlayersCards,
            TaskResult::DecryptMyCards(_) => TaskStep::DecryptMyCards,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cards::initial_deck;
    use ark_std::UniformRand;
    use rand::thread_rng;

    #[test]
    fn envelope_uses_the_coordinator_field_names() {
        let envelope = TaskEnvelope {
            task_id: "lobby-7/shuffle/2".into(),
            step: TaskStep::Shuffle,
            data: TaskData {
                shuffle: Some(ShuffleTask {
                    deck: encoding::deck_to_rows(&initial_deck()),
                    agg_key: WirePoint::encode(&ProjectivePoint::GENERATOR),
                }),
                ..TaskData::default()
            },
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["step"], "SHUFFLE");
        assert!(json["data"]["SHUFFLE"]["aggKey"]["X"].is_string());
        assert!(json["data"].get("DECRYPT_MY_CARDS").is_none());

        let back: TaskEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back.step, TaskStep::Shuffle);
        assert_eq!(back.task_id, envelope.task_id);
    }

    #[test]
    fn wire_point_round_trips_and_validates() {
        let mut rng = thread_rng();
        let point = ProjectivePoint::rand(&mut rng);

        let wire = WirePoint::encode(&point);
        assert_eq!(wire.decode().unwrap(), point);

        let bogus = WirePoint {
            x: "3".into(),
            y: "7".into(),
            z: "1".into(),
        };
        assert!(matches!(bogus.decode(), Err(DecodeError::NotOnCurve)));
    }

    #[test]
    fn shuffle_task_rejects_truncated_decks() {
        let mut rows = encoding::deck_to_rows(&initial_deck());
        rows[3].pop();
        let task = ShuffleTask {
            deck: rows,
            agg_key: WirePoint::encode(&ProjectivePoint::GENERATOR),
        };
        assert!(matches!(
            task.decode(),
            Err(DecodeError::BadLength { .. })
        ));
    }

    #[test]
    fn result_payload_is_tagged_by_step() {
        let entry = DecryptResultEntry {
            player_index: 1,
            card_index: 0,
            c0: WirePoint::encode(&ProjectivePoint::GENERATOR),
            dec: WirePoint::encode(&ProjectivePoint::GENERATOR),
            proof: WireProof {
                pi_a: ["0".into(), "0".into()],
                pi_b: [["0".into(), "0".into()], ["0".into(), "0".into()]],
                pi_c: ["0".into(), "0".into()],
            },
            public_signals: vec!["1".into()],
        };
        let result = TaskResult::DecryptOtherPlayersCards(vec![entry]);
        assert_eq!(result.step(), TaskStep::DecryptOtherPlayersCards);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("DECRYPT_OTHER_PLAYERS_CARDS").is_some());
    }
}

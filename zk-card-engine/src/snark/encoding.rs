//! Codec functions for every serialization boundary the engine crosses:
//! decimal field-strings (circuit inputs and coordinator payloads),
//! fixed-width little-endian hex (ledger coordinates and key records),
//! 32-byte little-endian public signals, and the uncompressed big-endian
//! G1/G2 layouts of the on-ledger verifier.
//!
//! All in-memory values stay in their canonical field/point types; only
//! these functions touch the wire forms.

use ark_bls12_381::{G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField, Zero};
use shuffle_essentials::curve::{Fq, Fr, ProjectivePoint};
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;

use crate::error::DecodeError;

/// Inner-curve field elements serialize to 32 bytes.
pub const FIELD_BYTES: usize = 32;

/// Public signals are fixed-width 32-byte little-endian arrays.
pub const SIGNAL_BYTES: usize = 32;

/// Uncompressed G1: `x || y`, 48-byte big-endian limbs.
pub const G1_SERIALIZED_BYTES: usize = 96;

/// Uncompressed G2: `x.c1 || x.c0 || y.c1 || y.c0`, 48-byte big-endian limbs.
pub const G2_SERIALIZED_BYTES: usize = 192;

const PAIRING_BASE_BYTES: usize = 48;

/// Rows in the packed deck layout: `c0.X`, `c0.Y`, `c0.Z`, `c1.X`,
/// `c1.Y`, `c1.Z`.
pub const DECK_ROWS: usize = 6;

// --- decimal field-strings -------------------------------------------------

pub fn fq_to_decimal(x: &Fq) -> String {
    format!("{}", x)
}

pub fn fr_to_decimal(x: &Fr) -> String {
    format!("{}", x)
}

pub fn fq_from_decimal(s: &str) -> Result<Fq, DecodeError> {
    parse_decimal(s)
}

pub fn fr_from_decimal(s: &str) -> Result<Fr, DecodeError> {
    parse_decimal(s)
}

fn parse_decimal<F: PrimeField>(s: &str) -> Result<F, DecodeError> {
    // 78 digits covers any 256-bit value; anything longer is garbage
    if s.is_empty() || s.len() > 78 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::BadFieldElement(s.to_string()));
    }
    let ten = F::from(10u64);
    let mut acc = F::zero();
    for b in s.bytes() {
        acc = acc * ten + F::from(u64::from(b - b'0'));
    }
    Ok(acc)
}

// --- fixed-width little-endian hex -----------------------------------------

pub fn fq_to_le_hex(x: &Fq) -> String {
    hex::encode(x.into_bigint().to_bytes_le())
}

pub fn fr_to_le_hex(x: &Fr) -> String {
    hex::encode(x.into_bigint().to_bytes_le())
}

pub fn fq_from_le_hex(s: &str) -> Result<Fq, DecodeError> {
    let bytes = canonical_le_bytes(s)?;
    let value = Fq::from_le_bytes_mod_order(&bytes);
    if value.into_bigint().to_bytes_le() != bytes {
        return Err(DecodeError::BadFieldElement(s.to_string()));
    }
    Ok(value)
}

pub fn fr_from_le_hex(s: &str) -> Result<Fr, DecodeError> {
    let bytes = canonical_le_bytes(s)?;
    let value = Fr::from_le_bytes_mod_order(&bytes);
    if value.into_bigint().to_bytes_le() != bytes {
        return Err(DecodeError::BadFieldElement(s.to_string()));
    }
    Ok(value)
}

fn canonical_le_bytes(s: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = hex::decode(s)?;
    if bytes.len() != FIELD_BYTES {
        return Err(DecodeError::BadHexWidth {
            expected: FIELD_BYTES,
            got: bytes.len(),
        });
    }
    Ok(bytes)
}

// --- public signals --------------------------------------------------------

pub fn signal_to_le_bytes(signal: &Fq) -> [u8; SIGNAL_BYTES] {
    let mut out = [0u8; SIGNAL_BYTES];
    out.copy_from_slice(&signal.into_bigint().to_bytes_le());
    out
}

pub fn encode_public_signals(signals: &[Fq]) -> Vec<[u8; SIGNAL_BYTES]> {
    signals.iter().map(signal_to_le_bytes).collect()
}

/// Ledger form of the signals: 32-byte little-endian hex strings.
pub fn signals_to_le_hex(signals: &[Fq]) -> Vec<String> {
    signals
        .iter()
        .map(|signal| hex::encode(signal_to_le_bytes(signal)))
        .collect()
}

// --- pairing-curve proof elements ------------------------------------------

fn pairing_base_be(x: &ark_bls12_381::Fq) -> [u8; PAIRING_BASE_BYTES] {
    let mut out = [0u8; PAIRING_BASE_BYTES];
    out.copy_from_slice(&x.into_bigint().to_bytes_be());
    out
}

/// 96-byte uncompressed G1 encoding; the point at infinity is all zeroes.
pub fn encode_g1_uncompressed(point: &G1Affine) -> [u8; G1_SERIALIZED_BYTES] {
    let mut out = [0u8; G1_SERIALIZED_BYTES];
    if point.infinity {
        return out;
    }
    out[..PAIRING_BASE_BYTES].copy_from_slice(&pairing_base_be(&point.x));
    out[PAIRING_BASE_BYTES..].copy_from_slice(&pairing_base_be(&point.y));
    out
}

/// 192-byte uncompressed G2 encoding, imaginary limb first within each
/// coordinate.
pub fn encode_g2_uncompressed(point: &G2Affine) -> [u8; G2_SERIALIZED_BYTES] {
    let mut out = [0u8; G2_SERIALIZED_BYTES];
    if point.infinity {
        return out;
    }
    out[..48].copy_from_slice(&pairing_base_be(&point.x.c1));
    out[48..96].copy_from_slice(&pairing_base_be(&point.x.c0));
    out[96..144].copy_from_slice(&pairing_base_be(&point.y.c1));
    out[144..].copy_from_slice(&pairing_base_be(&point.y.c0));
    out
}

/// Full proof layout consumed by the verifier: `pi_a || pi_b || pi_c`.
pub fn encode_proof(proof: &super::SnarkProof) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * G1_SERIALIZED_BYTES + G2_SERIALIZED_BYTES);
    out.extend_from_slice(&encode_g1_uncompressed(&proof.pi_a));
    out.extend_from_slice(&encode_g2_uncompressed(&proof.pi_b));
    out.extend_from_slice(&encode_g1_uncompressed(&proof.pi_c));
    out
}

// --- inner-curve points and decks ------------------------------------------

pub fn point_to_strings(point: &ProjectivePoint) -> [String; 3] {
    [
        fq_to_decimal(&point.x),
        fq_to_decimal(&point.y),
        fq_to_decimal(&point.z),
    ]
}

/// Decode a projective triple, validating the curve equation before the
/// point is allowed anywhere near other arithmetic.
pub fn point_from_strings(coords: &[String; 3]) -> Result<ProjectivePoint, DecodeError> {
    let point = ProjectivePoint::new(
        fq_from_decimal(&coords[0])?,
        fq_from_decimal(&coords[1])?,
        fq_from_decimal(&coords[2])?,
    );
    if !point.is_on_curve() {
        return Err(DecodeError::NotOnCurve);
    }
    Ok(point)
}

/// Pack a deck into the six-row decimal-string layout.
pub fn deck_to_rows(deck: &[Ciphertext]) -> Vec<Vec<String>> {
    let mut rows = vec![Vec::with_capacity(deck.len()); DECK_ROWS];
    for Ciphertext(c0, c1) in deck {
        rows[0].push(fq_to_decimal(&c0.x));
        rows[1].push(fq_to_decimal(&c0.y));
        rows[2].push(fq_to_decimal(&c0.z));
        rows[3].push(fq_to_decimal(&c1.x));
        rows[4].push(fq_to_decimal(&c1.y));
        rows[5].push(fq_to_decimal(&c1.z));
    }
    rows
}

/// Decode the six-row layout back into ciphertexts, checking shape first
/// and the curve equation per point.
pub fn deck_from_rows(
    rows: &[Vec<String>],
    expected_cards: usize,
) -> Result<Vec<Ciphertext>, DecodeError> {
    if rows.len() != DECK_ROWS {
        return Err(DecodeError::BadLength {
            expected: DECK_ROWS,
            got: rows.len(),
        });
    }
    for row in rows {
        if row.len() != expected_cards {
            return Err(DecodeError::BadLength {
                expected: expected_cards,
                got: row.len(),
            });
        }
    }

    (0..expected_cards)
        .map(|i| {
            let c0 = point_from_strings(&[
                rows[0][i].clone(),
                rows[1][i].clone(),
                rows[2][i].clone(),
            ])?;
            let c1 = point_from_strings(&[
                rows[3][i].clone(),
                rows[4][i].clone(),
                rows[5][i].clone(),
            ])?;
            Ok(Ciphertext(c0, c1))
        })
        .collect()
}

//! Player key material: bit-bounded secret scalar generation, the derived
//! public point, and persistence of the key record.
//!
//! One key pair is generated per session and reused for every action in a
//! hand. Re-generating mid-hand would make the player's own submitted
//! partial decryptions unverifiable against their registered public key.

use ark_std::rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use shuffle_essentials::curve::{Fr, ProjectivePoint};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::KeyError;
use crate::snark::encoding::{fq_from_le_hex, fq_to_le_hex, fr_from_le_hex, fr_to_le_hex};

const LOG_TARGET: &str = "zk_card_engine::keys";

/// Secret scalars default to the bit bound the deal circuits assume.
pub const DEFAULT_KEY_BITS: usize = 64;

/// Fixed identifier the key record is stored under.
pub const KEY_STORAGE_KEY: &str = "zk_poker_key_pair";

/// A player's key pair. The secret scalar never leaves this struct except
/// through [`KeyManager::to_record`] for persistence.
#[derive(Clone)]
pub struct KeyPair {
    sk: Fr,
    pub pk: ProjectivePoint,
}

impl KeyPair {
    pub fn from_secret(sk: Fr) -> Self {
        let pk = ProjectivePoint::GENERATOR.mul_scalar(&sk);
        Self { sk, pk }
    }

    pub(crate) fn secret(&self) -> &Fr {
        &self.sk
    }
}

/// Draw a uniformly random scalar below `min(2^bits, r)` from a
/// cryptographically secure source.
pub fn random_scalar_bits<R: Rng + CryptoRng>(rng: &mut R, bits: usize) -> Fr {
    use ark_ff::PrimeField;

    let bits = bits.min(Fr::MODULUS_BIT_SIZE as usize - 1);
    let nbytes = (bits + 7) / 8;
    let mut buf = Zeroizing::new(vec![0u8; nbytes]);
    rng.fill_bytes(&mut buf);
    if bits % 8 != 0 {
        if let Some(last) = buf.last_mut() {
            *last &= (1u8 << (bits % 8)) - 1;
        }
    }
    Fr::from_le_bytes_mod_order(&buf)
}

/// Sum of the players' public keys. A card encrypted under the aggregate
/// is decryptable only with every player's contribution.
pub fn aggregate_public_key(keys: &[ProjectivePoint]) -> ProjectivePoint {
    keys.iter()
        .fold(ProjectivePoint::IDENTITY, |acc, pk| acc.add(pk))
}

/// Serialized key record: secret scalar and public point coordinates as
/// fixed-width little-endian hex strings.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyRecord {
    pub sk: String,
    pub x: String,
    pub y: String,
    pub z: String,
}

/// Where key records live. Implementations decide the medium (a file on
/// disk, browser storage behind a bridge, memory in tests).
pub trait KeyStore {
    fn save(&self, key: &str, record: &KeyRecord) -> Result<(), KeyError>;
    fn load(&self, key: &str) -> Result<Option<KeyRecord>, KeyError>;
}

/// JSON-file-backed store, one file per storage key.
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyStore for FileKeyStore {
    fn save(&self, key: &str, record: &KeyRecord) -> Result<(), KeyError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(record).map_err(|e| KeyError::Malformed(e.to_string()))?;
        std::fs::write(self.path(key), json)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<KeyRecord>, KeyError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&json).map_err(|e| KeyError::Malformed(e.to_string()))?;
        Ok(Some(record))
    }
}

/// In-memory store for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryKeyStore {
    records: Mutex<HashMap<String, KeyRecord>>,
}

impl KeyStore for MemoryKeyStore {
    fn save(&self, key: &str, record: &KeyRecord) -> Result<(), KeyError> {
        self.records
            .lock()
            .expect("key store lock poisoned")
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<KeyRecord>, KeyError> {
        Ok(self
            .records
            .lock()
            .expect("key store lock poisoned")
            .get(key)
            .cloned())
    }
}

/// Owns the session key pair and its persistence.
pub struct KeyManager {
    pair: KeyPair,
}

impl KeyManager {
    /// Generate a fresh key pair with a secret bounded by `bits`.
    pub fn generate<R: Rng + CryptoRng>(rng: &mut R, bits: usize) -> Self {
        let sk = random_scalar_bits(rng, bits);
        tracing::debug!(target: LOG_TARGET, bits, "generated session key pair");
        Self {
            pair: KeyPair::from_secret(sk),
        }
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.pair
    }

    pub fn public_key(&self) -> ProjectivePoint {
        self.pair.pk
    }

    pub fn to_record(&self) -> KeyRecord {
        KeyRecord {
            sk: fr_to_le_hex(&self.pair.sk),
            x: fq_to_le_hex(&self.pair.pk.x),
            y: fq_to_le_hex(&self.pair.pk.y),
            z: fq_to_le_hex(&self.pair.pk.z),
        }
    }

    /// Rebuild from a stored record, rejecting records whose public point
    /// does not match the secret scalar.
    pub fn from_record(record: &KeyRecord) -> Result<Self, KeyError> {
        let sk = fr_from_le_hex(&record.sk)?;
        let stored = ProjectivePoint::new(
            fq_from_le_hex(&record.x)?,
            fq_from_le_hex(&record.y)?,
            fq_from_le_hex(&record.z)?,
        );
        let pair = KeyPair::from_secret(sk);
        if pair.pk != stored {
            return Err(KeyError::Inconsistent);
        }
        Ok(Self { pair })
    }

    pub fn persist<S: KeyStore>(&self, store: &S) -> Result<(), KeyError> {
        store.save(KEY_STORAGE_KEY, &self.to_record())
    }

    /// Load the session key pair, generating and persisting one on first
    /// use.
    pub fn load_or_generate<S: KeyStore, R: Rng + CryptoRng>(
        store: &S,
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, KeyError> {
        if let Some(record) = store.load(KEY_STORAGE_KEY)? {
            tracing::debug!(target: LOG_TARGET, "reusing persisted key pair");
            return Self::from_record(&record);
        }
        let manager = Self::generate(rng, bits);
        manager.persist(store)?;
        Ok(manager)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_ff::{BigInteger, PrimeField};
    use rand::thread_rng;

    #[test]
    fn generated_scalar_respects_bit_bound() {
        let mut rng = thread_rng();
        for _ in 0..20 {
            let scalar = random_scalar_bits(&mut rng, 64);
            let bits = scalar.into_bigint().to_bits_le();
            assert!(bits[64..].iter().all(|&b| !b));
        }
    }

    #[test]
    fn record_round_trips() {
        let mut rng = thread_rng();
        let manager = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let record = manager.to_record();

        let restored = KeyManager::from_record(&record).unwrap();
        assert_eq!(restored.public_key(), manager.public_key());
        assert_eq!(restored.key_pair().secret(), manager.key_pair().secret());
    }

    #[test]
    fn tampered_record_is_rejected() {
        let mut rng = thread_rng();
        let manager = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let other = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);

        let mut record = manager.to_record();
        record.sk = other.to_record().sk.clone();
        assert!(matches!(
            KeyManager::from_record(&record),
            Err(KeyError::Inconsistent)
        ));
    }

    #[test]
    fn store_reuses_the_same_pair() {
        let mut rng = thread_rng();
        let store = MemoryKeyStore::default();

        let first =
            KeyManager::load_or_generate(&store, &mut rng, DEFAULT_KEY_BITS).unwrap();
        let second =
            KeyManager::load_or_generate(&store, &mut rng, DEFAULT_KEY_BITS).unwrap();
        assert_eq!(first.public_key(), second.public_key());
    }

    #[test]
    fn aggregate_is_the_sum_of_keys() {
        let mut rng = thread_rng();
        let a = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let b = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);

        let combined = KeyPair::from_secret(*a.key_pair().secret() + *b.key_pair().secret());
        assert_eq!(
            aggregate_public_key(&[a.public_key(), b.public_key()]),
            combined.pk
        );
    }
}

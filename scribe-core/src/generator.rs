//! Sources of identifiers, random seeds and timestamps.
//!
//! Excalidraw elements carry several values that only need to be unique or
//! random (ids, `seed`, `versionNonce`) plus wall-clock timestamps. All of
//! them come from a [`Generator`] so translation can be made reproducible.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters used by Excalidraw's nanoid ids.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of an element id.
pub const ELEMENT_ID_LEN: usize = 21;

/// Length of an embedded file id.
pub const FILE_ID_LEN: usize = 40;

/// Upper bound (inclusive) for `seed` and `versionNonce`.
pub const MAX_SEED: u32 = 1 << 31;

/// Supplies the impure parts of element construction.
pub trait Generator {
    /// A new element id, unique within a document.
    fn element_id(&mut self) -> String;

    /// A new embedded-file id.
    fn file_id(&mut self) -> String;

    /// A random value for `seed` or `versionNonce`.
    fn seed(&mut self) -> u32;

    /// Current time in milliseconds since the Unix epoch.
    fn timestamp(&mut self) -> u64;

    /// Starting point of a document's version counter.
    fn initial_version(&mut self) -> u64;
}

impl<G: Generator + ?Sized> Generator for &mut G {
    fn element_id(&mut self) -> String {
        (**self).element_id()
    }

    fn file_id(&mut self) -> String {
        (**self).file_id()
    }

    fn seed(&mut self) -> u32 {
        (**self).seed()
    }

    fn timestamp(&mut self) -> u64 {
        (**self).timestamp()
    }

    fn initial_version(&mut self) -> u64 {
        (**self).initial_version()
    }
}

/// Random ids and seeds with wall-clock timestamps.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: StdRng,
}

impl RandomGenerator {
    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed. Ids and seeds are reproducible;
    /// timestamps still follow the clock.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn nanoid(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ID_ALPHABET[self.rng.random_range(0..ID_ALPHABET.len())]))
            .collect()
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn element_id(&mut self) -> String {
        self.nanoid(ELEMENT_ID_LEN)
    }

    fn file_id(&mut self) -> String {
        self.nanoid(FILE_ID_LEN)
    }

    fn seed(&mut self) -> u32 {
        self.rng.random_range(0..=MAX_SEED)
    }

    #[allow(clippy::cast_possible_truncation)] // Timestamps won't exceed u64 for billions of years
    fn timestamp(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn initial_version(&mut self) -> u64 {
        self.rng.random_range(1..=50)
    }
}

/// Deterministic generator for tests and golden output.
///
/// Ids are `el-0001`, `el-0002`, ...; seeds count up from 1; the timestamp
/// never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedGenerator {
    counter: u32,
    timestamp: u64,
    initial_version: u64,
}

impl FixedGenerator {
    /// Create a generator with the given timestamp and initial version.
    #[must_use]
    pub const fn new(timestamp: u64, initial_version: u64) -> Self {
        Self {
            counter: 0,
            timestamp,
            initial_version,
        }
    }

    fn tick(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }
}

impl Default for FixedGenerator {
    fn default() -> Self {
        Self::new(1_700_000_000_000, 1)
    }
}

impl Generator for FixedGenerator {
    fn element_id(&mut self) -> String {
        format!("el-{:04}", self.tick())
    }

    fn file_id(&mut self) -> String {
        format!("file-{:04}", self.tick())
    }

    fn seed(&mut self) -> u32 {
        self.tick()
    }

    fn timestamp(&mut self) -> u64 {
        self.timestamp
    }

    fn initial_version(&mut self) -> u64 {
        self.initial_version
    }
}

use crate::{BASE_LEN, BaseDigits, Error, RegionSet, Result};
use rand::Rng;
use std::collections::HashSet;

/// Number of freely enumerated positions (0..=7); position 8 is the region
/// digit.
const PREFIX_LEN: usize = BASE_LEN - 1;

/// Size of the free-prefix space, `10^8`.
const PREFIX_SPACE: u64 = 100_000_000;

/// First position at which heuristic pruning applies. Positions before this
/// feed the frequency counter unconditionally and are never pruned.
const PRUNE_FROM: usize = 4;

/// Once a digit's running count reaches this value, the heuristic bars it
/// from every later position of the current prefix.
const REPEAT_CAP: u8 = 4;

/// Lazy depth-first enumeration of every base sequence in
/// `{0..9}^8 x RegionSet`.
///
/// Positions 0..=7 advance in lexicographic order; the region set is walked
/// in caller order as the innermost loop. Without the heuristic the stream
/// holds exactly `10^8 * |RegionSet|` distinct items.
///
/// With the heuristic enabled, a per-prefix digit frequency counter is
/// carried down the walk (incremented on descent, decremented on backtrack)
/// and candidates whose count has already reached [`REPEAT_CAP`] are skipped
/// together with their whole subtree. The first four positions always count
/// but are never themselves pruned, and the region position is checked
/// against the counter without ever entering it. This asymmetry is
/// deliberate; changing it would change which numbers are generated.
pub struct ExhaustiveBases {
    regions: RegionSet,
    heuristic: bool,
    digits: [u8; BASE_LEN],
    /// Occurrences of each digit value along the live prefix path.
    counts: [u8; 10],
    /// `next[i]` is the index of the next candidate to try at position `i`.
    next: [usize; BASE_LEN],
    depth: usize,
    done: bool,
}

impl ExhaustiveBases {
    /// Creates an enumerator over the full base space for `regions`,
    /// optionally pruning heavily repetitive prefixes.
    #[must_use]
    pub fn new(regions: RegionSet, heuristic: bool) -> Self {
        Self {
            regions,
            heuristic,
            digits: [0; BASE_LEN],
            counts: [0; 10],
            next: [0; BASE_LEN],
            depth: 0,
            done: false,
        }
    }

    fn candidate(&self, depth: usize, index: usize) -> Option<u8> {
        if depth < PREFIX_LEN {
            (index < 10).then(|| index as u8)
        } else {
            self.regions.digits().get(index).copied()
        }
    }
}

impl Iterator for ExhaustiveBases {
    type Item = BaseDigits;

    fn next(&mut self) -> Option<BaseDigits> {
        if self.done {
            return None;
        }
        loop {
            let Some(digit) = self.candidate(self.depth, self.next[self.depth]) else {
                // Candidates exhausted at this position: backtrack, releasing
                // the parent's count and moving it to its next sibling.
                self.next[self.depth] = 0;
                if self.depth == 0 {
                    self.done = true;
                    return None;
                }
                self.depth -= 1;
                self.counts[usize::from(self.digits[self.depth])] -= 1;
                self.next[self.depth] += 1;
                continue;
            };

            if self.heuristic
                && self.depth >= PRUNE_FROM
                && self.counts[usize::from(digit)] == REPEAT_CAP
            {
                self.next[self.depth] += 1;
                continue;
            }

            self.digits[self.depth] = digit;
            if self.depth == BASE_LEN - 1 {
                // Leaf: the region digit never enters the counter.
                self.next[self.depth] += 1;
                return Some(BaseDigits::new(self.digits));
            }
            self.counts[usize::from(digit)] += 1;
            self.depth += 1;
            self.next[self.depth] = 0;
        }
    }
}

/// A fixed number of distinct base sequences drawn uniformly at random.
///
/// Each draw combines one uniform value in `[0, 10^8)` for the free prefix
/// with one region digit chosen uniformly from the set, retrying until the
/// requested number of distinct 9-digit keys exists. Iteration order is the
/// arbitrary order of the uniqueness set; runs are reproducible only under an
/// identically seeded [`Rng`].
///
/// Termination is probabilistic: as the requested count approaches the total
/// space the expected number of retries grows without bound (birthday
/// paradox). Counts beyond the space are rejected outright since they could
/// never be satisfied.
#[derive(Debug)]
pub struct RandomBases {
    keys: std::collections::hash_set::IntoIter<[u8; BASE_LEN]>,
}

impl RandomBases {
    /// Samples `count` distinct base sequences for `regions` using `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleSpaceExceeded`] if `count` is larger than
    /// `10^8 * |regions|`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, regions: &RegionSet, count: u64) -> Result<Self> {
        let available = PREFIX_SPACE * regions.len() as u64;
        if count > available {
            return Err(Error::SampleSpaceExceeded {
                requested: count,
                available,
            });
        }

        let mut keys: HashSet<[u8; BASE_LEN]> = HashSet::with_capacity(count as usize);
        while (keys.len() as u64) < count {
            let prefix = rng.random_range(0..PREFIX_SPACE);
            let region = regions.digits()[rng.random_range(0..regions.len())];
            keys.insert(split_key(prefix, region));
        }

        Ok(Self {
            keys: keys.into_iter(),
        })
    }
}

impl Iterator for RandomBases {
    type Item = BaseDigits;

    fn next(&mut self) -> Option<BaseDigits> {
        self.keys.next().map(BaseDigits::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for RandomBases {}

/// Expands an 8-digit prefix value plus region digit into the 9-digit key.
fn split_key(prefix: u64, region: u8) -> [u8; BASE_LEN] {
    let mut digits = [0u8; BASE_LEN];
    let mut rest = prefix;
    for slot in digits[..PREFIX_LEN].iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits[PREFIX_LEN] = region;
    digits
}

//! trex-uniset - Run-length-encoded Unicode code-point sets.
//!
//! A [`Uniset`] is the set type behind character classes, property
//! escapes and the string generator. It stores runs of `(start, len)`
//! code points plus a coverage tag. The representation is deliberately
//! loose: `union` concatenates runs without sorting or merging, because
//! the set is only ever consulted by a linear membership scan or by a
//! weighted pick. `complement` is the one operation that sorts.
//!
//! The surrogate range `U+D800..=U+DFFF` is representable (code points
//! are plain `u32`s) but is filtered out at pick time, so sampled code
//! points always convert to `char`.

pub mod property;

pub use property::{resolve, PropertyError};

use rand::Rng;

/// Largest code point.
pub const MAX_CP: u32 = 0x10FFFF;

/// Number of code points, `MAX_CP + 1`.
pub const CP_COUNT: u32 = 0x110000;

/// First surrogate code point.
pub const SURROGATE_FIRST: u32 = 0xD800;

/// Last surrogate code point.
pub const SURROGATE_LAST: u32 = 0xDFFF;

/// Retry bound for rejection sampling. A pathological set could
/// otherwise spin forever inside a single node step, where the run
/// timeout cannot reach it.
const PICK_RETRIES: u32 = CP_COUNT;

/// True if `cp` is a UTF-16 surrogate.
pub fn is_surrogate(cp: u32) -> bool {
    (SURROGATE_FIRST..=SURROGATE_LAST).contains(&cp)
}

/// Coverage tag of a [`Uniset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// An ordinary set described exactly by its runs.
    General,
    /// The full code-point set (`:all` / `Any`). Absorbs unions and
    /// complements to the empty set.
    FullAssigned,
}

/// A run of consecutive code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: u32,
    pub len: u32,
}

impl Run {
    pub fn new(start: u32, len: u32) -> Self {
        debug_assert!(len >= 1);
        Self { start, len }
    }

    /// Last code point of the run (inclusive).
    fn last(&self) -> u32 {
        self.start + self.len - 1
    }

    fn contains(&self, cp: u32) -> bool {
        cp >= self.start && cp <= self.last()
    }
}

/// A set of Unicode code points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uniset {
    coverage: Coverage,
    size: u64,
    runs: Vec<Run>,
}

impl Uniset {
    /// The empty set.
    pub fn none() -> Self {
        Self {
            coverage: Coverage::General,
            size: 0,
            runs: Vec::new(),
        }
    }

    /// The full code-point set, tagged `FullAssigned`.
    pub fn all() -> Self {
        Self {
            coverage: Coverage::FullAssigned,
            size: CP_COUNT as u64,
            runs: vec![Run::new(0, CP_COUNT)],
        }
    }

    /// A single code point.
    pub fn point(cp: u32) -> Self {
        assert!(cp <= MAX_CP);
        Self {
            coverage: Coverage::General,
            size: 1,
            runs: vec![Run::new(cp, 1)],
        }
    }

    /// A set from a list of code points, one run each.
    pub fn from_points(points: impl IntoIterator<Item = u32>) -> Self {
        let runs: Vec<Run> = points
            .into_iter()
            .inspect(|&cp| assert!(cp <= MAX_CP))
            .map(|cp| Run::new(cp, 1))
            .collect();
        Self::from_runs(runs)
    }

    /// The inclusive range `lo..=hi`. Requires `lo <= hi`.
    pub fn range(lo: u32, hi: u32) -> Self {
        assert!(lo <= hi && hi <= MAX_CP);
        Self {
            coverage: Coverage::General,
            size: (hi - lo + 1) as u64,
            runs: vec![Run::new(lo, hi - lo + 1)],
        }
    }

    /// A set from prepared runs. The size is the sum of run lengths.
    pub fn from_runs(runs: Vec<Run>) -> Self {
        let size = runs.iter().map(|r| r.len as u64).sum();
        Self {
            coverage: Coverage::General,
            size,
            runs,
        }
    }

    /// Number of code points (counted with multiplicity of the runs).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// True if no run is present.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// True if the set carries the `FullAssigned` tag.
    pub fn is_full(&self) -> bool {
        self.coverage == Coverage::FullAssigned
    }

    /// The runs, in insertion order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Union of two sets.
    ///
    /// Runs are concatenated without sorting or merging; the inputs are
    /// treated as disjoint. A `FullAssigned` side absorbs the union.
    pub fn union(&self, other: &Uniset) -> Uniset {
        if self.is_full() || other.is_full() {
            return Uniset::all();
        }
        let mut runs = Vec::with_capacity(self.runs.len() + other.runs.len());
        runs.extend_from_slice(&self.runs);
        runs.extend_from_slice(&other.runs);
        Uniset {
            coverage: Coverage::General,
            size: self.size + other.size,
            runs,
        }
    }

    /// In-place union, used by the generator's class accumulator.
    pub fn union_in_place(&mut self, other: &Uniset) {
        *self = self.union(other);
    }

    /// Complement with respect to the full code-point range.
    ///
    /// Runs are sorted by start and the gaps up to [`MAX_CP`] are
    /// emitted in order. `FullAssigned` complements to the empty set
    /// and the empty set to `FullAssigned`.
    pub fn complement(&self) -> Uniset {
        if self.is_full() {
            return Uniset::none();
        }
        if self.is_empty() {
            return Uniset::all();
        }
        let mut sorted = self.runs.clone();
        sorted.sort_by_key(|r| r.start);

        let mut gaps = Vec::new();
        let mut next: u32 = 0;
        for run in &sorted {
            if run.start > next {
                gaps.push(Run::new(next, run.start - next));
            }
            // Overlapping runs can arise from unions; track the furthest end.
            next = next.max(run.last().saturating_add(1));
            if next > MAX_CP {
                break;
            }
        }
        if next <= MAX_CP {
            gaps.push(Run::new(next, CP_COUNT - next));
        }
        Uniset::from_runs(gaps)
    }

    /// Membership test: linear scan of the runs.
    pub fn contains(&self, cp: u32) -> bool {
        self.runs.iter().any(|r| r.contains(cp))
    }

    /// Draw a uniformly random member, retrying surrogates.
    ///
    /// Returns `None` for the empty set and for sets where every retry
    /// landed on a surrogate.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<u32> {
        if self.size == 0 {
            return None;
        }
        for _ in 0..PICK_RETRIES {
            let cp = self.nth(rng.gen_range(1..=self.size));
            if !is_surrogate(cp) {
                return Some(cp);
            }
        }
        None
    }

    /// Draw a uniformly random non-member.
    ///
    /// A `FullAssigned` set has no complement to sample: the result is
    /// `None`. Everything else is rejection-sampled from the full range,
    /// skipping surrogates and members. Dense sets make this slow.
    pub fn pick_neg(&self, rng: &mut impl Rng) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        for _ in 0..PICK_RETRIES {
            let cp = rng.gen_range(0..CP_COUNT);
            if !is_surrogate(cp) && !self.contains(cp) {
                return Some(cp);
            }
        }
        None
    }

    /// The `i`-th member in run order, 1-based. `i` must be in
    /// `1..=size`.
    fn nth(&self, mut i: u64) -> u32 {
        debug_assert!(i >= 1 && i <= self.size);
        for run in &self.runs {
            if i <= run.len as u64 {
                return run.start + (i as u32) - 1;
            }
            i -= run.len as u64;
        }
        unreachable!("index within size but past the runs");
    }
}

//! Sparse permutations of `{1, 2, ...}`
//!
//! A [`Permutation`] stores only its non-fixed points, so the identity is an
//! empty map and a transposition holds two entries regardless of the size of
//! the matrix it acts on.

use crate::error::{LinalgError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Bijection on `{1, 2, ...}` stored as its non-fixed points (key -> image).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permutation {
    map: BTreeMap<usize, usize>,
}

impl Permutation {
    /// The identity permutation
    pub fn identity() -> Self {
        Self::default()
    }

    /// Single cycle `c[0] -> c[1] -> ... -> c[last] -> c[0]`.
    ///
    /// `from_cycle(&[2, 3, 4])` maps 2 to 3, 3 to 4, 4 to 2 and fixes everything else.
    pub fn from_cycle(cycle: &[usize]) -> Result<Self> {
        Self::from_cycles(&[cycle.to_vec()])
    }

    /// Product of disjoint cycles.
    pub fn from_cycles(cycles: &[Vec<usize>]) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut map = BTreeMap::new();
        for cycle in cycles {
            for (pos, &k) in cycle.iter().enumerate() {
                if k == 0 {
                    return Err(invalid("indices start at 1"));
                }
                if !seen.insert(k) {
                    return Err(invalid(format!("index {} appears more than once", k)));
                }
                let image = cycle[(pos + 1) % cycle.len()];
                if image != k {
                    map.insert(k, image);
                }
            }
        }
        Ok(Self { map })
    }

    /// One-line notation: `i` maps to `images[i - 1]`.
    pub fn from_images(images: &[usize]) -> Result<Self> {
        let n = images.len();
        let mut seen = vec![false; n];
        let mut map = BTreeMap::new();
        for (pos, &image) in images.iter().enumerate() {
            if image == 0 || image > n {
                return Err(invalid(format!("image {} outside 1..={}", image, n)));
            }
            if seen[image - 1] {
                return Err(invalid(format!("image {} appears more than once", image)));
            }
            seen[image - 1] = true;
            if image != pos + 1 {
                map.insert(pos + 1, image);
            }
        }
        Ok(Self { map })
    }

    /// Build from an explicit key -> image map. Fixed points may be present
    /// and are dropped; the map must be a bijection on its key set.
    pub fn from_map(map: BTreeMap<usize, usize>) -> Result<Self> {
        let keys: BTreeSet<usize> = map.keys().copied().collect();
        let images: BTreeSet<usize> = map.values().copied().collect();
        if keys.contains(&0) || images.contains(&0) {
            return Err(invalid("indices start at 1"));
        }
        if keys != images {
            return Err(invalid("map is not a bijection on its keys"));
        }
        Ok(Self {
            map: map.into_iter().filter(|(k, v)| k != v).collect(),
        })
    }

    /// Swap of `a` and `b`.
    pub fn transposition(a: usize, b: usize) -> Result<Self> {
        if a == 0 || b == 0 {
            return Err(invalid("indices start at 1"));
        }
        let mut map = BTreeMap::new();
        if a != b {
            map.insert(a, b);
            map.insert(b, a);
        }
        Ok(Self { map })
    }

    /// Image of `i`
    pub fn get(&self, i: usize) -> usize {
        self.map.get(&i).copied().unwrap_or(i)
    }

    /// "`self` followed by `other`": `i` maps to `other.get(self.get(i))`.
    pub fn compose(&self, other: &Permutation) -> Permutation {
        let map = self
            .map
            .keys()
            .chain(other.map.keys())
            .filter_map(|&k| {
                let image = other.get(self.get(k));
                (image != k).then_some((k, image))
            })
            .collect();
        Permutation { map }
    }

    /// Inverse permutation
    pub fn inverse(&self) -> Permutation {
        Permutation {
            map: self.map.iter().map(|(&k, &v)| (v, k)).collect(),
        }
    }

    /// Disjoint-cycle decomposition, each cycle starting at its smallest index.
    pub fn to_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = BTreeSet::new();
        let mut cycles = Vec::new();
        for &start in self.map.keys() {
            if visited.contains(&start) {
                continue;
            }
            let mut cycle = vec![start];
            visited.insert(start);
            let mut next = self.get(start);
            while next != start {
                visited.insert(next);
                cycle.push(next);
                next = self.get(next);
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Number of non-fixed points
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.map.is_empty()
    }

    /// Largest non-fixed point, 0 for the identity.
    pub fn max_index(&self) -> usize {
        self.map.keys().next_back().copied().unwrap_or(0)
    }

    /// Non-fixed points in increasing key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map.iter().map(|(&k, &v)| (k, v))
    }
}

fn invalid(reason: impl Into<String>) -> LinalgError {
    LinalgError::InvalidPermutation {
        reason: reason.into(),
    }
}

//! Shared helpers for the integration tests: a deterministic rng and brute-force model
//! enumeration.

#![allow(dead_code)]

use std::collections::BTreeSet;

use rand_core::{impls, Error, RngCore, SeedableRng};

/// A translation of the *really* minimal C PCG32 implementation from
/// <https://www.pcg-random.org/>, so randomized tests stay deterministic across platforms
/// and toolchains.
pub struct MinimalPcg32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPcg32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MinimalPcg32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        const INCREMENT: u64 = 3215534235932367344;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

/// An rng from a bare integer seed.
pub fn seeded(seed: u64) -> MinimalPcg32 {
    MinimalPcg32::from_seed(seed.to_le_bytes())
}

/// Every total assignment over variables `1..=var_count`, as signed literal vectors in
/// variable order.
pub fn assignments(var_count: i32) -> Vec<Vec<i32>> {
    (0..1u64 << var_count)
        .map(|bits| assignment_from_bits(bits, var_count))
        .collect()
}

/// Every total assignment over variables `1..=var_count` satisfying all the clauses.
pub fn models(clauses: &[Vec<i32>], var_count: i32) -> Vec<Vec<i32>> {
    let mut found = Vec::new();
    for bits in 0..1u64 << var_count {
        let satisfied = clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&literal| bit_value(bits, literal) == (literal > 0))
        });
        if satisfied {
            found.push(assignment_from_bits(bits, var_count));
        }
    }
    found
}

/// The assignments restricted to their first `var_count` variables, deduplicated.
pub fn project(full: &[Vec<i32>], var_count: i32) -> BTreeSet<Vec<i32>> {
    full.iter()
        .map(|assignment| assignment[..var_count as usize].to_vec())
        .collect()
}

/// Whether an assignment makes a literal true.
pub fn literal_true(assignment: &[i32], literal: i32) -> bool {
    assignment.contains(&literal)
}

fn assignment_from_bits(bits: u64, var_count: i32) -> Vec<i32> {
    (1..=var_count)
        .map(|v| if bits >> (v - 1) & 1 == 1 { v } else { -v })
        .collect()
}

fn bit_value(bits: u64, literal: i32) -> bool {
    bits >> (literal.unsigned_abs() - 1) & 1 == 1
}

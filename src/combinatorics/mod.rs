//! Enumeration primitives for ordered multisets.
//!
//! A search over "up to k modifiers, order matters, repetition allowed"
//! is split into two independent enumerations:
//!
//! - **Multiset combinations**: every non-decreasing index sequence of
//!   length k over a pool, i.e. each multiset of size k exactly once.
//! - **Multiset permutations**: every *distinct* arrangement of one
//!   multiset, i.e. `n! / (m_1! * ... * m_j!)` orderings.
//!
//! Chaining the two visits every sequence of length k over the pool
//! exactly once (`|pool|^k` sequences in total), grouped by multiset.
//!
//! Both enumerators are lazy iterators driven by an explicit backtracking
//! stack, so no recursion depth or intermediate collection is involved.

mod combinations;
mod count;
mod permutations;

pub use combinations::{generate, MultisetCombinations};
pub use count::{
    binomial, distinct_permutation_count, multiset_combination_count, search_space_size,
};
pub use permutations::{permute, MultisetPermutations};

//! Randomized differential testing of [`UnrolledList`] against `VecDeque`.
//!
//! Operations come from a seeded generator that also runs them on a
//! `VecDeque`, so a failing run can be replayed from its seed alone.

use rand::{
    distributions::{Distribution, Standard},
    rngs::StdRng,
};
use std::{collections::VecDeque, fmt::Debug};
use unrolled_list::UnrolledList;

mod list;
mod traits;

pub use list::{ListOperation, ListOperationGenerator, Outcome};
pub use traits::*;

/// Length below which only growing operations are generated.
pub const MIN_LEN: usize = 16;

#[derive(Debug)]
pub struct OperationFailure<T, const N: usize> {
    pub seed: u64,
    pub op_num: usize,
    pub operation: ListOperation<T, N>,
    pub expected: Outcome<T>,
    pub actual: Outcome<T>,
    pub target: UnrolledList<T, N>,
    pub reference: VecDeque<T>,
}

/// Every block holds between 1 and `N` elements and they add up to `len`.
fn well_formed<T, const N: usize>(list: &UnrolledList<T, N>) -> bool {
    list.blocks().all(|b| !b.is_empty() && b.len() <= N)
        && list.blocks().map(<[T]>::len).sum::<usize>() == list.len()
}

/// Runs `ops` generated operations on a fresh list. With no seed a random one
/// is drawn, it is part of the failure either way.
pub fn test_list<T, const N: usize>(
    seed: Option<u64>,
    ops: usize,
) -> Result<(), Box<OperationFailure<T, N>>>
where
    T: Clone + PartialEq + Debug,
    Standard: Distribution<T>,
{
    let (seed, mut gen) = match seed {
        Some(seed) => (seed, <ListOperation<T, N> as OperationGen<StdRng>>::gen_from_seed(seed)),
        None => <ListOperation<T, N> as RandomOperationGen<StdRng>>::gen(),
    };
    let mut target = UnrolledList::new();

    for op_num in 0..ops {
        let Some((operation, expected)) = gen.next() else {
            break;
        };
        let actual = operation.apply(&mut target);
        let reference = gen.reference();
        if actual != expected
            || target.len() != reference.len()
            || !target.iter().eq(reference.iter())
            || !well_formed(&target)
        {
            return Err(Box::new(OperationFailure {
                seed,
                op_num,
                operation,
                expected,
                actual,
                target,
                reference: gen.data(),
            }));
        }
    }
    Ok(())
}

impl<T, const N: usize> OperationFailure<T, N>
where
    T: Clone + Debug,
    Standard: Distribution<T>,
{
    /// Replays the run up to the failing operation, printing the last few
    /// operations with the state of the list after each.
    pub fn playback(&self) {
        println!("running playback of seed {}", self.seed);
        let mut list: UnrolledList<T, N> = UnrolledList::new();
        let gen = <ListOperation<T, N> as OperationGen<StdRng>>::gen_from_seed(self.seed);
        let lower = self.op_num.saturating_sub(5);

        for (ind, (op, expected)) in gen.enumerate().take(self.op_num + 1) {
            let actual = op.apply(&mut list);
            if ind < lower {
                continue;
            }
            println!("--------- operation {ind} ----------");
            println!("operation: {op:?}");
            println!("list_state: {list:?}");
            println!("expected / actual : {expected:?}, {actual:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPS: usize = 5_000;

    fn check<const N: usize>(seed: Option<u64>) {
        if let Err(failure) = test_list::<u16, N>(seed, OPS) {
            failure.playback();
            panic!(
                "block size {N}, seed {}: operation {} gave {:?}, expected {:?}",
                failure.seed, failure.op_num, failure.actual, failure.expected
            );
        }
    }

    #[test]
    fn single_slot_blocks() {
        for seed in 0..4 {
            check::<1>(Some(seed));
        }
    }

    #[test]
    fn small_blocks() {
        for seed in 0..4 {
            check::<2>(Some(seed));
            check::<3>(Some(seed));
            check::<4>(Some(seed));
        }
    }

    #[test]
    fn default_blocks() {
        for seed in 0..4 {
            check::<10>(Some(seed));
        }
    }

    #[test]
    fn large_blocks() {
        check::<64>(Some(7));
    }

    #[test]
    fn random_seeds() {
        for _ in 0..4 {
            check::<5>(None);
        }
    }

    #[test]
    fn chars() {
        let list_ops = |seed| test_list::<char, 4>(Some(seed), OPS).map_err(|f| f.seed);
        assert_eq!(list_ops(11), Ok(()));
    }
}

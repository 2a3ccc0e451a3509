use super::traits::*;
use crate::MIN_LEN;
use rand::{
    distributions::{Distribution, Standard},
    rngs::StdRng,
    Rng, SeedableRng,
};
use std::{collections::VecDeque, marker::PhantomData};
use unrolled_list::UnrolledList;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Done,
    Elem(Option<T>),
    Count(usize),
}

#[derive(Clone, Debug)]
pub enum ListOperation<T, const N: usize> {
    PushBack(T),
    PushFront(T),
    PopBack,
    PopFront,
    Insert(usize, T),
    InsertN(usize, usize, T),
    Remove(usize),
    RemoveN(usize, usize),
    Erase(usize, usize),
    Get(usize),
    Front,
    Back,
    Compact,
    Clear,
}

const OPERATIONS: usize = 14;

impl<T: Clone, const N: usize> Operation for ListOperation<T, N> {
    type Result = Outcome<T>;
    type Target = UnrolledList<T, N>;

    fn apply(&self, list: &mut Self::Target) -> Self::Result {
        match self {
            Self::PushBack(v) => {
                list.push_back(v.clone());
                Outcome::Done
            }
            Self::PushFront(v) => {
                list.push_front(v.clone());
                Outcome::Done
            }
            Self::PopBack => Outcome::Elem(list.pop_back().ok()),
            Self::PopFront => Outcome::Elem(list.pop_front().ok()),
            Self::Insert(index, v) => Outcome::Elem(list.insert(*index, v.clone()).current().cloned()),
            Self::InsertN(index, count, v) => {
                let mut cursor = list.cursor_at_mut(*index).expect("index within bounds");
                cursor.insert_n(*count, v.clone());
                Outcome::Elem(cursor.current().cloned())
            }
            Self::Remove(index) => Outcome::Elem(list.remove(*index)),
            Self::RemoveN(index, count) => {
                let mut cursor = list.cursor_at_mut(*index).expect("index within bounds");
                Outcome::Count(cursor.remove_n(*count))
            }
            Self::Erase(from, to) => {
                let cursor = list.erase(*from..*to).expect("range within bounds");
                Outcome::Elem(cursor.current().cloned())
            }
            Self::Get(index) => Outcome::Elem(list.get(*index).cloned()),
            Self::Front => Outcome::Elem(list.front().ok().cloned()),
            Self::Back => Outcome::Elem(list.back().ok().cloned()),
            Self::Compact => {
                list.compact();
                Outcome::Count(list.len())
            }
            Self::Clear => {
                list.clear();
                Outcome::Count(list.len())
            }
        }
    }
}

impl<T, const N: usize> OperationGen<StdRng> for ListOperation<T, N>
where
    T: Clone,
    Standard: Distribution<T>,
{
    type Generator = ListOperationGenerator<T, N, StdRng>;
}

/// Produces random list operations and runs each of them on a `VecDeque` to
/// get the expected outcome.
pub struct ListOperationGenerator<T, const N: usize, R = StdRng>
where
    R: Rng + SeedableRng,
{
    rng: R,
    data: VecDeque<T>,
    marker: PhantomData<[(); N]>,
}

impl<T, const N: usize, R> OperationGenerator<R> for ListOperationGenerator<T, N, R>
where
    R: Rng + SeedableRng,
    T: Clone,
    Standard: Distribution<T>,
{
    type Operation = ListOperation<T, N>;
    type ReferenceImpl = VecDeque<T>;

    fn from_seed(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
            data: VecDeque::new(),
            marker: PhantomData,
        }
    }

    fn reference(&self) -> &Self::ReferenceImpl {
        &self.data
    }

    fn data(self) -> Self::ReferenceImpl {
        self.data
    }
}

impl<T, const N: usize, R> Iterator for ListOperationGenerator<T, N, R>
where
    R: Rng + SeedableRng,
    T: Clone,
    Standard: Distribution<T>,
{
    type Item = (ListOperation<T, N>, Outcome<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.data.len();
        // only the growing operations are picked until the list is long enough
        let op = if len < MIN_LEN {
            self.rng.gen_range(0..3)
        } else {
            self.rng.gen_range(0..OPERATIONS)
        };

        let item = match op {
            0 => {
                let v: T = self.rng.gen();
                self.data.push_back(v.clone());
                (ListOperation::PushBack(v), Outcome::Done)
            }
            1 => {
                let v: T = self.rng.gen();
                self.data.push_front(v.clone());
                (ListOperation::PushFront(v), Outcome::Done)
            }
            2 => {
                let index = self.rng.gen_range(0..=len);
                let v: T = self.rng.gen();
                self.data.insert(index, v.clone());
                (ListOperation::Insert(index, v.clone()), Outcome::Elem(Some(v)))
            }
            3 => {
                let index = self.rng.gen_range(0..=len);
                let count = self.rng.gen_range(0..2 * N + 2);
                let v: T = self.rng.gen();
                for _ in 0..count {
                    self.data.insert(index, v.clone());
                }
                let current = self.data.get(index).cloned();
                (ListOperation::InsertN(index, count, v), Outcome::Elem(current))
            }
            4 => (ListOperation::PopBack, Outcome::Elem(self.data.pop_back())),
            5 => (ListOperation::PopFront, Outcome::Elem(self.data.pop_front())),
            6 => {
                // sometimes one past the end
                let index = self.rng.gen_range(0..=len);
                (ListOperation::Remove(index), Outcome::Elem(self.data.remove(index)))
            }
            7 => {
                let index = self.rng.gen_range(0..=len);
                let count = self.rng.gen_range(0..2 * N + 2);
                let removed = count.min(len - index);
                self.data.drain(index..index + removed);
                (ListOperation::RemoveN(index, count), Outcome::Count(removed))
            }
            8 => {
                let from = self.rng.gen_range(0..=len);
                let to = self.rng.gen_range(from..=len.min(from + 3 * N));
                self.data.drain(from..to);
                let current = self.data.get(from).cloned();
                (ListOperation::Erase(from, to), Outcome::Elem(current))
            }
            9 => {
                let index = self.rng.gen_range(0..len + 2);
                (ListOperation::Get(index), Outcome::Elem(self.data.get(index).cloned()))
            }
            10 => (ListOperation::Front, Outcome::Elem(self.data.front().cloned())),
            11 => (ListOperation::Back, Outcome::Elem(self.data.back().cloned())),
            12 => (ListOperation::Compact, Outcome::Count(len)),
            13 => {
                // rare, so the list gets a chance to grow back
                if self.rng.gen_bool(0.1) {
                    self.data.clear();
                    (ListOperation::Clear, Outcome::Count(0))
                } else {
                    (ListOperation::Back, Outcome::Elem(self.data.back().cloned()))
                }
            }
            _ => unreachable!(),
        };
        Some(item)
    }
}

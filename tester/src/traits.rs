use rand::{Rng, SeedableRng};

/// deterministically applies an operation to a T returning the result
pub trait Operation {
    type Result: Sized;
    type Target;
    fn apply(&self, target: &mut Self::Target) -> Self::Result;
}

// deterministically generates a sequence of valid operations along with the
// result a correct target has to produce for each of them
pub trait OperationGenerator<R>:
    Iterator<Item = (Self::Operation, <Self::Operation as Operation>::Result)> + Sized
where
    R: Rng + SeedableRng,
{
    type Operation: Operation;
    type ReferenceImpl;
    fn from_seed(seed: u64) -> Self;
    /// state of the reference implementation after the operations generated so far
    fn reference(&self) -> &Self::ReferenceImpl;
    fn data(self) -> Self::ReferenceImpl;
}

pub trait OperationGen<R: Rng + SeedableRng>: Operation + Sized {
    type Generator: OperationGenerator<R, Operation = Self, Item = (Self, Self::Result)>;
    fn gen_from_seed(seed: u64) -> Self::Generator {
        Self::Generator::from_seed(seed)
    }
}

// extends operation generator so that it can be created from a random seed
pub trait RandomOperationGen<R: SeedableRng + Rng>: OperationGen<R> {
    fn gen() -> (u64, Self::Generator) {
        let seed: u64 = rand::thread_rng().gen();
        (seed, Self::Generator::from_seed(seed))
    }
}

impl<R, T: OperationGen<R>> RandomOperationGen<R> for T where R: SeedableRng + Rng {}

use rand::{seq::IteratorRandom, Rng};

use super::Policy;

/// The equiprobable random policy: every available action is chosen with the same probability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformRandom;

impl<A> Policy<A> for UniformRandom {
    fn choose<R: Rng + ?Sized>(&self, actions: Vec<A>, rng: &mut R) -> Option<A> {
        actions.into_iter().choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn uniform_random_choose() {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = UniformRandom;

        assert_eq!(policy.choose(Vec::<u8>::new(), &mut rng), None, "No actions, no choice");
        assert_eq!(policy.choose(vec![3], &mut rng), Some(3), "Single action is always chosen");

        let mut seen = [false; 4];
        for _ in 0..200 {
            let a = policy.choose(vec![0, 1, 2, 3], &mut rng).unwrap();
            seen[a] = true;
        }
        assert!(seen.iter().all(|&s| s), "Every action is eventually chosen");
    }
}

use rand::Rng;

mod uniform;

pub use uniform::UniformRandom;

/// A fixed behavior policy mapping the available actions to a choice
///
/// Policies hold no value estimates of their own and draw all randomness from the source they are handed.
pub trait Policy<A> {
    /// Choose one of `actions`
    ///
    /// **Returns** `None` if `actions` is empty
    fn choose<R: Rng + ?Sized>(&self, actions: Vec<A>, rng: &mut R) -> Option<A>;
}

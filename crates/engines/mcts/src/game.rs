//! The capability seam between the search and a concrete game.

/// Everything the search needs from a two-player zero-sum game.
///
/// States are owned snapshots the search clones freely; moves are small
/// copyable tokens the adapter can replay against any snapshot.
pub trait GameAdapter {
    type State: Clone;
    type Move: Copy + PartialEq;
    type Player: Copy + Eq;

    /// True when no further move can be played from `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Legal moves from `state`, in a deterministic order.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// The successor of `state` after `mv`. `None` marks a dead branch the
    /// search skips silently; it is never an error to propagate.
    fn apply_move(&self, state: &Self::State, mv: Self::Move) -> Option<Self::State>;

    /// Reward in [-1, 1] from `perspective`'s point of view, for terminal
    /// and truncated states alike.
    fn reward(&self, state: &Self::State, perspective: Self::Player) -> f64;
}

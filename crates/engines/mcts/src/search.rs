//! UCT Monte Carlo tree search.
//!
//! Each iteration runs the classic four phases: descend the tree by upper
//! confidence bounds, expand the reached leaf with one child per legal
//! move, play one uniformly random rollout from a fresh child, and add the
//! rollout reward to every node on the path back to the root. The reward is
//! always scored from the searching side's perspective and backpropagated
//! unchanged. The move returned is the root child with the most visits.

use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::game::GameAdapter;
use crate::tree::{NodeId, Tree, ROOT};

/// Search budget and tuning knobs. Loadable from TOML; every field falls
/// back to its default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Iteration budget per call.
    pub iterations: u32,
    /// Optional wall-clock budget in milliseconds, checked between
    /// iterations only; a running iteration is never interrupted.
    pub time_limit_ms: Option<u64>,
    /// UCT exploration constant.
    pub exploration: f64,
    /// Rollouts stop after this many plies and fall back to the reward of
    /// the reached state.
    pub rollout_depth: u32,
    /// Seed for reproducible searches; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> MctsConfig {
        MctsConfig {
            iterations: 1000,
            time_limit_ms: None,
            exploration: 1.4,
            rollout_depth: 30,
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn from_toml_str(raw: &str) -> Result<MctsConfig, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

pub struct Mcts {
    config: MctsConfig,
    rng: StdRng,
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Mcts {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Mcts { config, rng }
    }

    /// Runs the configured budget from `root_state` and returns the most
    /// visited root move. `None` means the root has no playable child,
    /// which is the caller's mate or stalemate signal.
    ///
    /// The search only ever works on cloned states; the caller applies the
    /// returned move through its own validated path.
    pub fn run<G: GameAdapter>(
        &mut self,
        game: &G,
        root_state: G::State,
        perspective: G::Player,
    ) -> Option<G::Move> {
        let started = Instant::now();
        let deadline = self.config.time_limit().map(|limit| started + limit);
        let root_terminal = game.is_terminal(&root_state);
        let mut tree: Tree<G::State, G::Move> = Tree::new(root_state, root_terminal);

        let mut iterations = 0u32;
        for _ in 0..self.config.iterations {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break;
                }
            }
            iterations += 1;

            let leaf = self.select(&tree);
            let chosen = self.expand(game, &mut tree, leaf);
            let reward = self.rollout(game, tree.node(chosen).state.clone(), perspective);
            backpropagate(&mut tree, chosen, reward);
        }

        let best = tree
            .node(ROOT)
            .children
            .iter()
            .copied()
            .max_by_key(|&child| tree.node(child).visits)
            .and_then(|child| tree.node(child).mv);

        debug!(
            "search ran {} iterations over {} nodes ({} root replies) in {:?}",
            iterations,
            tree.len(),
            tree.node(ROOT).children.len(),
            started.elapsed()
        );
        best
    }

    /// Walks down from the root until a terminal or childless node.
    fn select<S, M>(&self, tree: &Tree<S, M>) -> NodeId {
        let mut current = ROOT;
        while !tree.node(current).terminal && !tree.node(current).children.is_empty() {
            current = self.best_uct_child(tree, current);
        }
        current
    }

    /// Upper-confidence-bound argmax over the children of `parent`. An
    /// unvisited child wins outright, first in order.
    fn best_uct_child<S, M>(&self, tree: &Tree<S, M>, parent: NodeId) -> NodeId {
        let log_parent = (tree.node(parent).visits.max(1) as f64).ln();
        let mut best = tree.node(parent).children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &tree.node(parent).children {
            let node = tree.node(child);
            if node.visits == 0 {
                return child;
            }
            let visits = node.visits as f64;
            let score =
                node.value / visits + self.config.exploration * (log_parent / visits).sqrt();
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    /// Attaches one child per legal move of a non-terminal leaf, then picks
    /// a uniformly random child to simulate from. Moves the adapter refuses
    /// are skipped as dead branches. Returns the leaf itself when terminal
    /// or when nothing was playable.
    fn expand<G: GameAdapter>(
        &mut self,
        game: &G,
        tree: &mut Tree<G::State, G::Move>,
        leaf: NodeId,
    ) -> NodeId {
        if tree.node(leaf).terminal {
            return leaf;
        }
        if !tree.node(leaf).expanded {
            let moves = game.legal_moves(&tree.node(leaf).state);
            for mv in moves {
                let state = match game.apply_move(&tree.node(leaf).state, mv) {
                    Some(next) => next,
                    None => continue,
                };
                let terminal = game.is_terminal(&state);
                tree.add_child(leaf, state, mv, terminal);
            }
            tree.node_mut(leaf).expanded = true;
        }
        tree.node(leaf)
            .children
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(leaf)
    }

    /// Plays uniformly random moves until a terminal state or the depth
    /// cap, then scores the reached state once from `perspective`.
    fn rollout<G: GameAdapter>(
        &mut self,
        game: &G,
        mut state: G::State,
        perspective: G::Player,
    ) -> f64 {
        for _ in 0..self.config.rollout_depth {
            if game.is_terminal(&state) {
                break;
            }
            let moves = game.legal_moves(&state);
            let mv = match moves.choose(&mut self.rng) {
                Some(&mv) => mv,
                None => break,
            };
            match game.apply_move(&state, mv) {
                Some(next) => state = next,
                None => break,
            }
        }
        game.reward(&state, perspective)
    }
}

/// Adds the same reward to every node from `node` up to the root.
fn backpropagate<S, M>(tree: &mut Tree<S, M>, mut node: NodeId, reward: f64) {
    loop {
        let stats = tree.node_mut(node);
        stats.visits += 1;
        stats.value += reward;
        match stats.parent {
            Some(parent) => node = parent,
            None => break,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

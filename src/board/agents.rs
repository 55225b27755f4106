//! Agent stacks.
//!
//! Agents are anonymous units; all that matters is who owns them and where
//! they stand. A cell holds one [`AgentStack`], a multiset of owners, and may
//! mix agents of several players.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Multiset of agent owners at one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStack {
    agents: SmallVec<[PlayerId; 8]>,
}

impl AgentStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total agents on the cell.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agents owned by `player`.
    #[must_use]
    pub fn count_for(&self, player: PlayerId) -> u32 {
        self.agents.iter().filter(|&&p| p == player).count() as u32
    }

    /// Agents owned by anyone other than `player`.
    #[must_use]
    pub fn count_except(&self, player: PlayerId) -> u32 {
        self.len() as u32 - self.count_for(player)
    }

    /// Add one agent for `player`.
    pub fn push(&mut self, player: PlayerId) {
        self.agents.push(player);
    }

    /// Remove one agent of `player`; false if they had none here.
    pub fn remove_one(&mut self, player: PlayerId) -> bool {
        match self.agents.iter().position(|&p| p == player) {
            Some(idx) => {
                self.agents.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Distinct owners present, in first-arrival order.
    #[must_use]
    pub fn owners(&self) -> SmallVec<[PlayerId; 4]> {
        let mut out: SmallVec<[PlayerId; 4]> = SmallVec::new();
        for &p in &self.agents {
            if !out.contains(&p) {
                out.push(p);
            }
        }
        out
    }

    /// Iterate owners, one entry per agent.
    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.agents.iter().copied()
    }
}

impl FromIterator<PlayerId> for AgentStack {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        Self {
            agents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_stack() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let mut stack: AgentStack = [p0, p1, p0].into_iter().collect();

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.count_for(p0), 2);
        assert_eq!(stack.count_except(p0), 1);
        assert_eq!(stack.owners().as_slice(), &[p0, p1]);

        assert!(stack.remove_one(p1));
        assert!(!stack.remove_one(p1));
        assert_eq!(stack.owners().as_slice(), &[p0]);
    }

    #[test]
    fn test_empty() {
        let stack = AgentStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.count_for(PlayerId::new(0)), 0);
    }
}

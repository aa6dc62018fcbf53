//! Win counts across matches.

use crate::battle::runner::{MatchReport, OutcomeSink};
use crate::battle::state::MatchOutcome;
use crate::errors::LeaderboardError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    wins: BTreeMap<String, u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Winner gains a win, added with one if new. Loser is added with zero
    /// if new and otherwise left alone.
    pub fn record_result(&mut self, winner: &str, loser: &str) {
        *self.wins.entry(winner.to_string()).or_insert(0) += 1;
        self.wins.entry(loser.to_string()).or_insert(0);
        debug!(winner, loser, "Leaderboard updated");
    }

    pub fn wins(&self, name: &str) -> Option<u32> {
        self.wins.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.wins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// Most wins first, ties by name.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .wins
            .iter()
            .map(|(name, wins)| Standing {
                name: name.clone(),
                wins: *wins,
            })
            .collect();
        standings.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
        standings
    }

    /// Fixed-width table: rank, name cut to ten characters, wins.
    pub fn render_table(&self) -> String {
        let mut table = format!("{:<10}{:<50.10}{:<25}\n", "", "Name", "Wins");
        for (rank, standing) in self.standings().iter().enumerate() {
            table.push_str(&format!(
                "{:<10}{:<50.10}{:<25}\n",
                rank + 1,
                standing.name,
                standing.wins
            ));
        }
        table
    }

    pub fn from_json_str(content: &str) -> Result<Self, LeaderboardError> {
        serde_json::from_str(content).map_err(|e| LeaderboardError::Malformed(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, LeaderboardError> {
        serde_json::to_string_pretty(self).map_err(|e| LeaderboardError::Malformed(e.to_string()))
    }

    /// Read a leaderboard file. A missing file is an empty leaderboard.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| LeaderboardError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        let content = self.to_json_string()?;
        fs::write(path, content)
            .map_err(|e| LeaderboardError::Io(format!("{}: {}", path.display(), e)))
    }
}

impl OutcomeSink for Leaderboard {
    fn record(&mut self, report: &MatchReport) {
        match (report.outcome, &report.winner_name, &report.loser_name) {
            (MatchOutcome::Winner(_), Some(winner), Some(loser)) => {
                info!(winner = %winner, loser = %loser, "Recording match result");
                self.record_result(winner, loser);
            }
            // Draws do not touch the board
            _ => debug!("Draw not recorded on the leaderboard"),
        }
    }
}

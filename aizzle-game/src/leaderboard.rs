//! Leaderboard ordering, paging and rank derivation.
//!
//! Records come from the remote store already paged; this module only
//! orders what it is given and answers rank questions locally.
use serde::{Deserialize, Serialize};

use crate::constants::LEADERBOARD_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub puzzles_solved: u32,
    #[serde(default)]
    pub best_streak: u32,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(name: &str, score: u32, puzzles_solved: u32, best_streak: u32) -> Self {
        Self {
            name: name.to_string(),
            score,
            puzzles_solved,
            best_streak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: &'a LeaderboardEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub rows: Vec<RankedEntry<'a>>,
}

/// Entries ordered by descending score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leaderboard(Vec<LeaderboardEntry>);

impl Leaderboard {
    /// Sort descending by score; ties keep their input order.
    #[must_use]
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self(entries)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into leaderboard entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Demo board shown when no remote data is available.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_entries(vec![
            LeaderboardEntry::new("GeniusSolver", 1250, 43, 12),
            LeaderboardEntry::new("PuzzleMaster", 980, 35, 9),
            LeaderboardEntry::new("BrainTeaser", 850, 32, 8),
            LeaderboardEntry::new("LogicWizard", 720, 28, 7),
            LeaderboardEntry::new("MindBender", 690, 25, 6),
            LeaderboardEntry::new("PuzzleKing", 640, 22, 6),
            LeaderboardEntry::new("RiddleMaster", 580, 20, 5),
            LeaderboardEntry::new("ThoughtLeader", 510, 18, 5),
            LeaderboardEntry::new("PatternPro", 490, 16, 4),
            LeaderboardEntry::new("MathMagician", 450, 15, 4),
        ])
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One more than the number of entries with a strictly greater score.
    #[must_use]
    pub fn rank_for_score(&self, score: u32) -> usize {
        self.0.iter().filter(|entry| entry.score > score).count() + 1
    }

    #[must_use]
    pub fn total_pages(&self, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        self.0.len().div_ceil(page_size).max(1)
    }

    /// Rows of a 1-based page; out-of-range pages are clamped.
    #[must_use]
    pub fn page(&self, page: usize, page_size: usize) -> LeaderboardPage<'_> {
        let page_size = page_size.max(1);
        let total_pages = self.total_pages(page_size);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let rows = self
            .0
            .iter()
            .enumerate()
            .skip(start)
            .take(page_size)
            .map(|(offset, entry)| RankedEntry {
                rank: offset + 1,
                entry,
            })
            .collect();
        LeaderboardPage {
            page,
            total_pages,
            rows,
        }
    }

    /// Page using the default page size.
    #[must_use]
    pub fn default_page(&self, page: usize) -> LeaderboardPage<'_> {
        self.page(page, LEADERBOARD_PAGE_SIZE)
    }
}

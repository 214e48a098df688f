//! Job ladder
//!
//! Work shifts pay `score × salary_multiplier`. The best shift score unlocks
//! higher tiers; promotions never go backwards.

use serde::Serialize;

/// A single rung on the job ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: u32,
    pub title: String,
    /// Coins per point in the flight minigame
    pub salary_multiplier: u64,
    /// High score needed to hold this job
    pub required_score: u32,
}

impl Job {
    fn new(id: u32, title: &str, salary_multiplier: u64, required_score: u32) -> Self {
        Self {
            id,
            title: title.to_string(),
            salary_multiplier,
            required_score,
        }
    }
}

/// Ordered job tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobLadder {
    tiers: Vec<Job>,
}

impl Default for JobLadder {
    fn default() -> Self {
        Self::standard()
    }
}

impl JobLadder {
    /// Build a ladder; tiers must start at score 0 and strictly increase in
    /// both id and required score
    pub fn new(tiers: Vec<Job>) -> Option<Self> {
        let first = tiers.first()?;
        if first.required_score != 0 {
            return None;
        }
        let ordered = tiers
            .windows(2)
            .all(|w| w[0].id < w[1].id && w[0].required_score < w[1].required_score);
        ordered.then_some(Self { tiers })
    }

    /// The default career path
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                Job::new(0, "Intern", 1, 0),
                Job::new(1, "Junior Dev", 2, 5),
                Job::new(2, "Senior Dev", 4, 15),
                Job::new(3, "Manager", 8, 30),
                Job::new(4, "CEO", 15, 50),
            ],
        }
    }

    pub fn tiers(&self) -> &[Job] {
        &self.tiers
    }

    /// Look up a job by id, falling back to the entry tier
    pub fn job(&self, id: u32) -> &Job {
        self.tiers
            .iter()
            .find(|j| j.id == id)
            .unwrap_or(&self.tiers[0])
    }

    /// Highest tier the given high score qualifies for
    pub fn eligible(&self, high_score: u32) -> &Job {
        self.tiers
            .iter()
            .rev()
            .find(|j| high_score >= j.required_score)
            .unwrap_or(&self.tiers[0])
    }

    /// The job to promote to, if the high score beats the current job
    pub fn promotion(&self, current_id: u32, high_score: u32) -> Option<&Job> {
        let eligible = self.eligible(high_score);
        (eligible.id > current_id).then_some(eligible)
    }
}

//! JSON run reports for cross-run comparison.

use pixel_shooter_core::{Event, Snapshot};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Summary of a completed headless run.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct RunReport {
    /// Seed the run was started with.
    pub(crate) seed: u64,
    /// Number of steps requested for the run.
    pub(crate) steps: u32,
    /// Simulated milliseconds per step.
    pub(crate) dt_ms: u64,
    /// Event totals observed across the run.
    pub(crate) events: EventTallies,
    /// World state captured after the final step.
    pub(crate) snapshot: Snapshot,
    /// Hex-encoded SHA-256 digest of the report body.
    pub(crate) digest: String,
}

impl RunReport {
    /// Builds the report for a finished run and seals it with a digest.
    #[must_use]
    pub(crate) fn new(
        seed: u64,
        steps: u32,
        dt_ms: u64,
        events: &[Event],
        snapshot: &Snapshot,
    ) -> Self {
        let tallies = EventTallies::count(events);
        let body = ReportBody {
            seed,
            steps,
            dt_ms,
            events: &tallies,
            snapshot,
        };
        let json = serde_json::to_vec(&body).expect("run report serialization never fails");
        let digest = format!("{:x}", Sha256::digest(&json));

        Self {
            seed,
            steps,
            dt_ms,
            events: tallies,
            snapshot: snapshot.clone(),
            digest,
        }
    }
}

#[derive(Serialize)]
struct ReportBody<'a> {
    seed: u64,
    steps: u32,
    dt_ms: u64,
    events: &'a EventTallies,
    snapshot: &'a Snapshot,
}

/// Event totals observed across a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct EventTallies {
    /// Ticks that advanced simulated time.
    pub(crate) ticks: u32,
    /// Enemies that entered the arena.
    pub(crate) spawned: u32,
    /// Enemies destroyed by player fire.
    pub(crate) destroyed: u32,
    /// Score updates emitted by the world.
    pub(crate) score_changes: u32,
    /// Lives lost across every loss path.
    pub(crate) lives_lost: u32,
    /// Whether the run terminated before the step budget ran out.
    pub(crate) game_over: bool,
}

impl EventTallies {
    /// Counts totals over an event log.
    #[must_use]
    pub(crate) fn count(events: &[Event]) -> Self {
        let mut tallies = Self::default();
        for event in events {
            match event {
                Event::RunStarted => {}
                Event::TimeAdvanced { .. } => tallies.ticks += 1,
                Event::EnemySpawned { .. } => tallies.spawned += 1,
                Event::EnemyDestroyed { .. } => tallies.destroyed += 1,
                Event::ScoreChanged { .. } => tallies.score_changes += 1,
                Event::LifeLost { .. } => tallies.lives_lost += 1,
                Event::GameOver { .. } => tallies.game_over = true,
            }
        }
        tallies
    }
}

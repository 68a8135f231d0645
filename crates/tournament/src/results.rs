//! Run results storage and reporting

use anyhow::{Context, Result};
use pod_core::{RunReport, SelectionMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Results of running the scheduler over a range of player counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResults {
    /// Name/description of the sweep
    pub name: String,
    pub target_grade: f64,
    pub mode: SelectionMode,
    /// One entry per player count, in the order they were run
    pub entries: Vec<SweepEntry>,
}

/// Outcome for a single player count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepEntry {
    pub players: usize,
    pub plan: Vec<usize>,
    pub candidates: usize,
    pub rounds: usize,
    pub final_grade: f64,
}

impl SweepResults {
    pub fn new(name: &str, target_grade: f64, mode: SelectionMode) -> Self {
        Self {
            name: name.to_string(),
            target_grade,
            mode,
            entries: Vec::new(),
        }
    }

    /// Add a finished run
    pub fn add_run(&mut self, report: &RunReport) {
        self.entries.push(SweepEntry {
            players: report.total_players,
            plan: report.plan.clone(),
            candidates: report.candidates,
            rounds: report.round_count(),
            final_grade: report.final_grade,
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Sweep: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Target: {:.1}% average coverage, {}\n\n",
            self.target_grade * 100.0,
            mode_label(&self.mode)
        ));

        report.push_str(&format!(
            "{:>7} {:<16} {:>12} {:>7} {:>8}\n",
            "Players", "Pods", "Candidates", "Rounds", "Grade"
        ));
        report.push_str(&"-".repeat(54));
        report.push('\n');

        for entry in &self.entries {
            report.push_str(&format!(
                "{:>7} {:<16} {:>12} {:>7} {:>7.1}%\n",
                entry.players,
                format!("{:?}", entry.plan),
                entry.candidates,
                entry.rounds,
                entry.final_grade * 100.0
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// Save a single run to a JSON file
pub fn save_run(report: &RunReport, path: &Path) -> Result<()> {
    save_json(report, path)
}

/// Load a single run from a JSON file
pub fn load_run(path: &Path) -> Result<RunReport> {
    load_json(path)
}

/// Round-by-round text report of a single run, followed by every player's
/// opponent list
pub fn generate_run_report(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} players: pods {:?}, {} candidate rounds ({}) ===\n\n",
        report.total_players,
        report.plan,
        report.candidates,
        mode_label(&report.mode)
    ));

    for round in &report.rounds {
        out.push_str(&format!("Round {}: {}\n", round.round, round.pods));
        out.push_str(&format!(
            "    grade {:.1}%, candidate #{} of {} (first {:.2}%){}\n",
            round.grade * 100.0,
            round.candidate_index,
            report.candidates,
            round.percentile,
            if round.early_exit { ", good enough" } else { "" }
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "Average player met {:.1}% of the field after {} rounds (target {:.1}%)\n",
        report.final_grade * 100.0,
        report.round_count(),
        report.target_grade * 100.0
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for (player, opponents) in report.opponents.iter().enumerate() {
        out.push_str(&format!("Player {:>3} played against {:?}\n", player, opponents));
    }

    out
}

fn mode_label(mode: &SelectionMode) -> String {
    match mode {
        SelectionMode::Best => "best round".to_string(),
        SelectionMode::GoodEnough { increase } => format!("good enough at x{}", increase),
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_core::{RunnerConfig, TournamentRunner};

    fn six_player_run() -> RunReport {
        let mut runner = TournamentRunner::new(6, RunnerConfig::default()).unwrap();
        runner.run_until(1.0).unwrap()
    }

    #[test]
    fn test_run_report_lists_rounds_and_players() {
        let report = six_player_run();
        let text = generate_run_report(&report);

        assert!(text.starts_with("=== 6 players: pods [3, 3], 20 candidate rounds (best round) ==="));
        assert!(text.contains("Round 1: {0, 1, 2} {3, 4, 5}"));
        assert!(text.contains("grade 40.0%, candidate #0 of 20"));
        assert!(text.contains("Player   0 played against [1, 2, 3, 4, 5]"));
        assert_eq!(text.matches("Round ").count(), report.round_count());
    }

    #[test]
    fn test_sweep_report() {
        let mut sweep = SweepResults::new("6 players", 1.0, SelectionMode::Best);
        sweep.add_run(&six_player_run());

        let text = sweep.generate_report();
        assert!(text.contains("=== Sweep: 6 players ==="));
        assert!(text.contains("Target: 100.0% average coverage, best round"));
        assert_eq!(sweep.entries[0].players, 6);
        assert_eq!(sweep.entries[0].candidates, 20);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir();
        let run_path = dir.join(format!("pods-run-{}.json", std::process::id()));
        let sweep_path = dir.join(format!("pods-sweep-{}.json", std::process::id()));

        let report = six_player_run();
        save_run(&report, &run_path).unwrap();
        let loaded = load_run(&run_path).unwrap();
        assert_eq!(loaded.opponents, report.opponents);
        assert_eq!(loaded.round_count(), report.round_count());

        let mut sweep = SweepResults::new("save", 1.0, SelectionMode::good_enough());
        sweep.add_run(&report);
        sweep.save(&sweep_path).unwrap();
        let loaded = SweepResults::load(&sweep_path).unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.mode, SelectionMode::good_enough());

        std::fs::remove_file(run_path).unwrap();
        std::fs::remove_file(sweep_path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("pods-missing-results.json");
        assert!(load_run(&path).is_err());
    }
}

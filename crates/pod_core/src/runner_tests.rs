use super::*;
use crate::scheduler::select_best_round;

#[test]
fn test_six_players_full_coverage() {
    let mut runner = TournamentRunner::new(6, RunnerConfig::default()).unwrap();
    assert_eq!(runner.plan(), &[3, 3]);
    assert_eq!(runner.candidates().len(), 20);

    let report = runner.run_until(1.0).unwrap();

    assert_eq!(report.rounds[0].pods.to_string(), "{0, 1, 2} {3, 4, 5}");
    assert!((report.rounds[0].grade - 0.4).abs() < 1e-12);
    assert!(report.rounds[1].grade > report.rounds[0].grade);
    assert!(report.round_count() <= 4, "took {} rounds", report.round_count());
    assert_eq!(report.final_grade, 1.0);
    for (player, opponents) in report.opponents.iter().enumerate() {
        assert_eq!(opponents.len(), 5, "player {} met {:?}", player, opponents);
    }
}

#[test]
fn test_rounds_raise_grade_every_time() {
    for n in 6..=10 {
        let mut runner = TournamentRunner::new(n, RunnerConfig::default()).unwrap();
        let report = runner.run_until(1.0).unwrap();

        let mut last = 0.0;
        for (i, round) in report.rounds.iter().enumerate() {
            assert_eq!(round.round as usize, i + 1);
            assert!(round.grade > last, "n = {}: round {} did not help", n, round.round);
            last = round.grade;
        }
    }
}

#[test]
fn test_partial_target_stops_early() {
    let mut runner = TournamentRunner::new(8, RunnerConfig::default()).unwrap();
    let report = runner.run_until(0.5).unwrap();

    assert!(report.final_grade >= 0.5);
    let before_last = report.rounds[report.round_count() - 2].grade;
    assert!(before_last < 0.5);
}

#[test]
fn test_target_already_met() {
    let mut runner = TournamentRunner::new(7, RunnerConfig::default()).unwrap();
    runner.run_until(0.3).unwrap();
    let played = runner.rounds().len();

    let report = runner.run_until(0.3).unwrap();
    assert_eq!(report.round_count(), played);
}

#[test]
fn test_invalid_target() {
    let mut runner = TournamentRunner::new(6, RunnerConfig::default()).unwrap();
    for target in [0.0, -0.5, 1.01, f64::NAN] {
        assert!(matches!(
            runner.run_until(target),
            Err(PodError::InvalidInput(_))
        ));
    }
    assert!(runner.rounds().is_empty());
}

#[test]
fn test_round_limit() {
    let config = RunnerConfig {
        max_rounds: 1,
        ..Default::default()
    };
    let mut runner = TournamentRunner::new(6, config).unwrap();
    let err = runner.run_until(1.0).unwrap_err();
    assert!(matches!(err, PodError::RoundLimitExceeded { rounds: 1, .. }));
}

#[test]
fn test_too_few_players() {
    let err = TournamentRunner::new(5, RunnerConfig::default()).unwrap_err();
    assert!(matches!(err, PodError::InvalidInput(_)));
}

#[test]
fn test_enumeration_limit() {
    let err = TournamentRunner::new(14, RunnerConfig::default()).unwrap_err();
    match err {
        PodError::EnumerationTooLarge {
            players,
            configurations,
            limit,
        } => {
            assert_eq!(players, 14);
            assert_eq!(configurations, 364 * 165 * 70);
            assert_eq!(limit, DEFAULT_MAX_CONFIGURATIONS);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_cached_set_checked_against_smaller_limit() {
    let mut cache = ConfigurationCache::new();
    TournamentRunner::with_cache(8, RunnerConfig::default(), &mut cache).unwrap();
    assert!(cache.contains(8));

    let config = RunnerConfig {
        max_configurations: 10,
        ..RunnerConfig::default()
    };
    let err = TournamentRunner::with_cache(8, config, &mut cache).unwrap_err();
    match err {
        PodError::EnumerationTooLarge {
            players,
            configurations,
            limit,
        } => {
            assert_eq!(players, 8);
            assert_eq!(configurations, 70);
            assert_eq!(limit, 10);
        }
        other => panic!("unexpected error: {}", other),
    }

    // Exactly at the limit is still allowed
    let config = RunnerConfig {
        max_configurations: 70,
        ..RunnerConfig::default()
    };
    assert!(TournamentRunner::with_cache(8, config, &mut cache).is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_rounds_match_public_selection() {
    let mut runner = TournamentRunner::new(9, RunnerConfig::default()).unwrap();
    for _ in 0..4 {
        let expected =
            select_best_round(runner.history(), runner.candidates(), SelectionMode::Best).unwrap();
        let record = runner.play_round().unwrap();
        assert_eq!(record.candidate_index, expected.index);
        assert_eq!(record.pods, expected.configuration);
        assert_eq!(record.grade, expected.grade);
    }
}

#[test]
fn test_cache_shares_candidates() {
    let mut cache = ConfigurationCache::new();
    let a = TournamentRunner::with_cache(8, RunnerConfig::default(), &mut cache).unwrap();
    let b = TournamentRunner::with_cache(8, RunnerConfig::default(), &mut cache).unwrap();

    assert_eq!(cache.len(), 1);
    assert!(cache.contains(8));
    assert!(std::ptr::eq(a.candidates(), b.candidates()));
}

#[test]
fn test_good_enough_mode_reaches_target() {
    let config = RunnerConfig {
        mode: SelectionMode::good_enough(),
        ..Default::default()
    };
    let mut runner = TournamentRunner::new(9, config).unwrap();
    let report = runner.run_until(1.0).unwrap();

    assert_eq!(report.final_grade, 1.0);
    assert!(report.rounds[0].early_exit);
    assert_eq!(report.rounds[0].candidate_index, 0);
}

#[test]
fn test_report_serializes() {
    let mut runner = TournamentRunner::new(6, RunnerConfig::default()).unwrap();
    let report = runner.run_until(1.0).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.round_count(), report.round_count());
    assert_eq!(back.rounds[0].pods, report.rounds[0].pods);
    assert_eq!(back.opponents, report.opponents);
    assert_eq!(back.mode, SelectionMode::Best);
}

use super::*;

/// Largest number of 4-pods any exact split of `n` can have
fn max_fours(n: usize) -> usize {
    (0..=n / 4).rev().find(|a| (n - 4 * a) % 3 == 0).unwrap()
}

#[test]
fn test_plan_rejects_small_counts() {
    for n in 0..MIN_PLAYERS {
        assert!(matches!(plan_pod_sizes(n), Err(PodError::InvalidInput(_))));
    }
}

#[test]
fn test_plan_exact_sum() {
    for n in 6..=200 {
        let plan = plan_pod_sizes(n).unwrap();
        assert_eq!(plan.iter().sum::<usize>(), n, "plan for {} = {:?}", n, plan);
        assert!(plan.iter().all(|&s| s == 3 || s == 4), "plan for {} = {:?}", n, plan);
    }
}

#[test]
fn test_plan_maximizes_four_pods() {
    for n in 6..=200 {
        let plan = plan_pod_sizes(n).unwrap();
        let fours = plan.iter().filter(|&&s| s == 4).count();
        assert_eq!(fours, max_fours(n), "plan for {} = {:?}", n, plan);
    }
}

#[test]
fn test_plan_small_counts() {
    assert_eq!(plan_pod_sizes(6).unwrap(), vec![3, 3]);
    assert_eq!(plan_pod_sizes(7).unwrap(), vec![4, 3]);
    assert_eq!(plan_pod_sizes(8).unwrap(), vec![4, 4]);
    assert_eq!(plan_pod_sizes(9).unwrap(), vec![3, 3, 3]);
    assert_eq!(plan_pod_sizes(10).unwrap(), vec![4, 3, 3]);
    assert_eq!(plan_pod_sizes(11).unwrap(), vec![4, 4, 3]);
    assert_eq!(plan_pod_sizes(12).unwrap(), vec![4, 4, 4]);
}

#[test]
fn test_plan_lists_fours_first() {
    let plan = plan_pod_sizes(17).unwrap();
    assert_eq!(plan, vec![4, 4, 3, 3, 3]);
}

#[test]
fn test_count_configurations() {
    assert_eq!(count_configurations(6, &[3, 3]), Some(20));
    assert_eq!(count_configurations(8, &[4, 4]), Some(70));
    // 3-pod chosen first from 7, then the 4-pod from the other 4
    assert_eq!(count_configurations(7, &[4, 3]), Some(35));
    // C(12,4) * C(8,4) * C(4,4)
    assert_eq!(count_configurations(12, &[4, 4, 4]), Some(495 * 70));
}

#[test]
fn test_count_configurations_overflow() {
    let plan = plan_pod_sizes(200).unwrap();
    assert_eq!(count_configurations(200, &plan), None);
}

use nrpe_plugins::health::{classify, StateCounts, ThresholdConfig};
use nrpe_plugins::Status;

fn default_config() -> ThresholdConfig {
    ThresholdConfig::new(99.0, 50.0, 1, 0).unwrap()
}

fn counts(states: &[(&str, u64)]) -> StateCounts {
    let mut counts = StateCounts::new("InService");
    for &(state, n) in states {
        counts.insert(state, n);
    }
    counts
}

#[test]
fn fully_healthy_balancer() {
    let verdict = classify(&counts(&[("InService", 3), ("OutOfService", 0)]), &default_config());
    assert_eq!(verdict.healthy_percent, 100.0);
    assert_eq!(verdict.severity, Status::Ok);
    assert!(verdict.reasons.is_empty());
    assert_eq!(verdict.display_summary, "Total: 3; InService: 3; OutOfService: 0");
}

#[test]
fn mostly_out_of_service_stays_critical() {
    let verdict = classify(&counts(&[("InService", 1), ("OutOfService", 2)]), &default_config());
    assert!((verdict.healthy_percent - 33.33).abs() < 0.01);
    assert_eq!(verdict.severity, Status::Critical);
    assert_eq!(
        verdict.reasons,
        ["InService count <= 50% (CR)", "InService count <= 1(WR)"]
    );
}

#[test]
fn nothing_in_service_is_critical_by_count() {
    let config = ThresholdConfig::new(0.0, 0.0, 0, 0).unwrap();
    let verdict = classify(&counts(&[("InService", 0)]), &config);
    assert_eq!(verdict.severity, Status::Critical);
    assert!(verdict
        .reasons
        .iter()
        .any(|reason| reason == "InService count <= 0(CR)"));
}

#[test]
fn no_instances_at_all() {
    let verdict = classify(&counts(&[]), &default_config());
    assert_eq!(verdict.healthy_percent, 0.0);
    assert_eq!(verdict.severity, Status::Critical);
    assert_eq!(verdict.reasons.len(), 2);
    assert_eq!(verdict.display_summary, "Total: 0; InService: 0");
    assert_eq!(verdict.perf_data, "inservice=0%;99;50");
}

#[test]
fn percent_is_always_a_percentage() {
    for healthy in 0..20 {
        for unhealthy in 0..20 {
            let c = counts(&[("InService", healthy), ("OutOfService", unhealthy)]);
            let percent = c.healthy_percent();
            assert!(
                (0.0..=100.0).contains(&percent),
                "{} healthy, {} unhealthy gave {}%",
                healthy,
                unhealthy,
                percent
            );
        }
    }
}

#[test]
fn count_check_never_lowers_severity() {
    let percent_levels = [(99.0, 50.0), (75.0, 25.0), (10.0, 0.0)];
    let count_levels = [(0, 0), (1, 0), (3, 1), (10, 5)];
    for healthy in 1..8 {
        for unhealthy in 0..8 {
            let c = counts(&[("InService", healthy), ("OutOfService", unhealthy)]);
            for &(pw, pc) in &percent_levels {
                // count thresholds of zero never trip with a healthy instance
                let percent_only = classify(&c, &ThresholdConfig::new(pw, pc, 0, 0).unwrap());
                for &(cw, cc) in &count_levels {
                    let both = classify(&c, &ThresholdConfig::new(pw, pc, cw, cc).unwrap());
                    assert!(both.severity >= percent_only.severity);
                    assert!(both.reasons.starts_with(&percent_only.reasons));
                }
            }
        }
    }
}

#[test]
fn classify_is_repeatable() {
    let c = counts(&[("OutOfService", 4), ("InService", 5), ("Unknown", 1)]);
    let config = ThresholdConfig::new(80.0, 40.0, 6, 2).unwrap();
    let first = classify(&c, &config);
    let second = classify(&c, &config);
    assert_eq!(first, second);
    assert_eq!(first.severity, Status::Warning);
    assert_eq!(
        first.display_summary,
        "Total: 10; InService: 5; OutOfService: 4; Unknown: 1"
    );
}

use kaldialign::{
    bootstrap_wer_ci, bootstrap_wer_interval, compute_utterance_scores,
    paired_improvement_probability,
    BootstrapConfig, UtteranceScore,
};

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-2
}

fn corpus() -> (Vec<Vec<&'static str>>, Vec<Vec<&'static str>>, Vec<Vec<&'static str>>) {
    let refs = vec![vec!["a", "b", "c"], vec!["d", "e", "f"]];
    let hyps = vec![vec!["a", "b", "d"], vec!["e", "f", "f"]];
    let hyps2 = vec![vec!["a", "b", "c"], vec!["e", "e", "f"]];
    (refs, hyps, hyps2)
}

#[test]
fn test_bootstrap_one_system() {
    let (refs, hyps, _) = corpus();
    let report = bootstrap_wer_ci(&refs, &hyps, None, BootstrapConfig::default()).unwrap();
    let s = report.system1;
    assert!(approx(s.wer, 0.50), "wer={}", s.wer);
    assert!(approx(s.ci95, 0.23), "ci95={}", s.ci95);
    assert!(approx(s.ci95_min(), 0.269), "ci95min={}", s.ci95_min());
    assert!(approx(s.ci95_max(), 0.731), "ci95max={}", s.ci95_max());
    assert!(report.system2.is_none());
    assert!(report.p_s2_improv_over_s1.is_none());
}

#[test]
fn test_bootstrap_two_systems() {
    let (refs, hyps, hyps2) = corpus();
    let report =
        bootstrap_wer_ci(&refs, &hyps, Some(&hyps2[..]), BootstrapConfig::default()).unwrap();

    let s = report.system1;
    assert!(approx(s.wer, 0.50));
    assert!(approx(s.ci95, 0.23));

    let s = report.system2.unwrap();
    assert!(approx(s.wer, 0.166), "wer={}", s.wer);
    assert!(approx(s.ci95, 0.231), "ci95={}", s.ci95);
    assert!(approx(s.ci95_min(), -0.064));
    assert!(approx(s.ci95_max(), 0.397));

    assert_eq!(report.p_s2_improv_over_s1, Some(1.0));
}

#[test]
fn test_scores_match_edit_distance_counts() {
    let (refs, hyps, _) = corpus();
    let scores = compute_utterance_scores(&refs, &hyps).unwrap();
    assert_eq!(
        scores,
        vec![
            UtteranceScore { errors: 1, ref_len: 3 },
            UtteranceScore { errors: 2, ref_len: 3 },
        ]
    );
}

#[test]
fn test_seed_reproducibility() {
    let scores: Vec<UtteranceScore> = (0..25)
        .map(|i| UtteranceScore {
            errors: i % 4,
            ref_len: 5 + i % 3,
        })
        .collect();

    let a = bootstrap_wer_interval(&scores, 5_000, 11).unwrap();
    let b = bootstrap_wer_interval(&scores, 5_000, 11).unwrap();
    assert_eq!(a, b);

    let c = bootstrap_wer_interval(&scores, 5_000, 12).unwrap();
    assert!((a.wer - c.wer).abs() < 1e-2);
    assert_ne!(a.ci95.to_bits(), c.ci95.to_bits());
}

#[test]
fn test_paired_probability_reproducible() {
    let a: Vec<UtteranceScore> = (0..12)
        .map(|i| UtteranceScore {
            errors: i % 3,
            ref_len: 4,
        })
        .collect();
    let b: Vec<UtteranceScore> = (0..12)
        .map(|i| UtteranceScore {
            errors: (i + 1) % 3,
            ref_len: 4,
        })
        .collect();

    let p1 = paired_improvement_probability(&a, &b, 1_000, 5).unwrap();
    let p2 = paired_improvement_probability(&a, &b, 1_000, 5).unwrap();
    assert_eq!(p1.to_bits(), p2.to_bits());
    assert!((0.0..=1.0).contains(&p1));
}

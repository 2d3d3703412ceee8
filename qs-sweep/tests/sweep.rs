use queuesim_metrics::{export_csv, export_json, SweepRow};
use queuesim_sweep::{run_mm1_sweep, run_poisson_sweep, Mm1SweepConfig, PoissonSweepConfig};
use queuesim_viz::charts::count_distribution::chart_file_name;

fn mm1_config(workers: Option<usize>) -> Mm1SweepConfig {
    Mm1SweepConfig {
        lambda_values: vec![0.5, 1.0, 1.5, 3.0],
        mu_values: vec![1.0, 2.0],
        num_events: 10_000,
        seed: Some(42),
        horizon: None,
        workers,
    }
}

#[test]
fn results_do_not_depend_on_worker_count() {
    let single = run_mm1_sweep(&mm1_config(Some(1))).unwrap();
    let many = run_mm1_sweep(&mm1_config(Some(4))).unwrap();
    assert_eq!(single, many);
}

#[test]
fn stable_pairs_agree_with_theory() {
    let table = run_mm1_sweep(&mm1_config(None)).unwrap();
    let row = table
        .completed()
        .find(|row| row.result.lambda == 1.0 && row.result.mu == 2.0)
        .unwrap();
    let theory = row.result.theory.unwrap();
    assert!((row.result.e_tsys - theory.e_tsys).abs() <= 0.1 * theory.e_tsys);
    assert!((row.result.utilization - theory.utilization).abs() < 0.05);
}

#[test]
fn unstable_pairs_complete_without_theory() {
    let table = run_mm1_sweep(&mm1_config(None)).unwrap();
    for row in table.completed() {
        let r = &row.result;
        assert_eq!(r.stable, r.mu > r.lambda);
        assert_eq!(r.theory.is_some(), r.stable);
        assert!((0.0..=1.0).contains(&r.utilization));
    }
    assert_eq!(table.failed_count(), 0);

    let text = table.render_text();
    let unstable_line = text
        .lines()
        .find(|line| line.starts_with("    3.00     1.00"))
        .unwrap();
    assert!(unstable_line.trim_end().ends_with('-'));
}

#[test]
fn failed_pairs_are_reported_and_exported() {
    let config = Mm1SweepConfig {
        lambda_values: vec![1.0, -2.0],
        mu_values: vec![2.0],
        num_events: 100,
        seed: Some(1),
        horizon: None,
        workers: Some(2),
    };
    let table = run_mm1_sweep(&config).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.failed_count(), 1);
    let failed = table.rows().nth(1).unwrap();
    assert!(matches!(failed, SweepRow::Failed { reason, .. } if reason.contains("lambda")));
    assert!(table.render_text().contains("FAILED: Invalid parameter lambda = -2"));

    let dir = std::env::temp_dir().join(format!("queuesim_sweep_{}", std::process::id()));
    export_csv(&table, dir.join("mm1.csv")).unwrap();
    export_json(&table, dir.join("mm1.json"), false).unwrap();

    let csv = std::fs::read_to_string(dir.join("mm1.csv")).unwrap();
    assert!(csv.lines().nth(2).unwrap().starts_with("failed,-2,2,"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("mm1.json")).unwrap()).unwrap();
    assert_eq!(json[1]["status"], "failed");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn poisson_counts_match_the_rate() {
    let config = PoissonSweepConfig {
        rates: vec![2.0, 8.0],
        num_events: vec![20_000],
        delta: 1.0,
        seed: Some(3),
        ..Default::default()
    };
    let output = run_poisson_sweep(&config).unwrap();
    assert_eq!(output.results.len(), 2);
    assert!(output.superposed.is_empty());
    for result in &output.results {
        assert!((result.mean_count() - result.rate).abs() < 0.05 * result.rate);
    }

    let output = run_poisson_sweep(&PoissonSweepConfig {
        superimpose: true,
        ..config
    })
    .unwrap();
    assert!(output.results.is_empty());
    assert_eq!(output.superposed.len(), 1);
    let merged = &output.superposed[0];
    assert_eq!(merged.rate, 10.0);
    assert!((merged.mean_count() - 10.0).abs() < 0.5);
    assert!(merged.num_events < 2 * 20_000);
    assert_eq!(
        chart_file_name(merged),
        format!("hist_vs_poisson_superposed_l10_N{}.png", merged.num_events)
    );
}

use chrono::{DateTime, NaiveDate, Utc};
use portfolio_metrics::metrics::{growth_sample, weighted_growth};
use portfolio_metrics::{
    linear_regression_cagr, partition, GrowthEstimator, MetricsCalculator, Observation,
    ValidationError, MS_PER_YEAR,
};

fn date(s: &str) -> DateTime<Utc> {
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    Observation::on_date(day, 0.0).timestamp
}

fn illustrative_series() -> (Vec<f64>, Vec<DateTime<Utc>>) {
    let values = vec![1.0, 1.5, 2.0, 2.0, 2.5, 3.0, 3.1, 3.2, 3.3];
    let timestamps = [
        "2024-01-01",
        "2024-04-02",
        "2024-05-09",
        "2024-07-02",
        "2024-09-22",
        "2024-12-29",
        "2025-01-01",
        "2025-03-31",
        "2025-06-29",
    ]
    .iter()
    .map(|s| date(s))
    .collect();
    (values, timestamps)
}

#[test]
fn test_illustrative_series_window_rates() {
    let (values, timestamps) = illustrative_series();
    let series: Vec<Observation> = values
        .iter()
        .zip(&timestamps)
        .map(|(&v, &t)| Observation::new(t, v))
        .collect();

    let windows = partition(&series, MS_PER_YEAR, MS_PER_YEAR / 2.0).unwrap();
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].indices(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(windows[1].indices(), &[3, 4, 5, 6, 7, 8]);
    assert_eq!(windows[2].indices(), &[6, 7, 8]);

    let samples: Vec<_> = windows.iter().map(growth_sample).collect();
    let expected = [(1.846, 0.995), (0.600, 0.992), (0.132, 0.490)];
    for (sample, (rate, fraction)) in samples.iter().zip(expected) {
        assert!((sample.rate - rate).abs() < 1e-3, "rate {}", sample.rate);
        assert!(
            (sample.fraction_of_year - fraction).abs() < 1e-3,
            "fraction {}",
            sample.fraction_of_year
        );
    }

    let blended = (1.846 * 0.995 + 0.600 * 0.992 + 0.132 * 0.490) / (0.995 + 0.992 + 0.490);
    assert!((weighted_growth(&samples) - blended).abs() < 1e-3);
}

#[test]
fn test_illustrative_series_aggregate() {
    let (values, timestamps) = illustrative_series();
    let rate = linear_regression_cagr(&values, &timestamps).unwrap();
    assert!((rate - 1.0076).abs() < 1e-3, "rate {}", rate);

    let again = linear_regression_cagr(&values, &timestamps).unwrap();
    assert_eq!(rate, again);
}

#[test]
fn test_partition_membership_in_seconds() {
    let series: Vec<Observation> = [0, 1, 2, 3, 4, 8]
        .iter()
        .map(|s| Observation::from_millis(s * 1000, 100.0).unwrap())
        .collect();

    let windows = partition(&series, 3000.0, 1500.0).unwrap();
    let members: Vec<Vec<usize>> = windows.iter().map(|w| w.indices().to_vec()).collect();
    assert_eq!(
        members,
        vec![vec![0, 1, 2], vec![2, 3, 4], vec![3, 4], vec![], vec![5], vec![5]]
    );
    assert!(windows[3].is_empty());
}

#[test]
fn test_single_observation_is_nan() {
    let rate = linear_regression_cagr(&[1.0], &[date("2024-01-01")]).unwrap();
    assert!(rate.is_nan());
}

#[test]
fn test_mismatched_lengths_fail() {
    let err = linear_regression_cagr(&[], &[date("2024-01-01")]).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::LengthMismatch {
            left: 0,
            right: 1,
            ..
        }
    ));
    assert!(err.to_string().contains("Mismatched lengths"));
}

#[test]
fn test_estimator_matches_free_function() {
    let (values, timestamps) = illustrative_series();
    let estimator = GrowthEstimator::default();
    assert_eq!(
        estimator.estimate(&values, &timestamps).unwrap(),
        linear_regression_cagr(&values, &timestamps).unwrap()
    );
}

#[test]
fn test_calculator_reports_robust_cagr() {
    let (values, timestamps) = illustrative_series();
    let series: Vec<Observation> = values
        .iter()
        .zip(&timestamps)
        .map(|(&v, &t)| Observation::new(t, v))
        .collect();

    let metrics = MetricsCalculator::default().calculate(&series).unwrap();
    assert!((metrics.robust_cagr - 1.0076).abs() < 1e-3);
    assert!((metrics.total_return - 2.3).abs() < 1e-12);
    assert_eq!(metrics.max_drawdown, 0.0);
    assert!(metrics.calmar_ratio.is_nan());
}

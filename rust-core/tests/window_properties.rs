use chrono::{Duration, NaiveDate};
use outlier_core::{OutlierDetector, OutlierError, PriceRecord, WindowSampler};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn records(days: &[i64], prices: &[f64]) -> Vec<PriceRecord> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    days.iter()
        .zip(prices)
        .map(|(&d, &price)| PriceRecord {
            stock_id: "PROP".to_string(),
            timestamp: base + Duration::days(d),
            price,
        })
        .collect()
}

proptest! {
    #[test]
    fn window_has_exact_size_and_order(
        rows in prop::collection::vec((0i64..3650, 1.0f64..1000.0), 30..120),
        seed in any::<u64>(),
    ) {
        let (days, prices): (Vec<i64>, Vec<f64>) = rows.into_iter().unzip();
        let total = days.len();
        let sampler = WindowSampler::default();
        let window = sampler
            .sample_records(records(&days, &prices), &mut StdRng::seed_from_u64(seed))
            .unwrap();

        prop_assert_eq!(window.len(), 30);
        prop_assert!(window.start_index() <= total - 30);
        prop_assert!(window
            .records()
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn short_sets_are_rejected(len in 0usize..30) {
        let days: Vec<i64> = (0..len as i64).collect();
        let prices = vec![1.0; len];
        let err = WindowSampler::default()
            .sample_records(records(&days, &prices), &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        let is_insufficient = matches!(
            err,
            OutlierError::InsufficientData { required: 30, got } if got == len
        );
        prop_assert!(is_insufficient);
    }

    #[test]
    fn rows_satisfy_derivation(prices in prop::collection::vec(1.0f64..500.0, 30)) {
        let days: Vec<i64> = (0..30).collect();
        let window = WindowSampler::default()
            .sample_records(records(&days, &prices), &mut StdRng::seed_from_u64(1))
            .unwrap();
        let detector = OutlierDetector::default();
        let stats = detector.stats(&window);
        let table = detector.detect(&window).unwrap();

        for row in table.rows() {
            prop_assert!((row.mean - stats.mean).abs() < 1e-9);
            prop_assert!((row.deviation - (row.price - row.mean)).abs() < 1e-9);
            prop_assert!(
                (row.percent_deviation - 100.0 * row.deviation / row.mean).abs() < 1e-9
            );
            prop_assert!(row.deviation.abs() >= stats.threshold - 1e-9);
        }
        prop_assert_eq!(table, detector.detect(&window).unwrap());
    }
}

//! Property tests for the rolling window and chart projection

use proptest::prelude::*;
use serverlab::chart::{render_svg, ChartFrame};
use serverlab::dashboard::types::LoadTestSample;
use serverlab::dashboard::window::RollingWindow;
use serverlab::gateway::{LoadTestResult, ServerVariant};

fn variant_strategy() -> impl Strategy<Value = ServerVariant> {
    prop_oneof![
        Just(ServerVariant::SingleThreaded),
        Just(ServerVariant::MultiThreaded),
        Just(ServerVariant::ThreadPool),
    ]
}

fn sample_strategy() -> impl Strategy<Value = LoadTestSample> {
    (variant_strategy(), 0.0f64..5_000.0, 0.0f64..50_000.0, 0u32..86_400).prop_map(
        |(variant, avg, rps, secs)| {
            let result = LoadTestResult {
                total_requests: 100,
                total_time: avg * 100.0,
                average_time: avg,
                requests_per_second: rps,
                success_rate: 100.0,
            };
            let timestamp = format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60);
            LoadTestSample::with_timestamp(variant, &result, timestamp)
        },
    )
}

proptest! {
    #[test]
    fn window_keeps_last_ten_in_order(samples in prop::collection::vec(sample_strategy(), 0..40)) {
        let mut window = RollingWindow::new();
        for sample in &samples {
            window.push(sample.clone());
        }

        let start = samples.len().saturating_sub(10);
        prop_assert_eq!(window.snapshot(), samples[start..].to_vec());
    }

    #[test]
    fn frame_series_are_parallel(samples in prop::collection::vec(sample_strategy(), 0..10)) {
        let frame = ChartFrame::from_samples(&samples);

        prop_assert_eq!(frame.labels.len(), samples.len());
        prop_assert_eq!(frame.response_time.values.len(), samples.len());
        prop_assert_eq!(frame.throughput.values.len(), samples.len());
        for (i, sample) in samples.iter().enumerate() {
            prop_assert_eq!(&frame.labels[i], &sample.label());
            prop_assert_eq!(frame.response_time.values[i], sample.average_time_ms);
            prop_assert_eq!(frame.throughput.values[i], sample.requests_per_second);
        }
    }

    #[test]
    fn axes_cover_their_series(samples in prop::collection::vec(sample_strategy(), 1..10)) {
        let frame = ChartFrame::from_samples(&samples);

        for value in &frame.response_time.values {
            prop_assert!(*value <= frame.left_axis.max);
        }
        for value in &frame.throughput.values {
            prop_assert!(*value <= frame.right_axis.max);
        }
    }

    #[test]
    fn rendering_is_idempotent(samples in prop::collection::vec(sample_strategy(), 0..10)) {
        let first = ChartFrame::from_samples(&samples);
        let second = ChartFrame::from_samples(&samples);
        prop_assert_eq!(&first, &second);

        let svg_a = render_svg(&first, 900, 420).unwrap();
        let svg_b = render_svg(&second, 900, 420).unwrap();
        prop_assert_eq!(svg_a, svg_b);
    }
}

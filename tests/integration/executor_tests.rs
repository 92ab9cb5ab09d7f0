//! Executor property tests
//!
//! These exercise the contracts shared by both executors: one outcome per
//! item in input order, bounded concurrency, monotonic progress, and
//! barrier behavior in the chunked-wave strategy.

use docflow_rs::{
    BatchConfig, BatchHooks, ItemOutcome, SlidingWindowExecutor, WaveExecutor,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Instrument an op to record the concurrent-call high-water-mark
fn instrumented_op(
    current: Arc<AtomicU32>,
    high_water: Arc<AtomicU32>,
    delay: Duration,
) -> impl Fn(u32, usize) -> std::pin::Pin<Box<dyn Future<Output = Result<u32, String>>>> + Clone {
    move |n, _| {
        let current = current.clone();
        let high_water = high_water.clone();
        Box::pin(async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            current.fetch_sub(1, Ordering::SeqCst);
            Ok(n)
        })
    }
}

#[tokio::test]
async fn wave_and_window_preserve_length_and_index() {
    let items: Vec<u32> = (0..25).collect();

    let wave = WaveExecutor::new(BatchConfig::new().with_chunk_size(4)).unwrap();
    let wave_outcomes = wave
        .run(items.clone(), |n, _| async move { Ok::<_, String>(n) })
        .await;

    let window = SlidingWindowExecutor::new(4).unwrap();
    let window_outcomes = window
        .run(items.clone(), |n, _| async move { Ok::<_, String>(n) })
        .await;

    for outcomes in [wave_outcomes, window_outcomes] {
        assert_eq!(outcomes.len(), items.len());
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert!(outcome.is_success());
        }
    }
}

#[tokio::test]
async fn always_successful_op_never_retries() {
    let executor = WaveExecutor::new(
        BatchConfig::new()
            .with_chunk_size(3)
            .with_max_retries(5)
            .with_retry_delay(Duration::from_secs(10)),
    )
    .unwrap();

    let start = std::time::Instant::now();
    let outcomes = executor
        .run((0..9u32).collect(), |n, _| async move {
            Ok::<_, String>(n)
        })
        .await;

    assert!(outcomes.iter().all(|o| o.attempts == 1));
    // the 10s retry delay must never have been incurred
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn wave_concurrency_bounded_by_chunk_size() {
    let current = Arc::new(AtomicU32::new(0));
    let high_water = Arc::new(AtomicU32::new(0));

    let executor = WaveExecutor::new(BatchConfig::new().with_chunk_size(2)).unwrap();
    let outcomes = executor
        .run(
            (0..10u32).collect(),
            instrumented_op(current, high_water.clone(), Duration::from_millis(5)),
        )
        .await;

    assert_eq!(outcomes.len(), 10);
    assert!(high_water.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn window_concurrency_bounded_by_limit() {
    let current = Arc::new(AtomicU32::new(0));
    let high_water = Arc::new(AtomicU32::new(0));

    let executor = SlidingWindowExecutor::new(5).unwrap();
    let outcomes = executor
        .run(
            (0..30u32).collect(),
            instrumented_op(current, high_water.clone(), Duration::from_millis(3)),
        )
        .await;

    assert_eq!(outcomes.len(), 30);
    let observed = high_water.load(Ordering::SeqCst);
    assert!(observed <= 5, "high water mark {observed} exceeds limit 5");
}

#[tokio::test]
async fn wave_five_items_chunk_two_runs_three_waves() {
    // 5 items with chunk size 2 -> waves sized [2, 2, 1], all successful,
    // progress ticking 1..=5 in order.
    let sizes_at_start = Arc::new(Mutex::new(Vec::new()));
    let in_wave = Arc::new(AtomicU32::new(0));
    let progress = Arc::new(Mutex::new(Vec::new()));

    let hooks = {
        let progress = progress.clone();
        BatchHooks::new().with_progress(move |done, total| {
            progress.lock().unwrap().push((done, total));
        })
    };

    let executor = WaveExecutor::new(BatchConfig::new().with_chunk_size(2)).unwrap();
    let outcomes = executor
        .run_with_hooks(
            (0..5u32).collect(),
            {
                let sizes_at_start = sizes_at_start.clone();
                let in_wave = in_wave.clone();
                move |n, index| {
                    let sizes_at_start = sizes_at_start.clone();
                    let in_wave = in_wave.clone();
                    async move {
                        let size = in_wave.fetch_add(1, Ordering::SeqCst) + 1;
                        sizes_at_start.lock().unwrap().push((index, size));
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        in_wave.fetch_sub(1, Ordering::SeqCst);
                        Ok::<_, String>(n)
                    }
                }
            },
            hooks,
        )
        .await;

    assert_eq!(outcomes.len(), 5);
    assert!(outcomes.iter().all(ItemOutcome::is_success));

    let ticks = progress.lock().unwrap().clone();
    assert_eq!(ticks, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);

    // Peak wave membership: 2 for the first two waves, 1 for the last.
    let sizes = sizes_at_start.lock().unwrap().clone();
    let peak = |indexes: &[usize]| {
        sizes
            .iter()
            .filter(|(i, _)| indexes.contains(i))
            .map(|(_, size)| *size)
            .max()
            .unwrap()
    };
    assert_eq!(peak(&[0, 1]), 2);
    assert_eq!(peak(&[2, 3]), 2);
    assert_eq!(peak(&[4]), 1);
}

#[tokio::test]
async fn failed_item_recovers_on_third_attempt() {
    let calls = Arc::new(AtomicU32::new(0));
    let settled_attempts = Arc::new(AtomicU32::new(0));

    let hooks = {
        let settled_attempts = settled_attempts.clone();
        BatchHooks::new().with_item_callback(move |outcome: &ItemOutcome<u32, u32>| {
            settled_attempts.store(outcome.attempts, Ordering::SeqCst);
        })
    };

    let executor = WaveExecutor::new(
        BatchConfig::new()
            .with_chunk_size(1)
            .with_max_retries(3)
            .with_retry_delay(Duration::from_millis(1)),
    )
    .unwrap();

    let outcomes = executor
        .run_with_hooks(
            vec![7u32],
            {
                let calls = calls.clone();
                move |n, _| {
                    let calls = calls.clone();
                    async move {
                        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                            Err("transient outage".to_string())
                        } else {
                            Ok(n)
                        }
                    }
                }
            },
            hooks,
        )
        .await;

    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[0].attempts, 3);
    // the completion callback saw the settled outcome exactly once, after
    // the third attempt
    assert_eq!(settled_attempts.load(Ordering::SeqCst), 3);
}

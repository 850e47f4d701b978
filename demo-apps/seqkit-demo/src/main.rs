use anyhow::{ensure, Context, Result};
use seqkit_collections::{
    BiMap, ConcurrentHashSet, EnumKey, EnumMap, ExpiringMap, ExpiringMapConfig, Stamped, TwoWayMap,
};
use seqkit_core::{
    DisposeScope, ExtremaExt, FloatExtremaExt, MapExt, PresentExtremaExt, SequenceExt, ZipExt,
};
use seqkit_tasks::{
    for_each_async, parallel_map_async, safe_parallel_for_each_async,
    safe_parallel_map_async_with_options, CancellationToken, FanOutOptions, TaskError,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seqkit_demo=info,seqkit_tasks=info,seqkit_collections=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration from environment variables
    let ttl_ms: u64 = std::env::var("SEQKIT_DEMO_TTL_MS")
        .unwrap_or_else(|_| "200".to_string())
        .parse()
        .unwrap_or(200);
    let options = FanOutOptions::from_env();

    tracing::info!("Seqkit walkthrough");
    tracing::info!("   Expiring map lifetime: {}ms", ttl_ms);
    tracing::info!(
        "   Fan-out limit: {}",
        options
            .max_concurrency
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    demo_sequences()?;
    demo_extrema()?;
    demo_scopes()?;
    demo_dictionaries()?;
    demo_expiring_map(Duration::from_millis(ttl_ms)).await?;
    demo_concurrent_set().await?;
    demo_fan_out(&options).await?;

    tracing::info!("All scenarios passed");
    Ok(())
}

/// Sequence accessors and zip helpers
fn demo_sequences() -> Result<()> {
    tracing::info!("Scenario: sequences");

    let words = ["pear", "apple", "plum", "avocado", "peach"];

    let first_a = words.iter().copied().first_where_or(|w| w.starts_with('a'), "none");
    ensure!(first_a == "apple", "unexpected first match {}", first_a);

    let only_plum = words
        .iter()
        .copied()
        .single_where_or(|w| w.len() == 4 && w.ends_with('m'), "none")
        .context("plum should match once")?;
    ensure!(only_plum == "plum");

    let cardinality = words.iter().single();
    ensure!(
        cardinality.as_ref().is_err_and(|e| e.is_cardinality()),
        "single over five words must fail"
    );

    let by_initial: Vec<_> = words.iter().copied().distinct_by(|w| w.as_bytes()[0]).collect();
    ensure!(by_initial == ["pear", "apple"]);

    let middle: Vec<_> = words.iter().copied().slice(1, 3).collect();
    ensure!(middle == ["apple", "plum", "avocado"]);

    let prices = [("pear", 3), ("plum", 2), ("peach", 5)];
    let ordered = prices
        .iter()
        .copied()
        .order_by_sequence(["peach", "pear"], |(name, _)| *name);
    ensure!(ordered == [("peach", 5), ("pear", 3)]);

    let totals: Vec<_> = [1, 2, 3].into_iter().zip_with([10, 20, 30], |a, b| a + b).collect();
    ensure!(totals == [11, 22, 33]);

    let padded: Vec<_> = [1, 2, 3].into_iter().zip_or_default([7]).collect();
    ensure!(padded == [(1, 7), (2, 0), (3, 0)]);

    let mismatch = [1, 2].into_iter().zip_strict([1]);
    ensure!(mismatch.is_err(), "zip_strict must reject unequal lengths");

    tracing::info!(first_a, only_plum, "Sequence accessors ok");
    Ok(())
}

/// Min/max family, including the NaN rules
fn demo_extrema() -> Result<()> {
    tracing::info!("Scenario: extrema");

    let temps = [14, -3, 22, 8, -3];
    let bounds = temps.iter().copied().min_max()?;
    ensure!(bounds.into_tuple() == (-3, 22));

    let hottest = [("lisbon", 22), ("oslo", 8), ("porto", 22)]
        .into_iter()
        .max_by_key_first(|(_, t)| *t)?;
    ensure!(hottest.0 == "lisbon", "ties resolve to the first element");

    let empty = Vec::<i32>::new().into_iter().min_value();
    ensure!(empty.is_err_and(|e| e.is_no_elements()));

    let readings = [None, Some(4), None, Some(1)];
    ensure!(readings.iter().copied().min_present() == Some(1));
    ensure!([None::<i32>, None].into_iter().max_present().is_none());

    let leading_nan = [f64::NAN, 5.0].into_iter().float_min_max()?;
    let trailing_nan = [5.0, f64::NAN].into_iter().float_min_max()?;
    ensure!(leading_nan.min_value.is_nan() && trailing_nan.max_value.is_nan());

    tracing::info!(min = bounds.min_value, max = bounds.max_value, "Extrema ok");
    Ok(())
}

/// Disposal in reverse registration order
fn demo_scopes() -> Result<()> {
    tracing::info!("Scenario: dispose scope");

    let log = RefCell::new(Vec::new());
    {
        let mut scope = DisposeScope::new();
        scope.defer(|| log.borrow_mut().push("connection"));
        scope.defer(|| log.borrow_mut().push("transaction"));
        ensure!(scope.len() == 2);
    }

    let order = log.into_inner();
    ensure!(order == ["transaction", "connection"], "got {:?}", order);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Email,
    Sms,
    Push,
}

impl EnumKey for Channel {
    const VARIANTS: &'static [Self] = &[Channel::Email, Channel::Sms, Channel::Push];

    fn index(self) -> usize {
        self as usize
    }
}

/// MapExt, TwoWayMap, BiMap and EnumMap
fn demo_dictionaries() -> Result<()> {
    tracing::info!("Scenario: dictionaries");

    let mut stock: HashMap<&str, u32> = HashMap::new();
    stock.try_add("bolts", 10)?;
    ensure!(stock.try_add("bolts", 99).is_err());
    stock.add_or_update("bolts", 0, |n| *n += 5);
    ensure!(stock.value_or(&"bolts", 0) == 15);
    ensure!(stock.value_or(&"nuts", 0) == 0);

    let mut dial_codes = TwoWayMap::new();
    dial_codes.add("PT", 351)?;
    dial_codes.add("GB", 44)?;
    ensure!(dial_codes.add("IM", 44).is_err(), "value 44 is already claimed");
    ensure!(dial_codes.get_by_value(&351) == Some(&"PT"));

    let mut desks = BiMap::new();
    desks.insert("ann", 1);
    desks.insert("bob", 2);
    let evicted = desks.insert("ann", 2);
    ensure!(evicted.did_overwrite());
    ensure!(desks.get_by_right(&2) == Some(&"ann") && desks.len() == 1);

    let mut sent: EnumMap<Channel, u32> = EnumMap::default();
    sent[Channel::Email] += 3;
    sent[Channel::Push] += 1;
    ensure!(sent.values().sum::<u32>() == 4);

    tracing::info!(?sent, "Dictionaries ok");
    Ok(())
}

/// Entries vanish once they outlive the lifetime
async fn demo_expiring_map(lifetime: Duration) -> Result<()> {
    tracing::info!("Scenario: expiring map");

    let config = ExpiringMapConfig::new()
        .with_lifetime(lifetime)
        .with_initial_capacity(16);
    let sessions = ExpiringMap::with_config(config)?;

    sessions.insert("alice".to_string(), Stamped::new(1u32));
    ensure!(!sessions.try_insert("alice".to_string(), Stamped::new(2)));

    // Already past the lifetime when it is stored
    let stale = Instant::now()
        .checked_sub(lifetime * 2)
        .context("clock too close to its origin")?;
    sessions.insert("bob".to_string(), Stamped::with_created_at(2, stale));
    ensure!(!sessions.contains_key("bob"), "stale entry must be hidden");
    ensure!(sessions.len() == 1);

    tokio::time::sleep(lifetime + Duration::from_millis(50)).await;
    ensure!(sessions.get("alice").is_none(), "alice should have expired");
    ensure!(sessions.is_empty());

    tracing::info!("Expiring map ok");
    Ok(())
}

/// Concurrent inserts from many tasks
async fn demo_concurrent_set() -> Result<()> {
    tracing::info!("Scenario: concurrent set");

    let seen = Arc::new(ConcurrentHashSet::new());
    let mut handles = Vec::new();
    for worker in 0..8u32 {
        let seen = Arc::clone(&seen);
        handles.push(tokio::spawn(async move {
            for i in 0..100u32 {
                seen.insert(i % 50 + worker % 2 * 1000);
            }
        }));
    }
    for handle in handles {
        handle.await?;
    }

    ensure!(seen.len() == 100, "expected 100 distinct values, got {}", seen.len());
    tracing::info!(distinct = seen.len(), "Concurrent set ok");
    Ok(())
}

/// Sequential, parallel and failure-aggregating for-each
async fn demo_fan_out(options: &FanOutOptions) -> Result<()> {
    tracing::info!("Scenario: fan-out");

    let token = CancellationToken::new();

    let mut visited = Vec::new();
    for_each_async(["a", "b", "c"], |s| {
        visited.push(s);
        async { Ok::<(), anyhow::Error>(()) }
    })
    .await?;
    ensure!(visited == ["a", "b", "c"]);

    let squares = parallel_map_async(1..=5u64, &token, |n| async move {
        tokio::time::sleep(Duration::from_millis(10 * (5 - n))).await;
        Ok::<_, String>(n * n)
    })
    .await
    .map_err(|e| anyhow::anyhow!("parallel map failed: {}", e))?;
    ensure!(squares == [1, 4, 9, 16, 25], "results must keep input order");

    let outcomes = safe_parallel_for_each_async(0..4, &token, |n| async move {
        if n == 2 {
            Err(format!("item {} rejected", n))
        } else {
            Ok(())
        }
    })
    .await;
    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    ensure!(outcomes.len() == 4 && failed == 1);

    // The first item to run cancels; anything not yet started is skipped
    let outcomes = safe_parallel_map_async_with_options(0..6, &token, options, |n, token| async move {
        token.cancel();
        Ok::<_, String>(n)
    })
    .await;
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, Err(TaskError::Cancelled)))
        .count();
    ensure!(outcomes.len() == 6 && token.is_cancelled());

    tracing::info!(failed, skipped, "Fan-out ok");
    Ok(())
}

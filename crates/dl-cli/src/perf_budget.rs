use std::time::Instant;

use dl_core::{builtin_registry, resolve_url, subscriptions};

pub struct PerfBudgetOptions {
    pub iterations: usize,
}

const BUDGET_COLD_START_MS: f64 = 50.0;
const BUDGET_RESOLVE_P99_US: f64 = 100.0;

const SAMPLE_URLS: &[&str] = &[
    "https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.com%2Farticle&h=AT0abc",
    "https://www.google.com/imgres?imgrefurl=https://example.com/gallery",
    "https://wow.curseforge.com/linkout?remoteUrl=http%253a%252f%252fi.imgur.com%252f1AjSgEH.png",
    "https://outgoing.prod.mozaws.net/v1/08aa30/https%3A%2F%2Fdeveloper.mozilla.org%2Fen-US",
    "https://www.google.com/search?q=redirect",
    "https://unknownsite.example/foo?url=https://example.com",
];

pub fn run_perf_budget(opts: PerfBudgetOptions) -> Result<(), String> {
    println!("Performance Budget Check");
    println!("==================================================");

    println!("Building registry...");
    let cold_start_begin = Instant::now();
    let registry = builtin_registry();
    let subscription_count = subscriptions().len();
    let cold_start_ms = cold_start_begin.elapsed().as_secs_f64() * 1000.0;
    println!(
        "  {} sites, {} subscriptions",
        registry.sites().len(),
        subscription_count
    );

    println!("Warming up...");
    for _ in 0..1000 {
        let _ = resolve_url(SAMPLE_URLS[0]);
    }

    println!("Measuring resolve latency...");
    let latencies = measure_resolve_latency(opts.iterations)?;
    let p50_us = percentile(&latencies, 0.50);
    let p99_us = percentile(&latencies, 0.99);

    let mut passed = true;
    println!();
    println!("Results");
    println!("--------------------------------------------------");

    passed &= report_budget("Cold Start", cold_start_ms, BUDGET_COLD_START_MS, "ms");
    passed &= report_budget("Resolve P99 Latency", p99_us, BUDGET_RESOLVE_P99_US, "μs");
    println!("  Resolve P50 Latency: {:.2} μs ({} samples)", p50_us, latencies.len());

    println!();
    println!("==================================================");

    if passed {
        println!("✓ All performance budgets passed");
        Ok(())
    } else {
        Err("Performance budget exceeded".to_string())
    }
}

fn report_budget(name: &str, actual: f64, limit: f64, unit: &str) -> bool {
    let passed = actual <= limit;
    let status = if passed { "✓" } else { "✗" };
    println!(
        "{} {}: {:.2} {} (limit: {:.2} {})",
        status, name, actual, unit, limit, unit
    );
    passed
}

fn measure_resolve_latency(iterations: usize) -> Result<Vec<f64>, String> {
    let mut latencies = Vec::with_capacity(iterations * SAMPLE_URLS.len());

    for _ in 0..iterations {
        for url in SAMPLE_URLS {
            let start = Instant::now();
            resolve_url(url).map_err(|e| format!("Sample URL failed: {}", e))?;
            latencies.push(start.elapsed().as_secs_f64() * 1_000_000.0);
        }
    }

    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(latencies)
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

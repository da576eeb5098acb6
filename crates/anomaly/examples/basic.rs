//! Basic example demonstrating streaming anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{generate, GeneratorConfig, Monitor, RollingZScoreDetector, TextSink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Examples ===\n");

    // 1. Feeding a detector by hand
    println!("1. Rolling Z-score detector (window=5, threshold=2.0)");
    let mut detector = RollingZScoreDetector::new(5, 2.0)?;
    for value in [1.0, 2.0, 3.0, 4.0, 5.0, 50.0, 5.0, 5.0, 5.0, -60.0] {
        let is_anomaly = detector.update(value)?;
        println!(
            "   value={:>6.1}  anomaly={:<5}  mean={:.3}  std={:.3}",
            value,
            is_anomaly,
            detector.mean(),
            detector.std_dev()
        );
    }

    // 2. Invalid input is rejected without touching the window
    println!("\n2. Invalid input");
    match detector.update(f64::NAN) {
        Ok(_) => println!("   unexpected verdict"),
        Err(e) => println!("   rejected: {}", e),
    }

    // 3. Monitoring a synthetic stream
    println!("\n3. Synthetic stream (500 steps, seed 7)");
    let stream = generate(&GeneratorConfig::default().with_seed(7))?;
    let mut monitor = Monitor::new(RollingZScoreDetector::new(50, 3.0)?);
    let mut sink = TextSink::new(std::io::stdout().lock()).anomalies_only(true);
    let summary = monitor.run_values(stream, &mut sink)?;

    println!("\nSummary:");
    println!("   Points:    {}", summary.total);
    println!("   Anomalies: {:?}", summary.anomaly_indices());

    println!("\n=== Examples Complete ===");
    Ok(())
}

use anyhow::Result;

use schedule_stitch::{run_comparison, ApiClient, Config};

#[tokio::main]
async fn main() {
    println!("🏗️  Schedule Query Comparison - deep $expand vs client-side stitching");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Check required configuration before any request is attempted
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        eprintln!("❌ Comparison run failed: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url, &config.api_key)?;

    println!("\n📡 Querying {} ...", config.api_base_url);
    println!(
        "   {} lots, {} financial communities, vendor {}\n",
        config.params.lot_ids.len(),
        config.params.financial_community_ids.len(),
        config.params.vendor_id
    );

    let report = run_comparison(&client, &config.params).await?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Original query elapsed time = {} ms",
        report.original.elapsed.as_millis()
    );
    println!(
        "New query elapsed time = {} ms",
        report.stitched.elapsed.as_millis()
    );

    if report.equivalence.is_equivalent() {
        println!("✓ Equivalence: {}", report.equivalence.summary());
    } else {
        println!("⚠️  Equivalence: {}", report.equivalence.summary());
    }
    if report.assembly.is_clean() {
        println!("✓ Assembly: all foreign keys resolved");
    } else {
        println!("⚠️  Assembly: {}", report.assembly.summary());
    }
    println!("   Compared at {}", report.compared_at.to_rfc3339());

    if config.dump {
        println!("\n📋 Stitched result set:");
        println!("{}", serde_json::to_string_pretty(&report.stitched_tasks)?);
    }

    Ok(())
}

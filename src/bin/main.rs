use campus_compass::{
    chat::CHAT_DISCLAIMER,
    money::format_usd,
    pipeline::AdvisorySource,
    AppConfig, BudgetAdvisor, FinancialProfile, HttpAdvisoryClient, MaritalStatus,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let client = HttpAdvisoryClient::from_config(&config)?;
    let advisor = BudgetAdvisor::new(Arc::new(client));

    info!("Campus Compass budget report starting");

    // Create a sample profile
    let profile = FinancialProfile {
        employed: true,
        marital_status: MaritalStatus::Single,
        gross_monthly_income: dec!(1750),
        net_monthly_income: None,
        monthly_expenses: dec!(1200),
        total_debt: dec!(3500),
        total_savings: dec!(40),
        goal_text: "Build a $1,000 emergency fund before spring semester".to_string(),
    };

    let report = advisor.analyze(&profile).await;
    let snapshot = &report.snapshot;

    println!("\n=== Budget Report ===");
    println!("Gross income:   {}", format_usd(profile.gross_monthly_income));
    println!("Take-home pay:  {}", format_usd(snapshot.effective_net_income));

    if let Some(tax) = &snapshot.tax {
        println!("\nEstimated taxes ({}% effective)", tax.effective_rate);
        println!("  Federal: {}", format_usd(tax.federal));
        println!("  FICA:    {}", format_usd(tax.fica));
        println!("  State:   {}", format_usd(tax.state));
        println!("  Local:   {}", format_usd(tax.local));
        println!("  Total:   {}", format_usd(tax.total_tax));
    }

    println!("\nWhere your money goes");
    for segment in snapshot.chart.segments() {
        println!("  {:<10} {}", segment.label, format_usd(segment.value));
    }

    if let (Some(score), Some(level)) = (snapshot.stress_score, snapshot.stress_level) {
        println!("\nFinancial stress: {}/100 ({})", score.value(), level);
    }

    if snapshot.assistance.eligible {
        println!("\nYou may qualify for campus support:");
        for resource in &snapshot.assistance.resources {
            println!("  {} - {}", resource.name, resource.url);
        }
    }

    let advisory = &report.advisory;
    if advisory.source == AdvisorySource::Fallback {
        println!("\n(Advisory service unavailable, showing general guidance)");
    }
    println!("\nSummary: {}", advisory.result.summary);
    for (i, tip) in advisory.result.tips.iter().enumerate() {
        println!("  {}. {}", i + 1, tip);
    }
    if !advisory.result.disclaimer.is_empty() {
        println!("\n{}", advisory.result.disclaimer);
    }
    println!("{}", CHAT_DISCLAIMER);

    Ok(())
}

//! Scenarios command - prints the static RAG tables

use crate::domain::{rag_use_cases, real_world_scenarios};

/// Print the scenario and use-case tables
pub async fn run() -> anyhow::Result<()> {
    super::bootstrap()?;

    print_scenarios();
    print_use_cases();

    Ok(())
}

pub fn print_scenarios() {
    println!("\n{}", "=".repeat(60));
    println!("🌍 Real-World RAG Scenarios");
    println!("{}", "=".repeat(60));

    for scenario in real_world_scenarios() {
        println!("\n🎯 {}:", scenario.name);
        println!("   Problem: {}", scenario.problem);
        println!("   Solution: {}", scenario.solution);
        println!("   Benefit: {}", scenario.benefit);
    }
}

pub fn print_use_cases() {
    println!("\n{}", "=".repeat(60));
    println!("✅ When to Use RAG");
    println!("{}", "=".repeat(60));

    for use_case in rag_use_cases() {
        println!("📋 {}: {}", use_case.name, use_case.description);
    }
}

use ofx_memo_filter::{ExclusionPatterns, FilterBuilder, StatementFilter};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("demos/sample.ofx");

    println!("Filtering OFX file: {}\n", path);
    println!("Usage: cargo run --example filter_statement [path/to/file.ofx]\n");

    println!("Example 1: Built-in exclusion patterns");
    let outcome = FilterBuilder::new().filename(path).filter()?;

    println!("Found {} transactions", outcome.block_count());
    for summary in &outcome.excluded {
        println!(
            "  excluded | {} | {} | {}",
            summary.posted.map(|d| d.to_string()).unwrap_or_else(|| "N/A".to_string()),
            summary.amount.map(|a| a.to_string()).unwrap_or_else(|| "N/A".to_string()),
            summary.memo
        );
    }
    for memo in outcome.kept_memos() {
        println!("  kept     | {}", memo);
    }

    println!("\nExample 2: Custom pattern set");
    let statement_filter = StatementFilter::new(ExclusionPatterns::new(["TARIFA"]));
    let outcome = FilterBuilder::new()
        .filename(path)
        .filter_with(&statement_filter)?;

    println!("Excluded: {:?}", outcome.excluded_memos());

    let (filtered, _, _) = outcome.into_parts();
    println!("\nFiltered statement is {} bytes", filtered.len());

    Ok(())
}

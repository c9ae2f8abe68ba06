// src/output.rs
// =============================================================================
// Hands the finished AggregationResult to the user.
//
// - stdout or --output file gets the document (or its JSON form)
// - stderr gets a short human summary, so piping stdout stays clean
// =============================================================================

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::stitch::AggregationResult;

// The text that goes to stdout / the output file
pub fn render(result: &AggregationResult, json: bool) -> Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(result)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(result.document.clone())
    }
}

pub fn write_result(result: &AggregationResult, json: bool, output: Option<&Path>) -> Result<()> {
    let text = render(result, json)?;
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn print_summary(result: &AggregationResult, references: usize, output: Option<&Path>) {
    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   📋 References: {}", references);
    eprintln!("   📄 Document size: {} bytes", result.document.len());
    if let Some(path) = output {
        eprintln!("   💾 Written to: {}", path.display());
    }
    if result.cancelled {
        eprintln!("   ⏹️  Cancelled before finishing");
    }
    if result.had_errors {
        eprintln!("   ❌ Some references failed (see inline errors)");
    } else {
        eprintln!("   ✅ No errors");
    }
}

//! Rendering of scrape records for the command line

use std::fmt;

use serde_json::json;

use crate::domain::ScrapeRecord;

const RULE_WIDTH: usize = 60;

/// Banner-style view of a record for terminals
pub struct Report<'a>(pub &'a ScrapeRecord);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "🛒 WEB SCRAPING RESULT")?;
        writeln!(f, "{rule}")?;

        if record.success {
            writeln!(f, "✅ SUCCESS - product information extracted")?;
            writeln!(f, "🌐 Site: {}", record.site)?;
            writeln!(f, "🔗 URL: {}", record.url)?;
            writeln!(
                f,
                "📦 Product: {}",
                record.title.as_deref().unwrap_or("not found")
            )?;
            writeln!(f, "💰 Price: {}", format_price(record))?;
        } else {
            writeln!(f, "❌ ERROR - could not extract product information")?;
            writeln!(f, "🌐 Site: {}", record.site)?;
            writeln!(f, "🔗 URL: {}", record.url)?;
            writeln!(f, "⚠️  Error: {}", record.error.as_deref().unwrap_or_default())?;
        }

        writeln!(f, "{rule}")
    }
}

/// Human-readable report for a record
pub fn render_report(record: &ScrapeRecord) -> String {
    Report(record).to_string()
}

/// Price with the currency symbol in front and the code after.
///
/// The symbol is not repeated when the cleaned price already starts with it.
fn format_price(record: &ScrapeRecord) -> String {
    let Some(price) = record.price.as_deref() else {
        return "not found".to_string();
    };

    match record.currency {
        Some(currency) if price.starts_with(currency.symbol()) => {
            format!("{price} {}", currency.code())
        }
        Some(currency) => format!("{}{price} {}", currency.symbol(), currency.code()),
        None => price.to_string(),
    }
}

/// Pretty-printed JSON with the eight record keys.
///
/// A record that cannot be converted still yields a complete failed record.
pub fn render_json(record: &ScrapeRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|e| {
        let fallback = json!({
            "success": false,
            "url": record.url,
            "title": null,
            "price": null,
            "currency": null,
            "site": record.site,
            "error": format!("unexpected error: {e}"),
            "timestamp": record.timestamp,
        });
        format!("{fallback:#}")
    })
}

//! Human-readable output of each command.

use std::io::Write;

use chrono::SecondsFormat;
use engine::{Category, Charity, Donation, Stats};

const RULE_WIDTH: usize = 80;

pub fn registered(out: &mut impl Write, charity: &Charity) -> std::io::Result<()> {
    writeln!(out, "✓ Registered charity: {}", charity.name)?;
    writeln!(out, "  ID: {}", charity.id)?;
    writeln!(out, "  Category: {}", charity.category)?;
    writeln!(out, "  Goal: {}", charity.goal_usd)
}

pub fn donated(out: &mut impl Write, donation: &Donation) -> std::io::Result<()> {
    writeln!(out, "✓ Donation received!")?;
    writeln!(out, "  Amount: ${}", donation.amount_usd.to_fixed())?;
    writeln!(out, "  Receipt ID: {}", donation.id)
}

pub fn verified(out: &mut impl Write, charity: &Charity) -> std::io::Result<()> {
    writeln!(out, "✓ Charity {} verified", charity.id)
}

pub fn charity_list(
    out: &mut impl Write,
    charities: &[Charity],
    category: Option<Category>,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "💝 Charities ({} total)", charities.len())?;
    if let Some(category) = category {
        writeln!(out, "   Category: {category}")?;
    }
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

    for charity in charities {
        let mark = if charity.verified { "✓" } else { "○" };
        writeln!(out, "  {mark} {}", charity.name)?;
        writeln!(out, "     Category: {}", charity.category)?;
        writeln!(
            out,
            "     Raised: {} / {} ({:.1}%)",
            charity.raised_usd,
            charity.goal_usd,
            charity.progress_percent()
        )?;
        writeln!(out, "     ID: {}", charity.id)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn donation_list(
    out: &mut impl Write,
    charity: &Charity,
    donations: &[Donation],
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Donations to {} ({} total, {} raised)",
        charity.name,
        donations.len(),
        charity.raised_usd
    )?;
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

    for donation in donations {
        write!(
            out,
            "  {}  {:>12}  {}",
            donation.ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            donation.amount_usd.to_string(),
            donation.donor
        )?;
        if !donation.message.is_empty() {
            write!(out, "  \"{}\"", donation.message)?;
        }
        writeln!(out)?;
        writeln!(out, "     Receipt ID: {}", donation.id)?;
    }
    Ok(())
}

pub fn stats(out: &mut impl Write, stats: &Stats) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 Marketplace Statistics:")?;
    writeln!(out, "  Total Raised: {}", stats.total_raised)?;
    writeln!(out, "  Total Charities: {}", stats.total_charities)?;
    writeln!(out, "  Total Donations: {}", stats.total_donations)?;
    match &stats.top_charity {
        Some(top) => writeln!(out, "  Top Charity: {} ({})", top.name, top.raised_usd),
        None => writeln!(out, "  Top Charity: none"),
    }
}

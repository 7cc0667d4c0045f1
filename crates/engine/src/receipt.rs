//! Donation receipts.

use std::fmt;

use chrono::SecondsFormat;

use crate::Donation;

const RULE: &str = "════════════════════════════════════════";

/// A donation joined with the name of the charity it went to.
///
/// The `Display` impl renders the printable receipt.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub donation: Donation,
    pub charity_name: String,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = if self.donation.message.is_empty() {
            "N/A"
        } else {
            self.donation.message.as_str()
        };

        writeln!(f, "╔{RULE}╗")?;
        writeln!(f, "║{:^40}║", "DONATION RECEIPT")?;
        writeln!(f, "╚{RULE}╝")?;
        writeln!(f)?;
        writeln!(f, "Receipt ID: {}", self.donation.id)?;
        writeln!(f, "Donor: {}", self.donation.donor)?;
        writeln!(f, "Charity: {}", self.charity_name)?;
        writeln!(f, "Amount: ${}", self.donation.amount_usd.to_fixed())?;
        writeln!(
            f,
            "Date: {}",
            self.donation.ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f)?;
        writeln!(f, "Message: {message}")?;
        writeln!(f)?;
        writeln!(f, "Thank you for your generous donation!")?;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:^40}", "Tax ID: pending")?;
        write!(f, "{RULE}")
    }
}

use std::io::Write;

use clap::{Args, Subcommand};
use engine::{Category, CharitySort, Engine, EngineError, Money};
use uuid::Uuid;

use crate::{error::Result, render};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new charity.
    Register(RegisterArgs),
    /// Donate to a charity.
    Donate(DonateArgs),
    /// List charities.
    List(ListArgs),
    /// Show marketplace statistics.
    Stats(StatsArgs),
    /// Mark a charity as verified.
    Verify(VerifyArgs),
    /// Print the receipt of a donation.
    Receipt(ReceiptArgs),
    /// List the donations received by a charity.
    Donations(DonationsArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    pub name: String,
    /// One of: education, environment, health, housing, animals, arts.
    pub category: String,
    pub description: String,
    /// Fundraising goal in USD (e.g. `1000` or `1,000.50`).
    #[arg(allow_negative_numbers = true)]
    pub goal: String,
}

#[derive(Args, Debug)]
pub struct DonateArgs {
    pub charity_id: String,
    pub donor: String,
    /// Amount in USD, up to two decimals.
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
    #[arg(short, long)]
    pub message: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show charities of this category.
    #[arg(short, long)]
    pub category: Option<String>,
    /// `raised` (default) or `created`.
    #[arg(short, long, default_value = "raised")]
    pub sort: String,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the statistics as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    pub charity_id: String,
}

#[derive(Args, Debug)]
pub struct ReceiptArgs {
    pub donation_id: String,
}

#[derive(Args, Debug)]
pub struct DonationsArgs {
    pub charity_id: String,
}

/// Ids are opaque to users: anything that is not a UUID cannot name a record.
fn parse_id(raw: &str, kind: &str) -> std::result::Result<Uuid, EngineError> {
    Uuid::parse_str(raw.trim()).map_err(|_| EngineError::NotFound(format!("{kind} {raw}")))
}

pub async fn execute(engine: &Engine, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Register(args) => {
            let category: Category = args.category.parse()?;
            let goal: Money = args.goal.parse()?;
            let charity = engine
                .register_charity(&args.name, category, &args.description, goal)
                .await?;
            tracing::info!(charity_id = %charity.id, "registered charity");
            render::registered(out, &charity)?;
        }
        Command::Donate(args) => {
            let charity_id = parse_id(&args.charity_id, "charity")?;
            let amount: Money = args.amount.parse()?;
            let donation = engine
                .donate(charity_id, &args.donor, amount, args.message.as_deref())
                .await?;
            tracing::info!(
                donation_id = %donation.id,
                %charity_id,
                amount = %donation.amount_usd,
                "recorded donation"
            );
            render::donated(out, &donation)?;
        }
        Command::List(args) => {
            let category = args
                .category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?;
            let sort: CharitySort = args.sort.parse()?;
            let charities = engine.get_charities(category, sort).await?;
            render::charity_list(out, &charities, category)?;
        }
        Command::Stats(args) => {
            let stats = engine.get_stats().await?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &stats)?;
                writeln!(out)?;
            } else {
                render::stats(out, &stats)?;
            }
        }
        Command::Verify(args) => {
            let charity_id = parse_id(&args.charity_id, "charity")?;
            let charity = engine.verify_charity(charity_id).await?;
            tracing::info!(%charity_id, "verified charity");
            render::verified(out, &charity)?;
        }
        Command::Receipt(args) => {
            let donation_id = parse_id(&args.donation_id, "donation")?;
            let receipt = engine.generate_receipt(donation_id).await?;
            writeln!(out, "{receipt}")?;
        }
        Command::Donations(args) => {
            let charity_id = parse_id(&args.charity_id, "charity")?;
            let charity = engine.charity(charity_id).await?;
            let donations = engine.donations_for_charity(charity_id).await?;
            render::donation_list(out, &charity, &donations)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use super::*;
    use crate::error::CliError;

    async fn engine() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    async fn run(engine: &Engine, command: Command) -> Result<String> {
        let mut out = Vec::new();
        execute(engine, command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn register(name: &str, category: &str, goal: &str) -> Command {
        Command::Register(RegisterArgs {
            name: name.to_string(),
            category: category.to_string(),
            description: "Libraries".to_string(),
            goal: goal.to_string(),
        })
    }

    fn donate(charity_id: &str, amount: &str, message: Option<&str>) -> Command {
        Command::Donate(DonateArgs {
            charity_id: charity_id.to_string(),
            donor: "Alice".to_string(),
            amount: amount.to_string(),
            message: message.map(str::to_string),
        })
    }

    #[test]
    fn category_help_lists_every_category() {
        let command = <RegisterArgs as clap::Args>::augment_args(clap::Command::new("register"));
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "category")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();
        for category in Category::ALL {
            assert!(help.contains(category.as_str()), "{category} missing from {help:?}");
        }
    }

    #[test]
    fn ids_are_trimmed_and_bad_ids_name_their_kind() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {id} "), "charity").unwrap(), id);
        assert_eq!(
            parse_id("42", "donation").unwrap_err(),
            EngineError::NotFound("donation 42".to_string())
        );
    }

    fn id_after(output: &str, label: &str) -> String {
        output
            .lines()
            .find_map(|line| line.trim().strip_prefix(label))
            .unwrap()
            .trim()
            .to_string()
    }

    #[tokio::test]
    async fn register_donate_and_print_receipt() {
        let engine = engine().await;

        let output = run(&engine, register("Books for All", "education", "1000"))
            .await
            .unwrap();
        assert!(output.contains("✓ Registered charity: Books for All"));
        assert!(output.contains("Goal: $1,000.00"));
        let charity_id = id_after(&output, "ID:");

        let output = run(&engine, donate(&charity_id, "50", Some("Good luck")))
            .await
            .unwrap();
        assert!(output.contains("Amount: $50.00"));
        let donation_id = id_after(&output, "Receipt ID:");

        let output = run(
            &engine,
            Command::Receipt(ReceiptArgs {
                donation_id: donation_id.clone(),
            }),
        )
        .await
        .unwrap();
        assert!(output.contains(&format!("Receipt ID: {donation_id}")));
        assert!(output.contains("Charity: Books for All"));
        assert!(output.contains("Message: Good luck"));

        let output = run(
            &engine,
            Command::List(ListArgs {
                category: None,
                sort: "raised".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(output.contains("Raised: $50.00 / $1,000.00 (5.0%)"));
    }

    #[tokio::test]
    async fn stats_json_is_machine_readable() {
        let engine = engine().await;
        let output = run(&engine, register("Books for All", "education", "1000"))
            .await
            .unwrap();
        let charity_id = id_after(&output, "ID:");
        run(&engine, donate(&charity_id, "50.50", None)).await.unwrap();

        let output = run(&engine, Command::Stats(StatsArgs { json: true }))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["total_raised_usd"], 50.5);
        assert_eq!(json["total_charities"], 1);
        assert_eq!(json["total_donations"], 1);
        assert_eq!(json["top_charity"]["name"], "Books for All");
    }

    #[tokio::test]
    async fn invalid_category_is_a_validation_error() {
        let engine = engine().await;
        let err = run(&engine, register("Nope", "space", "10"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Engine(ref e) if e.is_validation()));
        assert!(err.to_string().contains("category must be one of"));
    }

    #[tokio::test]
    async fn malformed_ids_are_reported_as_not_found() {
        let engine = engine().await;

        let err = run(&engine, donate("not-a-uuid", "10", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Engine(ref e) if e.is_not_found()));

        let err = run(
            &engine,
            Command::Verify(VerifyArgs {
                charity_id: Uuid::new_v4().to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Engine(ref e) if e.is_not_found()));

        let err = run(
            &engine,
            Command::Receipt(ReceiptArgs {
                donation_id: "42".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Engine(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn bad_amounts_are_rejected_before_touching_the_store() {
        let engine = engine().await;
        let output = run(&engine, register("Books for All", "education", "1000"))
            .await
            .unwrap();
        let charity_id = id_after(&output, "ID:");

        for amount in ["0", "-5", "abc", "1.234"] {
            let err = run(&engine, donate(&charity_id, amount, None))
                .await
                .unwrap_err();
            assert!(
                matches!(err, CliError::Engine(ref e) if e.is_validation()),
                "{amount}: {err}"
            );
        }

        let stats = engine.get_stats().await.unwrap();
        assert_eq!(stats.total_donations, 0);
    }

    #[tokio::test]
    async fn list_filters_by_category_and_rejects_unknown_sort() {
        let engine = engine().await;
        run(&engine, register("Books for All", "education", "1000"))
            .await
            .unwrap();
        run(&engine, register("Clinic", "health", "500"))
            .await
            .unwrap();

        let output = run(
            &engine,
            Command::List(ListArgs {
                category: Some("health".to_string()),
                sort: "created".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(output.contains("(1 total)"));
        assert!(output.contains("Clinic"));
        assert!(!output.contains("Books for All"));

        let err = run(
            &engine,
            Command::List(ListArgs {
                category: None,
                sort: "name".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Engine(ref e) if e.is_validation()));
    }

    #[tokio::test]
    async fn verify_and_donations_listing() {
        let engine = engine().await;
        let output = run(&engine, register("Books for All", "education", "1000"))
            .await
            .unwrap();
        let charity_id = id_after(&output, "ID:");

        let output = run(
            &engine,
            Command::Verify(VerifyArgs {
                charity_id: charity_id.clone(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(output.trim(), format!("✓ Charity {charity_id} verified"));

        run(&engine, donate(&charity_id, "10", Some("first")))
            .await
            .unwrap();
        run(&engine, donate(&charity_id, "15", None)).await.unwrap();

        let output = run(
            &engine,
            Command::Donations(DonationsArgs {
                charity_id: charity_id.clone(),
            }),
        )
        .await
        .unwrap();
        assert!(output.contains("Donations to Books for All (2 total, $25.00 raised)"));
        assert!(output.contains("\"first\""));
    }
}

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use flashcard_core::{
    parse_question_date, BrowseState, Flashcard, FlashcardPatch, NewFlashcard, QuestionStatus,
    StatusFilter, ViewProfile,
};
use flashcards_client::{ClientConfig, FlashcardsPage, StdoutLauncher, StoreClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "flashcards", about = "Browse, reorder and share flashcards", version)]
struct Cli {
    /// Store URL (default: $FLASHCARDS_URL or http://localhost:3002)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Case-insensitive text matched against question, answer and options
    #[arg(long, default_value = "")]
    search: String,

    /// all, "Want to Learn", Noted or Learned
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    /// default, Date, ID, Question or Answer
    #[arg(long, default_value = "default")]
    sort: String,
}

#[derive(Subcommand)]
enum Command {
    /// List cards after search, filter and sort
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Use the browse view: date-first default sort, first page only
        #[arg(long)]
        browse: bool,
    },

    /// Drop SOURCE onto TARGET, swapping their personal order
    Reorder { source: i64, target: i64 },

    /// Print a mailto: link sharing the given cards
    Share {
        #[command(flatten)]
        view: ViewArgs,

        /// Card ids to share; ids outside the filtered list are ignored
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Create a card
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        answer: String,
        /// Candidate answer, repeatable
        #[arg(long = "option")]
        options: Vec<String>,
        #[arg(long, default_value = "Want to Learn")]
        status: QuestionStatus,
        /// RFC 3339 or YYYY-MM-DD (default: now)
        #[arg(long, value_parser = parse_question_date)]
        date: Option<DateTime<Utc>>,
    },

    /// Update fields of a card
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        /// Replaces all candidate answers, repeatable
        #[arg(long = "option")]
        options: Vec<String>,
        #[arg(long)]
        status: Option<QuestionStatus>,
        #[arg(long, value_parser = parse_question_date)]
        date: Option<DateTime<Utc>>,
    },

    /// Delete a card
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().with_url(cli.url);
    let page = FlashcardsPage::new(
        StoreClient::new(config.store_url.clone()),
        Arc::new(StdoutLauncher),
    );

    match cli.command {
        Command::List { view, browse } => {
            page.load().await.context("failed to load flashcards")?;
            let cards = if browse {
                let state = BrowseState::new()
                    .with_search(view.search)
                    .with_status(view.status)
                    .with_sort(ViewProfile::Browse.parse_sort(&view.sort)?);
                state.visible_page(page.snapshot().cards())
            } else {
                apply_view(&page, view)?;
                page.visible()
            };
            print_cards(&cards, &cli.format)?;
        }
        Command::Reorder { source, target } => {
            page.load().await.context("failed to load flashcards")?;
            if let Some(notice) = page.drag_start(source) {
                anyhow::bail!(notice);
            }
            page.drag_over();
            let Some(write) = page.drop_on(target) else {
                anyhow::bail!("nothing to reorder between {} and {}", source, target);
            };
            write.await?.context("failed to save the new order")?;
            print_cards(&page.visible(), &cli.format)?;
        }
        Command::Share { view, ids } => {
            page.load().await.context("failed to load flashcards")?;
            apply_view(&page, view)?;
            for id in ids {
                page.toggle_select(id);
            }
            if page.share().is_none() {
                anyhow::bail!("no cards selected");
            }
        }
        Command::Add {
            title,
            answer,
            options,
            status,
            date,
        } => {
            let card = NewFlashcard {
                question_title: title,
                question_answer: answer,
                question_options: options,
                question_date: Some(date.unwrap_or_else(Utc::now)),
                question_status: status,
                question_order: None,
            };
            let created = page.add_card(&card).await?;
            print_cards(&[created], &cli.format)?;
        }
        Command::Edit {
            id,
            title,
            answer,
            options,
            status,
            date,
        } => {
            let patch = FlashcardPatch {
                question_title: title,
                question_answer: answer,
                question_options: (!options.is_empty()).then_some(options),
                question_date: date,
                question_status: status,
                question_order: None,
            };
            let updated = page.edit_card(id, &patch).await?;
            print_cards(&[updated], &cli.format)?;
        }
        Command::Delete { id } => {
            page.delete_card(id).await?;
            println!("Deleted flashcard {}", id);
        }
    }

    Ok(())
}

fn apply_view(page: &FlashcardsPage, view: ViewArgs) -> anyhow::Result<()> {
    page.set_sort(ViewProfile::Collection.parse_sort(&view.sort)?);
    page.set_status(view.status);
    page.set_search(view.search);
    Ok(())
}

fn print_cards(cards: &[Flashcard], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No flashcards.");
            }
            for card in cards {
                println!("{}", render_card(card));
            }
        }
    }
    Ok(())
}

fn render_card(card: &Flashcard) -> String {
    let order = card
        .question_order
        .map(|o| o.to_string())
        .unwrap_or_else(|| "-".to_string());
    let date = card
        .question_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    let mut line = format!(
        "#{:<4} order {:<4} {:<14} {:<10} {} => {}",
        card.id,
        order,
        card.question_status.as_str(),
        date,
        card.question_title,
        card.question_answer
    );
    if !card.question_options.is_empty() {
        line.push_str(&format!("  [{}]", card.question_options.join(" | ")));
    }
    line
}

use std::{
    io::{self, Write},
    sync::Arc,
};

use annotator_core::{
    config::{load_settings, normalize_database_url},
    resolve_image_url, DurableCursorStore, HttpPairClient, PairNavigator, PairService,
};
use anyhow::Result;
use clap::Parser;
use shared::domain::TaggedType;
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    static_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.database_url {
        settings.database_url = normalize_database_url(&v);
    }
    if let Some(v) = args.static_url {
        settings.static_url = Some(v);
    }

    let storage = Storage::new(&settings.database_url).await?;
    storage.health_check().await?;

    let service = Arc::new(HttpPairClient::new(&settings.server_url));
    let static_url = settings.static_url();
    let mut navigator = PairNavigator::new(
        service.clone(),
        Arc::new(DurableCursorStore::new(storage)),
    )
    .await;
    info!(
        server_url = %settings.server_url,
        cursor = navigator.cursor(),
        "annotation session restored"
    );

    navigator.load_current().await;
    render(&navigator, &static_url);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("n") | Some("next") => {
                navigator.load_next().await;
                render(&navigator, &static_url);
            }
            Some("p") | Some("prev") => {
                navigator.load_prev().await;
                render(&navigator, &static_url);
            }
            Some("g") | Some("goto") => match parts.next().map(|v| v.parse::<i64>()) {
                Some(Ok(id)) => {
                    navigator.load_by_id(id).await;
                    render(&navigator, &static_url);
                }
                _ => println!("usage: goto <id>"),
            },
            Some(word @ ("correct" | "incorrect" | "ambiguous" | "c" | "i" | "a")) => {
                let tagged_type = match word {
                    "correct" | "c" => TaggedType::Correct,
                    "incorrect" | "i" => TaggedType::Incorrect,
                    _ => TaggedType::Ambiguous,
                };
                // Mirror the annotation flow: tag the pair on screen, then
                // move straight to the next one.
                navigator.mark_current(tagged_type).await;
                match navigator.last_error() {
                    None => println!("marked as {tagged_type}"),
                    Some(err) => println!("! {err}"),
                }
                navigator.load_next().await;
                render(&navigator, &static_url);
            }
            Some("list") => {
                let page = parts.next().and_then(|v| v.parse().ok()).unwrap_or(1);
                let limit = parts.next().and_then(|v| v.parse().ok()).unwrap_or(10);
                render_listing(service.as_ref(), page, limit).await;
            }
            Some("r") | Some("reload") => {
                navigator.load_current().await;
                render(&navigator, &static_url);
            }
            Some("h") | Some("help") => print_help(),
            Some("q") | Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command '{other}', try 'help'"),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("annotator> ");
    io::stdout().flush()?;
    Ok(())
}

fn render(navigator: &PairNavigator, static_url: &str) {
    match navigator.current() {
        Some(pair) => {
            println!();
            println!("pair {}  (batch {})", pair.id.0, pair.batch);
            println!("  source: {}", resolve_image_url(static_url, pair.source_image()));
            println!("  target: {}", resolve_image_url(static_url, pair.target_image()));
            println!("  description: {}", pair.description);
            match pair.tagged_type {
                Some(tag) => println!("  tagged: {tag}"),
                None => println!("  tagged: (untagged)"),
            }
        }
        None => println!("no pair loaded"),
    }
    if let Some(err) = navigator.last_error() {
        println!("  ! {err}");
    }
}

async fn render_listing(service: &dyn PairService, page: u32, limit: u32) {
    match service.list_pairs(page, limit).await {
        Ok(listing) => {
            for pair in &listing.tags {
                let tag = pair
                    .tagged_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "untagged".to_string());
                println!("{:>6}  {:<10}  {}", pair.id.0, tag, pair.description);
            }
            println!(
                "page {} of {} ({} pairs total)",
                listing.current_page, listing.total_pages, listing.total_count
            );
        }
        Err(err) => println!("! failed to list pairs: {err}"),
    }
}

fn print_help() {
    println!();
    println!("commands:");
    println!("  next (n) / prev (p)          step through the pair sequence");
    println!("  goto (g) <id>                jump to a pair by id");
    println!("  correct (c) / incorrect (i) / ambiguous (a)");
    println!("                               tag the current pair and advance");
    println!("  list [page] [limit]          page through all pairs");
    println!("  reload (r)                   refetch the current pair");
    println!("  quit (q)                     exit");
}

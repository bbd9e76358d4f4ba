use annotator_core::{HttpPairClient, PairService};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::{PairId, TaggedType},
    protocol::{CreatePairRequest, DEFAULT_BATCH},
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://localhost:8888")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreatePair {
        id: i64,
        source_image: String,
        target_image: String,
        description: String,
        #[arg(long, default_value = DEFAULT_BATCH)]
        batch: String,
    },
    ShowPair {
        id: i64,
    },
    ListPairs {
        #[arg(default_value_t = 1)]
        page: u32,
        #[arg(default_value_t = 10)]
        limit: u32,
    },
    MarkPair {
        id: i64,
        tagged_type: String,
        #[arg(long, default_value = DEFAULT_BATCH)]
        batch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = HttpPairClient::new(&cli.server_url);

    match cli.command {
        Command::CreatePair {
            id,
            source_image,
            target_image,
            description,
            batch,
        } => {
            let pair = client
                .create_pair(CreatePairRequest {
                    image_paths: [source_image, target_image],
                    description,
                    id: PairId(id),
                    batch,
                })
                .await?;
            println!("created pair id={}", pair.id.0);
        }
        Command::ShowPair { id } => {
            let pair = client.pair_by_id(PairId(id)).await?;
            println!("{}", serde_json::to_string_pretty(&pair)?);
        }
        Command::ListPairs { page, limit } => {
            let listing = client.list_pairs(page, limit).await?;
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
        Command::MarkPair {
            id,
            tagged_type,
            batch,
        } => {
            let tagged_type = TaggedType::parse(&tagged_type).ok_or_else(|| {
                anyhow!("unknown tag type '{tagged_type}' (expected correct, incorrect, or ambiguous)")
            })?;
            client.mark_pair(tagged_type, PairId(id), &batch).await?;
            println!("marked pair {id} as {tagged_type}");
        }
    }

    Ok(())
}

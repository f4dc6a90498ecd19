mod commands;

use clap::{Parser, Subcommand};
use mediagen_types::{MediaKind, ProviderId};

#[derive(Parser)]
#[command(name = "mediagen", about = "Media generation adapter CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the vendor request payload for a model without sending it
    BuildRequest {
        /// Provider: kie, ppio, fal, or modelscope
        #[arg(short, long)]
        provider: ProviderId,

        /// Model ID (e.g. "kie-sora-2")
        #[arg(short, long)]
        model: String,

        /// Media kind: image, video, or audio
        #[arg(short, long, default_value = "image")]
        kind: MediaKind,

        /// Generation params as JSON (merged over {"prompt", "model"})
        #[arg(long, default_value = "{}")]
        params: String,

        /// Prompt text (shortcut for --params)
        #[arg(long, default_value = "")]
        prompt: String,
    },
    /// Estimate the display price for a model
    Estimate {
        #[arg(short, long)]
        provider: ProviderId,

        #[arg(short, long)]
        model: String,

        /// Price params as JSON
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Validate @Image/@Video/@Element references in a prompt
    CheckPrompt {
        prompt: String,

        #[arg(long, default_value_t = 0)]
        images: usize,

        #[arg(long, default_value_t = 0)]
        videos: usize,

        #[arg(long, default_value_t = 0)]
        elements: usize,

        /// Vendor cap on total referenced items
        #[arg(long)]
        max_total: Option<usize>,
    },
    /// Compute the resolution for a base size and aspect ratio
    Resolution {
        /// Base size (square edge length)
        #[arg(short, long, default_value_t = 1440)]
        base_size: u32,

        /// Aspect ratio, e.g. "16:9"
        #[arg(short, long, default_value = "1:1")]
        ratio: String,

        /// Clamp into [min, max] with 16-pixel alignment
        #[arg(long)]
        bounded: bool,

        #[arg(long, default_value_t = 64)]
        min: u32,

        #[arg(long, default_value_t = 2048)]
        max: u32,

        /// Print the whole common-ratio table instead of one ratio
        #[arg(long)]
        all: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildRequest {
            provider,
            model,
            kind,
            params,
            prompt,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(commands::run_build_request(
                provider, &model, kind, &params, &prompt,
            ))?;
        }
        Commands::Estimate {
            provider,
            model,
            params,
        } => {
            commands::run_estimate(provider, &model, &params)?;
        }
        Commands::CheckPrompt {
            prompt,
            images,
            videos,
            elements,
            max_total,
        } => {
            commands::run_check_prompt(&prompt, images, videos, elements, max_total);
        }
        Commands::Resolution {
            base_size,
            ratio,
            bounded,
            min,
            max,
            all,
        } => {
            commands::run_resolution(base_size, &ratio, bounded, min, max, all)?;
        }
    }

    Ok(())
}

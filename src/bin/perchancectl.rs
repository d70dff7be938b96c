use clap::{Parser, Subcommand};
use perchance_worker::error::AppError;
use perchance_worker::generation::{generate_and_host, GenerateImageDto};
use perchance_worker::{Config, ImageGenerator, ImgurClient, PerchanceClient};
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "perchancectl", about = "CLI for the Perchance worker", version)]
struct Cli {
    /// Override PERCHANCE_API_URL
    #[arg(global = true, long)]
    perchance_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an image locally, without going through a running worker
    Generate {
        /// Text description of the image
        #[arg(long)]
        prompt: String,
        /// Seed; -1 lets the provider pick
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
        /// Guidance scale in [0, 20]
        #[arg(long)]
        guidance_scale: Option<f64>,
        /// portrait, landscape, or square
        #[arg(long)]
        shape: Option<String>,
        /// Things the image should avoid
        #[arg(long, value_name = "TEXT")]
        negative_prompt: Option<String>,
        /// Output path (defaults to ./perchance-<uuid>.jpg)
        #[arg(long, value_name = "PATH", conflicts_with = "upload")]
        out: Option<PathBuf>,
        /// Upload to Imgur instead of writing a file
        #[arg(long)]
        upload: bool,
    },
    /// Query the health endpoint of a running worker
    Health {
        /// Worker base URL (defaults to http://127.0.0.1:$PORT)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new();
    if let Some(url) = cli.perchance_url {
        conf.perchance_api_url = url;
    }

    let outcome = match cli.command {
        Commands::Generate { prompt, seed, guidance_scale, shape, negative_prompt, out, upload } => {
            let dto = GenerateImageDto {
                prompt: Some(prompt),
                seed,
                guidance_scale: guidance_scale.map(Some),
                shape: shape.map(Some),
                negative_prompt,
            };
            generate(&conf, dto, out, upload).await
        }
        Commands::Health { url } => {
            let base = url.unwrap_or_else(|| format!("http://127.0.0.1:{}", conf.api_port));
            health(&base).await
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn generate(conf: &Config, dto: GenerateImageDto, out: Option<PathBuf>, upload: bool) -> Result<(), AppError> {
    let request = dto.validate()?;
    let generator = PerchanceClient::new(
        conf.perchance_api_url.clone(),
        conf.perchance_user_key.clone(),
        conf.perchance_max_wait_polls,
    );

    if upload {
        let host = ImgurClient::new(conf.imgur_api_url.clone(), conf.imgur_client_id.clone());
        let result = generate_and_host(&generator, &host, request).await?;
        let pretty = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::Decode(e.to_string()))?;
        println!("{}", pretty);
        return Ok(());
    }

    let bytes = generator.generate(&request).await?;
    let path = out.unwrap_or_else(|| PathBuf::from(format!("perchance-{}.jpg", Uuid::new_v4().simple())));
    tokio::fs::write(&path, &bytes).await?;
    println!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

async fn health(base: &str) -> Result<(), AppError> {
    let url = format!("{}/health", base.trim_end_matches('/'));
    let response = reqwest::get(&url).await?;
    let status = response.status();
    let body: Value = response.json().await?;
    let pretty = serde_json::to_string_pretty(&body).map_err(|e| AppError::Decode(e.to_string()))?;
    println!("{} {}", status, pretty);
    Ok(())
}

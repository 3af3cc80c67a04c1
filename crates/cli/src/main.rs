use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tdr_core::{CoreConfig, ProjectService, Upload};
use tdr_model::{GeminiClient, ModelConfig};
use tdr_staging::{HttpBlobStore, StagingConfig};

#[derive(Parser)]
#[command(name = "tdr")]
#[command(about = "TDR tender review workflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract requirements from an RFP PDF and load it into the project
    ExtractRfp {
        /// Path to the RFP PDF
        path: PathBuf,
    },
    /// Assess a bid PDF against the loaded RFP's requirements
    AssessBid {
        /// Path to the bid PDF
        path: PathBuf,
    },
    /// Run the comparative analysis over all assessed bids
    Analyse,
    /// Show the current project state
    Show,
    /// Clear the project and wipe the durable store
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("No command given; try --help.");
        return Ok(());
    };

    let service = build_service()?;

    match command {
        Commands::ExtractRfp { path } => {
            let rfp = service.load_rfp(&read_upload(&path)?).await?;
            println!("RFP: {}", rfp.title);
            for (i, req) in rfp.requirements.iter().enumerate() {
                println!("{}. [{}] {}", i + 1, req.category, req.text);
            }
        }
        Commands::AssessBid { path } => {
            let bid = service.add_bid(&read_upload(&path)?, None).await?;
            println!(
                "Bid: {} — total cost {}, timeline {}",
                bid.title, bid.total_cost, bid.timeline
            );
            for req in &bid.requirements {
                let verdict = if req.is_satisfied { "yes" } else { "NO" };
                println!("[{}] {} — satisfied: {} ({})", req.category, req.text, verdict, req.reason);
            }
        }
        Commands::Analyse => {
            let analysis = service.run_analysis().await?;
            println!("Recommendation: {}", analysis.recommendation);
            println!("Reason: {}", analysis.main_recommendation_reason);
            for point in &analysis.supporting_recommendation_points {
                println!("- {point}");
            }
            for company in &analysis.open_questions {
                println!("Open questions for {}:", company.company_name);
                for question in &company.open_questions {
                    println!("  - {question}");
                }
            }
        }
        Commands::Show => {
            let project = service.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        Commands::Reset => {
            service.reset().await?;
            println!("Project reset.");
        }
    }

    Ok(())
}

/// Builds the project service from the same environment variables the REST
/// server uses.
fn build_service() -> anyhow::Result<ProjectService> {
    let data_dir = std::env::var("PROJECT_DATA_DIR").unwrap_or_else(|_| "/project_data".into());
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;
    let blob_url = std::env::var("BLOB_STORE_URL")
        .map_err(|_| anyhow::anyhow!("BLOB_STORE_URL is not set"))?;
    let blob_token = std::env::var("BLOB_STORE_TOKEN")
        .map_err(|_| anyhow::anyhow!("BLOB_STORE_TOKEN is not set"))?;

    let mut model_config = ModelConfig::new(api_key)?;
    if let Ok(model) = std::env::var("TDR_MODEL") {
        model_config = model_config.with_model(model);
    }

    let staging = HttpBlobStore::new(StagingConfig::new(blob_url, blob_token)?)?;
    let model = GeminiClient::new(model_config)?;
    let config = CoreConfig::new(data_dir.into())?;

    Ok(ProjectService::new(
        &config,
        Arc::new(staging),
        Arc::new(model),
    ))
}

/// Reads a local PDF into an upload, using the file's own name.
fn read_upload(path: &PathBuf) -> anyhow::Result<Upload> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|os| os.to_str())
        .map(|s| s.to_string());
    Ok(Upload {
        filename,
        content_type: Some("application/pdf".into()),
        bytes,
    })
}

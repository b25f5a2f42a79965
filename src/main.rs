use delphi::cli::output::Output;
use delphi::cli::{Cli, Commands};
use delphi::config::{DataProviderConfig, ModelConfig, RagConfig};
use delphi::db::VectorStoreProvider;
use delphi::llm::Provider;
use delphi::rag::{Embedder, GeminiEmbedder, IngestionPipeline};
use delphi::session::{ChatLoop, Conversation, TurnProcessor};
use delphi::tools::market::{CoinPriceTool, StockPriceTool};
use delphi::tools::retrieve::RetrieveTool;
use delphi::tools::weather::WeatherTool;
use delphi::tools::ToolRegistry;
use delphi::types::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const RAG_SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the 'retrieve' tool to answer \
                                 questions from the ingested document.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    dotenvy::dotenv().ok();

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let result = match &cli.command {
        Commands::Chat => run_chat(&output).await,
        Commands::Rag { document } => run_rag(&output, document).await,
    };

    // Setup failures land here; per-turn failures are handled inside the loop.
    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "delphi=debug" } else { "delphi=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_chat(output: &Output) -> Result<()> {
    let model_config = ModelConfig::from_env()?;
    let providers = DataProviderConfig::from_env()?;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CoinPriceTool::new()));
    registry.register(Arc::new(StockPriceTool::new(providers.ninja_api_key)));
    registry.register(Arc::new(WeatherTool::new(providers.weather_api_key)));

    let provider = Provider::Gemini {
        api_key: model_config.api_key,
        model: model_config.chat_model,
    };
    let processor = TurnProcessor::new(provider.create_client(), Arc::new(registry));

    output.banner("function-calling chat (type 'exit' to quit)");

    let mut conversation = Conversation::new();
    let stdin = std::io::stdin();
    ChatLoop::new(&processor, output)
        .run(stdin.lock(), &mut conversation)
        .await
}

async fn run_rag(output: &Output, document: &Path) -> Result<()> {
    let model_config = ModelConfig::from_env()?;
    let rag_config = RagConfig::from_env()?;

    let store_provider = VectorStoreProvider::from_env()?;
    if matches!(store_provider, VectorStoreProvider::InMemory) {
        output.warning("PINECONE_API_KEY not set, using an in-memory index for this run");
    }
    let store = store_provider.create_store();
    let embedder: Arc<dyn Embedder> = Arc::new(GeminiEmbedder::new(
        model_config.api_key.clone(),
        model_config.embedding_model.clone(),
    ));

    output.info(&format!("vector index: {}", store.provider_name()));
    output.info("storing embeddings...");

    let pipeline = IngestionPipeline::new(&rag_config, embedder.clone(), store.clone())?;
    let report = pipeline.run(document).await?;
    output.success(&format!("loaded {} pages", report.pages));
    output.success(&format!("created {} chunks", report.chunks));
    output.success(&format!("stored {} embeddings", report.stored));

    let retrieve = RetrieveTool::new(embedder, store).with_description(format!(
        "Retrieve relevant passages from {}.",
        document.display()
    ));
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(retrieve));

    let provider = Provider::Gemini {
        api_key: model_config.api_key,
        model: model_config.chat_model,
    };
    let processor = TurnProcessor::new(provider.create_client(), Arc::new(registry));

    output.banner("RAG chat ready (type 'exit' to quit)");

    let mut conversation = Conversation::with_system(RAG_SYSTEM_PROMPT);
    let stdin = std::io::stdin();
    ChatLoop::new(&processor, output)
        .run(stdin.lock(), &mut conversation)
        .await
}

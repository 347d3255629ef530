//! Document Q&A server binary
//!
//! Run with: cargo run -p docqa-rag --bin docqa-rag-server

use docqa_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        DocQA RAG                          ║
║            Ask questions about your documents             ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding backend: {:?}", config.embeddings.backend);
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - LLM endpoint: {}", config.llm.api_url);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!(
        "  - Chunking: min line {} chars, max chunk {} chars",
        config.chunking.min_line_chars,
        config.chunking.max_chunk_chars
    );
    tracing::info!("  - Top K: {}", config.retrieval.top_k);
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());

    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /upload-document/ - Upload a document");
    println!("  POST /ask-question/    - Ask a question");
    println!("  POST /api/settings/    - Set the default API key");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

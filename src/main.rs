#![allow(dead_code, unused_imports)]
//! # Entrevista de Arranque
//!
//! **Ponto de entrada principal** da entrevista orientativa para falhas
//! de partida (motor que não gira, gira e não pega, pega e apaga).
//!
//! A aplicação tem dois modos, escolhidos por [`Config`]:
//!
//! - **Web** (padrão): servidor axum + HTMX em `http://0.0.0.0:8080`,
//!   uma sessão isolada por visitante
//! - **Terminal** (`--terminal`): a mesma entrevista em stdin/stdout
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Lê Config (flags + variáveis de ambiente)
//!   ├── Configura tracing/logging (stderr)
//!   ├── --terminal?
//!   │   └── spawn_blocking → run_sessions(TerminalPresenter)
//!   └── senão
//!       ├── Monta AppState e Router
//!       ├── Spawn: varredura de sessões vencidas
//!       └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Servidor web com logs padrão (info)
//! cargo run
//!
//! # Entrevista no terminal
//! cargo run -- --terminal
//!
//! # Logs detalhados, outra porta
//! RUST_LOG=debug cargo run -- --addr 127.0.0.1:3000
//! ```

/// Módulo `config` — flags de linha de comando e variáveis de ambiente.
mod config;

/// Módulo `core` — catálogo de perguntas, mapa de respostas, erros.
mod core;

/// Módulo `inference` — regras condição→dica e o motor de dicas.
mod inference;

/// Módulo `interview` — controlador da entrevista e apresentações síncronas.
mod interview;

/// Módulo `markup` — marcação `**negrito**` dos textos.
mod markup;

/// Módulo `web` — servidor axum, handlers HTTP e templates.
mod web;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::DiagnosisError;
use crate::interview::{run_sessions, TerminalPresenter};
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs vão para stderr para não se misturar com a entrevista no terminal.
    // Exemplo: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if config.terminal {
        return tokio::task::spawn_blocking(run_terminal)
            .await
            .context("Falha na thread da entrevista")?;
    }

    serve(config).await
}

/// Entrevista em stdin/stdout até o usuário não pedir outra.
///
/// Fim de entrada no meio da entrevista é abandono: as respostas são
/// descartadas sem erro.
fn run_terminal() -> Result<()> {
    let mut presenter = TerminalPresenter::new(io::stdin().lock(), io::stdout());
    match run_sessions(&mut presenter) {
        Ok(completed) => {
            tracing::info!(completed, "Sessão de terminal encerrada");
            Ok(())
        }
        Err(DiagnosisError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::info!("Entrevista abandonada");
            Ok(())
        }
        Err(e) => Err(e).context("A entrevista não pôde ser concluída"),
    }
}

/// Servidor web: uma sessão por visitante, sessões ociosas descartadas
/// periodicamente.
async fn serve(config: Config) -> Result<()> {
    let state = AppState::new(config.session_ttl());

    // Varredura de sessões abandonadas
    let sweeper = state.clone();
    let every = config.sweep_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = sweeper.sweep_expired(chrono::Utc::now());
            if removed > 0 {
                tracing::info!(removed, "Sessões vencidas descartadas");
            }
        }
    });

    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Falha ao fazer bind em {}", config.addr))?;
    tracing::info!("🚗 Server running at http://{}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Interface de linha de comando do recache.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recache - cache LRU limitado e thread-safe.
#[derive(Parser, Debug)]
#[command(name = "recache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "recache.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Valida a configuração e mostra a capacidade do cache.
    Check,

    /// Executa um script de operações contra um cache novo.
    Replay {
        /// Arquivo do script ("-" para stdin).
        script: PathBuf,

        /// Sobrescreve `cache.max_items` da configuração.
        #[arg(short, long, allow_negative_numbers = true)]
        max_items: Option<i64>,

        /// Emite um objeto JSON por linha.
        #[arg(long)]
        json: bool,
    },

    /// Mostra versão.
    Version,
}

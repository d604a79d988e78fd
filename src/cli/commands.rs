//! Implementação dos comandos CLI do recache.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::replay::{parse_script, Replayer};
use crate::types::config::{CacheConfig, Config};
use crate::{CacheResult, LruCache};

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> CacheResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("recache.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("recache initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!("Cache capacity (max_items): {}", config.cache.max_items);

    Ok(())
}

/// Valida a configuração carregada.
pub async fn check(config: &Config, config_path: &Path) -> CacheResult<()> {
    if config_path.exists() {
        println!("Configuração: {}", config_path.display());
    } else {
        println!("Configuração: padrão ({} não encontrado)", config_path.display());
    }

    config.validate()?;
    let capacity = config.cache.capacity()?;

    println!("✓ Configuração válida");
    println!("  max_items: {}", capacity);
    println!("  log_level: {}", config.general.log_level);

    Ok(())
}

/// Executa um script de operações e imprime um resultado por linha.
pub async fn replay(
    script_path: &Path,
    max_items: Option<i64>,
    json: bool,
    config: &Config,
) -> CacheResult<()> {
    let cache_config = match max_items {
        Some(max_items) => CacheConfig { max_items },
        None => config.cache.clone(),
    };

    // Falha antes de ler o script se a capacidade for inválida
    let cache = Arc::new(LruCache::from_config(&cache_config)?);

    let source = read_script(script_path)?;
    let script = parse_script(&source)?;

    tracing::debug!(
        "Executando {} comandos com capacidade {}",
        script.len(),
        cache.threshold()
    );

    let replayer = Replayer::new(cache);
    for outcome in replayer.run(&script)? {
        if json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!("{}", outcome);
        }
    }

    Ok(())
}

fn read_script(path: &Path) -> CacheResult<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Mostra versão.
pub fn version() {
    println!("recache v{}", env!("CARGO_PKG_VERSION"));
}

//! Execução de scripts contra um cache.

use serde::Serialize;
use std::fmt;

use super::script::{Command, ScriptLine};
use crate::cache::SharedCache;
use crate::{CacheError, CacheResult};

/// Resultado de um comando.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Chave encontrada (e promovida).
    Hit { value: String },
    /// Chave ausente.
    Miss,
    /// Entrada gravada; `evicted` é a chave removida, se houve eviction.
    Stored { evicted: Option<String> },
    Flushed,
    Count { count: usize },
    Threshold { threshold: usize },
    /// O cache recusou a operação (chave ou valor inválido).
    Rejected { error: String },
}

/// Resultado de uma linha do script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub line: usize,
    pub command: String,
    #[serde(flatten)]
    pub kind: OutcomeKind,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}: {} -> ", self.line, self.command)?;
        match &self.kind {
            OutcomeKind::Hit { value } => write!(f, "hit {}", value),
            OutcomeKind::Miss => write!(f, "miss"),
            OutcomeKind::Stored { evicted: Some(key) } => write!(f, "stored (evicted {})", key),
            OutcomeKind::Stored { evicted: None } => write!(f, "stored"),
            OutcomeKind::Flushed => write!(f, "flushed"),
            OutcomeKind::Count { count } => write!(f, "count {}", count),
            OutcomeKind::Threshold { threshold } => write!(f, "threshold {}", threshold),
            OutcomeKind::Rejected { error } => write!(f, "error: {}", error),
        }
    }
}

/// Aplica comandos a um cache compartilhado.
pub struct Replayer {
    cache: SharedCache<String, String>,
}

impl Replayer {
    pub fn new(cache: SharedCache<String, String>) -> Self {
        Self { cache }
    }

    /// Executa todos os comandos, na ordem.
    ///
    /// Chaves e valores inválidos geram `Rejected` e não interrompem a
    /// execução; qualquer outro erro interrompe.
    pub fn run(&self, script: &[ScriptLine]) -> CacheResult<Vec<Outcome>> {
        script.iter().map(|entry| self.apply(entry)).collect()
    }

    /// Executa um único comando.
    pub fn apply(&self, entry: &ScriptLine) -> CacheResult<Outcome> {
        let kind = match &entry.command {
            Command::Get { key } => match self.cache.get(key.as_str()) {
                Ok(Some(value)) => OutcomeKind::Hit { value },
                Ok(None) => OutcomeKind::Miss,
                Err(e) => rejected(e)?,
            },
            Command::Set { key, value } => {
                match self.cache.set_optional(key.clone(), value.clone()) {
                    Ok(evicted) => OutcomeKind::Stored { evicted },
                    Err(e) => rejected(e)?,
                }
            }
            Command::Flush => {
                self.cache.flush();
                OutcomeKind::Flushed
            }
            Command::Count => OutcomeKind::Count {
                count: self.cache.count(),
            },
            Command::Threshold => OutcomeKind::Threshold {
                threshold: self.cache.threshold(),
            },
        };

        if let OutcomeKind::Rejected { error } = &kind {
            tracing::warn!(line = entry.line, "comando rejeitado: {}", error);
        }

        Ok(Outcome {
            line: entry.line,
            command: entry.command.to_string(),
            kind,
        })
    }
}

/// Converte erros de uso do cache em `Rejected`; os demais são propagados.
fn rejected(err: CacheError) -> CacheResult<OutcomeKind> {
    if err.is_usage_error() {
        Ok(OutcomeKind::Rejected {
            error: err.to_string(),
        })
    } else {
        Err(err)
    }
}

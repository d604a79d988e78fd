//! Tipos de erro do recache.

use thiserror::Error;

/// Tipo de resultado padrão do recache.
pub type CacheResult<T> = Result<T, CacheError>;

/// Erros possíveis no recache.
///
/// `InvalidConfiguration`, `InvalidKey` e `InvalidValue` são erros de uso
/// do cache: são retornados antes de qualquer mutação. Uma chave ausente
/// em `get` não é erro.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Configuração inválida: {0}")]
    InvalidConfiguration(String),

    #[error("Chave inválida: a chave não pode ser vazia ou conter apenas espaços")]
    InvalidKey,

    #[error("Valor inválido: o valor não pode ser ausente")]
    InvalidValue,

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro no script (linha {line}): {message}")]
    Replay { line: usize, message: String },
}

impl CacheError {
    /// Cria um erro de configuração inválida do cache.
    pub fn invalid_configuration<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de script na linha indicada (1-based).
    pub fn replay<S: Into<String>>(line: usize, msg: S) -> Self {
        Self::Replay {
            line,
            message: msg.into(),
        }
    }

    /// Indica se o erro é uma violação de contrato do cache (chave ou valor).
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidKey | Self::InvalidValue)
    }
}

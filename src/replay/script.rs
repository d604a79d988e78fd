//! Parser de scripts de operações.
//!
//! Uma operação por linha: `get <chave>`, `set <chave> [valor]`, `flush`,
//! `count`, `threshold`. Linhas vazias e comentários (`#`) são ignorados.
//! Tokens podem ser delimitados por aspas duplas para conter espaços ou
//! ficar vazios (`get ""`).

use serde::Serialize;
use std::fmt;

use crate::{CacheError, CacheResult};

/// Operação sobre o cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Get { key: String },
    Set { key: String, value: Option<String> },
    Flush,
    Count,
    Threshold,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Get { key } => write!(f, "get {}", quote(key)),
            Command::Set { key, value: Some(value) } => {
                write!(f, "set {} {}", quote(key), quote(value))
            }
            Command::Set { key, value: None } => write!(f, "set {}", quote(key)),
            Command::Flush => write!(f, "flush"),
            Command::Count => write!(f, "count"),
            Command::Threshold => write!(f, "threshold"),
        }
    }
}

fn quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        format!("\"{}\"", token)
    } else {
        token.to_string()
    }
}

/// Comando com o número da linha de origem (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Converte o texto do script em comandos.
pub fn parse_script(source: &str) -> CacheResult<Vec<ScriptLine>> {
    let mut commands = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens = tokenize(trimmed).map_err(|msg| CacheError::replay(line, msg))?;
        let command = parse_command(&tokens).map_err(|msg| CacheError::replay(line, msg))?;
        commands.push(ScriptLine { line, command });
    }

    tracing::debug!(commands = commands.len(), "script carregado");
    Ok(commands)
}

fn parse_command(tokens: &[String]) -> Result<Command, String> {
    let (verb, args) = match tokens.split_first() {
        Some(split) => split,
        None => return Err("linha sem comando".to_string()),
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("get", [key]) => Ok(Command::Get { key: key.clone() }),
        ("set", [key]) => Ok(Command::Set {
            key: key.clone(),
            value: None,
        }),
        ("set", [key, value]) => Ok(Command::Set {
            key: key.clone(),
            value: Some(value.clone()),
        }),
        ("flush", []) => Ok(Command::Flush),
        ("count", []) => Ok(Command::Count),
        ("threshold", []) => Ok(Command::Threshold),
        ("get" | "set" | "flush" | "count" | "threshold", _) => {
            Err(format!("número de argumentos inválido para '{}'", verb))
        }
        _ => Err(format!("comando desconhecido: '{}'", verb)),
    }
}

fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut token = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                token.push(c);
            }
            if !closed {
                return Err("aspas não fechadas".to_string());
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
            tokens.push(token);
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        let script = "\
# comentário
get k1
set k1 v1
set k2

FLUSH
count
threshold
";
        let commands = parse_script(script).unwrap();
        let lines: Vec<usize> = commands.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 6, 7, 8]);

        assert_eq!(
            commands[1].command,
            Command::Set {
                key: "k1".to_string(),
                value: Some("v1".to_string())
            }
        );
        assert_eq!(
            commands[2].command,
            Command::Set {
                key: "k2".to_string(),
                value: None
            }
        );
        assert_eq!(commands[3].command, Command::Flush);
    }

    #[test]
    fn test_quoted_tokens() {
        let commands = parse_script("get \"\"\nset \" \" \"um valor\"").unwrap();
        assert_eq!(
            commands[0].command,
            Command::Get {
                key: String::new()
            }
        );
        assert_eq!(
            commands[1].command,
            Command::Set {
                key: " ".to_string(),
                value: Some("um valor".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_script("get a\ndelete a").unwrap_err();
        assert!(matches!(err, CacheError::Replay { line: 2, .. }));
    }

    #[test]
    fn test_wrong_arity() {
        assert!(parse_script("get").is_err());
        assert!(parse_script("set a b c").is_err());
        assert!(parse_script("flush now").is_err());
    }

    #[test]
    fn test_unclosed_quote() {
        let err = parse_script("get \"abc").unwrap_err();
        assert!(err.to_string().contains("aspas"));
    }

    #[test]
    fn test_display_quotes_when_needed() {
        let cmd = Command::Set {
            key: String::new(),
            value: Some("a b".to_string()),
        };
        assert_eq!(cmd.to_string(), "set \"\" \"a b\"");
        assert_eq!(
            Command::Get {
                key: "k1".to_string()
            }
            .to_string(),
            "get k1"
        );
    }
}

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Storage backend selected at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    Postgres,
    /// In-process store, lost on restart.
    Memory,
}

impl FromStr for RepositoryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "local" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid {
                name: "REPOSITORY_TYPE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

impl RepositoryKind {
    /// Reads `REPOSITORY_TYPE`. Without it, Postgres is chosen when
    /// `DATABASE_URL` is set and the memory store otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(val) = env::var("REPOSITORY_TYPE") {
            return val.parse();
        }

        Ok(Self::infer(env::var("DATABASE_URL").is_ok()))
    }

    pub fn infer(database_url_present: bool) -> Self {
        if database_url_present {
            Self::Postgres
        } else {
            Self::Memory
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("postgres".parse::<RepositoryKind>().unwrap(), RepositoryKind::Postgres);
        assert_eq!("PG".parse::<RepositoryKind>().unwrap(), RepositoryKind::Postgres);
        assert_eq!("memory".parse::<RepositoryKind>().unwrap(), RepositoryKind::Memory);
        assert_eq!("local".parse::<RepositoryKind>().unwrap(), RepositoryKind::Memory);
        assert!("mysql".parse::<RepositoryKind>().is_err());
    }

    #[test]
    fn test_infer() {
        assert_eq!(RepositoryKind::infer(true), RepositoryKind::Postgres);
        assert_eq!(RepositoryKind::infer(false), RepositoryKind::Memory);
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [RepositoryKind::Postgres, RepositoryKind::Memory] {
            assert_eq!(kind.to_string().parse::<RepositoryKind>().unwrap(), kind);
        }
    }
}

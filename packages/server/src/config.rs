//! Server configuration.
//!
//! Every option can be given as a command-line flag or as a `TOPTEN_*`
//! environment variable.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::domain::{RoomSettings, ScoringMode};

#[derive(Parser, Debug, Clone)]
#[command(name = "topten-server")]
#[command(about = "Multiplayer Top Ten trivia server", long_about = None)]
pub struct CliArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TOPTEN_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TOPTEN_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Rounds played per game
    #[arg(long, env = "TOPTEN_TOTAL_ROUNDS", default_value_t = 3)]
    pub total_rounds: u32,

    /// Time limit of each question in milliseconds
    #[arg(long, env = "TOPTEN_QUESTION_TIME_LIMIT_MS", default_value_t = 60_000)]
    pub question_time_limit_ms: u64,

    /// Maximum players per room (unbounded if unset)
    #[arg(long, env = "TOPTEN_MAX_PLAYERS")]
    pub max_players: Option<usize>,

    /// Award each answer at most once per player and round
    #[arg(long, env = "TOPTEN_STRICT_SCORING")]
    pub strict_scoring: bool,

    /// Advance rooms automatically when the question time runs out
    #[arg(long, env = "TOPTEN_AUTO_ADVANCE")]
    pub auto_advance: bool,

    /// Period of the expiry sweep in milliseconds
    #[arg(long, env = "TOPTEN_SWEEP_INTERVAL_MS", default_value_t = 1_000)]
    pub sweep_interval_ms: u64,

    /// Reply with `error` to actions on unknown rooms or in the wrong phase
    #[arg(long, env = "TOPTEN_EXPLICIT_ERRORS")]
    pub explicit_errors: bool,

    /// JSON question catalog (built-in catalog if unset)
    #[arg(long, env = "TOPTEN_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub room: RoomSettings,
    pub auto_advance: bool,
    pub sweep_interval: Duration,
    pub explicit_errors: bool,
    pub catalog: Option<PathBuf>,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room.total_rounds == 0 {
            return Err(ConfigError::Zero("total-rounds"));
        }
        if self.room.question_time_limit_ms <= 0 {
            return Err(ConfigError::Zero("question-time-limit-ms"));
        }
        if self.room.max_players == Some(0) {
            return Err(ConfigError::Zero("max-players"));
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::Zero("sweep-interval-ms"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            room: RoomSettings::default(),
            auto_advance: false,
            sweep_interval: Duration::from_millis(1_000),
            explicit_errors: false,
            catalog: None,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let scoring = if args.strict_scoring {
            ScoringMode::OncePerItem
        } else {
            ScoringMode::ReAward
        };
        let config = Self {
            host: args.host,
            port: args.port,
            room: RoomSettings {
                total_rounds: args.total_rounds,
                question_time_limit_ms: i64::try_from(args.question_time_limit_ms)
                    .unwrap_or(i64::MAX),
                scoring,
                max_players: args.max_players,
            },
            auto_advance: args.auto_advance,
            sweep_interval: Duration::from_millis(args.sweep_interval_ms),
            explicit_errors: args.explicit_errors,
            catalog: args.catalog,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("topten-server").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしで既定値の設定になる
        // given (前提条件):
        let args = parse(&[]);

        // when (操作):
        let config = ServerConfig::try_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_flags_map_to_room_settings() {
        // テスト項目: フラグが Room の設定に反映される
        // given (前提条件):
        let args = parse(&[
            "-H",
            "0.0.0.0",
            "-p",
            "3000",
            "--total-rounds",
            "5",
            "--question-time-limit-ms",
            "30000",
            "--max-players",
            "8",
            "--strict-scoring",
            "--auto-advance",
            "--explicit-errors",
        ]);

        // when (操作):
        let config = ServerConfig::try_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(
            config.room,
            RoomSettings {
                total_rounds: 5,
                question_time_limit_ms: 30_000,
                scoring: ScoringMode::OncePerItem,
                max_players: Some(8),
            }
        );
        assert!(config.auto_advance);
        assert!(config.explicit_errors);
    }

    #[test]
    fn test_zero_values_are_rejected() {
        // テスト項目: 0 の設定値は拒否される
        // given (前提条件):
        let cases = [
            (vec!["--total-rounds", "0"], "total-rounds"),
            (vec!["--question-time-limit-ms", "0"], "question-time-limit-ms"),
            (vec!["--max-players", "0"], "max-players"),
            (vec!["--sweep-interval-ms", "0"], "sweep-interval-ms"),
        ];

        for (args, field) in cases {
            // when (操作):
            let result = ServerConfig::try_from(parse(&args));

            // then (期待する結果):
            assert_eq!(result.unwrap_err(), ConfigError::Zero(field));
        }
    }
}

//! Value objects for the game domain.
//!
//! Identifiers arrive from clients as raw strings; they are validated once at
//! the boundary and carried around as typed values afterwards.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

const MAX_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 32;

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a raw value. Surrounding whitespace is trimmed.
            pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValueObjectError::Empty($field));
                }
                if trimmed.chars().count() > $max {
                    return Err(ValueObjectError::TooLong {
                        field: $field,
                        max: $max,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValueObjectError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// Externally supplied room key.
    RoomId,
    "roomId",
    MAX_ID_LEN
);

string_value_object!(
    /// Opaque player identity handed over by the auth provider.
    PlayerId,
    "playerId",
    MAX_ID_LEN
);

string_value_object!(
    /// Display name shown on the leaderboard.
    PlayerName,
    "playerName",
    MAX_NAME_LEN
);

string_value_object!(
    /// Question category key.
    CategoryId,
    "categoryId",
    MAX_ID_LEN
);

/// Server-assigned identity of one WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds from `self` until `later` (negative if `later` is earlier).
    pub fn elapsed_until(&self, later: Timestamp) -> i64 {
        later.0.saturating_sub(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_trims_whitespace() {
        // テスト項目: 前後の空白が取り除かれる
        // given (前提条件):
        let raw = "  R1 ";

        // when (操作):
        let room_id = RoomId::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(room_id.as_str(), "R1");
    }

    #[test]
    fn test_empty_values_are_rejected() {
        // テスト項目: 空文字列・空白のみの値はエラーになる
        // given (前提条件):
        let blank = "   ";

        // when (操作):
        let room = RoomId::new("");
        let name = PlayerName::new(blank);

        // then (期待する結果):
        assert_eq!(room, Err(ValueObjectError::Empty("roomId")));
        assert_eq!(name, Err(ValueObjectError::Empty("playerName")));
    }

    #[test]
    fn test_too_long_name_is_rejected() {
        // テスト項目: 上限を超える表示名はエラーになる
        // given (前提条件):
        let long_name = "a".repeat(MAX_NAME_LEN + 1);

        // when (操作):
        let result = PlayerName::try_from(long_name);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "playerName",
                max: MAX_NAME_LEN
            })
        );
    }

    #[test]
    fn test_timestamp_elapsed_until() {
        // テスト項目: 2 つのタイムスタンプ間の経過ミリ秒が計算される
        // given (前提条件):
        let start = Timestamp::new(1_000);

        // when (操作):
        let elapsed = start.elapsed_until(Timestamp::new(61_000));

        // then (期待する結果):
        assert_eq!(elapsed, 60_000);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}

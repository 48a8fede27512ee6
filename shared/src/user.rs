//! 用户记录模型

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_USERNAME;
use crate::date::locale_date_string;

// =========================================================
// UserId
// =========================================================

/// 远端存储分配的文档 ID，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =========================================================
// UserStatus
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    /// active <-> inactive
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的状态字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// =========================================================
// UserRecord
// =========================================================

/// 已通过校验的用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub added_date: DateTime<Utc>,
    pub status: UserStatus,
}

impl UserRecord {
    /// 不区分大小写的子串匹配：用户名、本地日期字符串或状态
    ///
    /// `term` 需已转为小写。
    pub fn matches_term<Tz: TimeZone>(&self, term: &str, tz: &Tz) -> bool
    where
        Tz::Offset: fmt::Display,
    {
        self.username.to_lowercase().contains(term)
            || locale_date_string(&self.added_date, tz).contains(term)
            || self.status.as_str().contains(term)
    }

    pub fn with_status(&self, status: UserStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// 创建用户时写入的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub added_date: DateTime<Utc>,
    pub status: UserStatus,
}

impl NewUser {
    /// "Add User" 使用的固定默认值
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            added_date: now,
            status: UserStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: UserStatus) -> UserRecord {
        UserRecord {
            id: UserId::new("u1"),
            username: name.to_string(),
            added_date: Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap(),
            status,
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [UserStatus::Active, UserStatus::Inactive] {
            assert_eq!(status.as_str().parse::<UserStatus>(), Ok(status));
        }
        assert!("banned".parse::<UserStatus>().is_err());
        assert!("Active".parse::<UserStatus>().is_err());
    }

    #[test]
    fn toggled_flips_status() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(UserStatus::Inactive.toggled(), UserStatus::Active);
    }

    #[test]
    fn matches_username_case_insensitively() {
        let r = record("Alice Smith", UserStatus::Active);
        assert!(r.matches_term("alice", &Utc));
        assert!(r.matches_term("e sm", &Utc));
        assert!(!r.matches_term("bob", &Utc));
    }

    #[test]
    fn matches_locale_date_and_status() {
        let r = record("Alice", UserStatus::Inactive);
        assert!(r.matches_term("1/9/2024", &Utc));
        assert!(r.matches_term("inact", &Utc));
        // "active" 是 "inactive" 的子串
        assert!(r.matches_term("active", &Utc));
    }

    #[test]
    fn default_new_user() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let user = NewUser::default_at(now);
        assert_eq!(user.username, "New User");
        assert_eq!(user.added_date, now);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&UserStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }
}

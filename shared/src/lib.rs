//! SkyRoster 共享模型
//!
//! 前端与服务层共用的纯领域模型，不做任何 I/O：
//! - `user`: 用户记录及其状态
//! - `date`: 日历日窗口与本地日期渲染
//! - `table`: 用户表格的视图状态（过滤、排序、变更台账）
//! - `weather`: 天气类别与天气报告结构

pub mod date;
pub mod table;
pub mod user;
pub mod weather;

pub use date::{DayWindow, locale_date_string, parse_date_input};
pub use table::{MutationAck, MutationKind, MutationState, SortColumn, SortDirection, UserTable};
pub use user::{NewUser, UserId, UserRecord, UserStatus};
pub use weather::{WeatherCategory, WeatherDisplay, WeatherReport};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 用户集合名称
pub const USERS_COLLECTION: &str = "users";

/// 远端文档中的字段名
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_ADDED_DATE: &str = "addedDate";
pub const FIELD_STATUS: &str = "status";

/// "Add User" 创建的默认用户名
pub const DEFAULT_USERNAME: &str = "New User";

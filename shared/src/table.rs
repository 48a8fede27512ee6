//! 用户表格视图状态
//!
//! `all_users` 是最近一次从远端读取的活跃用户快照，
//! `visible_users` 始终是它经过过滤（子集）与排序（排列）后的结果。
//! 搜索与日期过滤互斥：每次都从 `all_users` 重新计算。
//!
//! 删除与状态切换不做乐观修改：先 `begin` 标记行为待定，
//! 收到远端确认后 `commit` 才改写两份序列，失败则 `fail` 且不触碰数据。

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use chrono::{Local, NaiveDate, TimeZone};

use crate::date::DayWindow;
use crate::user::{UserId, UserRecord, UserStatus};

// =========================================================
// 排序
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// 可排序的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Username,
    AddedDate,
    Status,
}

impl SortColumn {
    /// 按原始字段值比较
    fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            SortColumn::Username => a.username.cmp(&b.username),
            SortColumn::AddedDate => a.added_date.cmp(&b.added_date),
            SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Username => "UserName",
            SortColumn::AddedDate => "Added Date",
            SortColumn::Status => "Status",
        }
    }
}

// =========================================================
// 变更台账
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    ToggleStatus,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Delete => f.write_str("delete"),
            MutationKind::ToggleStatus => f.write_str("toggle status"),
        }
    }
}

/// 单行的变更状态；已提交的变更不保留记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    Pending(MutationKind),
    Failed { kind: MutationKind, message: String },
}

/// 远端对一次变更的确认
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationAck {
    Deleted(UserId),
    /// 远端返回的最新记录
    Updated(UserRecord),
}

impl MutationAck {
    pub fn id(&self) -> &UserId {
        match self {
            MutationAck::Deleted(id) => id,
            MutationAck::Updated(record) => &record.id,
        }
    }
}

// =========================================================
// UserTable
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct UserTable {
    all_users: Vec<UserRecord>,
    visible_users: Vec<UserRecord>,
    search_term: String,
    selected_date: Option<NaiveDate>,
    sort_column: Option<SortColumn>,
    sort_direction: SortDirection,
    mutations: HashMap<UserId, MutationState>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用远端快照替换全部数据，只保留活跃用户
    ///
    /// 过滤条件、排序列与变更台账一并清空；排序方向保持不变。
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = UserRecord>) {
        self.all_users = records
            .into_iter()
            .filter(|r| r.status == UserStatus::Active)
            .collect();
        self.visible_users = self.all_users.clone();
        self.search_term.clear();
        self.selected_date = None;
        self.sort_column = None;
        self.mutations.clear();
    }

    /// 按本地时区进行搜索
    pub fn search(&mut self, term: &str) {
        self.search_in(term, &Local);
    }

    /// 可见行按 `all_users` 原顺序重建，排序列随之清空
    pub fn search_in<Tz: TimeZone>(&mut self, term: &str, tz: &Tz)
    where
        Tz::Offset: fmt::Display,
    {
        self.search_term = term.to_lowercase();
        self.sort_column = None;
        let term = self.search_term.as_str();
        self.visible_users = self
            .all_users
            .iter()
            .filter(|r| r.matches_term(term, tz))
            .cloned()
            .collect();
    }

    /// 按本地时区的日历日过滤
    pub fn filter_by_date(&mut self, date: NaiveDate) {
        self.filter_by_date_in(date, &Local);
    }

    pub fn filter_by_date_in<Tz: TimeZone>(&mut self, date: NaiveDate, tz: &Tz) {
        let window = DayWindow::for_date(date, tz);
        self.selected_date = Some(date);
        self.sort_column = None;
        self.visible_users = self
            .all_users
            .iter()
            .filter(|r| window.contains(&r.added_date))
            .cloned()
            .collect();
    }

    /// 按列排序当前可见行，然后翻转方向供下次使用
    ///
    /// 先稳定升序再整体反转，因此对同一列连续调用两次得到的正好是第一次结果的逆序。
    pub fn sort_by(&mut self, column: SortColumn) {
        self.visible_users.sort_by(|a, b| column.compare(a, b));
        if self.sort_direction == SortDirection::Descending {
            self.visible_users.reverse();
        }
        self.sort_column = Some(column);
        self.sort_direction = self.sort_direction.flipped();
    }

    // --- 变更台账 ---

    /// 标记某行的变更开始；该行已有待定变更时返回 false
    pub fn begin(&mut self, id: &UserId, kind: MutationKind) -> bool {
        if matches!(self.mutations.get(id), Some(MutationState::Pending(_))) {
            return false;
        }
        self.mutations
            .insert(id.clone(), MutationState::Pending(kind));
        true
    }

    /// 应用远端确认
    ///
    /// 只改写已存在的行，不会凭确认凭空插入记录。
    pub fn commit(&mut self, ack: MutationAck) {
        self.mutations.remove(ack.id());
        match ack {
            MutationAck::Deleted(id) => {
                self.all_users.retain(|r| r.id != id);
                self.visible_users.retain(|r| r.id != id);
            }
            MutationAck::Updated(record) => {
                for list in [&mut self.all_users, &mut self.visible_users] {
                    if let Some(row) = list.iter_mut().find(|r| r.id == record.id) {
                        *row = record.clone();
                    }
                }
            }
        }
    }

    /// 记录失败，数据保持不变
    pub fn fail(&mut self, id: &UserId, message: impl Into<String>) {
        let kind = match self.mutations.get(id) {
            Some(MutationState::Pending(kind)) => *kind,
            Some(MutationState::Failed { kind, .. }) => *kind,
            None => return,
        };
        self.mutations.insert(
            id.clone(),
            MutationState::Failed {
                kind,
                message: message.into(),
            },
        );
    }

    // --- Accessors ---

    pub fn all_users(&self) -> &[UserRecord] {
        &self.all_users
    }

    pub fn visible_users(&self) -> &[UserRecord] {
        &self.visible_users
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn sort_column(&self) -> Option<SortColumn> {
        self.sort_column
    }

    /// 下一次排序将使用的方向
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn mutation_state(&self, id: &UserId) -> Option<&MutationState> {
        self.mutations.get(id)
    }

    pub fn is_pending(&self, id: &UserId) -> bool {
        matches!(self.mutations.get(id), Some(MutationState::Pending(_)))
    }

    pub fn find(&self, id: &UserId) -> Option<&UserRecord> {
        self.all_users.iter().find(|r| &r.id == id)
    }
}

#[cfg(test)]
mod tests;

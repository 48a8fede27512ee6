use super::*;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

// =========================================================
// 辅助函数
// =========================================================

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn user(id: &str, name: &str, added: DateTime<Utc>, status: UserStatus) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        username: name.to_string(),
        added_date: added,
        status,
    }
}

fn sample() -> Vec<UserRecord> {
    vec![
        user("a", "Charlie", at(2024, 3, 15, 9), UserStatus::Active),
        user("b", "alice", at(2024, 3, 14, 23), UserStatus::Active),
        user("c", "Bob", at(2024, 3, 15, 0), UserStatus::Active),
        user("d", "Dave", at(2024, 3, 16, 0), UserStatus::Active),
        user("e", "Eve", at(2024, 3, 15, 12), UserStatus::Inactive),
    ]
}

fn loaded() -> UserTable {
    let mut table = UserTable::new();
    table.replace_all(sample());
    table
}

fn ids(records: &[UserRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// =========================================================
// 加载
// =========================================================

#[test]
fn replace_all_keeps_only_active_users() {
    let table = loaded();
    assert_eq!(ids(table.all_users()), vec!["a", "b", "c", "d"]);
    assert_eq!(table.all_users(), table.visible_users());
}

#[test]
fn replace_all_discards_filters_and_ledger() {
    let mut table = loaded();
    table.search_in("bob", &Utc);
    table.begin(&UserId::new("a"), MutationKind::Delete);

    table.replace_all(sample());

    assert_eq!(table.search_term(), "");
    assert_eq!(table.selected_date(), None);
    assert_eq!(table.visible_users().len(), 4);
    assert!(table.mutation_state(&UserId::new("a")).is_none());
}

// =========================================================
// 搜索
// =========================================================

#[test]
fn empty_search_restores_all_users() {
    let mut table = loaded();
    table.search_in("bo", &Utc);
    assert_eq!(ids(table.visible_users()), vec!["c"]);

    table.search_in("", &Utc);
    let visible: HashSet<_> = table.visible_users().iter().map(|r| &r.id).collect();
    let all: HashSet<_> = table.all_users().iter().map(|r| &r.id).collect();
    assert_eq!(visible, all);
}

#[test]
fn search_is_case_insensitive_and_stores_lowercased_term() {
    let mut table = loaded();
    table.search_in("ALI", &Utc);
    assert_eq!(table.search_term(), "ali");
    assert_eq!(ids(table.visible_users()), vec!["b"]);
}

#[test]
fn search_matches_locale_date() {
    let mut table = loaded();
    table.search_in("3/15/2024", &Utc);
    assert_eq!(ids(table.visible_users()), vec!["a", "c"]);
}

#[test]
fn search_after_sort_does_not_resort() {
    let mut table = loaded();
    table.sort_by(SortColumn::Username);
    table.search_in("", &Utc);
    // 搜索总是以 all_users 的顺序为准
    assert_eq!(ids(table.visible_users()), vec!["a", "b", "c", "d"]);
}

#[test]
fn rebuilding_visible_rows_forgets_sort_column() {
    let mut table = loaded();
    table.sort_by(SortColumn::Username);
    assert_eq!(table.sort_column(), Some(SortColumn::Username));
    table.search_in("a", &Utc);
    assert_eq!(table.sort_column(), None);

    table.sort_by(SortColumn::AddedDate);
    table.filter_by_date_in(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &Utc);
    assert_eq!(table.sort_column(), None);

    table.sort_by(SortColumn::Status);
    table.replace_all(sample());
    assert_eq!(table.sort_column(), None);
    // 方向不随之重置：三次排序后下一次为降序
    assert_eq!(table.sort_direction(), SortDirection::Descending);
}

// =========================================================
// 日期过滤
// =========================================================

#[test]
fn date_filter_keeps_exactly_the_day_window() {
    let mut table = loaded();
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    table.filter_by_date_in(day, &Utc);

    let window = DayWindow::for_date(day, &Utc);
    assert!(table.visible_users().iter().all(|r| window.contains(&r.added_date)));
    let excluded: Vec<_> = table
        .all_users()
        .iter()
        .filter(|r| !table.visible_users().contains(r))
        .collect();
    assert!(excluded.iter().all(|r| !window.contains(&r.added_date)));
    // 00:00 包含在内，次日 00:00 不包含
    assert_eq!(ids(table.visible_users()), vec!["a", "c"]);
    assert_eq!(table.selected_date(), Some(day));
}

#[test]
fn date_filter_ignores_active_search_term() {
    let mut table = loaded();
    table.search_in("charlie", &Utc);
    table.filter_by_date_in(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &Utc);
    assert_eq!(ids(table.visible_users()), vec!["a", "c"]);
}

#[test]
fn search_ignores_active_date_filter() {
    let mut table = loaded();
    table.filter_by_date_in(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(), &Utc);
    assert_eq!(ids(table.visible_users()), vec!["d"]);
    table.search_in("a", &Utc);
    assert_eq!(ids(table.visible_users()), vec!["a", "b", "c", "d"]);
}

#[test]
fn date_filter_with_no_matches_is_empty() {
    let mut table = loaded();
    table.filter_by_date_in(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &Utc);
    assert!(table.visible_users().is_empty());
    assert_eq!(table.all_users().len(), 4);
}

// =========================================================
// 排序
// =========================================================

#[test]
fn sort_ascending_then_flip_direction() {
    let mut table = loaded();
    assert_eq!(table.sort_direction(), SortDirection::Ascending);

    table.sort_by(SortColumn::AddedDate);
    assert_eq!(ids(table.visible_users()), vec!["b", "c", "a", "d"]);
    assert_eq!(table.sort_direction(), SortDirection::Descending);
    assert_eq!(table.sort_column(), Some(SortColumn::AddedDate));
}

#[test]
fn sorting_twice_reverses_first_result() {
    let mut table = loaded();
    table.sort_by(SortColumn::Username);
    let first: Vec<_> = table.visible_users().to_vec();

    table.sort_by(SortColumn::Username);
    let mut expected = first.clone();
    expected.reverse();
    assert_eq!(table.visible_users(), expected.as_slice());
}

#[test]
fn sorting_twice_reverses_even_with_ties() {
    let mut table = UserTable::new();
    table.replace_all(vec![
        user("1", "same", at(2024, 1, 1, 0), UserStatus::Active),
        user("2", "same", at(2024, 1, 2, 0), UserStatus::Active),
        user("3", "other", at(2024, 1, 3, 0), UserStatus::Active),
    ]);

    table.sort_by(SortColumn::Status);
    let first = ids(table.visible_users())
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    table.sort_by(SortColumn::Status);
    let mut second = ids(table.visible_users())
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    second.reverse();
    assert_eq!(first, second);
}

#[test]
fn username_sort_uses_raw_byte_order() {
    let mut table = loaded();
    table.sort_by(SortColumn::Username);
    // 大写字母排在小写字母之前
    assert_eq!(ids(table.visible_users()), vec!["c", "a", "d", "b"]);
}

#[test]
fn sort_only_reorders_visible_rows() {
    let mut table = loaded();
    table.filter_by_date_in(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &Utc);
    table.sort_by(SortColumn::Username);
    assert_eq!(ids(table.visible_users()), vec!["c", "a"]);
    assert_eq!(ids(table.all_users()), vec!["a", "b", "c", "d"]);
}

// =========================================================
// 变更台账
// =========================================================

#[test]
fn committed_delete_removes_row_everywhere() {
    let mut table = loaded();
    let id = UserId::new("c");
    assert!(table.begin(&id, MutationKind::Delete));
    assert!(table.is_pending(&id));

    table.commit(MutationAck::Deleted(id.clone()));

    assert!(table.find(&id).is_none());
    assert!(table.visible_users().iter().all(|r| r.id != id));
    assert!(table.mutation_state(&id).is_none());
}

#[test]
fn failed_delete_leaves_data_unchanged() {
    let mut table = loaded();
    let before_all = table.all_users().to_vec();
    let before_visible = table.visible_users().to_vec();
    let id = UserId::new("c");

    table.begin(&id, MutationKind::Delete);
    table.fail(&id, "permission denied");

    assert_eq!(table.all_users(), before_all.as_slice());
    assert_eq!(table.visible_users(), before_visible.as_slice());
    assert_eq!(
        table.mutation_state(&id),
        Some(&MutationState::Failed {
            kind: MutationKind::Delete,
            message: "permission denied".to_string()
        })
    );
}

#[test]
fn committed_toggle_updates_only_that_row() {
    let mut table = loaded();
    table.search_in("", &Utc);
    let id = UserId::new("a");
    let before = table.all_users().to_vec();

    table.begin(&id, MutationKind::ToggleStatus);
    let updated = table.find(&id).unwrap().with_status(UserStatus::Inactive);
    table.commit(MutationAck::Updated(updated));

    for list in [table.all_users(), table.visible_users()] {
        let row = list.iter().find(|r| r.id == id).unwrap();
        assert_eq!(row.status, UserStatus::Inactive);
        for (now, was) in list.iter().zip(before.iter()).filter(|(r, _)| r.id != id) {
            assert_eq!(now, was);
        }
    }
}

#[test]
fn begin_rejects_a_second_pending_mutation() {
    let mut table = loaded();
    let id = UserId::new("a");
    assert!(table.begin(&id, MutationKind::ToggleStatus));
    assert!(!table.begin(&id, MutationKind::Delete));
    assert_eq!(
        table.mutation_state(&id),
        Some(&MutationState::Pending(MutationKind::ToggleStatus))
    );
}

#[test]
fn begin_after_failure_retries() {
    let mut table = loaded();
    let id = UserId::new("a");
    table.begin(&id, MutationKind::Delete);
    table.fail(&id, "offline");
    assert!(table.begin(&id, MutationKind::Delete));
    assert!(table.is_pending(&id));
}

#[test]
fn ack_for_unknown_row_is_ignored() {
    let mut table = loaded();
    let ghost = user("zzz", "Ghost", at(2024, 3, 15, 1), UserStatus::Active);
    table.commit(MutationAck::Updated(ghost));
    assert_eq!(table.all_users().len(), 4);
    assert!(table.find(&UserId::new("zzz")).is_none());
}

#[test]
fn update_ack_patches_row_hidden_by_filter() {
    let mut table = loaded();
    table.search_in("charlie", &Utc);
    let id = UserId::new("b");
    table.begin(&id, MutationKind::ToggleStatus);
    let updated = table.find(&id).unwrap().with_status(UserStatus::Inactive);
    table.commit(MutationAck::Updated(updated));

    assert_eq!(table.find(&id).unwrap().status, UserStatus::Inactive);
    assert_eq!(ids(table.visible_users()), vec!["a"]);
}

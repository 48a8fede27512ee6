//! 日期工具模块
//!
//! 提供两类能力：
//! - `DayWindow`: 某个日历日在指定时区下的半开区间 `[00:00, 次日 00:00)`
//! - 本地日期渲染与 `<input type="date">` 值解析

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

// =========================================================
// DayWindow - 日历日窗口
// =========================================================

/// 一个日历日对应的 UTC 时间区间，左闭右开
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// 计算 `date` 在时区 `tz` 下的窗口
    ///
    /// 本地午夜不存在时（夏令时跳变）取其后最早的有效时刻。
    pub fn for_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        Self {
            start: local_midnight(date, tz),
            end: local_midnight(next, tz),
        }
    }

    #[inline]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let mut naive: NaiveDateTime = date.and_time(NaiveTime::default());
    // 夏令时跳变最长一小时，逐分钟向后探测足够覆盖
    for _ in 0..=120 {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => naive += chrono::Duration::minutes(1),
        }
    }
    Utc.from_utc_datetime(&naive)
}

// =========================================================
// 渲染与解析
// =========================================================

/// 以 `M/D/YYYY` 渲染时刻在 `tz` 下的日期（不补零）
pub fn locale_date_string<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

/// 解析日期输入框的 `YYYY-MM-DD` 值
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_in_utc_spans_one_day() {
        let w = DayWindow::for_date(date(2024, 3, 15), &Utc);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_is_half_open() {
        let w = DayWindow::for_date(date(2024, 3, 15), &Utc);
        assert!(w.contains(&w.start));
        assert!(!w.contains(&w.end));
        assert!(w.contains(&(w.end - chrono::Duration::nanoseconds(1))));
        assert!(!w.contains(&(w.start - chrono::Duration::seconds(1))));
    }

    #[test]
    fn window_follows_timezone_offset() {
        // UTC+8 的 3 月 15 日从 UTC 3 月 14 日 16:00 开始
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let w = DayWindow::for_date(date(2024, 3, 15), &tz);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 14, 16, 0, 0).unwrap());
        assert_eq!(w.end - w.start, chrono::Duration::days(1));
    }

    #[test]
    fn window_crosses_month_end() {
        let w = DayWindow::for_date(date(2024, 2, 29), &Utc);
        assert_eq!(w.end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_starts_after_skipped_midnight() {
        // 圣保罗 2018-11-04 00:00 直接跳到 01:00 (UTC-2)
        let tz = chrono_tz::America::Sao_Paulo;
        let w = DayWindow::for_date(date(2018, 11, 4), &tz);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
        assert!(!w.contains(&Utc.with_ymd_and_hms(2018, 11, 4, 2, 59, 0).unwrap()));
        assert_eq!(w.end, Utc.with_ymd_and_hms(2018, 11, 5, 2, 0, 0).unwrap());
        assert_eq!(w.end - w.start, chrono::Duration::hours(23));

        // 前一天的窗口与之首尾相接
        let prev = DayWindow::for_date(date(2018, 11, 3), &tz);
        assert_eq!(prev.end, w.start);
    }

    #[test]
    fn window_uses_earliest_of_repeated_midnight() {
        // 哈瓦那 2023-11-05 01:00 回拨到 00:00，午夜出现两次
        let tz = chrono_tz::America::Havana;
        let w = DayWindow::for_date(date(2023, 11, 5), &tz);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2023, 11, 5, 4, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2023, 11, 6, 5, 0, 0).unwrap());
        assert_eq!(w.end - w.start, chrono::Duration::hours(25));

        let prev = DayWindow::for_date(date(2023, 11, 4), &tz);
        assert_eq!(prev.end, w.start);
    }

    #[test]
    fn locale_string_has_no_padding() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(locale_date_string(&t, &Utc), "3/5/2024");
    }

    #[test]
    fn locale_string_uses_target_timezone() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 20, 0, 0).unwrap();
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(locale_date_string(&t, &tz), "3/6/2024");
    }

    #[test]
    fn parses_date_input_values() {
        assert_eq!(parse_date_input("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("15/03/2024"), None);
    }
}

//! Activity trends over a time window.

use crate::note::NoteRecord;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Instant;

/// Longest writing streak that is looked for.
pub const MAX_STREAK_DAYS: usize = 365;

/// Time window ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeSpan {
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "3m")]
    Quarter,
    #[serde(rename = "6m")]
    HalfYear,
    #[default]
    #[serde(rename = "1y")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl TimeSpan {
    /// Parse a keyword, falling back to one year for anything unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "1w" => TimeSpan::Week,
            "1m" => TimeSpan::Month,
            "3m" => TimeSpan::Quarter,
            "6m" => TimeSpan::HalfYear,
            "1y" => TimeSpan::Year,
            "all" => TimeSpan::All,
            other => {
                tracing::debug!(timespan = other, "unknown timespan, using 1y");
                TimeSpan::Year
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSpan::Week => "1w",
            TimeSpan::Month => "1m",
            TimeSpan::Quarter => "3m",
            TimeSpan::HalfYear => "6m",
            TimeSpan::Year => "1y",
            TimeSpan::All => "all",
        }
    }

    /// Start of the window. `All` starts at the oldest note, or `now` when
    /// there are none.
    pub fn start(&self, now: DateTime<Utc>, files: &[NoteRecord]) -> DateTime<Utc> {
        let months_back = |n: u32| {
            now.checked_sub_months(Months::new(n))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };
        match self {
            TimeSpan::Week => now - Duration::days(7),
            TimeSpan::Month => months_back(1),
            TimeSpan::Quarter => months_back(3),
            TimeSpan::HalfYear => months_back(6),
            TimeSpan::Year => months_back(12),
            TimeSpan::All => files.iter().map(|f| f.modified_at).min().unwrap_or(now),
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bucket size of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl Granularity {
    /// Parse a keyword, falling back to months for anything unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "day" => Granularity::Day,
            "week" => Granularity::Week,
            "month" => Granularity::Month,
            "quarter" => Granularity::Quarter,
            other => {
                tracing::debug!(granularity = other, "unknown granularity, using month");
                Granularity::Month
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
        }
    }

    /// Bucket key of a date: `YYYY-MM-DD`, ISO `YYYY-Www`, `YYYY-MM` or `YYYY-Qn`.
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => day_key(date),
            Granularity::Week => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Granularity::Month => month_key(date),
            Granularity::Quarter => format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of notes modified in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub period: String,
    pub count: usize,
}

/// How often a tag occurs in the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTrend {
    pub tag: String,
    pub count: usize,
    /// Share of notes in the window carrying the tag, as a percentage.
    pub growth_rate: f64,
}

/// Activity over a time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsAnalysis {
    pub timespan: TimeSpan,
    pub granularity: Granularity,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Notes modified inside the window.
    pub total_files: usize,
    /// Periods with activity, oldest first.
    pub timeline: Vec<TimelinePoint>,
    pub active_days: usize,
    pub total_days: i64,
    pub activity_percentage: f64,
    pub peak_period: Option<String>,
    pub peak_files: usize,
    pub avg_files_per_period: f64,
    /// Average notes per period times 100.
    pub growth_rate: f64,
    pub most_active_day: Option<String>,
    pub most_active_month: Option<String>,
    /// Consecutive active days ending today.
    pub writing_streak: usize,
    pub tag_trends: Vec<TagTrend>,
}

/// Analyze activity over a window ending at the current time.
pub fn analyze_trends(files: &[NoteRecord], timespan: &str, granularity: &str) -> TrendsAnalysis {
    analyze_trends_at(
        files,
        TimeSpan::parse(timespan),
        Granularity::parse(granularity),
        Utc::now(),
    )
}

/// Analyze activity over the window `[start, now)`.
pub fn analyze_trends_at(
    files: &[NoteRecord],
    timespan: TimeSpan,
    granularity: Granularity,
    now: DateTime<Utc>,
) -> TrendsAnalysis {
    let started = Instant::now();
    let start = timespan.start(now, files);

    let in_range: Vec<&NoteRecord> = files
        .iter()
        .filter(|f| f.modified_at >= start && f.modified_at < now)
        .collect();
    let total_files = in_range.len();

    let mut day_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut month_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut period_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut tag_counts: HashMap<String, usize> = HashMap::new();

    for file in &in_range {
        let date = file.modified_at.date_naive();
        *day_counts.entry(day_key(date)).or_insert(0) += 1;
        *month_counts.entry(month_key(date)).or_insert(0) += 1;
        *period_counts.entry(granularity.key(date)).or_insert(0) += 1;

        for tag in file.tags() {
            *tag_counts.entry(tag).or_insert(0) += 1;
        }
    }

    let active_days = day_counts.len();
    let total_days = (now - start).num_days().max(1);
    let activity_percentage = active_days as f64 / total_days as f64 * 100.0;

    let (peak_period, peak_files) = match busiest(&period_counts) {
        Some((key, count)) => (Some(key), count),
        None => (None, 0),
    };

    let avg_files_per_period = if period_counts.is_empty() {
        0.0
    } else {
        total_files as f64 / period_counts.len() as f64
    };

    let writing_streak = writing_streak(&day_counts, now.date_naive());

    let mut tag_trends: Vec<TagTrend> = tag_counts
        .into_iter()
        .map(|(tag, count)| TagTrend {
            tag,
            count,
            growth_rate: if total_files == 0 {
                0.0
            } else {
                count as f64 / total_files as f64 * 100.0
            },
        })
        .collect();
    tag_trends.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    tracing::debug!(
        timespan = %timespan,
        granularity = %granularity,
        files = total_files,
        elapsed = ?started.elapsed(),
        "trend analysis"
    );

    TrendsAnalysis {
        timespan,
        granularity,
        start_date: start,
        end_date: now,
        total_files,
        timeline: period_counts
            .into_iter()
            .map(|(period, count)| TimelinePoint { period, count })
            .collect(),
        active_days,
        total_days,
        activity_percentage,
        peak_period,
        peak_files,
        avg_files_per_period,
        growth_rate: avg_files_per_period * 100.0,
        most_active_day: busiest(&day_counts).map(|(key, _)| key),
        most_active_month: busiest(&month_counts).map(|(key, _)| key),
        writing_streak,
        tag_trends,
    }
}

/// Key with the highest count; ties go to the smallest key.
fn busiest(counts: &BTreeMap<String, usize>) -> Option<(String, usize)> {
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries.first().map(|(key, count)| ((*key).clone(), **count))
}

fn writing_streak(day_counts: &BTreeMap<String, usize>, today: NaiveDate) -> usize {
    let mut streak = 0;
    let mut day = today;
    while streak < MAX_STREAK_DAYS && day_counts.contains_key(&day_key(day)) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn note(path: &str, content: &str, age: Duration) -> NoteRecord {
        NoteRecord::parse(path, content).with_modified_at(now() - age)
    }

    fn sample() -> Vec<NoteRecord> {
        vec![
            note("a.md", "---\ntags: [rust]\n---\n", Duration::hours(1)),
            note("b.md", "---\ntags: [rust, cli]\n---\n", Duration::days(1)),
            note("c.md", "", Duration::days(1) + Duration::hours(2)),
            note("d.md", "", Duration::days(3)),
            note("old.md", "---\ntags: [old]\n---\n", Duration::days(10)),
        ]
    }

    #[test]
    fn test_keyword_fallbacks() {
        assert_eq!(TimeSpan::parse("3m"), TimeSpan::Quarter);
        assert_eq!(TimeSpan::parse("ALL"), TimeSpan::All);
        assert_eq!(TimeSpan::parse("2y"), TimeSpan::Year);
        assert_eq!(Granularity::parse("week"), Granularity::Week);
        assert_eq!(Granularity::parse("hour"), Granularity::Month);
    }

    #[test]
    fn test_bucket_keys() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(Granularity::Day.key(date(2024, 5, 10)), "2024-05-10");
        assert_eq!(Granularity::Week.key(date(2024, 1, 1)), "2024-W01");
        assert_eq!(Granularity::Week.key(date(2023, 1, 1)), "2022-W52");
        assert_eq!(Granularity::Month.key(date(2024, 5, 10)), "2024-05");
        assert_eq!(Granularity::Quarter.key(date(2024, 5, 10)), "2024-Q2");
        assert_eq!(Granularity::Quarter.key(date(2024, 12, 31)), "2024-Q4");
    }

    #[test]
    fn test_week_window_by_day() {
        let trends = analyze_trends_at(&sample(), TimeSpan::Week, Granularity::Day, now());

        assert_eq!(trends.total_files, 4);
        assert_eq!(
            trends.timeline,
            vec![
                TimelinePoint { period: "2024-06-12".to_string(), count: 1 },
                TimelinePoint { period: "2024-06-14".to_string(), count: 2 },
                TimelinePoint { period: "2024-06-15".to_string(), count: 1 },
            ]
        );
        assert_eq!(trends.active_days, 3);
        assert_eq!(trends.total_days, 7);
        assert!((trends.activity_percentage - 3.0 / 7.0 * 100.0).abs() < 1e-9);
        assert_eq!(trends.peak_period.as_deref(), Some("2024-06-14"));
        assert_eq!(trends.peak_files, 2);
        assert!((trends.avg_files_per_period - 4.0 / 3.0).abs() < 1e-9);
        assert!((trends.growth_rate - 400.0 / 3.0).abs() < 1e-9);
        assert_eq!(trends.most_active_day.as_deref(), Some("2024-06-14"));
        assert_eq!(trends.most_active_month.as_deref(), Some("2024-06"));
        assert_eq!(trends.writing_streak, 2);
    }

    #[test]
    fn test_tag_trends() {
        let trends = analyze_trends_at(&sample(), TimeSpan::Week, Granularity::Day, now());
        assert_eq!(trends.tag_trends.len(), 2);
        assert_eq!(trends.tag_trends[0].tag, "rust");
        assert_eq!(trends.tag_trends[0].count, 2);
        assert_eq!(trends.tag_trends[0].growth_rate, 50.0);
        assert_eq!(trends.tag_trends[1].tag, "cli");
        assert_eq!(trends.tag_trends[1].growth_rate, 25.0);
    }

    #[test]
    fn test_window_excludes_old_and_future_notes() {
        let mut files = sample();
        files.push(NoteRecord::parse("future.md", "").with_modified_at(now() + Duration::hours(1)));

        let trends = analyze_trends_at(&files, TimeSpan::Week, Granularity::Day, now());
        assert_eq!(trends.total_files, 4);
        assert!(trends.timeline.iter().all(|p| p.period.as_str() >= "2024-06-08"));
    }

    #[test]
    fn test_all_starts_at_oldest_note() {
        let trends = analyze_trends_at(&sample(), TimeSpan::All, Granularity::Month, now());
        assert_eq!(trends.start_date, now() - Duration::days(10));
        assert_eq!(trends.total_files, 5);
        assert_eq!(trends.timeline.len(), 1);
    }

    #[test]
    fn test_writing_streak_is_capped() {
        let files: Vec<NoteRecord> = (0..400)
            .map(|i| note(&format!("day{}.md", i), "", Duration::days(i) + Duration::hours(1)))
            .collect();

        let trends = analyze_trends_at(&files, TimeSpan::All, Granularity::Day, now());
        assert_eq!(trends.active_days, 400);
        assert_eq!(trends.writing_streak, MAX_STREAK_DAYS);
        assert_eq!(trends.writing_streak, 365);
    }

    #[test]
    fn test_empty_input() {
        let trends = analyze_trends_at(&[], TimeSpan::All, Granularity::Month, now());
        assert_eq!(trends.total_files, 0);
        assert_eq!(trends.peak_period, None);
        assert_eq!(trends.avg_files_per_period, 0.0);
        assert_eq!(trends.activity_percentage, 0.0);
        assert_eq!(trends.writing_streak, 0);
    }

    #[test]
    fn test_peak_tie_breaks_by_key() {
        let files = vec![
            note("a.md", "", Duration::days(2)),
            note("b.md", "", Duration::hours(1)),
        ];
        let trends = analyze_trends_at(&files, TimeSpan::Week, Granularity::Day, now());
        assert_eq!(trends.peak_period.as_deref(), Some("2024-06-13"));
    }
}

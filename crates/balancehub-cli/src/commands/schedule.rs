use std::path::{Path, PathBuf};

use balancehub_core::balance::BalancePreferences;
use balancehub_core::schedule::protected::hhmm;
use balancehub_core::schedule::{week_start_of, ProtectedTimeRule};
use balancehub_core::{BalanceWarning, Config, IntervalDraft, SessionContext};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use serde::Deserialize;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Check a schedule file for balance warnings
    Check {
        /// JSON schedule file
        #[arg(short, long)]
        file: PathBuf,
        /// Only check intervals starting on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print warnings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily or weekly hours summary for a schedule file
    Summary {
        /// JSON schedule file
        #[arg(short, long)]
        file: PathBuf,
        /// Summarise a single day instead of the week
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Expand a no-zone rule into concrete intervals
    Expand {
        /// Day of week, 0 = Sunday
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
        /// Generate only the first week
        #[arg(long)]
        once: bool,
        /// Sunday of week 0 (defaults to the current week)
        #[arg(long)]
        week_start: Option<NaiveDate>,
        /// Number of weeks to generate for recurring rules
        #[arg(long)]
        weeks: Option<u32>,
    },
}

/// On-disk schedule: intervals plus optional overrides of the config.
#[derive(Debug, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    week_start: Option<NaiveDate>,
    #[serde(default)]
    preferences: Option<BalancePreferences>,
    #[serde(default)]
    rules: Option<Vec<ProtectedTimeRule>>,
    #[serde(default, alias = "events")]
    intervals: Vec<IntervalDraft>,
}

fn load_session(path: &Path) -> Result<SessionContext, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let file: ScheduleFile = serde_json::from_str(&content)?;

    let mut config = Config::load()?;
    if let Some(preferences) = file.preferences {
        config.balance = preferences;
    }
    if let Some(rules) = file.rules {
        config.protection.rules = rules;
    }
    config.validate()?;

    let week_start = file.week_start.map(week_start_of).unwrap_or_else(|| {
        let first = file.intervals.iter().map(|i| i.start).min();
        week_start_of(first.unwrap_or_else(Utc::now).date_naive())
    });

    let mut session = SessionContext::from_config(&config, week_start);
    for draft in file.intervals {
        session.add_interval(draft)?;
    }
    tracing::debug!(
        intervals = session.intervals().count(),
        %week_start,
        "schedule loaded"
    );
    Ok(session)
}

fn print_warnings(warnings: &[BalanceWarning]) {
    if warnings.is_empty() {
        println!("schedule looks balanced");
        return;
    }
    for warning in warnings {
        let tag = match warning.severity() {
            balancehub_core::Severity::Warning => "warning",
            balancehub_core::Severity::Alert => "alert",
        };
        println!("[{tag}] {}", warning.message());
    }
}

fn hours(value: f64) -> String {
    format!("{value}h")
}

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |r| format!("{r}:1"))
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Check { file, date, json } => {
            let session = load_session(&file)?;
            let warnings = match date {
                Some(date) => session.check_day(date),
                None => session.check_health(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&warnings)?);
            } else {
                print_warnings(&warnings);
            }
        }
        ScheduleAction::Summary { file, date, json } => {
            let session = load_session(&file)?;
            match date {
                Some(date) => {
                    let summary = session.daily_summary(date);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        println!("{date}");
                        println!("  work:      {}", hours(summary.work_hours));
                        println!("  personal:  {}", hours(summary.personal_hours));
                        println!("  meetings:  {}", summary.meeting_count);
                        println!("  work/life: {}", ratio(summary.work_life_ratio));
                    }
                }
                None => {
                    let report = session.weekly_report();
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        for day in &report.days {
                            println!(
                                "{} {}  work {:>6}  personal {:>6}  meetings {}  no-zone conflicts {}",
                                day.date,
                                day.date.format("%a"),
                                hours(day.work_hours),
                                hours(day.personal_hours),
                                day.meeting_count,
                                day.no_zone_conflicts,
                            );
                        }
                        let totals = &report.totals;
                        println!(
                            "total          work {:>6}  personal {:>6}  meetings {}  no-zone conflicts {}  work/life {}",
                            hours(totals.work_hours),
                            hours(totals.personal_hours),
                            totals.meeting_count,
                            totals.no_zone_conflicts,
                            ratio(totals.work_life_ratio),
                        );
                    }
                }
            }
        }
        ScheduleAction::Expand {
            day,
            start,
            end,
            once,
            week_start,
            weeks,
        } => {
            let config = Config::load()?;
            let rule = ProtectedTimeRule::new(day, hhmm::parse(&start)?, hhmm::parse(&end)?, !once)?;
            let week_start = week_start_of(week_start.unwrap_or_else(|| Utc::now().date_naive()));
            let weeks = weeks.unwrap_or(config.protection.horizon_weeks);
            let intervals: Vec<_> = rule.expand(week_start, weeks).collect();
            println!("{}", serde_json::to_string_pretty(&intervals)?);
        }
    }
    Ok(())
}

use chrono::{Datelike, Days, NaiveDate};

use crate::{
    config::{DAYS_PER_YEAR, RolloverPolicy},
    core::clock::ClockAccumulator,
    types::{CalendarSnapshot, Side},
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEK_HEADER: &str = "Mo Tu We Th Fr Sa Su";
const GRID_WIDTH: usize = 20;
const CELL_WIDTH: usize = 2;
const CELL_STRIDE: usize = 3;
const FIRST_WEEK_ROW: usize = 2;

#[derive(Clone, Debug)]
pub struct ObserverClock {
    pub side: Side,
    pub label: &'static str,
    pub date: NaiveDate,
    pub accumulator: ClockAccumulator,
    pub age_years: u32,
    pub day_counter: u64,
    lines: Vec<String>,
    today_cell: Option<(usize, usize)>,
}

impl ObserverClock {
    pub fn new(side: Side, label: &'static str, date: NaiveDate, age_years: u32) -> Self {
        let mut clock = Self {
            side,
            label,
            date,
            accumulator: ClockAccumulator::new(),
            age_years,
            day_counter: 0,
            lines: Vec::new(),
            today_cell: None,
        };
        clock.refresh_display();
        clock
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            lines: self.lines.clone(),
            date: self.date,
            age_years: self.age_years,
            today_cell: self.today_cell,
        }
    }

    fn refresh_display(&mut self) {
        let (lines, today_cell) = render_month_view(self.date, self.age_years, self.label);
        self.lines = lines;
        self.today_cell = today_cell;
    }
}

/// Moves the calendar forward `days` and counts them toward the next birthday.
pub fn advance(clock: &mut ObserverClock, days: u64) {
    match clock.date.checked_add_days(Days::new(days)) {
        Some(date) => clock.date = date,
        None => log::warn!(
            "{:?} calendar cannot move past {}; holding date",
            clock.side,
            clock.date
        ),
    }
    clock.day_counter = clock.day_counter.saturating_add(days);
    if days > 1 {
        log::trace!("{:?} calendar jumped {} days to {}", clock.side, days, clock.date);
    }
    clock.refresh_display();
}

/// Converts accumulated days into years of age; returns how many years were added.
///
/// Earth folds 365 days per year until the counter is back in range. The ship,
/// unless the policy is unified, ages one year and drops the counter to zero.
pub fn rollover(clock: &mut ObserverClock, policy: RolloverPolicy) -> u32 {
    let year = u64::from(DAYS_PER_YEAR);
    let folds = clock.side == Side::Earth || policy == RolloverPolicy::Unified;
    let mut years = 0;
    if folds {
        while clock.day_counter > year {
            clock.day_counter -= year;
            years += 1;
        }
    } else if clock.day_counter > year {
        clock.day_counter = 0;
        years = 1;
    }
    if years > 0 {
        clock.age_years = clock.age_years.saturating_add(years);
        log::debug!(
            "{:?} observer is now {} ({} days toward next year)",
            clock.side,
            clock.age_years,
            clock.day_counter
        );
        clock.refresh_display();
    }
    years
}

pub fn render_month_grid(date: NaiveDate, age: u32, label: &str) -> Vec<String> {
    render_month_view(date, age, label).0
}

/// Labelled month grid with today's number blanked, plus the blanked cell's
/// row and column in the returned lines.
pub fn render_month_view(
    date: NaiveDate,
    age: u32,
    label: &str,
) -> (Vec<String>, Option<(usize, usize)>) {
    let mut grid = month_grid(date);
    let today_cell = locate_day(&grid, date.day()).map(|(row, col)| {
        blank_cell(&mut grid[row], col);
        (row + 1, col)
    });

    let mut lines = Vec::with_capacity(grid.len() + 3);
    lines.push(label.to_string());
    lines.extend(grid);
    lines.push(format!(
        " Today is: {} {}",
        MONTH_ABBR[date.month0() as usize],
        date.day()
    ));
    lines.push(format!("      Age: {}", age));
    (lines, today_cell)
}

/// Monday-first text grid for the month containing `date`: a centered title,
/// the weekday header, then one line per week with trailing blanks trimmed.
pub fn month_grid(date: NaiveDate) -> Vec<String> {
    let title = format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year());
    let pad = GRID_WIDTH.saturating_sub(title.len()) / 2;
    let mut lines = vec![format!("{}{}", " ".repeat(pad), title), WEEK_HEADER.to_string()];

    let first = date - Days::new(u64::from(date.day0()));
    let lead = first.weekday().num_days_from_monday() as usize;
    let days = days_in_month(date.year(), date.month());

    let mut week: Vec<String> = vec![" ".repeat(CELL_WIDTH); lead];
    for day in 1..=days {
        week.push(format!("{:>2}", day));
        if week.len() == 7 {
            lines.push(week.join(" ").trim_end().to_string());
            week.clear();
        }
    }
    if !week.is_empty() {
        lines.push(week.join(" ").trim_end().to_string());
    }
    lines
}

/// Finds the cell holding `day`. Single- and double-digit numbers share the
/// same right-aligned two-column cell, so matching is done per cell.
pub fn locate_day(grid: &[String], day: u32) -> Option<(usize, usize)> {
    grid.iter()
        .enumerate()
        .skip(FIRST_WEEK_ROW)
        .find_map(|(row, line)| {
            (0..7)
                .map(|slot| slot * CELL_STRIDE)
                .find(|&col| {
                    line.get(col..col + CELL_WIDTH)
                        .and_then(|cell| cell.trim().parse::<u32>().ok())
                        == Some(day)
                })
                .map(|col| (row, col))
        })
}

fn blank_cell(line: &mut String, col: usize) {
    line.replace_range(col..col + CELL_WIDTH, &" ".repeat(CELL_WIDTH));
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn earth(counter: u64, age: u32) -> ObserverClock {
        let mut clock = ObserverClock::new(Side::Earth, "  Earth's calendar", ymd(2024, 1, 1), age);
        clock.day_counter = counter;
        clock
    }

    fn ship(counter: u64, age: u32) -> ObserverClock {
        let mut clock = ObserverClock::new(Side::Ship, "Spaceship's calendar", ymd(2024, 1, 1), age);
        clock.day_counter = counter;
        clock
    }

    mod month_grid_fn {
        use super::*;

        #[test]
        fn october_2026_starts_on_thursday() {
            let grid = month_grid(ymd(2026, 10, 18));
            assert_eq!(
                grid,
                vec![
                    "    October 2026",
                    "Mo Tu We Th Fr Sa Su",
                    "          1  2  3  4",
                    " 5  6  7  8  9 10 11",
                    "12 13 14 15 16 17 18",
                    "19 20 21 22 23 24 25",
                    "26 27 28 29 30 31",
                ]
            );
        }

        #[test]
        fn february_2021_fills_four_rows() {
            let grid = month_grid(ymd(2021, 2, 1));
            assert_eq!(grid.len(), 6);
            assert_eq!(grid[0], "   February 2021");
            assert_eq!(grid[2], " 1  2  3  4  5  6  7");
            assert_eq!(grid[5], "22 23 24 25 26 27 28");
        }

        #[test]
        fn leap_february_has_29_days() {
            let grid = month_grid(ymd(2024, 2, 10));
            assert!(grid.last().unwrap().ends_with("29"));
            let grid = month_grid(ymd(1900, 2, 10));
            assert!(grid.last().unwrap().ends_with("28"));
            let grid = month_grid(ymd(2000, 2, 10));
            assert!(grid.last().unwrap().ends_with("29"));
        }

        #[test]
        fn every_line_fits_the_grid_width() {
            let mut date = ymd(2020, 1, 1);
            for _ in 0..48 {
                for line in month_grid(date) {
                    assert!(line.len() <= GRID_WIDTH, "{line:?}");
                }
                date = date + Days::new(31);
            }
        }
    }

    mod locate_day_fn {
        use super::*;

        #[test]
        fn finds_single_digit_day_without_matching_later_numbers() {
            let grid = month_grid(ymd(2026, 10, 1));
            assert_eq!(locate_day(&grid, 1), Some((2, 9)));
            assert_eq!(locate_day(&grid, 5), Some((3, 0)));
        }

        #[test]
        fn finds_double_digit_day() {
            let grid = month_grid(ymd(2026, 10, 1));
            assert_eq!(locate_day(&grid, 11), Some((3, 18)));
            assert_eq!(locate_day(&grid, 31), Some((6, 15)));
        }

        #[test]
        fn missing_day_is_none() {
            let grid = month_grid(ymd(2021, 2, 1));
            assert_eq!(locate_day(&grid, 30), None);
        }
    }

    mod render_month_grid_fn {
        use super::*;

        #[test]
        fn wraps_grid_with_label_and_footer() {
            let lines = render_month_grid(ymd(2026, 10, 18), 20, "  Earth's calendar");
            assert_eq!(lines[0], "  Earth's calendar");
            assert_eq!(lines[1], "    October 2026");
            assert_eq!(lines[5], "12 13 14 15 16 17   ");
            assert_eq!(lines[lines.len() - 2], " Today is: Oct 18");
            assert_eq!(lines[lines.len() - 1], "      Age: 20");
        }

        #[test]
        fn blanking_keeps_column_alignment() {
            let lines = render_month_grid(ymd(2026, 10, 7), 20, "x");
            assert_eq!(lines[4], " 5  6     8  9 10 11");
            assert_eq!(lines[4].len(), GRID_WIDTH);
        }

        #[test]
        fn restoring_blanked_token_reproduces_standard_grid() {
            let mut date = ymd(2023, 11, 20);
            for _ in 0..400 {
                let (lines, cell) = render_month_view(date, 30, "label");
                let (row, col) = cell.expect("today is always on the grid");
                let mut restored: Vec<String> = lines[1..lines.len() - 2].to_vec();
                restored[row - 1].replace_range(col..col + 2, &format!("{:>2}", date.day()));
                assert_eq!(restored, month_grid(date), "date {date}");
                date = date + Days::new(1);
            }
        }

        #[test]
        fn reported_cell_points_at_the_blank() {
            let (lines, cell) = render_month_view(ymd(2026, 10, 3), 20, "x");
            let (row, col) = cell.unwrap();
            assert_eq!(&lines[row][col..col + 2], "  ");
            assert_eq!(row, 3);
        }
    }

    mod advance_fn {
        use super::*;

        #[test]
        fn moves_date_and_counter() {
            let mut clock = earth(0, 20);
            advance(&mut clock, 1);
            assert_eq!(clock.date, ymd(2024, 1, 2));
            assert_eq!(clock.day_counter, 1);
            advance(&mut clock, 512);
            assert_eq!(clock.date, ymd(2025, 5, 28));
            assert_eq!(clock.day_counter, 513);
        }

        #[test]
        fn refreshes_display() {
            let mut clock = earth(0, 20);
            advance(&mut clock, 40);
            let lines = clock.lines();
            assert_eq!(lines[1], "   February 2024");
            assert_eq!(lines[lines.len() - 2], " Today is: Feb 10");
        }

        #[test]
        fn holds_date_at_calendar_limit() {
            let mut clock = earth(0, 20);
            clock.date = NaiveDate::MAX;
            advance(&mut clock, 1024);
            assert_eq!(clock.date, NaiveDate::MAX);
            assert_eq!(clock.day_counter, 1024);
        }
    }

    mod rollover_fn {
        use super::*;

        #[test]
        fn earth_folds_repeatedly() {
            let mut clock = earth(800, 20);
            assert_eq!(rollover(&mut clock, RolloverPolicy::Split), 2);
            assert_eq!(clock.day_counter, 70);
            assert_eq!(clock.age_years, 22);
        }

        #[test]
        fn earth_rollover_is_idempotent() {
            let mut clock = earth(800, 20);
            rollover(&mut clock, RolloverPolicy::Split);
            assert_eq!(rollover(&mut clock, RolloverPolicy::Split), 0);
            assert_eq!(clock.day_counter, 70);
            assert_eq!(clock.age_years, 22);
        }

        #[test]
        fn exactly_one_year_does_not_roll() {
            let mut clock = earth(365, 20);
            assert_eq!(rollover(&mut clock, RolloverPolicy::Split), 0);
            assert_eq!(clock.age_years, 20);
            clock.day_counter = 366;
            assert_eq!(rollover(&mut clock, RolloverPolicy::Split), 1);
            assert_eq!(clock.day_counter, 1);
        }

        #[test]
        fn ship_hard_resets() {
            let mut clock = ship(800, 20);
            assert_eq!(rollover(&mut clock, RolloverPolicy::Split), 1);
            assert_eq!(clock.day_counter, 0);
            assert_eq!(clock.age_years, 21);
        }

        #[test]
        fn unified_policy_folds_ship_too() {
            let mut clock = ship(800, 20);
            assert_eq!(rollover(&mut clock, RolloverPolicy::Unified), 2);
            assert_eq!(clock.day_counter, 70);
            assert_eq!(clock.age_years, 22);
        }

        #[test]
        fn age_line_updates_after_rollover() {
            let mut clock = earth(400, 20);
            rollover(&mut clock, RolloverPolicy::Split);
            assert_eq!(clock.lines().last().unwrap(), "      Age: 21");
        }
    }
}

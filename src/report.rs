//! Text rendering for results and errors.
//!
//! All functions are pure: they take what they need and return a `String`, so
//! the binary decides where the text goes.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::PopulationError;
use crate::occupancy::{MaxPopulation, OccupancyTable};

const PATH_DELIMS: &[char] = &['/', '\\', ':'];
const HISTOGRAM_WIDTH: u64 = 60;

/// Strip any directory prefix from the program path.
pub fn app_name_from_path(path: &str) -> &str {
    match path.rfind(PATH_DELIMS) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Usage text for `app_name`.
pub fn usage(app_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Description:");
    let _ = writeln!(out, "   This program allows the user to");
    let _ = writeln!(
        out,
        "   a) Generate a population file, including the birth & death years of each person."
    );
    let _ = writeln!(
        out,
        "   b) Process the file and report the year that the maximum number of people were alive."
    );
    let _ = writeln!(
        out,
        "      If the maximum occurs in multiple years, all years will be reported."
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Usage: {} populationFile [sizeOfPopulationToGenerate]",
        app_name
    );
    let _ = writeln!(out, "   Where");
    let _ = writeln!(
        out,
        "      'populationFile'             is the file to read from or write to,"
    );
    let _ = writeln!(
        out,
        "      'sizeOfPopulationToGenerate' is an integer specifying the number of records to generate for the file."
    );
    let _ = writeln!(
        out,
        "   If no population size is specified, this program will simply read and process the populationFile."
    );
    out
}

/// Usage text, then the error message, then the arguments the program got.
///
/// `args` includes the program path at index 0, as `std::env::args_os` yields it
/// (converted lossily by the caller).
pub fn format_usage_and_error(app_name: &str, args: &[String], message: &str) -> String {
    let mut out = String::from("\n");
    out.push_str(&usage(app_name));
    out.push('\n');
    if message.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Error:");
    let _ = writeln!(out, "    {}", message);
    for (ix, arg) in args.iter().enumerate() {
        let _ = writeln!(out, "        param[{}] = {}", ix, arg);
    }
    out
}

/// Headline and year list for a peak, singular or plural.
pub fn format_max_population(max: &MaxPopulation) -> String {
    let mut out = String::new();
    if max.years.len() == 1 {
        let _ = writeln!(
            out,
            "The year with the highest population ({}) was:",
            max.count
        );
    } else {
        let _ = writeln!(
            out,
            "The {} years with the highest population ({}) were:",
            max.years.len(),
            max.count
        );
    }
    let years: Vec<String> = max.years.iter().map(|y| y.to_string()).collect();
    let _ = writeln!(out, "{{ {} }}", years.join(", "));
    out
}

pub fn format_no_records(path: &Path) -> String {
    format!(
        "There were no records to process in file '{}'\n",
        path.display()
    )
}

/// One line per skipped record.
pub fn format_skipped(skipped: &[PopulationError]) -> String {
    let mut out = String::new();
    if skipped.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Skipped {} corrupt record(s):", skipped.len());
    for err in skipped {
        let _ = writeln!(out, "    {}", err);
    }
    out
}

/// Bar chart of alive counts per year, scaled so the peak fills the width.
pub fn format_histogram(table: &OccupancyTable) -> String {
    let mut out = String::new();
    let max = table.max_count();
    for (year, count) in table.iter() {
        let bar = if max == 0 {
            0
        } else {
            (count * HISTOGRAM_WIDTH).div_ceil(max)
        };
        let _ = writeln!(
            out,
            "{} {:>8} {}",
            year,
            count,
            "*".repeat(bar as usize)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PersonRecord, WINDOW_YEARS};

    #[test]
    fn test_app_name_strips_paths() {
        assert_eq!(app_name_from_path("/usr/local/bin/whos-alive"), "whos-alive");
        assert_eq!(app_name_from_path("C:\\tools\\whos-alive.exe"), "whos-alive.exe");
        assert_eq!(app_name_from_path("C:whos-alive"), "whos-alive");
        assert_eq!(app_name_from_path("whos-alive"), "whos-alive");
    }

    #[test]
    fn test_usage_and_error_lists_args() {
        let args = vec!["whos-alive".to_string(), "people.txt".to_string()];
        let text = format_usage_and_error("whos-alive", &args, "'people.txt' does not exist.");
        assert!(text.contains("Usage: whos-alive populationFile"));
        assert!(text.contains("Error:"));
        assert!(text.contains("'people.txt' does not exist."));
        assert!(text.contains("param[1] = people.txt"));
    }

    #[test]
    fn test_usage_without_message_has_no_error_section() {
        let text = format_usage_and_error("whos-alive", &[], "");
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_singular_phrasing() {
        let max = MaxPopulation {
            count: 12,
            years: vec![1950],
        };
        assert_eq!(
            format_max_population(&max),
            "The year with the highest population (12) was:\n{ 1950 }\n"
        );
    }

    #[test]
    fn test_plural_phrasing() {
        let max = MaxPopulation {
            count: 5,
            years: vec![1902, 1903, 1904],
        };
        assert_eq!(
            format_max_population(&max),
            "The 3 years with the highest population (5) were:\n{ 1902, 1903, 1904 }\n"
        );
    }

    #[test]
    fn test_histogram_one_line_per_year() {
        let mut table = OccupancyTable::new();
        table.add(&PersonRecord::new(1950, 1960, 1).unwrap());
        let text = format_histogram(&table);
        assert_eq!(text.lines().count(), WINDOW_YEARS);
        let peak = text.lines().find(|l| l.starts_with("1955")).unwrap();
        assert!(peak.ends_with(&"*".repeat(HISTOGRAM_WIDTH as usize)));
        let empty = text.lines().next().unwrap();
        assert!(!empty.contains('*'));
    }
}

//! Interactive CSV picker.
//!
//! Used when `-f` is omitted: lists `*.csv` files below the current directory,
//! tags each with whether its header carries the columns the chosen domain
//! requires, and reads a choice from stdin.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::DataDomain;
use crate::error::AppError;
use crate::io::schema::missing_columns;

/// Directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// How a candidate file's header compares with a domain's required columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderFit {
    Matches,
    Missing(Vec<String>),
    Unreadable,
}

impl HeaderFit {
    fn tag(&self) -> String {
        match self {
            HeaderFit::Matches => "ok".to_string(),
            HeaderFit::Missing(cols) if cols.len() == 1 => format!("missing {}", cols[0]),
            HeaderFit::Missing(cols) => format!("missing {} columns", cols.len()),
            HeaderFit::Unreadable => "unreadable".to_string(),
        }
    }
}

/// Prompt the user to pick a CSV for `domain`.
///
/// Accepts a list number or an explicit path; `q` cancels.
pub fn prompt_for_csv_path(domain: DataDomain) -> Result<PathBuf, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `salesdash report -f <file.csv>`.",
        ));
    }

    println!("CSV files for the {} domain:", domain.display_name());
    for (idx, path) in files.iter().enumerate() {
        let fit = header_fit(path, domain);
        println!("{:>3}) {:<48} [{}]", idx + 1, pretty_path(path), fit.tag());
    }

    loop {
        print!("Select a file (1-{}), type a path, or q to quit: ", files.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a CSV path with `salesdash report -f <file.csv>`.",
            ));
        }

        match parse_choice(input.trim(), &files) {
            Choice::Quit => return Err(AppError::new(2, "Canceled.")),
            Choice::Index(i) => return validate_csv_path(&files[i]),
            Choice::OutOfRange(n) => {
                println!("Invalid choice: {n}. Enter a number between 1 and {}.", files.len());
            }
            Choice::Path(candidate) => match validate_csv_path(&candidate) {
                Ok(path) => return Ok(path),
                Err(err) => println!("{err}"),
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Quit,
    Index(usize),
    OutOfRange(usize),
    Path(PathBuf),
}

fn parse_choice(input: &str, files: &[PathBuf]) -> Choice {
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=files.len()).contains(&n) => Choice::Index(n - 1),
        Ok(n) => Choice::OutOfRange(n),
        Err(_) => Choice::Path(PathBuf::from(input)),
    }
}

/// Validate that `path` points to an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("CSV file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file (got: {}). Use -f to pass a CSV path.", path.display()),
        ));
    }

    Ok(path.to_path_buf())
}

/// Compare the header row of `path` with the columns `domain` requires.
pub fn header_fit(path: &Path, domain: DataDomain) -> HeaderFit {
    let Ok(mut reader) = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path) else {
        return HeaderFit::Unreadable;
    };
    let Ok(headers) = reader.headers() else {
        return HeaderFit::Unreadable;
    };
    let present: Vec<&str> = headers.iter().map(|h| h.trim_start_matches('\u{feff}')).collect();
    let missing = missing_columns(&present, domain.profile().required_columns);
    if missing.is_empty() {
        HeaderFit::Matches
    } else {
        HeaderFit::Missing(missing)
    }
}

/// `*.csv` files under the current directory, sorted by display path.
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn walk(dir: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                walk(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_csv_files_and_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("data/2024")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("b.csv"), "x\n").unwrap();
        fs::write(root.join("data/2024/a.CSV"), "x\n").unwrap();
        fs::write(root.join("notes.txt"), "x\n").unwrap();
        fs::write(root.join("target/skip.csv"), "x\n").unwrap();

        let found = find_csv_files(root, DEFAULT_SEARCH_DEPTH);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"b.csv".to_string()));
        assert!(names.contains(&"a.CSV".to_string()));
    }

    #[test]
    fn header_fit_reports_missing_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        fs::write(&good, "\u{feff}Date, Category,Quantity,Price,Customer Segment\n").unwrap();
        fs::write(&bad, "Date,Category,Quantity\n").unwrap();

        assert_eq!(header_fit(&good, DataDomain::Segment), HeaderFit::Matches);
        assert_eq!(
            header_fit(&bad, DataDomain::Segment),
            HeaderFit::Missing(vec!["Price".to_string(), "Customer Segment".to_string()])
        );
        assert_eq!(header_fit(&dir.path().join("none.csv"), DataDomain::Segment), HeaderFit::Unreadable);
    }

    #[test]
    fn choices_parse_numbers_paths_and_quit() {
        let files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
        assert_eq!(parse_choice("Q", &files), Choice::Quit);
        assert_eq!(parse_choice("2", &files), Choice::Index(1));
        assert_eq!(parse_choice("3", &files), Choice::OutOfRange(3));
        assert_eq!(parse_choice("other.csv", &files), Choice::Path(PathBuf::from("other.csv")));
    }

    #[test]
    fn validation_rejects_directories_and_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("x.txt");
        fs::write(&txt, "x").unwrap();
        assert_eq!(validate_csv_path(dir.path()).unwrap_err().exit_code(), 2);
        assert_eq!(validate_csv_path(&txt).unwrap_err().exit_code(), 2);
        assert_eq!(validate_csv_path(&dir.path().join("missing.csv")).unwrap_err().exit_code(), 2);
    }
}

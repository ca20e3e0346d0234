//! Interactive input picker.
//!
//! Used when neither `--input` nor `PAXSPEC_INPUT` names a table: lists the
//! `*.csv` files under the working directory and lets the analyst choose one
//! by number or type a path.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;

const SEARCH_DEPTH: usize = 3;

/// Prompt on stdin/stdout for a CSV under the current directory.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = find_csv_files(Path::new("."), SEARCH_DEPTH);
    let stdin = io::stdin();
    pick_from(&files, &mut stdin.lock(), &mut io::stdout())
}

/// Selection loop over `files`, reading answers from `input`.
///
/// `q` cancels; end of input is an error.
pub fn pick_from<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, output: &mut W) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Picker I/O failed: {e}"));

    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Pass one with `paxspec analyze -f <file.csv>`.",
        ));
    }

    writeln!(output, "Found {} CSV file(s):", files.len()).map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(output, "{:>3}) {}", idx + 1, display_path(path)).map_err(io_err)?;
    }

    loop {
        write!(output, "Select a file (1-{}) or type a path (q to quit): ", files.len()).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No input received. Pass a CSV with `-f <file.csv>`."));
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = answer.parse::<usize>() {
            match files.get(choice.wrapping_sub(1)) {
                Some(path) => return Ok(path.clone()),
                None => {
                    writeln!(output, "Invalid choice: {choice}.").map_err(io_err)?;
                    continue;
                }
            }
        }

        match validate_csv_path(Path::new(answer)) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(output, "{err}").map_err(io_err)?,
        }
    }
}

/// The path must be an existing file with a `.csv` extension.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        return Err(AppError::new(2, format!("CSV file not found: {}", path.display())));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(2, format!("Expected a .csv file, got: {}", path.display())));
    }
    Ok(path.to_path_buf())
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| display_path(p));
    debug!(found = out.len(), "Discovered CSV files");
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
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if !matches!(name, ".git" | "target") {
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

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

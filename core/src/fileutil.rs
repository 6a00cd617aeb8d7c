//! File Utility Functions

use crate::common::*;
use crate::geometry::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::result::Result;

/// Reads a file containing floating point values separated by whitespace. A
/// `#` starts a comment that runs to the end of the line. Values are read
/// left to right, top to bottom into a single list.
///
/// * `path` - The file path.
pub fn read_float_file(path: &str) -> Result<Vec<Float>, String> {
    let file = File::open(path).map_err(|err| format!("Error reading {path}. {err}."))?;
    let reader = BufReader::new(file);

    let mut v: Vec<Float> = vec![];
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| format!("Error reading {path}. {err}."))?;
        v.extend(process_line(index, &line)?);
    }

    info!("Read {} values from {path}", v.len());
    Ok(v)
}

/// Parses floating point values from a string in the same format as
/// `read_float_file()`.
///
/// * `text` - The text.
pub fn parse_floats(text: &str) -> Result<Vec<Float>, String> {
    let mut v: Vec<Float> = vec![];
    for (index, line) in text.lines().enumerate() {
        v.extend(process_line(index, line)?);
    }
    Ok(v)
}

/// Process a single line. If the line cannot be parsed entirely an error is
/// returned.
///
/// * `index` - The line number (starting at 0).
/// * `line`  - The contents of the line.
fn process_line(index: usize, line: &str) -> Result<Vec<Float>, String> {
    let data = line.split('#').next().unwrap_or_default();
    data.split_whitespace()
        .map(|s| {
            s.parse::<Float>()
                .map_err(|err| format!("Error parsing Float value `{s}` on line {}. {err}.", index + 1))
        })
        .collect()
}

/// Writes samples, one `x y` pair per line.
///
/// * `writer`  - The destination.
/// * `samples` - The samples.
pub fn write_samples<W: Write>(writer: W, samples: &[Point2f]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for p in samples {
        writeln!(writer, "{} {}", p.x, p.y)?;
    }
    writer.flush()
}

/// Writes samples to a file, or to standard output if no path is given.
///
/// * `path`    - Optional output file path.
/// * `samples` - The samples.
pub fn write_samples_file(path: Option<&str>, samples: &[Point2f]) -> Result<(), String> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|err| format!("Error creating {path}. {err}."))?;
            write_samples(file, samples).map_err(|err| format!("Error writing {path}. {err}."))?;
            info!("Wrote {} samples to {path}", samples.len());
            Ok(())
        }
        None => write_samples(io::stdout().lock(), samples)
            .map_err(|err| format!("Error writing samples. {err}.")),
    }
}

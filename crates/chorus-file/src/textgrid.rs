//! Praat TextGrid codec
//!
//! Reads both the long ("item [1]:" key/value) and short (bare token) forms,
//! collapsing the file to its first interval tier. Writes the short form,
//! blank labels included, which Praat and praatio both accept.

use std::fs;
use std::path::Path;

use chorus_core::{Interval, IntervalTier};

use crate::error::{FileError, FileResult};

/// Read and parse a TextGrid file.
pub fn read_textgrid(path: &Path) -> FileResult<IntervalTier> {
    let text = fs::read_to_string(path)?;
    parse_textgrid(&text).map_err(|e| match e {
        FileError::TextGrid(msg) => FileError::TextGrid(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Parse TextGrid text (long or short format) to its first interval tier.
pub fn parse_textgrid(text: &str) -> FileResult<IntervalTier> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 || !lines[0].starts_with("File type") || !lines[1].contains("TextGrid") {
        return Err(FileError::TextGrid("not a TextGrid file".into()));
    }

    let body = &lines[2..];
    let is_long = body
        .iter()
        .any(|line| line.starts_with("xmin") || line.starts_with("item"));
    if is_long {
        parse_long(body)
    } else {
        parse_short(body)
    }
}

/// Write a tier as a short-format TextGrid file.
pub fn write_textgrid(path: &Path, tier: &IntervalTier) -> FileResult<()> {
    fs::write(path, format_textgrid(tier))?;
    log::debug!("wrote {}: {} intervals", path.display(), tier.len());
    Ok(())
}

/// Render a tier in the short TextGrid format.
pub fn format_textgrid(tier: &IntervalTier) -> String {
    let mut out = String::new();
    out.push_str("File type = \"ooTextFile\"\n");
    out.push_str("Object class = \"TextGrid\"\n\n");
    out.push_str(&format!("{}\n{}\n", tier.xmin, tier.xmax));
    out.push_str("<exists>\n1\n\"IntervalTier\"\n");
    out.push_str(&format!("\"{}\"\n", escape(&tier.name)));
    out.push_str(&format!("{}\n{}\n{}\n", tier.xmin, tier.xmax, tier.len()));
    for interval in &tier.intervals {
        out.push_str(&format!(
            "{}\n{}\n\"{}\"\n",
            interval.start,
            interval.end,
            escape(&interval.label)
        ));
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('"', "\"\"")
}

fn unquote(token: &str) -> String {
    let token = token.trim();
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
        .replace("\"\"", "\"")
}

fn parse_number(token: &str) -> FileResult<f64> {
    token
        .trim()
        .parse()
        .map_err(|_| FileError::TextGrid(format!("expected a number, found '{token}'")))
}

fn value_after_equals(line: &str) -> &str {
    line.split_once('=').map(|(_, v)| v.trim()).unwrap_or("")
}

fn parse_long(lines: &[&str]) -> FileResult<IntervalTier> {
    let mut tier: Option<IntervalTier> = None;
    let mut in_intervals = false;
    let mut interval_xmin = 0.0;
    let mut interval_xmax = 0.0;

    for line in lines {
        if line.starts_with("class") {
            let class = unquote(value_after_equals(line));
            if tier.is_some() {
                log::warn!("TextGrid has multiple tiers; only the first interval tier is used");
                break;
            }
            if class == "IntervalTier" {
                tier = Some(IntervalTier::new("", 0.0));
            }
            continue;
        }

        let Some(current) = &mut tier else {
            continue;
        };

        if line.starts_with("name") {
            if current.name.is_empty() {
                current.name = unquote(value_after_equals(line));
            }
        } else if line.starts_with("intervals [") {
            in_intervals = true;
        } else if line.starts_with("xmin") {
            let value = parse_number(value_after_equals(line))?;
            if in_intervals {
                interval_xmin = value;
            } else {
                current.xmin = value;
            }
        } else if line.starts_with("xmax") {
            let value = parse_number(value_after_equals(line))?;
            if in_intervals {
                interval_xmax = value;
            } else {
                current.xmax = value;
            }
        } else if line.starts_with("text") {
            current.push(Interval::new(
                interval_xmin,
                interval_xmax,
                unquote(value_after_equals(line)),
            ));
        }
    }

    tier.ok_or_else(|| FileError::TextGrid("no interval tier found".into()))
}

struct Tokens<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self) -> FileResult<&'a str> {
        let token = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| FileError::TextGrid("unexpected end of file".into()))?;
        self.pos += 1;
        Ok(token)
    }

    fn number(&mut self) -> FileResult<f64> {
        parse_number(self.next()?)
    }

    fn count(&mut self) -> FileResult<usize> {
        self.number().map(|n| n as usize)
    }
}

fn parse_short(lines: &[&str]) -> FileResult<IntervalTier> {
    let mut tokens = Tokens { lines, pos: 0 };
    let _file_xmin = tokens.number()?;
    let _file_xmax = tokens.number()?;
    let _tiers_exist = tokens.next()?;
    let n_tiers = tokens.count()?;

    if n_tiers > 1 {
        log::warn!("TextGrid has {n_tiers} tiers; only the first interval tier is used");
    }

    let mut result: Option<IntervalTier> = None;
    for _ in 0..n_tiers {
        let class = unquote(tokens.next()?);
        let name = unquote(tokens.next()?);
        let xmin = tokens.number()?;
        let xmax = tokens.number()?;
        let entries = tokens.count()?;

        if class == "IntervalTier" && result.is_none() {
            let mut tier = IntervalTier::new(name, xmax);
            tier.xmin = xmin;
            for _ in 0..entries {
                let start = tokens.number()?;
                let end = tokens.number()?;
                let label = unquote(tokens.next()?);
                tier.push(Interval::new(start, end, label));
            }
            result = Some(tier);
        } else if class == "IntervalTier" {
            for _ in 0..entries {
                tokens.number()?;
                tokens.number()?;
                tokens.next()?;
            }
        } else {
            // Point tier: one time and one mark per entry.
            for _ in 0..entries {
                tokens.number()?;
                tokens.next()?;
            }
        }
    }

    result.ok_or_else(|| FileError::TextGrid("no interval tier found".into()))
}

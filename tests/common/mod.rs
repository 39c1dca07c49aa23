#![allow(dead_code)]

use examdash::{App, AppEvent};
use std::path::{Path, PathBuf};

pub const HEADER: &str = "gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score";

pub const ROWS: &[&str] = &[
    "female,group B,bachelor's degree,standard,none,72,72,74",
    "female,group C,some college,standard,completed,69,90,88",
    "female,group B,master's degree,standard,none,90,95,93",
    "male,group A,associate's degree,free/reduced,none,47,57,44",
    "male,group C,some college,standard,none,76,78,75",
    "female,group B,associate's degree,standard,none,71,83,78",
    "female,group B,some college,standard,completed,88,95,92",
    "male,group B,some college,free/reduced,none,40,43,39",
    "male,group D,high school,free/reduced,completed,64,64,67",
    "female,group B,high school,free/reduced,none,38,60,50",
    "male,group C,associate's degree,standard,none,58,54,52",
    "male,group D,associate's degree,standard,none,40,52,43",
];

/// Write `exams.csv` with every sample row into `dir`.
pub fn write_exams_csv(dir: &Path) -> PathBuf {
    write_csv(dir, "exams.csv", HEADER, ROWS)
}

/// Write a CSV with the given header and rows.
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Sample rows without the `writing score` column.
pub fn write_without_writing_score(dir: &Path) -> PathBuf {
    let header = HEADER.rsplit_once(',').unwrap().0;
    let rows: Vec<String> = ROWS
        .iter()
        .map(|row| row.rsplit_once(',').unwrap().0.to_string())
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(dir, "no_writing.csv", header, &rows)
}

/// Handle `event` and every follow-up event it produces.
pub fn drive(app: &mut App, event: AppEvent) {
    let mut next = Some(event);
    while let Some(event) = next {
        next = app.event(&event);
    }
}

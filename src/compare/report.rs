//! Human and machine renderings of a comparison
//!
//! Both renderings read the same result slice; neither recomputes diffs.

use super::{ComparisonResult, Status};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Count of results per status
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub identical: usize,
    pub different: usize,
    pub built_only: usize,
    pub pulled_only: usize,
}

impl Summary {
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                Status::Identical => summary.identical += 1,
                Status::Different => summary.different += 1,
                Status::BuiltOnly => summary.built_only += 1,
                Status::PulledOnly => summary.pulled_only += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.identical + self.different + self.built_only + self.pulled_only
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} workflow(s): {} identical, {} different, {} built only, {} pulled only",
            self.total(),
            self.identical,
            self.different,
            self.built_only,
            self.pulled_only
        )
    }
}

/// Render a name / status / diff-count table followed by a summary line
pub fn render_table(results: &[ComparisonResult]) -> String {
    const NAME: &str = "NAME";
    const STATUS: &str = "STATUS";
    const DIFFS: &str = "DIFFS";

    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(NAME.len()))
        .max()
        .unwrap_or(NAME.len());

    let status_width = "pulled only".len();

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:<status_width$}  {}", NAME, STATUS, DIFFS);
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(name_width),
        "-".repeat(status_width),
        "-".repeat(DIFFS.len())
    );

    for result in results {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<status_width$}  {}",
            result.name,
            result.status,
            result.diff_count()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", Summary::from_results(results));
    out
}

/// Render a pretty JSON object mapping each name to its result
pub fn render_json(results: &[ComparisonResult]) -> serde_json::Result<String> {
    let map: BTreeMap<&str, &ComparisonResult> =
        results.iter().map(|r| (r.name.as_str(), r)).collect();
    serde_json::to_string_pretty(&map)
}

//! Formatted terminal output.
//!
//! We keep formatting code in one place so the tide code stays free of
//! presentation concerns and output changes stay localized.

use crate::app::pipeline::{RunOutput, RunResult};
use crate::domain::{Epoch, RunConfig, RunKind, Site};
use crate::harmonics::SphericalHarmonics;
use crate::io::to_local;
use crate::tides::ExcitationSample;

/// Format the run header: inputs, model settings and the epoch grid.
pub fn format_run_summary(config: &RunConfig, output: &RunOutput) -> String {
    let mut out = String::new();
    let tide = &config.tide;

    out.push_str("=== poletide - ocean pole tide ===\n");
    out.push_str(&format!("Run: {}\n", kind_label(config.kind)));
    out.push_str(&format!(
        "Coefficients: {}\n",
        tide.inputfile_ocean_pole.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
    ));
    out.push_str(&format!(
        "Mean pole: {}\n",
        tide.inputfile_mean_pole.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
    ));
    out.push_str(&format!(
        "Model: degrees {}..{} | gamma=({:.4}, {:.4}) | factor={}\n",
        tide.min_degree,
        tide.max_degree.map(|d| d.to_string()).unwrap_or_else(|| "file".to_string()),
        tide.gamma_real,
        tide.gamma_imaginary,
        tide.factor
    ));
    out.push_str(&format!("EOP: {}\n", config.eop_path.display()));
    out.push_str(&format!(
        "Epochs: n={} | {} .. {} | step={}s\n",
        output.times.len(),
        config.start,
        config.end,
        config.step_seconds
    ));
    if let RunResult::Deformation { sites, .. } = &output.result {
        out.push_str(&format!("Sites: n={}\n", sites.len()));
    }
    out.push('\n');
    out
}

/// Format the first `rows` rows of the result.
pub fn format_preview(output: &RunOutput, rows: usize) -> String {
    match &output.result {
        RunResult::Excitation(samples) => format_excitation_table(&samples[..rows.min(samples.len())]),
        RunResult::Potential(fields) => {
            let n = rows.min(fields.len());
            format_potential_table(&output.times[..n], &fields[..n])
        }
        RunResult::Deformation { sites, displacement } => {
            format_displacement_table(sites, &output.times, displacement, rows)
        }
    }
}

fn kind_label(kind: RunKind) -> &'static str {
    match kind {
        RunKind::Excitation => "excitation",
        RunKind::Potential => "potential",
        RunKind::Deformation => "deformation",
    }
}

fn format_excitation_table(samples: &[ExcitationSample]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<23} {:>12} {:>12} {:>14} {:>14}\n",
        "time", "m1 [\"]", "m2 [\"]", "w_real", "w_imag"
    ));
    out.push_str(&format!("{:-<23} {:-<12} {:-<12} {:-<14} {:-<14}\n", "", "", "", "", ""));
    for s in samples {
        out.push_str(&format!(
            "{:<23} {:>12.6} {:>12.6} {:>14.6e} {:>14.6e}\n",
            s.epoch.to_string(),
            s.excitation.m1,
            s.excitation.m2,
            s.weights.real,
            s.weights.imag
        ));
    }
    out
}

/// Degree-2, order-1 terms carry almost all of the pole tide signal.
fn format_potential_table(times: &[Epoch], fields: &[SphericalHarmonics]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<23} {:>14} {:>14} {:>14}\n", "time", "C20", "C21", "S21"));
    out.push_str(&format!("{:-<23} {:-<14} {:-<14} {:-<14}\n", "", "", "", ""));
    for (t, field) in times.iter().zip(fields) {
        let (c20, c21, s21) = if field.max_degree() >= 2 {
            (field.cnm()[(2, 0)], field.cnm()[(2, 1)], field.snm()[(2, 1)])
        } else {
            (0.0, 0.0, 0.0)
        };
        out.push_str(&format!(
            "{:<23} {:>14.6e} {:>14.6e} {:>14.6e}\n",
            t.to_string(),
            c20,
            c21,
            s21
        ));
    }
    out
}

fn format_displacement_table(
    sites: &[Site],
    times: &[Epoch],
    displacement: &[Vec<nalgebra::Vector3<f64>>],
    rows: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<23} {:>10} {:>10} {:>10}\n",
        "site", "time", "east [mm]", "north [mm]", "up [mm]"
    ));
    out.push_str(&format!("{:-<12} {:-<23} {:-<10} {:-<10} {:-<10}\n", "", "", "", "", ""));

    let rows_iter = sites
        .iter()
        .zip(displacement)
        .flat_map(|(site, series)| times.iter().zip(series).map(move |(t, d)| (site, t, d)))
        .take(rows);
    for (site, t, d) in rows_iter {
        let enu = to_local(&site.position, d) * 1e3;
        out.push_str(&format!(
            "{:<12} {:<23} {:>10.4} {:>10.4} {:>10.4}\n",
            truncate(&site.id, 12),
            t.to_string(),
            enu.x,
            enu.y,
            enu.z
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tides::{AdmittanceWeights, Excitation};
    use nalgebra::Vector3;

    #[test]
    fn preview_limits_rows() {
        let times: Vec<_> = (0..5).map(|i| Epoch::from_seconds(i as f64 * 60.0)).collect();
        let samples = times
            .iter()
            .map(|&epoch| ExcitationSample {
                epoch,
                excitation: Excitation { m1: 0.1, m2: 0.2 },
                weights: AdmittanceWeights { real: 1e-7, imag: 1e-9 },
            })
            .collect();
        let output = RunOutput { times, result: RunResult::Excitation(samples) };
        let text = format_preview(&output, 3);
        assert_eq!(text.lines().count(), 2 + 3);
        assert!(text.contains("2000-01-01T12:02:00.000"));
        assert!(!text.contains("2000-01-01T12:03:00.000"));
    }

    #[test]
    fn displacement_rows_are_in_millimetres() {
        let site = Site { id: "ONSALA60-LONGNAME".into(), position: Vector3::new(6.4e6, 0.0, 0.0), gravity: 9.8 };
        let output = RunOutput {
            times: vec![Epoch::J2000],
            result: RunResult::Deformation {
                sites: vec![site],
                displacement: vec![vec![Vector3::new(0.002, 0.0, 0.0)]],
            },
        };
        let text = format_preview(&output, 10);
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("ONSALA60-LO."), "{row}");
        assert!(row.trim_end().ends_with("2.0000"), "{row}");
    }

    #[test]
    fn truncate_keeps_short_ids() {
        assert_eq!(truncate("WETTZELL", 12), "WETTZELL");
        assert_eq!(truncate("ABCDEFGHIJKLMN", 5), "ABCD.");
    }
}

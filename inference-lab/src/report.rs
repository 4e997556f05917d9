//! Plain-text console summary of a pipeline run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::pipeline::InferenceReport;

/// Run summary printed to stdout.
///
/// Values use two decimals; the p-value and t critical value use four.
pub struct Summary<'a> {
    pub report: &'a InferenceReport,
    pub output_dir: &'a Path,
    pub charts: &'a [PathBuf],
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let interval = &report.confidence_interval;
        let test = &report.hypothesis_test;

        writeln!(f, "Paramètres réels de la population:")?;
        writeln!(f, "Moyenne: {:.2}", report.population_stats.mean)?;
        writeln!(f, "Écart-type: {:.2}", report.population_stats.std_dev)?;

        writeln!(f, "\nStatistiques de l'échantillon:")?;
        writeln!(f, "Moyenne: {:.2}", report.sample_stats.mean)?;
        writeln!(f, "Écart-type: {:.2}", report.sample_stats.std_dev)?;

        writeln!(
            f,
            "\nIntervalle de confiance à {}%:",
            percent_label(interval.confidence_level)
        )?;
        writeln!(f, "[{:.2} ; {:.2}]", interval.lower, interval.upper)?;
        writeln!(f, "Degrés de liberté: {}", interval.degrees_of_freedom)?;
        writeln!(f, "t critique: {:.4}", interval.t_critical)?;
        writeln!(f, "Marge d'erreur: {:.2}", interval.margin_of_error)?;

        writeln!(f, "\nTest d'hypothèse (t-test):")?;
        writeln!(
            f,
            "Hypothèse nulle (H0): la moyenne réelle est égale à {:.2}",
            test.tested_value
        )?;
        writeln!(f, "Statistique t: {:.2}", test.t_statistic)?;
        writeln!(f, "P-value: {:.4}", test.p_value)?;
        writeln!(f, "Conclusion: {}", test.conclusion_text)?;

        writeln!(f, "\nLes graphiques ont été enregistrés dans {}:", self.output_dir.display())?;
        for chart in self.charts {
            match chart.file_name() {
                Some(name) => writeln!(f, "  {}", name.to_string_lossy())?,
                None => writeln!(f, "  {}", chart.display())?,
            }
        }

        Ok(())
    }
}

pub fn render_summary(report: &InferenceReport, output_dir: &Path, charts: &[PathBuf]) -> String {
    Summary {
        report,
        output_dir,
        charts,
    }
    .to_string()
}

/// `0.95` -> `"95"`, `0.975` -> `"97.5"`.
pub fn percent_label(level: f64) -> String {
    let percent = level * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{:.0}", percent)
    } else {
        format!("{:.1}", percent)
    }
}

use inference_core::{ChartRenderer, ExperimentConfig, InferenceError};
use inference_lab::charts::*;
use inference_lab::pipeline::{self, InferenceReport};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn report() -> InferenceReport {
    pipeline::run(&ExperimentConfig {
        population_size: 1_000,
        sample_size: 40,
        ..ExperimentConfig::default()
    })
    .unwrap()
}

fn line_labels(chart: &ChartSpec) -> Vec<&str> {
    chart.lines.iter().map(|l| l.label.as_str()).collect()
}

// ===== Chart Construction Tests =====

#[test]
fn test_four_charts_in_order() {
    let charts = build_charts(&report());

    let names: Vec<&str> = charts.iter().map(|c| c.file_name).collect();
    assert_eq!(
        names,
        vec![POPULATION_CHART, SAMPLE_CHART, INTERVAL_CHART, COMPARISON_CHART]
    );
}

#[test]
fn test_default_titles() {
    let report = pipeline::run(&ExperimentConfig::default()).unwrap();
    let titles: Vec<String> = build_charts(&report).into_iter().map(|c| c.title).collect();

    assert_eq!(
        titles,
        vec![
            "Distribution de la population totale (N=10 000)".to_string(),
            "Distribution de l'échantillon (n=100)".to_string(),
            "Échantillon avec intervalle de confiance à 95%".to_string(),
            "Comparaison des distributions (population vs échantillon)".to_string(),
        ]
    );
}

#[test]
fn test_labels_match_computed_values() {
    let report = report();
    let charts = build_charts(&report);

    let true_mean = format!("Moyenne réelle: {:.2}", report.population_stats.mean);
    let sample_mean = format!("Moyenne échantillon: {:.2}", report.sample_stats.mean);
    let tested = format!("Valeur testée: {:.2}", report.hypothesis_test.tested_value);
    let lower = format!("IC 95% min: {:.2}", report.confidence_interval.lower);
    let upper = format!("IC 95% max: {:.2}", report.confidence_interval.upper);

    assert_eq!(line_labels(&charts[0]), vec![true_mean.as_str(), tested.as_str()]);
    assert_eq!(line_labels(&charts[1]), vec![sample_mean.as_str(), tested.as_str()]);
    assert_eq!(
        line_labels(&charts[2]),
        vec![sample_mean.as_str(), lower.as_str(), upper.as_str(), tested.as_str()]
    );
    assert_eq!(
        line_labels(&charts[3]),
        vec![true_mean.as_str(), sample_mean.as_str(), tested.as_str()]
    );
}

#[test]
fn test_lines_sit_at_computed_values() {
    let report = report();
    let charts = build_charts(&report);

    assert_eq!(charts[0].lines[0].value, report.population_stats.mean);
    assert_eq!(charts[2].lines[1].value, report.confidence_interval.lower);
    assert_eq!(charts[2].lines[2].value, report.confidence_interval.upper);
    assert_eq!(charts[3].lines[2].value, 2000.0);
}

#[test]
fn test_histogram_bins_follow_config() {
    let charts = build_charts(&report());

    assert_eq!(charts[0].layers[0].histogram.bins.len(), 50);
    assert_eq!(charts[0].layers[0].histogram.total_count, 1_000);
    assert_eq!(charts[1].layers[0].histogram.bins.len(), 20);
    assert_eq!(charts[1].layers[0].histogram.total_count, 40);
}

#[test]
fn test_comparison_chart_uses_density() {
    let charts = build_charts(&report());
    let comparison = &charts[3];

    assert_eq!(comparison.scale, Scale::Density);
    assert_eq!(comparison.y_label, "Densité");
    let labels: Vec<Option<&str>> = comparison.layers.iter().map(|l| l.label.as_deref()).collect();
    assert_eq!(labels, vec![Some("Population"), Some("Échantillon")]);

    for chart in &charts[..3] {
        assert_eq!(chart.scale, Scale::Frequency);
        assert_eq!(chart.y_label, "Fréquence");
    }
}

#[test]
fn test_x_domain_covers_lines_and_bars() {
    let charts = build_charts(&report());

    for chart in &charts {
        let (lo, hi) = chart.x_domain().unwrap();
        for line in &chart.lines {
            assert!(lo < line.value && line.value < hi);
        }
        for layer in &chart.layers {
            let (first, last) = layer.histogram.range().unwrap();
            assert!(lo < first && last < hi);
        }
    }
}

#[test]
fn test_y_max_follows_tallest_bar() {
    let charts = build_charts(&report());

    let sample_chart = &charts[1];
    let tallest_count = sample_chart.layers[0].histogram.max_count() as f64;
    approx::assert_relative_eq!(sample_chart.y_max(), tallest_count * 1.05);

    let comparison = &charts[3];
    let tallest_density = comparison
        .layers
        .iter()
        .map(|layer| layer.histogram.max_density())
        .fold(0.0, f64::max);
    approx::assert_relative_eq!(comparison.y_max(), tallest_density * 1.05);
}

// ===== Rendering Tests =====

#[test]
fn test_render_all_writes_four_files() {
    let dir = tempfile::tempdir().unwrap();
    let written = render_all(&report(), &SvgChartRenderer, dir.path()).unwrap();

    assert_eq!(written.len(), 4);
    for path in &written {
        assert!(path.exists(), "missing {:?}", path);
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("<svg"));
    }
    assert_eq!(written[0], dir.path().join(POPULATION_CHART));
    assert_eq!(written[3], dir.path().join(COMPARISON_CHART));
}

#[test]
fn test_rendered_document_contains_labels() {
    let report = report();
    let charts = build_charts(&report);
    let document = SvgChartRenderer.document(&charts[3]).unwrap().to_string();

    assert!(document.contains("Comparaison des distributions"));
    assert!(document.contains(&format!("Moyenne réelle: {:.2}", report.population_stats.mean)));
    assert!(document.contains("stroke-dasharray"));
    assert!(document.contains("skyblue"));
    assert!(document.contains("lightgreen"));
}

#[test]
fn test_render_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let charts = build_charts(&report());

    let err = SvgChartRenderer.render(&charts[0], &missing).unwrap_err();
    assert!(matches!(err, InferenceError::Io(_)));
}

#[test]
fn test_empty_chart_cannot_render() {
    let chart = ChartSpec {
        file_name: "empty.svg",
        title: "Empty".to_string(),
        x_label: "Valeur",
        y_label: "Fréquence",
        scale: Scale::Frequency,
        width: 400,
        height: 300,
        layers: vec![],
        lines: vec![],
    };

    assert_eq!(chart.x_domain(), None);
    let err = SvgChartRenderer.document(&chart).unwrap_err();
    assert!(matches!(err, InferenceError::Render(_)));
}

// ===== Helper Tests =====

#[rstest]
#[case(0, "0")]
#[case(100, "100")]
#[case(1_000, "1 000")]
#[case(10_000, "10 000")]
#[case(1_234_567, "1 234 567")]
fn test_group_thousands(#[case] value: usize, #[case] expected: &str) {
    assert_eq!(group_thousands(value), expected);
}

#[test]
fn test_nice_ticks() {
    assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(nice_ticks(0.0, 1000.0, 4), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
    assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
}

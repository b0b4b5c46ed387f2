//! Output formatting for the CLI.

use crate::commands::validate::ValidationReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fielder_claims::Classification;
use fielder_domain::{MetricKind, QualityTier, Severity, Warning};
use fielder_engine::PredictionResult;
use fielder_omega::OmegaPrediction;
use fielder_produce::BrixPrediction;
use fielder_uncertainty::Distribution;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a claim classification.
    pub fn format_classification(&self, c: &Classification) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(c);
        }
        let mut rows = vec![
            ("Category", c.category.to_string()),
            ("Profile", format!("{} ({})", c.profile_id, c.profile_name)),
            ("Strategy", c.strategy.as_str().to_string()),
            ("Tier", self.tier(c.quality_tier)),
            ("Expected", c.expected_range_display.clone()),
            ("Confinement", if c.is_cafo { "yes" } else { "no" }.to_string()),
            ("Confidence", format!("{:.2}", c.confidence)),
        ];
        if let Some(score) = c.score {
            rows.push(("Score", score.to_string()));
        }
        if !c.matched_claims.is_empty() {
            rows.push(("Matched", c.matched_claims.join(", ")));
        }
        if !c.unrecognized_claims.is_empty() {
            rows.push(("Unrecognized", c.unrecognized_claims.join(", ")));
        }
        Ok(self.with_warnings(key_values(&rows), &c.warnings))
    }

    /// Format a Brix prediction.
    pub fn format_brix(&self, p: &BrixPrediction, commodity_brix: f64) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(p);
        }
        let rows = vec![
            ("Predicted", format!("{:.1} °Bx", p.predicted_brix)),
            ("Tier", self.tier(p.quality_tier())),
            ("Cultivar base", format!("{:+.1}", p.cultivar_base)),
            ("Rootstock", format!("{:+.1}", p.rootstock_modifier)),
            ("Tree age", format!("{:+.1}", p.age_modifier)),
            ("Timing", format!("{:+.2}", p.timing_modifier)),
            ("Confidence", format!("{:.2}", p.confidence)),
            ("vs commodity", format!("{:+.1}%", p.vs_commodity_pct(commodity_brix))),
        ];
        let mut out = key_values(&rows);
        out.push('\n');
        out.push_str(p.quality_message());
        Ok(self.with_notes(out, &p.notes))
    }

    /// Format an omega prediction.
    pub fn format_omega(&self, p: &OmegaPrediction) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(p);
        }
        let marbling = p
            .marbling_potential
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let rows = vec![
            ("Ratio", format!("{:.1}:1", p.ratio)),
            ("Range", format!("{:.1}-{:.1}:1", p.range.lower, p.range.upper)),
            ("Grade", p.grade.as_str().to_string()),
            ("Tier", self.tier(p.grade.quality_tier())),
            ("Diet contribution", format!("{:.2}", p.diet_contribution)),
            ("Finishing penalty", format!("{:.2}", p.finishing_penalty)),
            ("Coverage", format!("{:.0}%", p.coverage * 100.0)),
            (
                "Confidence",
                format!("{:.2} ({})", p.confidence, p.confidence_level.as_str()),
            ),
            ("Marbling", marbling),
        ];
        let mut out = key_values(&rows);
        if !p.phases.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Phase", "Months", "Baseline", "Weight", "Contribution"]);
            for phase in &p.phases {
                builder.push_record([
                    format!(
                        "{}{}",
                        phase.diet_type.as_str(),
                        if phase.is_finishing { " (finish)" } else { "" }
                    ),
                    format!("{:.1}", phase.duration_months),
                    format!("{:.1}", phase.baseline),
                    format!("{:.3}", phase.weight),
                    format!("{:.2}", phase.contribution),
                ]);
            }
            out.push('\n');
            out.push_str(&styled(builder));
        }
        Ok(self.with_notes(out, &p.data_quality_notes))
    }

    /// Format a validation report.
    pub fn format_validation(&self, r: &ValidationReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(r);
        }
        let status = if r.validation.is_valid {
            self.colorize("valid", "green")
        } else {
            self.colorize("invalid", "red")
        };
        let mut rows = vec![
            ("Status", status),
            ("Data quality", format!("{:.2}", r.data_quality.score)),
        ];
        if let Some(corrected) = r.validation.corrected_value {
            rows.push(("Corrected", format!("{}", corrected)));
        }
        if let Some(anomaly) = &r.anomaly {
            rows.push(("z-score", format!("{:.2}", anomaly.z_score)));
        }
        let mut out = key_values(&rows);

        for error in &r.validation.errors {
            let mut line = format!("✗ {} {}: {}", error.code.as_str(), error.field, error.message);
            if let Some(corrected) = error.corrected_value {
                line.push_str(&format!(" (corrected to {})", corrected));
            }
            out.push('\n');
            out.push_str(&self.colorize(&line, "red"));
        }
        let mut warnings = r.validation.warnings.clone();
        if let Some(anomaly) = r.anomaly.as_ref().filter(|a| a.is_anomaly) {
            if let Some(reason) = &anomaly.reason {
                warnings.push(Warning::new("ANOMALY", Severity::Warning, reason.clone()));
            }
        }
        if let Some(check) = &r.consistency {
            warnings.push(Warning::new("PROFILE_CONSISTENCY", check.severity, check.message.clone()));
        }
        out = self.with_warnings(out, &warnings);

        let mut notes = r.data_quality.issues.clone();
        notes.extend(r.data_quality.recommendations.iter().cloned());
        Ok(self.with_notes(out, &notes))
    }

    /// Format a distribution summary.
    pub fn format_distribution(&self, d: &Distribution, metric: MetricKind) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(d);
        }
        let unit = metric.unit();
        let p = &d.percentiles;
        let mut rows = vec![
            ("Method", d.method.as_str().to_string()),
            ("Point", format!("{:.2} {}", d.point_estimate, unit)),
            ("Mean", format!("{:.2}", d.mean)),
            ("Median", format!("{:.2}", d.median)),
            ("Std dev", format!("{:.2}", d.std_dev)),
            ("90% CI", format!("[{:.2}, {:.2}]", d.ci90.lower, d.ci90.upper)),
            ("IQR", format!("{:.2}", d.iqr)),
            (
                "Percentiles",
                format!(
                    "p5 {:.2} | p10 {:.2} | p25 {:.2} | p50 {:.2} | p75 {:.2} | p90 {:.2} | p95 {:.2}",
                    p.p5, p.p10, p.p25, p.p50, p.p75, p.p90, p.p95
                ),
            ),
        ];
        if d.n_samples > 0 {
            rows.push(("Samples", d.n_samples.to_string()));
        }
        if let Some(s) = d.pillar_shares {
            rows.push((
                "Variance shares",
                format!(
                    "heritage {:.0}% | soil {:.0}% | agricultural {:.0}% | ripen {:.0}%",
                    s.heritage * 100.0,
                    s.soil * 100.0,
                    s.agricultural * 100.0,
                    s.ripen * 100.0
                ),
            ));
        }
        Ok(key_values(&rows))
    }

    /// Format a full prediction envelope.
    pub fn format_prediction(&self, r: &PredictionResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(r);
        }
        let m = &r.primary_metric;
        let mut rows = vec![
            ("Prediction", r.prediction_id.to_string()),
            ("Category", r.category.to_string()),
            ("Primary metric", format!("{} = {:.2} {}", m.kind.as_str(), m.value, m.unit)),
            ("Tier", self.tier(r.quality_tier)),
            (
                "Confidence",
                format!("{:.2} ({})", r.confidence, r.confidence_level.as_str()),
            ),
            (
                "90% CI",
                format!("[{:.2}, {:.2}]", r.confidence_interval.lower, r.confidence_interval.upper),
            ),
            (
                "Profile",
                format!(
                    "{} ({}, expected {})",
                    r.classification.profile_id,
                    r.classification.profile_name,
                    r.classification.expected_range_display
                ),
            ),
        ];
        if let Some(status) = r.harvest_status() {
            rows.push(("Harvest status", status.as_str().to_string()));
        }
        if let Some(check) = r.consistency() {
            rows.push((
                "Measurement",
                if check.is_consistent {
                    self.colorize("consistent", "green")
                } else {
                    self.colorize("inconsistent", "red")
                },
            ));
        }
        let mut out = key_values(&rows);

        let mut builder = Builder::default();
        builder.push_record(["Pillar", "Contribution", "Variance share", "Source"]);
        for (name, pillar) in [
            ("heritage", &r.pillars.heritage),
            ("soil", &r.pillars.soil),
            ("agricultural", &r.pillars.agricultural),
            ("ripen", &r.pillars.ripen),
        ] {
            builder.push_record([
                name.to_string(),
                pillar
                    .contribution
                    .map(|c| format!("{:+.2}", c))
                    .unwrap_or_else(|| "-".to_string()),
                format!("{:.0}%", pillar.variance_share * 100.0),
                pillar.source.clone(),
            ]);
        }
        out.push('\n');
        out.push_str(&styled(builder));

        out = self.with_warnings(out, &r.warnings);
        Ok(self.with_notes(out, &r.data_quality_notes))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn tier(&self, tier: QualityTier) -> String {
        let color = match tier {
            QualityTier::Artisan => "magenta",
            QualityTier::Premium => "green",
            QualityTier::Standard => "blue",
            QualityTier::Commodity => "yellow",
        };
        self.colorize(tier.as_str(), color)
    }

    fn with_warnings(&self, mut out: String, warnings: &[Warning]) -> String {
        for w in warnings {
            let color = match w.severity {
                Severity::Critical => "red",
                Severity::Warning => "yellow",
                Severity::Info => "blue",
            };
            out.push('\n');
            out.push_str(&self.colorize(
                &format!("⚠ [{}] {}: {}", w.severity.as_str(), w.code, w.message),
                color,
            ));
        }
        out
    }

    fn with_notes(&self, mut out: String, notes: &[String]) -> String {
        for note in notes {
            out.push('\n');
            out.push_str(&self.colorize(&format!("ℹ {}", note), "cyan"));
        }
        out
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn key_values(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, value) in rows {
        builder.push_record([key.to_string(), value.clone()]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

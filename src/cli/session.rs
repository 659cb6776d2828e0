//! Input and analysis arguments shared by the calculation commands
//!
//! Resolution order for every setting: config layers, then the input file,
//! then command-line flags, then interactive answers.

use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::input::{parse_number, RawInputs, TimeQuantity};
use crate::core::units::TimeUnit;
use crate::core::Config;
use crate::kpi::{
    applicable_metrics, compute, validate, AnalysisMode, FormulaFamily, KpiOptions, KpiResult,
    Locale, Metric, NumberFormat, Warning,
};

/// Number flags accept anything; text that is not a number becomes NaN
fn lenient_number(s: &str) -> std::result::Result<f64, String> {
    Ok(parse_number(s))
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// YAML input file (see `rkt init`)
    pub file: Option<PathBuf>,

    /// Total operating time of the system or fleet
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub operating_time: Option<f64>,

    /// Unit of --operating-time
    #[arg(long)]
    pub operating_unit: Option<String>,

    /// Number of failures
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub failures: Option<f64>,

    /// Total repair time
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub repair_time: Option<f64>,

    /// Unit of --repair-time
    #[arg(long)]
    pub repair_unit: Option<String>,

    /// Total time to detect failures
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub detection_time: Option<f64>,

    /// Unit of --detection-time
    #[arg(long)]
    pub detection_unit: Option<String>,

    /// Total operating time of all non-repairable items
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub item_time: Option<f64>,

    /// Unit of --item-time
    #[arg(long)]
    pub item_unit: Option<String>,

    /// Number of failed items
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub failed_items: Option<f64>,

    /// Total preventive maintenance time
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub pm_time: Option<f64>,

    /// Unit of --pm-time
    #[arg(long)]
    pub pm_unit: Option<String>,

    /// Number of preventive maintenance actions
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub pm_actions: Option<f64>,

    /// Number of planned maintenance actions
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub planned: Option<f64>,

    /// Number of unplanned maintenance actions
    #[arg(long, value_parser = lenient_number, allow_hyphen_values = true)]
    pub corrective: Option<f64>,

    /// Prompt for every input, defaulting to the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Analysis perspective
    #[arg(long, short = 'm')]
    pub mode: Option<AnalysisMode>,

    /// Formula family for repairable KPIs
    #[arg(long)]
    pub family: Option<FormulaFamily>,

    /// Track preventive maintenance time
    #[arg(long, overrides_with = "no_pm")]
    pub pm: bool,

    /// Don't track preventive maintenance time, even if the config does
    #[arg(long, overrides_with = "pm")]
    pub no_pm: bool,

    /// Display unit for durations
    #[arg(long, short = 'u')]
    pub unit: Option<TimeUnit>,

    /// Number formatting convention
    #[arg(long)]
    pub locale: Option<Locale>,
}

impl AnalysisArgs {
    /// `--pm` / `--no-pm`, or None to keep the configured setting
    pub fn preventive_maintenance(&self) -> Option<bool> {
        match (self.pm, self.no_pm) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn override_duration(q: &mut TimeQuantity, value: Option<f64>, unit: &Option<String>) {
    if let Some(v) = value {
        q.value = v;
    }
    if let Some(u) = unit {
        q.unit = u.clone();
    }
}

fn override_count(count: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *count = v;
    }
}

impl InputArgs {
    /// Read the input file (if any) and apply flag overrides
    pub fn load(&self) -> Result<RawInputs> {
        let mut inputs = match &self.file {
            Some(path) => RawInputs::load(path)?,
            None => RawInputs::default(),
        };
        self.apply(&mut inputs);

        if self.interactive {
            prompt_inputs(&mut inputs)?;
        }
        Ok(inputs)
    }

    fn apply(&self, inputs: &mut RawInputs) {
        override_duration(&mut inputs.operating_time, self.operating_time, &self.operating_unit);
        override_duration(&mut inputs.repair_time, self.repair_time, &self.repair_unit);
        override_duration(&mut inputs.detection_time, self.detection_time, &self.detection_unit);
        override_duration(&mut inputs.item_operating_time, self.item_time, &self.item_unit);
        override_duration(&mut inputs.pm_time, self.pm_time, &self.pm_unit);
        override_count(&mut inputs.failures, self.failures);
        override_count(&mut inputs.failed_items, self.failed_items);
        override_count(&mut inputs.pm_actions, self.pm_actions);
        override_count(&mut inputs.planned_actions, self.planned);
        override_count(&mut inputs.corrective_actions, self.corrective);
    }
}

fn current(x: f64) -> String {
    if x.is_finite() {
        x.to_string()
    } else {
        String::new()
    }
}

fn ask(theme: &ColorfulTheme, prompt: &str, value: f64) -> Result<f64> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(current(value))
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    Ok(parse_number(&answer))
}

fn ask_duration(theme: &ColorfulTheme, prompt: &str, q: &mut TimeQuantity) -> Result<()> {
    q.value = ask(theme, prompt, q.value)?;
    q.unit = Input::with_theme(theme)
        .with_prompt(format!("{} unit (hours/days/years)", prompt))
        .default(q.unit.clone())
        .interact_text()
        .into_diagnostic()?;
    Ok(())
}

fn prompt_inputs(inputs: &mut RawInputs) -> Result<()> {
    let theme = ColorfulTheme::default();

    ask_duration(&theme, "Total operating time of all items", &mut inputs.item_operating_time)?;
    inputs.failed_items = ask(&theme, "Failed items", inputs.failed_items)?;
    ask_duration(&theme, "Total operating time", &mut inputs.operating_time)?;
    inputs.failures = ask(&theme, "Failures", inputs.failures)?;
    ask_duration(&theme, "Total repair time", &mut inputs.repair_time)?;
    ask_duration(&theme, "Total detection time", &mut inputs.detection_time)?;
    ask_duration(&theme, "Total preventive maintenance time", &mut inputs.pm_time)?;
    inputs.pm_actions = ask(&theme, "Preventive maintenance actions", inputs.pm_actions)?;
    inputs.planned_actions = ask(&theme, "Planned maintenance actions", inputs.planned_actions)?;
    inputs.corrective_actions =
        ask(&theme, "Unplanned maintenance actions", inputs.corrective_actions)?;
    Ok(())
}

/// Inputs plus resolved settings, ready to compute
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub inputs: RawInputs,
    pub mode: AnalysisMode,
    pub options: KpiOptions,
    pub unit: TimeUnit,
    pub format: NumberFormat,
}

impl Session {
    pub fn prepare(input: &InputArgs, analysis: &AnalysisArgs) -> Result<Self> {
        Ok(Self::resolve(Config::load(), input.load()?, analysis))
    }

    /// Apply flags on top of the loaded configuration
    pub fn resolve(config: Config, inputs: RawInputs, analysis: &AnalysisArgs) -> Self {
        let mut options = config.options();
        if let Some(family) = analysis.family {
            options.family = family;
        }
        if let Some(pm) = analysis.preventive_maintenance() {
            options.tracks_preventive_maintenance = pm;
        }

        let mut format = config.number_format();
        if let Some(locale) = analysis.locale {
            format.locale = locale;
        }

        Self {
            mode: analysis.mode.unwrap_or_else(|| config.mode()),
            unit: analysis.unit.unwrap_or_else(|| config.display_unit()),
            options,
            format,
            inputs,
            config,
        }
    }

    pub fn compute(&self) -> KpiResult {
        compute(&self.inputs, self.mode, &self.options)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        applicable_metrics(self.mode, &self.options)
    }

    pub fn warnings(&self) -> Vec<Warning> {
        validate(&self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides() {
        let args = InputArgs {
            operating_time: Some(120.0),
            operating_unit: Some("days".to_string()),
            failures: Some(2.0),
            repair_unit: Some("days".to_string()),
            ..InputArgs::default()
        };
        let mut inputs = RawInputs {
            repair_time: TimeQuantity::hours(1.5),
            ..RawInputs::default()
        };
        args.apply(&mut inputs);

        assert_eq!(inputs.operating_time.in_hours(), 2880.0);
        assert_eq!(inputs.failures, 2.0);
        // unit flag alone re-reads the existing value in the new unit
        assert_eq!(inputs.repair_time.in_hours(), 36.0);
        assert!(inputs.corrective_actions.is_nan());
    }

    #[test]
    fn test_lenient_number() {
        assert_eq!(lenient_number("12.5"), Ok(12.5));
        assert!(lenient_number("abc").unwrap().is_nan());
    }

    #[test]
    fn test_flags_beat_config() {
        let config = Config {
            display_unit: Some(TimeUnit::Years),
            family: Some(FormulaFamily::DetectionAware),
            locale: Some(Locale::Nl),
            ..Config::default()
        };
        let analysis = AnalysisArgs {
            unit: Some(TimeUnit::Days),
            pm: true,
            ..AnalysisArgs::default()
        };
        let session = Session::resolve(config, RawInputs::default(), &analysis);

        assert_eq!(session.unit, TimeUnit::Days);
        assert_eq!(session.mode, AnalysisMode::Combined);
        assert_eq!(session.options.family, FormulaFamily::DetectionAware);
        assert!(session.options.tracks_preventive_maintenance);
        assert_eq!(session.format.locale, Locale::Nl);
    }

    #[test]
    fn test_no_pm_flag_beats_config() {
        let config = Config {
            preventive_maintenance: Some(true),
            ..Config::default()
        };

        let defaults = AnalysisArgs::default();
        let session = Session::resolve(config.clone(), RawInputs::default(), &defaults);
        assert!(session.options.tracks_preventive_maintenance);

        let analysis = AnalysisArgs {
            no_pm: true,
            ..AnalysisArgs::default()
        };
        let session = Session::resolve(config, RawInputs::default(), &analysis);
        assert!(!session.options.tracks_preventive_maintenance);
    }

    #[test]
    fn test_last_pm_flag_wins() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            analysis: AnalysisArgs,
        }

        let h = Harness::parse_from(["rkt", "--pm", "--no-pm"]);
        assert_eq!(h.analysis.preventive_maintenance(), Some(false));
        let h = Harness::parse_from(["rkt", "--no-pm", "--pm"]);
        assert_eq!(h.analysis.preventive_maintenance(), Some(true));
        let h = Harness::parse_from(["rkt"]);
        assert_eq!(h.analysis.preventive_maintenance(), None);
    }
}

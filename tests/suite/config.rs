//! Config file loading and its effect on resolution.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use pulse_config::{ConfigError, DEFAULT_DEGRADE_WINDOW_DAYS, DEFAULT_RANGE_DAYS, PulseConfig};
use pulse_engine::{Navigator, ResolutionResult, ResolveOptions, RulePreprocessor};
use pulse_types::{Action, DataSource, InteractionContext};

use crate::common::{day, range};

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

fn load(path: &Path) -> ResolveOptions {
    ResolveOptions::from_config(&PulseConfig::load_from(path).unwrap())
}

#[test]
fn full_config_drives_options() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[app]
today = "2021-03-10"

[navigation]
default_range_days = 14
degrade_window_days = 2

[sources]
viewable = ["weight", "step_count"]
"#,
    );

    let options = load(&path);

    assert_eq!(options.today, day(2021, 3, 10));
    assert_eq!(
        options.viewable_sources,
        vec![DataSource::Weight, DataSource::StepCount]
    );
    assert_eq!(
        options.default_range(),
        range(day(2021, 2, 25), day(2021, 3, 10))
    );
}

#[test]
fn empty_sections_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[app]\ntoday = \"2021-03-10\"\n[navigation]\n[sources]\n");

    let options = load(&path);

    assert_eq!(options.default_range_days, DEFAULT_RANGE_DAYS);
    assert_eq!(options.degrade_window_days, DEFAULT_DEGRADE_WINDOW_DAYS);
    assert_eq!(options.viewable_sources, DataSource::ALL.to_vec());
}

#[test]
fn unknown_section_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[theme]\ncolor = \"blue\"\n");

    let err = PulseConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = PulseConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "{err}");
}

#[test]
fn configured_sources_and_window_reach_the_navigator() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[app]
today = "2021-03-10"

[navigation]
degrade_window_days = 2

[sources]
viewable = ["weight", "step_count"]
"#,
    );
    let mut navigator = Navigator::new(RulePreprocessor::new(), load(&path));

    let result = navigator
        .handle_utterance("show 2021-03-05", &InteractionContext::Global)
        .unwrap();

    assert_eq!(
        result,
        ResolutionResult::Effective(Action::GoToBrowseRange {
            data_source: Some(DataSource::Weight),
            range: Some(range(day(2021, 3, 3), day(2021, 3, 7))),
            highlight_filter: None,
        })
    );
    assert_eq!(navigator.info().data_source(), Some(DataSource::Weight));
}

use super::*;

use shared::config::{PausePolicy, DEFAULT_ACTIVATION_THRESHOLD};
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("folio_sim_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

#[test]
fn file_values_override_defaults() {
    let root = temp_root("config_file");
    let path = root.join("folio.toml");
    fs::write(
        &path,
        "[carousel]\nautoplay_period_ms = 1200\npause_policy = \"restart_on_resume\"\n",
    )
    .expect("write config");

    let settings = load_settings(Some(path.as_path())).expect("load");
    assert_eq!(settings.carousel.autoplay_period_ms, 1200);
    assert_eq!(settings.carousel.pause_policy, PausePolicy::RestartOnResume);
    assert_eq!(
        settings.tracker.activation_threshold,
        DEFAULT_ACTIVATION_THRESHOLD
    );

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let root = temp_root("config_missing");
    let error = load_settings(Some(root.join("absent.toml").as_path())).expect_err("missing file");
    assert!(error.to_string().contains("absent.toml"));
    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn environment_overrides_tracker_values() {
    env::set_var("APP__TRACKER__SCROLLED_OFFSET", "75");
    let settings = load_settings(None);
    env::remove_var("APP__TRACKER__SCROLLED_OFFSET");

    let settings = settings.expect("load");
    assert_eq!(settings.tracker.scrolled_offset, 75.0);
}

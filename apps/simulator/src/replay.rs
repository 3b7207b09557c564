use std::{fs, io::Write, path::Path};

use anyhow::Context;
use page_runtime::PageSession;
use serde::{Deserialize, Serialize};
use shared::protocol::{HostEvent, RenderUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

#[derive(Debug, Serialize)]
pub struct ReplayLine<'a> {
    pub step: usize,
    pub at_ms: u64,
    pub update: &'a RenderUpdate,
}

pub fn load_script(path: &Path) -> anyhow::Result<ReplayScript> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse replay script '{}'", path.display()))
}

/// Feeds every scripted event into `session` and writes one JSON line per
/// render update. Returns the number of lines written.
pub fn replay<W: Write>(
    session: &mut PageSession,
    script: &ReplayScript,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut written = 0;
    for (step, event) in script.events.iter().enumerate() {
        for update in session.handle(event) {
            let line = ReplayLine {
                step,
                at_ms: session.elapsed().as_millis() as u64,
                update: &update,
            };
            serde_json::to_writer(&mut *out, &line).context("failed to encode render update")?;
            writeln!(out).context("failed to write render update")?;
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use shared::config::{CarouselConfig, TrackerConfig};

    use super::*;

    const SCRIPT: &str = r#"
        [[events]]
        type = "elapsed"
        ms = 10

        [[events]]
        type = "pointer_enter"

        [[events]]
        type = "elapsed"
        ms = 20

        [[events]]
        type = "dot_clicked"
        index = 9

        [[events]]
        type = "scroll"
        scroll_y = 700.0
        sections = [
            { id = "home", viewport_top = -700.0 },
            { id = "about", viewport_top = 100.0 },
        ]
    "#;

    #[test]
    fn replay_writes_one_json_line_per_update() {
        let script: ReplayScript = toml::from_str(SCRIPT).expect("script");
        let mut session = PageSession::with_defaults(
            &TrackerConfig::default(),
            &CarouselConfig::with_period_ms(5),
        )
        .expect("session");

        let mut out = Vec::new();
        let written = replay(&mut session, &script, &mut out).expect("replay");

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(written, lines.len());
        assert_eq!(written, 5);

        assert_eq!(lines[0]["update"]["type"], "carousel");
        assert_eq!(lines[1]["update"]["payload"]["current_index"], 2);
        assert_eq!(lines[2]["update"]["payload"]["is_paused"], true);
        assert_eq!(lines[3]["update"]["type"], "rejected");
        assert_eq!(lines[3]["step"], 3);
        assert_eq!(lines[4]["update"]["payload"]["active"], "about");
        assert_eq!(lines[4]["at_ms"], 30);
    }

    #[test]
    fn bundled_tour_ends_with_teardown() {
        let script: ReplayScript =
            toml::from_str(include_str!("../scripts/tour.toml")).expect("tour script");
        let mut session = PageSession::with_defaults(
            &TrackerConfig::default(),
            &CarouselConfig::default(),
        )
        .expect("session");

        let mut out = Vec::new();
        replay(&mut session, &script, &mut out).expect("replay");

        assert_eq!(session.navigation().active().as_str(), "contact");
        assert!(session.carousel().is_disposed());
        let last = String::from_utf8(out)
            .expect("utf8")
            .lines()
            .last()
            .map(str::to_string)
            .expect("at least one update");
        let last: serde_json::Value = serde_json::from_str(&last).expect("json");
        assert_eq!(last["update"]["payload"]["is_running"], false);
    }

    #[test]
    fn empty_script_is_valid() {
        let script: ReplayScript = toml::from_str("").expect("script");
        assert!(script.events.is_empty());
    }
}

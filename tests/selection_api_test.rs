//! Library-level tests for the selection pipeline: chain routing, envelope
//! invariants, and (on Unix) the result-channel handshake against a real
//! engine process.
#![allow(deprecated)]

use copilot_picker::catalog::{envelope, load_from_reader, Copilot};
use copilot_picker::error::PickerError;
use copilot_picker::fallback::{run_chain, Choice, LinePromptTier, SelectionTier};
use copilot_picker::terminal::Capability;

fn catalog() -> Vec<Copilot> {
    load_from_reader(
        r#"[
            {"copilot_id":"a1","name":"Alpha","skills":[{"name":"Forecast"}]},
            {"copilot_id":"b2","name":"Beta","description":"second"},
            {"copilot_id":"c3","name":"Gamma"},
            {"copilot_id":"d4","name":"Delta"},
            {"copilot_id":"e5","name":"Epsilon"}
        ]"#
        .as_bytes(),
        "test",
    )
    .unwrap()
}

fn interactive() -> Capability {
    Capability {
        interactive: true,
        reason: "test".into(),
    }
}

struct ChannelFailingTier;

impl SelectionTier for ChannelFailingTier {
    fn name(&self) -> &'static str {
        "full"
    }

    fn needs_terminal(&self) -> bool {
        true
    }

    fn attempt(&self, _catalog: &[Copilot]) -> copilot_picker::Result<Vec<Copilot>> {
        Err(PickerError::ChannelCreation {
            path: "/tmp/denied/result.pipe".into(),
            message: "permission denied".into(),
        })
    }
}

struct FixedTier(Vec<usize>);

impl SelectionTier for FixedTier {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn needs_terminal(&self) -> bool {
        true
    }

    fn attempt(&self, catalog: &[Copilot]) -> copilot_picker::Result<Vec<Copilot>> {
        Ok(envelope::from_checked_indices(catalog, &self.0))
    }
}

#[test]
fn channel_failure_falls_through_and_the_next_tier_result_stands() {
    let tiers: Vec<Box<dyn SelectionTier>> = vec![
        Box::new(ChannelFailingTier),
        Box::new(FixedTier(vec![4, 1])),
    ];

    let selected = run_chain(&tiers, &interactive(), &catalog()).unwrap();
    let ids: Vec<&str> = selected.iter().map(|c| c.copilot_id.as_str()).collect();
    assert_eq!(ids, ["b2", "e5"]);
}

#[test]
fn envelope_is_always_an_order_preserving_subsequence() {
    let catalog = catalog();
    for checked in [vec![], vec![0], vec![4, 0, 2], vec![3, 1, 4, 0, 2]] {
        let selected = envelope::from_checked_indices(&catalog, &checked);

        let mut cursor = 0;
        for record in &selected {
            let pos = catalog[cursor..]
                .iter()
                .position(|c| c.copilot_id == record.copilot_id)
                .expect("envelope entry must appear later in the catalog");
            cursor += pos + 1;
        }
    }
}

#[test]
fn envelope_round_trip_preserves_extra_fields() {
    let catalog = catalog();
    let selected = envelope::from_checked_indices(&catalog, &[0, 2]);
    let json = envelope::to_json(&selected).unwrap();

    let resolved = envelope::resolve(&catalog, &json, "full").unwrap();
    assert_eq!(resolved, selected);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["skills"][0]["name"], "Forecast");
}

#[test]
fn ordinal_prompt_line_matches_the_equivalent_interactive_selection() {
    let catalog = catalog();

    // "1,3" at the line prompt and checking indices 0 and 2 interactively
    // must produce identical envelopes.
    let choice = copilot_picker::fallback::line_prompt::parse_choice("1,3", catalog.len()).unwrap();
    let Choice::Ordinals(indices) = choice else {
        panic!("expected ordinals");
    };
    assert_eq!(
        envelope::from_checked_indices(&catalog, &indices),
        envelope::from_checked_indices(&catalog, &[0, 2]),
    );
}

#[test]
fn line_prompt_is_the_only_tier_reached_without_a_terminal() {
    let tiers: Vec<Box<dyn SelectionTier>> =
        vec![Box::new(ChannelFailingTier), Box::new(LinePromptTier)];
    let capability = Capability::disabled("no terminal");

    // ChannelFailingTier would error if attempted; with capability disabled
    // the chain must reach the prompt directly, which answers from the env.
    std::env::set_var("COPILOT_PICKER_CHOICE", "4");
    let result = run_chain(&tiers, &capability, &catalog());
    std::env::remove_var("COPILOT_PICKER_CHOICE");

    let selected = result.unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].copilot_id, "d4");
}

#[cfg(unix)]
mod channel_handshake {
    use super::*;
    use assert_cmd::cargo::cargo_bin;
    use copilot_picker::channel::ResultChannel;
    use std::process::{Command, Stdio};

    /// Drives the real engine binary over a real channel. The test process
    /// has no terminal, so the engine refuses to render, writes an empty
    /// envelope, and exits non-zero — exactly the contract the orchestrator
    /// relies on when falling through.
    #[test]
    fn engine_without_terminal_reports_failure_through_the_channel() {
        let base = tempfile::tempdir().unwrap();
        let channel = ResultChannel::create_in(base.path()).unwrap();
        let catalog_path = channel.spool_catalog(&catalog()).unwrap();

        let reader = channel.begin_read();

        let status = Command::new(cargo_bin("copilot-picker"))
            .arg("engine")
            .args(["--tier", "full"])
            .arg("--catalog")
            .arg(&catalog_path)
            .arg("--channel")
            .arg(channel.pipe_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();

        let payload = reader.collect().unwrap();
        assert!(!status.success());
        assert_eq!(payload, "[]");
    }

    #[test]
    fn channel_nodes_never_outlive_the_attempt() {
        let base = tempfile::tempdir().unwrap();

        let (pipe, dir) = {
            let channel = ResultChannel::create_in(base.path()).unwrap();
            let reader = channel.begin_read();
            // Simulated engine crash: no writer ever appears.
            assert_eq!(reader.collect().unwrap(), "");
            (
                channel.pipe_path().to_path_buf(),
                channel.dir().to_path_buf(),
            )
        };

        assert!(!pipe.exists());
        assert!(!dir.exists());
    }
}

//! End-to-end tests for the JSON bridge.
//!
//! Each test feeds a script of newline-delimited `UiEvent` JSON into
//! `run_bridge` and inspects the envelopes written back. Web lookups use an
//! in-process fake so no network is touched.

use etya::SiteConfig;
use etya::host::SiteHost;
use etya::host::stdio::run_bridge;
use etya_search::{ContentRecord, SearchError, WebLookup};
use serde_json::{Value, json};
use tokio::io::AsyncReadExt;

// ---------------------------------------------------------------------------
// Test harness
// ---------------------------------------------------------------------------

struct OneResultLookup;

impl WebLookup for OneResultLookup {
    async fn lookup(&self, query: &str) -> Result<Vec<ContentRecord>, SearchError> {
        Ok(vec![ContentRecord::web(
            format!("{query} on the web"),
            "Web excerpt...",
            "https://duckduckgo.com/Example",
        )])
    }

    fn name(&self) -> &'static str {
        "one-result"
    }
}

/// Run the bridge over `events` (one JSON value per line) and return every
/// envelope it wrote.
async fn run_script(config: SiteConfig, events: &[Value]) -> Vec<Value> {
    let mut script = String::new();
    for event in events {
        script.push_str(&event.to_string());
        script.push('\n');
    }
    run_raw(config, &script).await
}

async fn run_raw(config: SiteConfig, script: &str) -> Vec<Value> {
    let (host, outbound) = SiteHost::new(&config, OneResultLookup);
    let (writer, mut reader) = tokio::io::duplex(1 << 20);

    run_bridge(host, outbound, script.as_bytes(), writer)
        .await
        .expect("bridge should exit cleanly");

    let mut output = String::new();
    reader
        .read_to_string(&mut output)
        .await
        .expect("read bridge output");
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

fn of_type<'a>(envelopes: &'a [Value], kind: &str) -> Vec<&'a Value> {
    envelopes.iter().filter(|e| e["type"] == kind).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_load_reports_frequency_and_reveal_delays() {
    let envelopes = run_script(
        SiteConfig::default(),
        &[json!({
            "event": "page_loaded",
            "path": "/sports.html",
            "content_cards": 3
        })],
    )
    .await;

    assert_eq!(envelopes.len(), 1);
    let env = &envelopes[0];
    assert_eq!(env["type"], "effects");
    assert_eq!(env["event"], "page_loaded");
    assert_eq!(env["effects"][0]["effect"], "set_frequency_labels");
    assert_eq!(env["effects"][0]["text"], "100.3 FM");
    assert_eq!(env["effects"][1]["delays_ms"], json!([0, 100, 200]));
    assert_eq!(env["state"]["active_link"], "sports.html");
}

#[tokio::test]
async fn malformed_line_reports_error_and_continues() {
    let envelopes = run_raw(
        SiteConfig::default(),
        "not json\n\n{\"event\":\"menu_toggle_clicked\"}\n",
    )
    .await;

    assert_eq!(envelopes.len(), 2);
    assert_eq!(envelopes[0]["type"], "error");
    assert!(
        envelopes[0]["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to parse event"))
    );
    assert_eq!(envelopes[1]["event"], "menu_toggle_clicked");
    assert_eq!(envelopes[1]["state"]["menu_open"], true);
    assert_eq!(envelopes[1]["state"]["menu_label"], "✕");
}

#[tokio::test]
async fn enter_key_runs_search_and_reports_rendered_panel() {
    let envelopes = run_script(
        SiteConfig::default(),
        &[
            json!({ "event": "search_input_changed", "value": "football" }),
            json!({ "event": "search_key_pressed", "key": "Enter" }),
        ],
    )
    .await;

    let started = of_type(&envelopes, "search_started");
    assert_eq!(started.len(), 1);
    assert_eq!(started[0]["state"]["results"]["content"]["state"], "loading");
    assert_eq!(started[0]["generation"], 1);

    let finished = of_type(&envelopes, "search_finished");
    assert_eq!(finished.len(), 1);
    let finished = finished[0];
    assert_eq!(finished["query"], "football");
    assert_eq!(finished["outcome"]["status"], "rendered");
    assert_eq!(finished["outcome"]["count"], 2);
    assert_eq!(finished["outcome"]["generation"], started[0]["generation"]);

    let html = finished["results_html"].as_str().expect("html string");
    let local = html.find("Football League Updates").expect("local card");
    let web = html.find("football on the web").expect("web card");
    assert!(local < web);
    assert_eq!(finished["state"]["results"]["visible"], true);
}

#[tokio::test]
async fn blank_search_clears_without_loading() {
    let envelopes = run_script(
        SiteConfig::default(),
        &[json!({ "event": "search_button_clicked" })],
    )
    .await;

    assert!(of_type(&envelopes, "search_started").is_empty());
    let finished = of_type(&envelopes, "search_finished");
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0]["outcome"]["status"], "cleared");
    assert_eq!(finished[0]["state"]["results"]["visible"], false);
}

#[tokio::test]
async fn live_button_scrolls_then_autoplays() {
    let mut config = SiteConfig::default();
    config.player.autoplay_delay_ms = 10;

    let envelopes = run_script(
        config,
        &[
            json!({
                "event": "page_loaded",
                "path": "/index.html",
                "element_ids": ["live-player"]
            }),
            json!({ "event": "live_button_clicked" }),
        ],
    )
    .await;

    let live = envelopes
        .iter()
        .find(|e| e["event"] == "live_button_clicked")
        .expect("live button envelope");
    assert_eq!(live["effects"][0]["effect"], "prevent_default");
    assert_eq!(live["effects"][1]["effect"], "scroll");
    assert_eq!(live["effects"][1]["target"], "live-player");
    assert_eq!(live["state"]["player"]["playing"], false);

    let last = envelopes.last().expect("at least one envelope");
    assert_eq!(last["event"], "autoplay_timer_fired");
    assert_eq!(last["state"]["player"]["playing"], true);
    assert_eq!(last["state"]["player"]["label"], "⏸ Stop Playing");
}

#[tokio::test]
async fn escape_hides_results_and_blurs_search() {
    let envelopes = run_script(
        SiteConfig::default(),
        &[
            json!({ "event": "key_down", "key": "k", "ctrl": true }),
            json!({ "event": "key_down", "key": "Escape" }),
        ],
    )
    .await;

    assert_eq!(envelopes.len(), 2);
    assert_eq!(
        envelopes[0]["effects"],
        json!([{ "effect": "prevent_default" }, { "effect": "focus_search" }])
    );
    assert_eq!(envelopes[0]["state"]["search_box"]["focused"], true);
    assert_eq!(envelopes[1]["effects"], json!([{ "effect": "blur_search" }]));
    assert_eq!(envelopes[1]["state"]["search_box"]["focused"], false);
    assert_eq!(envelopes[1]["state"]["results"]["visible"], false);
}

#[tokio::test]
async fn fullscreen_exit_reported_by_page_resets_toggle() {
    let envelopes = run_script(
        SiteConfig::default(),
        &[
            json!({ "event": "page_loaded", "path": "/", "video_placeholder": true }),
            json!({ "event": "fullscreen_clicked" }),
            json!({ "event": "fullscreen_changed", "active": false }),
            json!({ "event": "fullscreen_clicked" }),
        ],
    )
    .await;

    assert_eq!(envelopes.len(), 4);
    let enter = json!([{ "effect": "fullscreen", "request": "enter" }]);
    assert_eq!(envelopes[1]["effects"], enter);
    assert_eq!(envelopes[2]["state"]["fullscreen"]["active"], false);
    assert_eq!(envelopes[3]["effects"], enter);
    assert_eq!(envelopes[3]["state"]["fullscreen"]["active"], true);
}

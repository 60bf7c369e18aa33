//! Common utilities for integration tests
//!
//! Runs the built `fsmerge` binary against fixture exports written into a
//! temp directory and captures its output for assertions.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of one `fsmerge` invocation
#[derive(Debug)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `fsmerge` with the given arguments in the given working directory
pub fn run_fsmerge(working_dir: &Path, args: &[&str]) -> Result<RunResult> {
    let output = Command::new(find_fsmerge_binary())
        .args(args)
        .current_dir(working_dir)
        .output()
        .context("Failed to execute fsmerge")?;

    Ok(RunResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Find the fsmerge binary relative to the test binary location
fn find_fsmerge_binary() -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current exe path");
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/

    let debug_bin = path.join("fsmerge");
    if debug_bin.exists() {
        return debug_bin;
    }

    path.pop(); // Remove debug/
    let release_bin = path.join("release").join("fsmerge");
    if release_bin.exists() {
        return release_bin;
    }

    path.join("debug").join("fsmerge")
}

/// Build a FilmScribe export around the given event-list body
pub fn filmscribe_xml(optical_count: usize, events_body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <FilmScribeFile Version=\"1.0\"><AssembleList>\
         <ListHead><Title>REEL_1</Title><Tracks>V1</Tracks>\
         <OpticalCount>{optical_count}</OpticalCount></ListHead>\
         <Events>{events_body}</Events>\
         </AssembleList></FilmScribeFile>"
    )
}

/// A Locator comment carrying a shot code, with optional clip and timecode
pub fn locator(text: &str, clip: Option<&str>, tc: Option<&str>) -> String {
    let mut body = format!("<Comment Type=\"Locator\"><Text>{text}</Text>");
    if let Some(clip) = clip {
        body.push_str(&format!("<Source><ClipName>{clip}</ClipName></Source>"));
    }
    if let Some(tc) = tc {
        body.push_str(&format!("<Master><Timecode>{tc}</Timecode></Master>"));
    }
    body.push_str("</Comment>");
    body
}

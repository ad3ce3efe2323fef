//! Pointer log processing commands
//!
//! These commands replay recorded pointer logs through the cursor tracker,
//! for previewing trailing behaviour offline.

use crate::input::types::TimedPointerEvent;
use crate::processing::cursor_tracker::{replay_events, TrackerConfig, TrackerFrame};
use anyhow::Context;
use std::path::Path;

/// Default output framerate for replays
pub const DEFAULT_OUTPUT_FPS: f64 = 60.0;

fn read_pointer_log(input_file: &Path) -> anyhow::Result<Vec<TimedPointerEvent>> {
    let content = std::fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file {}", input_file.display()))?;
    let mut events: Vec<TimedPointerEvent> =
        serde_json::from_str(&content).context("Failed to parse pointer events")?;

    // Logs from several listeners may interleave
    events.sort_by(|a, b| a.process_time_ms.total_cmp(&b.process_time_ms));
    Ok(events)
}

/// Replay a pointer log and return one tracker frame per output tick
pub fn replay_pointer_log(
    input_file: &Path,
    config: &TrackerConfig,
    output_fps: f64,
) -> anyhow::Result<Vec<TrackerFrame>> {
    let events = read_pointer_log(input_file)?;

    tracing::info!(
        "Replaying {} pointer events at {}fps with config: ring={}, glow={}",
        events.len(),
        output_fps,
        config.ring_smoothing,
        config.glow_smoothing
    );

    let frames = replay_events(&events, config, output_fps)?;

    tracing::info!("Generated {} tracker frames", frames.len());

    Ok(frames)
}

/// Replay a pointer log and write the frames to `output_file`
pub fn process_pointer_log(
    input_file: &Path,
    output_file: &Path,
    config: &TrackerConfig,
    output_fps: f64,
) -> anyhow::Result<usize> {
    let frames = replay_pointer_log(input_file, config, output_fps)?;
    let output = serde_json::to_vec_pretty(&frames).context("Failed to serialize frames")?;

    std::fs::write(output_file, output)
        .with_context(|| format!("Failed to write output file {}", output_file.display()))?;

    tracing::info!("Wrote {} tracker frames to {}", frames.len(), output_file.display());

    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = r#"[
        { "type": "enter", "processTimeMs": 0 },
        { "type": "move", "x": 200, "y": 100, "processTimeMs": 40 },
        { "type": "move", "x": 180, "y": 120, "processTimeMs": 20 },
        { "type": "leave", "processTimeMs": 500 }
    ]"#;

    #[test]
    fn test_replay_pointer_log() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pointer.json");
        std::fs::write(&input, LOG).unwrap();

        let frames = replay_pointer_log(&input, &TrackerConfig::default(), 50.0).unwrap();

        assert_eq!(frames.len(), 25);
        // Sorted by time, so the last move applied is (200, 100)
        let settled = &frames[10].snapshot;
        assert_eq!(settled.position.x, 200.0);
        assert_eq!(settled.position.y, 100.0);
        assert!(!frames.last().unwrap().snapshot.is_visible);
    }

    #[test]
    fn test_process_pointer_log_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pointer.json");
        let output = dir.path().join("frames.json");
        std::fs::write(&input, LOG).unwrap();

        let count =
            process_pointer_log(&input, &output, &TrackerConfig::default(), DEFAULT_OUTPUT_FPS)
                .unwrap();

        let written: Vec<TrackerFrame> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.len(), count);
        assert!(written[0].frame_time_ms > 0.0);
    }

    #[test]
    fn test_malformed_log_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pointer.json");
        std::fs::write(&input, "{ not json").unwrap();

        let err = replay_pointer_log(&input, &TrackerConfig::default(), 60.0).unwrap_err();
        assert!(err.to_string().contains("Failed to parse pointer events"));
    }
}

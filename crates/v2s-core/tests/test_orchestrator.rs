#[allow(dead_code)]
mod common;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use v2s_core::actions::{ActionConfig, ActionType, GuiAction};
use v2s_core::consts::{ACTIONS_FILE_NAME, DETECTION_FILE_NAME, EVENTS_FILE_NAME};
use v2s_core::error::{Result, V2sError};
use v2s_core::io::read_json;
use v2s_core::pipeline::{
    ActionPhase, ArtifactLayout, NoOpReporter, Phase, Pipeline, PipelineConfig, ProgressReporter,
};

struct RecordingPhase {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
    fail: bool,
}

impl Phase for RecordingPhase {
    fn execute(&mut self) -> Result<()> {
        self.log.borrow_mut().push(self.name);
        if self.fail {
            return Err(V2sError::FrameSource(format!("{} failed", self.name)));
        }
        Ok(())
    }
}

fn recording(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, fail: bool) -> Box<dyn Phase> {
    Box::new(RecordingPhase {
        name,
        log: Rc::clone(log),
        fail,
    })
}

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl ProgressReporter for EventLog {
    fn begin_phase(&self, index: usize, total: usize) {
        self.0.lock().unwrap().push(format!("phase {index}/{total}"));
    }

    fn begin_video(&self, video: &Path, index: usize, total: usize) {
        let name = video.file_name().unwrap().to_string_lossy();
        self.0.lock().unwrap().push(format!("video {name} {index}/{total}"));
    }

    fn finish_video(&self, _artifact: &Path, detections: usize) {
        self.0.lock().unwrap().push(format!("done {detections}"));
    }
}

#[test]
fn test_phases_run_in_insertion_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut pipeline = Pipeline::new();
    pipeline.add_phase(recording("first", &log, false));
    pipeline.add_phase(recording("second", &log, false));
    pipeline.add_phase(recording("first", &log, false));

    assert_eq!(pipeline.len(), 3);
    pipeline.execute().unwrap();
    assert_eq!(*log.borrow(), vec!["first", "second", "first"]);
}

#[test]
fn test_failure_stops_remaining_phases() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut pipeline = Pipeline::new();
    pipeline.add_phase(recording("one", &log, false));
    pipeline.add_phase(recording("two", &log, true));
    pipeline.add_phase(recording("three", &log, false));

    let err = pipeline.execute().unwrap_err();
    assert!(matches!(err, V2sError::FrameSource(ref m) if m == "two failed"));
    assert_eq!(*log.borrow(), vec!["one", "two"]);
}

#[test]
fn test_empty_pipeline_succeeds() {
    let mut pipeline = Pipeline::default();
    assert!(pipeline.is_empty());
    pipeline.execute().unwrap();
}

#[test]
fn test_default_run_targets_videos_directory() {
    let config = PipelineConfig::default();
    assert_eq!(config.resolved_video_path(), PathBuf::from("videos"));

    let (collab, _) = common::fake_collaborators(Vec::new(), 1, 0);
    let pipeline = Pipeline::v2s_with(&config, collab, Arc::new(NoOpReporter));
    assert_eq!(pipeline.len(), 3);
}

#[test]
fn test_full_run_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let files = common::touch_files(dir.path(), &["demo.mp4"]);
    let config = PipelineConfig {
        video_path: Some(files[0].clone()),
        ..Default::default()
    };

    let reporter = Arc::new(EventLog::default());
    let (collab, configured) = common::fake_collaborators(common::blank_frames(3), 1, 0);
    let mut pipeline = Pipeline::v2s_with(&config, collab, reporter.clone());
    pipeline.execute().unwrap();

    assert_eq!(*configured.borrow(), files);
    assert!(dir.path().join(DETECTION_FILE_NAME).is_file());

    let actions: Vec<GuiAction> = read_json(&dir.path().join(ACTIONS_FILE_NAME)).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].act_type, ActionType::Click);
    assert_eq!(actions[0].frames, vec![0, 1, 2]);

    let script = fs::read_to_string(dir.path().join(EVENTS_FILE_NAME)).unwrap();
    assert!(script.ends_with('\n'));
    assert_eq!(script.lines().count(), 20);
    assert!(script.lines().nth(3).unwrap().ends_with("0003 0035 ffffffff"));
    assert!(script.lines().all(|l| l.contains("/dev/input/event1:")));

    let events = reporter.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "phase 0/3",
            "video demo.mp4 0/1",
            "done 3",
            "phase 1/3",
            "phase 2/3",
        ]
    );
}

#[test]
fn test_default_layout_keeps_every_video_of_a_directory() {
    let dir = TempDir::new().unwrap();
    common::touch_files(dir.path(), &["a.mp4", "b.mp4"]);
    let config = PipelineConfig {
        video_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let (collab, configured) = common::fake_collaborators(common::blank_frames(3), 1, 0);
    let mut pipeline = Pipeline::v2s_with(&config, collab, Arc::new(NoOpReporter));
    pipeline.execute().unwrap();

    assert_eq!(configured.borrow().len(), 2);
    for stem in ["a", "b"] {
        let out = dir.path().join(stem);
        assert!(out.join(DETECTION_FILE_NAME).is_file(), "{stem}");
        assert!(out.join(ACTIONS_FILE_NAME).is_file(), "{stem}");
        assert!(out.join(EVENTS_FILE_NAME).is_file(), "{stem}");
    }
    assert!(!dir.path().join(DETECTION_FILE_NAME).exists());
}

#[test]
fn test_corrupt_detection_artifact_fails_action_phase() {
    let dir = TempDir::new().unwrap();
    let files = common::touch_files(dir.path(), &["demo.mp4"]);
    fs::write(dir.path().join(DETECTION_FILE_NAME), "not json").unwrap();

    let mut phase = ActionPhase::new(files[0].clone(), ArtifactLayout::Beside, ActionConfig::default());
    let err = phase.execute().unwrap_err();
    assert!(matches!(err, V2sError::Artifact { ref path, .. } if path.ends_with(DETECTION_FILE_NAME)));
    assert!(!dir.path().join(ACTIONS_FILE_NAME).exists());
}

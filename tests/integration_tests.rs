use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use vid2gif::*;

/// Test utilities for driving the binary against a stand-in transcoder
mod test_utils {
    use super::*;

    /// Writes 2 KiB of zeros to the last argument, like a successful encode
    pub const SUCCEEDING_FFMPEG: &str =
        "#!/bin/sh\nfor last; do :; done\nhead -c 2048 /dev/zero > \"$last\"\n";

    /// Prints a warning and a final diagnostic line, then exits non-zero
    pub const FAILING_FFMPEG: &str = "#!/bin/sh\n\
        echo 'Guessed Channel Layout for Input Stream #0.1 : mono' >&2\n\
        echo 'clip.mp4: Invalid data found when processing input' >&2\n\
        exit 1\n";

    /// Install an executable shell script named `ffmpeg` under `dir`
    #[cfg(unix)]
    pub fn install_ffmpeg(dir: &Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        std::fs::write(&path, script).unwrap();
        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&path, permissions).unwrap();
        path
    }

    pub fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"not really a video").unwrap();
    }

    pub fn vid2gif(cwd: &Path) -> Command {
        let mut cmd = Command::cargo_bin("vid2gif").unwrap();
        cmd.current_dir(cwd)
            .env_remove("RUST_LOG")
            .env_remove("VID2GIF_WIDTH")
            .env_remove("VID2GIF_MODE")
            .env_remove("VID2GIF_MAX_SIZE_MB")
            .env_remove("VID2GIF_OVERWRITE")
            .env_remove("VID2GIF_OUTPUT_DIR")
            .env_remove("VID2GIF_FFMPEG")
            .env_remove("VID2GIF_LOG_LEVEL");
        cmd
    }

    pub fn parse_rows(stdout: &[u8]) -> Vec<ReportRow> {
        serde_json::from_slice(stdout).unwrap()
    }
}

use test_utils::*;

#[test]
fn test_profiles_json_lists_both_modes() {
    let temp_dir = TempDir::new().unwrap();

    vid2gif(temp_dir.path())
        .args(["profiles", "--json", "--width", "320"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"high\""))
        .stdout(predicate::str::contains("\"low\""))
        .stdout(predicate::str::contains(
            "fps=15,scale=320:-1:flags=lanczos,palettegen",
        ));
}

#[test]
fn test_profiles_rejects_out_of_range_width() {
    let temp_dir = TempDir::new().unwrap();

    vid2gif(temp_dir.path())
        .args(["profiles", "--width", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn test_convert_with_no_inputs_fails() {
    let temp_dir = TempDir::new().unwrap();

    vid2gif(temp_dir.path())
        .args(["convert", "--ffmpeg", "/nonexistent/ffmpeg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported videos found"));
}

#[test]
fn test_convert_fails_when_output_directory_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "clip.mp4");
    std::fs::write(temp_dir.path().join("gifs"), b"in the way").unwrap();

    vid2gif(temp_dir.path())
        .args(["convert", "clip.mp4", "--ffmpeg", "/nonexistent/ffmpeg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to prepare output directory gifs"));
}

#[cfg(unix)]
#[test]
fn test_convert_discovers_inputs_and_reports_sizes() {
    let temp_dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let ffmpeg = install_ffmpeg(tools.path(), SUCCEEDING_FFMPEG);
    touch(temp_dir.path(), "b.mkv");
    touch(temp_dir.path(), "a.mp4");
    touch(temp_dir.path(), "notes.txt");

    let output = vid2gif(temp_dir.path())
        .arg("convert")
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .arg("--work-dir")
        .arg(work.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows = parse_rows(&output.stdout);
    let names: Vec<&str> = rows.iter().map(|row| row.source_name.as_str()).collect();
    assert_eq!(names, vec!["a.mp4", "b.mkv"]);
    assert!(rows
        .iter()
        .all(|row| row.size_mb == "0.00" && row.status == "Conformant"));

    let gifs = temp_dir.path().join("gifs");
    assert!(gifs.join("a.gif").exists());
    assert!(gifs.join("b.gif").exists());
    assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_convert_keeps_existing_gif_and_suffixes_new_one() {
    let temp_dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let ffmpeg = install_ffmpeg(tools.path(), SUCCEEDING_FFMPEG);
    touch(temp_dir.path(), "clip.mp4");
    std::fs::create_dir(temp_dir.path().join("gifs")).unwrap();
    std::fs::write(temp_dir.path().join("gifs").join("clip.gif"), b"old").unwrap();

    vid2gif(temp_dir.path())
        .arg("convert")
        .arg("clip.mp4")
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .assert()
        .success()
        .stdout(predicate::str::contains("| clip.mp4 | 0.00"))
        .stdout(predicate::str::contains("Conformant"));

    let gifs = temp_dir.path().join("gifs");
    assert_eq!(std::fs::read(gifs.join("clip.gif")).unwrap(), b"old");
    assert_eq!(std::fs::metadata(gifs.join("clip_1.gif")).unwrap().len(), 2048);
}

#[cfg(unix)]
#[test]
fn test_convert_flags_oversized_gif() {
    let temp_dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let script = "#!/bin/sh\nfor last; do :; done\nhead -c 1048577 /dev/zero > \"$last\"\n";
    let ffmpeg = install_ffmpeg(tools.path(), script);
    touch(temp_dir.path(), "clip.mp4");

    let output = vid2gif(temp_dir.path())
        .args(["convert", "clip.mp4", "--json", "-s", "0.5"])
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .output()
        .unwrap();

    // An oversized result is still a completed conversion
    assert!(output.status.success());
    let rows = parse_rows(&output.stdout);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].size_mb, "1.00");
    assert_eq!(rows[0].status, "NonConformant");
    assert!(temp_dir.path().join("gifs").join("clip.gif").exists());
}

#[cfg(unix)]
#[test]
fn test_convert_reports_transcoder_diagnostic_and_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let ffmpeg = install_ffmpeg(tools.path(), FAILING_FFMPEG);
    touch(temp_dir.path(), "clip.mp4");

    let output = vid2gif(temp_dir.path())
        .args(["convert", "clip.mp4", "--json"])
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .arg("--work-dir")
        .arg(work.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let rows = parse_rows(&output.stdout);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].size_mb, "0.00");
    assert_eq!(
        rows[0].status,
        "Failed: clip.mp4: Invalid data found when processing input"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 1 conversions failed"));
    assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
}

#[test]
fn test_request_template_validates_threshold() {
    let profile = ProfileResolver::default().resolve(QualityMode::Low);
    assert!(ConversionRequest::template(400, profile, 0.0, false).is_err());

    let request = ConversionRequest::template(400, profile, 1.5, false)
        .unwrap()
        .for_input("clip.mov");
    assert_eq!(request.input_path, PathBuf::from("clip.mov"));
    assert_eq!(request.profile.frame_rate, 10);
}

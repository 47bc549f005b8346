//! 影片中繼資料整合測試（以假的 ffprobe 輸出驅動）

mod common;

use common::{FakeProber, SAMPLE_PROBE_JSON, fake_video_file};
use std::path::Path;
use video_storyboard::StoryboardError;
use video_storyboard::component::video_metadata::{MetadataOptions, ScanType, StreamKind, VideoMetadata};

#[test]
fn test_probe_builds_full_metadata() {
    let video = fake_video_file(".mp4", b"not really a video");
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON);
    let metadata = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default()).unwrap();

    assert!(metadata.path().is_absolute());
    assert_eq!(metadata.title(), Some("Sample Clip"));
    assert_eq!(metadata.format(), "MPEG-4 Part 14 (MP4)");
    assert_eq!(metadata.size(), 5_242_880);
    assert_eq!(metadata.size_human(), "5.00MiB");
    assert!((metadata.duration() - 10.0).abs() < 1e-9);
    assert_eq!(metadata.duration_human(), "00:00:10.00");
    assert_eq!(metadata.scan_type(), ScanType::Progressive);
    assert_eq!(metadata.dimension(), Some((1920, 1080)));
    assert_eq!(metadata.dar_text(), Some("16:9"));
    assert_eq!(metadata.frame_rate_text(), Some("30 fps"));

    let streams = metadata.streams();
    assert_eq!(streams.len(), 3);
    assert!(
        streams[0]
            .display_line()
            .starts_with("Video, H.264 (High Profile level 4.1), ")
    );
    assert!(matches!(streams[1].kind(), StreamKind::Audio(_)));
    assert_eq!(streams[2].display_line(), "Subtitle, EIA-608");
}

#[test]
fn test_report_layout() {
    let video = fake_video_file(".mp4", b"abc");
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON);
    let metadata = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default()).unwrap();
    let name = metadata.filename().to_string();

    let expected = [
        "Title:                  Sample Clip".to_string(),
        format!("Filename:               {name}"),
        "File size:              5242880 (5.00MiB)".to_string(),
        "SHA-1 digest:           a9993e364706816aba3e25717850c26c9cd0d89d".to_string(),
        "Container format:       MPEG-4 Part 14 (MP4)".to_string(),
        "Duration:               00:00:10.00".to_string(),
        "Pixel dimensions:       1920x1080".to_string(),
        "Display aspect ratio:   16:9".to_string(),
        "Scan type:              Progressive scan".to_string(),
        "Frame rate:             30 fps".to_string(),
        "Streams:".to_string(),
        "    #0: Video, H.264 (High Profile level 4.1), 1920x1080 (DAR 16:9), 30 fps, 4000 kb/s"
            .to_string(),
        "    #1: Audio (eng), AAC (Low Complexity), 128 kb/s".to_string(),
        "    #2: Subtitle, EIA-608".to_string(),
    ]
    .join("\n");

    assert_eq!(metadata.format_report(true).unwrap(), expected);

    let without_digest = metadata.format_report(false).unwrap();
    assert!(!without_digest.contains("SHA-1 digest:"));
    assert!(without_digest.lines().all(|line| line == line.trim_end()));
}

#[test]
fn test_sha1_is_lazy_and_cached() {
    let video = fake_video_file(".mkv", b"abc");
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON);
    let metadata = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default()).unwrap();

    assert_eq!(metadata.sha1_if_computed(), None);
    let digest = metadata.sha1().unwrap().to_string();
    assert_eq!(digest, "a9993e364706816aba3e25717850c26c9cd0d89d");

    // 快取後即使檔案內容改變也不會重新計算
    std::fs::write(video.path(), b"changed").unwrap();
    assert_eq!(metadata.sha1().unwrap(), digest);
    assert_eq!(metadata.sha1_if_computed(), Some(digest.as_str()));
}

#[test]
fn test_interlaced_detection_reads_limited_prefix() {
    let video = fake_video_file(".ts", &vec![0u8; 1_500_000]);
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON).interlaced();
    let metadata = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default()).unwrap();

    assert_eq!(metadata.scan_type(), ScanType::Interlaced);
    assert_eq!(*prober.received_head_len.lock().unwrap(), Some(1_000_000));
}

#[test]
fn test_summary_fields_from_first_video_stream_with_value() {
    let json = r#"{
        "streams": [
            { "index": 0, "codec_type": "audio", "codec_name": "mp3" },
            { "index": 1, "codec_type": "video", "codec_name": "mjpeg",
              "width": 600, "height": 600 },
            { "index": 2, "codec_type": "video", "codec_name": "hevc",
              "width": 1280, "height": 720, "display_aspect_ratio": "16:9",
              "avg_frame_rate": "24000/1001" }
        ],
        "format": { "format_name": "matroska,webm", "size": 2048, "duration": 60.5 }
    }"#;
    let video = fake_video_file(".mkv", b"x");
    let metadata =
        VideoMetadata::probe(video.path(), &FakeProber::from_json(json), &MetadataOptions::default())
            .unwrap();

    assert_eq!(metadata.format(), "Matroska");
    assert_eq!(metadata.title(), None);
    // 尺寸與 DAR 來自第一個視訊串流，幀率來自第一個帶有幀率的串流
    assert_eq!(metadata.dimension_text(), Some("600x600"));
    assert_eq!(metadata.dar_text(), Some("1:1"));
    assert_eq!(metadata.frame_rate_text(), Some("23.98 fps"));
}

#[test]
fn test_audio_only_video_has_no_summary_fields() {
    let json = r#"{
        "streams": [ { "index": 0, "codec_type": "audio", "codec_name": "aac" } ],
        "format": { "format_name": "mov,mp4,m4a,3gp,3g2,mj2", "size": "100", "duration": "1.0" }
    }"#;
    let video = fake_video_file(".m4a", b"x");
    let metadata =
        VideoMetadata::probe(video.path(), &FakeProber::from_json(json), &MetadataOptions::default())
            .unwrap();

    assert_eq!(metadata.dimension(), None);
    assert_eq!(metadata.dar(), None);
    assert_eq!(metadata.frame_rate(), None);
    let report = metadata.format_report(false).unwrap();
    assert!(!report.contains("Pixel dimensions:"));
    assert!(!report.contains("Frame rate:"));
    assert!(report.contains("File size:              100 (100B)"));
}

#[test]
fn test_duplicate_stream_index_rejected() {
    let json = r#"{
        "streams": [
            { "index": 0, "codec_type": "data" },
            { "index": 0, "codec_type": "data" }
        ],
        "format": { "size": "10", "duration": "1" }
    }"#;
    let video = fake_video_file(".mp4", b"x");
    let result =
        VideoMetadata::probe(video.path(), &FakeProber::from_json(json), &MetadataOptions::default());
    assert!(matches!(result, Err(StoryboardError::ProbeFailed { .. })));
}

#[test]
fn test_duration_override() {
    let json = r#"{ "streams": [], "format": { "size": "10" } }"#;
    let video = fake_video_file(".mp4", b"x");
    let prober = FakeProber::from_json(json);

    let missing = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default());
    assert!(matches!(missing, Err(StoryboardError::ProbeFailed { .. })));

    let options = MetadataOptions {
        video_duration: Some(42.0),
        print_progress: false,
    };
    let metadata = VideoMetadata::probe(video.path(), &prober, &options).unwrap();
    assert!((metadata.duration() - 42.0).abs() < 1e-9);
}

#[test]
fn test_negative_duration_rejected() {
    let json = r#"{ "streams": [], "format": { "size": "10", "duration": "-3.0" } }"#;
    let video = fake_video_file(".mp4", b"x");
    let result =
        VideoMetadata::probe(video.path(), &FakeProber::from_json(json), &MetadataOptions::default());
    assert!(matches!(result, Err(StoryboardError::ProbeFailed { .. })));
}

#[test]
fn test_missing_video_file() {
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON);
    let result = VideoMetadata::probe(
        Path::new("/nonexistent/video.mp4"),
        &prober,
        &MetadataOptions::default(),
    );
    assert!(matches!(result, Err(StoryboardError::NotFound(_))));
}

#[test]
fn test_json_rendering() {
    let video = fake_video_file(".mp4", b"abc");
    let prober = FakeProber::from_json(SAMPLE_PROBE_JSON);
    let metadata = VideoMetadata::probe(video.path(), &prober, &MetadataOptions::default()).unwrap();

    let value = metadata.to_json(false).unwrap();
    assert_eq!(value["size"], 5_242_880);
    assert_eq!(value["size_human"], "5.00MiB");
    assert_eq!(value["scan_type"], "progressive");
    assert_eq!(value["dimension"], serde_json::json!([1920, 1080]));
    assert!(value["sha1"].is_null());
    assert_eq!(value["streams"][0]["type"], "video");
    assert_eq!(value["streams"][1]["language_code"], "eng");

    let value = metadata.to_json(true).unwrap();
    assert_eq!(value["sha1"], "a9993e364706816aba3e25717850c26c9cd0d89d");
}

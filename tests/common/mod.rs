//! 整合測試共用的假工具，不需要 ffmpeg 或字型檔

#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use video_storyboard::tools::{Frame, FrameExtractor, ProbeOutput, Prober, TextRenderer, parse_probe_output};
use video_storyboard::{Result, StoryboardError};

pub const SAMPLE_PROBE_JSON: &str = r#"{
    "streams": [
        {
            "index": 0,
            "codec_name": "h264",
            "codec_type": "video",
            "profile": "High",
            "level": 41,
            "width": 1920,
            "height": 1080,
            "display_aspect_ratio": "16:9",
            "r_frame_rate": "30/1",
            "avg_frame_rate": "30/1",
            "bit_rate": "4000000"
        },
        {
            "index": 1,
            "codec_name": "aac",
            "codec_type": "audio",
            "profile": "LC",
            "bit_rate": "128000",
            "tags": { "language": "eng" }
        },
        {
            "index": 2,
            "codec_type": "subtitle",
            "codec_tag_string": "c608"
        }
    ],
    "format": {
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "duration": "10.000000",
        "size": "5242880",
        "tags": { "title": "Sample Clip" }
    }
}"#;

/// 固定回傳預先準備的 ffprobe 輸出
pub struct FakeProber {
    output: ProbeOutput,
    frame_diagnostics: String,
    pub received_head_len: Mutex<Option<usize>>,
}

impl FakeProber {
    pub fn from_json(json: &str) -> Self {
        Self {
            output: parse_probe_output(json.as_bytes()).expect("invalid probe json"),
            frame_diagnostics: "[FRAME]\ninterlaced_frame=0\n[/FRAME]\n".to_string(),
            received_head_len: Mutex::new(None),
        }
    }

    pub fn interlaced(mut self) -> Self {
        self.frame_diagnostics
            .push_str("[FRAME]\ninterlaced_frame=1\n[/FRAME]\n");
        self
    }
}

impl Prober for FakeProber {
    fn probe(&self, _path: &Path) -> Result<ProbeOutput> {
        Ok(self.output.clone())
    }

    fn probe_frames(&self, _path: &Path, head: &[u8]) -> Result<String> {
        *self.received_head_len.lock().unwrap() = Some(head.len());
        Ok(self.frame_diagnostics.clone())
    }
}

/// 產生單色影格，並記錄每次擷取的時間點
pub struct FakeExtractor {
    width: u32,
    height: u32,
    fail_at: Option<f64>,
    pub calls: Arc<Mutex<Vec<f64>>>,
}

impl FakeExtractor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fail_at: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_at(mut self, timestamp: f64) -> Self {
        self.fail_at = Some(timestamp);
        self
    }
}

impl FrameExtractor for FakeExtractor {
    fn extract_frame(&self, path: &Path, timestamp: f64) -> Result<Frame> {
        self.calls.lock().unwrap().push(timestamp);
        if self.fail_at.is_some_and(|t| (t - timestamp).abs() < 1e-9) {
            return Err(StoryboardError::ExtractionFailed {
                path: path.to_path_buf(),
                timestamp,
                message: "simulated failure".to_string(),
            });
        }
        let shade = (timestamp * 10.0) as u8;
        Ok(Frame {
            timestamp,
            image: DynamicImage::ImageRgb8(RgbImage::from_pixel(
                self.width,
                self.height,
                image::Rgb([shade, shade, shade]),
            )),
        })
    }
}

/// 每個字元 6x10 的方塊字型
pub struct BlockRenderer;

impl TextRenderer for BlockRenderer {
    fn font_size(&self) -> f32 {
        10.0
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        (text.chars().count() as u32 * 6, 10)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let (width, height) = self.text_size(text);
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                let (px, py) = (x + dx, y + dy);
                if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

/// 建立帶有指定副檔名與內容的暫存影片檔
pub fn fake_video_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("clip-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

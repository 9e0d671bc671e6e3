use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::food::error::{FoodError, FoodResult};

/// A scanner that emits one code per line: keyboard-wedge scanners on the
/// terminal, or serial/HID scanners exposed as a device file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDevice {
    Stdin,
    Path(PathBuf),
}

impl ScanDevice {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.trim() {
            "" => None,
            "stdin" | "-" => Some(ScanDevice::Stdin),
            path => Some(ScanDevice::Path(PathBuf::from(path))),
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            ScanDevice::Stdin => true,
            ScanDevice::Path(path) => path.exists(),
        }
    }

    pub async fn open(&self) -> FoodResult<Box<dyn FrameSource>> {
        match self {
            ScanDevice::Stdin => Ok(Box::new(LineFrames::new(BufReader::new(tokio::io::stdin())))),
            ScanDevice::Path(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    FoodError::ScanHardware(format!("Failed to open {}: {}", path.display(), e))
                })?;
                Ok(Box::new(LineFrames::new(BufReader::new(file))))
            }
        }
    }
}

impl fmt::Display for ScanDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanDevice::Stdin => write!(f, "stdin"),
            ScanDevice::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Configured devices that can be opened right now, in configured order.
pub fn discover_devices(configured: &[ScanDevice]) -> Vec<ScanDevice> {
    configured
        .iter()
        .filter(|device| device.is_available())
        .cloned()
        .collect()
}

#[async_trait]
pub trait FrameSource: Send {
    /// Next raw frame, or `None` once the device has nothing more to give.
    async fn next_frame(&mut self) -> io::Result<Option<String>>;
}

pub struct LineFrames<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineFrames<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FrameSource for LineFrames<R> {
    async fn next_frame(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

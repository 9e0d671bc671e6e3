use std::env;
use std::path::PathBuf;

use crate::scanner::device::ScanDevice;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scanner_devices: Vec<ScanDevice>,
    pub report_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let scanner_devices = env::var("SCANNER_DEVICES")
            .map(|devices| parse_devices(&devices))
            .unwrap_or_else(|_| vec![ScanDevice::Stdin]);

        let report_dir = env::var("ECO_SCAN_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("eco-scan"));

        Self {
            scanner_devices,
            report_dir,
        }
    }

    pub fn with_devices(mut self, devices: &[String]) -> Self {
        if !devices.is_empty() {
            self.scanner_devices = devices.iter().filter_map(|d| ScanDevice::parse(d)).collect();
        }
        self
    }
}

/// Comma-separated device list; `stdin` (or `-`) means the terminal.
pub fn parse_devices(list: &str) -> Vec<ScanDevice> {
    list.split(',').filter_map(ScanDevice::parse).collect()
}

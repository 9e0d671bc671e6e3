pub mod device;
pub mod gtin;

use log::{debug, info, warn};

use crate::food::error::{FoodError, FoodResult};
use device::{discover_devices, FrameSource, ScanDevice};
use gtin::DecodeError;

/// One exclusive hold on a scanner. The device is released as soon as a code
/// is decoded or the session fails; nothing bounds how long it waits.
pub struct ScanSession {
    device: ScanDevice,
    source: Option<Box<dyn FrameSource>>,
}

impl ScanSession {
    pub fn new(device: ScanDevice, source: Box<dyn FrameSource>) -> Self {
        info!("Scanner {} acquired", device);
        Self {
            device,
            source: Some(source),
        }
    }

    pub async fn run(mut self) -> FoodResult<String> {
        let outcome = self.decode_first().await;
        self.release();
        outcome
    }

    async fn decode_first(&mut self) -> FoodResult<String> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| FoodError::ScanHardware("Scanner already released".to_string()))?;

        loop {
            let frame = source
                .next_frame()
                .await
                .map_err(|e| FoodError::ScanHardware(e.to_string()))?
                .ok_or_else(|| FoodError::ScanHardware("Scanner stream ended".to_string()))?;

            match gtin::decode(&frame) {
                Ok(code) => {
                    info!("Decoded barcode {}", code);
                    return Ok(code);
                }
                Err(DecodeError::NoCode) => debug!("No barcode in frame yet"),
                Err(e) => {
                    warn!("Scan failed on {}: {}", self.device, e);
                    return Err(FoodError::ScanHardware(e.to_string()));
                }
            }
        }
    }

    fn release(&mut self) {
        if self.source.take().is_some() {
            info!("Scanner {} released", self.device);
        }
    }
}

/// Pick the first available device, read until a barcode decodes.
pub async fn scan_barcode(configured: &[ScanDevice]) -> FoodResult<String> {
    let device = discover_devices(configured)
        .into_iter()
        .next()
        .ok_or(FoodError::NoCameraFound)?;

    let source = device.open().await?;
    ScanSession::new(device, source).run().await
}

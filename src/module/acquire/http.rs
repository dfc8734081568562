//! HTTP sources for the thermal payload and the optical frame.

use image::DynamicImage;
use reqwest::blocking::Client;

use super::{AcquireError, Source};
use crate::module::thermal::{ThermalGrid, ThermalPayload};
use crate::module::util::common::{cache_busted, get_bytes, http_client, now_millis};

/// Fetches the JSON thermal payload.
///
/// A payload without samples yields `Ok(None)`: the overlay is cleared and
/// the background is shown alone.
pub struct ThermalHttpSource {
    client: Client,
    url: String,
}

impl ThermalHttpSource {
    pub fn new(url: &str, timeout_ms: u64) -> Result<Self, AcquireError> {
        Ok(Self {
            client: http_client(timeout_ms)?,
            url: url.to_owned(),
        })
    }
}

impl Source for ThermalHttpSource {
    type Item = Option<ThermalGrid>;

    fn name(&self) -> &str {
        "thermal"
    }

    fn fetch(&mut self) -> Result<Option<ThermalGrid>, AcquireError> {
        let bytes = get_bytes(&self.client, &self.url)?;
        let grid = ThermalPayload::from_slice(&bytes)?.into_grid();
        match &grid {
            Some(grid) => log::debug!("Thermal grid {}x{} received", grid.width(), grid.height()),
            None => log::debug!("Thermal payload without samples"),
        }
        Ok(grid)
    }
}

/// Fetches the optical frame image.
pub struct FrameHttpSource {
    client: Client,
    url: String,
    cache_bust: bool,
}

impl FrameHttpSource {
    pub fn new(url: &str, timeout_ms: u64, cache_bust: bool) -> Result<Self, AcquireError> {
        Ok(Self {
            client: http_client(timeout_ms)?,
            url: url.to_owned(),
            cache_bust,
        })
    }

    fn request_url(&self) -> String {
        if self.cache_bust {
            cache_busted(&self.url, now_millis())
        } else {
            self.url.clone()
        }
    }
}

impl Source for FrameHttpSource {
    type Item = DynamicImage;

    fn name(&self) -> &str {
        "frame"
    }

    fn fetch(&mut self) -> Result<DynamicImage, AcquireError> {
        let bytes = get_bytes(&self.client, &self.request_url())?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, RgbImage};
    use std::io::{Cursor, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve a single response on a local port, reporting the request line.
    fn serve_once(status: &str, body: Vec<u8>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_owned();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let n = stream.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let _ = tx.send(request.lines().next().unwrap_or_default().to_owned());
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&body);
            }
        });
        (format!("http://{}", addr), rx)
    }

    #[test]
    fn thermal_payload_is_parsed() {
        let body = br#"{"w":2,"h":1,"pixelData":[21.0,23.5],"tAvg":22.0}"#.to_vec();
        let (base, _) = serve_once("200 OK", body);
        let mut source = ThermalHttpSource::new(&format!("{base}/thermal.json"), 2000).unwrap();
        let grid = source.fetch().unwrap().unwrap();
        assert_eq!(grid.get(1, 0), Some(23.5));
        assert_eq!(grid.stats().avg, Some(22.0));
    }

    #[test]
    fn thermal_payload_without_samples() {
        let (base, _) = serve_once("200 OK", br#"{"w":2,"h":1}"#.to_vec());
        let mut source = ThermalHttpSource::new(&base, 2000).unwrap();
        assert!(source.fetch().unwrap().is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let (base, _) = serve_once("200 OK", b"<html>".to_vec());
        let mut source = ThermalHttpSource::new(&base, 2000).unwrap();
        assert!(matches!(source.fetch(), Err(AcquireError::Payload(_))));
    }

    #[test]
    fn http_status_is_an_error() {
        let (base, _) = serve_once("404 Not Found", vec![]);
        let mut source = ThermalHttpSource::new(&base, 2000).unwrap();
        assert!(matches!(source.fetch(), Err(AcquireError::Http(_))));
    }

    #[test]
    fn frame_is_decoded_with_cache_buster() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30])));
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageOutputFormat::Png).unwrap();
        let (base, requests) = serve_once("200 OK", png.into_inner());
        let mut source = FrameHttpSource::new(&format!("{base}/current.jpg"), 2000, true).unwrap();
        let frame = source.fetch().unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 3));
        let line = requests.recv().unwrap();
        assert!(line.starts_with("GET /current.jpg?cb="));
    }

    #[test]
    fn garbage_frame_is_an_error() {
        let (base, _) = serve_once("200 OK", b"not an image".to_vec());
        let mut source = FrameHttpSource::new(&base, 2000, false).unwrap();
        assert!(matches!(source.fetch(), Err(AcquireError::Image(_))));
    }
}

//! PNG snapshot of the canvas.

use log::warn;
use web_sys::HtmlCanvasElement;

/// Prefix of every PNG data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png";

/// Something that can be encoded as an image data URL.
pub trait RasterSource {
	/// Pixel dimensions.
	fn dimensions(&self) -> (u32, u32);
	/// Encode as a data URL of `mime`; `None` on failure.
	fn to_data_url(&self, mime: &str) -> Option<String>;
}

impl RasterSource for HtmlCanvasElement {
	fn dimensions(&self) -> (u32, u32) {
		(self.width(), self.height())
	}

	fn to_data_url(&self, mime: &str) -> Option<String> {
		self.to_data_url_with_type(mime).ok()
	}
}

/// Encode `source` as a PNG data URL.
///
/// Returns `None` for an empty canvas or when the host hands back something
/// that is not a PNG (browsers fall back to `data:,` on failure).
pub fn export_png<R: RasterSource + ?Sized>(source: &R) -> Option<String> {
	let (width, height) = source.dimensions();
	if width == 0 || height == 0 {
		return None;
	}
	let url = source.to_data_url("image/png")?;
	if url.starts_with(PNG_DATA_URL_PREFIX) {
		Some(url)
	} else {
		warn!("symbol-graph: canvas export produced no PNG");
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Stub {
		size: (u32, u32),
		url: Option<&'static str>,
	}

	impl RasterSource for Stub {
		fn dimensions(&self) -> (u32, u32) {
			self.size
		}

		fn to_data_url(&self, mime: &str) -> Option<String> {
			assert_eq!(mime, "image/png");
			self.url.map(str::to_owned)
		}
	}

	#[test]
	fn returns_png_urls() {
		let stub = Stub {
			size: (800, 600),
			url: Some("data:image/png;base64,iVBORw0KGgo="),
		};
		assert_eq!(
			export_png(&stub).as_deref(),
			Some("data:image/png;base64,iVBORw0KGgo=")
		);
	}

	#[test]
	fn rejects_empty_canvases_and_failed_encodes() {
		let empty = Stub {
			size: (0, 600),
			url: Some("data:image/png;base64,AAAA"),
		};
		assert_eq!(export_png(&empty), None);

		let failed = Stub {
			size: (10, 10),
			url: Some("data:,"),
		};
		assert_eq!(export_png(&failed), None);

		let errored = Stub {
			size: (10, 10),
			url: None,
		};
		assert_eq!(export_png(&errored), None);
	}
}

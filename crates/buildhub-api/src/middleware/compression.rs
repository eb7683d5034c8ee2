//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip for JSON responses; bodies under the default threshold pass through.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}

//! Service layer separating codec dispatch and file I/O from the transform
//!
//! - [`format`]: extension and data URI prefix resolution
//! - [`codec`]: uniform decode/encode across the supported codecs
//! - [`data_uri`]: base64 data URI round-trip
//! - [`io`]: image file loading and overwriting writes

pub mod codec;
pub mod data_uri;
pub mod format;
pub mod io;

pub use codec::CodecService;
pub use data_uri::{decode_from_data_uri, encode_to_data_uri, round_trip};
pub use format::ImageFormatTag;
pub use io::ImageIOService;

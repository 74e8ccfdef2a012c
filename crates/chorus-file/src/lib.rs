//! Chorus File — I/O collaborators for the synthesis core
//!
//! - Audio decode via symphonia (WAV, FLAC, AIFF, MP3, OGG, AAC, ALAC)
//! - WAV encode via hound (16-bit PCM)
//! - Praat TextGrid read (long and short formats) and write (short format)
//! - Input-directory scanning with basename pairing

mod decode;
mod encode;
mod error;
mod scan;
mod textgrid;

pub use decode::read_audio;
pub use encode::write_wav;
pub use error::{FileError, FileResult};
pub use scan::{InputPair, scan_input_pairs};
pub use textgrid::{format_textgrid, parse_textgrid, read_textgrid, write_textgrid};

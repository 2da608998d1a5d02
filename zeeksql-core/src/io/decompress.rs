//! Transparent decompression of rotated Zeek logs.
//!
//! Log rotation leaves files like `conn.00:00:00-01:00:00.log.gz` behind.
//! [`Compression::detect`] sniffs the leading magic bytes and
//! [`DecompressReader`] hides the matching decoder behind `Read`.

#[cfg(feature = "compress-zstd")]
use std::io::BufReader;
use std::fmt;
use std::io::{self, Read};

use flate2::read::MultiGzDecoder;

/// Compression format of a log file, as sniffed from its first bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    #[cfg(feature = "compress-zstd")]
    Zstd,
    #[cfg(feature = "compress-lz4")]
    Lz4,
    #[cfg(feature = "compress-bzip2")]
    Bzip2,
    #[cfg(feature = "compress-xz")]
    Xz,
}

impl Compression {
    /// Bytes needed by [`Compression::detect`] to recognize every format.
    pub const MAGIC_LEN: usize = 6;

    /// Classify `prefix`, the first bytes of a file.
    ///
    /// Plain logs start with `#`, which none of the magic numbers do.
    /// Formats whose feature is disabled fall through to `None`.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            return Compression::Gzip;
        }
        #[cfg(feature = "compress-zstd")]
        if prefix.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
            return Compression::Zstd;
        }
        #[cfg(feature = "compress-lz4")]
        if prefix.starts_with(&[0x04, 0x22, 0x4d, 0x18]) {
            return Compression::Lz4;
        }
        #[cfg(feature = "compress-bzip2")]
        if prefix.starts_with(b"BZh") {
            return Compression::Bzip2;
        }
        #[cfg(feature = "compress-xz")]
        if prefix.starts_with(&[0xfd, b'7', b'z', b'X', b'Z', 0x00]) {
            return Compression::Xz;
        }
        Compression::None
    }

    fn name(self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            #[cfg(feature = "compress-zstd")]
            Compression::Zstd => "zstd",
            #[cfg(feature = "compress-lz4")]
            Compression::Lz4 => "lz4",
            #[cfg(feature = "compress-bzip2")]
            Compression::Bzip2 => "bzip2",
            #[cfg(feature = "compress-xz")]
            Compression::Xz => "xz",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte stream decoded according to its [`Compression`].
///
/// Multi-member gzip and bzip2 streams, as written by `cat`-ing rotated
/// chunks together, are read to the end rather than stopping after the
/// first member.
pub enum DecompressReader<R: Read> {
    Plain(R),
    Gzip(MultiGzDecoder<R>),
    #[cfg(feature = "compress-zstd")]
    Zstd(zstd::Decoder<'static, BufReader<R>>),
    #[cfg(feature = "compress-lz4")]
    Lz4(lz4_flex::frame::FrameDecoder<R>),
    #[cfg(feature = "compress-bzip2")]
    Bzip2(bzip2::read::MultiBzDecoder<R>),
    #[cfg(feature = "compress-xz")]
    Xz(xz2::read::XzDecoder<R>),
}

impl<R: Read> DecompressReader<R> {
    /// Wrap `source` in the decoder for `compression`.
    ///
    /// Only zstd can fail here, when its decoder context cannot be set up.
    pub fn new(source: R, compression: Compression) -> io::Result<Self> {
        let reader = match compression {
            Compression::None => Self::Plain(source),
            Compression::Gzip => Self::Gzip(MultiGzDecoder::new(source)),
            #[cfg(feature = "compress-zstd")]
            Compression::Zstd => Self::Zstd(zstd::Decoder::new(source)?),
            #[cfg(feature = "compress-lz4")]
            Compression::Lz4 => Self::Lz4(lz4_flex::frame::FrameDecoder::new(source)),
            #[cfg(feature = "compress-bzip2")]
            Compression::Bzip2 => Self::Bzip2(bzip2::read::MultiBzDecoder::new(source)),
            #[cfg(feature = "compress-xz")]
            Compression::Xz => Self::Xz(xz2::read::XzDecoder::new_multi_decoder(source)),
        };
        Ok(reader)
    }

    fn format(&self) -> Compression {
        match self {
            Self::Plain(_) => Compression::None,
            Self::Gzip(_) => Compression::Gzip,
            #[cfg(feature = "compress-zstd")]
            Self::Zstd(_) => Compression::Zstd,
            #[cfg(feature = "compress-lz4")]
            Self::Lz4(_) => Compression::Lz4,
            #[cfg(feature = "compress-bzip2")]
            Self::Bzip2(_) => Compression::Bzip2,
            #[cfg(feature = "compress-xz")]
            Self::Xz(_) => Compression::Xz,
        }
    }
}

impl<R: Read> fmt::Debug for DecompressReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecompressReader").field(&self.format()).finish()
    }
}

impl<R: Read> Read for DecompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(r) => r.read(buf),
            #[cfg(feature = "compress-zstd")]
            Self::Zstd(r) => r.read(buf),
            #[cfg(feature = "compress-lz4")]
            Self::Lz4(r) => r.read(buf),
            #[cfg(feature = "compress-bzip2")]
            Self::Bzip2(r) => r.read(buf),
            #[cfg(feature = "compress-xz")]
            Self::Xz(r) => r.read(buf),
        }
    }
}

/// Decoder over an on-disk file.
pub type FileDecoder = DecompressReader<std::fs::File>;

//! Общие константы формата snapshot-файла.

// -------- Files --------
pub const DEFAULT_DATA_FILE: &str = "rms_data.snap";
pub const TMP_SUFFIX: &str = "tmp";
pub const LOCK_SUFFIX: &str = "lock";
pub const CORRUPT_SUFFIX: &str = "corrupt";

// -------- Snapshot frame --------
pub const SNAP_MAGIC: &[u8; 8] = b"RMSSNAP1";
pub const SNAP_VERSION: u32 = 1;

// Header layout (LE):
// [magic8][version u32][codec u16][flags u16][payload_len u64][crc32 u32]
// Total = 8 + 4 + 2 + 2 + 8 + 4 = 28 bytes.
pub const SNAP_HDR_SIZE: usize = 28;

pub const SNAP_OFF_MAGIC: usize = 0;
pub const SNAP_OFF_VERSION: usize = 8;
pub const SNAP_OFF_CODEC: usize = 12;
pub const SNAP_OFF_FLAGS: usize = 14;
pub const SNAP_OFF_LEN: usize = 16;
pub const SNAP_OFF_CRC32: usize = 24;

// Payload codecs
pub const CODEC_NONE: u16 = 0;
pub const CODEC_ZSTD: u16 = 1;

// Refuse to allocate for absurd payload lengths from a damaged header.
pub const SNAP_MAX_PAYLOAD: u64 = 256 * 1024 * 1024;

pub const ZSTD_LEVEL: i32 = 0;

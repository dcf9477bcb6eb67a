//! Snapshot frame codec.
//!
//! Layout (LE):
//! [magic8="RMSSNAP1"][version u32][codec u16][flags u16][payload_len u64][crc32 u32][payload]
//!
//! payload = JSON(Snapshot), optionally zstd-compressed (codec=1).
//! crc32 (crc32fast) covers the payload bytes exactly as stored.

use anyhow::{anyhow, Context, Result};
use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{
    CODEC_NONE, CODEC_ZSTD, SNAP_HDR_SIZE, SNAP_MAGIC, SNAP_MAX_PAYLOAD, SNAP_OFF_CODEC,
    SNAP_OFF_CRC32, SNAP_OFF_FLAGS, SNAP_OFF_LEN, SNAP_OFF_MAGIC, SNAP_OFF_VERSION, SNAP_VERSION,
    ZSTD_LEVEL,
};

use super::{Snapshot, SnapshotView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapHeader {
    pub version: u32,
    pub codec: u16,
    pub flags: u16,
    pub payload_len: u64,
    pub crc32: u32,
}

/// Parse and sanity-check the 28-byte header.
pub fn read_header(buf: &[u8]) -> Result<SnapHeader> {
    if buf.len() < SNAP_HDR_SIZE {
        return Err(anyhow!(
            "snapshot too short: {} B (header is {} B)",
            buf.len(),
            SNAP_HDR_SIZE
        ));
    }
    let magic = &buf[SNAP_OFF_MAGIC..SNAP_OFF_MAGIC + 8];
    if magic != SNAP_MAGIC {
        return Err(anyhow!(
            "bad snapshot magic (expected {:?}, got {:?})",
            SNAP_MAGIC,
            magic
        ));
    }
    let h = SnapHeader {
        version: LittleEndian::read_u32(&buf[SNAP_OFF_VERSION..SNAP_OFF_VERSION + 4]),
        codec: LittleEndian::read_u16(&buf[SNAP_OFF_CODEC..SNAP_OFF_CODEC + 2]),
        flags: LittleEndian::read_u16(&buf[SNAP_OFF_FLAGS..SNAP_OFF_FLAGS + 2]),
        payload_len: LittleEndian::read_u64(&buf[SNAP_OFF_LEN..SNAP_OFF_LEN + 8]),
        crc32: LittleEndian::read_u32(&buf[SNAP_OFF_CRC32..SNAP_OFF_CRC32 + 4]),
    };
    if h.version != SNAP_VERSION {
        return Err(anyhow!(
            "unsupported snapshot version {} (expected {})",
            h.version,
            SNAP_VERSION
        ));
    }
    if h.codec != CODEC_NONE && h.codec != CODEC_ZSTD {
        return Err(anyhow!("unknown snapshot codec {}", h.codec));
    }
    if h.payload_len > SNAP_MAX_PAYLOAD {
        return Err(anyhow!("snapshot payload_len {} is out of range", h.payload_len));
    }
    Ok(h)
}

pub fn encode_snapshot(snap: SnapshotView<'_>, codec: u16) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(&snap).context("serialize snapshot")?;
    let payload = match codec {
        CODEC_NONE => json,
        CODEC_ZSTD => zstd::bulk::compress(&json, ZSTD_LEVEL).context("zstd compress snapshot")?,
        other => return Err(anyhow!("unknown snapshot codec {}", other)),
    };

    let mut out = vec![0u8; SNAP_HDR_SIZE];
    out[SNAP_OFF_MAGIC..SNAP_OFF_MAGIC + 8].copy_from_slice(SNAP_MAGIC);
    LittleEndian::write_u32(&mut out[SNAP_OFF_VERSION..SNAP_OFF_VERSION + 4], SNAP_VERSION);
    LittleEndian::write_u16(&mut out[SNAP_OFF_CODEC..SNAP_OFF_CODEC + 2], codec);
    LittleEndian::write_u16(&mut out[SNAP_OFF_FLAGS..SNAP_OFF_FLAGS + 2], 0);
    LittleEndian::write_u64(&mut out[SNAP_OFF_LEN..SNAP_OFF_LEN + 8], payload.len() as u64);
    LittleEndian::write_u32(
        &mut out[SNAP_OFF_CRC32..SNAP_OFF_CRC32 + 4],
        crc32fast::hash(&payload),
    );
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode_snapshot(buf: &[u8]) -> Result<Snapshot> {
    let h = read_header(buf)?;
    let body = &buf[SNAP_HDR_SIZE..];
    if body.len() as u64 != h.payload_len {
        return Err(anyhow!(
            "snapshot payload length mismatch: header says {} B, file has {} B",
            h.payload_len,
            body.len()
        ));
    }
    let crc = crc32fast::hash(body);
    if crc != h.crc32 {
        return Err(anyhow!(
            "snapshot checksum mismatch (stored {:08x}, computed {:08x})",
            h.crc32,
            crc
        ));
    }

    let snap: Snapshot = match h.codec {
        CODEC_ZSTD => {
            let json = zstd::stream::decode_all(body).context("zstd decompress snapshot")?;
            serde_json::from_slice(&json).context("parse snapshot json")?
        }
        _ => serde_json::from_slice(body).context("parse snapshot json")?,
    };
    Ok(snap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, MenuItem, Order, OrderItem};

    fn sample() -> Snapshot {
        Snapshot {
            customers: vec![Customer::new(1, "Ana", "555-1"), Customer::new(4, "Bo", "")],
            menu_items: vec![MenuItem::new(1, "Pizza", 9.5)],
            orders: vec![Order {
                id: 1,
                customer_id: 1,
                customer_name: "Ana".into(),
                created_unix_ms: 1_700_000_000_000,
                items: vec![OrderItem::new(1, "Pizza", 9.5, 2)],
            }],
        }
    }

    #[test]
    fn header_fields_written() {
        let buf = encode_snapshot(sample().view(), CODEC_NONE).unwrap();
        let h = read_header(&buf).unwrap();
        assert_eq!(h.version, SNAP_VERSION);
        assert_eq!(h.codec, CODEC_NONE);
        assert_eq!(h.payload_len as usize, buf.len() - SNAP_HDR_SIZE);
    }

    #[test]
    fn zstd_payload_decodes() {
        let buf = encode_snapshot(sample().view(), CODEC_ZSTD).unwrap();
        assert_eq!(read_header(&buf).unwrap().codec, CODEC_ZSTD);
        assert_eq!(decode_snapshot(&buf).unwrap(), sample());
    }

    #[test]
    fn flipped_payload_byte_fails_crc() {
        let mut buf = encode_snapshot(sample().view(), CODEC_NONE).unwrap();
        let last = buf.len() - 2;
        buf[last] ^= 0x5A;
        let err = decode_snapshot(&buf).unwrap_err();
        assert!(format!("{:#}", err).contains("checksum"), "got: {:#}", err);
    }

    #[test]
    fn rejects_bad_magic_and_truncation() {
        let buf = encode_snapshot(sample().view(), CODEC_NONE).unwrap();

        let mut bad = buf.clone();
        bad[0] = b'X';
        assert!(decode_snapshot(&bad).is_err());

        assert!(decode_snapshot(&buf[..buf.len() - 1]).is_err());
        assert!(decode_snapshot(&buf[..10]).is_err());
        assert!(decode_snapshot(&[]).is_err());
    }

    #[test]
    fn rejects_unknown_codec() {
        let mut buf = encode_snapshot(sample().view(), CODEC_NONE).unwrap();
        LittleEndian::write_u16(&mut buf[SNAP_OFF_CODEC..SNAP_OFF_CODEC + 2], 9);
        assert!(read_header(&buf).is_err());
        assert!(encode_snapshot(sample().view(), 9).is_err());
    }
}

//! Basic functionality tests for the mapped ring buffer

use mapring::{BufferMode, RingBuffer, RingError, RingReader, RingResult, RingWriter};
use std::path::PathBuf;
use tempfile::TempDir;

fn backing_file(dir: &TempDir, name: &str, len: u64) -> RingResult<PathBuf> {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(len).unwrap();
    Ok(path)
}

#[test]
fn test_basic_write_read() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "basic.ring", 4096)?;
    let test_data = b"Hello, ring!";

    let mut writer = RingWriter::open(&path, 0, 4096)?;
    writer.write(test_data)?;

    let mut reader = RingReader::open(&path, 0, 4096)?;
    let read_data = reader.read(test_data.len())?;

    assert_eq!(read_data, test_data);
    Ok(())
}

#[test]
fn test_streamed_writes() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "stream.ring", 4096)?;

    let mut writer = RingWriter::open(&path, 0, 4096)?;
    let mut reader = RingReader::open(&path, 0, 4096)?;

    for i in 0..100 {
        let message = format!("Message {}", i);
        writer.write(message.as_bytes())?;

        let read_data = reader.read(message.len())?;
        assert_eq!(read_data, message.as_bytes());
        assert_eq!(reader.position(), writer.position());
    }

    Ok(())
}

/// Backing file of 1024 bytes: write 1000 bytes of 0xAA, then 50 bytes of
/// 0xBB that wrap after 24 bytes. An independent read-only descriptor with
/// a matching starting cursor must observe the full sequence, and the
/// wrapped 26 bytes must physically sit at the start of the region.
#[test]
fn test_wraparound_scenario() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "wrap.ring", 1024)?;

    let mut writer = RingWriter::open(&path, 0, 1024)?;
    writer.write(&[0xAA; 1000])?;
    writer.write(&[0xBB; 50])?;
    assert_eq!(writer.position(), 1050);
    writer.flush()?;

    let mut reader = RingReader::open(&path, 0, 1024)?;
    assert_eq!(reader.read(1000)?, &[0xAA; 1000][..]);
    assert_eq!(reader.read(50)?, &[0xBB; 50][..]);
    assert_eq!(reader.position(), 1050);

    // Physical layout: the wrapped tail of the second write lands at the
    // start of the region, the first 24 bytes of it stay at the end.
    let raw = std::fs::read(&path).unwrap();
    assert_eq!(&raw[0..26], &[0xBB; 26][..]);
    assert_eq!(&raw[26..1000], &[0xAA; 974][..]);
    assert_eq!(&raw[1000..1024], &[0xBB; 24][..]);

    Ok(())
}

#[test]
fn test_oversized_write_rejected() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "oversized.ring", 1024)?;

    let mut writer = RingWriter::open(&path, 0, 1024)?;
    let result = writer.write(&vec![0u8; 1025]);

    assert!(matches!(
        result,
        Err(RingError::SizeExceeded {
            requested: 1025,
            capacity: 1024
        })
    ));
    assert_eq!(writer.position(), 0);

    // Descriptor stays usable after the failed call
    writer.write(b"still fine")?;
    Ok(())
}

#[test]
fn test_readonly_write_rejected() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "readonly.ring", 1024)?;

    let mut buf = RingBuffer::open(&path, 0, 1024, BufferMode::ReadOnly)?;
    assert!(matches!(buf.write(b"nope"), Err(RingError::Mode { .. })));
    assert_eq!(buf.position(), 0);

    // No mutation reached the backing file
    let raw = std::fs::read(&path).unwrap();
    assert!(raw.iter().all(|&b| b == 0));

    buf.close()
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.ring");

    let result = RingReader::open(&path, 0, 4096);
    assert!(matches!(result, Err(RingError::Open { .. })));
}

#[test]
fn test_open_short_file() {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "short.ring", 1024).unwrap();

    let result = RingWriter::open(&path, 0, 4096);
    assert!(matches!(result, Err(RingError::Map { .. })));
}

#[test]
fn test_open_at_page_offset() -> RingResult<()> {
    let page = mapring::platform::page_size();
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "offset.ring", page * 2)?;

    let mut writer = RingWriter::open(&path, page, page as usize)?;
    writer.write(b"second page")?;
    writer.flush()?;

    let mut reader = RingReader::open(&path, page, page as usize)?;
    assert_eq!(reader.read(11)?, b"second page");

    // The first page of the file is untouched
    let raw = std::fs::read(&path).unwrap();
    assert!(raw[..page as usize].iter().all(|&b| b == 0));

    Ok(())
}

#[test]
fn test_misaligned_offset_rejected() {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "misaligned.ring", 8192).unwrap();

    let result = RingWriter::open(&path, 12, 4096);
    assert!(matches!(result, Err(RingError::Misaligned { .. })));
}

#[test]
fn test_close_then_reopen() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "reopen.ring", 4096)?;

    let mut writer = RingWriter::open(&path, 0, 4096)?;
    writer.write(b"survives reopen")?;
    writer.close()?;

    // The data persists in the backing file past the descriptor's lifetime
    let mut reader = RingReader::open(&path, 0, 4096)?;
    assert_eq!(reader.read(15)?, b"survives reopen");
    reader.close()?;

    Ok(())
}

#[test]
fn test_open_close_leaves_file_unmodified() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "untouched.ring", 4096)?;
    let before = std::fs::read(&path).unwrap();

    RingReader::open(&path, 0, 4096)?.close()?;
    RingWriter::open(&path, 0, 4096)?.close()?;

    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn test_random_payload_round_trip() -> RingResult<()> {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "random.ring", 2048)?;

    let mut writer = RingWriter::open(&path, 0, 2048)?;
    let mut reader = RingReader::open(&path, 0, 2048)?;

    let mut rng = StdRng::seed_from_u64(0xC1BC);
    for _ in 0..50 {
        let len = rng.gen_range(1..=2048);
        let mut payload = vec![0u8; len];
        rng.fill(&mut payload[..]);

        writer.write(&payload)?;
        assert_eq!(reader.read(len)?, &payload[..]);
    }

    Ok(())
}

#[test]
fn test_capacity_multiple_laps() -> RingResult<()> {
    let dir = TempDir::new().unwrap();
    let path = backing_file(&dir, "laps.ring", 128)?;

    let mut writer = RingWriter::open(&path, 0, 128)?;
    let mut reader = RingReader::open(&path, 0, 128)?;

    // Drive the cursors through several full laps of the region
    for lap in 0u8..10 {
        let chunk = vec![lap; 100];
        writer.write(&chunk)?;
        assert_eq!(reader.read(100)?, &chunk[..]);
    }

    assert_eq!(writer.position(), 1000);
    assert_eq!(reader.position(), 1000);
    Ok(())
}

//! Simple reader demo: attach read-only to the writer's region

use mapring::{RingReader, RingResult};

const RING_PATH: &str = "/tmp/mapring_demo.ring";
const RING_SIZE: usize = 4096;

fn main() -> RingResult<()> {
    mapring::init_tracing();

    println!("Mapring Reader Demo");
    println!("===================");
    println!("Attaching to '{}' ({} bytes)...", RING_PATH, RING_SIZE);

    let mut reader = RingReader::open(RING_PATH, 0, RING_SIZE)?;

    println!("Reader ready, capacity {} bytes\n", reader.capacity());

    // The demos run with both cursors starting at zero; a real application
    // would exchange cursor positions through its own handshake.
    for i in 0..5 {
        let expected = format!("tunnel frame {}", i);
        let data = String::from_utf8_lossy(reader.read(expected.len())?).into_owned();
        println!("  read {:?} (cursor now at {})", data, reader.position());
    }

    reader.close()?;
    println!("\nReader closed.");
    Ok(())
}

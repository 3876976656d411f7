//! Simple writer demo: create the backing file, map it, stream data in

use mapring::{RingResult, RingWriter};
use std::io;

const RING_PATH: &str = "/tmp/mapring_demo.ring";
const RING_SIZE: usize = 4096;

fn main() -> RingResult<()> {
    mapring::init_tracing();

    println!("Mapring Writer Demo");
    println!("===================");

    // The driving application owns the backing file: create and size it
    // before either endpoint opens the region.
    let file = std::fs::File::create(RING_PATH).expect("failed to create backing file");
    file.set_len(RING_SIZE as u64)
        .expect("failed to size backing file");
    drop(file);

    println!(
        "Opening writer over '{}' ({} bytes)...",
        RING_PATH, RING_SIZE
    );

    let mut writer = RingWriter::open(RING_PATH, 0, RING_SIZE)?;

    println!("Writer ready, capacity {} bytes", writer.capacity());

    for i in 0..5 {
        let message = format!("tunnel frame {}", i);
        writer.write(message.as_bytes())?;
        println!(
            "  wrote {:?} (cursor now at {})",
            message,
            writer.position()
        );
    }

    writer.flush()?;
    println!("\nFlushed. Run the ring_reader demo in another terminal.");
    println!("Press Enter to close the writer...");
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();

    writer.close()?;
    println!("Writer closed.");
    Ok(())
}

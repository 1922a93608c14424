#![no_main]

use libfuzzer_sys::fuzz_target;
use mcpe_protocol::{PacketCodec, PacketRegistry, Side};

fuzz_target!(|data: &[u8]| {
    // Fuzz packet decoding from both sides - test for panics and out-of-bounds reads
    let Ok(registry) = PacketRegistry::standard() else {
        return;
    };
    let _ = PacketCodec::new(&registry, Side::Client).decode(data);
    let _ = PacketCodec::new(&registry, Side::Server).decode(data);
});

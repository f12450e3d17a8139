use huffpack::HuffmanCodec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = std::env::temp_dir().join("huffpack-demo");
    std::fs::create_dir_all(&dir)?;
    let input = dir.join("sample.txt");
    let compressed = dir.join("sample.huff");
    let decompressed = dir.join("decompressed.txt");

    std::fs::write(&input, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let codec = HuffmanCodec::from_bytes(sample_text.as_bytes())?;
    for (symbol, code) in codec.code_table().iter() {
        println!("  {:?}: {}", symbol as char, code);
    }

    let stats = HuffmanCodec::compress_file(&input, &compressed)?;
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        stats.compressed_bytes,
        stats.ratio() * 100.0
    );

    HuffmanCodec::decompress_file(&compressed, &decompressed)?;
    let decompressed_text = std::fs::read_to_string(&decompressed)?;

    if sample_text != decompressed_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly.");

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

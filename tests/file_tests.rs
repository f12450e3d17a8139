mod common;

use std::fs;

use huffpack::{CompressedData, HuffmanCodec, HuffmanError};
use tempfile::tempdir;

use crate::common::*;

#[test]
fn test_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    let compressed_path = dir.path().join("compressed.bin");
    let dest_path = dir.path().join("decompressed.txt");

    let original_text = skewed_bytes(11, SAMPLE_LENGTH);
    fs::write(&path, &original_text).unwrap();

    let stats = HuffmanCodec::compress_file(&path, &compressed_path).unwrap();
    assert_eq!(stats.original_bytes, original_text.len());
    assert_eq!(
        stats.compressed_bytes as u64,
        fs::metadata(&compressed_path).unwrap().len()
    );
    assert!(stats.ratio() < 1.0);

    let written = HuffmanCodec::decompress_file(&compressed_path, &dest_path).unwrap();
    assert_eq!(written, original_text.len());
    assert_eq!(fs::read(&dest_path).unwrap(), original_text);
}

#[test]
fn test_empty_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty");
    let compressed_path = dir.path().join("empty.bin");
    let dest_path = dir.path().join("empty.out");
    fs::write(&path, b"").unwrap();

    let stats = HuffmanCodec::compress_file(&path, &compressed_path).unwrap();
    assert_eq!(stats.original_bytes, 0);
    assert_eq!(stats.ratio(), 0.0);
    assert_eq!(
        HuffmanCodec::decompress_file(&compressed_path, &dest_path).unwrap(),
        0
    );
    assert!(fs::read(&dest_path).unwrap().is_empty());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let result = HuffmanCodec::compress_file(&dir.path().join("nope"), &dir.path().join("out"));
    assert!(matches!(result, Err(HuffmanError::Io(_))));
}

#[test]
fn test_corrupt_container_rejected() {
    let dir = tempdir().unwrap();
    let compressed_path = dir.path().join("compressed.bin");
    let mut container = HuffmanCodec::compress(lorem()).unwrap();
    container.tree_data.truncate(container.tree_data.len() - 1);
    fs::write(&compressed_path, container.serialize()).unwrap();

    let result = HuffmanCodec::decompress_file(&compressed_path, &dir.path().join("out"));
    assert!(matches!(result, Err(HuffmanError::InvalidContainer(_))));
}

#[test]
fn test_container_stores_bit_count() {
    let container = HuffmanCodec::compress(b"aaabb").unwrap();
    let restored = CompressedData::deserialize(&container.serialize()).unwrap();
    assert_eq!(restored.bit_count, 5);
    assert_eq!(restored.original_length, 5);
    assert_eq!(restored.compressed_bits, vec![0b1110_0000]);
}

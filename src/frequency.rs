/// Distinct symbols of an input in first-occurrence order, with a parallel
/// vector of occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    symbols: Vec<u8>,
    frequencies: Vec<u64>,
}

impl FrequencyTable {
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn frequencies(&self) -> &[u64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Count for `symbol`, zero if it never occurred.
    pub fn count(&self, symbol: u8) -> u64 {
        self.iter()
            .find(|&(s, _)| s == symbol)
            .map_or(0, |(_, count)| count)
    }

    /// Total number of bytes the table was computed from.
    pub fn total(&self) -> u64 {
        self.frequencies.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.symbols.iter().copied().zip(self.frequencies.iter().copied())
    }
}

/// Scan `bytes` once and count every distinct byte.
pub fn analyze_frequencies(bytes: &[u8]) -> FrequencyTable {
    let mut counts = [0u64; 256];
    let mut symbols = Vec::new();

    for &byte in bytes {
        if counts[byte as usize] == 0 {
            symbols.push(byte);
        }
        counts[byte as usize] += 1;
    }

    let frequencies = symbols.iter().map(|&s| counts[s as usize]).collect();
    FrequencyTable { symbols, frequencies }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let table = analyze_frequencies(b"banana");
        assert_eq!(table.symbols(), b"ban");
        assert_eq!(table.frequencies(), &[1, 3, 2]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_single_symbol() {
        let table = analyze_frequencies(b"z");
        assert_eq!(table.len(), 1);
        assert_eq!(table.count(b'z'), 1);
        assert_eq!(table.count(b'y'), 0);
    }

    #[test]
    fn test_empty_input() {
        let table = analyze_frequencies(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
        let table = analyze_frequencies(&data);
        assert_eq!(table.len(), 256);
        assert!(table.frequencies().iter().all(|&f| f == 2));
    }
}

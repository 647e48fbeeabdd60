use fxhash::FxHashMap;
use std::io::Write;

///
/// Counts occurrences of strings while remembering the order in which
/// each key was first seen, so tables written to disk are stable.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    keys: Vec<String>,
    counts: FxHashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, n: u64) {
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.keys.push(key.to_string());
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over `(key, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.keys.iter().map(|k| (k.as_str(), self.get(k)))
    }

    ///
    /// Write the table as TSV with the given two-column header.
    ///
    /// # Arguments
    ///
    /// - writer: destination
    /// - header: names of the key and count columns
    ///
    pub fn write_tsv<W: Write>(&self, writer: &mut W, header: (&str, &str)) -> std::io::Result<()> {
        writeln!(writer, "{}\t{}", header.0, header.1)?;
        for (key, count) in self.iter() {
            writeln!(writer, "{}\t{}", key, count)?;
        }
        Ok(())
    }
}

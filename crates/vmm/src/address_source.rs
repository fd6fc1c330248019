//! Line-oriented logical address input.

use std::fs;
use std::path::Path;
use std::vec;

use crate::LogicalAddress;

/// Reads logical addresses from text, one decimal integer per line.
///
/// Blank lines are skipped. Each value is parsed as a signed integer and reduced to its low
/// 16 bits, so negative inputs wrap the same way a 32-bit two's complement value would.
/// Lines that are not integers are logged and skipped.
///
/// Invalid UTF-8 only spoils the line it appears on. A file that cannot be read at all
/// produces an empty source: a missing address list means there is nothing to translate,
/// not that the run failed.
#[derive(Debug, Clone)]
pub struct AddressSource {
    addresses: vec::IntoIter<LogicalAddress>,
}

impl AddressSource {
    /// Reads the address list at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => {
                let source = Self::from_text(&String::from_utf8_lossy(&bytes));
                log::debug!("read {} addresses from {}", source.len(), path.display());
                source
            }
            Err(err) => {
                log::warn!("cannot read address list {}: {}", path.display(), err);
                Self::from_text("")
            }
        }
    }

    /// Parses an address list held in memory.
    pub fn from_text(text: &str) -> Self {
        let addresses: Vec<LogicalAddress> = text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                match line.parse::<i64>() {
                    Ok(raw) => Some(LogicalAddress::new(raw as u32)),
                    Err(err) => {
                        log::warn!("line {}: skipping {:?}: {}", index + 1, line, err);
                        None
                    }
                }
            })
            .collect();

        Self {
            addresses: addresses.into_iter(),
        }
    }

    /// Returns the number of addresses not yet consumed.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns true if every address has been consumed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for AddressSource {
    type Item = LogicalAddress;

    fn next(&mut self) -> Option<Self::Item> {
        self.addresses.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.addresses.size_hint()
    }
}

impl ExactSizeIterator for AddressSource {}

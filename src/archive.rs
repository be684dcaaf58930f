//! The feed archive: five windows-1251 encoded tables in one ZIP.

use std::io::{Cursor, Read};

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use encoding_rs::WINDOWS_1251;
use zip::ZipArchive;

pub(crate) const ENTRY_RATES: &str = "bm_rates.dat";
pub(crate) const ENTRY_CURRENCIES: &str = "bm_cy.dat";
pub(crate) const ENTRY_EXCHANGERS: &str = "bm_exch.dat";
pub(crate) const ENTRY_CITIES: &str = "bm_cities.dat";
pub(crate) const ENTRY_TOP: &str = "bm_top.dat";

/// An opened feed archive. Every table is required; a missing entry fails the
/// load naming the entry, so callers never see a partial feed.
pub(crate) struct FeedArchive {
    zip: ZipArchive<Cursor<Bytes>>,
}

impl FeedArchive {
    pub(crate) fn open(bytes: Bytes) -> Result<Self> {
        let zip = ZipArchive::new(Cursor::new(bytes)).context("Failed to open feed archive")?;
        Ok(FeedArchive { zip })
    }

    /// Decoded text of one required entry.
    pub(crate) fn read_entry(&mut self, name: &str) -> Result<String> {
        if self.zip.index_for_name(name).is_none() {
            return Err(anyhow!("Feed archive is missing required entry: {name}"));
        }
        let mut raw = Vec::new();
        self.zip
            .by_name(name)
            .and_then(|mut entry| Ok(entry.read_to_end(&mut raw)?))
            .with_context(|| format!("Failed to read archive entry: {name}"))?;

        let (text, _, had_errors) = WINDOWS_1251.decode(&raw);
        if had_errors {
            return Err(anyhow!("Archive entry {name} is not valid windows-1251 text"));
        }
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn build_archive(entries: &[(&str, &str)]) -> Bytes {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, text) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            let (encoded, _, _) = WINDOWS_1251.encode(text);
            writer.write_all(&encoded).unwrap();
        }
        Bytes::from(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn test_reads_and_decodes_cyrillic_entry() {
        let bytes = build_archive(&[(ENTRY_CITIES, "1;Москва\n2;Санкт-Петербург\n")]);
        let mut archive = FeedArchive::open(bytes).unwrap();

        let text = archive.read_entry(ENTRY_CITIES).unwrap();
        assert_eq!(text, "1;Москва\n2;Санкт-Петербург\n");
    }

    #[test]
    fn test_missing_entry_is_named_in_error() {
        let bytes = build_archive(&[(ENTRY_CITIES, "1;Москва\n")]);
        let mut archive = FeedArchive::open(bytes).unwrap();

        let err = archive.read_entry(ENTRY_RATES).unwrap_err();
        assert!(err.to_string().contains(ENTRY_RATES));
    }

    #[test]
    fn test_garbage_bytes_are_not_an_archive() {
        assert!(FeedArchive::open(Bytes::from_static(b"not a zip")).is_err());
    }
}

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ClassificationError;

const RENEWABLE_SOURCES: [&str; 4] = ["Flusskraft", "Speicherkraft", "Wind", "Photovoltaik"];
const NON_RENEWABLE_SOURCES: [&str; 2] = ["Kernkraft", "Thermische"];

/// The sustainability bucket of an energy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sustainability {
    Renewable,
    NonRenewable,
}

/// A table that maps source names to their [`Sustainability`] bucket.
///
/// A strict table makes year summaries fail on sources it does not know,
/// instead of leaving them out of both buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    buckets: HashMap<String, Sustainability>,
    strict: bool,
}

/// The on-disk form of a classification table.
///
/// ```json
/// { "renewable": ["Wind"], "nonRenewable": ["Kernkraft"], "strict": false }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationFile {
    renewable: Vec<String>,
    non_renewable: Vec<String>,
    #[serde(default)]
    strict: bool,
}

impl Classification {
    pub fn new<R, N>(renewable: R, non_renewable: N) -> Result<Classification, ClassificationError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut buckets: HashMap<String, Sustainability> = renewable
            .into_iter()
            .map(|source| (source.into(), Sustainability::Renewable))
            .collect();

        for source in non_renewable {
            let source = source.into();
            if buckets.get(&source) == Some(&Sustainability::Renewable) {
                return Err(ClassificationError::Conflict { source });
            }
            buckets.insert(source, Sustainability::NonRenewable);
        }

        Ok(Self {
            buckets,
            strict: false,
        })
    }

    /// Reads a table from a JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Classification, ClassificationError> {
        let file: ClassificationFile = serde_json::from_reader(reader)?;
        let classification = Self::new(file.renewable, file.non_renewable)?;

        Ok(classification.strict(file.strict))
    }

    pub fn from_path(path: &Path) -> Result<Classification, ClassificationError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Sets whether unknown sources are rejected.
    pub fn strict(mut self, strict: bool) -> Classification {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn classify(&self, source: &str) -> Option<Sustainability> {
        self.buckets.get(source).copied()
    }
}

impl Default for Classification {
    /// The Swissgrid production sources.
    fn default() -> Self {
        let buckets = RENEWABLE_SOURCES
            .iter()
            .map(|&s| (s.to_owned(), Sustainability::Renewable))
            .chain(
                NON_RENEWABLE_SOURCES
                    .iter()
                    .map(|&s| (s.to_owned(), Sustainability::NonRenewable)),
            )
            .collect();

        Self {
            buckets,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn default_table_covers_swissgrid_sources() {
        let classification = Classification::default();

        for source in RENEWABLE_SOURCES {
            assert_eq!(Some(Sustainability::Renewable), classification.classify(source));
        }
        for source in NON_RENEWABLE_SOURCES {
            assert_eq!(Some(Sustainability::NonRenewable), classification.classify(source));
        }
        assert_eq!(None, classification.classify("Geothermie"));
        assert!(!classification.is_strict());
    }

    #[test]
    fn table_reads_from_json() {
        let json = r#"{ "renewable": ["Wind", "Biomasse"], "nonRenewable": ["Kohle"], "strict": true }"#;

        let classification = Classification::from_reader(Cursor::new(json)).unwrap();

        assert_eq!(Some(Sustainability::Renewable), classification.classify("Biomasse"));
        assert_eq!(Some(Sustainability::NonRenewable), classification.classify("Kohle"));
        assert_eq!(None, classification.classify("Kernkraft"));
        assert!(classification.is_strict());
    }

    #[test]
    fn source_in_both_buckets_is_rejected() {
        let result = Classification::new(["Wind"], ["Wind"]);

        assert!(matches!(
            result,
            Err(ClassificationError::Conflict { ref source }) if source == "Wind"
        ));
    }
}

//! In-memory page store for pass tests.

use std::collections::{BTreeMap, BTreeSet};

use gadgetry_wiki::{PageStore, WikiError};

/// Fake wiki: a title→text map that records saves and can reject titles.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub pages: BTreeMap<String, String>,
    /// `(title, text, summary)` per accepted save, in order.
    pub saves: Vec<(String, String, String)>,
    /// Titles whose saves fail with an edit rejection.
    pub reject: BTreeSet<String>,
}

impl MemoryStore {
    pub fn with_pages(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(title, text)| (title.to_string(), text.to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

impl PageStore for MemoryStore {
    fn read_page(&mut self, title: &str) -> Result<Option<String>, WikiError> {
        Ok(self.pages.get(title).cloned())
    }

    fn save_page(&mut self, title: &str, text: &str, summary: &str) -> Result<(), WikiError> {
        if self.reject.contains(title) {
            return Err(WikiError::EditRejected {
                title: title.to_owned(),
                result: "Failure".to_owned(),
            });
        }
        self.pages.insert(title.to_owned(), text.to_owned());
        self.saves
            .push((title.to_owned(), text.to_owned(), summary.to_owned()));
        Ok(())
    }
}

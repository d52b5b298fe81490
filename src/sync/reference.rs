use crate::discover::FileFilter;
use crate::error::SnippetError;
use crate::extract;
use crate::marker::MarkerSyntax;
use crate::snippet::{fold_name, Snippet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// The authoritative snippets, unique by case-insensitive name.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    source: PathBuf,
    snippets: Vec<Snippet>,
    index: HashMap<String, usize>,
}

impl ReferenceSet {
    /// Build a set, rejecting names that collide ignoring case.
    pub fn from_snippets(
        source: impl Into<PathBuf>,
        snippets: Vec<Snippet>,
    ) -> Result<Self, SnippetError> {
        let mut index = HashMap::with_capacity(snippets.len());
        for (idx, snippet) in snippets.iter().enumerate() {
            if let Some(&first) = index.get(&fold_name(&snippet.name)) {
                let first: &Snippet = &snippets[first];
                return Err(SnippetError::DuplicateReferenceName {
                    name: snippet.name.clone(),
                    first: first.start.clone(),
                    second: snippet.start.clone(),
                });
            }
            index.insert(fold_name(&snippet.name), idx);
        }
        Ok(Self {
            source: source.into(),
            snippets,
            index,
        })
    }

    /// Parse the reference location. Any error in it is fatal.
    pub fn load(
        path: &Path,
        syntax: &MarkerSyntax,
        filter: &FileFilter,
    ) -> Result<Self, SnippetError> {
        let extraction = extract::get(path, syntax, filter)?;
        if let Some(err) = extraction.errors.into_iter().next() {
            return Err(err);
        }
        let set = Self::from_snippets(path, extraction.snippets)?;
        tracing::debug!(
            reference = %path.display(),
            count = set.len(),
            "loaded reference snippets"
        );
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.index
            .get(&fold_name(name))
            .map(|&idx| &self.snippets[idx])
    }

    /// Closest reference name to `name`, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let folded = fold_name(name);
        self.snippets
            .iter()
            .map(|s| (strsim::jaro_winkler(&folded, &fold_name(&s.name)), s))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, s)| s.name.as_str())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

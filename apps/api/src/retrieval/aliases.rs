//! Alias Expander — maps canonical company and project names to their known
//! spellings so a query using any of them pulls in the rest.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::profile::ProfileDocument;
use crate::retrieval::text::{contains_term, normalize_name};

/// Lower-cased canonical key → lower-cased aliases (always including the key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl AliasMap {
    /// Builds the map from experience companies and project titles.
    ///
    /// A project registers both its full title and its short name (the part
    /// before the en-dash) as keys sharing one alias set.
    pub fn from_profile(profile: &ProfileDocument) -> Self {
        let mut map = Self::default();

        for experience in &profile.experience {
            let key = normalize_name(&experience.company);
            if key.is_empty() {
                continue;
            }
            let aliases = std::iter::once(key.clone())
                .chain(experience.aliases.iter().map(|a| normalize_name(a)))
                .filter(|a| !a.is_empty())
                .collect();
            map.insert(key, aliases);
        }

        for project in &profile.projects {
            let full = normalize_name(&project.title);
            if full.is_empty() {
                continue;
            }
            let short = project.short_name().map(normalize_name);

            let aliases: BTreeSet<String> = std::iter::once(full.clone())
                .chain(short.clone())
                .chain(project.aliases.iter().map(|a| normalize_name(a)))
                .filter(|a| !a.is_empty())
                .collect();

            if let Some(short) = short {
                map.insert(short, aliases.clone());
            }
            map.insert(full, aliases);
        }

        map
    }

    fn insert(&mut self, key: String, aliases: BTreeSet<String>) {
        self.entries.entry(key).or_default().extend(aliases);
    }

    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Appends every alias of every entry mentioned in the query.
    ///
    /// Purely additive: the original query text is always the prefix of the
    /// result, and each alias string is appended at most once.
    pub fn expand_query(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        let mut expanded = lowered.clone();
        let mut appended: HashSet<&str> = HashSet::new();

        for aliases in self.entries.values() {
            if !aliases.iter().any(|alias| contains_term(&lowered, alias)) {
                continue;
            }
            for alias in aliases {
                if appended.insert(alias.as_str()) {
                    expanded.push(' ');
                    expanded.push_str(alias);
                }
            }
        }

        expanded
    }
}

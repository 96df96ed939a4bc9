//! Retrieval Scorer — ranks routed chunks by keyword overlap with the
//! alias-expanded query.
//!
//! The per-token weight is pluggable through `RankingPolicy`. The default,
//! `LengthWeighted`, credits each matching token with its character length so
//! that short incidental words ("i", "at", "my") count for little.

use serde::Serialize;

use crate::retrieval::aliases::AliasMap;
use crate::retrieval::chunker::Chunk;

/// Number of chunks returned when the caller does not specify a limit.
pub const DEFAULT_LIMIT: usize = 3;

/// A chunk annotated with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: u32,
}

/// Scores one chunk's lower-cased content against the query tokens.
pub trait RankingPolicy: Send + Sync {
    fn score(&self, tokens: &[String], content: &str) -> u32;
}

/// Sum of the character lengths of every token found in the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthWeighted;

impl RankingPolicy for LengthWeighted {
    fn score(&self, tokens: &[String], content: &str) -> u32 {
        tokens
            .iter()
            .filter(|token| content.contains(token.as_str()))
            .map(|token| token.chars().count() as u32)
            .sum()
    }
}

/// Splits on whitespace and trims surrounding punctuation ("berger?" → "berger").
/// Inner punctuation is kept so "a/b" and "ui/ux" survive intact.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Ranks `chunks` against `query`, returning at most `limit` chunks with a
/// positive score, highest first. Equal scores keep their input order.
pub fn retrieve_with(
    policy: &dyn RankingPolicy,
    query: &str,
    chunks: &[Chunk],
    aliases: &AliasMap,
    limit: usize,
) -> Vec<ScoredChunk> {
    let tokens = tokenize(&aliases.expand_query(query));
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .map(|chunk| ScoredChunk {
            score: policy.score(&tokens, &chunk.content.to_lowercase()),
            chunk: chunk.clone(),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    // sort_by is stable: ties keep profile declaration order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_profile;
    use crate::retrieval::chunker::{build_chunks, SectionType};

    fn retrieve(
        query: &str,
        chunks: &[Chunk],
        aliases: &AliasMap,
        limit: usize,
    ) -> Vec<ScoredChunk> {
        retrieve_with(&LengthWeighted, query, chunks, aliases, limit)
    }

    fn chunk(content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            source_label: "Test".to_string(),
            section: SectionType::Project,
        }
    }

    #[test]
    fn test_tokenize_trims_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("What did I do at A. Berger?"),
            vec!["what", "did", "i", "do", "at", "a", "berger"]
        );
        assert_eq!(tokenize("A/B testing – fast"), vec!["a/b", "testing", "fast"]);
    }

    #[test]
    fn test_length_weighted_sums_matching_token_lengths() {
        let tokens = tokenize("tableau dashboards zzz");
        let score = LengthWeighted.score(&tokens, "built tableau dashboards");
        assert_eq!(score, 7 + 10);
    }

    #[test]
    fn test_zero_score_chunks_are_excluded() {
        let chunks = build_chunks(&sample_profile());
        let aliases = AliasMap::from_profile(&sample_profile());
        assert!(retrieve("purple elephant", &chunks, &aliases, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_limit_and_descending_order() {
        let chunks = build_chunks(&sample_profile());
        let aliases = AliasMap::from_profile(&sample_profile());
        let results = retrieve("dashboards defect tableau", &chunks, &aliases, 2);
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let chunks = vec![chunk("alpha one"), chunk("alpha two"), chunk("alpha three")];
        let results = retrieve("alpha", &chunks, &AliasMap::default(), 3);
        let contents: Vec<&str> = results.iter().map(|s| s.chunk.content.as_str()).collect();
        assert_eq!(contents, vec!["alpha one", "alpha two", "alpha three"]);
    }

    #[test]
    fn test_short_name_alias_scores_full_title_project() {
        let profile = sample_profile();
        let chunks: Vec<Chunk> = build_chunks(&profile)
            .into_iter()
            .filter(|c| c.section == SectionType::Project)
            .collect();
        let aliases = AliasMap::from_profile(&profile);

        let results = retrieve("Tell me about BetWise", &chunks, &aliases, DEFAULT_LIMIT);
        assert!(!results.is_empty());
        assert_eq!(results[0].chunk.source_label, "Project – BetWise");
        assert!(results[0].score > 0);
    }

    #[test]
    fn test_alias_expansion_never_lowers_scores() {
        let profile = sample_profile();
        let chunks = build_chunks(&profile);
        let aliases = AliasMap::from_profile(&profile);

        for query in ["What did I do at A. Berger?", "Tell me about BetWise", "RBC dashboards"] {
            let plain = tokenize(query);
            let expanded = tokenize(&aliases.expand_query(query));
            for chunk in &chunks {
                let content = chunk.content.to_lowercase();
                let before = LengthWeighted.score(&plain, &content);
                assert!(
                    LengthWeighted.score(&expanded, &content) >= before,
                    "expansion lowered score of {} for {query:?}",
                    chunk.source_label
                );
            }
        }
    }

    #[test]
    fn test_custom_policy_is_honoured() {
        struct CountMatches;
        impl RankingPolicy for CountMatches {
            fn score(&self, tokens: &[String], content: &str) -> u32 {
                tokens.iter().filter(|t| content.contains(t.as_str())).count() as u32
            }
        }

        let chunks = vec![chunk("zz"), chunk("a b")];
        let results = retrieve_with(&CountMatches, "a b zz", &chunks, &AliasMap::default(), 3);
        assert_eq!(results[0].chunk.content, "a b");
        assert_eq!(results[0].score, 2);
    }
}

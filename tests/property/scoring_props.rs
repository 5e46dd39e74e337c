//! Score record bounds.

use super::*;
use shelfsort::{score_candidate, score_item, tokenize, RankingConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every hit is worth between the lightest and heaviest field weight.
    #[test]
    fn prop_token_score_bounded_by_hits(phrase in text_strategy(), item in item_strategy()) {
        let tokens = tokenize(&phrase);
        prop_assume!(!tokens.is_empty());
        let config = RankingConfig::default();
        let record = score_item(&tokens, &item, &config).unwrap();
        let hits = i64::from(record.overall_token_hits);
        prop_assert!(record.token_score >= 4 * hits);
        prop_assert!(record.token_score <= 10 * hits);
    }

    /// Before the penalty, each hit adds between the lightest relevance
    /// weight and the sum of all of them.
    #[test]
    fn prop_relevance_accounts_for_penalty(phrase in text_strategy(), item in item_strategy()) {
        let tokens = tokenize(&phrase);
        prop_assume!(!tokens.is_empty());
        let config = RankingConfig::default();
        let record = score_item(&tokens, &item, &config).unwrap();
        let hits = i64::from(record.overall_token_hits);
        prop_assert!(record.universal_penalty == 0 || record.universal_penalty == 20);
        prop_assert!(record.relevance + record.universal_penalty >= 60 * hits);
        prop_assert!(record.relevance + record.universal_penalty <= 400 * hits);
    }

    /// "All tokens" flags agree with the hit counters.
    #[test]
    fn prop_all_token_flags_follow_counters(phrase in text_strategy(), item in item_strategy()) {
        let tokens = tokenize(&phrase);
        prop_assume!(!tokens.is_empty());
        let n = tokens.len() as u32;
        let record = score_item(&tokens, &item, &RankingConfig::default()).unwrap();
        prop_assert_eq!(record.title_all_tokens, record.title_token_hits >= n);
        prop_assert_eq!(record.attr_all_tokens, record.attr_token_hits >= n);
        prop_assert_eq!(record.content_all_tokens, record.content_token_hits >= n);
        prop_assert!(!record.title_exact_phrase || record.exact_match);
        prop_assert!(!record.title_ordered_phrase || record.title_all_tokens);
    }

    /// The filter keeps exactly the items where every token hit something.
    #[test]
    fn prop_candidates_hit_every_token(phrase in text_strategy(), item in item_strategy()) {
        let tokens = tokenize(&phrase);
        prop_assume!(!tokens.is_empty());
        let config = RankingConfig::default();
        match score_candidate(&tokens, &item, &config) {
            Some(record) => prop_assert_eq!(record.overall_token_hits as usize, tokens.len()),
            None => {
                let record = score_item(&tokens, &item, &config).unwrap();
                prop_assert!((record.overall_token_hits as usize) < tokens.len());
            }
        }
    }
}

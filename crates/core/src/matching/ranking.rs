use std::collections::HashSet;

use crate::domain::suggestion::Suggestion;

/// Highest scores first. The sort is stable, so ties keep catalog order.
pub fn top_ranked(mut suggestions: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
    suggestions.sort_by(|left, right| right.score.total_cmp(&left.score));
    suggestions.truncate(limit);
    suggestions
}

/// Drops every suggestion whose unordered pair was already emitted earlier in the sequence.
pub fn dedupe_pairs<I>(suggestions: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = Suggestion>,
{
    let mut seen = HashSet::new();
    suggestions.into_iter().filter(|suggestion| seen.insert(suggestion.pair_key())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::suggestion::ConfidenceLevel;

    fn suggestion(source: &str, target: &str, score: f64) -> Suggestion {
        Suggestion {
            source_sku: source.to_string(),
            target_sku: target.to_string(),
            confidence: ConfidenceLevel::Medium,
            reason: String::new(),
            score,
        }
    }

    #[test]
    fn ranks_by_descending_score_and_keeps_ties_in_order() {
        let ranked = top_ranked(
            vec![
                suggestion("A", "B", 0.6),
                suggestion("A", "C", 0.9),
                suggestion("A", "D", 0.6),
                suggestion("A", "E", 0.5),
            ],
            3,
        );

        let targets: Vec<&str> = ranked.iter().map(|s| s.target_sku.as_str()).collect();
        assert_eq!(targets, vec!["C", "B", "D"]);
    }

    #[test]
    fn dedupe_keeps_first_direction() {
        let deduped = dedupe_pairs(vec![
            suggestion("A", "B", 0.7),
            suggestion("A", "C", 0.6),
            suggestion("b", "a", 0.7),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].source_sku, "A");
        assert_eq!(deduped[1].target_sku, "C");
    }
}

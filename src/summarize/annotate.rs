//! Sentiment polarity and naive keyword extraction over the resolved input
//! text. A small embedded lexicon stands in for the external tagging service;
//! both functions are deterministic and stateless.

/// Function words and very common verbs, excluded from keyword candidates and
/// from extractive sentence scoring.
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "that",
    "this", "these", "those", "it", "its", "he", "she", "they", "them", "his", "her", "their",
    "we", "us", "our", "you", "your", "i", "me", "my", "who", "whom", "which", "what", "when",
    "where", "why", "how", "of", "in", "on", "at", "by", "to", "from", "with", "without",
    "into", "onto", "over", "under", "about", "after", "before", "between", "through",
    "during", "near", "up", "down", "out", "off", "for", "as", "is", "am", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "done", "will", "would", "can", "could", "may", "might", "shall", "should",
    "must", "not", "no", "also", "there", "here", "because", "while", "both", "each",
    "few", "more", "most", "other", "some", "such", "only", "own", "same", "too", "very",
    "just", "now", "get", "got", "make", "made", "go", "went", "gone", "come", "came",
    "take", "took", "taken", "say", "said", "sent", "put", "use", "used",
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "wonderful", "amazing", "fantastic", "superb", "best",
    "better", "positive", "happy", "glad", "love", "loved", "like", "liked", "enjoy",
    "enjoyed", "success", "successful", "win", "won", "benefit", "improve", "improved",
    "impressive", "helpful", "useful", "valuable", "reliable", "efficient", "clear",
    "beautiful", "strong", "fortunate", "correct", "perfect",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "negative", "sad",
    "unhappy", "hate", "hated", "dislike", "disliked", "fail", "failed", "failure", "lose",
    "lost", "loss", "harm", "harmful", "broken", "unreliable", "inefficient", "confusing",
    "ugly", "weak", "unfortunate", "wrong", "problem", "problems", "crisis", "disaster",
];

fn raw_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Signed polarity in [-1, 1]: the mean of +1/-1 lexicon hits, 0.0 when the
/// text contains no lexicon word at all.
pub fn sentiment_polarity(text: &str) -> f64 {
    let mut score = 0.0;
    let mut hits = 0u32;
    for token in raw_tokens(text) {
        let lower = token.to_lowercase();
        if POSITIVE_WORDS.contains(&lower.as_str()) {
            score += 1.0;
            hits += 1;
        } else if NEGATIVE_WORDS.contains(&lower.as_str()) {
            score -= 1.0;
            hits += 1;
        }
    }
    if hits == 0 {
        0.0
    } else {
        score / f64::from(hits)
    }
}

/// Naive noun tagging: alphabetic, at least three characters, not a function
/// word, not an "-ly" adverb.
fn is_noun_like(token: &str) -> bool {
    let lower = token.to_lowercase();
    token.len() >= 3
        && token.chars().all(char::is_alphabetic)
        && !lower.ends_with("ly")
        && !STOPWORDS.contains(&lower.as_str())
}

/// First `limit` noun-tagged tokens in order of appearance, case preserved.
pub fn keywords(text: &str, limit: usize) -> Vec<String> {
    raw_tokens(text)
        .filter(|t| is_noun_like(t))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_has_positive_polarity() {
        let s = sentiment_polarity("The food was excellent and the service was wonderful.");
        assert!(s > 0.0, "expected positive polarity, got {s}");
    }

    #[test]
    fn negative_text_has_negative_polarity() {
        let s = sentiment_polarity("A terrible plan with awful consequences and poor results.");
        assert!(s < 0.0, "expected negative polarity, got {s}");
    }

    #[test]
    fn neutral_text_scores_zero() {
        assert_eq!(sentiment_polarity("The train departs at noon."), 0.0);
    }

    #[test]
    fn mixed_text_averages_hits() {
        // one positive, one negative
        let s = sentiment_polarity("The good news arrived after the bad news.");
        assert_eq!(s, 0.0);
    }

    #[test]
    fn keywords_are_first_nouns_in_order() {
        let text = "The committee sent the report to the harbor office on Monday.";
        assert_eq!(
            keywords(text, 5),
            vec!["committee", "report", "harbor", "office", "Monday"]
        );
    }

    #[test]
    fn keywords_respect_the_limit() {
        let text = "Harbor ships cargo cranes docks tides storms gulls.";
        assert_eq!(keywords(text, 5).len(), 5);
    }

    #[test]
    fn adverbs_and_stopwords_are_skipped() {
        let kws = keywords("The quickly moving storm suddenly hit the coast.", 5);
        assert!(!kws.iter().any(|k| k == "quickly" || k == "suddenly" || k == "The"));
        assert!(kws.iter().any(|k| k == "storm"));
    }
}

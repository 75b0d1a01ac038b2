// Tokenization and light stemming shared by the classifier and summarizer

/// Suffixes stripped by `stem`, longest first. `ies`/`ied` become `y`.
const SUFFIXES: &[&str] = &[
    "ations", "ation", "ating", "ments", "ment", "ities", "ity", "ings", "ing", "ated", "ates",
    "able", "ate", "ies", "ied", "ed", "es", "ly", "s",
];

/// Shortest stem a suffix may leave behind
const MIN_STEM_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hereby", "herein",
    "hereof", "hereto", "hereunder", "hers", "him", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "itself", "may", "me", "more", "most", "must", "my", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "out", "over", "own", "s", "same", "shall", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
    "there", "thereof", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "upon", "very", "was", "we", "were", "what", "when", "where", "whether",
    "which", "while", "who", "whom", "why", "will", "with", "within", "would", "you", "your",
];

/// Split text into lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Reduce a word to a crude stem so inflections compare equal
///
/// "terminate", "terminated", "terminating" and "termination" all become
/// "termin". The same function is applied to rule terms and to sentence
/// tokens, so only consistency matters, not linguistic accuracy.
pub fn stem(word: &str) -> String {
    let word = word.to_lowercase();
    let len = word.chars().count();
    if len <= MIN_STEM_LEN || !word.is_ascii() {
        return word;
    }

    let mut base = word.clone();
    for suffix in SUFFIXES {
        if !word.ends_with(suffix) || len - suffix.len() < MIN_STEM_LEN {
            continue;
        }
        if *suffix == "s" && (word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
        {
            break;
        }
        base = word[..word.len() - suffix.len()].to_string();
        if *suffix == "ies" || *suffix == "ied" {
            base.push('y');
        }
        break;
    }

    if base.len() > 4 && base.ends_with('e') {
        base.pop();
    }
    base
}

/// Tokenize and stem in one pass
pub fn stems(text: &str) -> Vec<String> {
    tokenize(text).iter().map(|t| stem(t)).collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Start positions of every occurrence of `phrase` in `tokens`
pub fn find_phrase(tokens: &[String], phrase: &[String]) -> Vec<usize> {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return Vec::new();
    }
    tokens
        .windows(phrase.len())
        .enumerate()
        .filter(|(_, window)| *window == phrase)
        .map(|(i, _)| i)
        .collect()
}

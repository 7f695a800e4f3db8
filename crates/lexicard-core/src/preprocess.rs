use unicode_normalization::UnicodeNormalization;

/// Clean-up applied to a raw highlighted fragment before word extraction
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC folds ligatures and full-width letters into their plain forms
        let text: String = text.nfkc().collect();

        // Soft hyphens from e-book hyphenation would otherwise split a word
        text.replace('\u{00ad}', "")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

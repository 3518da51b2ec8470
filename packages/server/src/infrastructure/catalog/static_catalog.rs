//! Static question catalog keyed by category.
//!
//! The catalog is either the built-in set or a JSON file of the form
//!
//! ```json
//! { "sports": [ { "title": "...", "answers": [ { "text": "...", "rank": 1, "points": 1 } ] } ] }
//! ```
//!
//! Category names match exactly first, then ASCII case-insensitively. A
//! loaded file may not hold two names that differ only in case.
//!
//! Unknown or empty categories fall back to the first question of
//! [`DEFAULT_CATEGORY`].

use std::{collections::HashMap, path::Path};

use rand::Rng;
use thiserror::Error;

use crate::domain::{CategoryId, Question, QuestionProvider};

use super::builtin::{BUILTIN_CATALOG, GENERAL};

pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct StaticQuestionCatalog {
    categories: HashMap<String, Vec<Question>>,
    /// lowercased name -> category name (smallest name wins on collision)
    folded: HashMap<String, String>,
    fallback: Question,
}

impl StaticQuestionCatalog {
    pub fn new(categories: HashMap<String, Vec<Question>>) -> Self {
        let fallback = categories
            .get(DEFAULT_CATEGORY)
            .and_then(|questions| questions.first())
            .cloned()
            .unwrap_or_else(builtin_fallback);
        let mut names: Vec<&String> = categories.keys().collect();
        names.sort_unstable();
        let mut folded = HashMap::new();
        for name in names {
            folded
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| name.clone());
        }
        Self {
            categories,
            folded,
            fallback,
        }
    }

    pub fn builtin() -> Self {
        let categories = BUILTIN_CATALOG
            .iter()
            .map(|(category, questions)| {
                let questions = questions
                    .iter()
                    .map(|(title, answers)| Question::from_ranked(*title, answers))
                    .collect();
                (category.to_string(), questions)
            })
            .collect();
        Self::new(categories)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let categories: HashMap<String, Vec<Question>> = serde_json::from_str(json)?;
        let mut seen: HashMap<String, &str> = HashMap::new();
        for (category, questions) in &categories {
            if let Some(other) = seen.insert(category.to_ascii_lowercase(), category) {
                return Err(CatalogError::Invalid(format!(
                    "categories '{}' and '{}' differ only in case",
                    other, category
                )));
            }
            if let Some(question) = questions.iter().find(|q| q.answers.is_empty()) {
                return Err(CatalogError::Invalid(format!(
                    "question '{}' in category '{}' has no answers",
                    question.title, category
                )));
            }
        }
        Ok(Self::new(categories))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn fallback(&self) -> &Question {
        &self.fallback
    }

    // exact key first, then case-insensitive
    fn lookup(&self, category_id: &str) -> Option<&[Question]> {
        self.categories
            .get(category_id)
            .or_else(|| {
                let name = self.folded.get(&category_id.to_ascii_lowercase())?;
                self.categories.get(name)
            })
            .map(Vec::as_slice)
            .filter(|questions| !questions.is_empty())
    }
}

impl Default for StaticQuestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuestionProvider for StaticQuestionCatalog {
    fn pick(&self, category_id: &CategoryId) -> Question {
        match self.lookup(category_id.as_str()) {
            Some(questions) => {
                let index = rand::rng().random_range(0..questions.len());
                questions[index].clone()
            }
            None => {
                tracing::debug!(
                    "Category '{}' unknown or empty, using fallback question",
                    category_id
                );
                self.fallback.clone()
            }
        }
    }
}

fn builtin_fallback() -> Question {
    let (title, answers) = &GENERAL[0];
    Question::from_ranked(*title, answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> CategoryId {
        CategoryId::new(id).unwrap()
    }

    #[test]
    fn test_builtin_catalog_has_ranked_questions() {
        // テスト項目: 組み込みカタログの各問題は 10 個の回答を持ち points == rank
        // given (前提条件):
        let catalog = StaticQuestionCatalog::builtin();

        // when (操作):
        let names = catalog.categories();

        // then (期待する結果):
        assert_eq!(names, vec!["food", "general", "movies", "sports"]);
        for name in names {
            let question = catalog.pick(&category(name));
            assert_eq!(question.answers.len(), 10);
            for (index, entry) in question.answers.iter().enumerate() {
                assert_eq!(entry.rank, index as u32 + 1);
                assert_eq!(entry.points, entry.rank);
            }
        }
    }

    #[test]
    fn test_pick_returns_question_from_category() {
        // テスト項目: 指定カテゴリの問題の中から選ばれる
        // given (前提条件):
        let catalog = StaticQuestionCatalog::builtin();
        let sports = catalog.lookup("sports").unwrap().to_vec();

        // when (操作) / then (期待する結果):
        for _ in 0..20 {
            let question = catalog.pick(&category("sports"));
            assert!(sports.contains(&question));
        }
    }

    #[test]
    fn test_pick_is_case_insensitive() {
        // テスト項目: カテゴリ名の大文字小文字は区別しない
        // given (前提条件):
        let catalog = StaticQuestionCatalog::builtin();

        // when (操作):
        let question = catalog.pick(&category("Sports"));

        // then (期待する結果):
        assert!(catalog.lookup("sports").unwrap().contains(&question));
    }

    #[test]
    fn test_case_insensitive_lookup_is_deterministic() {
        // テスト項目: 大文字小文字だけが異なるカテゴリがあっても、常に同じカテゴリが選ばれる
        // given (前提条件):
        let question = |title: &str| Question::from_ranked(title, &["a"]);

        for _ in 0..20 {
            let catalog = StaticQuestionCatalog::new(HashMap::from([
                ("Sports".to_string(), vec![question("lower")]),
                ("SPORTS".to_string(), vec![question("upper")]),
            ]));

            // when (操作):
            let folded = catalog.pick(&category("sports"));
            let exact = catalog.pick(&category("Sports"));

            // then (期待する結果):
            assert_eq!(folded.title, "upper");
            assert_eq!(exact.title, "lower");
        }
    }

    #[test]
    fn test_catalog_with_case_colliding_categories_is_rejected() {
        // テスト項目: 大文字小文字だけが異なるカテゴリ名を持つファイルは読み込めない
        // given (前提条件):
        let json = r#"{
            "Sports": [{"title": "A", "answers": [{"text": "a", "rank": 1, "points": 1}]}],
            "sports": [{"title": "B", "answers": [{"text": "b", "rank": 1, "points": 1}]}]
        }"#;

        // when (操作):
        let result = StaticQuestionCatalog::from_json_str(json);

        // then (期待する結果):
        assert!(matches!(result, Err(CatalogError::Invalid(message)) if message.contains("differ only in case")));
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        // テスト項目: 未知のカテゴリはデフォルトカテゴリの最初の問題になる
        // given (前提条件):
        let catalog = StaticQuestionCatalog::builtin();

        // when (操作):
        let question = catalog.pick(&category("astrophysics"));

        // then (期待する結果):
        assert_eq!(&question, catalog.fallback());
        assert_eq!(question.title, "Most spoken languages in the world");
    }

    #[test]
    fn test_empty_category_falls_back_to_default() {
        // テスト項目: 問題が 0 件のカテゴリもフォールバックする
        // given (前提条件):
        let catalog =
            StaticQuestionCatalog::from_json_str(r#"{"empty": [], "general": [{"title": "G", "answers": [{"text": "a", "rank": 1, "points": 1}]}]}"#)
                .unwrap();

        // when (操作):
        let question = catalog.pick(&category("empty"));

        // then (期待する結果):
        assert_eq!(question.title, "G");
    }

    #[test]
    fn test_loaded_catalog_without_default_uses_builtin_fallback() {
        // テスト項目: デフォルトカテゴリを持たないカタログは組み込みのフォールバックを使う
        // given (前提条件):
        let json = r#"{"trees": [{"title": "Tallest trees", "answers": [{"text": "Redwood", "rank": 1, "points": 1}]}]}"#;

        // when (操作):
        let catalog = StaticQuestionCatalog::from_json_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(catalog.pick(&category("trees")).title, "Tallest trees");
        assert_eq!(
            catalog.pick(&category("nope")).title,
            "Most spoken languages in the world"
        );
    }

    #[test]
    fn test_invalid_catalogs_are_rejected() {
        // テスト項目: 壊れた JSON や回答のない問題はエラーになる
        // given (前提条件):
        let broken = "{ not json";
        let no_answers = r#"{"x": [{"title": "Empty", "answers": []}]}"#;

        // when (操作):
        let parse = StaticQuestionCatalog::from_json_str(broken);
        let invalid = StaticQuestionCatalog::from_json_str(no_answers);

        // then (期待する結果):
        assert!(matches!(parse, Err(CatalogError::Parse(_))));
        assert!(matches!(invalid, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        // テスト項目: 存在しないファイルは Io エラーになる
        // given (前提条件):
        let path = "/nonexistent/topten/catalog.json";

        // when (操作):
        let result = StaticQuestionCatalog::from_path(path);

        // then (期待する結果):
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}

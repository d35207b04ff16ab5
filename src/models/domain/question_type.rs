use std::fmt;

use serde::{Deserialize, Serialize};

/// Embedded structure a question of a given type must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Substructure {
    /// Non-empty `options`.
    Options,
    /// Non-empty `subQuestions`.
    SubQuestions,
    None,
}

struct RegistryEntry {
    kind: QuestionType,
    tag: &'static str,
    requires: Substructure,
}

/// Declares `QuestionType` and `REGISTRY` from a single list of kinds.
macro_rules! question_types {
    ($($variant:ident => $tag:literal requires $requires:ident,)+) => {
        /// Closed set of question kinds a quiz may contain.
        ///
        /// The serialized tag is the registry tag (`"mcq"`, `"fillblank"`, ...). Which
        /// embedded structure a kind requires is decided by the registry table and by
        /// nothing else.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum QuestionType {
            $($variant,)+
        }

        // entries are emitted in variant order, so `kind as usize` is the row index
        const REGISTRY: &[RegistryEntry] = &[
            $(RegistryEntry {
                kind: QuestionType::$variant,
                tag: $tag,
                requires: Substructure::$requires,
            },)+
        ];
    };
}

question_types! {
    Mcq => "mcq" requires Options,
    FillBlank => "fillblank" requires None,
    ShortAnswer => "shortanswer" requires None,
    Essay => "essay" requires None,
    Matching => "matching" requires None,
    Image => "image" requires SubQuestions,
}

const ALLOWED: [QuestionType; REGISTRY.len()] = {
    let mut kinds = [REGISTRY[0].kind; REGISTRY.len()];
    let mut i = 0;
    while i < REGISTRY.len() {
        kinds[i] = REGISTRY[i].kind;
        i += 1;
    }
    kinds
};

impl QuestionType {
    /// Every known type, in registry order.
    pub fn allowed_types() -> &'static [QuestionType] {
        &ALLOWED
    }

    /// Exact tag lookup. Legacy display labels such as `"Multiple Choice"` are not recognized.
    pub fn parse(tag: &str) -> Option<QuestionType> {
        REGISTRY.iter().find(|e| e.tag == tag).map(|e| e.kind)
    }

    pub fn as_str(self) -> &'static str {
        self.entry().tag
    }

    pub fn requires(self) -> Substructure {
        self.entry().requires
    }

    pub fn is_choice_based(self) -> bool {
        self.requires() == Substructure::Options
    }

    pub fn is_composite_based(self) -> bool {
        self.requires() == Substructure::SubQuestions
    }

    fn entry(self) -> &'static RegistryEntry {
        &REGISTRY[self as usize]
    }
}

impl TryFrom<String> for QuestionType {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        QuestionType::parse(&tag).ok_or_else(|| format!("unknown question type '{}'", tag))
    }
}

impl From<QuestionType> for &'static str {
    fn from(kind: QuestionType) -> Self {
        kind.as_str()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

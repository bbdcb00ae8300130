//! Study subjects and their fixed category menus.
//!
//! Each subject keeps its record collection under its own persistence key,
//! so subjects never see each other's cards. The category menu is the fixed
//! set offered when adding or editing a card; "no selection" is represented
//! by an empty string and rejected at validation, it never reaches the
//! store.

/// A study subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    LinearAlgebra,
    Calculus,
}

impl Subject {
    /// Persistence key for this subject's record collection.
    pub fn storage_key(self) -> &'static str {
        match self {
            Subject::LinearAlgebra => "linear_algebra_items",
            Subject::Calculus => "calculus_items",
        }
    }

    /// The fixed category menu for this subject.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Subject::LinearAlgebra => &[
                "Vectors",
                "Matrices",
                "Determinants",
                "Linear Maps",
                "Eigenvalues",
            ],
            Subject::Calculus => &[
                "Limits",
                "Derivatives",
                "Integrals",
                "Series",
                "Differential Equations",
            ],
        }
    }

    /// Whether `category` is a member of this subject's menu.
    pub fn has_category(self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

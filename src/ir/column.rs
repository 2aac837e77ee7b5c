//! `Column`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default_value: Option<String>,
    pub max_length: Option<i32>,
    /// `GENERATED ALWAYS AS IDENTITY` / `GENERATED BY DEFAULT AS IDENTITY`,
    /// stored as the bare generation keyword (`"ALWAYS"` / `"BY DEFAULT"`).
    pub identity_generation: Option<String>,
    pub comment: Option<String>,
}

use crate::model::field::ColumnModel;
use thiserror::Error as ThisError;

///
/// ModelError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error("entity path must be non-empty")]
    EmptyPath,

    #[error("entity '{path}' has a column with an empty name")]
    EmptyColumnName { path: String },

    #[error("entity '{path}' declares column '{column}' more than once")]
    DuplicateColumn { path: String, column: String },

    #[error("entity '{path}' primary key '{column}' is not a declared column")]
    MissingPrimaryKey { path: String, column: String },
}

///
/// EntityModel
///
/// Schema configuration for one paginated entity. `columns` is the
/// allow-list; nothing outside it may reach a predicate or an ORDER BY.
/// The primary key is always treated as unique and is the tie-break column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    path: String,
    primary_key: usize,
    columns: Vec<ColumnModel>,
}

impl EntityModel {
    pub fn try_new(
        path: impl Into<String>,
        primary_key: impl Into<String>,
        columns: Vec<ColumnModel>,
    ) -> Result<Self, ModelError> {
        let path = path.into();
        let primary_key = primary_key.into();

        if path.is_empty() {
            return Err(ModelError::EmptyPath);
        }

        for (idx, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(ModelError::EmptyColumnName { path });
            }
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(ModelError::DuplicateColumn {
                    path,
                    column: column.name.clone(),
                });
            }
        }

        let Some(primary_key_index) = columns.iter().position(|c| c.name == primary_key) else {
            return Err(ModelError::MissingPrimaryKey {
                path,
                column: primary_key,
            });
        };

        Ok(Self {
            path,
            primary_key: primary_key_index,
            columns,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn primary_key(&self) -> &ColumnModel {
        &self.columns[self.primary_key]
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnModel] {
        &self.columns
    }

    /// Resolve one allow-listed column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether ordering by this column alone is already total.
    #[must_use]
    pub fn is_unique(&self, name: &str) -> bool {
        name == self.primary_key().name || self.column(name).is_some_and(|c| c.unique)
    }
}
